//! Library items: the object-safe item traits and the concrete file and
//! folder types produced from resolved filesystem entries.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use librex_model::{FsEntryKind, FsEntryMeta, ItemId};

use crate::error::Result;
use crate::fs::DirectoryService;
use crate::resolve::{resolve_directory, ResolveProfile};

/// An entry in the library tree.
///
/// Path-backed items carry the filesystem path they were resolved from;
/// virtual items have none. Parent links are ids, resolved through the
/// registry, never owning pointers.
pub trait ItemLike: Send + Sync + fmt::Debug {
    fn id(&self) -> ItemId;

    fn name(&self) -> &str;

    /// Filesystem path backing this item, `None` for virtual items.
    fn path(&self) -> Option<&Path>;

    fn parent(&self) -> Option<ItemId>;

    fn can_delete(&self) -> bool {
        true
    }

    fn is_virtual(&self) -> bool {
        self.path().is_none()
    }

    /// Capability accessor: `Some` when the item can hold children.
    fn as_child_bearing(&self) -> Option<&dyn ChildBearing> {
        None
    }
}

/// Capability of items that hold children.
pub trait ChildBearing: ItemLike {
    /// Whether link files directly inside this item are followed.
    fn supports_shortcut_children(&self) -> bool {
        true
    }

    /// Resolve current children from the filesystem.
    fn resolve_children(&self, ds: &dyn DirectoryService) -> Result<Vec<Arc<dyn ItemLike>>>;
}

/// Fields shared by every concrete item.
#[derive(Debug, Clone)]
struct ItemCore {
    id: ItemId,
    name: String,
    path: Option<PathBuf>,
    parent: Option<ItemId>,
    discovered_at: DateTime<Utc>,
}

impl ItemCore {
    fn from_entry(meta: &FsEntryMeta, parent: Option<ItemId>) -> Self {
        ItemCore {
            id: ItemId::from_path(&meta.path),
            name: meta.name(),
            path: Some(meta.path.clone()),
            parent,
            discovered_at: Utc::now(),
        }
    }

    fn virtual_named(name: impl Into<String>) -> Self {
        ItemCore {
            id: ItemId::new(),
            name: name.into(),
            path: None,
            parent: None,
            discovered_at: Utc::now(),
        }
    }
}

/// A leaf item backed by a regular file.
#[derive(Debug, Clone)]
pub struct FileItem {
    core: ItemCore,
    size: u64,
    modified: Option<DateTime<Utc>>,
}

impl FileItem {
    pub fn from_entry(meta: &FsEntryMeta, parent: Option<ItemId>) -> Self {
        FileItem {
            core: ItemCore::from_entry(meta, parent),
            size: meta.size,
            modified: meta.modified,
        }
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }

    pub fn discovered_at(&self) -> DateTime<Utc> {
        self.core.discovered_at
    }
}

impl ItemLike for FileItem {
    fn id(&self) -> ItemId {
        self.core.id
    }

    fn name(&self) -> &str {
        &self.core.name
    }

    fn path(&self) -> Option<&Path> {
        self.core.path.as_deref()
    }

    fn parent(&self) -> Option<ItemId> {
        self.core.parent
    }
}

/// A folder item, path-backed or virtual.
///
/// Path-backed folders remember the library anchor they were resolved
/// under so child resolution can classify view folders and pick the right
/// link policy.
#[derive(Debug, Clone)]
pub struct Folder {
    core: ItemCore,
    anchor: Option<PathBuf>,
}

impl Folder {
    pub fn from_entry(meta: &FsEntryMeta, parent: Option<ItemId>, anchor: Option<&Path>) -> Self {
        Folder {
            core: ItemCore::from_entry(meta, parent),
            anchor: anchor.map(Path::to_path_buf),
        }
    }

    /// Folder for a known directory path, without a resolved snapshot.
    pub fn at_path(path: impl Into<PathBuf>, anchor: Option<&Path>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Folder {
            core: ItemCore {
                id: ItemId::from_path(&path),
                name,
                path: Some(path),
                parent: None,
                discovered_at: Utc::now(),
            },
            anchor: anchor.map(Path::to_path_buf),
        }
    }

    /// Folder with no filesystem backing.
    pub fn virtual_named(name: impl Into<String>) -> Self {
        Folder {
            core: ItemCore::virtual_named(name),
            anchor: None,
        }
    }

    pub fn discovered_at(&self) -> DateTime<Utc> {
        self.core.discovered_at
    }

    /// Shared refresh condition of path-backed folders.
    ///
    /// Always false today: names are derived from the path at
    /// construction, so there is nothing left to backfill on refresh.
    pub fn base_requires_refresh(&self) -> bool {
        false
    }

    /// Shared pre-refresh hook of path-backed folders. Reports whether the
    /// hook itself changed anything; currently nothing to do.
    pub fn before_metadata_refresh(&self) -> bool {
        false
    }
}

impl ItemLike for Folder {
    fn id(&self) -> ItemId {
        self.core.id
    }

    fn name(&self) -> &str {
        &self.core.name
    }

    fn path(&self) -> Option<&Path> {
        self.core.path.as_deref()
    }

    fn parent(&self) -> Option<ItemId> {
        self.core.parent
    }

    fn as_child_bearing(&self) -> Option<&dyn ChildBearing> {
        Some(self)
    }
}

impl ChildBearing for Folder {
    fn resolve_children(&self, ds: &dyn DirectoryService) -> Result<Vec<Arc<dyn ItemLike>>> {
        // Virtual folders have nothing on disk to resolve.
        let Some(path) = self.core.path.as_deref() else {
            return Ok(Vec::new());
        };

        let anchor = self.anchor.as_deref();
        let profile = match anchor {
            Some(anchor) if path.parent() == Some(anchor) => ResolveProfile::library_view(),
            _ => ResolveProfile::plain(),
        };

        let args = resolve_directory(ds, path, Some(self.core.id), anchor, profile)?;
        Ok(args
            .children()
            .map(|entry| item_from_entry(entry, Some(self.core.id), anchor))
            .collect())
    }
}

/// Build the item for a resolved entry: directories become [`Folder`]s,
/// files become [`FileItem`]s.
pub fn item_from_entry(
    meta: &FsEntryMeta,
    parent: Option<ItemId>,
    anchor: Option<&Path>,
) -> Arc<dyn ItemLike> {
    match meta.kind {
        FsEntryKind::Directory => {
            Arc::new(Folder::from_entry(meta, parent, anchor)) as Arc<dyn ItemLike>
        }
        FsEntryKind::File => Arc::new(FileItem::from_entry(meta, parent)) as Arc<dyn ItemLike>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::StdDirectoryService;
    use std::fs;

    #[test]
    fn factory_maps_entry_kinds() {
        let dir_entry = FsEntryMeta::assumed_directory("/lib/movies");
        let file_entry = FsEntryMeta {
            path: PathBuf::from("/lib/heat.mkv"),
            kind: FsEntryKind::File,
            size: 7,
            modified: None,
        };

        let folder = item_from_entry(&dir_entry, None, None);
        let file = item_from_entry(&file_entry, None, None);

        assert!(folder.as_child_bearing().is_some());
        assert!(file.as_child_bearing().is_none());
        assert_eq!(folder.name(), "movies");
        assert_eq!(file.name(), "heat.mkv");
        assert!(!folder.is_virtual());
        assert!(folder.can_delete());
    }

    #[test]
    fn file_items_carry_their_snapshot() {
        let entry = FsEntryMeta {
            path: PathBuf::from("/lib/heat.mkv"),
            kind: FsEntryKind::File,
            size: 7,
            modified: None,
        };

        let item = FileItem::from_entry(&entry, None);
        assert_eq!(item.size(), 7);
        assert!(item.modified().is_none());
        assert!(item.discovered_at() <= Utc::now());
        assert_eq!(item.path(), Some(Path::new("/lib/heat.mkv")));
    }

    #[test]
    fn path_backed_ids_are_reproducible() {
        let entry = FsEntryMeta::assumed_directory("/lib/movies");
        let first = item_from_entry(&entry, None, None);
        let second = item_from_entry(&entry, None, None);
        assert_eq!(first.id(), second.id());
    }

    #[test]
    fn virtual_folders_have_no_path() {
        let folder = Folder::virtual_named("Channels");
        assert!(folder.is_virtual());
        assert!(folder.path().is_none());
        assert!(!folder.id().is_nil());
        assert_eq!(folder.name(), "Channels");
        assert!(folder.discovered_at() <= Utc::now());
    }

    #[test]
    fn virtual_folders_resolve_no_children() {
        let folder = Folder::virtual_named("Channels");
        let service = StdDirectoryService::new();
        assert!(folder.resolve_children(&service).unwrap().is_empty());
    }

    #[test]
    fn plain_folders_list_their_children() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir(dir.path().join("extras")).unwrap();
        fs::write(dir.path().join("heat.mkv"), b"fake video content").unwrap();

        let folder = Folder::at_path(dir.path(), None);
        let service = StdDirectoryService::new();
        let children = folder.resolve_children(&service).unwrap();

        assert_eq!(children.len(), 2);
        let extras = children.iter().find(|c| c.name() == "extras").unwrap();
        assert!(extras.as_child_bearing().is_some());
        assert_eq!(extras.parent(), Some(folder.id()));
        let movie = children.iter().find(|c| c.name() == "heat.mkv").unwrap();
        assert!(movie.as_child_bearing().is_none());
    }

    #[test]
    fn view_folders_follow_links() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path().join("root");
        let view = root.join("movies");
        let share = dir.path().join("share/films");
        fs::create_dir_all(&view).unwrap();
        fs::create_dir_all(&share).unwrap();
        fs::write(view.join("films.lxlink"), format!("{}\n", share.display())).unwrap();

        let folder = Folder::at_path(&view, Some(&root));
        let service = StdDirectoryService::new();
        let children = folder.resolve_children(&service).unwrap();

        assert_eq!(children.len(), 1);
        assert_eq!(children[0].path(), Some(share.as_path()));
        assert!(children[0].as_child_bearing().is_some());
    }
}
