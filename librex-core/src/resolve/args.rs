//! Resolution context: everything one resolution pass learned about a
//! directory, captured so later stages never re-stat the filesystem.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use librex_model::{FsEntryMeta, ItemId};

/// Snapshot handed to item construction after a directory is resolved.
///
/// Holds the directory's own metadata, its (possibly flattened) listing
/// keyed by path, and any additional locations contributed by link files.
/// Immutable to consumers; only the resolver and the root aggregate amend
/// it while a pass is still in flight.
#[derive(Debug, Clone)]
pub struct ResolveArgs {
    path: PathBuf,
    parent: Option<ItemId>,
    directory_info: FsEntryMeta,
    children: BTreeMap<PathBuf, FsEntryMeta>,
    additional_locations: Vec<PathBuf>,
    is_physical_root: bool,
    is_library_view: bool,
}

impl ResolveArgs {
    /// Build an empty context for `path`, classifying it against the
    /// configured root anchor.
    ///
    /// The anchor is the library's physical root: resolving the anchor
    /// itself marks the context as physical root, resolving one of its
    /// immediate children marks it as a library view. Without an anchor
    /// neither flag is set.
    pub fn new(
        path: impl Into<PathBuf>,
        parent: Option<ItemId>,
        directory_info: FsEntryMeta,
        anchor: Option<&Path>,
    ) -> Self {
        let path = path.into();
        let is_physical_root = anchor.is_some_and(|anchor| path == anchor);
        let is_library_view = anchor.is_some_and(|anchor| path.parent() == Some(anchor));

        ResolveArgs {
            path,
            parent,
            directory_info,
            children: BTreeMap::new(),
            additional_locations: Vec::new(),
            is_physical_root,
            is_library_view,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    pub fn directory_info(&self) -> &FsEntryMeta {
        &self.directory_info
    }

    pub fn is_directory(&self) -> bool {
        self.directory_info.is_dir()
    }

    pub fn is_physical_root(&self) -> bool {
        self.is_physical_root
    }

    pub fn is_library_view(&self) -> bool {
        self.is_library_view
    }

    /// Resolved child entries in path order.
    pub fn children(&self) -> impl Iterator<Item = &FsEntryMeta> {
        self.children.values()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Locations beyond `path` that feed this directory, in the order the
    /// contributing link files were encountered.
    pub fn additional_locations(&self) -> &[PathBuf] {
        &self.additional_locations
    }

    /// The directory's own path followed by every additional location.
    ///
    /// Deliberately unnormalized: a link target that later gets pruned
    /// from the listing still counts as a physical location, so change
    /// detection keys off what the filesystem contains rather than what
    /// survives pruning.
    pub fn physical_locations(&self) -> Vec<PathBuf> {
        std::iter::once(self.path.clone())
            .chain(self.additional_locations.iter().cloned())
            .collect()
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&FsEntryMeta> {
        self.children.get(path)
    }

    pub fn contains_entry_named(&self, name: &str) -> bool {
        self.children.values().any(|entry| entry.name() == name)
    }

    pub(crate) fn set_children(&mut self, children: BTreeMap<PathBuf, FsEntryMeta>) {
        self.children = children;
    }

    pub(crate) fn add_additional_location(&mut self, location: PathBuf) {
        self.additional_locations.push(location);
    }

    /// Drop directory children not present in `keep`. File children are
    /// never pruned; normalization only applies to roots.
    pub(crate) fn retain_children(&mut self, keep: &[PathBuf]) {
        self.children
            .retain(|path, entry| !entry.is_dir() || keep.iter().any(|k| k == path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir_meta(path: &str) -> FsEntryMeta {
        FsEntryMeta::assumed_directory(path)
    }

    fn file_meta(path: &str) -> FsEntryMeta {
        FsEntryMeta {
            path: PathBuf::from(path),
            kind: librex_model::FsEntryKind::File,
            size: 1,
            modified: None,
        }
    }

    fn with_children(mut args: ResolveArgs, entries: Vec<FsEntryMeta>) -> ResolveArgs {
        args.set_children(
            entries
                .into_iter()
                .map(|entry| (entry.path.clone(), entry))
                .collect(),
        );
        args
    }

    #[test]
    fn classification_against_the_anchor() {
        let anchor = Some(Path::new("/srv/root"));

        let root = ResolveArgs::new("/srv/root", None, dir_meta("/srv/root"), anchor);
        assert!(root.is_physical_root());
        assert!(!root.is_library_view());
        assert!(root.is_directory());
        assert!(root.parent().is_none());
        assert_eq!(root.directory_info().path, PathBuf::from("/srv/root"));

        let view = ResolveArgs::new(
            "/srv/root/movies",
            None,
            dir_meta("/srv/root/movies"),
            anchor,
        );
        assert!(!view.is_physical_root());
        assert!(view.is_library_view());

        let deep = ResolveArgs::new(
            "/srv/root/movies/heat",
            None,
            dir_meta("/srv/root/movies/heat"),
            anchor,
        );
        assert!(!deep.is_physical_root());
        assert!(!deep.is_library_view());
    }

    #[test]
    fn no_anchor_means_no_classification() {
        let args = ResolveArgs::new("/srv/root", None, dir_meta("/srv/root"), None);
        assert!(!args.is_physical_root());
        assert!(!args.is_library_view());
    }

    #[test]
    fn physical_locations_keep_link_order() {
        let anchor = Some(Path::new("/srv/root"));
        let mut args = ResolveArgs::new("/srv/root", None, dir_meta("/srv/root"), anchor);
        args.add_additional_location(PathBuf::from("/share/movies"));
        args.add_additional_location(PathBuf::from("/mnt/extra"));

        assert_eq!(
            args.physical_locations(),
            vec![
                PathBuf::from("/srv/root"),
                PathBuf::from("/share/movies"),
                PathBuf::from("/mnt/extra"),
            ]
        );
    }

    #[test]
    fn lookup_by_path_and_name() {
        let anchor = Some(Path::new("/srv/root"));
        let args = ResolveArgs::new("/srv/root", None, dir_meta("/srv/root"), anchor);
        let args = with_children(
            args,
            vec![dir_meta("/srv/root/movies"), file_meta("/srv/root/readme.txt")],
        );

        assert!(args.entry_by_path(Path::new("/srv/root/movies")).is_some());
        assert!(args.entry_by_path(Path::new("/srv/root/shows")).is_none());
        assert!(args.contains_entry_named("readme.txt"));
        assert!(!args.contains_entry_named("shows"));
        assert_eq!(args.child_count(), 2);
    }

    #[test]
    fn retain_children_spares_files() {
        let anchor = Some(Path::new("/srv/root"));
        let args = ResolveArgs::new("/srv/root", None, dir_meta("/srv/root"), anchor);
        let mut args = with_children(
            args,
            vec![
                dir_meta("/share/movies"),
                dir_meta("/share/movies/action"),
                file_meta("/srv/root/readme.txt"),
            ],
        );

        args.retain_children(&[PathBuf::from("/share/movies")]);

        assert!(args.entry_by_path(Path::new("/share/movies")).is_some());
        assert!(args.entry_by_path(Path::new("/share/movies/action")).is_none());
        assert!(args.entry_by_path(Path::new("/srv/root/readme.txt")).is_some());
    }
}
