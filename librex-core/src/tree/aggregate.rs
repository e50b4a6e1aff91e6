//! The aggregate root: the single entity standing for a library's physical
//! root paths plus its injected virtual children.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use librex_model::{FsEntryMeta, ItemId};

use crate::error::{LibraryError, Result};
use crate::fs::DirectoryService;
use crate::resolve::{normalize_root_paths, resolve_directory, ResolveArgs, ResolveProfile};
use crate::tree::item::{item_from_entry, ChildBearing, Folder, ItemLike};
use crate::tree::overlay::VirtualChildSet;
use crate::tree::refresh::diff_locations;

/// Location list and refresh flag move together; one lock covers both.
#[derive(Debug, Default)]
struct RefreshState {
    physical_locations: Vec<PathBuf>,
    needs_refresh: bool,
}

/// Root of a library tree.
///
/// One per library. Aggregates every physical location reachable from the
/// configured root path (the path itself plus link-file targets) and the
/// virtual children injected by collaborating services. Cannot be deleted
/// and never participates in generic link handling; the root runs its own
/// resolution profile.
#[derive(Debug)]
pub struct AggregateRoot {
    root_path: PathBuf,
    folder: Folder,
    virtual_children: VirtualChildSet,
    state: Mutex<RefreshState>,
}

impl AggregateRoot {
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        let root_path = root_path.into();
        let folder = Folder::at_path(&root_path, Some(&root_path));
        AggregateRoot {
            root_path,
            folder,
            virtual_children: VirtualChildSet::new(),
            state: Mutex::new(RefreshState::default()),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Stored physical locations, as of the last persisting pass.
    pub fn physical_locations(&self) -> Vec<PathBuf> {
        self.state.lock().physical_locations.clone()
    }

    /// Whether a refresh is already pending. Never touches the filesystem.
    pub fn needs_refresh(&self) -> bool {
        self.state.lock().needs_refresh
    }

    pub fn virtual_children(&self) -> &VirtualChildSet {
        &self.virtual_children
    }

    /// Run one resolution pass over the root.
    ///
    /// Resolves with the physical-root profile, prunes subsumed directory
    /// roots from the listing, and compares the pass's physical locations
    /// against the stored list. A mismatch marks the root as needing a
    /// refresh; the mark stays until [`before_metadata_refresh`] consumes
    /// it, even from a probing pass. The stored list is overwritten only
    /// when `persist_locations` is set. On error the stored state is left
    /// untouched.
    ///
    /// [`before_metadata_refresh`]: AggregateRoot::before_metadata_refresh
    pub fn create_resolve_args(
        &self,
        ds: &dyn DirectoryService,
        persist_locations: bool,
    ) -> Result<ResolveArgs> {
        let mut args = resolve_directory(
            ds,
            &self.root_path,
            None,
            Some(&self.root_path),
            ResolveProfile::physical_root(),
        )?;

        // A link may point inside another link's target. Keep the outermost
        // root only, or the same file would get picked up twice.
        if args.is_physical_root() {
            let directories: Vec<PathBuf> = args
                .children()
                .filter(|entry| entry.is_dir())
                .map(|entry| entry.path.clone())
                .collect();
            let kept = normalize_root_paths(&directories);
            if kept.len() < directories.len() {
                debug!(
                    pruned = directories.len() - kept.len(),
                    "dropped subsumed roots from the listing of {}",
                    self.root_path.display()
                );
                args.retain_children(&kept);
            }
        }

        let current = args.physical_locations();
        let mut state = self.state.lock();
        if diff_locations(&state.physical_locations, &current).requires_refresh() {
            info!(
                stored = state.physical_locations.len(),
                resolved = current.len(),
                "physical locations of {} changed",
                self.root_path.display()
            );
            state.needs_refresh = true;
        }
        if persist_locations {
            state.physical_locations = current;
        }

        Ok(args)
    }

    /// Raw resolved listing of the root. Persists the location list.
    pub fn file_system_children(&self, ds: &dyn DirectoryService) -> Result<Vec<FsEntryMeta>> {
        let args = self.create_resolve_args(ds, true)?;
        Ok(args.children().cloned().collect())
    }

    /// Current children: items built from the resolved listing, unioned
    /// with a snapshot of the virtual overlay.
    pub fn children_from_filesystem(
        &self,
        ds: &dyn DirectoryService,
    ) -> Result<Vec<Arc<dyn ItemLike>>> {
        let args = self.create_resolve_args(ds, true)?;
        let mut children: Vec<Arc<dyn ItemLike>> = args
            .children()
            .map(|entry| item_from_entry(entry, Some(self.id()), Some(&self.root_path)))
            .collect();
        children.extend(self.virtual_children.snapshot());
        Ok(children)
    }

    /// Whether the root's contents call for a refresh.
    ///
    /// Cheap when a refresh is already pending. Otherwise runs a
    /// non-persisting resolution pass and compares locations; that pass
    /// itself marks the pending flag on a mismatch, so a caller that skips
    /// the refresh still leaves the mark in place for the next cycle. Pass
    /// a fresh [`DirectoryService`] to observe current filesystem state.
    pub fn requires_refresh(&self, ds: &dyn DirectoryService) -> Result<bool> {
        let mut changed = self.folder.base_requires_refresh() || self.state.lock().needs_refresh;

        if !changed {
            let stored = self.physical_locations();
            let fresh = self.create_resolve_args(ds, false)?.physical_locations();
            changed = diff_locations(&stored, &fresh).requires_refresh();
        }

        Ok(changed)
    }

    /// Report whether a refresh was pending and clear the mark.
    ///
    /// Edge-triggered: after one call the pending state is gone, so the
    /// caller must act on a `true`. Never touches the filesystem.
    pub fn before_metadata_refresh(&self) -> bool {
        let mut state = self.state.lock();
        let changed = self.folder.before_metadata_refresh() || state.needs_refresh;
        state.needs_refresh = false;
        changed
    }

    /// Inject a synthetic child with no filesystem backing.
    pub fn add_virtual_child(&self, child: Arc<dyn ItemLike>) -> Result<()> {
        if child.id().is_nil() {
            return Err(LibraryError::InvalidArgument(
                "virtual child must carry a non-nil id".to_string(),
            ));
        }
        self.virtual_children.push(child);
        Ok(())
    }

    /// Look up a virtual child by id. Absence is `Ok(None)`.
    pub fn find_virtual_child(&self, id: ItemId) -> Result<Option<Arc<dyn ItemLike>>> {
        if id.is_nil() {
            return Err(LibraryError::InvalidArgument(
                "virtual child lookup requires a non-nil id".to_string(),
            ));
        }
        Ok(self.virtual_children.find(id))
    }
}

impl ItemLike for AggregateRoot {
    fn id(&self) -> ItemId {
        self.folder.id()
    }

    fn name(&self) -> &str {
        self.folder.name()
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.root_path)
    }

    fn parent(&self) -> Option<ItemId> {
        None
    }

    fn can_delete(&self) -> bool {
        false
    }

    fn as_child_bearing(&self) -> Option<&dyn ChildBearing> {
        Some(self)
    }
}

impl ChildBearing for AggregateRoot {
    /// Links inside the root go through the root's own resolution profile,
    /// not the generic folder path.
    fn supports_shortcut_children(&self) -> bool {
        false
    }

    fn resolve_children(&self, ds: &dyn DirectoryService) -> Result<Vec<Arc<dyn ItemLike>>> {
        self.children_from_filesystem(ds)
    }
}
