//! Filesystem access behind a trait, with per-instance caching.
//!
//! Resolution runs many stat and listing calls against the same handful of
//! directories. [`StdDirectoryService`] memoizes both so one pass touches
//! each directory once; a caller that wants fresh state constructs a new
//! instance instead of invalidating anything.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::warn;

use librex_model::FsEntryMeta;

use crate::error::{LibraryError, Result};
use crate::fs::links;

/// Source of directory metadata and listings for the resolver.
///
/// Implementations must be safe to share across threads; the engine holds
/// them behind `&dyn DirectoryService`.
#[cfg_attr(test, mockall::automock)]
pub trait DirectoryService: Send + Sync {
    /// Snapshot of the directory itself.
    ///
    /// Fails with [`LibraryError::NotFound`] when the path is missing or
    /// not a directory.
    fn directory_info(&self, path: &Path) -> Result<FsEntryMeta>;

    /// Snapshots of the directory's immediate children, sorted by path.
    fn entries(&self, path: &Path) -> Result<Vec<FsEntryMeta>>;

    /// Target carried by a link file, `None` when the contents are unusable.
    fn read_link_target(&self, path: &Path) -> Result<Option<PathBuf>>;
}

/// [`DirectoryService`] backed by `std::fs`.
///
/// Caches are scoped to the instance and never expire. Drop the service and
/// build a new one to observe filesystem changes.
#[derive(Debug, Default)]
pub struct StdDirectoryService {
    info_cache: Mutex<HashMap<PathBuf, FsEntryMeta>>,
    listing_cache: Mutex<HashMap<PathBuf, Vec<FsEntryMeta>>>,
}

impl StdDirectoryService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DirectoryService for StdDirectoryService {
    fn directory_info(&self, path: &Path) -> Result<FsEntryMeta> {
        if let Some(cached) = self.info_cache.lock().get(path) {
            return Ok(cached.clone());
        }

        let metadata = fs::metadata(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => LibraryError::NotFound(format!(
                "Directory does not exist: {}",
                path.display()
            )),
            _ => LibraryError::Io(err),
        })?;

        if !metadata.is_dir() {
            return Err(LibraryError::NotFound(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        let info = FsEntryMeta::from_metadata(path, &metadata)?;
        self.info_cache
            .lock()
            .insert(path.to_path_buf(), info.clone());
        Ok(info)
    }

    fn entries(&self, path: &Path) -> Result<Vec<FsEntryMeta>> {
        if let Some(cached) = self.listing_cache.lock().get(path) {
            return Ok(cached.clone());
        }

        let read_dir = fs::read_dir(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => LibraryError::NotFound(format!(
                "Directory does not exist: {}",
                path.display()
            )),
            _ => LibraryError::Io(err),
        })?;

        let mut listing = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            let entry_path = entry.path();

            // fs::metadata follows symlinks, so an OS-level link to a
            // directory lists as a directory.
            let metadata = match fs::metadata(&entry_path) {
                Ok(metadata) => metadata,
                Err(err) => {
                    warn!(
                        error = %err,
                        path = %entry_path.display(),
                        "skipping unreadable directory entry"
                    );
                    continue;
                }
            };

            match FsEntryMeta::from_metadata(&entry_path, &metadata) {
                Ok(snapshot) => listing.push(snapshot),
                Err(err) => {
                    warn!(
                        error = %err,
                        path = %entry_path.display(),
                        "skipping unsupported directory entry"
                    );
                }
            }
        }
        listing.sort_by(|a, b| a.path.cmp(&b.path));

        self.listing_cache
            .lock()
            .insert(path.to_path_buf(), listing.clone());
        Ok(listing)
    }

    fn read_link_target(&self, path: &Path) -> Result<Option<PathBuf>> {
        let contents = fs::read_to_string(path)?;
        Ok(links::parse_link_target(&contents))
    }
}
