use std::fs::Metadata;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{ModelError, Result};

/// What kind of filesystem object an entry snapshot describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FsEntryKind {
    File,
    Directory,
}

/// Point-in-time snapshot of one filesystem entry.
///
/// Captured once per resolution pass so the rest of the pipeline never has
/// to touch the filesystem again for the same entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FsEntryMeta {
    pub path: PathBuf,
    pub kind: FsEntryKind,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

impl FsEntryMeta {
    /// Build a snapshot from stat output.
    ///
    /// Entries that are neither files nor directories (sockets, fifos and
    /// the like) are rejected rather than silently misclassified.
    pub fn from_metadata(path: impl Into<PathBuf>, metadata: &Metadata) -> Result<Self> {
        let path = path.into();
        let kind = if metadata.is_dir() {
            FsEntryKind::Directory
        } else if metadata.is_file() {
            FsEntryKind::File
        } else {
            return Err(ModelError::UnsupportedEntry(format!(
                "not a regular file or directory: {}",
                path.display()
            )));
        };

        Ok(FsEntryMeta {
            path,
            kind,
            size: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::from),
        })
    }

    /// Snapshot for a path that could not be stat-ed but is still carried
    /// in a listing, e.g. a link target on a share that is currently down.
    pub fn assumed_directory(path: impl Into<PathBuf>) -> Self {
        FsEntryMeta {
            path: path.into(),
            kind: FsEntryKind::Directory,
            size: 0,
            modified: None,
        }
    }

    /// Final path component, lossily decoded.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn is_dir(&self) -> bool {
        self.kind == FsEntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == FsEntryKind::File
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn snapshot_of_a_real_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("movie.mkv");
        fs::write(&file, b"fake video content").unwrap();

        let meta = fs::metadata(&file).unwrap();
        let entry = FsEntryMeta::from_metadata(&file, &meta).unwrap();

        assert!(entry.is_file());
        assert!(!entry.is_dir());
        assert_eq!(entry.size, 18);
        assert_eq!(entry.name(), "movie.mkv");
        assert!(entry.modified.is_some());
    }

    #[test]
    fn snapshot_of_a_real_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let meta = fs::metadata(dir.path()).unwrap();
        let entry = FsEntryMeta::from_metadata(dir.path(), &meta).unwrap();

        assert!(entry.is_dir());
    }

    #[test]
    fn assumed_directory_defaults() {
        let entry = FsEntryMeta::assumed_directory("/mnt/offline-share");
        assert!(entry.is_dir());
        assert_eq!(entry.size, 0);
        assert!(entry.modified.is_none());
        assert_eq!(entry.name(), "offline-share");
    }
}
