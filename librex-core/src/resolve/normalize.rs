//! Root-path normalization.
//!
//! The physical root of a library usually mixes plain folders with link
//! files, and nothing stops a user from linking both a share and one of
//! its subfolders. Normalization collapses such lists to the minimal set
//! of roots so the same file is never scanned under two entries.

use std::path::{Path, PathBuf};

/// Reduce a path list to entries not contained in any other entry.
///
/// Containment is component-wise, so `/media/lib` never swallows
/// `/media/library`. Duplicates collapse to the first occurrence. The
/// result is a covering set: every input path is equal to or lives under
/// some returned path.
pub fn normalize_root_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut kept: Vec<PathBuf> = Vec::new();
    for candidate in paths {
        if kept.iter().any(|root| candidate.starts_with(root)) {
            continue;
        }
        kept.retain(|root| !is_strict_descendant(root, candidate));
        kept.push(candidate.clone());
    }
    kept
}

fn is_strict_descendant(path: &Path, ancestor: &Path) -> bool {
    path != ancestor && path.starts_with(ancestor)
}
