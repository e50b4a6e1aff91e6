//! Directory resolution.
//!
//! One pass walks a directory through the [`DirectoryService`] port and
//! produces a [`ResolveArgs`] context: the directory's own snapshot, a
//! listing with flattening and link handling applied, and the additional
//! locations contributed by link files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use librex_model::{FsEntryMeta, ItemId};

use crate::error::Result;
use crate::fs::{links, DirectoryService};
use crate::resolve::args::ResolveArgs;

/// Levels of directory children flattened into the physical root's listing.
pub const ROOT_FLATTEN_DEPTH: usize = 2;

/// Tuning for one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveProfile {
    /// Directory children within this many levels are replaced by their own
    /// children. Files are kept at every level.
    pub flatten_depth: usize,
    /// Replace link files with their targets and record the targets as
    /// additional locations.
    pub resolve_links: bool,
}

impl Default for ResolveProfile {
    fn default() -> Self {
        Self::plain()
    }
}

impl ResolveProfile {
    /// Ordinary folder: the listing as the filesystem has it.
    pub fn plain() -> Self {
        ResolveProfile {
            flatten_depth: 0,
            resolve_links: false,
        }
    }

    /// The library's physical root: flatten through the view layer and
    /// follow links.
    pub fn physical_root() -> Self {
        ResolveProfile {
            flatten_depth: ROOT_FLATTEN_DEPTH,
            resolve_links: true,
        }
    }

    /// A view folder directly under the root: follow links, no flattening.
    pub fn library_view() -> Self {
        ResolveProfile {
            flatten_depth: 0,
            resolve_links: true,
        }
    }
}

/// Resolve `path` into a [`ResolveArgs`] context.
///
/// Fails with `NotFound` when `path` is missing or not a directory. A
/// subtree that fails *during flattening* is logged and omitted while its
/// siblings continue; only the top-level listing is fatal.
pub fn resolve_directory(
    ds: &dyn DirectoryService,
    path: &Path,
    parent: Option<ItemId>,
    anchor: Option<&Path>,
    profile: ResolveProfile,
) -> Result<ResolveArgs> {
    let directory_info = ds.directory_info(path)?;
    let mut args = ResolveArgs::new(path, parent, directory_info, anchor);

    let mut children = BTreeMap::new();
    collect_entries(
        ds,
        path,
        profile.flatten_depth,
        profile.resolve_links,
        &mut children,
        &mut args,
    )?;
    args.set_children(children);

    Ok(args)
}

fn collect_entries(
    ds: &dyn DirectoryService,
    path: &Path,
    flatten_depth: usize,
    resolve_links: bool,
    out: &mut BTreeMap<PathBuf, FsEntryMeta>,
    args: &mut ResolveArgs,
) -> Result<()> {
    for entry in ds.entries(path)? {
        if resolve_links && entry.is_file() && links::is_link_file(&entry.path) {
            let target = match ds.read_link_target(&entry.path) {
                Ok(Some(target)) => target,
                Ok(None) => {
                    // Could be stale, or the target is just spelled wrong.
                    warn!("Encountered invalid link file: {}", entry.path.display());
                    continue;
                }
                Err(err) => {
                    error!(
                        error = %err,
                        path = %entry.path.display(),
                        "error resolving link file"
                    );
                    continue;
                }
            };

            // The target may be an offline share. Enter it as a directory
            // anyway; whoever consumes the listing deals with existence.
            let info = ds
                .directory_info(&target)
                .unwrap_or_else(|_| FsEntryMeta::assumed_directory(target.clone()));
            out.insert(target.clone(), info);
            args.add_additional_location(target);
        } else if flatten_depth > 0 && entry.is_dir() {
            if let Err(err) = collect_entries(
                ds,
                &entry.path,
                flatten_depth - 1,
                resolve_links,
                out,
                args,
            ) {
                warn!(
                    error = %err,
                    path = %entry.path.display(),
                    "omitting unreadable subtree from listing"
                );
            }
        } else {
            out.insert(entry.path.clone(), entry);
        }
    }
    Ok(())
}
