//! # Librex Core
//!
//! Library-tree aggregation engine for the Librex Media Server: the in-memory
//! hierarchy of folder and file items that mirrors one or more physical
//! storage roots, together with externally injected virtual items.
//!
//! ## Overview
//!
//! `librex-core` keeps a library tree consistent under the three things that
//! routinely break one:
//!
//! - **Out-of-band storage changes**: the root re-detects added or removed
//!   physical locations and raises an edge-triggered refresh mark
//! - **Overlapping root paths**: link files pointing inside other linked
//!   shares are normalized away so nothing is scanned twice
//! - **Virtual/real coexistence**: synthetic items injected by collaborating
//!   services survive rescans alongside filesystem-backed items
//!
//! ## Architecture
//!
//! - [`fs`]: the [`DirectoryService`](fs::DirectoryService) port, its
//!   `std::fs` implementation, and link-file handling
//! - [`resolve`]: root-path normalization and directory resolution into
//!   per-pass [`ResolveArgs`](resolve::ResolveArgs) contexts
//! - [`tree`]: item traits and types, the
//!   [`AggregateRoot`](tree::AggregateRoot), the virtual-child overlay,
//!   change detection, and the item registry
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use librex_core::fs::StdDirectoryService;
//! use librex_core::tree::{AggregateRoot, Folder, ItemLike};
//!
//! fn refresh_cycle() -> Result<(), librex_core::LibraryError> {
//!     let root = AggregateRoot::new("/srv/media/root");
//!     root.add_virtual_child(Arc::new(Folder::virtual_named("Channels")))?;
//!
//!     // A fresh service observes current filesystem state.
//!     if root.requires_refresh(&StdDirectoryService::new())? && root.before_metadata_refresh() {
//!         for child in root.children_from_filesystem(&StdDirectoryService::new())? {
//!             println!("{}", child.name());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Error types and the crate-wide `Result` alias
pub mod error;

/// Filesystem access layer and link files
pub mod fs;

/// Path normalization and directory resolution
pub mod resolve;

/// The library tree: items, aggregate root, overlay, registry
pub mod tree;

pub use error::{LibraryError, Result};
pub use fs::{DirectoryService, StdDirectoryService};
pub use librex_model::{FsEntryKind, FsEntryMeta, ItemId, ModelError};
pub use tree::{AggregateRoot, ChildBearing, Folder, ItemLike};
