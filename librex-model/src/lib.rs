//! Core data model definitions shared across Librex crates.
#![allow(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod entry;
pub mod error;
pub mod ids;
pub mod prelude;

pub use entry::{FsEntryKind, FsEntryMeta};
pub use error::{ModelError, Result as ModelResult};
pub use ids::ItemId;
