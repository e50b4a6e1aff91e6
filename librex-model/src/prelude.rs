//! Convenience re-exports for downstream crates.
//!
//! ```
//! use librex_model::prelude::*;
//! ```

pub use super::entry::{FsEntryKind, FsEntryMeta};
pub use super::error::{ModelError, Result as ModelResult};
pub use super::ids::ItemId;
