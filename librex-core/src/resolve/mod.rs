//! Turning directory paths into resolution contexts: normalization of root
//! path lists, flatten/link policy, and the per-pass [`ResolveArgs`] state.

pub mod args;
pub mod normalize;
pub mod resolver;

pub use args::ResolveArgs;
pub use normalize::normalize_root_paths;
pub use resolver::{resolve_directory, ResolveProfile, ROOT_FLATTEN_DEPTH};
