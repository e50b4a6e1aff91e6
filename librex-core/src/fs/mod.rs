//! Filesystem access layer: the directory service trait, its `std::fs`
//! implementation, and link-file handling.

pub mod directory_service;
pub mod links;

pub use directory_service::{DirectoryService, StdDirectoryService};
pub use links::{is_link_file, parse_link_target, LINK_FILE_EXTENSIONS};

#[cfg(test)]
pub(crate) use directory_service::MockDirectoryService;
