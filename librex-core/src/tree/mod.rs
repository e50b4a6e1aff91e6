//! The library tree: item traits and types, the aggregate root, the
//! virtual-child overlay, change detection, and the item registry.

pub mod aggregate;
pub mod item;
pub mod overlay;
pub mod refresh;
pub mod registry;

pub use aggregate::AggregateRoot;
pub use item::{item_from_entry, ChildBearing, FileItem, Folder, ItemLike};
pub use overlay::VirtualChildSet;
pub use refresh::{diff_locations, LocationsDiff};
pub use registry::ItemRegistry;
