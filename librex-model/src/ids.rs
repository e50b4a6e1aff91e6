use std::path::Path;

use uuid::Uuid;

/// Namespace under which path-derived identifiers are minted.
///
/// Fixed for the lifetime of the project: the same path must map to the same
/// id on every scan, or rescans would duplicate the whole tree.
const ITEM_PATH_NAMESPACE: Uuid = Uuid::from_bytes([
    0x6c, 0x69, 0x62, 0x72, 0x65, 0x78, 0x2d, 0x69, 0x74, 0x65, 0x6d, 0x2d,
    0x70, 0x61, 0x74, 0x68,
]);

/// Strongly typed identifier for library items.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub Uuid);

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemId {
    /// Mint a fresh identifier for an item with no filesystem backing.
    pub fn new() -> Self {
        ItemId(Uuid::now_v7())
    }

    /// Derive the stable identifier for a path-backed item.
    ///
    /// Deterministic: two resolution passes over the same path produce the
    /// same id, which is what keeps rescans from re-creating items.
    pub fn from_path(path: &Path) -> Self {
        ItemId(Uuid::new_v5(
            &ITEM_PATH_NAMESPACE,
            path.as_os_str().as_encoded_bytes(),
        ))
    }

    /// The all-zero identifier, used as the "no id" sentinel in guards.
    pub fn nil() -> Self {
        ItemId(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
