use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{CollectionId, ItemId, ItemTypeId};

/// A catalogued item in the archive.
///
/// An item is the central record of the catalogue: a single object,
/// document, recording, or other holding. Its descriptive metadata lives
/// in `element_texts` rows keyed by this item's id, not on the item
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,

    /// The collection this item is filed under, if any.
    pub collection_id: Option<CollectionId>,

    /// The item's type (e.g. "Oral History", "Still Image"), if any.
    pub item_type_id: Option<ItemTypeId>,

    pub featured: bool,
    pub public: bool,

    pub added: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// A named category of items.
///
/// Item types drive export selection: a flat-file export covers all
/// items of exactly one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemType {
    pub id: ItemTypeId,
    pub name: String,
    pub description: Option<String>,
}
