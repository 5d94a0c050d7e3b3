use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::TagId;

/// The discriminator value marking a tagging as applied to an item.
///
/// The `taggings` join table is polymorphic: the same table also links
/// tags to exhibits and other record kinds. Only rows with this kind
/// count as item tags.
pub const ITEM_TAGGING_KIND: &str = "Item";

/// A tag: a unique name that can be attached to records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// A single application of a tag to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tagging {
    pub id: i64,
    pub tag_id: TagId,

    /// The id of the tagged record. Which table that id points into is
    /// determined by `kind`.
    pub relation_id: i64,

    /// The entity (user) that applied the tag.
    pub entity_id: i64,

    /// Record-kind discriminator (the `type` column).
    pub kind: String,

    pub time: DateTime<Utc>,
}

impl Tagging {
    /// Whether this tagging attaches a tag to the given item.
    #[must_use]
    pub fn applies_to_item(&self, item_id: i64) -> bool {
        self.kind == ITEM_TAGGING_KIND && self.relation_id == item_id
    }
}
