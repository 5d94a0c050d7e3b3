use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::CollectionId;

/// A named grouping of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    pub description: String,

    /// Free-text credit line for the people who assembled the collection.
    pub collectors: String,

    pub public: bool,
    pub featured: bool,

    pub owner_id: i64,
    pub added: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}
