use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::ItemId;

/// A file attached to an item (scan, audio recording, transcript, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub id: i64,
    pub item_id: ItemId,

    /// Filename as uploaded; this is what exports report.
    pub original_filename: String,

    /// Filename within the archive storage directory.
    pub archive_filename: String,

    pub size: i64,
    pub mime_browser: Option<String>,
    pub has_derivative_image: bool,

    pub added: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// A geographic location pin attached to an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub item_id: ItemId,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub zoom_level: i64,
    pub map_type: String,
}

/// A free-text curatorial note attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub item_id: ItemId,
    pub user_id: i64,
    pub note: String,
    pub date_modified: DateTime<Utc>,
}
