use serde::{Deserialize, Serialize};

use crate::model::ids::ElementId;

/// A named metadata field definition (e.g. "Subject", "Date").
///
/// Elements are grouped into element sets (Dublin Core, item-type
/// metadata, and so on) and scoped to a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub name: String,
    pub description: Option<String>,

    pub element_set_id: i64,
    pub record_type_id: i64,
    pub data_type_id: i64,

    /// Display ordering within the element set.
    pub order: Option<i64>,
}

/// A named group of elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSet {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub record_type_id: i64,
}

/// One metadata value attached to a record for one element.
///
/// A record may carry several rows for the same element; the field is
/// multi-valued, and no clamping or deduplication is applied anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementText {
    pub id: i64,

    /// The record this value belongs to, scoped by `record_type_id`.
    pub record_id: i64,
    pub record_type_id: i64,

    pub element_id: ElementId,

    /// Plain-text content.
    pub text: String,

    /// HTML content, consulted only when `text` is empty.
    pub html: String,
}

impl ElementText {
    /// The effective value of this entry: the plain text when present,
    /// otherwise the HTML content.
    #[must_use]
    pub fn value(&self) -> &str {
        if self.text.is_empty() {
            &self.html
        } else {
            &self.text
        }
    }
}
