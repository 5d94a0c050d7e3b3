//! Column-set discovery: the pre-pass computing the full output schema
//! before any row is written.

use std::collections::BTreeSet;

use vitrine_core::model::Item;
use vitrine_core::schema::Database;

use crate::error::ExportResult;

/// Column holding the item's id.
pub const IDENTIFIER_COLUMN: &str = "Identifier";

/// Column holding the item's attached filenames.
pub const FILES_COLUMN: &str = "Files";

/// Column holding the item's tag names.
pub const TAGS_COLUMN: &str = "Tags";

/// Compute the sorted output column set for the given items.
///
/// Starts from the three fixed columns and unions in every element name
/// observed on any item. The output schema is data-driven: the final
/// set is unknowable without scanning all items, which is why the job
/// runs this as a full pre-pass before emitting rows.
pub fn discover_columns(db: &Database, items: &[Item]) -> ExportResult<Vec<String>> {
    let mut names: BTreeSet<String> = [IDENTIFIER_COLUMN, FILES_COLUMN, TAGS_COLUMN]
        .iter()
        .map(|name| (*name).to_string())
        .collect();

    for item in items {
        names.extend(db.elements_of(item.id)?.into_keys());
    }

    Ok(names.into_iter().collect())
}
