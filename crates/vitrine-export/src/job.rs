//! Row emission: the second pass of the export, writing one CSV row per
//! selected item against the discovered column set.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use vitrine_core::model::{Item, ItemTypeId};
use vitrine_core::schema::Database;

use crate::columns::{discover_columns, FILES_COLUMN, IDENTIFIER_COLUMN, TAGS_COLUMN};
use crate::error::ExportResult;

/// Separator joining multi-valued fields inside a single CSV cell.
///
/// A value that itself contains this character is indistinguishable from
/// a delimiter in the output. Accepted limitation.
pub const VALUE_SEPARATOR: &str = "|";

/// What to export. The selected item type is configuration, not
/// business logic; callers pass it in.
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    pub item_type_id: ItemTypeId,
}

/// Summary of a completed export run.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub item_type_name: String,
    pub items_written: usize,
    pub columns: Vec<String>,
}

/// Export all items of the configured type as CSV into `writer`.
///
/// Fails fast: any store-access or write failure aborts the whole run.
/// Missing related data (no tags, no files, no metadata) is not a
/// failure and shows up as empty cells.
pub fn export_items<W: Write>(
    db: &Database,
    options: ExportOptions,
    writer: W,
) -> ExportResult<ExportReport> {
    let item_type = db.get_item_type(options.item_type_id)?;
    let items = db.items_of_type(item_type.id)?;
    log::info!(
        "exporting {} item(s) of type '{}'",
        items.len(),
        item_type.name
    );

    // Pass one: the header must be complete before the first row goes
    // out, so every item's element names are collected up front.
    let columns = discover_columns(db, &items)?;
    log::debug!("discovered {} column(s)", columns.len());

    // Pass two: emit rows in discovered column order.
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(&columns)?;
    for item in &items {
        out.write_record(row_for_item(db, item, &columns)?)?;
    }
    out.flush()?;

    Ok(ExportReport {
        item_type_name: item_type.name,
        items_written: items.len(),
        columns,
    })
}

/// Export to a file at `path`, created (or truncated) for this run and
/// flushed on completion.
pub fn export_to_path(
    db: &Database,
    options: ExportOptions,
    path: impl AsRef<Path>,
) -> ExportResult<ExportReport> {
    let file = File::create(path)?;
    export_items(db, options, file)
}

fn row_for_item(db: &Database, item: &Item, columns: &[String]) -> ExportResult<Vec<String>> {
    let tags = db.tags_of(item.id)?;
    let files = db.files_of(item.id)?;
    let mut elements = db.elements_of(item.id)?;

    let mut row = Vec::with_capacity(columns.len());
    for column in columns {
        // Fixed columns win over a metadata element sharing their name.
        let cell = match column.as_str() {
            IDENTIFIER_COLUMN => item.id.to_string(),
            TAGS_COLUMN => tags.join(VALUE_SEPARATOR),
            FILES_COLUMN => files
                .iter()
                .map(|file| file.original_filename.as_str())
                .collect::<Vec<_>>()
                .join(VALUE_SEPARATOR),
            name => elements
                .remove(name)
                .map(|values| values.join(VALUE_SEPARATOR))
                .unwrap_or_default(),
        };
        row.push(cell);
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "2014-03-02 10:15:00";

    fn seeded_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.conn()
            .execute_batch(&format!(
                "INSERT INTO item_types (id, name) VALUES (4, 'Oral History');
                 INSERT INTO items (id, item_type_id, featured, public, added, modified)
                     VALUES (7, 4, 0, 1, '{TS}', '{TS}');
                 INSERT INTO element_sets (id, name) VALUES (1, 'Dublin Core');
                 INSERT INTO elements (id, element_set_id, name) VALUES (40, 1, 'Subject');
                 INSERT INTO element_texts (id, record_id, element_id, text, html)
                     VALUES (1, 7, 40, 'History', '');"
            ))
            .unwrap();
        db
    }

    #[test]
    fn test_row_emits_empty_string_for_absent_field() {
        let db = seeded_db();
        let item = db.get_item(vitrine_core::model::ItemId::new(7)).unwrap();
        let columns = vec![
            "Files".to_string(),
            "Identifier".to_string(),
            "Never Observed".to_string(),
            "Subject".to_string(),
            "Tags".to_string(),
        ];
        let row = row_for_item(&db, &item, &columns).unwrap();
        assert_eq!(row, vec!["", "7", "", "History", ""]);
    }

    #[test]
    fn test_fixed_columns_win_over_element_names() {
        let db = seeded_db();
        db.conn()
            .execute_batch(
                "INSERT INTO elements (id, element_set_id, name) VALUES (41, 1, 'Tags');
                 INSERT INTO element_texts (id, record_id, element_id, text, html)
                     VALUES (2, 7, 41, 'not a tag', '');",
            )
            .unwrap();
        let item = db.get_item(vitrine_core::model::ItemId::new(7)).unwrap();
        let row = row_for_item(&db, &item, &["Tags".to_string()]).unwrap();
        // No taggings exist, so the Tags cell is empty even though an
        // element named "Tags" carries a value.
        assert_eq!(row, vec![""]);
    }

    #[test]
    fn test_export_unknown_type_is_fatal() {
        let db = seeded_db();
        let options = ExportOptions {
            item_type_id: ItemTypeId::new(99),
        };
        let result = export_items(&db, options, Vec::new());
        assert!(matches!(result, Err(crate::ExportError::Database(_))));
    }
}
