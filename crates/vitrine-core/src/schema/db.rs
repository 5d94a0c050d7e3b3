use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{
    Collection, CollectionId, File, Item, ItemId, ItemType, ItemTypeId, Location, Note,
    ITEM_TAGGING_KIND,
};

use super::migrations::MIGRATIONS;

/// A connection to the archive database with read-only query methods.
///
/// The underlying store is owned by the content-management system; this
/// layer never inserts, updates, or deletes catalogue rows. Opening a
/// database only applies schema migrations, which are no-ops against an
/// already-populated store.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Get a reference to the underlying connection (for advanced queries
    /// and test fixtures).
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        let mut stmt = self
            .conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let applied: Vec<u32> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for migration in MIGRATIONS {
            if !applied.contains(&migration.version) {
                log::info!(
                    "Applying migration {} ({})",
                    migration.version,
                    migration.name
                );
                self.conn.execute_batch(migration.sql)?;
                self.conn.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )?;
            }
        }

        Ok(())
    }
}

// Item and item-type queries
impl Database {
    /// Fetch a single item by id.
    pub fn get_item(&self, id: ItemId) -> Result<Item> {
        let item = self
            .conn
            .query_row(
                "SELECT id, collection_id, item_type_id, featured, public, added, modified
                 FROM items WHERE id = ?1",
                [id.as_i64()],
                row_to_item,
            )
            .optional()?;

        item.ok_or_else(|| Error::NotFound {
            entity: "item",
            id: id.to_string(),
        })
    }

    /// Fetch a single item type by id.
    pub fn get_item_type(&self, id: ItemTypeId) -> Result<ItemType> {
        let item_type = self
            .conn
            .query_row(
                "SELECT id, name, description FROM item_types WHERE id = ?1",
                [id.as_i64()],
                row_to_item_type,
            )
            .optional()?;

        item_type.ok_or_else(|| Error::NotFound {
            entity: "item type",
            id: id.to_string(),
        })
    }

    /// List all item types, ordered by name.
    pub fn list_item_types(&self) -> Result<Vec<ItemType>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, description FROM item_types ORDER BY name")?;
        let types = stmt
            .query_map([], row_to_item_type)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(types)
    }

    /// List all items of the given type, ordered by id.
    pub fn items_of_type(&self, item_type_id: ItemTypeId) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, collection_id, item_type_id, featured, public, added, modified
             FROM items WHERE item_type_id = ?1 ORDER BY id",
        )?;
        let items = stmt
            .query_map([item_type_id.as_i64()], row_to_item)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    /// Count the items of the given type.
    pub fn count_items_of_type(&self, item_type_id: ItemTypeId) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM items WHERE item_type_id = ?1",
            [item_type_id.as_i64()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// The collection an item is filed under, if any.
    pub fn collection_of(&self, item: &Item) -> Result<Option<Collection>> {
        let Some(collection_id) = item.collection_id else {
            return Ok(None);
        };
        let collection = self
            .conn
            .query_row(
                "SELECT id, name, description, collectors, public, featured,
                        owner_id, added, modified
                 FROM collections WHERE id = ?1",
                [collection_id.as_i64()],
                row_to_collection,
            )
            .optional()?;
        Ok(collection)
    }

    /// The type of an item, if any.
    pub fn item_type_of(&self, item: &Item) -> Result<Option<ItemType>> {
        let Some(item_type_id) = item.item_type_id else {
            return Ok(None);
        };
        let item_type = self
            .conn
            .query_row(
                "SELECT id, name, description FROM item_types WHERE id = ?1",
                [item_type_id.as_i64()],
                row_to_item_type,
            )
            .optional()?;
        Ok(item_type)
    }
}

// Computed item views: tags and metadata elements
impl Database {
    /// The names of all tags attached to an item, in tagging order.
    ///
    /// Only taggings with the "Item" discriminator count. Duplicate
    /// tagging rows yield duplicate names; nothing here deduplicates.
    /// An untagged item yields an empty vec, not an error.
    pub fn tags_of(&self, item_id: ItemId) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.name
             FROM tags t
             JOIN taggings g ON g.tag_id = t.id
             WHERE g.relation_id = ?1 AND g.type = ?2
             ORDER BY g.id",
        )?;
        let names = stmt
            .query_map(
                rusqlite::params![item_id.as_i64(), ITEM_TAGGING_KIND],
                |row| row.get(0),
            )?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// The metadata values of an item, grouped by element name.
    ///
    /// Each entry maps an element name to its values in row order; a
    /// multi-valued field keeps every row. The effective value of a row
    /// is its text content when non-empty, otherwise its HTML content.
    /// Elements with no rows for this item are absent from the map.
    pub fn elements_of(&self, item_id: ItemId) -> Result<BTreeMap<String, Vec<String>>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.name, et.text, et.html
             FROM element_texts et
             JOIN elements e ON et.element_id = e.id
             WHERE et.record_id = ?1
             ORDER BY et.id",
        )?;
        let rows = stmt.query_map([item_id.as_i64()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut elements: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for row in rows {
            let (name, text, html) = row?;
            let value = if text.is_empty() { html } else { text };
            elements.entry(name).or_default().push(value);
        }
        Ok(elements)
    }
}

// Item attachments: files, locations, notes
impl Database {
    /// The files attached to an item, in attachment order.
    pub fn files_of(&self, item_id: ItemId) -> Result<Vec<File>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, item_id, original_filename, archive_filename, size,
                    mime_browser, has_derivative_image, added, modified
             FROM files WHERE item_id = ?1 ORDER BY id",
        )?;
        let files = stmt
            .query_map([item_id.as_i64()], row_to_file)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(files)
    }

    /// The geographic locations attached to an item.
    pub fn locations_of(&self, item_id: ItemId) -> Result<Vec<Location>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, item_id, address, latitude, longitude, zoom_level, map_type
             FROM locations WHERE item_id = ?1 ORDER BY id",
        )?;
        let locations = stmt
            .query_map([item_id.as_i64()], |row| {
                Ok(Location {
                    id: row.get(0)?,
                    item_id: ItemId::new(row.get(1)?),
                    address: row.get(2)?,
                    latitude: row.get(3)?,
                    longitude: row.get(4)?,
                    zoom_level: row.get(5)?,
                    map_type: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(locations)
    }

    /// The curatorial notes attached to an item.
    pub fn notes_of(&self, item_id: ItemId) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, item_id, user_id, note, date_modified
             FROM notes WHERE item_id = ?1 ORDER BY id",
        )?;
        let notes = stmt
            .query_map([item_id.as_i64()], |row| {
                Ok(Note {
                    id: row.get(0)?,
                    item_id: ItemId::new(row.get(1)?),
                    user_id: row.get(2)?,
                    note: row.get(3)?,
                    date_modified: parse_datetime(4, &row.get::<_, String>(4)?)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }
}

fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: ItemId::new(row.get(0)?),
        collection_id: row.get::<_, Option<i64>>(1)?.map(CollectionId::new),
        item_type_id: row.get::<_, Option<i64>>(2)?.map(ItemTypeId::new),
        featured: row.get(3)?,
        public: row.get(4)?,
        added: parse_datetime(5, &row.get::<_, String>(5)?)?,
        modified: parse_datetime(6, &row.get::<_, String>(6)?)?,
    })
}

fn row_to_item_type(row: &rusqlite::Row<'_>) -> rusqlite::Result<ItemType> {
    Ok(ItemType {
        id: ItemTypeId::new(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
    })
}

fn row_to_collection(row: &rusqlite::Row<'_>) -> rusqlite::Result<Collection> {
    Ok(Collection {
        id: CollectionId::new(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        collectors: row.get(3)?,
        public: row.get(4)?,
        featured: row.get(5)?,
        owner_id: row.get(6)?,
        added: parse_datetime(7, &row.get::<_, String>(7)?)?,
        modified: parse_datetime(8, &row.get::<_, String>(8)?)?,
    })
}

fn row_to_file(row: &rusqlite::Row<'_>) -> rusqlite::Result<File> {
    Ok(File {
        id: row.get(0)?,
        item_id: ItemId::new(row.get(1)?),
        original_filename: row.get(2)?,
        archive_filename: row.get(3)?,
        size: row.get(4)?,
        mime_browser: row.get(5)?,
        has_derivative_image: row.get(6)?,
        added: parse_datetime(7, &row.get::<_, String>(7)?)?,
        modified: parse_datetime(8, &row.get::<_, String>(8)?)?,
    })
}

/// Parse a TEXT datetime column, accepting RFC 3339 and the
/// `YYYY-MM-DD HH:MM:SS` form the source store writes.
fn parse_datetime(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(Into::into)
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .map(|naive| naive.and_utc())
        })
        .map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(err),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementId;

    const TS: &str = "2014-03-02 10:15:00";

    /// Seed a small archive: one "Oral History" type, two items, tags,
    /// elements, and files. Fixtures go through the raw connection; the
    /// query layer itself stays read-only.
    fn seed(db: &Database) {
        let conn = db.conn();
        conn.execute_batch(&format!(
            "INSERT INTO collections (id, name, added, modified)
                 VALUES (1, 'Community Memory', '{TS}', '{TS}');
             INSERT INTO item_types (id, name, description)
                 VALUES (4, 'Oral History', 'Recorded interviews');
             INSERT INTO item_types (id, name) VALUES (6, 'Still Image');
             INSERT INTO items (id, collection_id, item_type_id, featured, public, added, modified)
                 VALUES (7, 1, 4, 0, 1, '{TS}', '{TS}');
             INSERT INTO items (id, collection_id, item_type_id, featured, public, added, modified)
                 VALUES (9, NULL, 4, 0, 1, '{TS}', '{TS}');
             INSERT INTO items (id, collection_id, item_type_id, featured, public, added, modified)
                 VALUES (12, 1, 6, 0, 1, '{TS}', '{TS}');

             INSERT INTO tags (id, name) VALUES (1, 'A'), (2, 'B');
             INSERT INTO taggings (id, tag_id, relation_id, entity_id, type, time)
                 VALUES (1, 1, 7, 1, 'Item', '{TS}'),
                        (2, 2, 7, 1, 'Item', '{TS}'),
                        (3, 1, 7, 1, 'Exhibit', '{TS}');

             INSERT INTO element_sets (id, name) VALUES (1, 'Dublin Core');
             INSERT INTO elements (id, element_set_id, name) VALUES (40, 1, 'Subject');
             INSERT INTO elements (id, element_set_id, name) VALUES (41, 1, 'Date');
             INSERT INTO element_texts (id, record_id, element_id, text, html)
                 VALUES (1, 9, 40, 'History', ''),
                        (2, 9, 40, 'Oral', ''),
                        (3, 9, 41, '', '<p>1990</p>');

             INSERT INTO files (id, item_id, original_filename, archive_filename, added, modified)
                 VALUES (1, 7, 'interview.mp3', 'abc123.mp3', '{TS}', '{TS}'),
                        (2, 7, 'transcript.pdf', 'def456.pdf', '{TS}', '{TS}');"
        ))
        .unwrap();
    }

    #[test]
    fn test_database_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_open_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archive.db");
        drop(Database::open(&path).unwrap());
        // Re-opening a populated store must not re-apply migrations.
        let db = Database::open(&path).unwrap();
        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_get_item_type_not_found() {
        let db = Database::open_in_memory().unwrap();
        let err = db.get_item_type(ItemTypeId::new(99)).unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "item type", .. }));
    }

    #[test]
    fn test_items_of_type_ordered_by_id() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        let items = db.items_of_type(ItemTypeId::new(4)).unwrap();
        let ids: Vec<i64> = items.iter().map(|i| i.id.as_i64()).collect();
        assert_eq!(ids, vec![7, 9]);
        assert_eq!(db.count_items_of_type(ItemTypeId::new(4)).unwrap(), 2);
        assert_eq!(db.count_items_of_type(ItemTypeId::new(6)).unwrap(), 1);
    }

    #[test]
    fn test_tags_of_filters_on_item_kind() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        // Tagging id 3 links tag 'A' to relation 7 with kind 'Exhibit'
        // and must not show up.
        assert_eq!(db.tags_of(ItemId::new(7)).unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn test_tags_of_keeps_duplicates() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        db.conn()
            .execute(
                "INSERT INTO taggings (id, tag_id, relation_id, entity_id, type, time)
                 VALUES (4, 1, 7, 2, 'Item', ?1)",
                [TS],
            )
            .unwrap();
        assert_eq!(db.tags_of(ItemId::new(7)).unwrap(), vec!["A", "B", "A"]);
    }

    #[test]
    fn test_tags_of_untagged_item_is_empty() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        assert!(db.tags_of(ItemId::new(9)).unwrap().is_empty());
    }

    #[test]
    fn test_elements_of_groups_multi_values_in_order() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        let elements = db.elements_of(ItemId::new(9)).unwrap();
        assert_eq!(elements["Subject"], vec!["History", "Oral"]);
    }

    #[test]
    fn test_elements_of_falls_back_to_html() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        let elements = db.elements_of(ItemId::new(9)).unwrap();
        assert_eq!(elements["Date"], vec!["<p>1990</p>"]);
    }

    #[test]
    fn test_elements_of_without_rows_is_empty_map() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        assert!(db.elements_of(ItemId::new(7)).unwrap().is_empty());
    }

    #[test]
    fn test_files_of_in_attachment_order() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        let files = db.files_of(ItemId::new(7)).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.original_filename.as_str()).collect();
        assert_eq!(names, vec!["interview.mp3", "transcript.pdf"]);
        assert!(db.files_of(ItemId::new(9)).unwrap().is_empty());
    }

    #[test]
    fn test_collection_traversal() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        let item = db.get_item(ItemId::new(7)).unwrap();
        let collection = db.collection_of(&item).unwrap().unwrap();
        assert_eq!(collection.name, "Community Memory");

        let orphan = db.get_item(ItemId::new(9)).unwrap();
        assert!(db.collection_of(&orphan).unwrap().is_none());

        let item_type = db.item_type_of(&item).unwrap().unwrap();
        assert_eq!(item_type.name, "Oral History");
    }

    #[test]
    fn test_notes_and_locations_default_empty() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        assert!(db.notes_of(ItemId::new(7)).unwrap().is_empty());
        assert!(db.locations_of(ItemId::new(7)).unwrap().is_empty());
    }

    #[test]
    fn test_datetime_parsing_accepts_both_forms() {
        assert!(parse_datetime(0, "2014-03-02 10:15:00").is_ok());
        assert!(parse_datetime(0, "2014-03-02T10:15:00Z").is_ok());
        assert!(parse_datetime(0, "last tuesday").is_err());
    }

    #[test]
    fn test_element_ids_match_seed() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        let id: i64 = db
            .conn()
            .query_row("SELECT id FROM elements WHERE name = 'Subject'", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(ElementId::new(id), ElementId::new(40));
    }
}
