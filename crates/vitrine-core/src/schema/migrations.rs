/// A schema migration.
#[derive(Debug)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

const MIGRATION_001: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Collections
CREATE TABLE IF NOT EXISTS collections (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    collectors TEXT NOT NULL DEFAULT '',
    public INTEGER NOT NULL DEFAULT 0,
    featured INTEGER NOT NULL DEFAULT 0,
    owner_id INTEGER NOT NULL DEFAULT 0,
    added TEXT NOT NULL,
    modified TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_collections_public ON collections(public);
CREATE INDEX IF NOT EXISTS idx_collections_featured ON collections(featured);

-- Item types ("Oral History", "Still Image", ...)
CREATE TABLE IF NOT EXISTS item_types (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    description TEXT
);

-- Items: the catalogued records themselves
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY,
    collection_id INTEGER REFERENCES collections(id),
    item_type_id INTEGER REFERENCES item_types(id),
    featured INTEGER NOT NULL DEFAULT 0,
    public INTEGER NOT NULL DEFAULT 0,
    added TEXT NOT NULL,
    modified TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_items_collection_id ON items(collection_id);
CREATE INDEX IF NOT EXISTS idx_items_item_type_id ON items(item_type_id);
CREATE INDEX IF NOT EXISTS idx_items_public ON items(public);

-- Tags and the polymorphic tagging join table
CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY,
    name TEXT UNIQUE
);

CREATE TABLE IF NOT EXISTS taggings (
    id INTEGER PRIMARY KEY,
    tag_id INTEGER NOT NULL REFERENCES tags(id),
    relation_id INTEGER NOT NULL,
    entity_id INTEGER NOT NULL DEFAULT 0,
    type TEXT NOT NULL,
    time TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_taggings_unique
    ON taggings(relation_id, tag_id, entity_id, type);
CREATE INDEX IF NOT EXISTS idx_taggings_relation_type ON taggings(relation_id, type);

-- Metadata element definitions
CREATE TABLE IF NOT EXISTS element_sets (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    record_type_id INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS elements (
    id INTEGER PRIMARY KEY,
    element_set_id INTEGER NOT NULL REFERENCES element_sets(id),
    record_type_id INTEGER NOT NULL DEFAULT 0,
    data_type_id INTEGER NOT NULL DEFAULT 0,
    name TEXT NOT NULL,
    description TEXT,
    "order" INTEGER,
    UNIQUE (element_set_id, name)
);

CREATE INDEX IF NOT EXISTS idx_elements_element_set_id ON elements(element_set_id);

-- Metadata values: one row per (record, element, value)
CREATE TABLE IF NOT EXISTS element_texts (
    id INTEGER PRIMARY KEY,
    record_id INTEGER NOT NULL,
    record_type_id INTEGER NOT NULL DEFAULT 0,
    element_id INTEGER NOT NULL REFERENCES elements(id),
    text TEXT NOT NULL DEFAULT '',
    html TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_element_texts_record_id ON element_texts(record_id);
CREATE INDEX IF NOT EXISTS idx_element_texts_element_id ON element_texts(element_id);

-- Files attached to items
CREATE TABLE IF NOT EXISTS files (
    id INTEGER PRIMARY KEY,
    item_id INTEGER NOT NULL REFERENCES items(id),
    original_filename TEXT NOT NULL,
    archive_filename TEXT NOT NULL,
    size INTEGER NOT NULL DEFAULT 0,
    mime_browser TEXT,
    has_derivative_image INTEGER NOT NULL DEFAULT 0,
    added TEXT NOT NULL,
    modified TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_files_item_id ON files(item_id);

-- Geographic locations attached to items
CREATE TABLE IF NOT EXISTS locations (
    id INTEGER PRIMARY KEY,
    item_id INTEGER NOT NULL REFERENCES items(id),
    address TEXT NOT NULL DEFAULT '',
    latitude REAL NOT NULL,
    longitude REAL NOT NULL,
    zoom_level INTEGER NOT NULL DEFAULT 0,
    map_type TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_locations_item_id ON locations(item_id);

-- Curatorial notes attached to items
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY,
    item_id INTEGER NOT NULL REFERENCES items(id),
    user_id INTEGER NOT NULL DEFAULT 0,
    note TEXT NOT NULL DEFAULT '',
    date_modified TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_notes_item_id ON notes(item_id);
"#;

pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: MIGRATION_001,
}];
