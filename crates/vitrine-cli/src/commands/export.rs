use anyhow::Result;
use std::path::PathBuf;

use vitrine_core::model::ItemTypeId;
use vitrine_core::schema::Database;
use vitrine_export::{export_to_path, Config, ExportOptions};

pub fn run_export(config: &Config, type_id: Option<i64>, output: Option<PathBuf>) -> Result<()> {
    let item_type_id = ItemTypeId::new(type_id.unwrap_or(config.item_type_id));
    let output = output.unwrap_or_else(|| config.output_path.clone());

    let db = Database::open(&config.database_path)?;
    let options = ExportOptions { item_type_id };

    let report = export_to_path(&db, options, &output)?;

    println!(
        "✓ Exported {} '{}' item(s) ({} columns) to {}",
        report.items_written,
        report.item_type_name,
        report.columns.len(),
        output.display()
    );
    Ok(())
}
