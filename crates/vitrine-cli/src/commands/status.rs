use anyhow::Result;

use vitrine_core::schema::Database;
use vitrine_export::Config;

pub fn show_status(config: &Config) -> Result<()> {
    let db = Database::open(&config.database_path)?;

    let item_types = db.list_item_types()?;

    println!("\n📊 Vitrine Status\n");
    println!("  Database: {}", config.database_path.display());

    if item_types.is_empty() {
        println!("  No item types found");
        return Ok(());
    }

    println!("  Item types:");
    for item_type in &item_types {
        let count = db.count_items_of_type(item_type.id)?;
        println!(
            "    {:>4}  {} ({} items)",
            item_type.id.as_i64(),
            item_type.name,
            count
        );
    }

    Ok(())
}
