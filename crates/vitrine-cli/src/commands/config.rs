use anyhow::Result;

use vitrine_export::config;
use vitrine_export::Config;

/// Show the current effective configuration, optionally writing the
/// default config file first.
pub fn show_config(config: &Config, init: bool) -> Result<()> {
    if init {
        let created = config::ensure_config_file()?;
        if created {
            println!("Created {}", config::config_file_path().display());
        } else {
            println!(
                "Config file already exists: {}",
                config::config_file_path().display()
            );
        }
        println!();
    }

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!(
        "File exists: {}\n",
        if exists { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!("  database_path: {}", config.database_path.display());
    println!("  item_type_id: {}", config.item_type_id);
    println!("  output_path: {}", config.output_path.display());

    println!("\nPriority: CLI args > ENV vars (VITRINE_*) > Config file > Defaults");

    Ok(())
}
