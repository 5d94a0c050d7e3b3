use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for vitrine.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (VITRINE_* prefix)
/// 3. Config file (~/.config/vitrine/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the archive database.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/db
    /// - ENV: VITRINE_DATABASE_PATH
    /// - Config: database_path = "/path/to/db"
    /// - Default: ~/.local/share/vitrine/vitrine.db
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,

    /// Numeric id of the item type selected for export when the command
    /// line gives none. The selector is configuration, not hardwired:
    /// deployments differ in which type id their flat-file reports cover.
    #[serde(default = "default_item_type_id")]
    pub item_type_id: i64,

    /// Default output path for export runs.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_db_path(),
            item_type_id: default_item_type_id(),
            output_path: default_output_path(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/vitrine/config.toml
    /// Reads environment variables with VITRINE_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("vitrine");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration with custom database path.
    ///
    /// This is used when the --db CLI flag is provided.
    pub fn load_with_db_path(db_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.database_path = db_path;
        Ok(config)
    }
}

/// Get the default database path.
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vitrine")
        .join("vitrine.db")
}

fn default_item_type_id() -> i64 {
    4
}

fn default_output_path() -> PathBuf {
    PathBuf::from("export.csv")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/vitrine/config.toml
/// - macOS: ~/Library/Application Support/vitrine/config.toml
/// - Windows: %APPDATA%\vitrine\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vitrine")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Vitrine Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (VITRINE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the archive database
#
# Can also be set via:
# - CLI: vitrine --db /custom/path.db export
# - Environment: VITRINE_DATABASE_PATH=/custom/path.db
#
# Default: Platform-specific data directory
#database_path = "/path/to/custom/vitrine.db"

# Numeric id of the item type exported when no --type-id is given
#
# Can also be set via:
# - CLI: vitrine export --type-id 4
# - Environment: VITRINE_ITEM_TYPE_ID=4
item_type_id = 4

# Default output path for export runs
#
# Can also be set via:
# - CLI: vitrine export --output report.csv
# - Environment: VITRINE_OUTPUT_PATH=report.csv
output_path = "export.csv"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.database_path.as_os_str().is_empty());
        assert_eq!(config.item_type_id, 4);
        assert_eq!(config.output_path, PathBuf::from("export.csv"));
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_custom_db_path() {
        let custom_path = PathBuf::from("/tmp/test.db");
        let config = Config::load_with_db_path(custom_path.clone());
        assert!(config.is_ok());
        assert_eq!(config.unwrap().database_path, custom_path);
    }
}
