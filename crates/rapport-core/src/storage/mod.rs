mod config;
pub mod database;

pub use config::{Config, PeopleConfig, ReviewConfig};
pub use database::{Database, PersonUpdate};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `RAPPORT_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/rapport[-dev]/`, with the `-dev` suffix when `RAPPORT_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("RAPPORT_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("RAPPORT_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("rapport-dev")
            } else {
                base_dir.join("rapport")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
