mod config;
pub mod database;
pub mod migrations;
mod seen;

pub use config::{Config, TrackingConfig};
pub use database::{Database, LogStore};
pub use seen::DbSeenStore;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `PILLARWISE_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/pillarwise[-dev]/`, with `PILLARWISE_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("PILLARWISE_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env =
                std::env::var("PILLARWISE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pillarwise-dev")
            } else {
                base_dir.join("pillarwise")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
