mod characters;
mod config;
pub mod database;
pub mod migrations;
mod scores;

pub use characters::Character;
pub use config::{Config, GameConfig, HistoryConfig, LogConfig};
pub use database::{Database, UserRecord};
pub use scores::{HistoryEntry, LeaderboardEntry, ScoreStore};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `SHOWDLE_DATA_DIR` overrides the location. Otherwise this is
/// `~/.config/showdle[-dev]/`, with `SHOWDLE_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("SHOWDLE_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("SHOWDLE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("showdle-dev")
            } else {
                base_dir.join("showdle")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
