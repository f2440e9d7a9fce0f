use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::Settings;

const ENV_DATABASE_PATH: &str = "DATABASE_PATH";
const ENV_DB_FILENAME: &str = "DB_FILENAME";
const ENV_DATA_DIR: &str = "DATA_DIR";
const ENV_MOVING_AVERAGE_WINDOW: &str = "MOVING_AVERAGE_WINDOW";

pub const SETTINGS_PATH: &str = "config/settings.json";

pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Read settings from `path` if it exists, otherwise start from defaults, then
/// apply environment overrides.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let mut settings = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        serde_json::from_str::<Settings>(&content)
            .with_context(|| format!("invalid settings in {}", path.display()))?
    } else {
        Settings::default()
    };
    apply_env_defaults(&mut settings);
    Ok(settings)
}

pub fn apply_env_defaults(settings: &mut Settings) {
    if let Some(path) = env_value(ENV_DATABASE_PATH) {
        settings.storage.database_path = PathBuf::from(path);
    } else if let Some(filename) = env_value(ENV_DB_FILENAME) {
        settings.storage.database_path = PathBuf::from(filename);
    }

    if let Some(dir) = env_value(ENV_DATA_DIR) {
        settings.ingest.data_dir = PathBuf::from(dir);
    }

    if let Some(window) = env_value(ENV_MOVING_AVERAGE_WINDOW) {
        match window.parse::<usize>() {
            Ok(w) => settings.forecast.moving_average_window = w,
            Err(_) => log::warn!("Ignoring invalid {}={}", ENV_MOVING_AVERAGE_WINDOW, window),
        }
    }
}
