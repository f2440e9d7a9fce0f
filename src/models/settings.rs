use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub version: String,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub ingest: IngestSettings,
    #[serde(default)]
    pub forecast: ForecastSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            storage: StorageSettings::default(),
            ingest: IngestSettings::default(),
            forecast: ForecastSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    pub database_path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("personal_analytics.db"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestSettings {
    pub data_dir: PathBuf,
    pub tasks_file: String,
    pub expenses_file: String,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            tasks_file: "tasks.csv".to_string(),
            expenses_file: "finance.csv".to_string(),
        }
    }
}

impl IngestSettings {
    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(&self.tasks_file)
    }

    pub fn expenses_path(&self) -> PathBuf {
        self.data_dir.join(&self.expenses_file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSettings {
    #[serde(default = "default_moving_average_window")]
    pub moving_average_window: usize,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            moving_average_window: default_moving_average_window(),
        }
    }
}

fn default_moving_average_window() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let settings: Settings = serde_json::from_str(
            r#"{ "version": "1.0.0", "forecast": {} , "ingest": { "data_dir": "/srv/in", "tasks_file": "t.csv", "expenses_file": "e.csv" } }"#,
        )
        .unwrap();

        assert_eq!(settings.forecast.moving_average_window, 3);
        assert_eq!(settings.storage.database_path, PathBuf::from("personal_analytics.db"));
        assert_eq!(settings.ingest.tasks_path(), PathBuf::from("/srv/in/t.csv"));
        assert_eq!(settings.ingest.expenses_path(), PathBuf::from("/srv/in/e.csv"));
    }
}
