//! Entry points for the binary. Each command opens the store named in the
//! settings, runs one service call and reports errors as plain strings.

use rusqlite::Connection;

use crate::models::Settings;

pub mod entry;
pub mod etl;
pub mod forecast;
pub mod summary;

fn open_store(settings: &Settings) -> Result<Connection, String> {
    crate::database::init_database(&settings.storage.database_path).map_err(|e| e.to_string())
}
