use std::collections::BTreeMap;

use crate::models::{Forecast, Settings};
use crate::services::forecast::Forecaster;

pub fn predict(settings: &Settings, model: Option<&str>) -> Result<Forecast, String> {
    let conn = super::open_store(settings)?;

    Forecaster::from_settings(&settings.forecast)
        .predict(&conn, model)
        .map_err(|e| e.to_string())
}

pub fn predict_all(settings: &Settings) -> Result<BTreeMap<String, f64>, String> {
    let conn = super::open_store(settings)?;

    Forecaster::from_settings(&settings.forecast)
        .predict_all(&conn)
        .map_err(|e| e.to_string())
}
