use crate::models::{EtlReport, Settings};

pub fn run_etl(settings: &Settings) -> Result<EtlReport, String> {
    let mut conn = super::open_store(settings)?;

    crate::services::etl::run_etl(&mut conn, &settings.ingest).map_err(|e| e.to_string())
}
