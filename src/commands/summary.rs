use serde::Serialize;

use crate::models::{FinanceSummary, ProductivitySummary, Settings};
use crate::services::analytics::{finance_summary, productivity_summary, Period};

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub period: String,
    pub productivity: ProductivitySummary,
    pub finance: FinanceSummary,
}

pub fn get_summary(settings: &Settings, period: &str) -> Result<Summary, String> {
    let parsed = period.parse::<Period>().map_err(|e| e.to_string())?;
    let conn = super::open_store(settings)?;
    let now = chrono::Local::now().naive_local();

    Ok(Summary {
        period: period.trim().to_lowercase(),
        productivity: productivity_summary(&conn, parsed, now).map_err(|e| e.to_string())?,
        finance: finance_summary(&conn, parsed, now).map_err(|e| e.to_string())?,
    })
}
