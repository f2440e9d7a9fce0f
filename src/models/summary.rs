use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductivitySummary {
    pub tasks: i64,
    pub minutes: f64,
    pub by_category: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub total: f64,
    pub by_category: BTreeMap<String, f64>,
}

/// Counts produced by one ETL pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtlReport {
    pub tasks_inserted: usize,
    pub tasks_updated: usize,
    pub tasks_rejected: usize,
    pub expenses_inserted: usize,
    pub expenses_rejected: usize,
    pub fields_coerced: usize,
}
