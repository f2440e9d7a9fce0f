use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One spending event. Expenses form an append-only log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub date: NaiveDateTime,
    pub category: String,
    pub description: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredExpense {
    pub id: i64,
    #[serde(flatten)]
    pub expense: Expense,
}
