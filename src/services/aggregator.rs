use std::collections::BTreeMap;

use chrono::Datelike;
use rusqlite::Connection;

use crate::database::queries::{self, ExpenseFilter};
use crate::error::ForecastError;
use crate::models::{Expense, MonthlyPoint};

/// Sum expenses per calendar month, oldest first, indexed from 0.
///
/// Only months that have at least one expense appear.
pub fn monthly_aggregate(expenses: &[Expense]) -> Result<Vec<MonthlyPoint>, ForecastError> {
    if expenses.is_empty() {
        return Err(ForecastError::NoData);
    }

    let mut totals: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for expense in expenses {
        *totals
            .entry((expense.date.year(), expense.date.month()))
            .or_insert(0.0) += expense.amount;
    }

    Ok(totals
        .into_iter()
        .enumerate()
        .map(|(month_index, ((year, month), amount))| MonthlyPoint {
            month_index,
            year,
            month,
            amount,
        })
        .collect())
}

/// Rebuild the monthly aggregate from every expense in the store.
pub fn load_monthly_aggregate(conn: &Connection) -> Result<Vec<MonthlyPoint>, ForecastError> {
    let expenses: Vec<Expense> = queries::query_expenses(conn, &ExpenseFilter::default())?
        .into_iter()
        .map(|stored| stored.expense)
        .collect();

    monthly_aggregate(&expenses)
}
