use crate::models::{Expense, NewTask, Settings};
use crate::services::normalizer::{parse_timestamp, try_parse_number};

pub fn create_task(
    settings: &Settings,
    title: String,
    category: String,
    duration_minutes: &str,
    completed_at: Option<&str>,
) -> Result<String, String> {
    if title.trim().is_empty() {
        return Err("task title must not be empty".to_string());
    }
    let duration_minutes = try_parse_number(duration_minutes)
        .ok_or_else(|| format!("invalid duration '{}'", duration_minutes))?;
    let completed_at = match completed_at {
        Some(raw) => Some(parse_timestamp(raw).ok_or_else(|| format!("invalid timestamp '{}'", raw))?),
        None => Some(chrono::Local::now().naive_local()),
    };

    let mut conn = super::open_store(settings)?;
    crate::services::entry::add_task(
        &mut conn,
        NewTask {
            title,
            category,
            completed_at,
            duration_minutes,
        },
    )
    .map_err(|e| e.to_string())
}

pub fn create_expense(
    settings: &Settings,
    date: &str,
    category: String,
    amount: &str,
    description: Option<String>,
) -> Result<(), String> {
    let date = parse_timestamp(date).ok_or_else(|| format!("invalid date '{}'", date))?;
    let amount = try_parse_number(amount).ok_or_else(|| format!("invalid amount '{}'", amount))?;

    let mut conn = super::open_store(settings)?;
    crate::services::entry::add_expense(
        &mut conn,
        Expense {
            date,
            category,
            description: description.unwrap_or_default(),
            amount,
        },
    )
    .map_err(|e| e.to_string())
}
