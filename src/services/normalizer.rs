//! Turns loosely typed rows into `Task` and `Expense` records.
//!
//! Bad values in non-identity columns fall back to `None` or `0` and are
//! counted; rows without an identity (task id, expense date) are dropped.

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{
    is_recommended_expense_category, is_recommended_task_category, normalize_category, Expense,
    Normalized, RawRow, Task,
};

/// Accepted timestamp layouts, tried in order. The boolean marks date-only
/// layouts, which resolve to midnight.
const TIMESTAMP_FORMATS: &[(&str, bool)] = &[
    ("%Y-%m-%d %H:%M:%S", false),
    ("%Y-%m-%d", true),
    ("%d/%m/%Y %H:%M", false),
    ("%d/%m/%Y", true),
];

/// Parse a timestamp in any accepted layout; the first layout that matches
/// wins. Anything else, including an empty string, is `None`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    TIMESTAMP_FORMATS.iter().find_map(|(fmt, date_only)| {
        if *date_only {
            NaiveDate::parse_from_str(value, fmt)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        } else {
            NaiveDateTime::parse_from_str(value, fmt).ok()
        }
    })
}

/// Parse a number permissively. `,` is accepted as a decimal separator;
/// anything unparseable or non-finite yields `None`.
pub fn try_parse_number(raw: &str) -> Option<f64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    value
        .parse::<f64>()
        .ok()
        .or_else(|| value.replace(',', ".").parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// `try_parse_number` with `0` as the fallback. Never fails.
pub fn parse_number(raw: &str) -> f64 {
    try_parse_number(raw).unwrap_or(0.0)
}

fn field<'a>(row: &'a RawRow, key: &str) -> &'a str {
    row.get(key).map(|v| v.trim()).unwrap_or("")
}

pub fn normalize_tasks(rows: &[RawRow]) -> Normalized<Task> {
    let mut out = Normalized::default();

    for row in rows {
        let external_id = match field(row, "external_id") {
            "" => field(row, "id"),
            id => id,
        };
        if external_id.is_empty() {
            log::debug!("[ETL] Rejected task row without external id: {:?}", row);
            out.rejected += 1;
            continue;
        }

        let title = field(row, "title");
        if title.is_empty() {
            log::debug!("[ETL] Rejected task '{}' without title", external_id);
            out.rejected += 1;
            continue;
        }

        let category = normalize_category(field(row, "category"));
        if !is_recommended_task_category(&category) {
            log::debug!("[ETL] Task '{}' uses off-list category '{}'", external_id, category);
        }

        let raw_completed = field(row, "completed_at");
        let completed_at = parse_timestamp(raw_completed);
        if completed_at.is_none() && !raw_completed.is_empty() {
            log::debug!("[ETL] Task '{}': unparseable completed_at '{}'", external_id, raw_completed);
            out.coerced += 1;
        }

        let raw_duration = field(row, "duration_minutes");
        let duration_minutes = match try_parse_number(raw_duration) {
            Some(minutes) => minutes.max(0.0),
            None => {
                if !raw_duration.is_empty() {
                    log::debug!("[ETL] Task '{}': unparseable duration '{}'", external_id, raw_duration);
                    out.coerced += 1;
                }
                0.0
            }
        };

        out.records.push(Task {
            external_id: external_id.to_string(),
            title: title.to_string(),
            category,
            completed_at,
            duration_minutes,
        });
    }

    out
}

pub fn normalize_expenses(rows: &[RawRow]) -> Normalized<Expense> {
    let mut out = Normalized::default();

    for row in rows {
        let raw_date = field(row, "date");
        let Some(date) = parse_timestamp(raw_date) else {
            log::debug!("[ETL] Rejected expense row with date '{}'", raw_date);
            out.rejected += 1;
            continue;
        };

        let category = normalize_category(field(row, "category"));
        if !is_recommended_expense_category(&category) {
            log::debug!("[ETL] Expense on {} uses off-list category '{}'", date, category);
        }

        let raw_amount = field(row, "amount");
        let amount = try_parse_number(raw_amount).unwrap_or_else(|| {
            log::debug!("[ETL] Expense on {}: unparseable amount '{}'", date, raw_amount);
            out.coerced += 1;
            0.0
        });

        out.records.push(Expense {
            date,
            category,
            description: field(row, "description").to_string(),
            amount,
        });
    }

    out
}
