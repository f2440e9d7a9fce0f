use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime};
use rusqlite::Connection;

use crate::error::AnalyticsError;
use crate::models::{FinanceSummary, ProductivitySummary};
use crate::utils::to_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Last7Days,
    Last30Days,
    All,
}

impl FromStr for Period {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(Period::Today),
            "7d" => Ok(Period::Last7Days),
            "30d" => Ok(Period::Last30Days),
            "all" => Ok(Period::All),
            _ => Err(AnalyticsError::InvalidPeriod(s.to_string())),
        }
    }
}

impl Period {
    /// Earliest timestamp included in the period, `None` for everything.
    pub fn start(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Period::Today => now.date().and_hms_opt(0, 0, 0),
            Period::Last7Days => Some(now - Duration::days(7)),
            Period::Last30Days => Some(now - Duration::days(30)),
            Period::All => None,
        }
    }
}

/// Task count, total minutes and minutes per category for tasks completed in
/// the period. Tasks with no completion time only count toward `All`.
pub fn productivity_summary(
    conn: &Connection,
    period: Period,
    now: NaiveDateTime,
) -> Result<ProductivitySummary, AnalyticsError> {
    let since = period.start(now).map(to_timestamp);

    let (tasks, minutes): (i64, f64) = conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(duration_minutes), 0)
         FROM tasks
         WHERE (?1 IS NULL OR completed_at >= ?1)",
        [since],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let mut stmt = conn.prepare(
        "SELECT category, COALESCE(SUM(duration_minutes), 0)
         FROM tasks
         WHERE (?1 IS NULL OR completed_at >= ?1)
         GROUP BY category",
    )?;
    let by_category = stmt
        .query_map([since], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))?
        .collect::<rusqlite::Result<BTreeMap<_, _>>>()?;

    Ok(ProductivitySummary {
        tasks,
        minutes,
        by_category,
    })
}

/// Total spent and spending per category for expenses dated in the period.
pub fn finance_summary(
    conn: &Connection,
    period: Period,
    now: NaiveDateTime,
) -> Result<FinanceSummary, AnalyticsError> {
    let since = period.start(now).map(to_timestamp);

    let total: f64 = conn.query_row(
        "SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE (?1 IS NULL OR date >= ?1)",
        [since],
        |row| row.get(0),
    )?;

    let mut stmt = conn.prepare(
        "SELECT category, COALESCE(SUM(amount), 0)
         FROM expenses
         WHERE (?1 IS NULL OR date >= ?1)
         GROUP BY category",
    )?;
    let by_category = stmt
        .query_map([since], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))?
        .collect::<rusqlite::Result<BTreeMap<_, _>>>()?;

    Ok(FinanceSummary { total, by_category })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::open_in_memory;
    use crate::models::{Expense, Task};
    use crate::services::loader::{insert_expenses, upsert_tasks};
    use chrono::NaiveDate;

    fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn task(id: &str, category: &str, completed_at: Option<NaiveDateTime>, minutes: f64) -> Task {
        Task {
            external_id: id.to_string(),
            title: id.to_string(),
            category: category.to_string(),
            completed_at,
            duration_minutes: minutes,
        }
    }

    fn expense(date: NaiveDateTime, category: &str, amount: f64) -> Expense {
        Expense {
            date,
            category: category.to_string(),
            description: String::new(),
            amount,
        }
    }

    #[test]
    fn periods_parse_from_text() {
        assert_eq!("today".parse::<Period>().unwrap(), Period::Today);
        assert_eq!(" 7D ".parse::<Period>().unwrap(), Period::Last7Days);
        assert_eq!("30d".parse::<Period>().unwrap(), Period::Last30Days);
        assert_eq!("all".parse::<Period>().unwrap(), Period::All);
        assert!(matches!("week".parse::<Period>(), Err(AnalyticsError::InvalidPeriod(_))));
    }

    #[test]
    fn period_start_is_relative_to_now() {
        let now = at(6, 15, 18);
        assert_eq!(Period::Today.start(now), Some(at(6, 15, 0)));
        assert_eq!(Period::Last7Days.start(now), Some(at(6, 8, 18)));
        assert_eq!(Period::Last30Days.start(now), Some(at(5, 16, 18)));
        assert_eq!(Period::All.start(now), None);
    }

    #[test]
    fn productivity_summary_filters_by_completion() {
        let mut conn = open_in_memory().unwrap();
        upsert_tasks(
            &mut conn,
            &[
                task("a", "study", Some(at(6, 15, 9)), 30.0),
                task("b", "study", Some(at(6, 10, 9)), 45.0),
                task("c", "health", Some(at(4, 1, 9)), 60.0),
                task("d", "family", None, 15.0),
            ],
        )
        .unwrap();
        let now = at(6, 15, 18);

        let today = productivity_summary(&conn, Period::Today, now).unwrap();
        assert_eq!(today.tasks, 1);
        assert_eq!(today.minutes, 30.0);

        let week = productivity_summary(&conn, Period::Last7Days, now).unwrap();
        assert_eq!(week.tasks, 2);
        assert_eq!(week.by_category.get("study"), Some(&75.0));
        assert_eq!(week.by_category.get("health"), None);

        let all = productivity_summary(&conn, Period::All, now).unwrap();
        assert_eq!(all.tasks, 4);
        assert_eq!(all.minutes, 150.0);
        assert_eq!(all.by_category.len(), 3);
    }

    #[test]
    fn finance_summary_groups_by_category() {
        let mut conn = open_in_memory().unwrap();
        insert_expenses(
            &mut conn,
            &[
                expense(at(6, 14, 12), "food", 20.0),
                expense(at(6, 1, 12), "food", 5.0),
                expense(at(6, 12, 12), "transport", 7.5),
                expense(at(1, 3, 12), "leisure", 100.0),
            ],
        )
        .unwrap();
        let now = at(6, 15, 18);

        let week = finance_summary(&conn, Period::Last7Days, now).unwrap();
        assert_eq!(week.total, 27.5);
        assert_eq!(week.by_category.get("food"), Some(&20.0));
        assert_eq!(week.by_category.get("transport"), Some(&7.5));

        let all = finance_summary(&conn, Period::All, now).unwrap();
        assert_eq!(all.total, 132.5);
        assert_eq!(all.by_category.get("food"), Some(&25.0));
    }

    #[test]
    fn empty_store_summarises_to_zero() {
        let conn = open_in_memory().unwrap();
        let now = at(6, 15, 18);
        assert_eq!(productivity_summary(&conn, Period::All, now).unwrap(), ProductivitySummary::default());
        assert_eq!(finance_summary(&conn, Period::All, now).unwrap(), FinanceSummary::default());
    }
}
