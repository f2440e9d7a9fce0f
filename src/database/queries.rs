use std::collections::HashMap;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::{Expense, StoredExpense, StoredTask, Task};
use crate::utils::{from_timestamp, to_timestamp};

/// Optional restrictions for `query_tasks`. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub completed_since: Option<NaiveDateTime>,
    pub category: Option<String>,
}

/// Optional restrictions for `query_expenses`. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub since: Option<NaiveDateTime>,
    pub category: Option<String>,
}

fn task_from_row(row: &Row) -> rusqlite::Result<StoredTask> {
    Ok(StoredTask {
        id: row.get(0)?,
        task: Task {
            external_id: row.get(1)?,
            title: row.get(2)?,
            category: row.get(3)?,
            completed_at: row.get::<_, Option<i64>>(4)?.and_then(from_timestamp),
            duration_minutes: row.get::<_, Option<f64>>(5)?.unwrap_or(0.0),
        },
    })
}

fn expense_from_row(row: &Row) -> rusqlite::Result<StoredExpense> {
    let ts: i64 = row.get(1)?;
    let date = from_timestamp(ts).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Integer,
            format!("timestamp {} out of range", ts).into(),
        )
    })?;

    Ok(StoredExpense {
        id: row.get(0)?,
        expense: Expense {
            date,
            category: row.get(2)?,
            description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            amount: row.get(4)?,
        },
    })
}

pub fn find_task_by_external_id(
    conn: &Connection,
    external_id: &str,
) -> rusqlite::Result<Option<StoredTask>> {
    conn.query_row(
        "SELECT id, external_id, title, category, completed_at, duration_minutes
         FROM tasks
         WHERE external_id = ?1",
        [external_id],
        task_from_row,
    )
    .optional()
}

/// Every stored external id mapped to its row id, in a single query.
pub fn task_ids_by_external_id(conn: &Connection) -> rusqlite::Result<HashMap<String, i64>> {
    let mut stmt = conn.prepare("SELECT external_id, id FROM tasks")?;
    let ids = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
        .collect::<rusqlite::Result<HashMap<_, _>>>()?;
    Ok(ids)
}

pub fn insert_task(conn: &Connection, task: &Task) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO tasks (external_id, title, category, completed_at, duration_minutes)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            &task.external_id,
            &task.title,
            &task.category,
            task.completed_at.map(to_timestamp),
            task.duration_minutes,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Overwrite the mutable fields of the task stored under `id`.
pub fn update_task(conn: &Connection, id: i64, task: &Task) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE tasks
         SET title = ?1, category = ?2, completed_at = ?3, duration_minutes = ?4
         WHERE id = ?5",
        params![
            &task.title,
            &task.category,
            task.completed_at.map(to_timestamp),
            task.duration_minutes,
            id,
        ],
    )?;

    Ok(())
}

pub fn query_tasks(conn: &Connection, filter: &TaskFilter) -> rusqlite::Result<Vec<StoredTask>> {
    let mut stmt = conn.prepare(
        "SELECT id, external_id, title, category, completed_at, duration_minutes
         FROM tasks
         WHERE (?1 IS NULL OR completed_at >= ?1)
         AND (?2 IS NULL OR category = ?2)
         ORDER BY id",
    )?;

    let tasks = stmt
        .query_map(
            params![filter.completed_since.map(to_timestamp), &filter.category],
            task_from_row,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(tasks)
}

pub fn insert_expense(conn: &Connection, expense: &Expense) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO expenses (date, category, description, amount)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            to_timestamp(expense.date),
            &expense.category,
            &expense.description,
            expense.amount,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn query_expenses(
    conn: &Connection,
    filter: &ExpenseFilter,
) -> rusqlite::Result<Vec<StoredExpense>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, category, description, amount
         FROM expenses
         WHERE (?1 IS NULL OR date >= ?1)
         AND (?2 IS NULL OR category = ?2)
         ORDER BY date, id",
    )?;

    let expenses = stmt
        .query_map(
            params![filter.since.map(to_timestamp), &filter.category],
            expense_from_row,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(expenses)
}
