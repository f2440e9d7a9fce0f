//! Transactional loading of normalized records into the store.
//!
//! `upsert_tasks` and `insert_expenses` each run one batch in their own
//! transaction. The `apply_*` functions do the same work on a caller's
//! transaction so several batches can commit together.

use rusqlite::Connection;

use crate::database::queries;
use crate::error::LoadError;
use crate::models::{Expense, Task, UpsertCounts};

/// Insert-or-update tasks keyed by `external_id`.
///
/// Stored ids are read once for the whole batch. An id that repeats within
/// the batch is inserted on first sight and updated afterwards, so the store
/// never holds two rows for one id.
pub fn upsert_tasks(conn: &mut Connection, tasks: &[Task]) -> Result<UpsertCounts, LoadError> {
    if tasks.is_empty() {
        log::warn!("[ETL] No tasks to load.");
        return Ok(UpsertCounts::default());
    }

    let tx = conn.transaction().map_err(LoadError::persistence("task"))?;
    // an early return drops `tx`, which rolls it back
    let counts = apply_tasks(&tx, tasks)?;
    tx.commit().map_err(LoadError::persistence("task"))?;

    log::info!(
        "[ETL] Tasks loaded. Inserted: {}, updated: {}",
        counts.inserted,
        counts.updated
    );
    Ok(counts)
}

/// Task upsert on an open transaction. Nothing is committed here.
pub fn apply_tasks(conn: &Connection, tasks: &[Task]) -> Result<UpsertCounts, LoadError> {
    if tasks.is_empty() {
        return Ok(UpsertCounts::default());
    }

    apply_task_batch(conn, tasks).map_err(|e| {
        log::error!("[ETL] Task batch failed, rolling back: {}", e);
        LoadError::Persistence { kind: "task", source: e }
    })
}

fn apply_task_batch(conn: &Connection, tasks: &[Task]) -> rusqlite::Result<UpsertCounts> {
    let mut existing = queries::task_ids_by_external_id(conn)?;
    let mut counts = UpsertCounts::default();

    for task in tasks {
        match existing.get(&task.external_id) {
            Some(&id) => {
                queries::update_task(conn, id, task)?;
                counts.updated += 1;
            }
            None => {
                let id = queries::insert_task(conn, task)?;
                existing.insert(task.external_id.clone(), id);
                counts.inserted += 1;
            }
        }
    }

    Ok(counts)
}

/// Append every expense. There is no deduplication: loading the same batch
/// twice stores it twice.
pub fn insert_expenses(conn: &mut Connection, expenses: &[Expense]) -> Result<usize, LoadError> {
    if expenses.is_empty() {
        log::warn!("[ETL] No expenses to load.");
        return Ok(0);
    }

    let tx = conn.transaction().map_err(LoadError::persistence("expense"))?;
    let inserted = apply_expenses(&tx, expenses)?;
    tx.commit().map_err(LoadError::persistence("expense"))?;

    log::info!("[ETL] Expenses loaded. Inserted: {}", inserted);
    Ok(inserted)
}

/// Expense append on an open transaction. Nothing is committed here.
pub fn apply_expenses(conn: &Connection, expenses: &[Expense]) -> Result<usize, LoadError> {
    for expense in expenses {
        queries::insert_expense(conn, expense).map_err(|e| {
            log::error!("[ETL] Expense batch failed, rolling back: {}", e);
            LoadError::Persistence { kind: "expense", source: e }
        })?;
    }

    Ok(expenses.len())
}
