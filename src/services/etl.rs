//! Batch pass over the task and expense CSV files.

use rusqlite::Connection;

use crate::error::{EtlError, LoadError};
use crate::models::{EtlReport, IngestSettings};
use crate::services::csv_source::read_rows;
use crate::services::loader::{apply_expenses, apply_tasks};
use crate::services::normalizer::{normalize_expenses, normalize_tasks};

/// Read, normalize and load both files.
///
/// Both kinds load inside one transaction: a failure anywhere leaves the
/// store as it was before the run.
pub fn run_etl(conn: &mut Connection, ingest: &IngestSettings) -> Result<EtlReport, EtlError> {
    log::info!("[ETL] Starting ETL from {}", ingest.data_dir.display());

    let task_rows = read_rows(&ingest.tasks_path())?;
    let expense_rows = read_rows(&ingest.expenses_path())?;

    let tasks = normalize_tasks(&task_rows);
    let expenses = normalize_expenses(&expense_rows);

    if tasks.rejected > 0 || expenses.rejected > 0 {
        log::warn!(
            "[ETL] Rejected rows - tasks: {}, expenses: {}",
            tasks.rejected,
            expenses.rejected
        );
    }

    if tasks.records.is_empty() {
        log::warn!("[ETL] No tasks to load.");
    }
    if expenses.records.is_empty() {
        log::warn!("[ETL] No expenses to load.");
    }

    let fail = LoadError::persistence("etl");
    let tx = conn.transaction().map_err(&fail)?;
    let task_counts = apply_tasks(&tx, &tasks.records)?;
    let expenses_inserted = apply_expenses(&tx, &expenses.records)?;
    tx.commit().map_err(&fail)?;

    let report = EtlReport {
        tasks_inserted: task_counts.inserted,
        tasks_updated: task_counts.updated,
        tasks_rejected: tasks.rejected,
        expenses_inserted,
        expenses_rejected: expenses.rejected,
        fields_coerced: tasks.coerced + expenses.coerced,
    };

    log::info!("[ETL] Finished: {:?}", report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::open_in_memory;
    use crate::database::queries::{find_task_by_external_id, query_expenses, query_tasks, ExpenseFilter, TaskFilter};
    use tempfile::tempdir;

    const TASKS_CSV: &str = "\
external_id,title,category,completed_at,duration_minutes
t-1,Read book,Study,2025-01-10 20:00:00,45
t-2,Gym,HEALTH,11/01/2025 07:30,60
,No id,personal,2025-01-12,10
t-3,Taxes,finance,someday,lots
";

    const FINANCE_CSV: &str = "\
date,category,description,amount
2025-01-03,Food,Lunch,25.50
05/01/2025,transport,Bus,4
not-a-date,food,Dinner,30
2025-02-01,groceries,Market,abc
";

    fn settings_for(dir: &std::path::Path) -> IngestSettings {
        IngestSettings {
            data_dir: dir.to_path_buf(),
            ..IngestSettings::default()
        }
    }

    #[test]
    fn etl_loads_and_counts() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("tasks.csv"), TASKS_CSV).unwrap();
        std::fs::write(dir.path().join("finance.csv"), FINANCE_CSV).unwrap();
        let mut conn = open_in_memory().unwrap();

        let report = run_etl(&mut conn, &settings_for(dir.path())).unwrap();
        assert_eq!(
            report,
            EtlReport {
                tasks_inserted: 3,
                tasks_updated: 0,
                tasks_rejected: 1,
                expenses_inserted: 3,
                expenses_rejected: 1,
                fields_coerced: 3,
            }
        );

        let gym = find_task_by_external_id(&conn, "t-2").unwrap().unwrap();
        assert_eq!(gym.task.category, "health");
        assert!(gym.task.completed_at.is_some());
    }

    #[test]
    fn rerun_updates_tasks_and_appends_expenses() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("tasks.csv"), TASKS_CSV).unwrap();
        std::fs::write(dir.path().join("finance.csv"), FINANCE_CSV).unwrap();
        let mut conn = open_in_memory().unwrap();
        let settings = settings_for(dir.path());

        run_etl(&mut conn, &settings).unwrap();
        let second = run_etl(&mut conn, &settings).unwrap();

        assert_eq!(second.tasks_inserted, 0);
        assert_eq!(second.tasks_updated, 3);
        assert_eq!(query_tasks(&conn, &TaskFilter::default()).unwrap().len(), 3);
        assert_eq!(query_expenses(&conn, &ExpenseFilter::default()).unwrap().len(), 6);
    }

    #[test]
    fn failed_expense_load_rolls_back_tasks() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("tasks.csv"), TASKS_CSV).unwrap();
        std::fs::write(
            dir.path().join("finance.csv"),
            "date,category,description,amount\n2025-01-03,food,Lunch,12\n2025-01-04,food,boom,8\n",
        )
        .unwrap();
        let mut conn = open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TRIGGER fail_expense BEFORE INSERT ON expenses
             WHEN NEW.description = 'boom'
             BEGIN SELECT RAISE(ABORT, 'rejected by test trigger'); END;",
        )
        .unwrap();

        let err = run_etl(&mut conn, &settings_for(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            EtlError::Load(LoadError::Persistence { kind: "expense", .. })
        ));
        assert!(query_tasks(&conn, &TaskFilter::default()).unwrap().is_empty());
        assert!(query_expenses(&conn, &ExpenseFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn missing_files_load_nothing() {
        let dir = tempdir().unwrap();
        let mut conn = open_in_memory().unwrap();
        let report = run_etl(&mut conn, &settings_for(dir.path())).unwrap();
        assert_eq!(report, EtlReport::default());
    }
}
