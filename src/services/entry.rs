use rusqlite::Connection;
use uuid::Uuid;

use crate::error::LoadError;
use crate::models::{normalize_category, Expense, NewTask, Task};
use crate::services::loader::{insert_expenses, upsert_tasks};

/// Store a manually entered task under a freshly generated external id and
/// return that id.
pub fn add_task(conn: &mut Connection, new_task: NewTask) -> Result<String, LoadError> {
    let task = Task {
        external_id: format!("manual-{}", Uuid::new_v4()),
        title: new_task.title.trim().to_string(),
        category: normalize_category(&new_task.category),
        completed_at: new_task.completed_at,
        duration_minutes: new_task.duration_minutes.max(0.0),
    };

    upsert_tasks(conn, std::slice::from_ref(&task))?;
    Ok(task.external_id)
}

pub fn add_expense(conn: &mut Connection, expense: Expense) -> Result<(), LoadError> {
    let expense = Expense {
        category: normalize_category(&expense.category),
        description: expense.description.trim().to_string(),
        ..expense
    };

    insert_expenses(conn, std::slice::from_ref(&expense))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::open_in_memory;
    use crate::database::queries::{find_task_by_external_id, query_expenses, ExpenseFilter};
    use chrono::NaiveDate;

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            category: " Personal ".to_string(),
            completed_at: None,
            duration_minutes: 30.0,
        }
    }

    #[test]
    fn manual_tasks_get_distinct_generated_ids() {
        let mut conn = open_in_memory().unwrap();
        let first = add_task(&mut conn, new_task("Call mom")).unwrap();
        let second = add_task(&mut conn, new_task("Call mom")).unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("manual-"));

        let stored = find_task_by_external_id(&conn, &first).unwrap().unwrap();
        assert_eq!(stored.task.category, "personal");
        assert_eq!(stored.task.title, "Call mom");
    }

    #[test]
    fn manual_expense_is_normalized() {
        let mut conn = open_in_memory().unwrap();
        add_expense(
            &mut conn,
            Expense {
                date: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap().and_hms_opt(0, 0, 0).unwrap(),
                category: "Transport ".to_string(),
                description: " bus ".to_string(),
                amount: 4.2,
            },
        )
        .unwrap();

        let rows = query_expenses(&conn, &ExpenseFilter::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].expense.category, "transport");
        assert_eq!(rows[0].expense.description, "bus");
    }
}
