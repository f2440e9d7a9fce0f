use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A completed task as held by the store. `external_id` is unique across
/// all stored tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub external_id: String,
    pub title: String,
    pub category: String,
    pub completed_at: Option<NaiveDateTime>,
    pub duration_minutes: f64,
}

/// A task row read back from the store, with its surrogate key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTask {
    pub id: i64,
    #[serde(flatten)]
    pub task: Task,
}

/// Input for a manually created task. The external id is generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub category: String,
    pub completed_at: Option<NaiveDateTime>,
    pub duration_minutes: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertCounts {
    pub inserted: usize,
    pub updated: usize,
}
