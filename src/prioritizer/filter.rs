//! Active-task filter
//!
//! Computes the subset of tasks eligible for prioritization: completed tasks
//! and tasks whose deadline has already passed are excluded. The result is
//! computed fresh per request and never persisted.

use super::models::{Task, TaskStatus};
use chrono::{DateTime, Utc};

/// Filter a task list down to the active set.
///
/// A task is active unless its status is `Done` or its deadline is strictly
/// before `now`. Order is preserved. Idempotent: filtering an already
/// filtered list is a no-op.
pub fn active_tasks(tasks: &[Task], now: DateTime<Utc>) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.status != TaskStatus::Done)
        .filter(|task| task.deadline.map_or(true, |deadline| deadline >= now))
        .cloned()
        .collect()
}
