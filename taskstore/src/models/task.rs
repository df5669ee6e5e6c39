//! Task entity and its write-side inputs

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use super::{TaskId, UserId};

/// A task row.
///
/// `closed` and `assigned_id` are stored as `0` or `NULL` when unset; both
/// decode to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Unix seconds, set by the database at insert
    pub opened: i64,
    /// Unix seconds, `None` while the task is open
    pub closed: Option<i64>,
    pub author_id: UserId,
    pub assigned_id: Option<UserId>,
    pub title: String,
    pub content: String,
}

impl Task {
    pub fn is_open(&self) -> bool {
        self.closed.is_none()
    }
}

impl<'r> FromRow<'r, PgRow> for Task {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            opened: row.try_get("opened")?,
            closed: unset_if_zero(row.try_get("closed")?),
            author_id: row
                .try_get::<Option<UserId>, _>("author_id")?
                .unwrap_or_default(),
            assigned_id: unset_if_zero(row.try_get("assigned_id")?),
            title: row.try_get::<Option<String>, _>("title")?.unwrap_or_default(),
            content: row
                .try_get::<Option<String>, _>("content")?
                .unwrap_or_default(),
        })
    }
}

/// Zero and NULL both mean "unset" in the tasks table.
fn unset_if_zero<T: Default + PartialEq>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}

/// Input for [`TaskStore::create_task`](crate::TaskStore::create_task).
///
/// Only title and content are written; every other column takes its
/// database default. In particular the author is not set here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub content: String,
}

impl NewTask {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Input for [`TaskStore::update_task`](crate::TaskStore::update_task).
///
/// These are the only mutable columns. `assigned_id: None` unassigns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskChanges {
    pub assigned_id: Option<UserId>,
    pub title: String,
    pub content: String,
}

impl TaskChanges {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            assigned_id: None,
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn assign(mut self, user: UserId) -> Self {
        self.assigned_id = Some(user);
        self
    }
}

impl From<&Task> for TaskChanges {
    fn from(task: &Task) -> Self {
        Self {
            assigned_id: task.assigned_id,
            title: task.title.clone(),
            content: task.content.clone(),
        }
    }
}
