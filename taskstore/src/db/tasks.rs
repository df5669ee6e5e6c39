//! Task store
//!
//! Six operations over the `tasks` table:
//! - list with optional id/author filters
//! - create, update, delete
//! - lookups by author (through `users`) and by label name (through `tasks_labels`)

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use tracing::{debug, info, instrument};

use super::pool;
use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use crate::models::{NewTask, Task, TaskChanges, TaskFilter, TaskId, UserId};
use crate::MIGRATOR;

/// Handle to the task tables.
///
/// Cloning is cheap and shares the pool; pass clones to whoever needs one.
#[derive(Debug, Clone)]
pub struct TaskStore {
    pool: PgPool,
}

impl TaskStore {
    /// Connect using a URL or libpq key/value descriptor.
    pub async fn connect(descriptor: &str) -> Result<Self> {
        Ok(Self::from_pool(pool::create_pool(descriptor).await?))
    }

    /// Connect using typed settings.
    pub async fn connect_with(config: &ConnectionConfig) -> Result<Self> {
        Ok(Self::from_pool(pool::create_pool_from_config(config).await?))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the tables if they do not exist.
    pub async fn migrate(&self) -> Result<()> {
        info!("running task migrations");
        MIGRATOR.run(&self.pool).await?;
        info!("task migrations complete");
        Ok(())
    }

    /// Close every pooled connection and wait for them to be released.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// List tasks matching `filter`, ordered by id.
    ///
    /// An empty filter returns every task. No match is an empty vector.
    #[instrument(skip(self))]
    pub async fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let rows = sqlx::query(
            r#"
            SELECT
                id,
                opened,
                closed,
                author_id,
                assigned_id,
                title,
                content
            FROM tasks
            WHERE
                ($1::INTEGER IS NULL OR id = $1) AND
                ($2::INTEGER IS NULL OR author_id = $2)
            ORDER BY id
            "#,
        )
        .bind(filter.task_id)
        .bind(filter.author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Query)?;

        decode(rows)
    }

    /// Insert a task and return its generated id.
    ///
    /// Only title and content are written. `author_id` is left at the column
    /// default; callers that need an author must set it by other means.
    #[instrument(skip_all)]
    pub async fn create_task(&self, task: &NewTask) -> Result<TaskId> {
        let id: TaskId = sqlx::query_scalar(
            r#"
            INSERT INTO tasks (title, content)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&task.title)
        .bind(&task.content)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Query)?;

        debug!(id, "created task");
        Ok(id)
    }

    /// Tasks written by `author_id`.
    ///
    /// Joined through `users`: tasks whose author has no user row are not
    /// returned.
    #[instrument(skip(self))]
    pub async fn tasks_by_author(&self, author_id: UserId) -> Result<Vec<Task>> {
        let rows = sqlx::query(
            r#"
            SELECT
                tasks.id,
                tasks.opened,
                tasks.closed,
                tasks.author_id,
                tasks.assigned_id,
                tasks.title,
                tasks.content
            FROM tasks
            JOIN users ON users.id = tasks.author_id
            WHERE users.id = $1
            ORDER BY tasks.id
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Query)?;

        decode(rows)
    }

    /// Tasks carrying the label named exactly `label_name`.
    #[instrument(skip(self))]
    pub async fn tasks_by_label(&self, label_name: &str) -> Result<Vec<Task>> {
        let rows = sqlx::query(
            r#"
            SELECT
                tasks.id,
                tasks.opened,
                tasks.closed,
                tasks.author_id,
                tasks.assigned_id,
                tasks.title,
                tasks.content
            FROM tasks
            JOIN tasks_labels ON tasks.id = tasks_labels.task_id
            JOIN labels ON labels.id = tasks_labels.label_id
            WHERE labels.name = $1
            ORDER BY tasks.id
            "#,
        )
        .bind(label_name)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Query)?;

        decode(rows)
    }

    /// Set assignee, title and content of a task.
    ///
    /// Returns the number of rows changed; an unknown id changes nothing and
    /// is not an error.
    #[instrument(skip(self, changes))]
    pub async fn update_task(&self, task_id: TaskId, changes: &TaskChanges) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET assigned_id = $1, title = $2, content = $3
            WHERE id = $4
            "#,
        )
        .bind(changes.assigned_id)
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(task_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Query)?;

        debug!(rows_affected = result.rows_affected(), "updated task");
        Ok(result.rows_affected())
    }

    /// Delete a task. Same zero-rows semantics as [`update_task`](Self::update_task).
    #[instrument(skip(self))]
    pub async fn delete_task(&self, task_id: TaskId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Query)?;

        debug!(rows_affected = result.rows_affected(), "deleted task");
        Ok(result.rows_affected())
    }
}

/// Decode every row or none: one bad row discards the rest.
fn decode(rows: Vec<PgRow>) -> Result<Vec<Task>> {
    let tasks = rows
        .iter()
        .map(Task::from_row)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::Scan)?;

    debug!(count = tasks.len(), "fetched tasks");
    Ok(tasks)
}
