//! taskstore: PostgreSQL data access for tasks
//!
//! A thin, fail-fast facade over a connection pool. One entity (`Task`),
//! six operations, no caching and no retries.
//!
//! ```ignore
//! let store = TaskStore::connect("host=localhost user=postgres dbname=tasks sslmode=disable").await?;
//! let id = store.create_task(&NewTask::new("write docs", "")).await?;
//! let tasks = store.list_tasks(TaskFilter::default().task(id)).await?;
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use config::{ConnectionConfig, SslMode};
pub use db::TaskStore;
pub use error::{Error, Result};
pub use models::{NewTask, Task, TaskChanges, TaskFilter, TaskId, UserId};

/// Embedded schema migrations for the `tasks`, `users`, `labels` and
/// `tasks_labels` tables.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
