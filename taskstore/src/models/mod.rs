//! Domain models
//!
//! `Task` is decoded from rows; `NewTask`, `TaskChanges` and `TaskFilter`
//! carry the inputs of the write and list operations.

pub mod filter;
pub mod task;

pub use filter::TaskFilter;
pub use task::{NewTask, Task, TaskChanges};

/// Task identifier (`tasks.id`)
pub type TaskId = i32;

/// User identifier (`users.id`), used for authors and assignees
pub type UserId = i32;
