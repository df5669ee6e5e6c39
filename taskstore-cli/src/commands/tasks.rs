//! Task subcommands: list, create, by-author, by-label, update, delete, migrate

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::Parser;
use serde_json::json;
use taskstore::{NewTask, Task, TaskChanges, TaskFilter, TaskStore};

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only the task with this id (0 = any)
    #[arg(long, default_value_t = 0)]
    pub id: i32,

    /// Only tasks by this author id (0 = any)
    #[arg(long, default_value_t = 0)]
    pub author: i32,
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Task title
    pub title: String,

    /// Task body
    #[arg(default_value = "")]
    pub content: String,
}

#[derive(Parser, Debug)]
pub struct ByAuthorArgs {
    /// Author user id
    pub author_id: i32,
}

#[derive(Parser, Debug)]
pub struct ByLabelArgs {
    /// Exact label name
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Task id
    pub id: i32,

    /// New title
    #[arg(long)]
    pub title: String,

    /// New body (pass "" to clear it)
    #[arg(long)]
    pub content: String,

    /// Assignee user id (omit to unassign)
    #[arg(long)]
    pub assignee: Option<i32>,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Task id
    pub id: i32,
}

/// Renders results as text lines or JSON
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    fn tasks(&self, tasks: &[Task]) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(tasks)?);
        } else if tasks.is_empty() {
            println!("No tasks found");
        } else {
            for task in tasks {
                println!("{}", format_task(task));
            }
        }
        Ok(())
    }

    fn written(&self, action: &str, id: i32, rows: u64) -> Result<()> {
        if self.json {
            println!("{}", json!({ "action": action, "id": id, "rows_affected": rows }));
        } else if rows == 0 {
            println!("No task #{id} ({action}: nothing to do)");
        } else {
            println!("Task #{id} {action}");
        }
        Ok(())
    }
}

fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}

pub fn format_task(task: &Task) -> String {
    let state = match task.closed {
        None => "open".to_string(),
        Some(closed) => format!("closed {}", format_timestamp(closed)),
    };
    let assignee = task
        .assigned_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "#{} [{}] {} (author {}, assignee {}, opened {})",
        task.id,
        state,
        task.title,
        task.author_id,
        assignee,
        format_timestamp(task.opened)
    )
}

pub async fn run_migrate(store: &TaskStore) -> Result<()> {
    store.migrate().await.context("Migration failed")?;
    println!("Schema up to date");
    Ok(())
}

pub async fn run_list(store: &TaskStore, args: ListArgs, out: Output) -> Result<()> {
    let tasks = store
        .list_tasks(TaskFilter::new(args.id, args.author))
        .await
        .context("Failed to list tasks")?;
    out.tasks(&tasks)
}

pub async fn run_create(store: &TaskStore, args: CreateArgs, out: Output) -> Result<()> {
    let id = store
        .create_task(&NewTask::new(args.title, args.content))
        .await
        .context("Failed to create task")?;

    if out.json {
        println!("{}", json!({ "id": id }));
    } else {
        println!("{id}");
    }
    Ok(())
}

pub async fn run_by_author(store: &TaskStore, args: ByAuthorArgs, out: Output) -> Result<()> {
    let tasks = store
        .tasks_by_author(args.author_id)
        .await
        .with_context(|| format!("Failed to list tasks for author {}", args.author_id))?;
    out.tasks(&tasks)
}

pub async fn run_by_label(store: &TaskStore, args: ByLabelArgs, out: Output) -> Result<()> {
    let tasks = store
        .tasks_by_label(&args.name)
        .await
        .with_context(|| format!("Failed to list tasks labelled '{}'", args.name))?;
    out.tasks(&tasks)
}

pub async fn run_update(store: &TaskStore, args: UpdateArgs, out: Output) -> Result<()> {
    let changes = TaskChanges {
        assigned_id: args.assignee,
        title: args.title,
        content: args.content,
    };
    let rows = store
        .update_task(args.id, &changes)
        .await
        .with_context(|| format!("Failed to update task {}", args.id))?;
    out.written("updated", args.id, rows)
}

pub async fn run_delete(store: &TaskStore, args: DeleteArgs, out: Output) -> Result<()> {
    let rows = store
        .delete_task(args.id)
        .await
        .with_context(|| format!("Failed to delete task {}", args.id))?;
    out.written("deleted", args.id, rows)
}
