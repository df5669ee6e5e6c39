//! Filter for listing tasks

use serde::{Deserialize, Serialize};

use super::{TaskId, UserId};

/// Exact-match filters for [`TaskStore::list_tasks`](crate::TaskStore::list_tasks).
///
/// An absent field does not filter. The default filter matches every task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    pub task_id: Option<TaskId>,
    pub author_id: Option<UserId>,
}

impl TaskFilter {
    /// Build a filter from raw ids where `0` means "any".
    pub fn new(task_id: TaskId, author_id: UserId) -> Self {
        Self {
            task_id: (task_id != 0).then_some(task_id),
            author_id: (author_id != 0).then_some(author_id),
        }
    }

    pub fn task(mut self, id: TaskId) -> Self {
        self.task_id = Some(id);
        self
    }

    pub fn author(mut self, id: UserId) -> Self {
        self.author_id = Some(id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.task_id.is_none() && self.author_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_means_no_filter() {
        assert!(TaskFilter::new(0, 0).is_empty());
        assert_eq!(TaskFilter::new(0, 0), TaskFilter::default());

        let by_author = TaskFilter::new(0, 2);
        assert_eq!(by_author.task_id, None);
        assert_eq!(by_author.author_id, Some(2));

        let both = TaskFilter::new(1, 2);
        assert_eq!(both, TaskFilter::default().task(1).author(2));
    }

    #[test]
    fn builders_set_exact_match() {
        let filter = TaskFilter::default().task(42);
        assert_eq!(filter.task_id, Some(42));
        assert!(!filter.is_empty());
    }
}
