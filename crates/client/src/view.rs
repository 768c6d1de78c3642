//! Derived views over the task list: status filter, search and counts.

use taskdeck_core::task::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskFilter {
    #[default]
    All,
    Status(TaskStatus),
}

impl TaskFilter {
    /// Every choice offered by the filter menu, in display order
    pub const OPTIONS: [TaskFilter; 4] = [
        Self::All,
        Self::Status(TaskStatus::Todo),
        Self::Status(TaskStatus::InProgress),
        Self::Status(TaskStatus::Completed),
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Tasks",
            Self::Status(status) => status.label(),
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => task.status == status,
        }
    }
}

/// Tasks passing both the status filter and the search term, in their
/// original order
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: TaskFilter, search: &str) -> Vec<&'a Task> {
    let search = search.trim();
    tasks
        .iter()
        .filter(|task| filter.matches(task) && task.matches_search(search))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut counts, task| {
            match task.status {
                TaskStatus::Todo => counts.todo += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Completed => counts.completed += 1,
            }
            counts
        })
    }

    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }
}
