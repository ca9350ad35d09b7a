//! Shoot plans
//!
//! A [`Plan`] is the checklist one participant keeps for a shoot on a given
//! day. Plans are persisted through the object store, keyed by their uuid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use storage::{ObjectKind, Persistable};
use uuid::Uuid;

use crate::roles::Role;

/// Name given to tasks added from the plan screen
pub const NEW_TASK_NAME: &str = "New Task";

/// One checklist item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskCategory {
    /// Task text
    pub name: String,
    /// Whether the task is checked off
    pub is_active: bool,
}

impl TaskCategory {
    /// Create an unchecked task
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_active: false,
        }
    }

    /// Flip the checked state
    pub fn toggle(&mut self) {
        self.is_active = !self.is_active;
    }
}

impl Persistable for TaskCategory {
    const KIND: ObjectKind = ObjectKind::TaskCategory;

    fn object_id(&self) -> String {
        self.name.clone()
    }
}

/// A shoot plan
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plan {
    /// Unique plan id
    pub id: Uuid,
    /// Role the plan is made for
    pub role: Role,
    /// Day of the shoot
    pub date: NaiveDate,
    /// Checklist
    pub tasks: Vec<TaskCategory>,
}

impl Plan {
    /// Create a plan with a fresh id
    pub fn new(role: Role, date: NaiveDate, tasks: Vec<TaskCategory>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            date,
            tasks,
        }
    }

    /// Create a plan seeded with the role's default checklist
    pub fn for_role(role: Role, date: NaiveDate) -> Self {
        Self::new(role, date, role.default_tasks())
    }

    /// Number of checked tasks
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_active).count()
    }

    /// Check whether every task is checked (false for an empty checklist)
    pub fn is_complete(&self) -> bool {
        !self.tasks.is_empty() && self.completed_count() == self.tasks.len()
    }

    /// Check whether any task name contains `query` (case-insensitive)
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.tasks
            .iter()
            .any(|task| task.name.to_lowercase().contains(&query))
    }
}

impl Persistable for Plan {
    const KIND: ObjectKind = ObjectKind::Plan;

    fn object_id(&self) -> String {
        self.id.to_string()
    }
}
