// Database models for Diesel
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use shared_types::{Task, TodoList};
use uuid::Uuid;

/// Database representation of todo_lists; tasks are loaded separately.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::todo_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TodoListRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoListRow {
    pub fn with_tasks(self, tasks: Vec<Task>) -> TodoList {
        TodoList {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            created_at: self.created_at,
            updated_at: self.updated_at,
            tasks,
        }
    }
}

/// Changeset for partial task updates. `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::tasks)]
pub struct TaskChangeset {
    pub content: Option<String>,
    pub completed: Option<bool>,
    pub updated_at: DateTime<Utc>,
}
