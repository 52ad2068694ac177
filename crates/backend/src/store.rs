//! Storage abstraction for users, lists and tasks.
//!
//! `TodoStore` is persistence only; it never checks ownership. Callers go
//! through `services::todos::TodoService`, which resolves the caller and
//! verifies ownership before any mutation reaches the store.

use async_trait::async_trait;
use shared_types::{Task, TodoList, User};
use uuid::Uuid;

use crate::db::{self, DbPool};
use crate::error::ApiResult;
use crate::models::TaskChangeset;

/// Fields of a task that may change in a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub content: Option<String>,
    pub completed: Option<bool>,
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Create the user for this identity if missing and return it.
    async fn upsert_user(&self, external_id: &str) -> ApiResult<User>;

    async fn find_user(&self, external_id: &str) -> ApiResult<Option<User>>;

    async fn create_list(&self, owner_id: Uuid, title: &str) -> ApiResult<TodoList>;

    /// All lists of one user with their tasks, oldest list first.
    async fn lists_for_user(&self, owner_id: Uuid) -> ApiResult<Vec<TodoList>>;

    async fn list_owner(&self, list_id: Uuid) -> ApiResult<Option<Uuid>>;

    async fn rename_list(&self, list_id: Uuid, title: &str) -> ApiResult<Option<TodoList>>;

    /// Remove a list and all its tasks as one atomic unit.
    async fn delete_list(&self, list_id: Uuid) -> ApiResult<bool>;

    async fn create_task(&self, list_id: Uuid, content: &str) -> ApiResult<Task>;

    /// A task paired with the id of the user owning its list.
    async fn find_task_with_owner(&self, task_id: Uuid) -> ApiResult<Option<(Task, Uuid)>>;

    async fn update_task(&self, task_id: Uuid, changes: TaskChanges) -> ApiResult<Option<Task>>;

    async fn delete_task(&self, task_id: Uuid) -> ApiResult<bool>;
}

/// Postgres-backed store using the diesel-async connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgStore {
    async fn upsert_user(&self, external_id: &str) -> ApiResult<User> {
        let mut conn = self.pool.get().await?;
        Ok(db::users::upsert(&mut conn, external_id).await?)
    }

    async fn find_user(&self, external_id: &str) -> ApiResult<Option<User>> {
        let mut conn = self.pool.get().await?;
        Ok(db::users::get_by_external_id(&mut conn, external_id).await?)
    }

    async fn create_list(&self, owner_id: Uuid, title: &str) -> ApiResult<TodoList> {
        let mut conn = self.pool.get().await?;
        Ok(db::lists::create(&mut conn, owner_id, title).await?)
    }

    async fn lists_for_user(&self, owner_id: Uuid) -> ApiResult<Vec<TodoList>> {
        let mut conn = self.pool.get().await?;
        Ok(db::lists::list_by_owner(&mut conn, owner_id).await?)
    }

    async fn list_owner(&self, list_id: Uuid) -> ApiResult<Option<Uuid>> {
        let mut conn = self.pool.get().await?;
        Ok(db::lists::get_owner(&mut conn, list_id).await?)
    }

    async fn rename_list(&self, list_id: Uuid, title: &str) -> ApiResult<Option<TodoList>> {
        let mut conn = self.pool.get().await?;
        Ok(db::lists::rename(&mut conn, list_id, title).await?)
    }

    async fn delete_list(&self, list_id: Uuid) -> ApiResult<bool> {
        let mut conn = self.pool.get().await?;
        Ok(db::lists::delete_with_tasks(&mut conn, list_id).await?)
    }

    async fn create_task(&self, list_id: Uuid, content: &str) -> ApiResult<Task> {
        let mut conn = self.pool.get().await?;
        Ok(db::tasks::create(&mut conn, list_id, content).await?)
    }

    async fn find_task_with_owner(&self, task_id: Uuid) -> ApiResult<Option<(Task, Uuid)>> {
        let mut conn = self.pool.get().await?;
        Ok(db::tasks::get_with_owner(&mut conn, task_id).await?)
    }

    async fn update_task(&self, task_id: Uuid, changes: TaskChanges) -> ApiResult<Option<Task>> {
        let changeset = TaskChangeset {
            content: changes.content,
            completed: changes.completed,
            updated_at: chrono::Utc::now(),
        };
        let mut conn = self.pool.get().await?;
        Ok(db::tasks::update(&mut conn, task_id, &changeset).await?)
    }

    async fn delete_task(&self, task_id: Uuid) -> ApiResult<bool> {
        let mut conn = self.pool.get().await?;
        Ok(db::tasks::delete(&mut conn, task_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that stores can be shared behind a trait object
    fn _assert_object_safe() {
        fn _check<T: TodoStore + ?Sized>() {}
        _check::<dyn TodoStore>();
        _check::<PgStore>();
        _check::<crate::memory::MemoryStore>();
    }
}
