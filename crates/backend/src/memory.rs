//! In-process store used when no database is configured, and by tests.

use async_trait::async_trait;
use chrono::Utc;
use shared_types::{Task, TodoList, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::store::{TaskChanges, TodoStore};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    // Lists are kept without tasks; tasks live in their own table.
    lists: Vec<TodoList>,
    tasks: Vec<Task>,
}

impl Tables {
    fn with_tasks(&self, list: &TodoList) -> TodoList {
        let mut list = list.clone();
        list.tasks = self
            .tasks
            .iter()
            .filter(|task| task.list_id == list.id)
            .cloned()
            .collect();
        list
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn upsert_user(&self, external_id: &str) -> ApiResult<User> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables
            .users
            .iter()
            .find(|user| user.external_auth_id == external_id)
        {
            return Ok(user.clone());
        }

        let user = User {
            id: Uuid::new_v4(),
            external_auth_id: external_id.to_string(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, external_id: &str) -> ApiResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|user| user.external_auth_id == external_id)
            .cloned())
    }

    async fn create_list(&self, owner_id: Uuid, title: &str) -> ApiResult<TodoList> {
        let now = Utc::now();
        let list = TodoList {
            id: Uuid::new_v4(),
            user_id: owner_id,
            title: title.to_string(),
            created_at: now,
            updated_at: now,
            tasks: Vec::new(),
        };
        self.tables.write().await.lists.push(list.clone());
        Ok(list)
    }

    async fn lists_for_user(&self, owner_id: Uuid) -> ApiResult<Vec<TodoList>> {
        let tables = self.tables.read().await;
        Ok(tables
            .lists
            .iter()
            .filter(|list| list.user_id == owner_id)
            .map(|list| tables.with_tasks(list))
            .collect())
    }

    async fn list_owner(&self, list_id: Uuid) -> ApiResult<Option<Uuid>> {
        let tables = self.tables.read().await;
        Ok(tables
            .lists
            .iter()
            .find(|list| list.id == list_id)
            .map(|list| list.user_id))
    }

    async fn rename_list(&self, list_id: Uuid, title: &str) -> ApiResult<Option<TodoList>> {
        let mut tables = self.tables.write().await;
        let Some(list) = tables.lists.iter_mut().find(|list| list.id == list_id) else {
            return Ok(None);
        };
        list.title = title.to_string();
        list.updated_at = Utc::now();
        let list = list.clone();
        Ok(Some(tables.with_tasks(&list)))
    }

    async fn delete_list(&self, list_id: Uuid) -> ApiResult<bool> {
        // Single write guard: tasks and list disappear together.
        let mut tables = self.tables.write().await;
        let before = tables.lists.len();
        tables.tasks.retain(|task| task.list_id != list_id);
        tables.lists.retain(|list| list.id != list_id);
        Ok(tables.lists.len() < before)
    }

    async fn create_task(&self, list_id: Uuid, content: &str) -> ApiResult<Task> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            list_id,
            content: content.to_string(),
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.tasks.push(task.clone());
        Ok(task)
    }

    async fn find_task_with_owner(&self, task_id: Uuid) -> ApiResult<Option<(Task, Uuid)>> {
        let tables = self.tables.read().await;
        let Some(task) = tables.tasks.iter().find(|task| task.id == task_id) else {
            return Ok(None);
        };
        Ok(tables
            .lists
            .iter()
            .find(|list| list.id == task.list_id)
            .map(|list| (task.clone(), list.user_id)))
    }

    async fn update_task(&self, task_id: Uuid, changes: TaskChanges) -> ApiResult<Option<Task>> {
        let mut tables = self.tables.write().await;
        let Some(task) = tables.tasks.iter_mut().find(|task| task.id == task_id) else {
            return Ok(None);
        };
        if let Some(content) = changes.content {
            task.content = content;
        }
        if let Some(completed) = changes.completed {
            task.completed = completed;
        }
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, task_id: Uuid) -> ApiResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.tasks.len();
        tables.tasks.retain(|task| task.id != task_id);
        Ok(tables.tasks.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_user_is_idempotent() {
        let store = MemoryStore::new();
        let first = store.upsert_user("user_abc").await.unwrap();
        let second = store.upsert_user("user_abc").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.find_user("user_abc").await.unwrap(), Some(first));
        assert_eq!(store.find_user("someone_else").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_tasks_keep_insertion_order() {
        let store = MemoryStore::new();
        let user = store.upsert_user("user_abc").await.unwrap();
        let list = store.create_list(user.id, "Groceries").await.unwrap();
        for content in ["milk", "bread", "apples"] {
            store.create_task(list.id, content).await.unwrap();
        }

        let lists = store.lists_for_user(user.id).await.unwrap();
        let contents: Vec<&str> = lists[0].tasks.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["milk", "bread", "apples"]);
    }

    #[tokio::test]
    async fn test_delete_list_removes_tasks() {
        let store = MemoryStore::new();
        let user = store.upsert_user("user_abc").await.unwrap();
        let list = store.create_list(user.id, "Groceries").await.unwrap();
        let task = store.create_task(list.id, "milk").await.unwrap();

        assert!(store.delete_list(list.id).await.unwrap());
        assert!(store.find_task_with_owner(task.id).await.unwrap().is_none());
        assert!(store.lists_for_user(user.id).await.unwrap().is_empty());
        assert!(!store.delete_list(list.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let store = MemoryStore::new();
        let user = store.upsert_user("user_abc").await.unwrap();
        let list = store.create_list(user.id, "Groceries").await.unwrap();
        let task = store.create_task(list.id, "milk").await.unwrap();

        let updated = store
            .update_task(
                task.id,
                TaskChanges {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.content, "milk");

        let (found, owner) = store.find_task_with_owner(task.id).await.unwrap().unwrap();
        assert_eq!(found, updated);
        assert_eq!(owner, user.id);
    }
}
