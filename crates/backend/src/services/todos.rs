//! List and task operations on behalf of an authenticated caller.
//!
//! Every operation resolves the caller's local user first; mutations verify
//! that the caller owns the list (directly, or through a task's list).

use shared_types::{
    CreateListRequest, CreateTaskRequest, RenameListRequest, Task, TodoList, UpdateTaskRequest,
    User,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::store::{TaskChanges, TodoStore};

pub struct TodoService<'a> {
    store: &'a dyn TodoStore,
}

impl<'a> TodoService<'a> {
    pub fn new(store: &'a dyn TodoStore) -> Self {
        Self { store }
    }

    /// Create the local user for this identity if it does not exist yet.
    pub async fn sync_user(&self, caller: &AuthUser) -> ApiResult<User> {
        let user = self.store.upsert_user(&caller.external_id).await?;
        tracing::debug!(user_id = %user.id, "Synced user");
        Ok(user)
    }

    pub async fn lists(&self, caller: &AuthUser) -> ApiResult<Vec<TodoList>> {
        let user = self.resolve_user(caller).await?;
        self.store.lists_for_user(user.id).await
    }

    pub async fn create_list(
        &self,
        caller: &AuthUser,
        request: CreateListRequest,
    ) -> ApiResult<TodoList> {
        let request = request.trimmed();
        request.validate()?;
        let user = self.resolve_user(caller).await?;

        let list = self.store.create_list(user.id, &request.title).await?;
        tracing::info!(list_id = %list.id, user_id = %user.id, "Created list");
        Ok(list)
    }

    pub async fn rename_list(
        &self,
        caller: &AuthUser,
        list_id: Uuid,
        request: RenameListRequest,
    ) -> ApiResult<TodoList> {
        let request = request.trimmed();
        request.validate()?;
        let user = self.resolve_user(caller).await?;
        self.ensure_list_owner(&user, list_id).await?;

        self.store
            .rename_list(list_id, &request.title)
            .await?
            .ok_or_else(|| ApiError::not_found("List"))
    }

    pub async fn delete_list(&self, caller: &AuthUser, list_id: Uuid) -> ApiResult<()> {
        let user = self.resolve_user(caller).await?;
        self.ensure_list_owner(&user, list_id).await?;

        if !self.store.delete_list(list_id).await? {
            return Err(ApiError::not_found("List"));
        }
        tracing::info!(list_id = %list_id, user_id = %user.id, "Deleted list");
        Ok(())
    }

    pub async fn create_task(
        &self,
        caller: &AuthUser,
        list_id: Uuid,
        request: CreateTaskRequest,
    ) -> ApiResult<Task> {
        let request = request.trimmed();
        request.validate()?;
        let user = self.resolve_user(caller).await?;
        self.ensure_list_owner(&user, list_id).await?;

        let task = self.store.create_task(list_id, &request.content).await?;
        tracing::info!(task_id = %task.id, list_id = %list_id, "Created task");
        Ok(task)
    }

    /// Apply a partial update; fields absent from the request keep their value.
    pub async fn update_task(
        &self,
        caller: &AuthUser,
        task_id: Uuid,
        request: UpdateTaskRequest,
    ) -> ApiResult<Task> {
        let request = request.trimmed();
        request.validate()?;
        let user = self.resolve_user(caller).await?;
        let task = self.ensure_task_owner(&user, task_id).await?;

        if request.is_empty() {
            return Ok(task);
        }

        let changes = TaskChanges {
            content: request.content,
            completed: request.completed,
        };
        self.store
            .update_task(task_id, changes)
            .await?
            .ok_or_else(|| ApiError::not_found("Task"))
    }

    pub async fn delete_task(&self, caller: &AuthUser, task_id: Uuid) -> ApiResult<()> {
        let user = self.resolve_user(caller).await?;
        self.ensure_task_owner(&user, task_id).await?;

        if !self.store.delete_task(task_id).await? {
            return Err(ApiError::not_found("Task"));
        }
        tracing::info!(task_id = %task_id, user_id = %user.id, "Deleted task");
        Ok(())
    }

    async fn resolve_user(&self, caller: &AuthUser) -> ApiResult<User> {
        self.store
            .find_user(&caller.external_id)
            .await?
            .ok_or_else(|| ApiError::not_found("User"))
    }

    async fn ensure_list_owner(&self, user: &User, list_id: Uuid) -> ApiResult<()> {
        let owner_id = self
            .store
            .list_owner(list_id)
            .await?
            .ok_or_else(|| ApiError::not_found("List"))?;
        ensure_owner(user, owner_id, "list", list_id)
    }

    async fn ensure_task_owner(&self, user: &User, task_id: Uuid) -> ApiResult<Task> {
        let (task, owner_id) = self
            .store
            .find_task_with_owner(task_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Task"))?;
        ensure_owner(user, owner_id, "task", task_id)?;
        Ok(task)
    }
}

fn ensure_owner(user: &User, owner_id: Uuid, resource: &str, resource_id: Uuid) -> ApiResult<()> {
    if user.id != owner_id {
        tracing::warn!(
            user_id = %user.id,
            resource_id = %resource_id,
            "Refused access to {} owned by another user",
            resource
        );
        return Err(ApiError::forbidden(format!("You do not own this {}", resource)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn caller(id: &str) -> AuthUser {
        AuthUser {
            external_id: id.to_string(),
        }
    }

    fn list_request(title: &str) -> CreateListRequest {
        CreateListRequest {
            title: title.to_string(),
        }
    }

    fn task_request(content: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            content: content.to_string(),
        }
    }

    async fn synced(service: &TodoService<'_>, id: &str) -> AuthUser {
        let user = caller(id);
        service.sync_user(&user).await.unwrap();
        user
    }

    #[tokio::test]
    async fn test_unsynced_caller_not_found() {
        let store = MemoryStore::new();
        let service = TodoService::new(&store);

        let err = service.lists(&caller("ghost")).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref what) if what == "User"));
    }

    #[tokio::test]
    async fn test_lists_are_scoped_to_owner() {
        let store = MemoryStore::new();
        let service = TodoService::new(&store);
        let alice = synced(&service, "alice").await;
        let bob = synced(&service, "bob").await;

        let list = service.create_list(&alice, list_request("Groceries")).await.unwrap();

        let alice_lists = service.lists(&alice).await.unwrap();
        assert_eq!(alice_lists.len(), 1);
        assert_eq!(alice_lists[0].id, list.id);
        assert!(service.lists(&bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_titles_are_trimmed_and_blank_rejected() {
        let store = MemoryStore::new();
        let service = TodoService::new(&store);
        let alice = synced(&service, "alice").await;

        let list = service.create_list(&alice, list_request("  Chores ")).await.unwrap();
        assert_eq!(list.title, "Chores");
        assert!(list.tasks.is_empty());

        let err = service.create_list(&alice, list_request("   ")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_padded_input_is_measured_after_trimming() {
        let store = MemoryStore::new();
        let service = TodoService::new(&store);
        let alice = synced(&service, "alice").await;
        let title = "a".repeat(shared_types::MAX_TITLE_LEN as usize);

        let list = service
            .create_list(&alice, list_request(&format!("  {}  ", title)))
            .await
            .unwrap();
        assert_eq!(list.title, title);

        let content = "c".repeat(shared_types::MAX_CONTENT_LEN as usize);
        let task = service
            .create_task(&alice, list.id, task_request(&format!(" {} ", content)))
            .await
            .unwrap();
        assert_eq!(task.content, content);

        let err = service
            .create_list(&alice, list_request(&format!(" {}a ", title)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_non_owner_cannot_rename_or_delete_list() {
        let store = MemoryStore::new();
        let service = TodoService::new(&store);
        let alice = synced(&service, "alice").await;
        let bob = synced(&service, "bob").await;
        let list = service.create_list(&alice, list_request("Groceries")).await.unwrap();

        let rename = RenameListRequest {
            title: "Mine now".to_string(),
        };
        let err = service.rename_list(&bob, list.id, rename).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        let err = service.delete_list(&bob, list.id).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        let lists = service.lists(&alice).await.unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].title, "Groceries");
    }

    #[tokio::test]
    async fn test_missing_list_not_found() {
        let store = MemoryStore::new();
        let service = TodoService::new(&store);
        let alice = synced(&service, "alice").await;

        let rename = RenameListRequest {
            title: "Anything".to_string(),
        };
        let err = service.rename_list(&alice, Uuid::new_v4(), rename).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = service.delete_list(&alice, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_task_under_foreign_list_creates_nothing() {
        let store = MemoryStore::new();
        let service = TodoService::new(&store);
        let alice = synced(&service, "alice").await;
        let bob = synced(&service, "bob").await;
        let list = service.create_list(&alice, list_request("Groceries")).await.unwrap();

        let err = service
            .create_task(&bob, list.id, task_request("sneaky"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        let err = service
            .create_task(&alice, Uuid::new_v4(), task_request("orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let lists = service.lists(&alice).await.unwrap();
        assert!(lists[0].tasks.is_empty());
    }

    #[tokio::test]
    async fn test_partial_task_updates() {
        let store = MemoryStore::new();
        let service = TodoService::new(&store);
        let alice = synced(&service, "alice").await;
        let list = service.create_list(&alice, list_request("Groceries")).await.unwrap();
        let task = service
            .create_task(&alice, list.id, task_request("milk"))
            .await
            .unwrap();
        assert!(!task.completed);

        let done = service
            .update_task(&alice, task.id, UpdateTaskRequest::completed(true))
            .await
            .unwrap();
        assert!(done.completed);
        assert_eq!(done.content, "milk");

        let renamed = service
            .update_task(&alice, task.id, UpdateTaskRequest::content(" oat milk "))
            .await
            .unwrap();
        assert!(renamed.completed);
        assert_eq!(renamed.content, "oat milk");

        let unchanged = service
            .update_task(&alice, task.id, UpdateTaskRequest::default())
            .await
            .unwrap();
        assert_eq!(unchanged, renamed);
    }

    #[tokio::test]
    async fn test_non_owner_cannot_touch_task() {
        let store = MemoryStore::new();
        let service = TodoService::new(&store);
        let alice = synced(&service, "alice").await;
        let bob = synced(&service, "bob").await;
        let list = service.create_list(&alice, list_request("Groceries")).await.unwrap();
        let task = service
            .create_task(&alice, list.id, task_request("milk"))
            .await
            .unwrap();

        let err = service
            .update_task(&bob, task.id, UpdateTaskRequest::completed(true))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        let err = service.delete_task(&bob, task.id).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        let lists = service.lists(&alice).await.unwrap();
        assert_eq!(lists[0].tasks, vec![task]);
    }

    #[tokio::test]
    async fn test_delete_list_removes_its_tasks() {
        let store = MemoryStore::new();
        let service = TodoService::new(&store);
        let alice = synced(&service, "alice").await;
        let list = service.create_list(&alice, list_request("Groceries")).await.unwrap();
        let task = service
            .create_task(&alice, list.id, task_request("milk"))
            .await
            .unwrap();

        service.delete_list(&alice, list.id).await.unwrap();

        assert!(service.lists(&alice).await.unwrap().is_empty());
        let err = service
            .update_task(&alice, task.id, UpdateTaskRequest::completed(true))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
