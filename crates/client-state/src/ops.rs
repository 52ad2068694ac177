//! User-facing operations. Each one issues a single request (sign-in issues
//! two) and yields the `Action` that patches the local mirror.

use shared_types::UpdateTaskRequest;
use uuid::Uuid;

use crate::api::{ClientError, TodoApi};
use crate::store::Action;

impl Action {
    /// Collapse an operation outcome into something the reducer accepts.
    pub fn from_outcome(outcome: Result<Action, ClientError>) -> Action {
        match outcome {
            Ok(action) => action,
            Err(err) => Action::Failed(err.to_string()),
        }
    }
}

/// Make sure the caller exists server-side, then load their lists.
pub async fn sign_in<A: TodoApi + ?Sized>(api: &A) -> Action {
    let loaded = async {
        api.sync_user().await?;
        api.fetch_lists().await
    };

    match loaded.await {
        Ok(lists) => {
            tracing::debug!("Loaded {} lists", lists.len());
            Action::Loaded(lists)
        }
        Err(err) => Action::LoadFailed(err.to_string()),
    }
}

pub async fn create_list<A: TodoApi + ?Sized>(api: &A, title: &str) -> Result<Action, ClientError> {
    let list = api.create_list(title).await?;
    Ok(Action::ListCreated(list))
}

pub async fn rename_list<A: TodoApi + ?Sized>(
    api: &A,
    list_id: Uuid,
    title: &str,
) -> Result<Action, ClientError> {
    let list = api.rename_list(list_id, title).await?;
    Ok(Action::ListRenamed(list))
}

pub async fn delete_list<A: TodoApi + ?Sized>(api: &A, list_id: Uuid) -> Result<Action, ClientError> {
    api.delete_list(list_id).await?;
    Ok(Action::ListDeleted(list_id))
}

pub async fn create_task<A: TodoApi + ?Sized>(
    api: &A,
    list_id: Uuid,
    content: &str,
) -> Result<Action, ClientError> {
    let task = api.create_task(list_id, content).await?;
    Ok(Action::TaskAdded { list_id, task })
}

pub async fn set_task_completed<A: TodoApi + ?Sized>(
    api: &A,
    list_id: Uuid,
    task_id: Uuid,
    completed: bool,
) -> Result<Action, ClientError> {
    let task = api
        .update_task(task_id, &UpdateTaskRequest::completed(completed))
        .await?;
    Ok(Action::TaskUpdated { list_id, task })
}

pub async fn edit_task_content<A: TodoApi + ?Sized>(
    api: &A,
    list_id: Uuid,
    task_id: Uuid,
    content: &str,
) -> Result<Action, ClientError> {
    let task = api
        .update_task(task_id, &UpdateTaskRequest::content(content))
        .await?;
    Ok(Action::TaskUpdated { list_id, task })
}

pub async fn delete_task<A: TodoApi + ?Sized>(
    api: &A,
    list_id: Uuid,
    task_id: Uuid,
) -> Result<Action, ClientError> {
    api.delete_task(task_id).await?;
    Ok(Action::TaskDeleted { list_id, task_id })
}

/// Trimmed input, or `None` when nothing but whitespace was typed.
pub fn normalized_input(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// What to do when an inline edit loses focus or Enter is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftCommit {
    /// Leave edit mode and restore the draft to the current value.
    Unchanged,
    Submit(String),
}

pub fn commit_draft(current: &str, draft: &str) -> DraftCommit {
    match normalized_input(draft) {
        Some(value) if value != current => DraftCommit::Submit(value),
        _ => DraftCommit::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use async_trait::async_trait;
    use chrono::Utc;
    use shared_types::{Task, TodoList, User};
    use tokio_test::block_on;

    use crate::store::fixtures::{list, task};
    use crate::store::ListsState;

    /// Records every call and answers from canned data.
    #[derive(Default)]
    struct FakeApi {
        calls: RefCell<Vec<String>>,
        lists: Vec<TodoList>,
        fail_with: Option<ClientError>,
    }

    impl FakeApi {
        fn failing(err: ClientError) -> Self {
            Self {
                fail_with: Some(err),
                ..Default::default()
            }
        }

        fn record(&self, call: String) -> Result<(), ClientError> {
            self.calls.borrow_mut().push(call);
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait(?Send)]
    impl TodoApi for FakeApi {
        async fn sync_user(&self) -> Result<User, ClientError> {
            self.record("sync_user".into())?;
            Ok(User {
                id: Uuid::new_v4(),
                external_auth_id: "user_fake".into(),
                created_at: Utc::now(),
            })
        }

        async fn fetch_lists(&self) -> Result<Vec<TodoList>, ClientError> {
            self.record("fetch_lists".into())?;
            Ok(self.lists.clone())
        }

        async fn create_list(&self, title: &str) -> Result<TodoList, ClientError> {
            self.record(format!("create_list {}", title))?;
            Ok(list(title, &[]))
        }

        async fn rename_list(&self, list_id: Uuid, title: &str) -> Result<TodoList, ClientError> {
            self.record(format!("rename_list {}", title))?;
            let mut renamed = list(title, &[]);
            renamed.id = list_id;
            Ok(renamed)
        }

        async fn delete_list(&self, _list_id: Uuid) -> Result<(), ClientError> {
            self.record("delete_list".into())
        }

        async fn create_task(&self, list_id: Uuid, content: &str) -> Result<Task, ClientError> {
            self.record(format!("create_task {}", content))?;
            Ok(task(list_id, content, false))
        }

        async fn update_task(
            &self,
            task_id: Uuid,
            request: &UpdateTaskRequest,
        ) -> Result<Task, ClientError> {
            self.record(format!("update_task {:?}", request))?;
            let mut updated = task(Uuid::nil(), request.content.as_deref().unwrap_or("milk"), false);
            updated.id = task_id;
            updated.completed = request.completed.unwrap_or(false);
            Ok(updated)
        }

        async fn delete_task(&self, _task_id: Uuid) -> Result<(), ClientError> {
            self.record("delete_task".into())
        }
    }

    #[test]
    fn test_sign_in_syncs_then_loads() {
        let api = FakeApi {
            lists: vec![list("Groceries", &[("milk", false)])],
            ..Default::default()
        };

        let action = block_on(sign_in(&api));

        assert_eq!(*api.calls.borrow(), vec!["sync_user", "fetch_lists"]);
        assert_eq!(action, Action::Loaded(api.lists.clone()));
    }

    #[test]
    fn test_sign_in_failure_is_load_failure() {
        let api = FakeApi::failing(ClientError::Network("offline".into()));

        let action = block_on(sign_in(&api));

        assert_eq!(*api.calls.borrow(), vec!["sync_user"]);
        assert_eq!(action, Action::LoadFailed("Network error: offline".into()));
        let state = ListsState::default().apply(action);
        assert_eq!(state.lists, Some(vec![]));
    }

    #[test]
    fn test_mutations_issue_one_call_each() {
        let api = FakeApi::default();
        let list_id = Uuid::new_v4();
        let task_id = Uuid::new_v4();

        let created = block_on(create_list(&api, "Groceries")).unwrap();
        assert!(matches!(created, Action::ListCreated(ref l) if l.title == "Groceries"));

        let renamed = block_on(rename_list(&api, list_id, "Shopping")).unwrap();
        assert!(matches!(renamed, Action::ListRenamed(ref l) if l.id == list_id));

        let added = block_on(create_task(&api, list_id, "milk")).unwrap();
        assert!(matches!(added, Action::TaskAdded { list_id: id, .. } if id == list_id));

        let toggled = block_on(set_task_completed(&api, list_id, task_id, true)).unwrap();
        assert!(matches!(
            toggled,
            Action::TaskUpdated { ref task, .. } if task.completed && task.id == task_id
        ));

        let edited = block_on(edit_task_content(&api, list_id, task_id, "oat milk")).unwrap();
        assert!(matches!(edited, Action::TaskUpdated { ref task, .. } if task.content == "oat milk"));

        let deleted = block_on(delete_task(&api, list_id, task_id)).unwrap();
        assert_eq!(deleted, Action::TaskDeleted { list_id, task_id });

        let removed = block_on(delete_list(&api, list_id)).unwrap();
        assert_eq!(removed, Action::ListDeleted(list_id));

        assert_eq!(api.calls.borrow().len(), 7);
    }

    #[test]
    fn test_failed_mutation_becomes_failed_action() {
        let api = FakeApi::failing(ClientError::status(403, Some("You do not own this list".into())));

        let action = Action::from_outcome(block_on(delete_list(&api, Uuid::new_v4())));

        assert_eq!(action, Action::Failed("You do not own this list".into()));
    }

    #[test]
    fn test_normalized_input() {
        assert_eq!(normalized_input("  milk "), Some("milk".to_string()));
        assert_eq!(normalized_input("   "), None);
        assert_eq!(normalized_input(""), None);
    }

    #[test]
    fn test_commit_draft() {
        assert_eq!(commit_draft("Groceries", "  "), DraftCommit::Unchanged);
        assert_eq!(commit_draft("Groceries", " Groceries "), DraftCommit::Unchanged);
        assert_eq!(
            commit_draft("Groceries", " Shopping "),
            DraftCommit::Submit("Shopping".into())
        );
    }
}
