//! Client mirror of the caller's lists, patched from server responses.

use shared_types::{Task, TodoList};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient toast shown after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SignedOut,
    Loaded(Vec<TodoList>),
    LoadFailed(String),
    ListCreated(TodoList),
    ListRenamed(TodoList),
    ListDeleted(Uuid),
    TaskAdded { list_id: Uuid, task: Task },
    TaskUpdated { list_id: Uuid, task: Task },
    TaskDeleted { list_id: Uuid, task_id: Uuid },
    Failed(String),
    DismissNotice,
}

/// `lists == None` means nothing has been loaded yet (or the user signed out).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListsState {
    pub lists: Option<Vec<TodoList>>,
    pub error: Option<String>,
    pub notice: Option<Notice>,
    /// Bumped every time a notice is raised, so repeated identical notices
    /// are still distinguishable.
    pub notice_seq: u64,
}

impl ListsState {
    pub fn is_loading(&self) -> bool {
        self.lists.is_none()
    }

    pub fn list(&self, list_id: Uuid) -> Option<&TodoList> {
        self.lists.as_ref()?.iter().find(|list| list.id == list_id)
    }

    /// Return the state that results from applying `action`.
    pub fn apply(&self, action: Action) -> ListsState {
        let mut next = self.clone();

        match action {
            Action::SignedOut => return ListsState::default(),
            Action::Loaded(lists) => {
                next.lists = Some(lists);
                next.error = None;
            }
            Action::LoadFailed(message) => {
                next.lists = Some(Vec::new());
                next.error = Some(message);
            }
            Action::ListCreated(list) => {
                next.lists.get_or_insert_with(Vec::new).insert(0, list);
                next.raise(Notice::success("List created"));
            }
            Action::ListRenamed(list) => {
                if let Some(existing) = next.list_mut(list.id) {
                    *existing = list;
                }
            }
            Action::ListDeleted(list_id) => {
                if let Some(lists) = next.lists.as_mut() {
                    lists.retain(|list| list.id != list_id);
                }
                next.raise(Notice::success("List deleted"));
            }
            Action::TaskAdded { list_id, task } => {
                if let Some(list) = next.list_mut(list_id) {
                    list.tasks.push(task);
                }
                next.raise(Notice::success("Task added"));
            }
            Action::TaskUpdated { list_id, task } => {
                if let Some(existing) = next
                    .list_mut(list_id)
                    .and_then(|list| list.tasks.iter_mut().find(|t| t.id == task.id))
                {
                    *existing = task;
                }
                next.raise(Notice::success("Task updated"));
            }
            Action::TaskDeleted { list_id, task_id } => {
                if let Some(list) = next.list_mut(list_id) {
                    list.tasks.retain(|task| task.id != task_id);
                }
                next.raise(Notice::success("Task deleted"));
            }
            Action::Failed(message) => {
                tracing::warn!("Request failed: {}", message);
                next.raise(Notice::error(message.clone()));
                next.error = Some(message);
            }
            Action::DismissNotice => next.notice = None,
        }

        next
    }

    fn raise(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.notice_seq = self.notice_seq.wrapping_add(1);
    }

    fn list_mut(&mut self, list_id: Uuid) -> Option<&mut TodoList> {
        self.lists.as_mut()?.iter_mut().find(|list| list.id == list_id)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::Utc;
    use shared_types::{Task, TodoList};
    use uuid::Uuid;

    pub fn list(title: &str, tasks: &[(&str, bool)]) -> TodoList {
        let id = Uuid::new_v4();
        TodoList {
            id,
            user_id: Uuid::nil(),
            title: title.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            tasks: tasks
                .iter()
                .map(|(content, completed)| task(id, content, *completed))
                .collect(),
        }
    }

    pub fn task(list_id: Uuid, content: &str, completed: bool) -> Task {
        Task {
            id: Uuid::new_v4(),
            list_id,
            content: content.to_string(),
            completed,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
