//! Transport contract between client operations and the backend.

use async_trait::async_trait;
use shared_types::{Task, TodoList, UpdateTaskRequest, User};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Not signed in")]
    MissingToken,
    #[error("Network error: {0}")]
    Network(String),
    /// Any non-success status; `message` is the server's error text when it sent one.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(status: u16, server_message: Option<String>) -> Self {
        let message =
            server_message.unwrap_or_else(|| format!("Request failed with status {}", status));
        ClientError::Status { status, message }
    }
}

/// One method per backend endpoint. Futures are not `Send` so browser
/// implementations can hold JS values across awaits.
#[async_trait(?Send)]
pub trait TodoApi {
    async fn sync_user(&self) -> Result<User, ClientError>;
    async fn fetch_lists(&self) -> Result<Vec<TodoList>, ClientError>;
    async fn create_list(&self, title: &str) -> Result<TodoList, ClientError>;
    async fn rename_list(&self, list_id: Uuid, title: &str) -> Result<TodoList, ClientError>;
    async fn delete_list(&self, list_id: Uuid) -> Result<(), ClientError>;
    async fn create_task(&self, list_id: Uuid, content: &str) -> Result<Task, ClientError>;
    async fn update_task(
        &self,
        task_id: Uuid,
        request: &UpdateTaskRequest,
    ) -> Result<Task, ClientError>;
    async fn delete_task(&self, task_id: Uuid) -> Result<(), ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_prefers_server_message() {
        let err = ClientError::status(403, Some("You do not own this list".into()));
        assert_eq!(err.to_string(), "You do not own this list");

        let err = ClientError::status(500, None);
        assert_eq!(err.to_string(), "Request failed with status 500");
    }
}
