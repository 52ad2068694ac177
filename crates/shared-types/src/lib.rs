use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const MAX_TITLE_LEN: u64 = 200;
pub const MAX_CONTENT_LEN: u64 = 2000;

/// Local user record, keyed by the identity provider's user id.
/// Field order matches the `users` table column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct User {
    pub id: Uuid,
    pub external_auth_id: String,
    pub created_at: DateTime<Utc>,
}

/// Task struct matching database column order exactly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct Task {
    pub id: Uuid,
    pub list_id: Uuid,
    pub content: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A list together with its tasks in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TodoList {
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateListRequest {
    #[validate(length(min = 1, max = 200), custom = "not_blank")]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameListRequest {
    #[validate(length(min = 1, max = 200), custom = "not_blank")]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 2000), custom = "not_blank")]
    pub content: String,
}

impl CreateListRequest {
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
        }
    }
}

impl RenameListRequest {
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
        }
    }
}

impl CreateTaskRequest {
    pub fn trimmed(self) -> Self {
        Self {
            content: self.content.trim().to_string(),
        }
    }
}

/// Partial task update; only the supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 2000), custom = "not_blank")]
    pub content: Option<String>,
}

impl UpdateTaskRequest {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            content: None,
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            completed: None,
            content: Some(content.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_none() && self.content.is_none()
    }

    pub fn trimmed(self) -> Self {
        Self {
            completed: self.completed,
            content: self.content.map(|content| content.trim().to_string()),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// API error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_title_rejected() {
        let request = CreateListRequest {
            title: "   ".to_string(),
        };
        assert!(request.validate().is_err());

        let request = CreateListRequest {
            title: "Groceries".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_overlong_content_rejected() {
        let request = CreateTaskRequest {
            content: "x".repeat(MAX_CONTENT_LEN as usize + 1),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_length_limits_match_constants() {
        let title = |len: u64| CreateListRequest {
            title: "t".repeat(len as usize),
        };
        assert!(title(MAX_TITLE_LEN).validate().is_ok());
        assert!(title(MAX_TITLE_LEN + 1).validate().is_err());

        let rename = RenameListRequest {
            title: "t".repeat(MAX_TITLE_LEN as usize + 1),
        };
        assert!(rename.validate().is_err());

        let content = CreateTaskRequest {
            content: "c".repeat(MAX_CONTENT_LEN as usize),
        };
        assert!(content.validate().is_ok());

        let update = UpdateTaskRequest::content("c".repeat(MAX_CONTENT_LEN as usize + 1));
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_trimmed_strips_padding_before_validation() {
        let padded = CreateListRequest {
            title: format!("  {}  ", "a".repeat(MAX_TITLE_LEN as usize)),
        };
        assert!(padded.validate().is_err());
        let trimmed = padded.trimmed();
        assert_eq!(trimmed.title.len() as u64, MAX_TITLE_LEN);
        assert!(trimmed.validate().is_ok());

        let update = UpdateTaskRequest::content("  milk ").trimmed();
        assert_eq!(update.content.as_deref(), Some("milk"));
        assert!(UpdateTaskRequest::completed(true).trimmed().content.is_none());
    }

    #[test]
    fn test_update_request_omits_missing_fields() {
        let json = serde_json::to_value(UpdateTaskRequest::completed(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "completed": true }));

        let parsed: UpdateTaskRequest = serde_json::from_str(r#"{"content":"milk"}"#).unwrap();
        assert_eq!(parsed, UpdateTaskRequest::content("milk"));
        assert!(parsed.validate().is_ok());

        let empty: UpdateTaskRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
        assert!(empty.validate().is_ok());
    }

    #[test]
    fn test_list_deserializes_without_tasks() {
        let id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let json = serde_json::json!({
            "id": id,
            "user_id": user_id,
            "title": "Groceries",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
        });
        let list: TodoList = serde_json::from_value(json).unwrap();
        assert!(list.tasks.is_empty());
        assert_eq!(list.completed_count(), 0);
    }
}
