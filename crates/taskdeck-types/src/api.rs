use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{TaskPriority, User};

// -- Auth --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

// -- Friends --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestCreate {
    pub username: String,
}

/// Generic `{message}` ack returned by friend and task mutation endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// -- Notifications --

/// The unread counter comes back as `unread_count` or `count` depending on
/// backend version; any other shape counts as zero.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UnreadCountResponse {
    #[serde(default)]
    pub unread_count: Option<u64>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl UnreadCountResponse {
    pub fn value(&self) -> u64 {
        self.unread_count.or(self.count).unwrap_or(0)
    }
}

// -- Tasks --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreate {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    pub priority: TaskPriority,
    pub board_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAssignee {
    pub user_id: String,
    pub role: String,
}

// -- Profile --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePictureResponse {
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unread_count_accepts_both_field_names() {
        let a: UnreadCountResponse = serde_json::from_str(r#"{"unread_count": 4}"#).unwrap();
        assert_eq!(a.value(), 4);

        let b: UnreadCountResponse = serde_json::from_str(r#"{"count": 7}"#).unwrap();
        assert_eq!(b.value(), 7);

        let c: UnreadCountResponse = serde_json::from_str(r#"{"whatever": true}"#).unwrap();
        assert_eq!(c.value(), 0);
    }

    #[test]
    fn task_update_skips_unset_fields() {
        let patch = TaskUpdate {
            status: Some("Done".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"status":"Done"}"#
        );
    }
}
