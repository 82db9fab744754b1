use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// -- Users & session --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Client-side session snapshot, persisted under the `auth-storage` key.
/// The backend owns authentication; the client only carries the bearer token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

// -- Notifications --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    FriendRequest,
    FriendAccept,
    FriendDecline,
    FriendRemovedByOther,
    FriendRemovedByYou,
    Deadline,
    Reminder,
    Overdue,
    TaskAssigned,
    TaskCompleted,
    /// Server may grow new categories; never fail a whole list decode on one.
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub priority: NotificationPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    /// Server-computed relative string ("5m", "2h", "now", ...), preferred
    /// by the display layer when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at_relative: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Notification-category toggles. Purely client-local: they gate UI only and
/// never filter what the backend sends. Persisted (settings only) under the
/// `notification-storage` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub friend_requests: bool,
    pub task_updates: bool,
    pub deadlines: bool,
    pub reminders: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            friend_requests: true,
            task_updates: true,
            deadlines: true,
            reminders: true,
        }
    }
}

/// Shallow-merge patch for [`NotificationSettings`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NotificationSettingsPatch {
    pub enabled: Option<bool>,
    pub friend_requests: Option<bool>,
    pub task_updates: Option<bool>,
    pub deadlines: Option<bool>,
    pub reminders: Option<bool>,
}

impl NotificationSettings {
    pub fn merged(self, patch: NotificationSettingsPatch) -> Self {
        Self {
            enabled: patch.enabled.unwrap_or(self.enabled),
            friend_requests: patch.friend_requests.unwrap_or(self.friend_requests),
            task_updates: patch.task_updates.unwrap_or(self.task_updates),
            deadlines: patch.deadlines.unwrap_or(self.deadlines),
            reminders: patch.reminders.unwrap_or(self.reminders),
        }
    }
}

// -- Friends --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDirection {
    Sent,
    Received,
}

/// An accepted friendship edge; `user` is the other party.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendResponse {
    pub id: String,
    pub user: User,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A friend request that has not been resolved yet. The client never computes
/// transitions on these edges itself; it refetches after the backend confirms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRequestResponse {
    pub id: String,
    pub user: User,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<RequestDirection>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllRequestsResponse {
    #[serde(default)]
    pub received: Vec<PendingRequestResponse>,
    #[serde(default)]
    pub sent: Vec<PendingRequestResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// -- Tasks --

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    #[default]
    Normal,
    Warning,
    Urgent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    #[serde(default)]
    pub priority: TaskPriority,
    pub board_id: String,
    pub creator_id: String,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub position: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

// -- Helpers --

/// Accept RFC 3339 or a bare `YYYY-MM-DDTHH:MM:SS[.f]` (assumed UTC); anything
/// unparseable decodes as None so one bad timestamp never sinks a list.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_datetime))
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
