//! Notification endpoints. The store layer above owns local state; these
//! calls only move bytes.

use taskdeck_types::{ActionMessage, Notification, UnreadCountResponse};

use crate::error::ApiError;
use crate::http::ApiClient;

pub const DEFAULT_PAGE_SIZE: u32 = 50;

impl ApiClient {
    pub async fn notifications(&self, limit: u32, offset: u32) -> Vec<Notification> {
        self.try_notifications(limit, offset).await.unwrap_or_default()
    }

    /// Fallible variant for callers that must distinguish "empty" from
    /// "fetch failed" (the store keeps its prior list on failure).
    pub async fn try_notifications(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Notification>, ApiError> {
        self.get_list_checked(&format!("/api/notifications/?limit={}&offset={}", limit, offset))
            .await
    }

    /// Server-computed unread count; 0 on any failure or unknown shape
    /// (prefer under-counting to over-counting on error).
    pub async fn unread_count(&self) -> u64 {
        match self
            .get::<UnreadCountResponse>("/api/notifications/unread/count")
            .await
        {
            Ok(resp) => resp.value(),
            Err(e) => {
                tracing::debug!("unread-count fetch failed: {}", e);
                0
            }
        }
    }

    pub async fn mark_notification_read(&self, id: &str) -> Result<ActionMessage, ApiError> {
        self.put(&format!("/api/notifications/{}/read", id)).await
    }

    pub async fn mark_all_notifications_read(&self) -> Result<ActionMessage, ApiError> {
        self.put("/api/notifications/read/all").await
    }

    pub async fn delete_notification(&self, id: &str) -> Result<ActionMessage, ApiError> {
        self.delete(&format!("/api/notifications/{}", id)).await
    }

    pub async fn clear_all_notifications(&self) -> Result<ActionMessage, ApiError> {
        self.delete("/api/notifications/clear-all").await
    }
}
