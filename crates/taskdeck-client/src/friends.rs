//! Friend endpoints. List reads degrade to empty (with one retry) so the UI
//! never hard-fails; mutations propagate a typed error for the action layer
//! to surface.

use taskdeck_types::{
    ActionMessage, AllRequestsResponse, FriendRequestCreate, FriendResponse,
    PendingRequestResponse, SearchResponse,
};

use crate::error::ApiError;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn friends(&self) -> Vec<FriendResponse> {
        self.get_list("/api/friends/").await
    }

    pub async fn pending_requests(&self) -> Vec<PendingRequestResponse> {
        self.get_list("/api/friends/requests/pending").await
    }

    pub async fn sent_requests(&self) -> Vec<PendingRequestResponse> {
        self.get_list("/api/friends/requests/sent").await
    }

    pub async fn all_requests(&self) -> AllRequestsResponse {
        match self.get::<AllRequestsResponse>("/api/friends/requests/all").await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("all-requests fetch failed: {}", e);
                AllRequestsResponse {
                    status: Some("error".into()),
                    ..Default::default()
                }
            }
        }
    }

    pub async fn send_friend_request(
        &self,
        req: &FriendRequestCreate,
    ) -> Result<ActionMessage, ApiError> {
        self.post_json("/api/friends/request", req).await
    }

    pub async fn accept_friend_request(&self, request_id: &str) -> Result<ActionMessage, ApiError> {
        self.post(&format!("/api/friends/requests/{}/accept", request_id))
            .await
    }

    pub async fn decline_friend_request(
        &self,
        request_id: &str,
    ) -> Result<ActionMessage, ApiError> {
        self.post(&format!("/api/friends/requests/{}/decline", request_id))
            .await
    }

    pub async fn remove_friend(&self, friend_id: &str) -> Result<ActionMessage, ApiError> {
        self.delete(&format!("/api/friends/{}", friend_id)).await
    }

    pub async fn search_friends(&self, query: &str) -> Result<SearchResponse, ApiError> {
        self.get(&format!(
            "/api/friends/search?query={}",
            percent_encode(query)
        ))
        .await
    }
}

/// Minimal query-component percent-encoding (unreserved characters pass).
fn percent_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
