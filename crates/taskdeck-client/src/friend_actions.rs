//! Friend-relationship action layer.
//!
//! Four intents (send, accept, decline, remove), each following the same
//! sequence: backend call, then on success a toast, invalidation of exactly
//! the affected cached query sets, and an unconditional notification
//! refresh (friend actions may generate notifications server-side). A
//! failed mutation invalidates nothing and never touches notification
//! state.

use std::sync::{Arc, Mutex};

use tracing::debug;

use taskdeck_types::{
    AllRequestsResponse, FriendRequestCreate, FriendResponse, PendingRequestResponse, User,
};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::notification_store::NotificationStore;

/// Where user-visible action outcomes go (a toast in the UI, a log line in
/// the CLI, a capture buffer in tests).
pub trait ToastSink: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Logs outcomes through `tracing`; the default sink for headless use.
pub struct TracingToasts;

impl ToastSink for TracingToasts {
    fn success(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

// -- Query cache --

/// Lazily filled cached query sets. Invalidation empties a slot so the next
/// read refetches; reads already retry once and degrade to empty in the
/// endpoint layer.
#[derive(Default)]
pub struct FriendCache {
    friends: Mutex<Option<Vec<FriendResponse>>>,
    pending_requests: Mutex<Option<Vec<PendingRequestResponse>>>,
    sent_requests: Mutex<Option<Vec<PendingRequestResponse>>>,
    all_requests: Mutex<Option<AllRequestsResponse>>,
}

macro_rules! cached_fetch {
    ($self:ident, $slot:ident, $fetch:expr) => {{
        if let Some(cached) = $self.$slot.lock().unwrap().clone() {
            return cached;
        }
        let fresh = $fetch.await;
        *$self.$slot.lock().unwrap() = Some(fresh.clone());
        fresh
    }};
}

impl FriendCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn friends(&self, api: &ApiClient) -> Vec<FriendResponse> {
        cached_fetch!(self, friends, api.friends())
    }

    pub async fn pending_requests(&self, api: &ApiClient) -> Vec<PendingRequestResponse> {
        cached_fetch!(self, pending_requests, api.pending_requests())
    }

    pub async fn sent_requests(&self, api: &ApiClient) -> Vec<PendingRequestResponse> {
        cached_fetch!(self, sent_requests, api.sent_requests())
    }

    pub async fn all_requests(&self, api: &ApiClient) -> AllRequestsResponse {
        cached_fetch!(self, all_requests, api.all_requests())
    }

    pub fn invalidate_friends(&self) {
        *self.friends.lock().unwrap() = None;
    }

    pub fn invalidate_pending_requests(&self) {
        *self.pending_requests.lock().unwrap() = None;
    }

    pub fn invalidate_sent_requests(&self) {
        *self.sent_requests.lock().unwrap() = None;
    }

    pub fn invalidate_all_requests(&self) {
        *self.all_requests.lock().unwrap() = None;
    }

    pub fn is_friends_cached(&self) -> bool {
        self.friends.lock().unwrap().is_some()
    }

    pub fn is_pending_cached(&self) -> bool {
        self.pending_requests.lock().unwrap().is_some()
    }

    pub fn is_sent_cached(&self) -> bool {
        self.sent_requests.lock().unwrap().is_some()
    }

    pub fn is_all_cached(&self) -> bool {
        self.all_requests.lock().unwrap().is_some()
    }
}

// -- Actions --

#[derive(Debug, Clone, Default)]
struct SearchState {
    query: String,
    results: Vec<User>,
}

pub struct FriendActions {
    api: Arc<ApiClient>,
    cache: Arc<FriendCache>,
    notifications: Arc<NotificationStore>,
    toasts: Arc<dyn ToastSink>,
    search: Mutex<SearchState>,
}

impl FriendActions {
    pub fn new(
        api: Arc<ApiClient>,
        cache: Arc<FriendCache>,
        notifications: Arc<NotificationStore>,
        toasts: Arc<dyn ToastSink>,
    ) -> Self {
        Self {
            api,
            cache,
            notifications,
            toasts,
            search: Mutex::new(SearchState::default()),
        }
    }

    pub fn cache(&self) -> &Arc<FriendCache> {
        &self.cache
    }

    pub async fn send_request(&self, username: &str) -> Result<(), ApiError> {
        let body = FriendRequestCreate {
            username: username.to_string(),
        };
        match self.api.send_friend_request(&body).await {
            Ok(ack) => {
                self.toasts
                    .success(ack.message.as_deref().unwrap_or("Friend request sent!"));
                self.cache.invalidate_pending_requests();
                self.cache.invalidate_sent_requests();
                self.cache.invalidate_all_requests();
                self.notifications.refresh().await;
                self.clear_search();
                Ok(())
            }
            Err(e) => {
                self.toast_error(&e, "Failed to send friend request");
                Err(e)
            }
        }
    }

    pub async fn accept_request(&self, request_id: &str) -> Result<(), ApiError> {
        match self.api.accept_friend_request(request_id).await {
            Ok(ack) => {
                self.toasts
                    .success(ack.message.as_deref().unwrap_or("Friend request accepted!"));
                self.cache.invalidate_friends();
                self.cache.invalidate_pending_requests();
                self.cache.invalidate_all_requests();
                self.notifications.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.toast_error(&e, "Failed to accept friend request");
                Err(e)
            }
        }
    }

    pub async fn decline_request(&self, request_id: &str) -> Result<(), ApiError> {
        match self.api.decline_friend_request(request_id).await {
            Ok(ack) => {
                self.toasts
                    .success(ack.message.as_deref().unwrap_or("Friend request declined."));
                self.cache.invalidate_pending_requests();
                self.cache.invalidate_all_requests();
                self.notifications.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.toast_error(&e, "Failed to decline friend request");
                Err(e)
            }
        }
    }

    /// Confirmation-gated removal; `confirm` receives the prompt and gates
    /// dispatch. Declining the prompt is not an error.
    pub async fn remove_friend(
        &self,
        friend_id: &str,
        friend_name: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<(), ApiError> {
        let prompt = format!(
            "Are you sure you want to remove {} from your friends?",
            friend_name
        );
        if !confirm(&prompt) {
            debug!("friend removal cancelled at confirmation");
            return Ok(());
        }

        match self.api.remove_friend(friend_id).await {
            Ok(ack) => {
                self.toasts
                    .success(ack.message.as_deref().unwrap_or("Friend removed."));
                self.cache.invalidate_friends();
                self.notifications.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.toast_error(&e, "Failed to remove friend");
                Err(e)
            }
        }
    }

    // -- User search (feeds send_request; cleared after a confirmed send) --

    pub async fn search(&self, query: &str) -> Result<Vec<User>, ApiError> {
        let resp = self.api.search_friends(query).await?;
        let mut search = self.search.lock().unwrap();
        search.query = query.to_string();
        search.results = resp.users.clone();
        Ok(resp.users)
    }

    pub fn search_query(&self) -> String {
        self.search.lock().unwrap().query.clone()
    }

    pub fn search_results(&self) -> Vec<User> {
        self.search.lock().unwrap().results.clone()
    }

    pub fn clear_search(&self) {
        *self.search.lock().unwrap() = SearchState::default();
    }

    fn toast_error(&self, e: &ApiError, fallback: &str) {
        let message = e.to_string();
        if message.is_empty() {
            self.toasts.error(fallback);
        } else {
            self.toasts.error(&message);
        }
    }
}
