//! Polled client-side notification cache.
//!
//! Server order is preserved; the server call is always awaited before any
//! local mutation, so the cache never reflects a state the server rejected.
//! After every local mutation the unread count is recomputed from the held
//! list (never decremented), keeping it equal to the number of unread items.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use taskdeck_types::{Notification, NotificationSettings, NotificationSettingsPatch};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::notifications::DEFAULT_PAGE_SIZE;
use crate::storage::Storage;

pub const NOTIFICATION_STORAGE_KEY: &str = "notification-storage";

#[derive(Debug, Default)]
struct State {
    notifications: Vec<Notification>,
    settings: NotificationSettings,
    unread_count: u64,
    has_new_notifications: bool,
    is_loading: bool,
    deleting_notification_id: Option<String>,
}

pub struct NotificationStore {
    api: Arc<ApiClient>,
    storage: Arc<dyn Storage>,
    state: Mutex<State>,
    /// Monotonic fetch generation: a fetch only installs its result if no
    /// newer fetch started while it was in flight.
    fetch_generation: AtomicU64,
    /// One-shot guard for the per-session summary toast.
    toast_shown: AtomicBool,
}

impl NotificationStore {
    pub fn new(api: Arc<ApiClient>, storage: Arc<dyn Storage>) -> Self {
        let settings = storage
            .get(NOTIFICATION_STORAGE_KEY)
            .and_then(|raw| serde_json::from_str::<NotificationSettings>(&raw).ok())
            .unwrap_or_default();

        Self {
            api,
            storage,
            state: Mutex::new(State {
                settings,
                ..State::default()
            }),
            fetch_generation: AtomicU64::new(0),
            toast_shown: AtomicBool::new(false),
        }
    }

    // -- Snapshots --

    pub fn notifications(&self) -> Vec<Notification> {
        self.state.lock().unwrap().notifications.clone()
    }

    pub fn unread_count(&self) -> u64 {
        self.state.lock().unwrap().unread_count
    }

    pub fn settings(&self) -> NotificationSettings {
        self.state.lock().unwrap().settings
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().is_loading
    }

    pub fn has_new_notifications(&self) -> bool {
        self.state.lock().unwrap().has_new_notifications
    }

    /// Id of the at-most-one delete currently in flight, for disabling that
    /// item's delete control.
    pub fn deleting_notification_id(&self) -> Option<String> {
        self.state.lock().unwrap().deleting_notification_id.clone()
    }

    // -- Fetching --

    /// Replace the local list with one page from the server. On failure the
    /// prior list stays and only the loading flag clears. A response is
    /// discarded if a newer fetch started while it was in flight.
    pub async fn fetch_notifications(&self) {
        let generation = self.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.lock().unwrap().is_loading = true;

        let result = self.api.try_notifications(DEFAULT_PAGE_SIZE, 0).await;

        let mut state = self.state.lock().unwrap();
        state.is_loading = false;
        match result {
            Ok(notifications) => {
                if self.fetch_generation.load(Ordering::SeqCst) == generation {
                    state.notifications = notifications;
                } else {
                    debug!("discarding stale notification fetch (gen {})", generation);
                }
            }
            Err(e) => debug!("notification fetch failed: {}", e),
        }
    }

    /// Server-computed unread count; any failure resets to 0 rather than
    /// leaving a stale positive value.
    pub async fn fetch_unread_count(&self) {
        let count = self.api.unread_count().await;
        self.state.lock().unwrap().unread_count = count;
    }

    /// List then count; the friend-action layer calls this after every
    /// confirmed mutation.
    pub async fn refresh(&self) {
        self.fetch_notifications().await;
        self.fetch_unread_count().await;
    }

    // -- Mutations (server-confirmed first, then local) --

    pub async fn mark_as_read(&self, id: &str) -> Result<(), ApiError> {
        self.api.mark_notification_read(id).await?;

        let mut state = self.state.lock().unwrap();
        if let Some(item) = state.notifications.iter_mut().find(|n| n.id == id) {
            item.is_read = true;
        }
        state.unread_count = recount(&state.notifications);
        Ok(())
    }

    /// "All" is cheaper to resync than to replicate locally: confirm with
    /// the backend, then refetch list and count.
    pub async fn mark_all_as_read(&self) -> Result<(), ApiError> {
        self.api.mark_all_notifications_read().await?;
        self.refresh().await;
        Ok(())
    }

    pub async fn remove_notification(&self, id: &str) -> Result<(), ApiError> {
        self.state.lock().unwrap().deleting_notification_id = Some(id.to_string());

        match self.api.delete_notification(id).await {
            Ok(_) => {
                let mut state = self.state.lock().unwrap();
                state.notifications.retain(|n| n.id != id);
                state.unread_count = recount(&state.notifications);
                state.deleting_notification_id = None;
                Ok(())
            }
            Err(e) => {
                // The item must reappear interactable.
                self.state.lock().unwrap().deleting_notification_id = None;
                Err(e)
            }
        }
    }

    /// Server-side clear-all, then local reset.
    pub async fn clear_all_remote(&self) -> Result<(), ApiError> {
        self.api.clear_all_notifications().await?;
        self.clear_all();
        Ok(())
    }

    /// Local reset of list, count, and the new-notifications flag.
    pub fn clear_all(&self) {
        let mut state = self.state.lock().unwrap();
        state.notifications.clear();
        state.unread_count = 0;
        state.has_new_notifications = false;
    }

    /// Full teardown to defaults (logout path). Persisted settings reset too.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap();
        *state = State::default();
        self.persist_settings(&state.settings);
        self.toast_shown.store(false, Ordering::SeqCst);
    }

    // -- Settings --

    /// Shallow-merge and persist (settings are the only persisted slice).
    pub fn update_settings(&self, patch: NotificationSettingsPatch) {
        let mut state = self.state.lock().unwrap();
        state.settings = state.settings.merged(patch);
        self.persist_settings(&state.settings);
    }

    // -- Session-scoped toast flags --

    pub fn set_has_new_notifications(&self, has_new: bool) {
        self.state.lock().unwrap().has_new_notifications = has_new;
    }

    /// Clears only the toast flag, not the numeric count, so the summary
    /// toast does not reappear once dismissed.
    pub fn reset_unread_count(&self) {
        self.state.lock().unwrap().has_new_notifications = false;
    }

    /// One-shot session summary ("You have N new notifications!"). Returns
    /// the message at most once per session, and only while the flag is set
    /// and something is actually unread.
    pub fn pop_new_notifications_toast(&self) -> Option<String> {
        let mut state = self.state.lock().unwrap();
        if !state.has_new_notifications || state.unread_count == 0 {
            return None;
        }
        if self.toast_shown.swap(true, Ordering::SeqCst) {
            return None;
        }
        state.has_new_notifications = false;
        let n = state.unread_count;
        Some(format!(
            "You have {} new notification{}!",
            n,
            if n > 1 { "s" } else { "" }
        ))
    }

    fn persist_settings(&self, settings: &NotificationSettings) {
        match serde_json::to_string(settings) {
            Ok(raw) => self.storage.set(NOTIFICATION_STORAGE_KEY, &raw),
            Err(e) => tracing::warn!("failed to serialize notification settings: {}", e),
        }
    }
}

fn recount(notifications: &[Notification]) -> u64 {
    notifications.iter().filter(|n| !n.is_read).count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_types::{NotificationPriority, NotificationType};

    fn item(id: &str, is_read: bool) -> Notification {
        Notification {
            id: id.into(),
            user_id: "u1".into(),
            kind: NotificationType::Reminder,
            title: "t".into(),
            message: "m".into(),
            priority: NotificationPriority::Medium,
            action_url: None,
            metadata: None,
            is_read,
            created_at: None,
            created_at_relative: None,
            updated_at: None,
        }
    }

    #[test]
    fn recount_counts_unread_only() {
        let items = vec![item("1", false), item("2", true), item("3", false)];
        assert_eq!(recount(&items), 2);
        assert_eq!(recount(&[]), 0);
    }
}
