//! Fixed-interval polling.
//!
//! Stamps a shared reference instant every period so the UI can recompute
//! relative times, and optionally refreshes the unread counter. It never
//! touches notification contents, so it cannot race fetch or mutate
//! operations into a corrupt state.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use crate::notification_store::NotificationStore;

pub const TICK_INTERVAL: Duration = Duration::from_secs(10);

pub struct Ticker {
    reference_millis: Arc<AtomicI64>,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn with the standard 10-second period.
    pub fn spawn(store: Option<Arc<NotificationStore>>) -> Self {
        Self::spawn_every(TICK_INTERVAL, store)
    }

    pub fn spawn_every(period: Duration, store: Option<Arc<NotificationStore>>) -> Self {
        let reference_millis = Arc::new(AtomicI64::new(Utc::now().timestamp_millis()));
        let stamp = reference_millis.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick fires immediately; the spawn call already
            // stamped, so consume it.
            interval.tick().await;
            loop {
                interval.tick().await;
                stamp.store(Utc::now().timestamp_millis(), Ordering::Relaxed);
                if let Some(store) = &store {
                    store.fetch_unread_count().await;
                }
            }
        });

        Self {
            reference_millis,
            handle,
        }
    }

    /// Reference instant for relative-time formatting, updated once per tick.
    pub fn reference(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.reference_millis.load(Ordering::Relaxed))
            .unwrap_or_else(Utc::now)
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
