pub mod auth;
pub mod error;
pub mod friend_actions;
pub mod friends;
pub mod http;
pub mod notification_store;
pub mod notifications;
pub mod profile;
pub mod session;
pub mod storage;
pub mod tasks;
pub mod ticker;
pub mod timefmt;

pub use error::ApiError;
pub use friend_actions::{FriendActions, FriendCache, ToastSink};
pub use http::ApiClient;
pub use notification_store::NotificationStore;
pub use session::SessionStore;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use ticker::Ticker;
