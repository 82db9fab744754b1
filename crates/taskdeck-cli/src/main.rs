use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use taskdeck_client::{
    ApiClient, FileStorage, FriendActions, FriendCache, NotificationStore, SessionStore, Storage,
    friend_actions::TracingToasts, tasks, timefmt,
};
use taskdeck_types::SignInRequest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck=debug".into()),
        )
        .init();

    // Config
    let base_url =
        std::env::var("TASKDECK_API_BASE").unwrap_or_else(|_| "http://localhost:8000".into());
    let data_dir = std::env::var("TASKDECK_DATA_DIR").unwrap_or_else(|_| ".taskdeck".into());

    // Services
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(PathBuf::from(data_dir)));
    let session = Arc::new(SessionStore::new(storage.clone()));
    let api = Arc::new(ApiClient::new(base_url, session.clone()));
    let notifications = Arc::new(NotificationStore::new(api.clone(), storage.clone()));
    let friends = FriendActions::new(
        api.clone(),
        Arc::new(FriendCache::new()),
        notifications.clone(),
        Arc::new(TracingToasts),
    );

    // Sign in when credentials are provided and no session is persisted.
    if !session.is_authenticated() {
        let email = std::env::var("TASKDECK_EMAIL")
            .map_err(|_| anyhow::anyhow!("no persisted session and TASKDECK_EMAIL not set"))?;
        let password = std::env::var("TASKDECK_PASSWORD")
            .map_err(|_| anyhow::anyhow!("no persisted session and TASKDECK_PASSWORD not set"))?;
        api.sign_in(&SignInRequest { email, password }).await?;
    }

    let me = api.fetch_me().await?;
    info!("signed in as {} <{}>", me.username.as_deref().unwrap_or("?"), me.email);

    // One sync pass: notifications, friends, board.
    notifications.refresh().await;
    notifications.set_has_new_notifications(true);
    if let Some(toast) = notifications.pop_new_notifications_toast() {
        println!("{}", toast);
    }

    let reference = chrono::Utc::now();
    for n in notifications.notifications() {
        let marker = if n.is_read { " " } else { "*" };
        println!(
            "{} [{}] {} — {}",
            marker,
            timefmt::format_notification_time(&n, reference),
            n.title,
            n.message
        );
    }
    println!("unread: {}", notifications.unread_count());

    let friend_list = friends.cache().friends(&api).await;
    println!("friends: {}", friend_list.len());
    for f in friend_list {
        println!("  {}", f.user.username.as_deref().unwrap_or(&f.user.email));
    }

    let board_id = tasks::board_id_for(&storage, &me.id);
    let board = api.board_tasks(&board_id).await;
    println!("board {}: {} tasks", board_id, board.len());

    Ok(())
}
