//! Task and board endpoints. The backend is authoritative; the client holds
//! a working copy per dashboard session and refetches on board change.

use std::sync::Arc;

use taskdeck_types::{ActionMessage, MoveTask, Task, TaskAssignee, TaskCreate, TaskUpdate, User};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::storage::Storage;

impl ApiClient {
    pub async fn board_tasks(&self, board_id: &str) -> Vec<Task> {
        self.get_list(&format!("/api/tasks/board/{}", board_id)).await
    }

    pub async fn task(&self, task_id: &str) -> Result<Task, ApiError> {
        self.get(&format!("/api/tasks/{}", task_id)).await
    }

    pub async fn create_task(&self, task: &TaskCreate) -> Result<Task, ApiError> {
        self.post_json("/api/tasks/", task).await
    }

    pub async fn update_task(&self, task_id: &str, patch: &TaskUpdate) -> Result<Task, ApiError> {
        self.put_json(&format!("/api/tasks/{}", task_id), patch).await
    }

    pub async fn delete_task(&self, task_id: &str) -> Result<ActionMessage, ApiError> {
        self.delete(&format!("/api/tasks/{}", task_id)).await
    }

    pub async fn move_task(&self, task_id: &str, mv: &MoveTask) -> Result<ActionMessage, ApiError> {
        self.post_json(&format!("/api/tasks/{}/move", task_id), mv).await
    }

    pub async fn assign_user(
        &self,
        task_id: &str,
        assignee: &TaskAssignee,
    ) -> Result<ActionMessage, ApiError> {
        self.post_json(&format!("/api/tasks/{}/assignees", task_id), assignee)
            .await
    }

    pub async fn remove_assignee(
        &self,
        task_id: &str,
        user_id: &str,
    ) -> Result<ActionMessage, ApiError> {
        self.delete(&format!("/api/tasks/{}/assignees/{}", task_id, user_id))
            .await
    }

    pub async fn task_assignees(&self, task_id: &str) -> Vec<User> {
        self.get_list(&format!("/api/tasks/{}/assignees", task_id)).await
    }
}

/// One board per user. The board id defaults to the user id and is cached in
/// durable storage under `board_id_<user_id>`.
pub fn board_id_for(storage: &Arc<dyn Storage>, user_id: &str) -> String {
    let key = board_key(user_id);
    if let Some(cached) = storage.get(&key) {
        return cached;
    }
    storage.set(&key, user_id);
    user_id.to_string()
}

pub fn set_board_id(storage: &Arc<dyn Storage>, user_id: &str, board_id: &str) {
    storage.set(&board_key(user_id), board_id);
}

fn board_key(user_id: &str) -> String {
    format!("board_id_{}", user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn board_id_defaults_to_user_id_and_sticks() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        assert_eq!(board_id_for(&storage, "u1"), "u1");

        set_board_id(&storage, "u1", "shared-board");
        assert_eq!(board_id_for(&storage, "u1"), "shared-board");

        // Other users are unaffected.
        assert_eq!(board_id_for(&storage, "u2"), "u2");
    }
}
