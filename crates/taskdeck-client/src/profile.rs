//! Profile-picture endpoints. Uploads are multipart with field name `file`.

use taskdeck_types::{ActionMessage, ProfilePictureResponse};

use crate::error::ApiError;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn profile_picture(&self) -> Result<ProfilePictureResponse, ApiError> {
        self.get("/api/profile/profile-picture").await
    }

    pub async fn upload_profile_picture(
        &self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<ProfilePictureResponse, ApiError> {
        self.post_file("/api/profile/upload-profile-picture", bytes, filename)
            .await
    }

    pub async fn change_profile_picture(
        &self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<ProfilePictureResponse, ApiError> {
        self.put_file("/api/profile/profile-picture", bytes, filename)
            .await
    }

    pub async fn delete_profile_picture(&self) -> Result<ActionMessage, ApiError> {
        self.delete("/api/profile/profile-picture").await
    }
}
