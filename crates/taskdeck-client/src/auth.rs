//! Auth endpoints. Sign-in and sign-up store the returned token and user in
//! the session; logout clears the session only after the backend confirms.

use rand::Rng;
use tracing::info;

use taskdeck_types::{AuthResponse, LogoutResponse, SignInRequest, SignUpRequest, User};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Shown after a confirmed sign-out; one is picked at random.
const SIGN_OFF_MESSAGES: &[&str] = &[
    "You have been logged out",
    "You've successfully logged out",
    "See you later! You're now logged out",
    "You're now logged out. Come back soon!",
    "You have been signed out",
    "You've been signed out. See you next time!",
    "You're now signed out. Have a great day!",
];

impl ApiClient {
    pub async fn sign_up(&self, req: &SignUpRequest) -> Result<AuthResponse, ApiError> {
        let resp: AuthResponse = self.post_json("/api/auth/signup", req).await?;
        self.store_session(&resp);
        Ok(resp)
    }

    pub async fn sign_in(&self, req: &SignInRequest) -> Result<AuthResponse, ApiError> {
        let resp: AuthResponse = self.post_json("/api/auth/signin", req).await?;
        self.store_session(&resp);
        Ok(resp)
    }

    /// Confirmed logout: backend first, then full session teardown. Returns
    /// a sign-off message for the caller to surface.
    pub async fn log_out(&self) -> Result<String, ApiError> {
        let _: LogoutResponse = self.post("/api/auth/logout").await?;
        self.session.logout();
        info!("signed out");
        Ok(sign_off_message())
    }

    pub async fn fetch_me(&self) -> Result<User, ApiError> {
        self.get("/api/auth/me").await
    }

    fn store_session(&self, resp: &AuthResponse) {
        self.session.set_token(&resp.access_token);
        self.session.set_user(resp.user.clone());
        info!("signed in as {}", resp.user.id);
    }
}

fn sign_off_message() -> String {
    let idx = rand::rng().random_range(0..SIGN_OFF_MESSAGES.len());
    SIGN_OFF_MESSAGES[idx].to_string()
}
