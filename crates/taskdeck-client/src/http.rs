//! Authenticated HTTP wrapper around the backend.
//!
//! Every request attaches `Authorization: Bearer <token>` when a token is
//! present. Any 401 response tears the session token down (memory and
//! durable copy) before the error surfaces — no request handler may leave a
//! stale invalid token in place.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use taskdeck_types::ListEnvelope;

use crate::error::{ApiError, extract_error_message};
use crate::session::SessionStore;

pub struct ApiClient {
    http: Client,
    base_url: String,
    pub(crate) session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => req.header("Authorization", format!("Bearer {}", token)),
            None => req,
        }
    }

    // -- JSON verbs --

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.http.get(self.url(path))).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.http.post(self.url(path))).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.http.post(self.url(path)).json(body)).await
    }

    pub(crate) async fn put<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.http.put(self.url(path))).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.http.put(self.url(path)).json(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.http.delete(self.url(path))).await
    }

    // -- File verbs (multipart, field name `file`, no JSON content-type) --

    pub(crate) async fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<T, ApiError> {
        let form = file_form(bytes, filename);
        self.execute(self.http.post(self.url(path)).multipart(form))
            .await
    }

    pub(crate) async fn put_file<T: DeserializeOwned>(
        &self,
        path: &str,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<T, ApiError> {
        let form = file_form(bytes, filename);
        self.execute(self.http.put(self.url(path)).multipart(form))
            .await
    }

    // -- Shared plumbing --

    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let resp = self.authorized(req).send().await?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            // Global invariant: 401 from any endpoint category is fatal to
            // the session.
            self.session.clear_token();
            let body: Value = resp.json().await.unwrap_or_default();
            let message = body
                .get("detail")
                .and_then(Value::as_str)
                .unwrap_or("Authentication failed")
                .to_string();
            warn!("401 response, session token cleared");
            return Err(ApiError::Unauthorized(message));
        }

        if !status.is_success() {
            let body: Value = resp.json().await.unwrap_or_default();
            let message = extract_error_message(status.as_u16(), &body);
            debug!("request failed ({}): {}", status, message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<T>().await.map_err(ApiError::Network)
    }

    /// Read path for list endpoints: retry once and normalize the envelope.
    pub(crate) async fn get_list_checked<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, ApiError> {
        match self.get::<ListEnvelope<T>>(path).await {
            Ok(envelope) => Ok(envelope.into_vec()),
            Err(first) => {
                debug!("list fetch {} failed, retrying once: {}", path, first);
                self.get::<ListEnvelope<T>>(path)
                    .await
                    .map(ListEnvelope::into_vec)
            }
        }
    }

    /// Like [`get_list_checked`](Self::get_list_checked) but degrades to
    /// empty. The UI must never hard-fail on a failed list fetch.
    pub(crate) async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Vec<T> {
        self.get_list_checked(path).await.unwrap_or_else(|e| {
            warn!("list fetch {} failed after retry: {}", path, e);
            Vec::new()
        })
    }
}

fn file_form(bytes: Vec<u8>, filename: &str) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
    reqwest::multipart::Form::new().part("file", part)
}
