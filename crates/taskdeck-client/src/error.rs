use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never reached the server (DNS, connect, TLS, body I/O).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Any 401. The HTTP wrapper has already torn the session down by the
    /// time this surfaces.
    #[error("{0}")]
    Unauthorized(String),

    /// Non-2xx with a message extracted from the response body.
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network(_) => None,
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Api { status, .. } => Some(*status),
        }
    }
}

/// Pull a human-readable message out of an error body, in priority order:
/// `detail` (flattening array-shaped validation errors), `message`, `error`,
/// then a generic fallback keyed on 422.
pub fn extract_error_message(status: u16, body: &Value) -> String {
    if let Some(detail) = body.get("detail") {
        match detail {
            Value::String(s) if !s.is_empty() => return s.clone(),
            Value::Array(items) if !items.is_empty() => {
                let joined = items
                    .iter()
                    .filter_map(|item| {
                        item.get("msg")
                            .or_else(|| item.get("message"))
                            .and_then(Value::as_str)
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                if !joined.is_empty() {
                    return joined;
                }
            }
            _ => {}
        }
    }

    for key in ["message", "error"] {
        if let Some(s) = body.get(key).and_then(Value::as_str) {
            if !s.is_empty() {
                return s.to_string();
            }
        }
    }

    if status == 422 {
        "Validation failed".to_string()
    } else {
        "Request failed".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_string_wins() {
        let body = json!({"detail": "User not found", "message": "ignored"});
        assert_eq!(extract_error_message(404, &body), "User not found");
    }

    #[test]
    fn detail_array_is_flattened() {
        let body = json!({"detail": [
            {"msg": "email is invalid"},
            {"message": "password too short"},
        ]});
        assert_eq!(
            extract_error_message(422, &body),
            "email is invalid, password too short"
        );
    }

    #[test]
    fn message_then_error_fallbacks() {
        assert_eq!(
            extract_error_message(400, &json!({"message": "Bad request"})),
            "Bad request"
        );
        assert_eq!(
            extract_error_message(500, &json!({"error": "boom"})),
            "boom"
        );
    }

    #[test]
    fn generic_fallbacks() {
        assert_eq!(extract_error_message(422, &json!({})), "Validation failed");
        assert_eq!(extract_error_message(500, &json!({})), "Request failed");
        // Array of items without msg/message still falls back.
        assert_eq!(
            extract_error_message(422, &json!({"detail": [{"loc": ["body"]}]})),
            "Validation failed"
        );
    }
}
