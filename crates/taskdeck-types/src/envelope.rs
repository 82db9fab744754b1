//! Tolerant list-response envelope.
//!
//! List endpoints may return a bare array or an object wrapping the array
//! under `data` or an endpoint-specific field name. The envelope is decoded
//! exactly once here; call sites only ever see a `Vec<T>`.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Keyed(KeyedList<T>),
    /// Anything else (null, an error object, a scalar) normalizes to empty.
    Other(serde_json::Value),
}

#[derive(Debug, Default, Deserialize)]
pub struct KeyedList<T> {
    #[serde(default = "none")]
    pub notifications: Option<Vec<T>>,
    #[serde(default = "none")]
    pub friends: Option<Vec<T>>,
    #[serde(default = "none")]
    pub requests: Option<Vec<T>>,
    #[serde(default = "none")]
    pub tasks: Option<Vec<T>>,
    #[serde(default = "none")]
    pub assignees: Option<Vec<T>>,
    #[serde(default = "none")]
    pub data: Option<Vec<T>>,
}

// `#[serde(default)]` requires T: Default through the derive; sidestep it.
fn none<T>() -> Option<T> {
    None
}

impl<T> ListEnvelope<T> {
    /// Named field first, `data` as the generic fallback, empty otherwise.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) => items,
            ListEnvelope::Keyed(keyed) => keyed
                .notifications
                .or(keyed.friends)
                .or(keyed.requests)
                .or(keyed.tasks)
                .or(keyed.assignees)
                .or(keyed.data)
                .unwrap_or_default(),
            ListEnvelope::Other(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Vec<u32> {
        serde_json::from_str::<ListEnvelope<u32>>(json)
            .unwrap()
            .into_vec()
    }

    #[test]
    fn bare_array() {
        assert_eq!(decode("[1,2,3]"), vec![1, 2, 3]);
    }

    #[test]
    fn data_field_matches_bare() {
        assert_eq!(decode(r#"{"data":[1,2,3]}"#), decode("[1,2,3]"));
    }

    #[test]
    fn named_field_wins_over_data() {
        assert_eq!(decode(r#"{"requests":[9],"data":[1]}"#), vec![9]);
    }

    #[test]
    fn unrecognized_shapes_are_empty() {
        assert!(decode("null").is_empty());
        assert!(decode(r#"{"error":"nope"}"#).is_empty());
        assert!(decode("42").is_empty());
    }
}
