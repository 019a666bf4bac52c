use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The backend answered with an error status. `message` is the provider's own text.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Failed to reach the backend: {0}")]
    Http(String),

    #[error("Unexpected response from the backend: {0}")]
    Decode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl StoreError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        StoreError::Api {
            status,
            message: message.into(),
        }
    }

    /// Build an error from a failed response, preferring the message fields the
    /// auth and REST services put in their JSON bodies.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| {
                ["msg", "message", "error_description", "error"]
                    .iter()
                    .find_map(|key| json.get(*key).and_then(Value::as_str).map(str::to_owned))
            })
            .or_else(|| {
                let body = body.trim();
                (!body.is_empty()).then(|| body.to_string())
            })
            .unwrap_or_else(|| format!("Request failed with status {status}"));

        StoreError::Api { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the caller's token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

#[cfg(feature = "remote")]
impl From<reqwest::Error> for StoreError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            StoreError::Decode(error.to_string())
        } else {
            StoreError::Http(error.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        StoreError::Decode(error.to_string())
    }
}

#[cfg(feature = "remote")]
impl From<config::ConfigError> for StoreError {
    fn from(error: config::ConfigError) -> Self {
        StoreError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_error_message() {
        let body = r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#;
        let error = StoreError::from_response(406, body);

        assert_eq!(
            error.to_string(),
            "JSON object requested, multiple (or no) rows returned"
        );
        assert_eq!(error.status(), Some(406));
    }

    #[test]
    fn test_auth_error_message() {
        let body = r#"{"code":400,"error_code":"user_already_exists","msg":"User already registered"}"#;
        assert_eq!(
            StoreError::from_response(400, body).to_string(),
            "User already registered"
        );

        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(
            StoreError::from_response(400, body).to_string(),
            "Invalid login credentials"
        );
    }

    #[test]
    fn test_plain_and_empty_bodies() {
        assert_eq!(
            StoreError::from_response(502, "Bad gateway\n").to_string(),
            "Bad gateway"
        );
        assert_eq!(
            StoreError::from_response(503, "").to_string(),
            "Request failed with status 503"
        );
    }

    #[test]
    fn test_unauthorized() {
        assert!(StoreError::api(401, "invalid JWT").is_unauthorized());
        assert!(StoreError::api(403, "bad_jwt").is_unauthorized());
        assert!(!StoreError::api(500, "boom").is_unauthorized());
        assert!(!StoreError::Http("timeout".into()).is_unauthorized());
    }
}
