use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - token may be expired or invalid")]
    Unauthorized { body: String },

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// Bound an error body for keeping. An oversized JSON body is cut down to its
    /// `message` field so that `server_message` still finds it.
    fn shorten_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        match Self::message_in(body) {
            Some(message) => {
                serde_json::json!({ "message": Self::truncate_body(&message) }).to_string()
            }
            None => Self::truncate_body(body),
        }
    }

    fn message_in(body: &str) -> Option<String> {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()?
            .get("message")?
            .as_str()
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::shorten_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized { body: truncated },
            403 => ApiError::AccessDenied(truncated),
            404 => ApiError::NotFound(truncated),
            500..=599 => ApiError::ServerError(truncated),
            code => ApiError::Status {
                status: code,
                body: truncated,
            },
        }
    }

    /// HTTP status behind this error, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::AccessDenied(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::NetworkError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The backend's human-readable `message` field, if the error body carried one
    pub fn server_message(&self) -> Option<String> {
        let body = match self {
            ApiError::Unauthorized { body }
            | ApiError::AccessDenied(body)
            | ApiError::NotFound(body)
            | ApiError::ServerError(body)
            | ApiError::Status { body, .. } => body,
            _ => return None,
        };
        Self::message_in(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, "no"),
            ApiError::AccessDenied(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, ""),
            ApiError::ServerError(_)
        ));
        let err = ApiError::from_status(StatusCode::CONFLICT, "dup");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn test_server_message() {
        let body = r#"{"message":"Invalid Google token"}"#;
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, body);
        assert_eq!(err.server_message().as_deref(), Some("Invalid Google token"));

        let plain = ApiError::from_status(StatusCode::BAD_REQUEST, "<html>oops</html>");
        assert_eq!(plain.server_message(), None);
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "x".repeat(MAX_ERROR_BODY_LENGTH + 10);
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn test_long_json_body_keeps_message() {
        let body = serde_json::json!({
            "message": "Invalid Google token",
            "trace": "x".repeat(MAX_ERROR_BODY_LENGTH * 2),
        })
        .to_string();
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, &body);

        assert_eq!(err.server_message().as_deref(), Some("Invalid Google token"));
        assert!(err.to_string().len() < body.len());
    }
}
