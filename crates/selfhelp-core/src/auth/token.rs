//! JWT payload decoding.
//!
//! Only reads the claims segment to fill in profile fields. The signature is
//! never checked here; the backend remains the authority on every request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::models::{UserId, UserInfoHint, UserProfile};

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Malformed token: no payload segment")]
    MalformedToken,

    #[error("Invalid base64 in token payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid JSON in token payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Token payload has no email claim")]
    MissingEmail,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "userId", default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    pub fn into_profile(self) -> Result<UserProfile, TokenError> {
        let email = self
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or(TokenError::MissingEmail)?;
        let hint = UserInfoHint {
            email,
            name: self.name,
            image_url: None,
        };
        Ok(UserProfile::from_hint(hint, self.role, self.user_id))
    }
}

/// Decode the claims of `header.payload.signature` without verifying it
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|p| !p.is_empty())
        .ok_or(TokenError::MalformedToken)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
pub(crate) fn encode_test_token(claims: &serde_json::Value) -> String {
    format!(
        "eyJhbGciOiJIUzI1NiJ9.{}.signature",
        URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_claims() {
        let token = encode_test_token(&json!({
            "email": "jane@example.com",
            "userId": 12,
            "role": "ADMIN",
            "exp": 1_700_000_000
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.email.as_deref(), Some("jane@example.com"));
        assert_eq!(claims.user_id, Some(UserId::Number(12)));
        assert_eq!(claims.expires_at().unwrap().timestamp(), 1_700_000_000);

        let profile = claims.into_profile().unwrap();
        assert_eq!(profile.name, "jane");
        assert_eq!(profile.role, "ADMIN");
    }

    #[test]
    fn test_padded_payload_is_accepted() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"email":"a@b.c"}"#);
        let claims = decode_claims(&format!("h.{}.s", payload)).unwrap();
        assert_eq!(claims.email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn test_opaque_token_is_malformed() {
        assert!(matches!(decode_claims("jwt1"), Err(TokenError::MalformedToken)));
        assert!(matches!(decode_claims("a..b"), Err(TokenError::MalformedToken)));
    }

    #[test]
    fn test_garbage_payload() {
        assert!(matches!(decode_claims("a.!!!.b"), Err(TokenError::Base64(_))));
        let not_json = URL_SAFE_NO_PAD.encode("hello");
        assert!(matches!(decode_claims(&format!("a.{}.b", not_json)), Err(TokenError::Json(_))));
    }

    #[test]
    fn test_claims_without_email() {
        let token = encode_test_token(&json!({"role": "USER"}));
        let claims = decode_claims(&token).unwrap();
        assert!(matches!(claims.into_profile(), Err(TokenError::MissingEmail)));
    }
}
