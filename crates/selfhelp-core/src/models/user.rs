use std::fmt;

use serde::{Deserialize, Serialize};

/// Role assigned when neither the backend nor the stored record provides one
pub const DEFAULT_ROLE: &str = "USER";

/// Backend user identifiers arrive as numbers or strings depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

/// The signed-in user. Replaced wholesale on every login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawUserProfile")]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub role: String,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

// Stored records and `/auth/me` responses may omit name and role, never email
#[derive(Deserialize)]
struct RawUserProfile {
    email: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "imageUrl", default)]
    image_url: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(rename = "userId", default)]
    user_id: Option<UserId>,
}

impl TryFrom<RawUserProfile> for UserProfile {
    type Error = String;

    fn try_from(raw: RawUserProfile) -> Result<Self, Self::Error> {
        if raw.email.trim().is_empty() {
            return Err("user record has an empty email".to_string());
        }
        Ok(Self::build(raw))
    }
}

impl UserProfile {
    fn build(raw: RawUserProfile) -> Self {
        let name = raw
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| email_local_part(&raw.email).to_string());
        Self {
            email: raw.email,
            name,
            image_url: raw.image_url.filter(|u| !u.is_empty()),
            role: raw
                .role
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            user_id: raw.user_id,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("ADMIN")
    }

    /// Profile for a fresh login: identity comes from the provider's hint,
    /// authorization from the backend.
    pub fn from_hint(hint: UserInfoHint, role: Option<String>, user_id: Option<UserId>) -> Self {
        Self::build(RawUserProfile {
            email: hint.email,
            name: hint.name,
            image_url: hint.image_url,
            role,
            user_id,
        })
    }

    /// Parse a serialized profile as written to the store
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// User details reported by the identity provider alongside its token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfoHint {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl UserInfoHint {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// `jane@example.com` -> `jane`
pub(crate) fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_stored_record() {
        let user = UserProfile::from_json(r#"{"email":"a@b.com","role":"USER"}"#).unwrap();
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.name, "a");
        assert_eq!(user.role, "USER");
        assert_eq!(user.image_url, None);
        assert_eq!(user.user_id, None);
    }

    #[test]
    fn test_missing_role_defaults_to_user() {
        let user = UserProfile::from_json(r#"{"email":"x@y.com","name":"X"}"#).unwrap();
        assert_eq!(user.role, DEFAULT_ROLE);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_user_id_number_or_string() {
        let a = UserProfile::from_json(r#"{"email":"a@b.com","userId":42}"#).unwrap();
        assert_eq!(a.user_id, Some(UserId::Number(42)));
        let b = UserProfile::from_json(r#"{"email":"a@b.com","userId":"u-1"}"#).unwrap();
        assert_eq!(b.user_id.map(|id| id.to_string()).as_deref(), Some("u-1"));
    }

    #[test]
    fn test_serialized_form_round_trips() {
        let user = UserProfile {
            email: "x@y.com".to_string(),
            name: "X".to_string(),
            image_url: Some("https://img/x.png".to_string()),
            role: "ADMIN".to_string(),
            user_id: None,
        };
        let json = user.to_json().unwrap();
        assert!(json.contains(r#""imageUrl":"https://img/x.png""#));
        assert!(!json.contains("userId"));
        assert_eq!(UserProfile::from_json(&json).unwrap(), user);
        assert!(user.is_admin());
    }

    #[test]
    fn test_record_without_email_is_rejected() {
        assert!(UserProfile::from_json("{}").is_err());
        assert!(UserProfile::from_json(r#"{"name":"X","role":"USER"}"#).is_err());
        assert!(UserProfile::from_json(r#"{"email":"  "}"#).is_err());
    }

    #[test]
    fn test_from_hint() {
        let hint = UserInfoHint::new("x@y.com").with_image_url("");
        let user = UserProfile::from_hint(hint, Some("ADMIN".to_string()), None);
        assert_eq!(user.name, "x");
        assert_eq!(user.role, "ADMIN");
        assert_eq!(user.image_url, None);
    }

    #[test]
    fn test_email_local_part() {
        assert_eq!(email_local_part("jane@example.com"), "jane");
        assert_eq!(email_local_part("no-at-sign"), "no-at-sign");
    }
}
