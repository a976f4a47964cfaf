use async_trait::async_trait;

use crate::api::{ApiClient, ApiError, AuthResponse};
use crate::models::{UserInfoHint, UserProfile};

/// Backend operations the session lifecycle depends on.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchange an identity-provider token for a backend session token
    async fn exchange(
        &self,
        identity_token: &str,
        hint: Option<&UserInfoHint>,
    ) -> Result<AuthResponse, ApiError>;

    /// Resolve the user behind a backend session token
    async fn current_user(&self, token: &str) -> Result<UserProfile, ApiError>;
}

#[async_trait]
impl AuthBackend for ApiClient {
    async fn exchange(
        &self,
        identity_token: &str,
        hint: Option<&UserInfoHint>,
    ) -> Result<AuthResponse, ApiError> {
        self.exchange_identity_token(identity_token, hint).await
    }

    async fn current_user(&self, token: &str) -> Result<UserProfile, ApiError> {
        self.fetch_current_user(token).await
    }
}
