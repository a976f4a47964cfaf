//! API client for communicating with the wellbeing tracker REST API.
//!
//! `ApiClient` is the single entry point for outbound calls. Every request
//! reads the bearer token from the shared store right before it is built,
//! so a login or logout between two calls is always honored. Responses and
//! errors are logged here and handed back to the caller untouched.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::models::{UserInfoHint, UserProfile};
use crate::store::{KeyValueStore, TOKEN_KEY};

use super::{endpoints, ApiError};

/// Response of the identity-token exchange
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeRequest<'a> {
    id_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
}

/// API client for the tracker backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    /// Create a new API client. Base URL and timeout are fixed for its lifetime.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            store,
        })
    }

    pub fn from_config(config: &Config, store: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        Self::new(config.api_base_url.clone(), config.request_timeout(), store)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Token currently persisted, if any. A store failure counts as no token.
    async fn current_token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read token from store, sending unauthenticated");
                None
            }
        }
    }

    async fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = self.current_token().await {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Start a request to `path` with the stored bearer token attached
    pub async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self
            .client
            .request(method, self.url(path))
            .header(header::ACCEPT, "application/json")
            .headers(self.auth_headers().await?))
    }

    /// Send a prepared request, logging the outcome. No retries, no error rewriting.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(method = %method, path, "API request");

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                error!(method = %method, path, error = %e, "API request failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::UNAUTHORIZED {
                warn!(method = %method, path, "Unauthorized - token may be expired or invalid");
            }
            error!(method = %method, path, status = status.as_u16(), "API error response");
            return Err(ApiError::from_status(status, &body));
        }

        info!(method = %method, path, status = status.as_u16(), "API response");

        let text = response.text().await?;
        Self::parse_body(path, &text)
    }

    /// Empty bodies parse as JSON `null`, so `()` and `Option<T>` accept them
    fn parse_body<T: DeserializeOwned>(path: &str, text: &str) -> Result<T, ApiError> {
        let text = if text.trim().is_empty() { "null" } else { text };
        serde_json::from_str(text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", path, e))
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path).await?;
        self.send(Method::GET, path, builder).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path).await?.query(query);
        self.send(Method::GET, path, builder).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path).await?.json(body);
        self.send(Method::POST, path, builder).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PUT, path).await?.json(body);
        self.send(Method::PUT, path, builder).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::DELETE, path).await?;
        self.send(Method::DELETE, path, builder).await
    }

    // ===== Authentication =====

    /// Trade an identity-provider token for a backend session token
    pub async fn exchange_identity_token(
        &self,
        identity_token: &str,
        hint: Option<&UserInfoHint>,
    ) -> Result<AuthResponse, ApiError> {
        let body = ExchangeRequest {
            id_token: identity_token,
            email: hint.map(|h| h.email.as_str()),
            name: hint.and_then(|h| h.name.as_deref()),
            image_url: hint.and_then(|h| h.image_url.as_deref()),
        };
        debug!(email = ?body.email, "Exchanging identity token");
        self.post(endpoints::AUTH_GOOGLE, &body).await
    }

    /// Ask the backend who `token` belongs to.
    /// The token is passed explicitly because it is not persisted yet during login.
    pub async fn fetch_current_user(&self, token: &str) -> Result<UserProfile, ApiError> {
        let builder = self
            .client
            .get(self.url(endpoints::AUTH_ME))
            .header(header::ACCEPT, "application/json")
            .bearer_auth(token);
        self.send(Method::GET, endpoints::AUTH_ME, builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::respond_once;
    use crate::store::MemoryStore;
    use anyhow::anyhow;
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Err(anyhow!("disk on fire"))
        }
        async fn set(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
            Err(anyhow!("disk on fire"))
        }
        async fn remove(&self, _keys: &[&str]) -> anyhow::Result<()> {
            Err(anyhow!("disk on fire"))
        }
    }

    fn client_with(store: Arc<dyn KeyValueStore>) -> ApiClient {
        ApiClient::new("http://localhost:8081/", Duration::from_secs(5), store).unwrap()
    }

    fn anonymous_client(base_url: String) -> ApiClient {
        ApiClient::new(base_url, Duration::from_secs(5), Arc::new(MemoryStore::new())).unwrap()
    }

    #[tokio::test]
    async fn test_stored_token_becomes_bearer_header() {
        let store = Arc::new(MemoryStore::with_entries([(TOKEN_KEY, "tok1")]));
        let client = client_with(store);

        let request = client
            .request(Method::GET, endpoints::MY_HABITS)
            .await
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.headers()[header::AUTHORIZATION], "Bearer tok1");
        assert_eq!(request.url().as_str(), "http://localhost:8081/api/habits/me");
    }

    #[tokio::test]
    async fn test_no_token_sends_unauthenticated() {
        let client = client_with(Arc::new(MemoryStore::new()));
        let request = client
            .request(Method::GET, endpoints::MESSAGES)
            .await
            .unwrap()
            .build()
            .unwrap();
        assert!(request.headers().get(header::AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_token_is_reread_for_every_request() {
        let store = Arc::new(MemoryStore::with_entries([(TOKEN_KEY, "old")]));
        let client = client_with(store.clone());

        let first = client.request(Method::GET, "/a").await.unwrap().build().unwrap();
        store.set(TOKEN_KEY, "new").await.unwrap();
        let second = client.request(Method::GET, "/a").await.unwrap().build().unwrap();
        store.remove(&[TOKEN_KEY]).await.unwrap();
        let third = client.request(Method::GET, "/a").await.unwrap().build().unwrap();

        assert_eq!(first.headers()[header::AUTHORIZATION], "Bearer old");
        assert_eq!(second.headers()[header::AUTHORIZATION], "Bearer new");
        assert!(third.headers().get(header::AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_store_failure_sends_unauthenticated() {
        let client = client_with(Arc::new(BrokenStore));
        let request = client.request(Method::GET, "/a").await.unwrap().build().unwrap();
        assert!(request.headers().get(header::AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_reaches_caller_unchanged() {
        let (base_url, served) =
            respond_once("401 Unauthorized", r#"{"message":"Token expired"}"#).await;
        let store = Arc::new(MemoryStore::with_entries([(TOKEN_KEY, "tok1")]));
        let client = ApiClient::new(base_url, Duration::from_secs(5), store.clone()).unwrap();

        let err = client
            .get::<serde_json::Value>(endpoints::MY_HABITS)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert_eq!(err.server_message().as_deref(), Some("Token expired"));

        let served = served.await.unwrap();
        assert_eq!(served.request_line(), "GET /api/habits/me HTTP/1.1");
        assert_eq!(served.header("authorization"), Some("Bearer tok1"));
        assert_eq!(served.later_connections, 0);
        // No implicit logout
        assert_eq!(store.get(TOKEN_KEY).await.unwrap().as_deref(), Some("tok1"));
    }

    #[tokio::test]
    async fn test_current_user_uses_explicit_token() {
        let (base_url, served) =
            respond_once("200 OK", r#"{"email":"me@b.com","role":"ADMIN"}"#).await;
        let client = anonymous_client(base_url);

        let user = client.fetch_current_user("jwt9").await.unwrap();

        assert_eq!(user.email, "me@b.com");
        assert!(user.is_admin());
        let served = served.await.unwrap();
        assert_eq!(served.request_line(), "GET /auth/me HTTP/1.1");
        assert_eq!(served.header("authorization"), Some("Bearer jwt9"));
    }

    #[tokio::test]
    async fn test_current_user_without_email_is_invalid() {
        let (base_url, served) = respond_once("200 OK", r#"{"name":"X"}"#).await;
        let client = anonymous_client(base_url);

        let err = client.fetch_current_user("jwt9").await.unwrap_err();

        assert!(matches!(err, ApiError::InvalidResponse(_)));
        served.await.unwrap();
    }

    #[test]
    fn test_parse_empty_body_as_unit() {
        ApiClient::parse_body::<()>("/api/habits/1", "").unwrap();
        let missing: Option<i32> = ApiClient::parse_body("/x", "  ").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_parse_invalid_body() {
        let err = ApiClient::parse_body::<Vec<i32>>("/api/goals/me", "<html>").unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(ref m) if m.contains("/api/goals/me")));
    }

    #[test]
    fn test_auth_response_without_token() {
        let response: AuthResponse = serde_json::from_str(r#"{"role":"USER"}"#).unwrap();
        assert!(response.token.is_none());
    }

    #[test]
    fn test_exchange_request_wire_format() {
        let hint = UserInfoHint::new("x@y.com").with_name("X");
        let body = ExchangeRequest {
            id_token: "idtok",
            email: Some(&hint.email),
            name: hint.name.as_deref(),
            image_url: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["idToken"], "idtok");
        assert_eq!(json["email"], "x@y.com");
        assert!(json.get("imageUrl").is_none());
    }
}
