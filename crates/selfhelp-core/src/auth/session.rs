//! Session lifecycle for the running process.
//!
//! `SessionManager` is built once at startup and shared by `Arc`. Its state
//! lives in a `watch` channel: `current()` gives a synchronous snapshot and
//! `subscribe()` a receiver that wakes on every change.
//!
//! The token and the serialized user are always written and cleared as a
//! pair, and the state only becomes `Authenticated` after both are stored.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{watch, OnceCell};
use tracing::{debug, error, info, warn};

use crate::models::{UserInfoHint, UserProfile};
use crate::store::{KeyValueStore, TOKEN_KEY, USER_KEY};

use super::token::decode_claims;
use super::AuthBackend;

/// Message used when the backend rejects the exchange without explaining why
const DEFAULT_FAILURE_MESSAGE: &str = "Authentication failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Persisted session not read yet
    Initializing,
    Anonymous,
    Authenticated(UserProfile),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Initializing)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Result of `complete_login`. Login never fails with an error value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failure { message: String },
}

impl LoginOutcome {
    fn failure(message: impl Into<String>) -> Self {
        LoginOutcome::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoginOutcome::Success => None,
            LoginOutcome::Failure { message } => Some(message),
        }
    }
}

pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    backend: Arc<dyn AuthBackend>,
    state: watch::Sender<SessionState>,
    restored: OnceCell<()>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>, backend: Arc<dyn AuthBackend>) -> Self {
        let (state, _) = watch::channel(SessionState::Initializing);
        Self {
            store,
            backend,
            state,
            restored: OnceCell::new(),
        }
    }

    /// Snapshot of the current state
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Wait until the persisted session has been read
    pub async fn wait_until_ready(&self) -> SessionState {
        let mut rx = self.subscribe();
        let ready = rx.wait_for(|s| !s.is_loading()).await.map(|s| s.clone());
        ready.unwrap_or_else(|_| self.current())
    }

    // =========================================================================
    // Restore
    // =========================================================================

    /// Read the persisted session and leave `Initializing`.
    ///
    /// The store is read at most once per manager; later calls wait for the
    /// first one and return the current state. Store or parse failures resolve
    /// to `Anonymous`.
    pub async fn restore(&self) -> SessionState {
        self.restored
            .get_or_init(|| async {
                let restored = self.load_persisted().await;
                // A login or logout that finished first wins
                self.state.send_if_modified(|state| {
                    if state.is_loading() {
                        *state = restored;
                        true
                    } else {
                        false
                    }
                });
            })
            .await;
        self.current()
    }

    async fn load_persisted(&self) -> SessionState {
        let token = match self.store.get(TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                error!(error = %e, "Auth check failed reading token");
                return SessionState::Anonymous;
            }
        };
        let user = match self.store.get(USER_KEY).await {
            Ok(user) => user,
            Err(e) => {
                error!(error = %e, "Auth check failed reading user");
                return SessionState::Anonymous;
            }
        };

        match (token, user) {
            (Some(token), Some(json)) => match UserProfile::from_json(&json) {
                Ok(user) => {
                    info!(email = %user.email, "Session restored");
                    let expired_at = decode_claims(&token)
                        .ok()
                        .and_then(|claims| claims.expires_at())
                        .filter(|at| *at <= Utc::now());
                    if let Some(at) = expired_at {
                        // Still restored; the backend answers 401 on the next call
                        warn!(expired_at = %at, "Restored session token has expired");
                    }
                    SessionState::Authenticated(user)
                }
                Err(e) => {
                    warn!(error = %e, "Stored user record is unreadable, starting anonymous");
                    SessionState::Anonymous
                }
            },
            _ => {
                debug!("No saved session");
                SessionState::Anonymous
            }
        }
    }

    // =========================================================================
    // Login
    // =========================================================================

    /// Finish a login started with an external identity provider.
    ///
    /// Exchanges `identity_token` for a backend token, stores the token and
    /// the user, then marks the session authenticated. On any failure the
    /// state is left as it was and the reason is returned in the outcome.
    pub async fn complete_login(
        &self,
        identity_token: &str,
        hint: Option<UserInfoHint>,
    ) -> LoginOutcome {
        if identity_token.trim().is_empty() {
            return LoginOutcome::failure("No token received");
        }

        let response = match self.backend.exchange(identity_token, hint.as_ref()).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Identity token exchange failed");
                let message = e
                    .server_message()
                    .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
                return LoginOutcome::failure(message);
            }
        };

        let Some(token) = response.token.filter(|t| !t.is_empty()) else {
            warn!("Exchange response carried no session token");
            return LoginOutcome::failure("No session token received from server");
        };

        let Some(user) = self.build_profile(&token, response.role, hint).await else {
            return LoginOutcome::failure("Failed to get user data");
        };

        if let Err(e) = self.persist(&token, &user).await {
            error!(error = %e, "Failed to save session");
            return LoginOutcome::failure("Failed to save session");
        }

        info!(email = %user.email, role = %user.role, "Login successful");
        self.state.send_replace(SessionState::Authenticated(user));
        LoginOutcome::Success
    }

    /// Profile for a new session token.
    ///
    /// Uses the provider hint when it has an email; otherwise the token's own
    /// claims; otherwise asks the backend. Backend role beats claimed role.
    async fn build_profile(
        &self,
        token: &str,
        role: Option<String>,
        hint: Option<UserInfoHint>,
    ) -> Option<UserProfile> {
        let claims = match decode_claims(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!(error = %e, "Session token payload not decodable");
                None
            }
        };

        if let Some(hint) = hint.filter(|h| !h.email.trim().is_empty()) {
            let (claimed_role, user_id) = claims
                .map(|c| (c.role, c.user_id))
                .unwrap_or((None, None));
            return Some(UserProfile::from_hint(hint, role.or(claimed_role), user_id));
        }

        if let Some(mut user) = claims.and_then(|c| c.into_profile().ok()) {
            if let Some(role) = role.filter(|r| !r.is_empty()) {
                user.role = role;
            }
            return Some(user);
        }

        match self.backend.current_user(token).await {
            Ok(user) => Some(user),
            Err(e) => {
                error!(error = %e, "Failed to fetch user for new session");
                None
            }
        }
    }

    /// Write token and user as a pair.
    /// If either write fails, whatever was stored before is put back.
    /// A key whose previous value could not be read is left as it is.
    async fn persist(&self, token: &str, user: &UserProfile) -> anyhow::Result<()> {
        let user_json = user.to_json()?;
        let previous_token = self.store.get(TOKEN_KEY).await;
        let previous_user = self.store.get(USER_KEY).await;

        let mut written = self.store.set(TOKEN_KEY, token).await;
        if written.is_ok() {
            written = self.store.set(USER_KEY, &user_json).await;
        }

        if written.is_err() {
            self.put_back(TOKEN_KEY, previous_token).await;
            self.put_back(USER_KEY, previous_user).await;
        }
        written
    }

    async fn put_back(&self, key: &str, previous: anyhow::Result<Option<String>>) {
        let result = match previous {
            Ok(Some(ref value)) => self.store.set(key, value).await,
            Ok(None) => self.store.remove(&[key]).await,
            Err(e) => {
                warn!(key, error = %e, "Previous value unknown, not rolling back");
                return;
            }
        };
        if let Err(e) = result {
            warn!(key, error = %e, "Failed to roll back store entry");
        }
    }

    // =========================================================================
    // Logout
    // =========================================================================

    /// Clear the persisted session and go anonymous.
    /// The in-memory state is reset even if the store cannot be cleared.
    pub async fn logout(&self) {
        if let Err(e) = self.store.remove(&[TOKEN_KEY, USER_KEY]).await {
            error!(error = %e, "Logout failed to clear stored session");
        }

        let changed = self.state.send_if_modified(|state| {
            if *state == SessionState::Anonymous {
                false
            } else {
                *state = SessionState::Anonymous;
                true
            }
        });
        if changed {
            info!("Logged out");
        }
    }
}
