//! Authentication module: the session lifecycle and everything it needs.
//!
//! This module provides:
//! - `SessionManager`: restores, completes and clears the session
//! - `SessionState`: `Initializing`, `Anonymous` or `Authenticated`
//! - `AuthBackend`: the identity-token exchange, implemented by `ApiClient`
//! - `decode_claims`: convenience JWT payload decoding (no signature check)

pub mod backend;
pub mod session;
pub mod token;

pub use backend::AuthBackend;
pub use session::{LoginOutcome, SessionManager, SessionState};
pub use token::{decode_claims, TokenClaims, TokenError};
