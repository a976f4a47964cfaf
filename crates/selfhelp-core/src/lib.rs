//! selfhelp-core - session lifecycle and API access for the selfhelp
//! wellbeing tracker.
//!
//! Startup order: open the configured `KeyValueStore`, build an `ApiClient`
//! on top of it, hand both to a `SessionManager`, then await
//! `SessionManager::restore` before showing anything that needs a user.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{LoginOutcome, SessionManager, SessionState};
pub use config::Config;
pub use store::KeyValueStore;
