//! REST API client module for the wellbeing tracker backend.
//!
//! This module provides the `ApiClient` used by every feature service.
//! Each request carries the bearer token currently held in the shared
//! key-value store, re-read on every call.

pub mod client;
pub mod endpoints;
pub mod error;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::{ApiClient, AuthResponse};
pub use error::ApiError;
