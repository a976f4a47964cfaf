//! Durable key-value storage for the session token and user record.
//!
//! The session manager and the API client share one store:
//! - `FileStore`: JSON object on disk, the default
//! - `KeyringStore`: OS keychain, one entry per key
//! - `MemoryStore`: process-local map, nothing survives a restart
//!
//! Only two keys are ever written, and they are written and cleared together.

pub mod file;
pub mod keychain;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

pub use file::FileStore;
pub use keychain::KeyringStore;
pub use memory::MemoryStore;

/// Key holding the backend-issued bearer token.
pub const TOKEN_KEY: &str = "@self_help_token";

/// Key holding the serialized `UserProfile`.
pub const USER_KEY: &str = "@self_help_user";

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value. A missing key is `Ok(None)`, not an error.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove every listed key. Keys that do not exist are ignored.
    async fn remove(&self, keys: &[&str]) -> Result<()>;
}
