//! Application configuration management.
//!
//! Holds the backend base URL, the request timeout and which durable store
//! keeps the session. Configuration is stored at
//! `~/.config/selfhelp/config.json`; `SELFHELP_API_BASE_URL` overrides the
//! base URL.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::{FileStore, KeyValueStore, KeyringStore};

/// Application name used for config directory paths
const APP_NAME: &str = "selfhelp";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding `api_base_url`
pub const BASE_URL_ENV: &str = "SELFHELP_API_BASE_URL";

const DEFAULT_API_BASE_URL: &str = "http://192.168.43.112:8081";

/// HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    File,
    Keyring,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub store: StoreKind,
    pub store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            store: StoreKind::default(),
            store_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Load the config file, falling back to defaults when it cannot be read
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                let mut config = Self::default();
                config.apply_env();
                config
            }
        }
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Open the configured durable store
    pub fn open_store(&self) -> Result<Arc<dyn KeyValueStore>> {
        let store: Arc<dyn KeyValueStore> = match self.store {
            StoreKind::File => {
                let path = match self.store_path {
                    Some(ref p) => p.clone(),
                    None => FileStore::default_path()?,
                };
                Arc::new(FileStore::new(path))
            }
            StoreKind::Keyring => Arc::new(KeyringStore::new()),
        };
        Ok(store)
    }
}
