//! JSON-file backed store.
//!
//! The whole file is one JSON object of string values. Every write rewrites
//! the file through a temporary sibling and a rename, so a crash mid-write
//! leaves either the old or the new contents.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::KeyValueStore;

/// Application name used for the data directory path
const APP_NAME: &str = "selfhelp";

/// Store file name in the data directory
const STORE_FILE: &str = "store.json";

pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store at the platform data directory, e.g. `~/.local/share/selfhelp/store.json`
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME).join(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse store file: {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read store file: {}", self.path.display())),
        }
    }

    async fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create store directory")?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, contents)
            .await
            .context("Failed to write store file")?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .context("Failed to replace store file")?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.read_all().await?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries).await?;
        debug!(key, "Store entry written");
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_all().await?;
        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }
        // Nothing to do: avoid creating the file just to write "{}"
        if entries.len() == before {
            return Ok(());
        }
        self.write_all(&entries).await
    }
}
