//! Storage configuration section.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local sled database
    #[default]
    Sled,
    /// Remote profile service
    Http,
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Sled database directory; relative paths resolve against the workspace root
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Profile service base URL (http backend)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Bearer token sent to the profile service
    #[serde(default)]
    pub api_token: Option<String>,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".profile-form/store")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            store_path: default_store_path(),
            base_url: None,
            api_token: None,
        }
    }
}

impl StorageConfig {
    pub fn resolve_store_path(&self, workspace_root: &Path) -> PathBuf {
        if self.store_path.is_absolute() {
            self.store_path.clone()
        } else {
            workspace_root.join(&self.store_path)
        }
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), String> {
        match self.backend {
            StorageBackend::Sled => {
                if self.store_path.as_os_str().is_empty() {
                    return Err("Store path cannot be empty".to_string());
                }
            }
            StorageBackend::Http => {
                let url = self
                    .base_url
                    .as_deref()
                    .ok_or_else(|| "base_url is required for the http backend".to_string())?;
                reqwest::Url::parse(url)
                    .map_err(|e| format!("Invalid base_url '{}': {}", url, e))?;
            }
        }
        Ok(())
    }
}
