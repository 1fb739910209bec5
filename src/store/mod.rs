//! Profile Store
//!
//! Persistence seam for profile records, keyed by an explicit user identity.
//! Sessions only see the [`ProfileStore`] trait; backends are chosen from
//! configuration.

pub mod config;
pub mod http;
pub mod memory;
pub mod persistence;

pub use config::{StorageBackend, StorageConfig};
pub use http::HttpProfileStore;
pub use memory::InMemoryProfileStore;
pub use persistence::SledProfileStore;

use crate::error::{ApiError, StoreError};
use crate::profile::{ProfileRecord, UserIdentity};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Acknowledgement of a stored profile update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub user_id: String,
    pub saved_at: DateTime<Utc>,
}

impl Ack {
    pub fn now(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            saved_at: Utc::now(),
        }
    }
}

/// Profile store interface
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load the stored profile of a user.
    async fn fetch(&self, identity: &UserIdentity) -> Result<ProfileRecord, StoreError>;

    /// Replace the stored profile of a user.
    async fn update(
        &self,
        identity: &UserIdentity,
        record: &ProfileRecord,
    ) -> Result<Ack, StoreError>;

    /// Short backend name for logs and status output.
    fn backend_name(&self) -> &str;
}

/// Open the store selected by configuration.
pub fn open_store(
    config: &StorageConfig,
    workspace_root: &Path,
) -> Result<Arc<dyn ProfileStore>, ApiError> {
    match config.backend {
        StorageBackend::Sled => {
            let path = config.resolve_store_path(workspace_root);
            std::fs::create_dir_all(&path)?;
            Ok(Arc::new(SledProfileStore::new(&path)?))
        }
        StorageBackend::Http => {
            let base_url = config.base_url.clone().ok_or_else(|| {
                ApiError::ConfigError("storage.base_url is required for the http backend".to_string())
            })?;
            Ok(Arc::new(HttpProfileStore::new(
                base_url,
                config.api_token.clone(),
            )?))
        }
    }
}
