//! Persistence layer for profile records

use crate::error::StoreError;
use crate::profile::{ProfileRecord, UserIdentity};
use crate::store::{Ack, ProfileStore};
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

const PROFILE_KEY_PREFIX: &str = "profile:";

/// Sled-based implementation of ProfileStore
pub struct SledProfileStore {
    db: sled::Db,
}

impl SledProfileStore {
    /// Create a new SledProfileStore at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path).map_err(|e| {
            StoreError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to open sled database: {}", e),
            ))
        })?;
        Ok(Self { db })
    }

    pub fn from_db(db: sled::Db) -> Self {
        Self { db }
    }

    fn key(user_id: &str) -> String {
        format!("{}{}", PROFILE_KEY_PREFIX, user_id)
    }

    /// Read a stored profile without going through the async interface.
    pub fn get(&self, user_id: &str) -> Result<Option<ProfileRecord>, StoreError> {
        match self.db.get(Self::key(user_id).as_bytes()).map_err(|e| {
            StoreError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to get profile: {}", e),
            ))
        })? {
            Some(value) => {
                let record: ProfileRecord = bincode::deserialize(&value).map_err(|e| {
                    StoreError::Malformed(format!("Failed to deserialize profile: {}", e))
                })?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Write a profile without going through the async interface.
    pub fn put(&self, user_id: &str, record: &ProfileRecord) -> Result<(), StoreError> {
        let value = bincode::serialize(record).map_err(|e| {
            StoreError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Failed to serialize profile: {}", e),
            ))
        })?;
        self.db
            .insert(Self::key(user_id).as_bytes(), value)
            .map_err(|e| {
                StoreError::IoError(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to put profile: {}", e),
                ))
            })?;
        self.db.flush().map_err(|e| {
            StoreError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to flush store: {}", e),
            ))
        })?;
        Ok(())
    }

    /// Ids of all users with a stored profile.
    pub fn list_user_ids(&self) -> Result<Vec<String>, StoreError> {
        let mut ids = Vec::new();
        for item in self.db.scan_prefix(PROFILE_KEY_PREFIX.as_bytes()) {
            let (key, _) = item.map_err(|e| {
                StoreError::IoError(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to iterate store: {}", e),
                ))
            })?;
            let key = String::from_utf8_lossy(&key);
            if let Some(id) = key.strip_prefix(PROFILE_KEY_PREFIX) {
                ids.push(id.to_string());
            }
        }
        Ok(ids)
    }

    /// Get the underlying sled database (for advanced operations)
    pub fn db(&self) -> &sled::Db {
        &self.db
    }
}

#[async_trait]
impl ProfileStore for SledProfileStore {
    async fn fetch(&self, identity: &UserIdentity) -> Result<ProfileRecord, StoreError> {
        debug!(user_id = %identity.user_id, "Fetching profile from sled");
        self.get(&identity.user_id)?
            .ok_or_else(|| StoreError::NotFound(identity.user_id.clone()))
    }

    async fn update(
        &self,
        identity: &UserIdentity,
        record: &ProfileRecord,
    ) -> Result<Ack, StoreError> {
        debug!(user_id = %identity.user_id, "Writing profile to sled");
        self.put(&identity.user_id, record)?;
        Ok(Ack::now(&identity.user_id))
    }

    fn backend_name(&self) -> &str {
        "sled"
    }
}
