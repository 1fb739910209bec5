//! In-memory profile store with failure injection.

use crate::error::StoreError;
use crate::profile::{ProfileRecord, UserIdentity};
use crate::store::{Ack, ProfileStore};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Process-local store. Queued failures are returned, in order, by the next
/// calls of the matching operation.
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, ProfileRecord>>,
    fetch_failures: Mutex<VecDeque<StoreError>>,
    update_failures: Mutex<VecDeque<StoreError>>,
    fetch_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user_id: &str, record: ProfileRecord) {
        self.profiles.write().insert(user_id.to_string(), record);
    }

    pub fn get(&self, user_id: &str) -> Option<ProfileRecord> {
        self.profiles.read().get(user_id).cloned()
    }

    pub fn fail_next_fetch(&self, err: StoreError) {
        self.fetch_failures.lock().push_back(err);
    }

    pub fn fail_next_update(&self, err: StoreError) {
        self.update_failures.lock().push_back(err);
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn fetch(&self, identity: &UserIdentity) -> Result<ProfileRecord, StoreError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fetch_failures.lock().pop_front() {
            return Err(err);
        }
        self.get(&identity.user_id)
            .ok_or_else(|| StoreError::NotFound(identity.user_id.clone()))
    }

    async fn update(
        &self,
        identity: &UserIdentity,
        record: &ProfileRecord,
    ) -> Result<Ack, StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.update_failures.lock().pop_front() {
            return Err(err);
        }
        self.insert(&identity.user_id, record.clone());
        Ok(Ack::now(&identity.user_id))
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
