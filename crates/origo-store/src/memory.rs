use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::{debit, DocumentStore, StoreError, UserRecord};

/// Process-local store; contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_user(&self, uid: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(uid).cloned())
    }

    async fn put_user(&self, uid: &str, record: &UserRecord) -> Result<(), StoreError> {
        self.users.write().await.insert(uid.to_string(), record.clone());
        log::debug!("MemoryStore: saved '{}'", uid);
        Ok(())
    }

    async fn debit_credits(&self, uid: &str, cost: u32) -> Result<u32, StoreError> {
        let mut users = self.users.write().await;
        let record = users
            .get_mut(uid)
            .ok_or_else(|| StoreError::NotFound { uid: uid.to_string() })?;
        debit(record, cost)
    }
}
