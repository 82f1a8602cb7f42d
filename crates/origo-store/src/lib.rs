//! Document storage for user records and the credit balance kept on them.
//!
//! The storage engine itself is pluggable through [`DocumentStore`]; an
//! in-memory map and a directory of JSON files ship here.

mod json_dir;
mod memory;
mod record;

pub use json_dir::JsonDirStore;
pub use memory::MemoryStore;
pub use record::{UserProfile, UserRecord};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no user document for '{uid}'")]
    NotFound { uid: String },
    #[error("insufficient credits: balance {balance}, cost {cost}")]
    InsufficientCredits { balance: u32, cost: u32 },
    #[error("invalid document id '{uid}'")]
    InvalidId { uid: String },
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed user document: {0}")]
    Serde(#[from] serde_json::Error),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_user(&self, uid: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Replace the whole document for `uid`.
    async fn put_user(&self, uid: &str, record: &UserRecord) -> Result<(), StoreError>;

    /// Subtract `cost` from the balance if it covers it; returns the new
    /// balance. Check and write happen under one lock.
    async fn debit_credits(&self, uid: &str, cost: u32) -> Result<u32, StoreError>;

    /// Current balance; unknown users have none.
    async fn credits(&self, uid: &str) -> Result<u32, StoreError> {
        Ok(self.get_user(uid).await?.map(|r| r.credits()).unwrap_or(0))
    }
}

/// How credit balances are seeded when a profile is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditPolicy {
    pub starting_balance: u32,
    pub default_cost: u32,
    pub guest_prefix: String,
}

impl Default for CreditPolicy {
    fn default() -> Self {
        Self { starting_balance: 20, default_cost: 1, guest_prefix: "guest_".to_string() }
    }
}

impl CreditPolicy {
    pub fn is_guest(&self, uid: &str) -> bool {
        !self.guest_prefix.is_empty() && uid.starts_with(&self.guest_prefix)
    }
}

/// Balance to store with a freshly saved profile: guests get nothing,
/// returning users keep what they had, new users get the starting balance.
pub async fn opening_balance(
    store: &dyn DocumentStore,
    uid: &str,
    policy: &CreditPolicy,
) -> Result<u32, StoreError> {
    if policy.is_guest(uid) {
        return Ok(0);
    }
    Ok(match store.get_user(uid).await? {
        Some(existing) => existing.profile.credits.unwrap_or(policy.starting_balance),
        None => policy.starting_balance,
    })
}

pub(crate) fn debit(record: &mut UserRecord, cost: u32) -> Result<u32, StoreError> {
    let balance = record.credits();
    if balance < cost {
        return Err(StoreError::InsufficientCredits { balance, cost });
    }
    let remaining = balance - cost;
    record.profile.credits = Some(remaining);
    Ok(remaining)
}
