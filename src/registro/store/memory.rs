use crate::registro::{
    account::Account,
    store::{AccountStore, StoreError},
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-memory account store implementing the same contract as Postgres,
/// including the uniqueness constraint on email.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: Vec<Account>,
    next_id: i64,
}

impl MemoryAccountStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of persisted rows.
    pub fn len(&self) -> usize {
        self.lock().accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let inner = self.lock();

        Ok(inner
            .accounts
            .iter()
            .find(|account| account.email == email)
            .cloned())
    }

    async fn insert(&self, email: &str, password_hash: &str) -> Result<Account, StoreError> {
        let mut inner = self.lock();

        if inner.accounts.iter().any(|account| account.email == email) {
            return Err(StoreError::UniquenessViolation);
        }

        inner.next_id += 1;
        let account = Account {
            id: inner.next_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        inner.accounts.push(account.clone());

        Ok(account)
    }
}
