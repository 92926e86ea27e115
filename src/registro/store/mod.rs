//! The account store collaborator.
//!
//! Registration and the availability check are written against this trait
//! rather than a concrete pool, so the protocol can be exercised against an
//! in-memory store implementing the same contract. The store's uniqueness
//! constraint is the single source of truth: `insert` reports
//! [`StoreError::UniquenessViolation`] when a concurrent insert already used
//! the exact same email.

use crate::registro::account::Account;
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use self::memory::MemoryAccountStore;
pub use self::postgres::PgAccountStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    UniquenessViolation,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by exact email, byte-for-byte, no case folding.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Insert a new account row.
    ///
    /// Fails with [`StoreError::UniquenessViolation`] when another insert
    /// already used that exact email.
    async fn insert(&self, email: &str, password_hash: &str) -> Result<Account, StoreError>;
}
