//! Registration and availability core.
//!
//! Both operations are stateless and written against the injected
//! [`AccountStore`] collaborator. Registration runs check-then-insert: the
//! window between the two is not atomic, so an insert-time uniqueness
//! violation from a lost race is folded into the same [`RegisterError::EmailTaken`]
//! outcome the pre-check would have produced. The availability check is a
//! pure read and is advisory only; its answer can be stale by the time a
//! registration lands.

use crate::registro::{
    account::Account,
    password,
    store::{AccountStore, StoreError},
};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::instrument;

pub const PASSWORD_MIN_LENGTH: usize = 8;

const INVALID_EMAIL: &str = "Please enter a valid email address";
const INVALID_PASSWORD: &str = "Password must be at least 8 characters long";
const PASSWORD_MISMATCH: &str = "Passwords don't match";

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LENGTH
}

/// Transient credential input. Lives only for the duration of a registration
/// call; the password fields render as `REDACTED` in any `Debug` output.
#[derive(Debug)]
pub struct NewUser {
    pub email: String,
    pub password: SecretString,
    pub password_confirmation: SecretString,
}

impl NewUser {
    #[must_use]
    pub fn new(email: &str, password: &str, password_confirmation: &str) -> Self {
        Self {
            email: email.to_string(),
            password: SecretString::from(password.to_string()),
            password_confirmation: SecretString::from(password_confirmation.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },
    #[error("Email address is already in use")]
    EmailTaken,
    #[error("account store unavailable")]
    StoreUnavailable(#[source] StoreError),
}

fn validate(new_user: &NewUser) -> Result<(), RegisterError> {
    if !valid_email(&new_user.email) {
        return Err(RegisterError::Validation {
            field: "email",
            message: INVALID_EMAIL,
        });
    }

    if !valid_password(new_user.password.expose_secret()) {
        return Err(RegisterError::Validation {
            field: "password",
            message: INVALID_PASSWORD,
        });
    }

    if new_user.password.expose_secret() != new_user.password_confirmation.expose_secret() {
        return Err(RegisterError::Validation {
            field: "password_confirmation",
            message: PASSWORD_MISMATCH,
        });
    }

    Ok(())
}

/// Register a new account.
///
/// Performs exactly one insert on success and no persisted mutation on any
/// failure path, including a lost insert race.
///
/// # Errors
/// Returns [`RegisterError::Validation`] before any store access,
/// [`RegisterError::EmailTaken`] when the email is already registered
/// (whether caught by the pre-check or by the store's constraint), and
/// [`RegisterError::StoreUnavailable`] when the collaborator fails.
#[instrument(skip_all, fields(email = %new_user.email))]
pub async fn register(
    store: &dyn AccountStore,
    new_user: &NewUser,
) -> Result<Account, RegisterError> {
    validate(new_user)?;

    let existing = store
        .find_by_email(&new_user.email)
        .await
        .map_err(RegisterError::StoreUnavailable)?;

    if existing.is_some() {
        return Err(RegisterError::EmailTaken);
    }

    let password_hash = password::hash(new_user.password.expose_secret());

    match store.insert(&new_user.email, &password_hash).await {
        Ok(account) => Ok(account),
        // Lost the check-then-insert race: same outcome as the pre-check hit
        Err(StoreError::UniquenessViolation) => Err(RegisterError::EmailTaken),
        Err(err) => Err(RegisterError::StoreUnavailable(err)),
    }
}

/// Report whether an email is free to register. Pure read, advisory only.
///
/// # Errors
/// Returns [`RegisterError::Validation`] for a malformed email and
/// [`RegisterError::StoreUnavailable`] when the collaborator fails.
#[instrument(skip(store))]
pub async fn check_email(store: &dyn AccountStore, email: &str) -> Result<bool, RegisterError> {
    if !valid_email(email) {
        return Err(RegisterError::Validation {
            field: "email",
            message: INVALID_EMAIL,
        });
    }

    let existing = store
        .find_by_email(email)
        .await
        .map_err(RegisterError::StoreUnavailable)?;

    Ok(existing.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registro::store::MemoryAccountStore;
    use async_trait::async_trait;

    /// A store whose existence check always misses, so every registration
    /// reaches the insert and the uniqueness constraint decides.
    struct StaleReadStore {
        inner: MemoryAccountStore,
    }

    #[async_trait]
    impl AccountStore for StaleReadStore {
        async fn find_by_email(&self, _email: &str) -> Result<Option<Account>, StoreError> {
            Ok(None)
        }

        async fn insert(&self, email: &str, password_hash: &str) -> Result<Account, StoreError> {
            self.inner.insert(email, password_hash).await
        }
    }

    /// A store that cannot answer, for the outage path.
    struct DownStore;

    #[async_trait]
    impl AccountStore for DownStore {
        async fn find_by_email(&self, _email: &str) -> Result<Option<Account>, StoreError> {
            Err(StoreError::Backend(anyhow::anyhow!("connection refused")))
        }

        async fn insert(&self, _email: &str, _password_hash: &str) -> Result<Account, StoreError> {
            Err(StoreError::Backend(anyhow::anyhow!("connection refused")))
        }
    }

    #[tokio::test]
    async fn test_register_persists_hashed_credential() {
        let store = MemoryAccountStore::new();
        let new_user = NewUser::new("u@d.com", "pw123456", "pw123456");

        let account = register(&store, &new_user).await.unwrap();

        assert_eq!(account.email, "u@d.com");
        assert_eq!(store.len(), 1);

        let row = store.find_by_email("u@d.com").await.unwrap().unwrap();
        assert_ne!(row.password_hash, "pw123456");
        assert!(password::verify("pw123456", &row.password_hash));
        assert!(!password::verify("different", &row.password_hash));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let store = MemoryAccountStore::new();
        let new_user = NewUser::new("u@d.com", "pw123456", "pw123456");

        register(&store, &new_user).await.unwrap();

        let retry = NewUser::new("u@d.com", "differentpassword456", "differentpassword456");
        let err = register(&store, &retry).await.unwrap_err();

        assert!(matches!(err, RegisterError::EmailTaken));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_register_treats_casing_as_distinct() {
        let store = MemoryAccountStore::new();

        register(&store, &NewUser::new("a@b.com", "pw123456", "pw123456"))
            .await
            .unwrap();
        register(&store, &NewUser::new("A@B.COM", "pw123456", "pw123456"))
            .await
            .unwrap();

        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_register_rejects_malformed_email() {
        let store = MemoryAccountStore::new();

        for email in ["", "plain", "a@b", "a b@c.com", "a@b c.com"] {
            let err = register(&store, &NewUser::new(email, "pw123456", "pw123456"))
                .await
                .unwrap_err();
            assert!(
                matches!(err, RegisterError::Validation { field: "email", .. }),
                "expected email validation failure for {email:?}"
            );
        }

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let store = MemoryAccountStore::new();

        let err = register(&store, &NewUser::new("x@y.com", "short", "short"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RegisterError::Validation {
                field: "password",
                ..
            }
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_register_rejects_confirmation_mismatch() {
        let store = MemoryAccountStore::new();

        let err = register(&store, &NewUser::new("x@y.com", "longenough1", "different"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RegisterError::Validation {
                field: "password_confirmation",
                ..
            }
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_register_lost_race_degrades_to_email_taken() {
        // The pre-check misses for both contenders; the store constraint
        // rejects the loser's insert.
        let store = StaleReadStore {
            inner: MemoryAccountStore::new(),
        };

        register(&store, &NewUser::new("u@d.com", "pw123456", "pw123456"))
            .await
            .unwrap();

        let err = register(&store, &NewUser::new("u@d.com", "pw123456", "pw123456"))
            .await
            .unwrap_err();

        assert!(matches!(err, RegisterError::EmailTaken));
        assert_eq!(store.inner.len(), 1);
    }

    #[tokio::test]
    async fn test_register_surfaces_store_outage() {
        let err = register(&DownStore, &NewUser::new("u@d.com", "pw123456", "pw123456"))
            .await
            .unwrap_err();

        assert!(matches!(err, RegisterError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_check_email_reports_availability() {
        let store = MemoryAccountStore::new();

        assert!(check_email(&store, "u@d.com").await.unwrap());

        register(&store, &NewUser::new("u@d.com", "pw123456", "pw123456"))
            .await
            .unwrap();

        assert!(!check_email(&store, "u@d.com").await.unwrap());
        // distinct casing is a distinct account
        assert!(check_email(&store, "U@D.COM").await.unwrap());
    }

    #[tokio::test]
    async fn test_check_email_rejects_malformed_email() {
        let store = MemoryAccountStore::new();

        let err = check_email(&store, "not-an-email").await.unwrap_err();

        assert!(matches!(
            err,
            RegisterError::Validation { field: "email", .. }
        ));
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let new_user = NewUser::new("u@d.com", "pw123456", "pw123456");
        let rendered = format!("{new_user:?}");

        assert!(rendered.contains("u@d.com"));
        assert!(!rendered.contains("pw123456"));
    }
}
