//! Password hashing and verification.
//!
//! A password is stored as `salt_hex:derived_key_hex`, where the key is
//! derived with PBKDF2-HMAC-SHA512 under a fresh random salt. The plaintext
//! is discarded immediately after derivation; the stored form is the only
//! representation that ever reaches the database.

use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha512;
use subtle::ConstantTimeEq;
use thiserror::Error;

const SALT_LENGTH: usize = 32;
const KEY_LENGTH: usize = 64;
const ITERATIONS: u32 = 100_000;

/// A stored hash that does not parse as `salt_hex:derived_key_hex`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedStoredHash {
    #[error("stored hash is missing the salt separator")]
    MissingSeparator,
    #[error("stored hash contains non-hex characters")]
    InvalidHex,
    #[error("stored hash has a derived key of unexpected length")]
    KeyLength,
}

/// Hash a password under a fresh random salt.
///
/// Two calls with the same password produce different outputs, since the
/// salt is never reused.
#[must_use]
pub fn hash(password: &str) -> String {
    let mut salt = [0u8; SALT_LENGTH];
    OsRng.fill_bytes(&mut salt);

    let mut key = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha512>(password.as_bytes(), &salt, ITERATIONS, &mut key);

    format!("{}:{}", hex::encode(salt), hex::encode(key))
}

/// Verify a password against a stored `salt_hex:derived_key_hex` value.
///
/// A malformed stored value verifies as false: from the caller's view it
/// cannot match any password.
#[must_use]
pub fn verify(password: &str, stored: &str) -> bool {
    let Ok((salt, expected)) = parse_stored(stored) else {
        return false;
    };

    let mut derived = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha512>(password.as_bytes(), &salt, ITERATIONS, &mut derived);

    bool::from(derived.as_slice().ct_eq(expected.as_slice()))
}

/// Split a stored hash into its salt and derived key.
///
/// # Errors
/// Returns [`MalformedStoredHash`] when the value does not round-trip the
/// encoding produced by [`hash`].
pub fn parse_stored(stored: &str) -> Result<(Vec<u8>, Vec<u8>), MalformedStoredHash> {
    let (salt_hex, key_hex) = stored
        .split_once(':')
        .ok_or(MalformedStoredHash::MissingSeparator)?;

    let salt = hex::decode(salt_hex).map_err(|_| MalformedStoredHash::InvalidHex)?;
    let key = hex::decode(key_hex).map_err(|_| MalformedStoredHash::InvalidHex)?;

    if salt.is_empty() || key.len() != KEY_LENGTH {
        return Err(MalformedStoredHash::KeyLength);
    }

    Ok((salt, key))
}
