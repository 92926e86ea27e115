//! # Registro (Account Registration Service)
//!
//! `registro` accepts an email and password, enforces that emails are globally
//! unique, derives a salted password hash, and persists the new credential. A
//! companion read-only endpoint reports whether a candidate email is already
//! registered, used by clients for interactive pre-validation.
//!
//! ## Uniqueness
//!
//! Email is the natural uniqueness key and is compared byte-for-byte, without
//! case folding. The database constraint is the single source of truth: two
//! concurrent registrations for the same email can both pass the existence
//! check, and the loser's insert is reported back as the same "already in
//! use" outcome the pre-check would have produced.
//!
//! ## Passwords
//!
//! Passwords are never stored in recoverable form. Each registration derives
//! a PBKDF2-HMAC-SHA512 key under a fresh 32-byte salt and persists only the
//! `salt_hex:derived_key_hex` encoding. The plaintext is held as a
//! [`secrecy::SecretString`] for the duration of the request and never
//! appears in logs.

pub mod cli;
pub mod registro;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
