//! Password digests.
//!
//! Two unrelated digests are used: [`PasswordFingerprint`] (SHA-256) keys the
//! usage history, while [`BreachDigest`] (SHA-1) exists only to talk to a
//! Pwned-Passwords style range API. Neither is suitable for storing
//! credentials.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Number of hex characters of the breach digest sent over the network.
pub const RANGE_PREFIX_LEN: usize = 5;

/// Stable one-way digest of a password, used as a history lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PasswordFingerprint(String);

impl PasswordFingerprint {
    /// Lower-case hex SHA-256 of the UTF-8 password bytes.
    pub fn of(password: &SecretString) -> Self {
        Self(hex::encode(Sha256::digest(
            password.expose_secret().as_bytes(),
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PasswordFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The only part of a [`BreachDigest`] allowed to leave the process.
///
/// Always exactly [`RANGE_PREFIX_LEN`] upper-case hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangePrefix(String);

impl RangePrefix {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RangePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Upper-case hex SHA-1 of a password, split for k-anonymity lookups.
pub struct BreachDigest {
    prefix: RangePrefix,
    suffix: String,
}

impl BreachDigest {
    pub fn of(password: &SecretString) -> Self {
        let hash = hex::encode_upper(Sha1::digest(password.expose_secret().as_bytes()));
        let (prefix, suffix) = hash.split_at(RANGE_PREFIX_LEN);
        Self {
            prefix: RangePrefix(prefix.to_string()),
            suffix: suffix.to_string(),
        }
    }

    pub fn prefix(&self) -> &RangePrefix {
        &self.prefix
    }

    /// Remaining 35 hex characters, compared locally.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}
