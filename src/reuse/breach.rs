//! Breach lookup collaborator.

use async_trait::async_trait;
use thiserror::Error;

use crate::fingerprint::RangePrefix;

#[derive(Error, Debug)]
pub enum BreachError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
    #[error("Breach lookup request failed: {0}")]
    Request(String),
    #[error("Breach lookup returned status {0}")]
    Status(u16),
    #[error("Failed to decode breach response: {0}")]
    Decode(String),
}

/// External breach corpus queried with k-anonymity.
///
/// Only a [`RangePrefix`] crosses this boundary; matching the suffix is done
/// by the caller.
#[async_trait]
pub trait BreachLookup: Send + Sync {
    /// Raw range body: CRLF-separated `SUFFIX:COUNT` lines for every digest
    /// sharing `prefix`.
    async fn range(&self, prefix: &RangePrefix) -> Result<String, BreachError>;

    /// Names of known breaches that exposed passwords.
    async fn password_breach_sources(&self) -> Result<Vec<String>, BreachError> {
        Ok(Vec::new())
    }
}

/// Occurrence count of `suffix` in a range body, 0 if absent.
///
/// Lines are `SUFFIX:COUNT`; suffix comparison ignores ASCII case and a
/// malformed count reads as 0.
pub fn parse_range_count(body: &str, suffix: &str) -> u64 {
    for line in body.lines() {
        if let Some((line_suffix, count)) = line.split_once(':')
            && line_suffix.trim().eq_ignore_ascii_case(suffix)
        {
            return count.trim().parse().unwrap_or(0);
        }
    }
    0
}
