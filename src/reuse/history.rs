//! Usage history collaborator.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::fingerprint::PasswordFingerprint;

/// Where a fingerprint has been used, and when it was last seen.
///
/// The domain set only grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageHistoryEntry {
    pub domains: BTreeSet<String>,
    pub last_used: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History store unavailable: {0}")]
    Unavailable(String),
    #[error("History backend error: {0}")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Persistence for password usage history, keyed by fingerprint.
///
/// Implementations must serialize writes per fingerprint; no operation
/// spans more than one key.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn get_history(
        &self,
        fingerprint: &PasswordFingerprint,
    ) -> Result<Option<UsageHistoryEntry>, HistoryError>;

    /// Adds `domain` to the fingerprint's domain set and refreshes
    /// `last_used`. Repeating a call only refreshes the timestamp.
    async fn upsert_history(
        &self,
        fingerprint: &PasswordFingerprint,
        domain: &str,
    ) -> Result<(), HistoryError>;
}

/// Process-local history store.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    entries: RwLock<HashMap<PasswordFingerprint, UsageHistoryEntry>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct fingerprints recorded.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistory {
    async fn get_history(
        &self,
        fingerprint: &PasswordFingerprint,
    ) -> Result<Option<UsageHistoryEntry>, HistoryError> {
        Ok(self.entries.read().await.get(fingerprint).cloned())
    }

    async fn upsert_history(
        &self,
        fingerprint: &PasswordFingerprint,
        domain: &str,
    ) -> Result<(), HistoryError> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let entry = entries
            .entry(fingerprint.clone())
            .or_insert_with(|| UsageHistoryEntry {
                domains: BTreeSet::new(),
                last_used: now,
            });
        entry.domains.insert(domain.to_string());
        entry.last_used = now;
        Ok(())
    }
}
