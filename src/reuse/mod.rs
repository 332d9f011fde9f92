//! Reuse/breach correlator
//!
//! Cross-references a password against the local usage history and an
//! external breach corpus. Collaborator failures never fail the check:
//! an unreachable store or API simply contributes no findings.

mod breach;
mod history;
#[cfg(feature = "hibp")]
mod hibp;

pub use breach::{BreachError, BreachLookup, parse_range_count};
pub use history::{HistoryError, HistoryStore, InMemoryHistory, UsageHistoryEntry};
#[cfg(feature = "hibp")]
pub use hibp::{DEFAULT_CATALOG_URL, DEFAULT_RANGE_URL, HibpClient};

use std::fmt;
use std::sync::Arc;

use secrecy::SecretString;

use crate::fingerprint::{BreachDigest, PasswordFingerprint};

/// A reuse or breach finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReuseIssue {
    /// The password is recorded on other domains.
    PreviouslyUsed { domains: Vec<String> },
    /// The password appears in the breach corpus `count` times.
    Breached { count: u64 },
    /// Known breaches that exposed passwords.
    BreachSources { names: Vec<String> },
}

impl fmt::Display for ReuseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreviouslyUsed { domains } => {
                write!(f, "Password was previously used on: {}", domains.join(", "))
            }
            Self::Breached { count } => {
                write!(f, "This password has appeared in {count} data breaches!")
            }
            Self::BreachSources { names } => {
                write!(f, "Affected services: {}", names.join(", "))
            }
        }
    }
}

/// Trimmed domain, or `None` when blank (e.g. a `file://` page).
fn normalize_domain(domain: &str) -> Option<&str> {
    let domain = domain.trim();
    (!domain.is_empty()).then_some(domain)
}

/// Result of the breach half of the correlator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreachFinding {
    pub count: u64,
    pub sources: Vec<String>,
}

/// Correlates passwords with usage history and breach data.
#[derive(Clone)]
pub struct ReuseCorrelator {
    history: Arc<dyn HistoryStore>,
    breach: Option<Arc<dyn BreachLookup>>,
    record_usage: bool,
    fetch_sources: bool,
}

impl ReuseCorrelator {
    /// Correlator with history only. Recording after each check is on.
    pub fn new(history: Arc<dyn HistoryStore>) -> Self {
        Self {
            history,
            breach: None,
            record_usage: true,
            fetch_sources: true,
        }
    }

    #[must_use]
    pub fn with_breach_lookup(mut self, lookup: Arc<dyn BreachLookup>) -> Self {
        self.breach = Some(lookup);
        self
    }

    /// Stops `check_reuse` from writing to the history store.
    #[must_use]
    pub fn without_recording(mut self) -> Self {
        self.record_usage = false;
        self
    }

    /// Skips the breach catalog request after a positive range match.
    #[must_use]
    pub fn without_breach_sources(mut self) -> Self {
        self.fetch_sources = false;
        self
    }

    /// Runs the history and breach checks concurrently and, unless disabled,
    /// records the password's use on `domain`.
    ///
    /// Without a domain (or with a blank one), every recorded domain is
    /// reported and nothing is recorded.
    pub async fn check_reuse(
        &self,
        password: &SecretString,
        domain: Option<&str>,
    ) -> Vec<ReuseIssue> {
        let domain = domain.and_then(normalize_domain);
        let fingerprint = PasswordFingerprint::of(password);

        let (previous, breach) = tokio::join!(
            self.previous_domains(&fingerprint, domain),
            self.check_breach(password)
        );

        let mut issues = Vec::new();
        if let Some(domains) = previous {
            issues.push(ReuseIssue::PreviouslyUsed { domains });
        }
        if breach.count > 0 {
            issues.push(ReuseIssue::Breached {
                count: breach.count,
            });
            if !breach.sources.is_empty() {
                issues.push(ReuseIssue::BreachSources {
                    names: breach.sources,
                });
            }
        }

        if self.record_usage
            && let Some(domain) = domain
            && let Err(_e) = self.history.upsert_history(&fingerprint, domain).await
        {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, domain, "Failed to record password usage");
        }

        issues
    }

    /// Records the password's use on `domain`. A blank domain records nothing.
    ///
    /// # Errors
    ///
    /// Propagates the history store error.
    pub async fn record_usage(
        &self,
        password: &SecretString,
        domain: &str,
    ) -> Result<(), HistoryError> {
        let Some(domain) = normalize_domain(domain) else {
            return Ok(());
        };
        self.history
            .upsert_history(&PasswordFingerprint::of(password), domain)
            .await
    }

    /// Queries the breach corpus. Any failure reads as zero breaches.
    pub async fn check_breach(&self, password: &SecretString) -> BreachFinding {
        let Some(lookup) = &self.breach else {
            return BreachFinding::default();
        };

        let digest = BreachDigest::of(password);
        let body = match lookup.range(digest.prefix()).await {
            Ok(body) => body,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    error = %_e,
                    prefix = %digest.prefix(),
                    "Breach lookup failed, failing open"
                );
                return BreachFinding::default();
            }
        };

        let count = parse_range_count(&body, digest.suffix());
        if count == 0 || !self.fetch_sources {
            return BreachFinding {
                count,
                sources: Vec::new(),
            };
        }

        let sources = lookup
            .password_breach_sources()
            .await
            .unwrap_or_else(|_e| {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "Breach catalog unavailable");
                Vec::new()
            });

        BreachFinding { count, sources }
    }

    async fn previous_domains(
        &self,
        fingerprint: &PasswordFingerprint,
        domain: Option<&str>,
    ) -> Option<Vec<String>> {
        match self.history.get_history(fingerprint).await {
            Ok(Some(entry))
                if !entry.domains.is_empty()
                    && !domain.is_some_and(|d| entry.domains.contains(d)) =>
            {
                Some(entry.domains.into_iter().collect())
            }
            Ok(_) => None,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "History lookup failed, skipping reuse check");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::{RANGE_PREFIX_LEN, RangePrefix};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    /// Serves a fixed range body and remembers every prefix it was asked for.
    struct RecordingLookup {
        body: String,
        sources: Vec<String>,
        prefixes: Mutex<Vec<String>>,
    }

    impl RecordingLookup {
        fn new(body: &str, sources: &[&str]) -> Self {
            Self {
                body: body.to_string(),
                sources: sources.iter().map(|s| s.to_string()).collect(),
                prefixes: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl BreachLookup for RecordingLookup {
        async fn range(&self, prefix: &RangePrefix) -> Result<String, BreachError> {
            self.prefixes.lock().unwrap().push(prefix.to_string());
            Ok(self.body.clone())
        }

        async fn password_breach_sources(&self) -> Result<Vec<String>, BreachError> {
            Ok(self.sources.clone())
        }
    }

    struct OfflineLookup;

    #[async_trait]
    impl BreachLookup for OfflineLookup {
        async fn range(&self, _prefix: &RangePrefix) -> Result<String, BreachError> {
            Err(BreachError::Request("connection refused".to_string()))
        }
    }

    struct OfflineHistory;

    #[async_trait]
    impl HistoryStore for OfflineHistory {
        async fn get_history(
            &self,
            _fingerprint: &PasswordFingerprint,
        ) -> Result<Option<UsageHistoryEntry>, HistoryError> {
            Err(HistoryError::Unavailable("storage offline".to_string()))
        }

        async fn upsert_history(
            &self,
            _fingerprint: &PasswordFingerprint,
            _domain: &str,
        ) -> Result<(), HistoryError> {
            Err(HistoryError::Unavailable("storage offline".to_string()))
        }
    }

    const PASSWORD_RANGE: &str = "0018A45C4D1DEF81644B54AB7F969B88D65:1\r\n\
                                  1E4C9B93F3F0682250B6CF8331B7EE68FD8:9545824";

    #[tokio::test]
    async fn test_reuse_on_other_domain_reported() {
        let history = Arc::new(InMemoryHistory::new());
        let correlator = ReuseCorrelator::new(history.clone());
        let pwd = secret("SharedSecret!2024");

        let first = correlator.check_reuse(&pwd, Some("a.example")).await;
        assert!(first.is_empty());

        let second = correlator.check_reuse(&pwd, Some("b.example")).await;
        assert_eq!(
            second,
            vec![ReuseIssue::PreviouslyUsed {
                domains: vec!["a.example".to_string()]
            }]
        );
        assert_eq!(
            second[0].to_string(),
            "Password was previously used on: a.example"
        );
    }

    #[tokio::test]
    async fn test_same_domain_not_reported() {
        let history = Arc::new(InMemoryHistory::new());
        let correlator = ReuseCorrelator::new(history.clone());
        let pwd = secret("SharedSecret!2024");

        correlator.check_reuse(&pwd, Some("a.example")).await;
        correlator.check_reuse(&pwd, Some("b.example")).await;
        // known on both domains now, so a.example is no longer "other"
        let issues = correlator.check_reuse(&pwd, Some("a.example")).await;
        assert!(issues.is_empty());
    }

    #[tokio::test]
    async fn test_check_reuse_idempotent() {
        let history = Arc::new(InMemoryHistory::new());
        let correlator = ReuseCorrelator::new(history.clone());
        let pwd = secret("SharedSecret!2024");
        let fp = PasswordFingerprint::of(&pwd);

        correlator.check_reuse(&pwd, Some("a.example")).await;
        let before = history.get_history(&fp).await.unwrap().unwrap();
        correlator.check_reuse(&pwd, Some("a.example")).await;
        let after = history.get_history(&fp).await.unwrap().unwrap();

        assert_eq!(before.domains.len(), 1);
        assert_eq!(after.domains, before.domains);
    }

    #[tokio::test]
    async fn test_without_recording_leaves_history_untouched() {
        let history = Arc::new(InMemoryHistory::new());
        let correlator = ReuseCorrelator::new(history.clone()).without_recording();

        correlator
            .check_reuse(&secret("SharedSecret!2024"), Some("a.example"))
            .await;
        assert!(history.is_empty().await);

        correlator
            .record_usage(&secret("SharedSecret!2024"), "a.example")
            .await
            .unwrap();
        assert_eq!(history.len().await, 1);
    }

    #[tokio::test]
    async fn test_no_domain_reports_all_and_records_nothing() {
        let history = Arc::new(InMemoryHistory::new());
        let correlator = ReuseCorrelator::new(history.clone());
        let pwd = secret("SharedSecret!2024");
        correlator.record_usage(&pwd, "a.example").await.unwrap();

        let issues = correlator.check_reuse(&pwd, None).await;
        assert_eq!(
            issues,
            vec![ReuseIssue::PreviouslyUsed {
                domains: vec!["a.example".to_string()]
            }]
        );
        let entry = history
            .get_history(&PasswordFingerprint::of(&pwd))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entry.domains.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_domain_treated_as_none() {
        let history = Arc::new(InMemoryHistory::new());
        let correlator = ReuseCorrelator::new(history.clone());
        let pwd = secret("SharedSecret!2024");

        assert!(correlator.check_reuse(&pwd, Some("")).await.is_empty());
        assert!(correlator.check_reuse(&pwd, Some("   ")).await.is_empty());
        correlator.record_usage(&pwd, " ").await.unwrap();
        assert!(history.is_empty().await);

        let issues = correlator.check_reuse(&pwd, Some("bank.example")).await;
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[tokio::test]
    async fn test_domain_is_trimmed() {
        let history = Arc::new(InMemoryHistory::new());
        let correlator = ReuseCorrelator::new(history.clone());
        let pwd = secret("SharedSecret!2024");

        correlator.check_reuse(&pwd, Some(" a.example ")).await;
        let issues = correlator.check_reuse(&pwd, Some("a.example")).await;
        assert!(issues.is_empty());
        let issues = correlator.check_reuse(&pwd, Some("b.example")).await;
        assert_eq!(
            issues,
            vec![ReuseIssue::PreviouslyUsed {
                domains: vec!["a.example".to_string()]
            }]
        );
    }

    #[tokio::test]
    async fn test_breach_found_with_sources() {
        let lookup = Arc::new(RecordingLookup::new(PASSWORD_RANGE, &["Adobe", "LinkedIn"]));
        let correlator =
            ReuseCorrelator::new(Arc::new(InMemoryHistory::new())).with_breach_lookup(lookup.clone());

        let issues = correlator.check_reuse(&secret("password"), Some("a.example")).await;
        assert_eq!(
            issues,
            vec![
                ReuseIssue::Breached { count: 9545824 },
                ReuseIssue::BreachSources {
                    names: vec!["Adobe".to_string(), "LinkedIn".to_string()]
                },
            ]
        );
        assert_eq!(
            issues[0].to_string(),
            "This password has appeared in 9545824 data breaches!"
        );
    }

    #[tokio::test]
    async fn test_breach_sources_skipped_when_disabled() {
        let lookup = Arc::new(RecordingLookup::new(PASSWORD_RANGE, &["Adobe"]));
        let correlator = ReuseCorrelator::new(Arc::new(InMemoryHistory::new()))
            .with_breach_lookup(lookup)
            .without_breach_sources();

        let finding = correlator.check_breach(&secret("password")).await;
        assert_eq!(finding.count, 9545824);
        assert!(finding.sources.is_empty());
    }

    #[tokio::test]
    async fn test_only_prefix_sent_to_lookup() {
        let lookup = Arc::new(RecordingLookup::new(PASSWORD_RANGE, &[]));
        let correlator =
            ReuseCorrelator::new(Arc::new(InMemoryHistory::new())).with_breach_lookup(lookup.clone());

        correlator.check_breach(&secret("password")).await;
        correlator.check_breach(&secret("Tr0ub4dor&3!XQ9")).await;

        let prefixes = lookup.prefixes.lock().unwrap().clone();
        assert_eq!(prefixes.len(), 2);
        assert_eq!(prefixes[0], "5BAA6");
        assert!(prefixes.iter().all(|p| p.len() == RANGE_PREFIX_LEN));
    }

    #[tokio::test]
    async fn test_unlisted_password_not_breached() {
        let lookup = Arc::new(RecordingLookup::new(PASSWORD_RANGE, &["Adobe"]));
        let correlator =
            ReuseCorrelator::new(Arc::new(InMemoryHistory::new())).with_breach_lookup(lookup);

        let finding = correlator.check_breach(&secret("Tr0ub4dor&3!XQ9")).await;
        assert_eq!(finding, BreachFinding::default());
    }

    #[tokio::test]
    async fn test_breach_failure_reads_as_zero() {
        let history = Arc::new(InMemoryHistory::new());
        let correlator =
            ReuseCorrelator::new(history.clone()).with_breach_lookup(Arc::new(OfflineLookup));
        let pwd = secret("password");

        correlator.record_usage(&pwd, "a.example").await.unwrap();
        let issues = correlator.check_reuse(&pwd, Some("b.example")).await;

        // history half still reported
        assert_eq!(
            issues,
            vec![ReuseIssue::PreviouslyUsed {
                domains: vec!["a.example".to_string()]
            }]
        );
    }

    #[tokio::test]
    async fn test_history_failure_reads_as_no_information() {
        let lookup = Arc::new(RecordingLookup::new(PASSWORD_RANGE, &[]));
        let correlator = ReuseCorrelator::new(Arc::new(OfflineHistory)).with_breach_lookup(lookup);

        let issues = correlator.check_reuse(&secret("password"), Some("a.example")).await;
        assert_eq!(issues, vec![ReuseIssue::Breached { count: 9545824 }]);

        let recorded = correlator
            .record_usage(&secret("password"), "a.example")
            .await;
        assert!(matches!(recorded, Err(HistoryError::Unavailable(_))));
    }
}
