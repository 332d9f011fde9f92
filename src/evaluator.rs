//! Password validator - the engine entrypoint.
//!
//! A `PasswordValidator` is the session context handed to host code: it owns
//! the policy, the crack engine and, optionally, the reuse correlator.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use std::time::Duration;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::config::PolicyConfig;
use crate::crack::{CrackEngine, WeaknessReport};
use crate::entropy::EntropyRating;
use crate::policy::{PolicyEvaluation, PolicyViolation, evaluate_policy};

#[cfg(feature = "async")]
use crate::reuse::ReuseCorrelator;

/// Delay before `validate_tx` starts work, so keystroke bursts collapse.
#[cfg(feature = "async")]
const DEBOUNCE: Duration = Duration::from_millis(300);

/// `Validation::feedback` for a password with no issues.
pub const SUCCESS_FEEDBACK: &str = "Password meets all security requirements!";

/// Aggregated verdict for one password.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    /// `false` on any policy violation, reuse issue or crackable verdict.
    pub is_valid: bool,
    pub entropy_bits: f64,
    pub rating: EntropyRating,
    /// Policy violations, then reuse issues, then crack findings.
    pub issues: Vec<String>,
    /// [`SUCCESS_FEEDBACK`] when valid, otherwise `issues` one per line.
    pub feedback: String,
    /// Crack engine report. `None` for an empty password.
    pub weakness: Option<WeaknessReport>,
}

impl Validation {
    fn empty() -> Self {
        let issue = PolicyViolation::Empty.to_string();
        Self {
            is_valid: false,
            entropy_bits: 0.0,
            rating: EntropyRating::Weak,
            feedback: issue.clone(),
            issues: vec![issue],
            weakness: None,
        }
    }

    fn assemble(policy: PolicyEvaluation, reuse: Vec<String>, weakness: WeaknessReport) -> Self {
        let is_valid = policy.is_compliant() && reuse.is_empty() && !weakness.crackable;

        let mut issues = policy.messages();
        issues.extend(reuse);
        if weakness.crackable {
            issues.push(format!(
                "This password could be cracked in {}",
                weakness.time_estimate
            ));
            issues.extend(weakness.weaknesses.iter().map(ToString::to_string));
        }

        let feedback = if is_valid {
            SUCCESS_FEEDBACK.to_string()
        } else {
            issues.join("\n")
        };

        Self {
            is_valid,
            entropy_bits: policy.entropy_bits,
            rating: EntropyRating::from_bits(policy.entropy_bits),
            issues,
            feedback,
            weakness: Some(weakness),
        }
    }
}

/// Validation session context.
pub struct PasswordValidator {
    config: PolicyConfig,
    engine: CrackEngine,
    #[cfg(feature = "async")]
    correlator: Option<ReuseCorrelator>,
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}

impl PasswordValidator {
    /// Validator with a [`CrackEngine::new`] engine and no correlator.
    pub fn new(config: PolicyConfig) -> Self {
        Self {
            config,
            engine: CrackEngine::new(),
            #[cfg(feature = "async")]
            correlator: None,
        }
    }

    #[must_use]
    pub fn with_engine(mut self, engine: CrackEngine) -> Self {
        self.engine = engine;
        self
    }

    #[cfg(feature = "async")]
    #[must_use]
    pub fn with_correlator(mut self, correlator: ReuseCorrelator) -> Self {
        self.correlator = Some(correlator);
        self
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn engine(&self) -> &CrackEngine {
        &self.engine
    }

    pub fn evaluate_policy(&self, password: &SecretString) -> PolicyEvaluation {
        evaluate_policy(password, &self.config)
    }

    pub fn simulate_crack(&self, password: &SecretString) -> WeaknessReport {
        self.engine.simulate_crack(password)
    }

    /// Policy and crack checks only; never touches a collaborator.
    pub fn evaluate(&self, password: &SecretString) -> Validation {
        if password.expose_secret().is_empty() {
            return Validation::empty();
        }

        let policy = self.evaluate_policy(password);
        let weakness = self.simulate_crack(password);
        Validation::assemble(policy, Vec::new(), weakness)
    }

    /// Full validation: policy, reuse/breach correlation and crack checks.
    ///
    /// The correlator runs only when `prevent_reuse` is set and one is
    /// attached. Collaborator failures contribute no issues.
    #[cfg(feature = "async")]
    pub async fn validate(&self, password: &SecretString, domain: Option<&str>) -> Validation {
        if password.expose_secret().is_empty() {
            return Validation::empty();
        }

        let policy = self.evaluate_policy(password);

        let reuse: Vec<String> = match &self.correlator {
            Some(correlator) if self.config.prevent_reuse => correlator
                .check_reuse(password, domain)
                .await
                .iter()
                .map(ToString::to_string)
                .collect(),
            _ => Vec::new(),
        };

        let weakness = self.simulate_crack(password);
        Validation::assemble(policy, reuse, weakness)
    }

    /// Debounced validation that sends its result over a channel.
    ///
    /// Nothing is sent if `token` is cancelled before validation completes.
    #[cfg(feature = "async")]
    pub async fn validate_tx(
        &self,
        password: &SecretString,
        domain: Option<&str>,
        token: CancellationToken,
        tx: mpsc::Sender<Validation>,
    ) {
        #[cfg(feature = "tracing")]
        tracing::info!("validation is about to start...");

        tokio::select! {
            _ = token.cancelled() => return,
            _ = tokio::time::sleep(DEBOUNCE) => {}
        }

        let validation = tokio::select! {
            _ = token.cancelled() => return,
            validation = self.validate(password, domain) => validation,
        };

        if let Err(_e) = tx.send(validation).await {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to send password validation result: {}", _e);
        }
    }
}
