//! Password crack-simulation and entropy scoring library
//!
//! Scores a candidate password's resistance to guessing and explains why:
//! charset entropy and policy rules, a battery of crack heuristics
//! (patterns, leet substitutions, keyboard walks, dates, length) and,
//! with the `async` feature, reuse and breach correlation.
//!
//! # Features
//!
//! - `async` (default): Enables the reuse/breach correlator and async validation
//! - `hibp` (default): Enables `HibpClient`, the Have I Been Pwned breach lookup
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_DICTIONARY_PATH`: Custom path to the common-password list
//!   (default: `./assets/common_passwords.csv`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_crackcheck::{PasswordValidator, PolicyConfig};
//! use secrecy::SecretString;
//!
//! let validator = PasswordValidator::new(PolicyConfig::default());
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//!
//! let validation = validator.evaluate(&password);
//! println!("Valid: {}", validation.is_valid);
//! for issue in &validation.issues {
//!     println!("- {issue}");
//! }
//! ```
//!
//! With reuse and breach checks:
//!
//! ```rust,no_run
//! # #[cfg(feature = "hibp")]
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use pwd_crackcheck::{HibpClient, InMemoryHistory, PasswordValidator, PolicyConfig, ReuseCorrelator};
//! use secrecy::SecretString;
//!
//! let correlator = ReuseCorrelator::new(Arc::new(InMemoryHistory::new()))
//!     .with_breach_lookup(Arc::new(HibpClient::new()?));
//! let validator = PasswordValidator::new(PolicyConfig::default()).with_correlator(correlator);
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let validation = validator.validate(&password, Some("example.com")).await;
//! println!("{:?}", validation.issues);
//! # Ok(())
//! # }
//! ```

// Internal modules
mod config;
mod crack;
mod dictionary;
mod entropy;
mod evaluator;
mod fingerprint;
mod policy;
mod sections;

#[cfg(feature = "async")]
mod reuse;

// Public API
pub use config::PolicyConfig;
pub use crack::{
    BRUTE_FORCE_MIN_LENGTH, CrackEngine, CrackMethod, CrackTime, GUESSES_PER_SECOND,
    MAX_VARIANTS, TimeUnit, Weakness, WeaknessReport, estimate_seconds, matched_patterns,
    substitution_variants, test_date_patterns, test_keyboard_patterns, test_length,
    test_patterns, test_substitutions,
};
pub use dictionary::{Dictionary, DictionaryError, get_dictionary_path};
pub use entropy::{CharClasses, EntropyRating, charset_size, entropy_bits};
pub use evaluator::{PasswordValidator, SUCCESS_FEEDBACK, Validation};
pub use fingerprint::{BreachDigest, PasswordFingerprint, RANGE_PREFIX_LEN, RangePrefix};
pub use policy::{PolicyEvaluation, PolicyViolation, evaluate_policy};

#[cfg(feature = "async")]
pub use reuse::{
    BreachError, BreachFinding, BreachLookup, HistoryError, HistoryStore, InMemoryHistory,
    ReuseCorrelator, ReuseIssue, UsageHistoryEntry, parse_range_count,
};

#[cfg(feature = "hibp")]
pub use reuse::{DEFAULT_CATALOG_URL, DEFAULT_RANGE_URL, HibpClient};

// For implementing `HistoryStore` and `BreachLookup`
#[cfg(feature = "async")]
pub use async_trait::async_trait;
