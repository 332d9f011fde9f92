//! Length section - checks password minimum length.

use secrecy::{ExposeSecret, SecretString};

use super::SectionResult;
use crate::config::PolicyConfig;
use crate::policy::PolicyViolation;

/// Checks if the password meets the configured minimum length.
///
/// Length is counted in characters, not bytes.
pub fn length_section(password: &SecretString, config: &PolicyConfig) -> SectionResult {
    let actual = password.expose_secret().chars().count();
    if actual < config.min_length {
        return Some(PolicyViolation::TooShort {
            min: config.min_length,
            actual,
        });
    }
    None
}
