//! Repetition section - detects runs of the same character.

use secrecy::{ExposeSecret, SecretString};

use super::SectionResult;
use crate::config::PolicyConfig;
use crate::policy::PolicyViolation;

/// Flags a run of identical consecutive characters longer than
/// `max_repeating_chars`.
pub fn repetition_section(password: &SecretString, config: &PolicyConfig) -> SectionResult {
    let max = config.max_repeating_chars?;
    let chars: Vec<char> = password.expose_secret().chars().collect();

    let mut repeated_count = 1;
    for i in 1..chars.len() {
        if chars[i] == chars[i - 1] {
            repeated_count += 1;
            if repeated_count > max {
                return Some(PolicyViolation::RepeatingChars { max });
            }
        } else {
            repeated_count = 1;
        }
    }

    None
}
