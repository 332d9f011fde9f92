//! Entropy section - checks the charset entropy floor.

use secrecy::{ExposeSecret, SecretString};

use super::SectionResult;
use crate::config::PolicyConfig;
use crate::entropy::entropy_bits;
use crate::policy::PolicyViolation;

pub fn entropy_section(password: &SecretString, config: &PolicyConfig) -> SectionResult {
    let bits = entropy_bits(password.expose_secret());
    if bits < config.min_entropy_bits {
        return Some(PolicyViolation::LowEntropy { bits });
    }
    None
}
