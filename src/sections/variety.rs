//! Character variety sections - one rule per required character class.

use secrecy::{ExposeSecret, SecretString};

use super::SectionResult;
use crate::config::PolicyConfig;
use crate::entropy::CharClasses;
use crate::policy::PolicyViolation;

fn classes(password: &SecretString) -> CharClasses {
    CharClasses::of(password.expose_secret())
}

pub fn uppercase_section(password: &SecretString, config: &PolicyConfig) -> SectionResult {
    (config.require_uppercase && !classes(password).uppercase)
        .then_some(PolicyViolation::MissingUppercase)
}

pub fn lowercase_section(password: &SecretString, config: &PolicyConfig) -> SectionResult {
    (config.require_lowercase && !classes(password).lowercase)
        .then_some(PolicyViolation::MissingLowercase)
}

pub fn numbers_section(password: &SecretString, config: &PolicyConfig) -> SectionResult {
    (config.require_numbers && !classes(password).digit).then_some(PolicyViolation::MissingNumbers)
}

pub fn special_section(password: &SecretString, config: &PolicyConfig) -> SectionResult {
    (config.require_special && !classes(password).special)
        .then_some(PolicyViolation::MissingSpecial)
}
