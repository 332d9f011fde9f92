//! Entropy & policy validator.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::config::PolicyConfig;
use crate::entropy::entropy_bits;
use crate::sections::{
    Section, entropy_section, length_section, lowercase_section, numbers_section,
    repetition_section, special_section, uppercase_section,
};

/// A failed policy rule.
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyViolation {
    /// Password is empty; no other rule is checked.
    Empty,
    TooShort { min: usize, actual: usize },
    MissingUppercase,
    MissingLowercase,
    MissingNumbers,
    MissingSpecial,
    LowEntropy { bits: f64 },
    RepeatingChars { max: usize },
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Password cannot be empty"),
            Self::TooShort { min, .. } => {
                write!(f, "Password must be at least {min} characters long")
            }
            Self::MissingUppercase => write!(f, "Password must contain uppercase letters"),
            Self::MissingLowercase => write!(f, "Password must contain lowercase letters"),
            Self::MissingNumbers => write!(f, "Password must contain numbers"),
            Self::MissingSpecial => write!(f, "Password must contain special characters"),
            Self::LowEntropy { bits } => {
                write!(f, "Password is not complex enough (entropy: {bits:.2} bits)")
            }
            Self::RepeatingChars { max } => write!(
                f,
                "Password must not repeat a character more than {max} times in a row"
            ),
        }
    }
}

/// Outcome of [`evaluate_policy`].
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyEvaluation {
    pub entropy_bits: f64,
    /// Failed rules, in rule declaration order.
    pub violations: Vec<PolicyViolation>,
}

impl PolicyEvaluation {
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }

    /// Human-readable violation strings.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

/// Rules in declaration order. Repetition comes last so the
/// length/class/entropy ordering is stable whatever it reports.
const SECTIONS: [(&str, Section); 7] = [
    ("length", length_section),
    ("uppercase", uppercase_section),
    ("lowercase", lowercase_section),
    ("numbers", numbers_section),
    ("special", special_section),
    ("entropy", entropy_section),
    ("repetition", repetition_section),
];

/// Computes the entropy estimate and checks every policy rule.
///
/// Violations accumulate; a failing rule never stops the ones after it.
/// An empty password yields only [`PolicyViolation::Empty`] and 0 bits.
pub fn evaluate_policy(password: &SecretString, config: &PolicyConfig) -> PolicyEvaluation {
    if password.expose_secret().is_empty() {
        return PolicyEvaluation {
            entropy_bits: 0.0,
            violations: vec![PolicyViolation::Empty],
        };
    }

    let mut violations = Vec::new();
    for (_section_name, section_fn) in SECTIONS {
        if let Some(violation) = section_fn(password, config) {
            #[cfg(feature = "tracing")]
            tracing::debug!(section = _section_name, "policy rule failed");
            violations.push(violation);
        }
    }

    PolicyEvaluation {
        entropy_bits: entropy_bits(password.expose_secret()),
        violations,
    }
}
