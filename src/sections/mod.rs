//! Policy rule sections
//!
//! Each section checks one rule of the `PolicyConfig` and reports at most
//! one violation. The policy evaluator runs them all, in declaration order.

mod complexity;
mod length;
mod repetition;
mod variety;

pub use complexity::entropy_section;
pub use length::length_section;
pub use repetition::repetition_section;
pub use variety::{lowercase_section, numbers_section, special_section, uppercase_section};

use crate::config::PolicyConfig;
use crate::policy::PolicyViolation;
use secrecy::SecretString;

/// Result type for section evaluation functions.
/// - `Some(violation)` - Rule failed
/// - `None` - Rule passed or is disabled
pub type SectionResult = Option<PolicyViolation>;

/// Signature shared by every section.
pub type Section = fn(&SecretString, &PolicyConfig) -> SectionResult;
