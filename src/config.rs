//! Policy configuration.
//!
//! A `PolicyConfig` is built once at startup and only read afterwards.

/// Password policy rules checked by the validator.
///
/// Values are not validated: a `min_length` of zero or a negative entropy
/// floor simply disables the corresponding rule.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyConfig {
    pub min_length: usize,
    pub min_entropy_bits: f64,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_numbers: bool,
    pub require_special: bool,
    /// Longest allowed run of one repeated character. `None` disables the rule.
    pub max_repeating_chars: Option<usize>,
    /// Run the reuse/breach correlator during validation.
    pub prevent_reuse: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_length: 12,
            min_entropy_bits: 60.0,
            require_uppercase: true,
            require_lowercase: true,
            require_numbers: true,
            require_special: true,
            max_repeating_chars: Some(2),
            prevent_reuse: true,
        }
    }
}

impl PolicyConfig {
    #[must_use]
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    #[must_use]
    pub fn with_min_entropy_bits(mut self, bits: f64) -> Self {
        self.min_entropy_bits = bits;
        self
    }

    /// Sets all four character class requirements at once.
    #[must_use]
    pub fn with_required_classes(
        mut self,
        uppercase: bool,
        lowercase: bool,
        numbers: bool,
        special: bool,
    ) -> Self {
        self.require_uppercase = uppercase;
        self.require_lowercase = lowercase;
        self.require_numbers = numbers;
        self.require_special = special;
        self
    }

    #[must_use]
    pub fn with_max_repeating_chars(mut self, max: Option<usize>) -> Self {
        self.max_repeating_chars = max;
        self
    }

    #[must_use]
    pub fn with_prevent_reuse(mut self, prevent_reuse: bool) -> Self {
        self.prevent_reuse = prevent_reuse;
        self
    }
}
