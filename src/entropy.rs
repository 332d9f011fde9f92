//! Charset-based entropy estimate.
//!
//! The charset is an upper bound on the symbol space: each character class
//! present in the password contributes its full size, whatever symbols were
//! actually used.

use std::fmt;

const LOWERCASE_SIZE: u32 = 26;
const UPPERCASE_SIZE: u32 = 26;
const DIGIT_SIZE: u32 = 10;
const SPECIAL_SIZE: u32 = 32;

/// Character classes observed in a password.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharClasses {
    pub lowercase: bool,
    pub uppercase: bool,
    pub digit: bool,
    pub special: bool,
}

impl CharClasses {
    /// Classifies every character. Anything outside `[a-zA-Z0-9]` counts as special.
    pub fn of(password: &str) -> Self {
        let mut classes = Self::default();
        for c in password.chars() {
            match c {
                'a'..='z' => classes.lowercase = true,
                'A'..='Z' => classes.uppercase = true,
                '0'..='9' => classes.digit = true,
                _ => classes.special = true,
            }
        }
        classes
    }

    /// Sum of the sizes of the classes present.
    pub fn charset_size(&self) -> u32 {
        [
            (self.lowercase, LOWERCASE_SIZE),
            (self.uppercase, UPPERCASE_SIZE),
            (self.digit, DIGIT_SIZE),
            (self.special, SPECIAL_SIZE),
        ]
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, size)| size)
        .sum()
    }
}

/// Returns the charset size of `password` (0, 10, 26, ... up to 94).
pub fn charset_size(password: &str) -> u32 {
    CharClasses::of(password).charset_size()
}

/// Entropy in bits: `length * log2(charset_size)`.
///
/// Length is counted in characters. An empty charset yields 0.
pub fn entropy_bits(password: &str) -> f64 {
    let charset = charset_size(password);
    if charset == 0 {
        return 0.0;
    }
    password.chars().count() as f64 * f64::from(charset).log2()
}

/// Human tier for an entropy estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntropyRating {
    Weak,
    Moderate,
    Good,
    VeryGood,
    Excellent,
}

impl EntropyRating {
    /// Tier bounds are lower-inclusive: 40, 64, 80 and 100 bits.
    pub fn from_bits(bits: f64) -> Self {
        match bits {
            b if b < 40.0 => Self::Weak,
            b if b < 64.0 => Self::Moderate,
            b if b < 80.0 => Self::Good,
            b if b < 100.0 => Self::VeryGood,
            _ => Self::Excellent,
        }
    }

    pub fn of(password: &str) -> Self {
        Self::from_bits(entropy_bits(password))
    }
}

impl fmt::Display for EntropyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Weak => "This is a weak password that could be guessed quickly",
            Self::Moderate => "This is a moderate password that provides basic security",
            Self::Good => "This is a good password with decent protection",
            Self::VeryGood => {
                "This is a very good password that would take significant time to crack"
            }
            Self::Excellent => {
                "This is an excellent password that would take an extremely long time to crack"
            }
        };
        f.write_str(text)
    }
}
