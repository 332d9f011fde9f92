//! Crack heuristic engine
//!
//! Runs every weakness detector against a password and folds the outcomes
//! into a [`WeaknessReport`]. Detectors are independent: each one always
//! runs, and the report is the union of their findings.

mod date;
mod estimate;
mod keyboard;
mod pattern;
mod substitution;

pub use date::test_date_patterns;
pub use estimate::{CrackTime, GUESSES_PER_SECOND, TimeUnit, estimate_seconds};
pub use keyboard::test_keyboard_patterns;
pub use pattern::{matched_patterns, test_patterns};
pub use substitution::{MAX_VARIANTS, substitution_variants, test_substitutions};

use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use secrecy::{ExposeSecret, SecretString};

use crate::dictionary::{Dictionary, get_dictionary_path};

/// Passwords shorter than this are considered brute-forceable.
pub const BRUTE_FORCE_MIN_LENGTH: usize = 12;

/// The technique a detector stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrackMethod {
    Pattern,
    Substitution,
    Keyboard,
    Date,
    BruteForce,
}

impl CrackMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Substitution => "substitution",
            Self::Keyboard => "keyboard",
            Self::Date => "date",
            Self::BruteForce => "brute-force",
        }
    }
}

impl fmt::Display for CrackMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weakness category flagged by one detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weakness {
    CommonPattern,
    CommonSubstitution,
    KeyboardPattern,
    DatePattern,
    TooShort,
}

impl Weakness {
    pub fn method(&self) -> CrackMethod {
        match self {
            Self::CommonPattern => CrackMethod::Pattern,
            Self::CommonSubstitution => CrackMethod::Substitution,
            Self::KeyboardPattern => CrackMethod::Keyboard,
            Self::DatePattern => CrackMethod::Date,
            Self::TooShort => CrackMethod::BruteForce,
        }
    }

    /// What to change to get rid of this weakness.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::CommonPattern => "Your password follows a common pattern that's easy to guess",
            Self::CommonSubstitution => {
                "Using @ for 'a' or 1 for 'i' is a known trick - try something more creative!"
            }
            Self::KeyboardPattern => "Avoid using keyboard patterns like 'qwerty' or '12345'",
            Self::DatePattern => "Using dates (like birthdays) makes your password easier to guess",
            Self::TooShort => "Try making your password longer (at least 12 characters)",
        }
    }
}

impl fmt::Display for Weakness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::CommonPattern => "Uses common password pattern",
            Self::CommonSubstitution => "Uses common character substitutions",
            Self::KeyboardPattern => "Contains keyboard pattern",
            Self::DatePattern => "Contains date pattern",
            Self::TooShort => "Password is too short",
        };
        f.write_str(text)
    }
}

/// Result of [`CrackEngine::simulate_crack`].
#[derive(Debug, Clone, PartialEq)]
pub struct WeaknessReport {
    pub crackable: bool,
    /// Method of the last detector that flagged, in evaluation order.
    /// Use `methods` for the full list.
    pub method: Option<CrackMethod>,
    /// Every contributing method, in evaluation order.
    pub methods: Vec<CrackMethod>,
    pub time_estimate_seconds: f64,
    pub time_estimate: CrackTime,
    pub weaknesses: Vec<Weakness>,
    /// Names of every shape template the password matched.
    pub patterns: Vec<&'static str>,
}

impl WeaknessReport {
    /// One piece of advice per weakness, in report order.
    pub fn advice(&self) -> Vec<&'static str> {
        self.weaknesses.iter().map(Weakness::advice).collect()
    }
}

/// Returns `true` if the password is shorter than [`BRUTE_FORCE_MIN_LENGTH`].
pub fn test_length(password: &str) -> bool {
    password.chars().count() < BRUTE_FORCE_MIN_LENGTH
}

/// Owns the dictionary used by the substitution detector.
///
/// The dictionary is loaded on first use. A missing or unreadable list
/// degrades to the built-in words.
#[derive(Debug)]
pub struct CrackEngine {
    dictionary_path: Option<PathBuf>,
    dictionary: OnceLock<Dictionary>,
}

impl Default for CrackEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CrackEngine {
    /// Engine reading its dictionary from [`get_dictionary_path`].
    pub fn new() -> Self {
        Self::with_dictionary_path(get_dictionary_path())
    }

    pub fn with_dictionary_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            dictionary_path: Some(path.into()),
            dictionary: OnceLock::new(),
        }
    }

    /// Engine using an already loaded dictionary.
    pub fn with_dictionary(dictionary: Dictionary) -> Self {
        Self {
            dictionary_path: None,
            dictionary: OnceLock::from(dictionary),
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        self.dictionary.get_or_init(|| match &self.dictionary_path {
            Some(path) => Dictionary::load_or_builtin(path),
            None => Dictionary::builtin(),
        })
    }

    /// Runs all five detectors and the time estimator.
    pub fn simulate_crack(&self, password: &SecretString) -> WeaknessReport {
        let pwd = password.expose_secret();

        let patterns = matched_patterns(pwd);
        let outcomes = [
            (Weakness::CommonPattern, !patterns.is_empty()),
            (
                Weakness::CommonSubstitution,
                test_substitutions(pwd, self.dictionary()),
            ),
            (Weakness::KeyboardPattern, test_keyboard_patterns(pwd)),
            (Weakness::DatePattern, test_date_patterns(pwd)),
            (Weakness::TooShort, test_length(pwd)),
        ];

        let weaknesses: Vec<Weakness> = outcomes
            .iter()
            .filter(|(_, flagged)| *flagged)
            .map(|(weakness, _)| *weakness)
            .collect();
        let methods: Vec<CrackMethod> = weaknesses.iter().map(Weakness::method).collect();

        let seconds = estimate_seconds(pwd);

        #[cfg(feature = "tracing")]
        tracing::debug!(?methods, "crack simulation finished");

        WeaknessReport {
            crackable: !weaknesses.is_empty(),
            method: methods.last().copied(),
            methods,
            time_estimate_seconds: seconds,
            time_estimate: CrackTime::from_seconds(seconds),
            weaknesses,
            patterns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> CrackEngine {
        CrackEngine::with_dictionary(Dictionary::builtin())
    }

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[test]
    fn test_strong_password_not_crackable() {
        let report = engine().simulate_crack(&secret("Tr0ub4dor&3!XQ9"));
        assert!(!report.crackable);
        assert!(report.weaknesses.is_empty());
        assert_eq!(report.method, None);
        assert!(report.methods.is_empty());
        assert_eq!(report.time_estimate.unit, TimeUnit::Years);
    }

    #[test]
    fn test_short_password_always_brute_force() {
        for pwd in ["a", "Xk9$mQ2@", "Tr0ub4dor&"] {
            let report = engine().simulate_crack(&secret(pwd));
            assert!(report.crackable);
            assert!(report.methods.contains(&CrackMethod::BruteForce));
            assert_eq!(report.method, Some(CrackMethod::BruteForce));
            assert_eq!(report.weaknesses.last(), Some(&Weakness::TooShort));
        }
    }

    #[test]
    fn test_detectors_accumulate() {
        let report = engine().simulate_crack(&secret("Summer2024"));
        assert_eq!(
            report.weaknesses,
            vec![
                Weakness::CommonPattern,
                Weakness::DatePattern,
                Weakness::TooShort
            ]
        );
        assert_eq!(
            report.methods,
            vec![CrackMethod::Pattern, CrackMethod::Date, CrackMethod::BruteForce]
        );
        assert_eq!(report.patterns, vec!["capitalized word + 2-4 digits"]);
    }

    #[test]
    fn test_report_names_matched_pattern() {
        let report = engine().simulate_crack(&secret("12ab34"));
        assert_eq!(report.patterns, vec!["digits + letters + digits"]);
        assert!(report.weaknesses.contains(&Weakness::CommonPattern));

        let strong = engine().simulate_crack(&secret("Tr0ub4dor&3!XQ9"));
        assert!(strong.patterns.is_empty());
    }

    #[test]
    fn test_method_is_last_flagging_detector() {
        let report = engine().simulate_crack(&secret("qwertyuiop12345!"));
        assert!(report.crackable);
        assert_eq!(report.weaknesses, vec![Weakness::KeyboardPattern]);
        assert_eq!(report.method, Some(CrackMethod::Keyboard));
    }

    #[test]
    fn test_substitution_detected() {
        let report = engine().simulate_crack(&secret("P@ssw0rd"));
        assert!(report.weaknesses.contains(&Weakness::CommonSubstitution));
        assert_eq!(report.method, Some(CrackMethod::BruteForce));
    }

    #[test]
    fn test_dictionary_loaded_lazily_from_missing_path() {
        let engine = CrackEngine::with_dictionary_path("/nonexistent/path/words.csv");
        let report = engine.simulate_crack(&secret("L3tMe1nL3tMe1n"));
        assert!(!report.weaknesses.contains(&Weakness::CommonSubstitution));
        assert!(engine.dictionary().contains("letmein"));
    }

    #[test]
    fn test_weakness_messages() {
        assert_eq!(Weakness::TooShort.to_string(), "Password is too short");
        assert_eq!(CrackMethod::BruteForce.to_string(), "brute-force");
    }

    #[test]
    fn test_advice_follows_weaknesses() {
        let report = engine().simulate_crack(&secret("Summer2024"));
        assert_eq!(
            report.advice(),
            vec![
                "Your password follows a common pattern that's easy to guess",
                "Using dates (like birthdays) makes your password easier to guess",
                "Try making your password longer (at least 12 characters)",
            ]
        );
        assert_eq!(
            Weakness::CommonSubstitution.advice(),
            "Using @ for 'a' or 1 for 'i' is a known trick - try something more creative!"
        );
        assert!(engine().simulate_crack(&secret("Tr0ub4dor&3!XQ9")).advice().is_empty());
    }
}
