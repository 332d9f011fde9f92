//! Pattern detector - common password shapes.

use std::sync::LazyLock;

use regex::Regex;

/// Shape templates, in evaluation order. The patterns are constants, so a
/// failure to compile is a programming error.
static COMMON_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("capitalized word + 2-4 digits", r"^[A-Z][a-z]+[0-9]{2,4}$"),
        ("lowercase word + 2-4 digits", r"^[a-z]+[0-9]{2,4}!?$"),
        (
            "capitalized word + 1-2 digits + symbol",
            r"^[A-Z][a-z]+[0-9]{1,2}[!@#$%^&*]$",
        ),
        ("digits + letters + digits", r"^[0-9]{2,4}[A-Za-z]+[0-9]{2,4}$"),
    ]
    .into_iter()
    .map(|(name, pattern)| {
        (
            name,
            Regex::new(pattern).expect("COMMON_PATTERNS entries are valid regex patterns"),
        )
    })
    .collect()
});

/// Names of every shape template the password matches.
pub fn matched_patterns(password: &str) -> Vec<&'static str> {
    COMMON_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(password))
        .map(|(name, _)| *name)
        .collect()
}

/// Returns `true` if the password follows any common shape.
pub fn test_patterns(password: &str) -> bool {
    COMMON_PATTERNS
        .iter()
        .any(|(_, pattern)| pattern.is_match(password))
}
