//! Date-pattern detector.

use std::sync::LazyLock;

use regex::Regex;

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // year at end
        r"[0-9]{4}$",
        // YYMMDD
        r"[0-9]{2}(0[1-9]|1[0-2])(0[1-9]|[12][0-9]|3[01])",
        // MMDDYY(YY)
        r"(0[1-9]|1[0-2])(0[1-9]|[12][0-9]|3[01])[0-9]{2,4}",
        // year at start
        r"^(19|20)[0-9]{2}",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("DATE_PATTERNS entries are valid regex patterns"))
    .collect()
});

/// Returns `true` if the password contains a date-like digit run.
pub fn test_date_patterns(password: &str) -> bool {
    DATE_PATTERNS.iter().any(|pattern| pattern.is_match(password))
}
