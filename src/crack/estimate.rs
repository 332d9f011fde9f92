//! Brute-force cracking time estimate.
//!
//! Advisory only: assumes an exhaustive search over the apparent charset at
//! a fixed guess rate.

use std::fmt;

use crate::entropy::charset_size;

/// Assumed attack rate: 100 billion guesses per second.
pub const GUESSES_PER_SECOND: f64 = 1e11;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const YEAR: f64 = 31_536_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Years,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Years => "years",
        }
    }
}

/// Human-scale rendering of an estimate, rounded to the nearest whole unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrackTime {
    /// Saturates at `u64::MAX` for astronomically long estimates.
    pub amount: u64,
    pub unit: TimeUnit,
}

impl CrackTime {
    pub fn from_seconds(seconds: f64) -> Self {
        let (divisor, unit) = if seconds < MINUTE {
            (1.0, TimeUnit::Seconds)
        } else if seconds < HOUR {
            (MINUTE, TimeUnit::Minutes)
        } else if seconds < DAY {
            (HOUR, TimeUnit::Hours)
        } else if seconds < YEAR {
            (DAY, TimeUnit::Days)
        } else {
            (YEAR, TimeUnit::Years)
        };

        Self {
            // float-to-int `as` saturates, infinity included
            amount: (seconds / divisor).round() as u64,
            unit,
        }
    }
}

impl fmt::Display for CrackTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit.as_str())
    }
}

/// Seconds needed to try `charset_size ^ length` combinations.
///
/// May be `f64::INFINITY` for long passwords.
pub fn estimate_seconds(password: &str) -> f64 {
    let length = i32::try_from(password.chars().count()).unwrap_or(i32::MAX);
    let combinations = f64::from(charset_size(password)).powi(length);
    combinations / GUESSES_PER_SECOND
}
