//! Duration input validation
//!
//! Only plain minute counts are accepted. Clock-style input (`HH:MM:SS`)
//! is rejected outright.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ValidationError;

/// Upper bound on the target duration, in minutes
pub const MAX_MINUTES: f64 = 1000.0;

/// A validated, strictly positive target duration in minutes.
///
/// Only produced by [`DurationPolicy::validate`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Minutes(f64);

impl Minutes {
    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn as_seconds(&self) -> f64 {
        self.0 * 60.0
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64 Display prints `30` for 30.0 and keeps fractions as entered
        write!(f, "{}", self.0)
    }
}

/// Rule set applied to raw duration input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationPolicy {
    pub max_minutes: f64,
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self {
            max_minutes: MAX_MINUTES,
        }
    }
}

impl DurationPolicy {
    pub fn new(max_minutes: f64) -> Self {
        Self { max_minutes }
    }

    /// Validate a raw duration string.
    ///
    /// Checks run in a fixed order: empty, colon, numeric, range.
    pub fn validate(&self, raw: &str) -> Result<Minutes, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        if trimmed.contains(':') {
            return Err(ValidationError::UnsupportedFormat);
        }

        let value = trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ValidationError::NotANumber(trimmed.to_string()))?;

        if value <= 0.0 || value > self.max_minutes {
            return Err(ValidationError::OutOfRange {
                value,
                max: self.max_minutes,
            });
        }

        Ok(Minutes(value))
    }
}

/// Validate with the default policy (minutes only, at most 1000)
pub fn validate_duration(raw: &str) -> Result<Minutes, ValidationError> {
    DurationPolicy::default().validate(raw)
}
