//! Search request descriptor

use crate::{Minutes, ValidationError};

/// Combinations requested when the caller does not say
pub const DEFAULT_ATTEMPTS: u32 = 1;

/// Largest attempt count a caller may ask for
pub const MAX_ATTEMPTS: u32 = 10;

/// Validated, immutable parameters for one search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRequest {
    duration: Minutes,
    attempts: u32,
}

impl SearchRequest {
    /// Build a request from a validated duration.
    ///
    /// `attempts` falls back to [`DEFAULT_ATTEMPTS`] and must lie in `1..=10`.
    pub fn build(duration: Minutes, attempts: Option<u32>) -> Result<Self, ValidationError> {
        let attempts = attempts.unwrap_or(DEFAULT_ATTEMPTS);
        if !(1..=MAX_ATTEMPTS).contains(&attempts) {
            return Err(ValidationError::InvalidAttemptCount(attempts));
        }

        Ok(Self { duration, attempts })
    }

    pub fn duration(&self) -> Minutes {
        self.duration
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Query parameters in the form the service expects
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("duration", self.duration.to_string()),
            ("attempts", self.attempts.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_duration;

    #[test]
    fn test_default_attempts() {
        let request = SearchRequest::build(validate_duration("30").unwrap(), None).unwrap();
        assert_eq!(request.attempts(), DEFAULT_ATTEMPTS);
        assert_eq!(request.duration().value(), 30.0);
    }

    #[test]
    fn test_attempt_bounds() {
        let minutes = validate_duration("30").unwrap();
        assert!(SearchRequest::build(minutes, Some(1)).is_ok());
        assert!(SearchRequest::build(minutes, Some(10)).is_ok());
        assert_eq!(
            SearchRequest::build(minutes, Some(0)),
            Err(ValidationError::InvalidAttemptCount(0))
        );
        assert_eq!(
            SearchRequest::build(minutes, Some(11)),
            Err(ValidationError::InvalidAttemptCount(11))
        );
    }

    #[test]
    fn test_query_pairs() {
        let request = SearchRequest::build(validate_duration("45").unwrap(), Some(3)).unwrap();
        assert_eq!(
            request.query_pairs(),
            vec![("duration", "45".to_string()), ("attempts", "3".to_string())]
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let minutes = validate_duration("7.5").unwrap();
        assert_eq!(
            SearchRequest::build(minutes, Some(2)),
            SearchRequest::build(minutes, Some(2))
        );
    }
}
