use thiserror::Error;

/// Input rejected before any request is built.
///
/// The display text is what the form shows next to the offending field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please enter a duration in minutes")]
    EmptyInput,

    #[error("Time format (HH:MM:SS) is not supported, enter minutes instead")]
    UnsupportedFormat,

    #[error("Duration must be a number of minutes: {0}")]
    NotANumber(String),

    #[error("Duration must be greater than 0 and at most {max} minutes (got {value})")]
    OutOfRange { value: f64, max: f64 },

    #[error("Number of combinations must be between 1 and 10 (got {0})")]
    InvalidAttemptCount(u32),

    #[error("Number of combinations must be a whole number")]
    AttemptsNotANumber(String),
}

/// Failure of a single call to the combination-search service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The service answered with a structured `{"error": ...}` body.
    #[error("Service rejected request: {message}")]
    ServiceRejected {
        message: String,
        hint: Option<String>,
    },

    /// A response arrived but could not be used.
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// No response was received (connect error, DNS, timeout).
    #[error("Service unreachable: {0}")]
    Unreachable(String),
}
