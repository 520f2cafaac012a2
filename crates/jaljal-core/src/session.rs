//! Search session controller
//!
//! Owns the lifecycle of a search: `Idle -> Validating -> Submitting ->
//! (Succeeded | Failed)`. The controller does no I/O itself. A submission
//! hands back a [`Ticket`] together with the request; whoever performs the
//! call reports the outcome through [`SessionController::resolve`].
//!
//! Only the outcome carrying the most recently issued ticket is applied.
//! Anything older is dropped as stale.

use tracing::debug;

use crate::{
    DEFAULT_ATTEMPTS, DurationPolicy, SearchError, SearchRequest, SearchResult, ValidationError,
};

/// Message shown when the service answered but the answer was unusable
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch combinations";

/// Message shown when no response was received at all
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Sequence number identifying one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Why the session ended up in `Failed`
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// Rejected locally; shown next to the input field
    Validation(ValidationError),
    /// The search call failed; shown as a page-level notice
    Search {
        message: String,
        hint: Option<String>,
    },
}

impl Failure {
    pub fn message(&self) -> String {
        match self {
            Failure::Validation(err) => err.to_string(),
            Failure::Search { message, .. } => message.clone(),
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            Failure::Validation(_) => None,
            Failure::Search { hint, .. } => hint.as_deref(),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Failure::Validation(_))
    }
}

impl From<&SearchError> for Failure {
    fn from(err: &SearchError) -> Self {
        match err {
            SearchError::ServiceRejected { message, hint } => Failure::Search {
                message: message.clone(),
                hint: hint.clone(),
            },
            SearchError::TransportFailure(_) => Failure::Search {
                message: FETCH_FAILED_MESSAGE.to_string(),
                hint: None,
            },
            SearchError::Unreachable(_) => Failure::Search {
                message: UNEXPECTED_ERROR_MESSAGE.to_string(),
                hint: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Validating,
    Submitting {
        ticket: Ticket,
    },
    Succeeded(SearchResult),
    Failed(Failure),
}

/// What happened to an outcome passed to [`SessionController::resolve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied { scroll_to_results: bool },
    Stale,
}

/// A request that passed validation and must now be sent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Submission {
    pub ticket: Ticket,
    pub request: SearchRequest,
}

pub struct SessionController {
    policy: DurationPolicy,
    default_attempts: u32,
    state: SessionState,
    last_ticket: u64,
}

impl SessionController {
    pub fn new(policy: DurationPolicy, default_attempts: u32) -> Self {
        Self {
            policy,
            default_attempts,
            state: SessionState::Idle,
            last_ticket: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn policy(&self) -> &DurationPolicy {
        &self.policy
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Submitting { .. })
    }

    /// Validate raw input and, if it passes, start a new submission.
    ///
    /// Any earlier result or error is discarded here, before the call is
    /// made, so a loading state never shows an older result list.
    pub fn submit(
        &mut self,
        raw_duration: &str,
        attempts: Option<u32>,
    ) -> Result<Submission, ValidationError> {
        self.state = SessionState::Validating;

        let request = self.policy.validate(raw_duration).and_then(|minutes| {
            SearchRequest::build(minutes, attempts.or(Some(self.default_attempts)))
        });

        match request {
            Ok(request) => {
                self.last_ticket += 1;
                let ticket = Ticket(self.last_ticket);
                debug!(ticket = ticket.0, duration = %request.duration(), attempts = request.attempts(), "Submitting search");
                self.state = SessionState::Submitting { ticket };
                Ok(Submission { ticket, request })
            }
            Err(err) => {
                debug!(error = %err, "Rejected search input");
                self.state = SessionState::Failed(Failure::Validation(err.clone()));
                Err(err)
            }
        }
    }

    /// Record input the caller rejected before calling [`Self::submit`].
    ///
    /// Replaces any result or error on screen. An in-flight submission
    /// resolves as stale afterwards.
    pub fn reject(&mut self, err: ValidationError) {
        debug!(error = %err, "Rejected search input");
        self.state = SessionState::Failed(Failure::Validation(err));
    }

    /// Commit the outcome of a search call, unless a newer submission exists.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        outcome: Result<SearchResult, SearchError>,
    ) -> Resolution {
        let is_current =
            matches!(self.state, SessionState::Submitting { ticket: current } if current == ticket);
        if !is_current {
            debug!(ticket = ticket.0, latest = self.last_ticket, "Discarding stale search outcome");
            return Resolution::Stale;
        }

        match outcome {
            Ok(result) => {
                let scroll_to_results = !result.is_empty();
                debug!(ticket = ticket.0, combinations = result.len(), "Search succeeded");
                self.state = SessionState::Succeeded(result);
                Resolution::Applied { scroll_to_results }
            }
            Err(err) => {
                debug!(ticket = ticket.0, error = %err, "Search failed");
                self.state = SessionState::Failed(Failure::from(&err));
                Resolution::Applied {
                    scroll_to_results: false,
                }
            }
        }
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(DurationPolicy::default(), DEFAULT_ATTEMPTS)
    }
}
