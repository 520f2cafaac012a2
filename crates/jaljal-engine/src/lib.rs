use std::sync::Arc;

use jaljal_client::CombinationSearch;
use jaljal_core::{
    DurationPolicy, Resolution, SearchError, SearchRequest, SearchResult, SessionController,
    SessionState, Submission, Ticket, ValidationError,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

/// Outcome of one dispatched search, tagged with its ticket
pub type Outcome = (Ticket, Result<SearchResult, SearchError>);

/// Drives a [`SessionController`] against a search backend.
///
/// The controller decides what is current; the engine only moves
/// requests out and outcomes back in.
pub struct SearchEngine {
    controller: SessionController,
    client: Arc<dyn CombinationSearch>,
    pending: Option<Submission>,
}

impl SearchEngine {
    pub fn new(controller: SessionController, client: Arc<dyn CombinationSearch>) -> Self {
        Self {
            controller,
            client,
            pending: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        self.controller.state()
    }

    pub fn is_loading(&self) -> bool {
        self.controller.is_loading()
    }

    pub fn policy(&self) -> &DurationPolicy {
        self.controller.policy()
    }

    /// Run a search to completion on the current task
    pub async fn search(
        &mut self,
        raw_duration: &str,
        attempts: Option<u32>,
    ) -> Result<Resolution, ValidationError> {
        let submission = self.submit(raw_duration, attempts)?;
        let outcome = self.client.search(&submission.request).await;
        Ok(self.apply((submission.ticket, outcome)))
    }

    /// Start a search in the background.
    ///
    /// The outcome is sent on `tx` and must be handed to [`Self::apply`].
    /// Earlier dispatches still complete but resolve as stale.
    pub fn dispatch(
        &mut self,
        raw_duration: &str,
        attempts: Option<u32>,
        tx: UnboundedSender<Outcome>,
    ) -> Result<Ticket, ValidationError> {
        let submission = self.submit(raw_duration, attempts)?;
        let client = Arc::clone(&self.client);

        tokio::spawn(async move {
            let outcome = client.search(&submission.request).await;
            if tx.send((submission.ticket, outcome)).is_err() {
                debug!(ticket = submission.ticket.sequence(), "Receiver gone, dropping outcome");
            }
        });

        Ok(submission.ticket)
    }

    /// Fail the session on input the caller could not even parse
    pub fn reject(&mut self, err: ValidationError) {
        self.pending = None;
        self.controller.reject(err);
    }

    /// Commit an outcome to the session
    pub fn apply(&mut self, (ticket, outcome): Outcome) -> Resolution {
        if let (Some(pending), Ok(result)) = (&self.pending, &outcome)
            && pending.ticket == ticket
        {
            check_contract(&pending.request, result);
        }

        let resolution = self.controller.resolve(ticket, outcome);
        if resolution != Resolution::Stale {
            self.pending = None;
        }
        resolution
    }

    fn submit(
        &mut self,
        raw_duration: &str,
        attempts: Option<u32>,
    ) -> Result<Submission, ValidationError> {
        match self.controller.submit(raw_duration, attempts) {
            Ok(submission) => {
                self.pending = Some(submission);
                Ok(submission)
            }
            Err(err) => {
                self.pending = None;
                Err(err)
            }
        }
    }
}

/// Log combinations whose total and remaining time do not add up to the target.
///
/// The service owns this invariant; the client reports but never rejects.
fn check_contract(request: &SearchRequest, result: &SearchResult) {
    let mismatches = result.mismatches(request.duration());
    if !mismatches.is_empty() {
        warn!(
            target_minutes = %request.duration(),
            ?mismatches,
            "Combination times do not reconcile with the requested duration"
        );
    }
}
