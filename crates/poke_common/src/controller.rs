//! Submission controller
//!
//! Owns the `SubmissionState` and runs one prediction request at a time:
//!
//! ```text
//! Idle | Succeeded | Failed  ->  Pending  ->  Succeeded | Failed
//! ```
//!
//! The state lives in a `watch` channel. The presentation layer either reads
//! a snapshot with `state()` or follows every transition through
//! `subscribe()`; it never mutates it.

use crate::error_classifier::{classify, ClassifiedError, ErrorCategory, SubmissionFailure};
use crate::feature_vector::FeatureVector;
use crate::normalizer::normalize;
use crate::state::SubmissionState;
use crate::transport::PredictionTransport;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Message left behind when a pending submission's future is dropped
const INTERRUPTED: &str = "The prediction request was interrupted before it completed.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("A prediction is already in progress")]
    AlreadyPending,
}

pub struct SubmissionController<T: PredictionTransport> {
    transport: T,
    timeout: Option<Duration>,
    state: watch::Sender<SubmissionState>,
}

impl<T: PredictionTransport> SubmissionController<T> {
    pub fn new(transport: T) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            transport,
            timeout: None,
            state,
        }
    }

    /// Bound each request; `None` waits for the service indefinitely
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one prediction for `vector` and return the terminal state.
    ///
    /// Rejected while another submission is pending; the in-flight request
    /// and the current state are left untouched. Every failure of the request
    /// itself ends in `Failed`, never in an `Err`.
    pub async fn submit(&self, vector: FeatureVector) -> Result<SubmissionState, SubmitRejected> {
        // Check and transition under the channel lock so two callers cannot both get in
        let accepted = self.state.send_if_modified(|state| {
            if state.is_pending() {
                return false;
            }
            *state = SubmissionState::Pending { vector };
            true
        });

        if !accepted {
            warn!("Submission rejected: a prediction is already pending");
            return Err(SubmitRejected::AlreadyPending);
        }

        let mut guard = PendingGuard {
            state: &self.state,
            armed: true,
        };

        debug!(?vector, "Submitting feature vector");
        let terminal = match self.request(&vector).await {
            Ok(body) => {
                let display_text = normalize(&body);
                info!(prediction = %display_text, "Prediction received");
                SubmissionState::Succeeded { display_text }
            }
            Err(failure) => {
                let classified = classify(&failure);
                warn!(%failure, category = %classified.category, "Prediction failed");
                SubmissionState::failed(classified)
            }
        };

        guard.armed = false;
        self.state.send_replace(terminal.clone());
        Ok(terminal)
    }

    async fn request(&self, vector: &FeatureVector) -> Result<String, SubmissionFailure> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.transport.post(vector))
                .await
                .map_err(|_| SubmissionFailure::Timeout(limit.as_secs()))?,
            None => self.transport.post(vector).await,
        }
    }
}

/// Moves the state out of `Pending` if `submit` is dropped mid-request
struct PendingGuard<'a> {
    state: &'a watch::Sender<SubmissionState>,
    armed: bool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Pending submission dropped before completion");
            self.state.send_replace(SubmissionState::failed(ClassifiedError {
                category: ErrorCategory::UnknownError,
                message: INTERRUPTED.to_string(),
            }));
        }
    }
}
