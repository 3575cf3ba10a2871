//! Error classification for failed submissions
//!
//! Every failure the controller catches ends up as a `ClassifiedError`, a
//! category plus a message fit to show the user.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown whenever no response could be obtained from the service
pub const CONNECTION_ADVISORY: &str = "Connection error. The prediction service may be offline, \
or the request was blocked by a cross-origin (CORS) security policy when running locally.";

/// Used when a failure carries no description of its own
pub const GENERIC_FAILURE: &str = "An error occurred while querying the service.";

/// Marker text of a network-level fetch failure
const FAILED_TO_FETCH: &str = "Failed to fetch";

/// User-facing failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Non-2xx status from the service
    HttpError,
    /// No response obtained (offline, refused, DNS, blocked)
    ConnectionError,
    UnknownError,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::HttpError => "HttpError",
            ErrorCategory::ConnectionError => "ConnectionError",
            ErrorCategory::UnknownError => "UnknownError",
        };
        f.write_str(name)
    }
}

/// Failure caught while running a submission
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionFailure {
    #[error("API error: HTTP {0}")]
    Status(u16),

    #[error("Failed to fetch: {0}")]
    Network(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for SubmissionFailure {
    fn from(e: reqwest::Error) -> Self {
        // Anything short of a response (bad URL, redirect policy, connect,
        // dropped body) is a fetch failure; only an undecodable body is not
        if let Some(status) = e.status() {
            SubmissionFailure::Status(status.as_u16())
        } else if e.is_decode() {
            SubmissionFailure::Other(e.to_string())
        } else {
            SubmissionFailure::Network(e.to_string())
        }
    }
}

/// Category and message for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedError {
    pub category: ErrorCategory,
    pub message: String,
}

/// Map a caught failure to a category and user-facing message. Never fails.
pub fn classify(failure: &SubmissionFailure) -> ClassifiedError {
    let description = failure.to_string();

    let category = match failure {
        SubmissionFailure::Network(_) | SubmissionFailure::Timeout(_) => {
            ErrorCategory::ConnectionError
        }
        _ if description.contains(FAILED_TO_FETCH) => ErrorCategory::ConnectionError,
        SubmissionFailure::Status(_) => ErrorCategory::HttpError,
        SubmissionFailure::Other(_) => ErrorCategory::UnknownError,
    };

    let message = match category {
        ErrorCategory::ConnectionError => CONNECTION_ADVISORY.to_string(),
        _ if description.trim().is_empty() => GENERIC_FAILURE.to_string(),
        _ => description,
    };

    ClassifiedError { category, message }
}
