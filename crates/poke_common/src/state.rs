//! Submission state exposed to the presentation layer

use crate::error_classifier::{ClassifiedError, ErrorCategory};
use crate::feature_vector::FeatureVector;
use serde::{Deserialize, Serialize};

/// Where the current (or last) submission stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
#[derive(Default)]
pub enum SubmissionState {
    #[default]
    Idle,

    /// Request in flight
    Pending { vector: FeatureVector },

    Succeeded { display_text: String },

    Failed {
        category: ErrorCategory,
        message: String,
    },
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending { .. })
    }

    /// `Succeeded` or `Failed`
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded { .. } | SubmissionState::Failed { .. }
        )
    }

    pub fn failed(error: ClassifiedError) -> Self {
        SubmissionState::Failed {
            category: error.category,
            message: error.message,
        }
    }

    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            SubmissionState::Failed { category, .. } => Some(*category),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(SubmissionState::default(), SubmissionState::Idle);
        assert!(!SubmissionState::Idle.is_terminal());
    }

    #[test]
    fn test_predicates() {
        let pending = SubmissionState::Pending {
            vector: FeatureVector::default(),
        };
        assert!(pending.is_pending());
        assert!(!pending.is_terminal());

        let done = SubmissionState::Succeeded {
            display_text: "Common".into(),
        };
        assert!(done.is_terminal());
        assert_eq!(done.category(), None);
    }

    #[test]
    fn test_json_shape() {
        let failed = SubmissionState::failed(ClassifiedError {
            category: ErrorCategory::HttpError,
            message: "API error: HTTP 503".into(),
        });
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["category"], "HttpError");
        assert_eq!(json["message"], "API error: HTTP 503");

        let json = serde_json::to_value(SubmissionState::Succeeded {
            display_text: "Legendary".into(),
        })
        .unwrap();
        assert_eq!(json["state"], "succeeded");
        assert_eq!(json["display_text"], "Legendary");
    }
}
