//! PokéPredict Common - core of the rarity prediction client
//!
//! Everything with real branching lives here: the feature vector and its
//! lenient input coercion, the response normalizer, the error classifier and
//! the single-flight submission controller. The presentation layer (pokectl)
//! only reads `SubmissionState`.

pub mod config;
pub mod controller;
pub mod error_classifier;
pub mod feature_vector;
pub mod normalizer;
pub mod state;
pub mod transport;

pub use config::{ConfigError, PredictorConfig};
pub use controller::{SubmissionController, SubmitRejected};
pub use error_classifier::{classify, ClassifiedError, ErrorCategory, SubmissionFailure};
pub use feature_vector::{update, FeatureField, FeatureVector, UnknownField};
pub use normalizer::normalize;
pub use state::SubmissionState;
pub use transport::{HttpTransport, PredictionTransport};
