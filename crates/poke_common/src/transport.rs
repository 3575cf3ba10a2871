//! Transport to the prediction service
//!
//! The controller only sees `PredictionTransport`. Production code uses
//! `HttpTransport` (reqwest); tests use `FakeTransport` with pre-scripted
//! responses.

use crate::config::PredictorConfig;
use crate::error_classifier::SubmissionFailure;
use crate::feature_vector::FeatureVector;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// One POST of a feature vector to the service
#[async_trait]
pub trait PredictionTransport: Send + Sync {
    /// Send the vector and return the response body text.
    ///
    /// A non-2xx status is returned as `SubmissionFailure::Status` without
    /// reading the body.
    async fn post(&self, vector: &FeatureVector) -> Result<String, SubmissionFailure>;
}

// ============================================================================
// HTTP Transport (Production)
// ============================================================================

pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pokepredict/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &PredictorConfig) -> Result<Self, reqwest::Error> {
        Self::new(config.endpoint.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionTransport for HttpTransport {
    async fn post(&self, vector: &FeatureVector) -> Result<String, SubmissionFailure> {
        // `json` sets Content-Type: application/json
        let resp = self.client.post(&self.endpoint).json(vector).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SubmissionFailure::Status(status.as_u16()));
        }

        Ok(resp.text().await?)
    }
}

// ============================================================================
// Fake Transport (Testing)
// ============================================================================

/// Transport with scripted responses.
///
/// Responses are handed out in order; the last one repeats. An optional gate
/// holds every call until `Notify::notify_one` is called, which keeps a
/// submission `Pending` for as long as a test needs.
pub struct FakeTransport {
    responses: Mutex<Vec<Result<String, SubmissionFailure>>>,
    sent: Mutex<Vec<FeatureVector>>,
    gate: Option<Arc<Notify>>,
}

impl FakeTransport {
    pub fn new(responses: Vec<Result<String, SubmissionFailure>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            sent: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn always_ok(body: impl Into<String>) -> Self {
        Self::new(vec![Ok(body.into())])
    }

    pub fn always_err(failure: SubmissionFailure) -> Self {
        Self::new(vec![Err(failure)])
    }

    /// Hold each call until the returned handle is notified
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Vectors received so far, oldest first
    pub fn sent(&self) -> Vec<FeatureVector> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PredictionTransport for FakeTransport {
    async fn post(&self, vector: &FeatureVector) -> Result<String, SubmissionFailure> {
        self.sent.lock().unwrap().push(*vector);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let mut responses = self.responses.lock().unwrap();
        match responses.len() {
            0 => Err(SubmissionFailure::Other(String::new())),
            1 => responses[0].clone(),
            _ => responses.remove(0),
        }
    }
}
