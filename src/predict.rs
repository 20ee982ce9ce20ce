//! Client for the structure-prediction endpoint.
//!
//! ESMFold is consumed as a plain request/response collaborator: one POST
//! with the raw sequence as a form-encoded body, one PDB text back. Calls
//! are blocking with a bounded timeout; each user action maps to exactly
//! one request and failures are reported, never retried.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

use crate::model::Prediction;
use crate::pdb;

/// The public ESMFold folding endpoint.
pub const ESMFOLD_URL: &str = "https://api.esmatlas.com/foldSequence/v1/pdb/";

/// Default request timeout in seconds. Folding a long sequence server-side
/// can take a while, so this is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// How much of an error response body is surfaced to the user.
const ERROR_SNIPPET_LEN: usize = 120;

/// Errors that can occur while requesting a prediction.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Prediction service returned HTTP {code}: {message}")]
    Status { code: u16, message: String },

    #[error("No usable sequence found")]
    EmptyInput,
}

/// Result type for prediction operations.
pub type PredictResult<T> = Result<T, PredictError>;

/// Blocking client for the prediction endpoint.
pub struct Predictor {
    client: Client,
    url: String,
}

impl Predictor {
    /// Creates a predictor for the given endpoint with a bounded timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> PredictResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Creates a predictor for the public ESMFold endpoint.
    pub fn esmfold() -> PredictResult<Self> {
        Self::new(ESMFOLD_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// The endpoint this predictor talks to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Submits one sequence and returns the predicted structure.
    ///
    /// The request body is the raw sequence text. A non-2xx response is
    /// surfaced as [`PredictError::Status`] with a snippet of the body.
    pub fn predict(&self, sequence: &str) -> PredictResult<Prediction> {
        let sequence = sequence.trim();
        if sequence.is_empty() {
            return Err(PredictError::EmptyInput);
        }

        debug!("POST {} ({} residues)", self.url, sequence.len());
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(sequence.to_string())
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message: String = body.trim().chars().take(ERROR_SNIPPET_LEN).collect();
            return Err(PredictError::Status {
                code: status.as_u16(),
                message,
            });
        }

        let plddt = pdb::mean_plddt(&body);
        debug!(
            "Received {} bytes of PDB text (plDDT {:?})",
            body.len(),
            plddt
        );
        Ok(Prediction { pdb: body, plddt })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predictor_construction() {
        let predictor = Predictor::esmfold().unwrap();
        assert_eq!(predictor.url(), ESMFOLD_URL);

        let custom = Predictor::new("http://localhost:9000/fold", Duration::from_secs(5)).unwrap();
        assert_eq!(custom.url(), "http://localhost:9000/fold");
    }

    #[test]
    fn test_empty_input_fails_before_any_request() {
        // The endpoint is unroutable; an empty sequence must fail without
        // touching the network.
        let predictor =
            Predictor::new("http://192.0.2.1/fold", Duration::from_secs(1)).unwrap();
        assert!(matches!(
            predictor.predict(""),
            Err(PredictError::EmptyInput)
        ));
        assert!(matches!(
            predictor.predict("   \n  "),
            Err(PredictError::EmptyInput)
        ));
    }

    #[test]
    fn test_error_messages_are_user_readable() {
        let err = PredictError::Status {
            code: 503,
            message: "service overloaded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Prediction service returned HTTP 503: service overloaded"
        );
        assert_eq!(
            PredictError::EmptyInput.to_string(),
            "No usable sequence found"
        );
    }
}
