//! Error types for model-based classification

use thiserror::Error;

/// Why the model classifier could not produce an assessment.
///
/// Every variant is recoverable: the analyzer falls back to rule-based scoring.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClassifierError {
    /// Transport, auth, rate-limit or provider failure
    #[error("LLM provider call failed: {0}")]
    Provider(String),

    /// The reply was not valid JSON
    #[error("Model reply is not valid JSON: {0}")]
    MalformedResponse(String),

    /// The reply parsed but a required field is missing or mistyped
    #[error("Invalid response structure: {0}")]
    InvalidResponseStructure(String),
}

impl ClassifierError {
    /// Short tag for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifierError::Provider(_) => "provider_error",
            ClassifierError::MalformedResponse(_) => "malformed_response",
            ClassifierError::InvalidResponseStructure(_) => "invalid_response_structure",
        }
    }
}
