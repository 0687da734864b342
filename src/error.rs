// src/error.rs
use thiserror::Error;

/// Local input problems. Never leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no CV file selected")]
    MissingFile,

    #[error("job description is empty")]
    EmptyJobDescription,

    #[error("unsupported CV file type: {0} (expected .pdf or .docx)")]
    UnsupportedFileType(String),
}

/// Failures of the exchange with the scoring service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("network failure: {0}")]
    NetworkFailure(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl RequestError {
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, RequestError::MalformedResponse(_))
    }
}
