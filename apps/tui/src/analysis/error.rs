use std::fmt;
use thiserror::Error;

/// Failures of a single analysis request.
///
/// Every variant ends the attempt; nothing from a failed attempt is rendered.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The generation service call could not complete (network, auth, quota).
    #[error("generation service request failed: {0}")]
    Transport(String),
    /// The call completed but carried no text payload.
    #[error("generation service returned no text payload")]
    EmptyResponse,
    #[error("generation service returned a malformed payload: {0}")]
    MalformedResponse(#[from] MalformedReason),
}

#[derive(Debug, Error)]
pub enum MalformedReason {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("unexpected shape: {0}")]
    Shape(#[source] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    EmptyResponse,
    MalformedResponse,
}

impl AnalysisError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::EmptyResponse => ErrorKind::EmptyResponse,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::EmptyResponse => write!(f, "empty_response"),
            Self::MalformedResponse => write!(f, "malformed_response"),
        }
    }
}
