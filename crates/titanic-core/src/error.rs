//! Error types for titanic-core

use thiserror::Error;

/// Message shown when the prediction service answers with a non-success status.
pub const REQUEST_FAILED_MESSAGE: &str = "Failed to get prediction";

/// Message shown when a transport or parse failure carries no text of its own.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

/// Errors that can occur while obtaining a prediction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// The service answered with a non-success HTTP status
    #[error("Failed to get prediction")]
    RequestFailed { status: u16 },

    /// Network failure before a response was received
    #[error("{0}")]
    Transport(String),

    /// The response body was not a valid prediction
    #[error("{0}")]
    Decode(String),

    /// Client configuration could not be used
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

/// The two user-visible error kinds a submission can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RequestFailed,
    TransportOrParse,
}

impl PredictError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictError::RequestFailed { .. } => ErrorKind::RequestFailed,
            PredictError::Transport(_)
            | PredictError::Decode(_)
            | PredictError::InvalidConfig(_) => ErrorKind::TransportOrParse,
        }
    }

    /// Text displayed in the form's error state.
    ///
    /// Request failures always show the fixed generic message; everything
    /// else shows its own text, or [`FALLBACK_MESSAGE`] when that is blank.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for PredictError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PredictError::Decode(err.to_string())
        } else {
            PredictError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PredictError {
    fn from(err: serde_json::Error) -> Self {
        PredictError::Decode(err.to_string())
    }
}
