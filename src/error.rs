//! Error types for the chat client
//!
//! `ChatError` covers every way an answer request can fail. The user never
//! sees these directly: the widget logs them and shows a fixed fallback
//! message instead. `SubmitRejected` describes why a submission was refused
//! before any request was made.

use thiserror::Error;

/// Errors that can occur while requesting an answer
#[derive(Error, Debug)]
pub enum ChatError {
    /// Request could not be sent or the body could not be read
    #[error("Failed to reach answering service: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-2xx status
    #[error("Answering service returned error status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body, for diagnostics only
        body: String,
    },

    /// Response body was not JSON or had no string `answer`
    #[error("Malformed answer response: {0}")]
    MalformedBody(String),

    /// The request task ended without delivering an outcome
    #[error("Answer request was dropped before completing")]
    Dropped,
}

/// Reasons a submission is refused without touching the transcript
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Question is empty or whitespace only
    #[error("Question is empty")]
    EmptyQuestion,

    /// No collection has been selected for this session
    #[error("No collection is selected")]
    MissingCollection,

    /// Another question is still waiting for its answer
    #[error("A question is already pending")]
    RequestPending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = ChatError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Answering service returned error status 500: boom"
        );
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(SubmitRejected::EmptyQuestion.to_string(), "Question is empty");
        assert_eq!(
            SubmitRejected::RequestPending.to_string(),
            "A question is already pending"
        );
    }
}
