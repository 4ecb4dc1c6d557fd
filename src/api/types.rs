//! Wire types for the answering endpoint

use serde::{Deserialize, Serialize};

/// Body of `POST {base}/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Question exactly as the user typed it
    pub question: String,
    /// Collection the question targets
    pub collection_name: String,
    /// Session the question belongs to
    pub session_id: String,
}

/// Successful response body; extra fields are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Answer text to show in the transcript
    pub answer: String,
}
