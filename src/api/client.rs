//! Answering service client
//!
//! `AnswerService` is the seam the chat widget talks to. `HttpAnswerClient`
//! is the production implementation that posts questions to
//! `{base}/chat`; tests substitute their own implementations.

use crate::api::types::{ChatRequest, ChatResponse};
use crate::config::{normalize_base_url, ApiConfig};
use crate::error::ChatError;
use async_trait::async_trait;

/// Something that can answer a question about a collection
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Request an answer for `request`
    ///
    /// # Errors
    /// Any failure (transport, status, body shape) is a `ChatError`; callers
    /// treat all of them the same way.
    async fn answer(&self, request: &ChatRequest) -> Result<String, ChatError>;
}

/// HTTP client for the answering endpoint
#[derive(Debug, Clone)]
pub struct HttpAnswerClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnswerClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client` (connection pooling)
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
        }
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(&config.base_url)
    }

    /// Full URL questions are posted to
    pub fn endpoint(&self) -> String {
        format!("{}/chat", self.base_url)
    }
}

#[async_trait]
impl AnswerService for HttpAnswerClient {
    async fn answer(&self, request: &ChatRequest) -> Result<String, ChatError> {
        let url = self.endpoint();

        tracing::debug!(
            url = %url,
            collection = %request.collection_name,
            session_id = %request.session_id,
            question_len = request.question.len(),
            "Posting question to answering service"
        );

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status.as_u16(),
                error_body = %body,
                "Answering service returned error status"
            );

            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| ChatError::MalformedBody(format!("{} - Response body: {}", e, body)))?;

        tracing::debug!(
            answer_len = parsed.answer.len(),
            "Received answer from answering service"
        );

        Ok(parsed.answer)
    }
}
