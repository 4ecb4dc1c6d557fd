//! Answering service API
//!
//! Request/response types and the client used to reach the service.

pub mod client;
pub mod types;

pub use client::{AnswerService, HttpAnswerClient};
pub use types::{ChatRequest, ChatResponse};
