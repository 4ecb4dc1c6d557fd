//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;

/// Answering service used when `API_URL` is not set
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Answering service configuration
    pub api: ApiConfig,
    /// Session context handed to the chat widget
    pub session: SessionConfig,
}

/// Answering service configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the answering service, without trailing slash
    pub base_url: String,
}

/// Session configuration supplied by the environment
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Collection the questions target, if one was analyzed already
    pub collection_name: Option<String>,
    /// Session identifier; a fresh one is generated when unset
    pub session_id: Option<String>,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig {
                base_url: normalize_base_url(
                    &env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
                ),
            },
            session: SessionConfig {
                collection_name: non_blank_var("CHAT_COLLECTION"),
                session_id: non_blank_var("CHAT_SESSION_ID"),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_API_BASE.to_string(),
            },
            session: SessionConfig::default(),
        }
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Strip trailing slashes so `{base}/chat` never doubles them.
/// An empty value falls back to the default base.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE.to_string()
    } else {
        trimmed.to_string()
    }
}
