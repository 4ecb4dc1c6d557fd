// Application state management
// Owns the session context handed to the chat widget, and UI preferences

use crate::config::SessionConfig;
use crate::state::chat_state::SessionContext;
use uuid::Uuid;

/// Main application state
/// Plays the parent-view role: the chat widget only ever reads `session`
#[derive(Debug, Clone)]
pub struct AppState {
    /// Session context for the chat widget
    pub session: SessionContext,
    /// UI state preferences
    pub ui_state: UiState,
}

/// UI-specific state
#[derive(Debug, Clone)]
pub struct UiState {
    /// Whether the session sidebar is visible
    pub sidebar_visible: bool,
    /// Whether to show the diagnostics log
    pub diagnostics_visible: bool,
    /// Text in the sidebar's collection field
    pub collection_input: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            sidebar_visible: true,
            diagnostics_visible: false,
            collection_input: String::new(),
        }
    }
}

impl AppState {
    /// Create application state from session configuration
    /// A fresh session id is generated when none is configured
    pub fn from_config(config: &SessionConfig) -> Self {
        let session_id = config
            .session_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            session: SessionContext::new(config.collection_name.clone(), session_id),
            ui_state: UiState {
                collection_input: config.collection_name.clone().unwrap_or_default(),
                ..UiState::default()
            },
        }
    }

    /// Replace the collection; blank names clear it
    pub fn set_collection(&mut self, name: &str) {
        let trimmed = name.trim();
        self.session.collection_name = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Whether questions can be sent for the current session
    pub fn has_collection(&self) -> bool {
        self.session.valid_collection().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_generates_session_id() {
        let state = AppState::from_config(&SessionConfig::default());
        assert!(Uuid::parse_str(&state.session.session_id).is_ok());
        assert!(!state.has_collection());
    }

    #[test]
    fn test_from_config_keeps_values() {
        let config = SessionConfig {
            collection_name: Some("report_9".to_string()),
            session_id: Some("fixed".to_string()),
        };
        let state = AppState::from_config(&config);
        assert_eq!(state.session.session_id, "fixed");
        assert_eq!(state.session.valid_collection(), Some("report_9"));
        assert_eq!(state.ui_state.collection_input, "report_9");
    }

    #[test]
    fn test_set_collection() {
        let mut state = AppState::from_config(&SessionConfig::default());
        state.set_collection("  report_2 ");
        assert_eq!(state.session.collection_name.as_deref(), Some("report_2"));
        assert!(state.has_collection());

        state.set_collection("   ");
        assert!(state.session.collection_name.is_none());
        assert!(!state.has_collection());
    }

    #[test]
    fn test_ui_defaults() {
        let ui = UiState::default();
        assert!(ui.sidebar_visible);
        assert!(!ui.diagnostics_visible);
    }
}
