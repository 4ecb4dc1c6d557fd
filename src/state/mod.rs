// State management module
// Chat transcript state machine, session context and UI state

pub mod app_state;
pub mod chat_state;

pub use app_state::{AppState, UiState};
pub use chat_state::{
    ChatState, Message, PendingRequest, RequestId, Role, SessionContext, TranscriptItem,
    FALLBACK_ANSWER, GREETING,
};
