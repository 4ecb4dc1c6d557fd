// Chat transcript state
// Explicit state + transitions for the chat widget, independent of egui

use crate::api::ChatRequest;
use crate::error::{ChatError, SubmitRejected};

/// First assistant message shown in a new transcript
pub const GREETING: &str = "Hello! I have analyzed the report. Ask me anything about it.";

/// Assistant message appended when an answer request fails
pub const FALLBACK_ANSWER: &str = "Sorry, I encountered an error answering that.";

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The person asking questions
    User,
    /// The answering service
    Assistant,
}

/// A single transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Author of the message
    pub role: Role,
    /// Text as displayed
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Session context owned by the parent view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Collection questions target; `None` until a report has been analyzed
    pub collection_name: Option<String>,
    /// Session identifier forwarded with every question
    pub session_id: String,
}

impl SessionContext {
    /// Create a session context
    pub fn new(collection_name: Option<String>, session_id: impl Into<String>) -> Self {
        Self {
            collection_name,
            session_id: session_id.into(),
        }
    }

    /// Collection name if present and not blank
    pub fn valid_collection(&self) -> Option<&str> {
        self.collection_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }
}

/// Identifier of an accepted submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// A submission that was accepted and must be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    /// Id to hand back to `ChatState::resolve`
    pub id: RequestId,
    /// Payload for the answering service
    pub request: ChatRequest,
}

/// Item produced by `ChatState::render`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptItem<'a> {
    /// A stored message
    Message(&'a Message),
    /// Transient indicator shown while a request is pending
    Thinking,
}

/// Chat widget state: transcript, in-flight request and draft input
///
/// States are Idle (`in_flight == None`) and Pending. The transcript only
/// ever grows.
#[derive(Debug, Clone)]
pub struct ChatState {
    transcript: Vec<Message>,
    in_flight: Option<RequestId>,
    next_request_id: u64,
    /// Text currently typed in the input box
    pub draft: String,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::with_greeting(GREETING)
    }
}

impl ChatState {
    /// Create a state with the default greeting
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state whose transcript starts with `greeting`
    pub fn with_greeting(greeting: &str) -> Self {
        Self {
            transcript: vec![Message::assistant(greeting)],
            in_flight: None,
            next_request_id: 0,
            draft: String::new(),
        }
    }

    /// Messages, oldest first
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Whether a request is outstanding
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Id of the outstanding request, if any
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Whether the Send control should be enabled
    pub fn can_send(&self) -> bool {
        !self.is_pending() && !self.draft.trim().is_empty()
    }

    /// Validate and accept a question
    ///
    /// On success the user message is appended, the state becomes Pending and
    /// the request to dispatch is returned. On rejection nothing changes.
    pub fn submit_question(
        &mut self,
        text: &str,
        session: &SessionContext,
    ) -> Result<PendingRequest, SubmitRejected> {
        if text.trim().is_empty() {
            return Err(SubmitRejected::EmptyQuestion);
        }
        let collection = session
            .valid_collection()
            .ok_or(SubmitRejected::MissingCollection)?;
        if self.is_pending() {
            return Err(SubmitRejected::RequestPending);
        }

        let id = RequestId(self.next_request_id);
        self.next_request_id += 1;
        self.in_flight = Some(id);
        self.transcript.push(Message::user(text));

        Ok(PendingRequest {
            id,
            request: ChatRequest {
                question: text.to_string(),
                collection_name: collection.to_string(),
                session_id: session.session_id.clone(),
            },
        })
    }

    /// Submit the draft; it is cleared only when the submission is accepted
    pub fn submit_draft(
        &mut self,
        session: &SessionContext,
    ) -> Result<PendingRequest, SubmitRejected> {
        let draft = std::mem::take(&mut self.draft);
        match self.submit_question(&draft, session) {
            Ok(pending) => Ok(pending),
            Err(rejected) => {
                self.draft = draft;
                Err(rejected)
            }
        }
    }

    /// Apply the outcome of request `id`
    ///
    /// Returns the appended assistant message, or `None` when `id` is not the
    /// in-flight request (stale outcomes are discarded).
    pub fn resolve(
        &mut self,
        id: RequestId,
        outcome: Result<String, ChatError>,
    ) -> Option<&Message> {
        if self.in_flight != Some(id) {
            return None;
        }
        self.in_flight = None;

        let content = match outcome {
            Ok(answer) => answer,
            Err(_) => FALLBACK_ANSWER.to_string(),
        };
        self.transcript.push(Message::assistant(content));
        self.transcript.last()
    }

    /// Transcript plus the thinking indicator when pending
    pub fn render(&self) -> Vec<TranscriptItem<'_>> {
        let mut items: Vec<TranscriptItem<'_>> =
            self.transcript.iter().map(TranscriptItem::Message).collect();
        if self.is_pending() {
            items.push(TranscriptItem::Thinking);
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionContext {
        SessionContext::new(Some("report_1".to_string()), "session-1")
    }

    #[test]
    fn test_initial_state() {
        let state = ChatState::new();
        assert!(!state.is_pending());
        assert_eq!(state.transcript(), &[Message::assistant(GREETING)]);
        assert_eq!(state.render(), vec![TranscriptItem::Message(&state.transcript()[0])]);
    }

    #[test]
    fn test_submit_appends_user_message() {
        let mut state = ChatState::new();
        let pending = state.submit_question("What is the revenue?", &session()).unwrap();

        assert!(state.is_pending());
        assert_eq!(state.in_flight(), Some(pending.id));
        assert_eq!(state.transcript().len(), 2);
        assert_eq!(state.transcript()[1], Message::user("What is the revenue?"));
        assert_eq!(pending.request.question, "What is the revenue?");
        assert_eq!(pending.request.collection_name, "report_1");
        assert_eq!(pending.request.session_id, "session-1");
    }

    #[test]
    fn test_question_sent_as_typed() {
        let mut state = ChatState::new();
        let pending = state.submit_question("  spaced  ", &session()).unwrap();
        assert_eq!(pending.request.question, "  spaced  ");
        assert_eq!(state.transcript()[1].content, "  spaced  ");
    }

    #[test]
    fn test_empty_question_rejected() {
        let mut state = ChatState::new();
        assert_eq!(
            state.submit_question("", &session()),
            Err(SubmitRejected::EmptyQuestion)
        );
        assert_eq!(
            state.submit_question(" \t\n", &session()),
            Err(SubmitRejected::EmptyQuestion)
        );
        assert_eq!(state.transcript().len(), 1);
        assert!(!state.is_pending());
    }

    #[test]
    fn test_missing_collection_rejected() {
        let mut state = ChatState::new();
        let none = SessionContext::new(None, "session-1");
        let blank = SessionContext::new(Some("  ".to_string()), "session-1");

        assert_eq!(
            state.submit_question("hi", &none),
            Err(SubmitRejected::MissingCollection)
        );
        assert_eq!(
            state.submit_question("hi", &blank),
            Err(SubmitRejected::MissingCollection)
        );
        assert_eq!(state.transcript().len(), 1);
        assert!(!state.is_pending());
    }

    #[test]
    fn test_submit_rejected_while_pending() {
        let mut state = ChatState::new();
        state.submit_question("first", &session()).unwrap();

        assert_eq!(
            state.submit_question("second", &session()),
            Err(SubmitRejected::RequestPending)
        );
        assert_eq!(state.transcript().len(), 2);
    }

    #[test]
    fn test_resolve_success() {
        let mut state = ChatState::new();
        let pending = state.submit_question("What is the revenue?", &session()).unwrap();

        let appended = state.resolve(pending.id, Ok("$5M".to_string())).cloned();
        assert_eq!(appended, Some(Message::assistant("$5M")));
        assert!(!state.is_pending());
        assert_eq!(state.transcript().len(), 3);
    }

    #[test]
    fn test_resolve_failure_appends_fallback() {
        let mut state = ChatState::new();
        let pending = state.submit_question("What is the revenue?", &session()).unwrap();

        state.resolve(pending.id, Err(ChatError::Dropped));
        assert!(!state.is_pending());
        assert_eq!(
            state.transcript().last(),
            Some(&Message::assistant(FALLBACK_ANSWER))
        );
    }

    #[test]
    fn test_stale_resolve_ignored() {
        let mut state = ChatState::new();
        let first = state.submit_question("first", &session()).unwrap();
        state.resolve(first.id, Ok("one".to_string()));
        let second = state.submit_question("second", &session()).unwrap();

        // A late duplicate for the first request must not touch the second
        assert!(state.resolve(first.id, Ok("late".to_string())).is_none());
        assert!(state.is_pending());
        assert_eq!(state.transcript().len(), 4);

        assert!(state.resolve(second.id, Ok("two".to_string())).is_some());
        assert!(state.resolve(second.id, Ok("again".to_string())).is_none());
        assert_eq!(state.transcript().len(), 5);
    }

    #[test]
    fn test_render_shows_thinking_only_while_pending() {
        let mut state = ChatState::new();
        let pending = state.submit_question("q", &session()).unwrap();

        let items = state.render();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2], TranscriptItem::Thinking);
        // The indicator is not stored
        assert_eq!(state.transcript().len(), 2);

        state.resolve(pending.id, Ok("a".to_string()));
        assert!(!state.render().contains(&TranscriptItem::Thinking));
    }

    #[test]
    fn test_submit_draft_clears_only_on_accept() {
        let mut state = ChatState::new();
        state.draft = "hello".to_string();

        let no_collection = SessionContext::new(None, "s");
        assert!(state.submit_draft(&no_collection).is_err());
        assert_eq!(state.draft, "hello");

        assert!(state.submit_draft(&session()).is_ok());
        assert!(state.draft.is_empty());
    }

    #[test]
    fn test_can_send() {
        let mut state = ChatState::new();
        assert!(!state.can_send());
        state.draft = "   ".to_string();
        assert!(!state.can_send());
        state.draft = "q".to_string();
        assert!(state.can_send());
        state.submit_draft(&session()).unwrap();
        state.draft = "next".to_string();
        assert!(!state.can_send());
    }

    #[test]
    fn test_request_ids_increase() {
        let mut state = ChatState::new();
        let a = state.submit_question("a", &session()).unwrap();
        state.resolve(a.id, Ok("x".to_string()));
        let b = state.submit_question("b", &session()).unwrap();
        assert!(b.id > a.id);
    }
}
