//! Chat widget
//!
//! Wraps a [`ChatState`] with the egui rendering and the async plumbing that
//! sends questions to an [`AnswerService`].
//!
//! The widget lives on the UI thread. Accepting a submission spawns one task
//! on the tokio runtime; the task sends its outcome over a oneshot channel
//! and asks egui to repaint. [`ChatWidget::poll`] picks the outcome up on the
//! next frame and applies it to the state, so all state mutation stays on the
//! UI thread.

use crate::api::AnswerService;
use crate::error::{ChatError, SubmitRejected};
use crate::state::{ChatState, PendingRequest, RequestId, SessionContext, TranscriptItem};
use crate::ui::components::{message_row, send_button, thinking_indicator};
use eframe::egui;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

/// Widget heading
pub const HEADING: &str = "Ask AI Assistant";

/// Input placeholder text
pub const PLACEHOLDER: &str = "Ask a question about the report...";

/// What happened to the request picked up by [`ChatWidget::poll`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The answer was appended to the transcript
    Answered,
    /// The fallback message was appended; carries the logged error
    Failed(String),
}

struct InFlight {
    id: RequestId,
    receiver: oneshot::Receiver<Result<String, ChatError>>,
}

/// Chat transcript, input box and the one outstanding answer request
pub struct ChatWidget {
    state: ChatState,
    service: Arc<dyn AnswerService>,
    runtime: Handle,
    in_flight: Option<InFlight>,
}

impl ChatWidget {
    /// Create a widget with the default greeting
    pub fn new(service: Arc<dyn AnswerService>, runtime: Handle) -> Self {
        Self::with_state(ChatState::new(), service, runtime)
    }

    /// Create a widget around an existing state
    pub fn with_state(state: ChatState, service: Arc<dyn AnswerService>, runtime: Handle) -> Self {
        Self {
            state,
            service,
            runtime,
            in_flight: None,
        }
    }

    /// Current chat state
    pub fn state(&self) -> &ChatState {
        &self.state
    }

    /// Whether an answer is outstanding
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Replace the draft input
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.state.draft = text.into();
    }

    /// Submit the draft input
    pub fn submit(
        &mut self,
        ctx: &egui::Context,
        session: &SessionContext,
    ) -> Result<RequestId, SubmitRejected> {
        let pending = self.state.submit_draft(session)?;
        Ok(self.dispatch(ctx.clone(), pending))
    }

    /// Submit `text` directly, leaving the draft alone
    pub fn submit_question(
        &mut self,
        ctx: &egui::Context,
        text: &str,
        session: &SessionContext,
    ) -> Result<RequestId, SubmitRejected> {
        let pending = self.state.submit_question(text, session)?;
        Ok(self.dispatch(ctx.clone(), pending))
    }

    fn dispatch(&mut self, ctx: egui::Context, pending: PendingRequest) -> RequestId {
        let PendingRequest { id, request } = pending;
        let (sender, receiver) = oneshot::channel();
        let service = Arc::clone(&self.service);

        tracing::info!(
            request_id = id.0,
            collection = %request.collection_name,
            session_id = %request.session_id,
            "Submitting question"
        );

        self.runtime.spawn(async move {
            let outcome = service.answer(&request).await;
            // Receiver is gone only if the widget was dropped
            let _ = sender.send(outcome);
            ctx.request_repaint();
        });

        self.in_flight = Some(InFlight { id, receiver });
        id
    }

    /// Apply the outcome of the outstanding request if it has arrived
    pub fn poll(&mut self) -> Option<Outcome> {
        let in_flight = self.in_flight.as_mut()?;
        let outcome = match in_flight.receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::error::TryRecvError::Empty) => return None,
            Err(oneshot::error::TryRecvError::Closed) => Err(ChatError::Dropped),
        };
        let id = in_flight.id;
        self.in_flight = None;

        let result = match &outcome {
            Ok(answer) => {
                tracing::info!(
                    request_id = id.0,
                    answer_len = answer.len(),
                    "Answer received"
                );
                Outcome::Answered
            }
            Err(e) => {
                tracing::error!(request_id = id.0, error = %e, "Chat request failed");
                Outcome::Failed(e.to_string())
            }
        };

        if self.state.resolve(id, outcome).is_none() {
            tracing::warn!(request_id = id.0, "Discarded stale answer");
            return None;
        }
        Some(result)
    }

    /// Render heading, transcript and input area
    pub fn show(&mut self, ui: &mut egui::Ui, session: &SessionContext) {
        ui.heading(egui::RichText::new(HEADING).strong());
        ui.add_space(12.0);

        let input_height = 56.0;
        let transcript_height = (ui.available_height() - input_height).max(120.0);

        egui::ScrollArea::vertical()
            .id_source("chat_transcript")
            .auto_shrink([false; 2])
            .stick_to_bottom(true)
            .max_height(transcript_height)
            .show(ui, |ui| {
                let bubble_width = ui.available_width() * 0.8;
                for item in self.state.render() {
                    match item {
                        TranscriptItem::Message(message) => message_row(ui, message, bubble_width),
                        TranscriptItem::Thinking => thinking_indicator(ui),
                    }
                    ui.add_space(8.0);
                }
            });

        ui.add_space(8.0);

        let mut submit = false;
        ui.horizontal(|ui| {
            let send_width = 72.0;
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.state.draft)
                    .hint_text(PLACEHOLDER)
                    .desired_width((ui.available_width() - send_width).max(80.0))
                    .margin(egui::vec2(12.0, 10.0)),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
                response.request_focus();
            }
            if send_button(ui, self.state.can_send()).clicked() {
                submit = true;
            }
        });

        if session.valid_collection().is_none() {
            ui.label(
                egui::RichText::new("Select a collection to start asking questions")
                    .weak()
                    .small(),
            );
        }

        if submit {
            if let Err(rejected) = self.submit(ui.ctx(), session) {
                tracing::debug!(reason = %rejected, "Submission ignored");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ChatRequest;
    use crate::state::{Message, FALLBACK_ANSWER};
    use async_trait::async_trait;
    use std::time::Duration;

    struct Fixed(Result<&'static str, u16>);

    #[async_trait]
    impl AnswerService for Fixed {
        async fn answer(&self, _request: &ChatRequest) -> Result<String, ChatError> {
            match self.0 {
                Ok(answer) => Ok(answer.to_string()),
                Err(status) => Err(ChatError::Status {
                    status,
                    body: String::new(),
                }),
            }
        }
    }

    struct Panics;

    #[async_trait]
    impl AnswerService for Panics {
        async fn answer(&self, _request: &ChatRequest) -> Result<String, ChatError> {
            panic!("service blew up")
        }
    }

    fn session() -> SessionContext {
        SessionContext::new(Some("report_1".to_string()), "session-1")
    }

    async fn settle(widget: &mut ChatWidget) -> Option<Outcome> {
        for _ in 0..200 {
            if let Some(outcome) = widget.poll() {
                return Some(outcome);
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        None
    }

    #[tokio::test]
    async fn test_submit_and_answer() {
        let ctx = egui::Context::default();
        let mut widget = ChatWidget::new(Arc::new(Fixed(Ok("$5M"))), Handle::current());

        widget.set_draft("What is the revenue?");
        widget.submit(&ctx, &session()).unwrap();
        assert!(widget.is_pending());
        assert!(widget.state().draft.is_empty());

        assert_eq!(settle(&mut widget).await, Some(Outcome::Answered));
        assert!(!widget.is_pending());
        assert_eq!(
            widget.state().transcript().last(),
            Some(&Message::assistant("$5M"))
        );
    }

    #[tokio::test]
    async fn test_failure_reports_error() {
        let ctx = egui::Context::default();
        let mut widget = ChatWidget::new(Arc::new(Fixed(Err(500))), Handle::current());

        widget.submit_question(&ctx, "q", &session()).unwrap();
        match settle(&mut widget).await {
            Some(Outcome::Failed(reason)) => assert!(reason.contains("500")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(
            widget.state().transcript().last(),
            Some(&Message::assistant(FALLBACK_ANSWER))
        );
        assert!(!widget.is_pending());
    }

    #[tokio::test]
    async fn test_dropped_task_clears_pending() {
        let ctx = egui::Context::default();
        let mut widget = ChatWidget::new(Arc::new(Panics), Handle::current());

        widget.submit_question(&ctx, "q", &session()).unwrap();
        match settle(&mut widget).await {
            Some(Outcome::Failed(reason)) => assert!(reason.contains("dropped")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(!widget.is_pending());
    }

    #[tokio::test]
    async fn test_poll_without_request() {
        let mut widget = ChatWidget::new(Arc::new(Fixed(Ok("x"))), Handle::current());
        assert_eq!(widget.poll(), None);
        assert_eq!(widget.state().transcript().len(), 1);
    }
}
