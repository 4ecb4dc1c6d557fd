//! Report Chat
//!
//! Desktop chat client for asking questions about an analyzed report.
//! Questions go to a remote answering service; this crate keeps the
//! transcript and the single in-flight request. The binary is in
//! `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
/// Chat transcript state machine and session/UI state
pub mod state;
/// egui rendering of the chat widget and window layout
pub mod ui;
