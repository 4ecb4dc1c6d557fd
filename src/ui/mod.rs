// UI module
// Contains the chat widget, layout, and reusable components

pub mod chat_widget;
pub mod components;
pub mod layout;

pub use chat_widget::{ChatWidget, Outcome};
pub use components::DiagnosticsLog;
pub use layout::render_app_layout;
