// Reusable UI components
// Message bubbles, avatars, the thinking indicator and the diagnostics log

use crate::state::{Message, Role};
use chrono::{DateTime, Local};
use eframe::egui;

const USER_FILL: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);
const ASSISTANT_FILL: egui::Color32 = egui::Color32::from_rgb(39, 39, 42);
const ASSISTANT_STROKE: egui::Color32 = egui::Color32::from_rgb(63, 63, 70);
const ASSISTANT_ACCENT: egui::Color32 = egui::Color32::from_rgb(96, 165, 250);

/// Render a round avatar for the message author
/// Assistant (blue "AI"), User (gray "You")
pub fn role_avatar(ui: &mut egui::Ui, role: Role) {
    let (label, fill, text_color) = match role {
        Role::Assistant => (
            "AI",
            egui::Color32::from_rgba_unmultiplied(59, 130, 246, 50),
            ASSISTANT_ACCENT,
        ),
        Role::User => ("You", egui::Color32::from_rgb(63, 63, 70), egui::Color32::WHITE),
    };

    let (rect, _) = ui.allocate_exact_size(egui::vec2(32.0, 32.0), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), 16.0, fill);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(11.0),
        text_color,
    );
}

/// Render the bubble holding a message's text
pub fn message_bubble(ui: &mut egui::Ui, message: &Message, max_width: f32) {
    // The corner nearest the avatar stays sharp
    let (fill, stroke, text_color, rounding) = match message.role {
        Role::User => (
            USER_FILL,
            egui::Stroke::NONE,
            egui::Color32::WHITE,
            egui::Rounding {
                nw: 12.0,
                ne: 12.0,
                sw: 12.0,
                se: 2.0,
            },
        ),
        Role::Assistant => (
            ASSISTANT_FILL,
            egui::Stroke::new(1.0, ASSISTANT_STROKE),
            egui::Color32::from_rgb(228, 228, 231),
            egui::Rounding {
                nw: 12.0,
                ne: 12.0,
                sw: 2.0,
                se: 12.0,
            },
        ),
    };

    egui::Frame::none()
        .fill(fill)
        .stroke(stroke)
        .rounding(rounding)
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, |ui| {
            ui.set_max_width(max_width);
            ui.add(
                egui::Label::new(
                    egui::RichText::new(&message.content)
                        .color(text_color)
                        .size(14.0),
                )
                .wrap(true),
            );
        });
}

/// Render one transcript row: assistant on the left, user on the right
pub fn message_row(ui: &mut egui::Ui, message: &Message, bubble_width: f32) {
    match message.role {
        Role::Assistant => {
            ui.horizontal_top(|ui| {
                role_avatar(ui, Role::Assistant);
                ui.add_space(8.0);
                message_bubble(ui, message, bubble_width);
            });
        }
        Role::User => {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                role_avatar(ui, Role::User);
                ui.add_space(8.0);
                message_bubble(ui, message, bubble_width);
            });
        }
    }
}

/// Render the transient "Thinking..." row shown while an answer is pending
pub fn thinking_indicator(ui: &mut egui::Ui) {
    ui.horizontal_top(|ui| {
        role_avatar(ui, Role::Assistant);
        ui.add_space(8.0);
        egui::Frame::none()
            .fill(ASSISTANT_FILL)
            .stroke(egui::Stroke::new(1.0, ASSISTANT_STROKE))
            .rounding(egui::Rounding::same(12.0))
            .inner_margin(egui::Margin::same(12.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new().size(14.0));
                    ui.label(
                        egui::RichText::new("Thinking...")
                            .size(12.0)
                            .color(egui::Color32::GRAY),
                    );
                });
            });
    });
}

/// Render the Send button; disabled buttons still report no clicks
pub fn send_button(ui: &mut egui::Ui, enabled: bool) -> egui::Response {
    ui.add_enabled(
        enabled,
        egui::Button::new(
            egui::RichText::new("Send")
                .strong()
                .color(egui::Color32::WHITE),
        )
        .fill(USER_FILL)
        .min_size(egui::vec2(64.0, 36.0)),
    )
}

/// One logged diagnostic line
#[derive(Debug, Clone)]
pub struct DiagnosticEntry {
    /// When the entry was recorded
    pub at: DateTime<Local>,
    /// What happened
    pub message: String,
}

impl DiagnosticEntry {
    /// Line as shown in the log
    pub fn display_line(&self) -> String {
        format!("[{}] {}", self.at.format("%H:%M:%S"), self.message)
    }
}

/// Diagnostics log display area
/// Scrollable list of request failures that are never shown raw in the chat
pub struct DiagnosticsLog {
    /// Buffer of entries, oldest first
    entries: Vec<DiagnosticEntry>,
    /// Maximum number of entries to keep (0 = unlimited)
    max_lines: usize,
    /// Whether to auto-scroll to bottom
    auto_scroll: bool,
}

impl DiagnosticsLog {
    /// Create a new diagnostics log
    pub fn new(max_lines: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_lines,
            auto_scroll: true,
        }
    }

    /// Record a diagnostic, dropping the oldest when over capacity
    pub fn record(&mut self, message: impl Into<String>) {
        self.entries.push(DiagnosticEntry {
            at: Local::now(),
            message: message.into(),
        });
        if self.max_lines > 0 && self.entries.len() > self.max_lines {
            self.entries.remove(0);
        }
    }

    /// Recorded entries, oldest first
    pub fn entries(&self) -> &[DiagnosticEntry] {
        &self.entries
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Render the log in a scrollable area
    pub fn render(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(egui::RichText::new("Diagnostics").heading());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(8.0);
                if ui.button("Clear").clicked() {
                    self.clear();
                }
                ui.add_space(8.0);
                ui.checkbox(&mut self.auto_scroll, "Auto-scroll");
            });
        });
        ui.add_space(4.0);
        ui.separator();
        ui.add_space(4.0);

        egui::ScrollArea::vertical()
            .id_source("diagnostics_scroll")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
                ui.spacing_mut().item_spacing = egui::vec2(4.0, 2.0);

                if self.entries.is_empty() {
                    ui.horizontal(|ui| {
                        ui.add_space(8.0);
                        ui.label(egui::RichText::new("No errors recorded").weak().italics());
                    });
                }

                for entry in &self.entries {
                    ui.add_space(2.0);
                    ui.horizontal(|ui| {
                        ui.add_space(8.0);
                        ui.label(
                            egui::RichText::new(entry.display_line())
                                .size(12.0)
                                .family(egui::FontFamily::Monospace),
                        );
                    });
                }

                if self.auto_scroll && !self.entries.is_empty() {
                    ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                }
            });
    }
}

impl Default for DiagnosticsLog {
    fn default() -> Self {
        Self::new(500)
    }
}
