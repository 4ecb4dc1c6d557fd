// Main application layout
// Menu bar, session sidebar, diagnostics panel and the chat widget

use crate::state::AppState;
use crate::ui::chat_widget::ChatWidget;
use crate::ui::components::DiagnosticsLog;
use eframe::egui;

/// Render the main application layout
/// Includes menu bar, session sidebar, diagnostics log and the chat area
pub fn render_app_layout(
    ctx: &egui::Context,
    state: &mut AppState,
    chat: &mut ChatWidget,
    diagnostics: &mut DiagnosticsLog,
) {
    render_menu_bar(ctx, state);

    if state.ui_state.sidebar_visible {
        render_sidebar(ctx, state);
    }

    if state.ui_state.diagnostics_visible {
        egui::TopBottomPanel::bottom("diagnostics_panel")
            .resizable(true)
            .default_height(160.0)
            .show(ctx, |ui| diagnostics.render(ui));
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(8.0);
        chat.show(ui, &state.session);
    });
}

/// Render the top menu bar
fn render_menu_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let mut dark_mode = ctx.style().visuals.dark_mode;
                if ui.checkbox(&mut dark_mode, "Dark Mode").changed() {
                    ctx.set_visuals(if dark_mode {
                        egui::Visuals::dark()
                    } else {
                        egui::Visuals::light()
                    });
                }
                ui.separator();
                ui.checkbox(&mut state.ui_state.sidebar_visible, "Show Session Panel");
                ui.checkbox(&mut state.ui_state.diagnostics_visible, "Show Diagnostics");
            });
        });
    });
}

/// Render the left sidebar with the session context
fn render_sidebar(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::left("session_sidebar")
        .resizable(true)
        .default_width(250.0)
        .min_width(180.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading("Session");
            ui.add_space(4.0);
            ui.separator();
            ui.add_space(8.0);

            ui.label(egui::RichText::new("Collection").strong());
            ui.add_space(4.0);
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.ui_state.collection_input)
                    .hint_text("Analyzed report collection"),
            );
            if response.changed() {
                let input = state.ui_state.collection_input.clone();
                state.set_collection(&input);
            }
            if !state.has_collection() {
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new("No collection selected")
                        .italics()
                        .weak()
                        .size(12.0),
                );
            }

            ui.add_space(16.0);
            ui.label(egui::RichText::new("Session ID").strong());
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(&state.session.session_id)
                    .monospace()
                    .weak()
                    .size(12.0),
            );
        });
}
