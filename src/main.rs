// Report Chat - Main Entry Point
// Native Rust GUI for asking questions about an analyzed report

use eframe::egui;
use report_chat::api::HttpAnswerClient;
use report_chat::config::Config;
use report_chat::state::AppState;
use report_chat::ui::{render_app_layout, ChatWidget, DiagnosticsLog, Outcome};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("report_chat=info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Answer requests run here while the UI thread keeps drawing
    let runtime = tokio::runtime::Runtime::new()?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Report Chat")
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    info!(api = %config.api.base_url, "Starting Report Chat");

    eframe::run_native(
        "Report Chat",
        options,
        Box::new(move |_cc| Box::new(ReportChatApp::new(&config, handle))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run window: {}", e))?;

    info!("Window closed");
    Ok(())
}

/// Main application struct
/// Owns the session context (as the parent view), the chat widget and the diagnostics log
struct ReportChatApp {
    /// Session context and UI preferences
    state: AppState,
    /// Chat transcript and input
    chat: ChatWidget,
    /// Logged request failures
    diagnostics: DiagnosticsLog,
}

impl ReportChatApp {
    /// Create a new application instance
    fn new(config: &Config, runtime: Handle) -> Self {
        let service = Arc::new(HttpAnswerClient::from_config(&config.api));
        Self {
            state: AppState::from_config(&config.session),
            chat: ChatWidget::new(service, runtime),
            diagnostics: DiagnosticsLog::new(500), // Keep last 500 lines
        }
    }
}

impl eframe::App for ReportChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(Outcome::Failed(reason)) = self.chat.poll() {
            self.diagnostics.record(reason);
        }

        render_app_layout(ctx, &mut self.state, &mut self.chat, &mut self.diagnostics);
    }
}
