//! Simchat Client - a messaging-webhook simulator client built with egui
//!
//! Architecture:
//! - Main thread: runs the egui UI
//! - Backend thread: runs a Tokio runtime for HTTP I/O against the simulator
//! - Communication via crossbeam channels (lock-free, sync-safe)

use eframe::egui;

use simchat_client::app::SimchatApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Simchat - Webhook Simulator",
        options,
        Box::new(|cc| Ok(Box::new(SimchatApp::new(cc)))),
    )
}
