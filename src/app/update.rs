//! Main update loop and global shortcuts

use eframe::egui::{self, RichText};
use std::time::Duration;

use super::SimchatApp;
use crate::events;
use crate::protocol::BackendAction;
use crate::state::ChatStatus;
use crate::ui;

impl eframe::App for SimchatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process backend events
        events::process_events(&self.event_rx, &mut self.state);

        // Ctrl+B: Toggle sidebar
        let toggle_sidebar = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::B));
        if toggle_sidebar {
            self.toggle_sidebar();
        }

        // Request repaint to keep checking for events
        ctx.request_repaint_after(Duration::from_millis(100));
        // Purge old status messages (toasts) older than 4 seconds
        self.state.purge_old_status_messages(4);

        let theme = self.get_theme();

        // Top panel: conversation header with presence line
        egui::TopBottomPanel::top("header_panel")
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[1])
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Simulator")
                            .size(16.0)
                            .strong()
                            .color(theme.text_primary),
                    );
                    let status_color = match self.state.chat_status {
                        ChatStatus::Typing => theme.success,
                        _ => theme.text_muted,
                    };
                    ui.label(
                        RichText::new(self.state.chat_status.label())
                            .size(12.0)
                            .color(status_color),
                    );

                    // Latest status toast, right aligned
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some((msg, _)) = self.state.status_messages.last() {
                            ui.label(RichText::new(msg).size(12.0).color(theme.warning));
                        }
                    });
                });
            });

        // Left panel: collapsible sidebar
        if ui::render_sidebar(ctx, self.sidebar_collapsed, &theme) {
            self.toggle_sidebar();
        }

        // Bottom panel: composer
        if let Some(output) = ui::render_composer(ctx, &mut self.composer, &theme) {
            self.handle_composer_output(output);
        }

        // Central panel: the conversation thread
        let mut fetches = Vec::new();
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme.surface[0]))
            .show(ctx, |ui| {
                fetches = ui::render_thread(
                    ui,
                    &self.state.thread,
                    &mut self.state.carousels,
                    &theme,
                );
            });

        // Sentinels that came near the viewport turn into page fetches
        for (carousel_id, cursor) in fetches {
            let _ = self.action_tx.send(BackendAction::FetchMore {
                carousel_id,
                cursor,
            });
        }
    }
}
