//! Collapsible conversation sidebar.

use eframe::egui::{self, RichText, Stroke};

use crate::ui::theme::SimchatTheme;

/// Render the sidebar in its collapsed or expanded form.
///
/// Returns true when the collapse toggle was clicked; the caller flips and
/// persists the flag.
pub fn render_sidebar(ctx: &egui::Context, collapsed: bool, theme: &SimchatTheme) -> bool {
    let mut toggled = false;
    let frame = egui::Frame::new()
        .fill(theme.surface[1])
        .stroke(Stroke::new(1.0, theme.border_medium));

    if collapsed {
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(36.0)
            .frame(frame)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("»").on_hover_text("Expand sidebar").clicked() {
                        toggled = true;
                    }
                });
            });
    } else {
        egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(220.0)
            .min_width(180.0)
            .frame(frame)
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.add_space(16.0);
                    ui.label(
                        RichText::new("CHATS")
                            .size(11.0)
                            .strong()
                            .color(theme.text_muted),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("«").on_hover_text("Collapse sidebar").clicked() {
                            toggled = true;
                        }
                    });
                });
                ui.add_space(8.0);

                // The simulator drives a single conversation
                let _ = ui.selectable_label(true, "Simulator");
            });
    }

    toggled
}
