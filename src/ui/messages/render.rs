//! Conversation thread rendering: bubbles, delivery ticks, carousels.

use std::collections::HashMap;

use eframe::egui::{self, RichText};

use crate::buffer::{ChatMessage, Delivery, Direction, MessageKind, ThreadBuffer};
use crate::pagination::{Carousel, PageCursor, SentinelState, FAILURE_GLYPH, PREFETCH_MARGIN};
use crate::ui::theme::SimchatTheme;

use super::format::{render_fragment_text, render_message_text};

/// Render the conversation thread.
///
/// Returns the cursors consumed by sentinels that came within the
/// pre-fetch margin of the viewport; the caller turns each into a
/// fetch action.
pub fn render_thread(
    ui: &mut egui::Ui,
    thread: &ThreadBuffer,
    carousels: &mut HashMap<u64, Carousel>,
    theme: &SimchatTheme,
) -> Vec<(u64, PageCursor)> {
    let mut triggered = Vec::new();

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.add_space(8.0);
            for msg in &thread.messages {
                render_bubble(ui, msg, carousels, &mut triggered, theme);
                ui.add_space(4.0);
            }
            ui.add_space(8.0);
        });

    triggered
}

fn render_bubble(
    ui: &mut egui::Ui,
    msg: &ChatMessage,
    carousels: &mut HashMap<u64, Carousel>,
    triggered: &mut Vec<(u64, PageCursor)>,
    theme: &SimchatTheme,
) {
    let sent = msg.direction == Direction::Sent;
    let layout = if sent {
        egui::Layout::right_to_left(egui::Align::TOP)
    } else {
        egui::Layout::left_to_right(egui::Align::TOP)
    };
    let fill = if sent {
        theme.bubble_sent
    } else {
        theme.bubble_received
    };

    ui.with_layout(layout, |ui| {
        ui.add_space(8.0);
        egui::Frame::new()
            .fill(fill)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 6))
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.75);
                ui.vertical(|ui| {
                    render_body(ui, msg, carousels, triggered, theme);
                    render_meta(ui, msg, theme);
                });
            });
    });
}

fn render_body(
    ui: &mut egui::Ui,
    msg: &ChatMessage,
    carousels: &mut HashMap<u64, Carousel>,
    triggered: &mut Vec<(u64, PageCursor)>,
    theme: &SimchatTheme,
) {
    match &msg.kind {
        MessageKind::Text { body } => render_message_text(ui, body, theme),

        MessageKind::TrustedCard { html } => render_fragment_text(ui, html, theme),

        MessageKind::Image { source, caption } | MessageKind::Video { source, caption } => {
            let icon = if matches!(msg.kind, MessageKind::Image { .. }) {
                "📷"
            } else {
                "🎞"
            };
            ui.label(
                RichText::new(format!("{} {}", icon, source))
                    .size(14.0)
                    .color(theme.text_primary),
            );
            if !caption.is_empty() {
                ui.label(RichText::new(caption).size(12.0).color(theme.text_secondary));
            }
        }

        MessageKind::Location {
            latitude,
            longitude,
        } => {
            ui.label(
                RichText::new(format!("📍 {:.5}, {:.5}", latitude, longitude))
                    .size(14.0)
                    .color(theme.text_primary),
            );
        }

        MessageKind::Audio { .. } => {
            ui.label(
                RichText::new("🎤 Voice message")
                    .size(14.0)
                    .color(theme.text_primary),
            );
        }

        MessageKind::Carousel { carousel_id } => {
            render_carousel(ui, *carousel_id, carousels, triggered, theme);
        }
    }
}

fn render_carousel(
    ui: &mut egui::Ui,
    carousel_id: u64,
    carousels: &mut HashMap<u64, Carousel>,
    triggered: &mut Vec<(u64, PageCursor)>,
    theme: &SimchatTheme,
) {
    let Some(carousel) = carousels.get_mut(&carousel_id) else {
        return;
    };

    for item in &carousel.items {
        egui::Frame::new()
            .fill(theme.surface[2])
            .corner_radius(6.0)
            .inner_margin(egui::Margin::symmetric(8, 6))
            .show(ui, |ui| {
                render_fragment_text(ui, item, theme);
            });
        ui.add_space(4.0);
    }

    match &carousel.sentinel {
        SentinelState::Armed(_) => {
            let response = ui.label(RichText::new("• • •").color(theme.text_muted));
            // The viewport-intersection trigger: fire once the sentinel row
            // comes within the pre-fetch margin of the visible area.
            let near = ui
                .clip_rect()
                .expand(PREFETCH_MARGIN)
                .intersects(response.rect);
            if near {
                if let Some(cursor) = carousel.take_cursor() {
                    triggered.push((carousel_id, cursor));
                }
            }
        }
        SentinelState::InFlight => {
            ui.spinner();
        }
        SentinelState::Failed => {
            ui.label(RichText::new(FAILURE_GLYPH).color(theme.warning));
        }
        SentinelState::Exhausted => {}
    }
}

fn render_meta(ui: &mut egui::Ui, msg: &ChatMessage, theme: &SimchatTheme) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(&msg.timestamp)
                .size(10.0)
                .color(theme.text_muted),
        );
        if msg.direction == Direction::Sent {
            let (ticks, color) = match msg.delivery {
                Delivery::Pending => ("✓", theme.text_muted),
                Delivery::Delivered => ("✓✓", theme.info),
            };
            ui.label(RichText::new(ticks).size(10.0).color(color));
        }
    });
}
