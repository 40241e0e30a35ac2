//! Message composer: input row, attachment menu, audio recorder mock.

use eframe::egui::{self, RichText};

use crate::input_state::{ComposerState, MediaAttachment};
use crate::ui::theme::SimchatTheme;

/// What the app should do after a composer interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerOutput {
    SendText(String),
    SendLocation,
    SendMedia {
        kind: MediaAttachment,
        path: String,
        caption: String,
    },
    SendAudio,
}

/// Render the composer panel. Returns at most one action per frame.
pub fn render_composer(
    ctx: &egui::Context,
    composer: &mut ComposerState,
    theme: &SimchatTheme,
) -> Option<ComposerOutput> {
    let mut output = None;

    egui::TopBottomPanel::bottom("composer_panel")
        .frame(
            egui::Frame::new()
                .fill(theme.surface[1])
                .inner_margin(egui::Margin::symmetric(12, 10)),
        )
        .show(ctx, |ui| {
            if composer.show_attachment_menu {
                render_attachment_menu(ui, composer, &mut output);
                ui.add_space(6.0);
            }

            if let Some(kind) = composer.pending_media {
                render_media_form(ui, composer, kind, theme, &mut output);
                ui.add_space(6.0);
            }

            ui.horizontal(|ui| {
                if ui.button("📎").on_hover_text("Attach").clicked() {
                    composer.show_attachment_menu = !composer.show_attachment_menu;
                }

                let response = ui.add(
                    egui::TextEdit::singleline(&mut composer.message_input)
                        .desired_width(ui.available_width() - 60.0)
                        .hint_text("Type a message..."),
                );

                // Input history navigation
                if response.has_focus() && ui.input(|i| i.key_pressed(egui::Key::ArrowUp)) {
                    composer.history_up();
                }
                if response.has_focus() && ui.input(|i| i.key_pressed(egui::Key::ArrowDown)) {
                    composer.history_down();
                }

                let send_clicked = ui.button("Send").clicked();
                let enter_pressed =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                if (send_clicked || enter_pressed) && !composer.message_input.trim().is_empty() {
                    output = Some(ComposerOutput::SendText(
                        composer.message_input.trim().to_string(),
                    ));
                    composer.message_input.clear();
                    response.request_focus();
                }
            });
        });

    if composer.show_audio_recorder {
        render_audio_recorder(ctx, composer, theme, &mut output);
    }

    output
}

fn render_attachment_menu(
    ui: &mut egui::Ui,
    composer: &mut ComposerState,
    output: &mut Option<ComposerOutput>,
) {
    ui.horizontal(|ui| {
        if ui.button("📷 Photo").clicked() {
            composer.show_attachment_menu = false;
            composer.pending_media = Some(MediaAttachment::Image);
        }
        if ui.button("🎞 Video").clicked() {
            composer.show_attachment_menu = false;
            composer.pending_media = Some(MediaAttachment::Video);
        }
        if ui.button("📍 Location").clicked() {
            composer.show_attachment_menu = false;
            *output = Some(ComposerOutput::SendLocation);
        }
        if ui.button("🎤 Audio").clicked() {
            composer.show_attachment_menu = false;
            composer.show_audio_recorder = true;
        }
    });
}

fn render_media_form(
    ui: &mut egui::Ui,
    composer: &mut ComposerState,
    kind: MediaAttachment,
    theme: &SimchatTheme,
    output: &mut Option<ComposerOutput>,
) {
    ui.horizontal(|ui| {
        let label = match kind {
            MediaAttachment::Image => "Photo:",
            MediaAttachment::Video => "Video:",
        };
        ui.label(RichText::new(label).color(theme.text_secondary));
        ui.add(
            egui::TextEdit::singleline(&mut composer.media_path)
                .desired_width(220.0)
                .hint_text("File path"),
        );
        ui.add(
            egui::TextEdit::singleline(&mut composer.media_caption)
                .desired_width(140.0)
                .hint_text("Caption"),
        );

        if ui.button("Attach").clicked() && !composer.media_path.trim().is_empty() {
            *output = Some(ComposerOutput::SendMedia {
                kind,
                path: composer.media_path.trim().to_string(),
                caption: composer.media_caption.trim().to_string(),
            });
            composer.close_attachments();
        }
        if ui.button("Cancel").clicked() {
            composer.close_attachments();
        }
    });
}

fn render_audio_recorder(
    ctx: &egui::Context,
    composer: &mut ComposerState,
    theme: &SimchatTheme,
    output: &mut Option<ComposerOutput>,
) {
    egui::Window::new("Voice message")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -60.0])
        .show(ctx, |ui| {
            ui.label(RichText::new("● Recording...").color(theme.error));
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    composer.show_audio_recorder = false;
                }
                if ui.button("Send").clicked() {
                    composer.show_audio_recorder = false;
                    *output = Some(ComposerOutput::SendAudio);
                }
            });
        });
}
