//! Text styling: maps linkify tokens onto egui widgets.

use eframe::egui::{self, RichText};

use crate::linkify::{self, Token};
use crate::ui::theme::SimchatTheme;

/// Render a text body with links made clickable.
///
/// Trusted fragments skip tokenizing entirely and render as-is.
pub(crate) fn render_message_text(ui: &mut egui::Ui, text: &str, theme: &SimchatTheme) {
    if linkify::is_trusted_fragment(text) {
        render_fragment_text(ui, text, theme);
        return;
    }

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;

        for token in linkify::tokenize(text) {
            match token {
                Token::Text(t) => {
                    ui.label(RichText::new(t).size(14.0).color(theme.text_primary));
                }
                Token::Link { url } => {
                    ui.hyperlink_to(RichText::new(&url).size(14.0).color(theme.info), &url);
                }
                Token::MarkdownLink { label, url } => {
                    ui.hyperlink_to(
                        RichText::new(label).size(14.0).color(theme.info).strong(),
                        url,
                    );
                }
            }
        }
    });
}

/// Backend-rendered fragments: no linkify, text content shown verbatim.
pub(crate) fn render_fragment_text(ui: &mut egui::Ui, html: &str, theme: &SimchatTheme) {
    ui.label(
        RichText::new(linkify::fragment_text(html))
            .size(14.0)
            .color(theme.text_primary),
    );
}
