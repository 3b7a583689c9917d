use super::external_link;
use crate::page::PageController;
use crate::settings::Settings;
use eframe::egui::{self, Color32, RichText};

const LINK_COLOR: Color32 = Color32::from_rgb(96, 165, 250);
const QUOTE_COLOR: Color32 = Color32::from_rgb(156, 163, 175);
const ERROR_COLOR: Color32 = Color32::from_rgb(239, 68, 68);

/// Name, bio, social links and the quote block, faded in by `opacity`.
pub fn show(ui: &mut egui::Ui, page: &PageController, settings: &Settings, opacity: f32) {
    if !page.ui_state().content_revealed {
        return;
    }
    if opacity < 1.0 {
        ui.ctx().request_repaint();
    }
    let fade = |c: Color32| c.gamma_multiply(opacity);

    ui.vertical_centered(|ui| {
        ui.add_space((ui.available_height() * 0.35).max(0.0));
        ui.label(
            RichText::new(&settings.display_name)
                .size(36.0)
                .strong()
                .color(fade(Color32::WHITE)),
        );
        ui.add_space(12.0);
        ui.label(RichText::new(&settings.bio).size(20.0).color(fade(Color32::WHITE)));
        ui.add_space(24.0);

        let texts: Vec<RichText> = settings
            .social_links
            .iter()
            .map(|l| RichText::new(&l.label).color(fade(LINK_COLOR)))
            .collect();
        let width = row_width(ui, &texts);
        ui.horizontal(|ui| {
            ui.add_space(((ui.available_width() - width) / 2.0).max(0.0));
            for (text, link) in texts.into_iter().zip(&settings.social_links) {
                external_link(ui, text, link);
            }
        });
        ui.add_space(24.0);

        if let Some(quote) = page.quote() {
            ui.label(RichText::new(&quote.text).size(14.0).color(fade(QUOTE_COLOR)));
            ui.label(RichText::new(quote.attribution()).size(14.0).color(fade(QUOTE_COLOR)));
        } else if let Some(err) = &page.ui_state().error_message {
            ui.label(RichText::new(err).color(fade(ERROR_COLOR)));
        }
    });
}

/// Laid-out width of `texts` placed side by side with the ui's item spacing.
fn row_width(ui: &egui::Ui, texts: &[RichText]) -> f32 {
    let glyphs: f32 = texts
        .iter()
        .map(|t| {
            egui::WidgetText::from(t.clone())
                .into_galley(ui, Some(false), f32::INFINITY, egui::TextStyle::Body)
                .size()
                .x
        })
        .sum();
    let gaps = texts.len().saturating_sub(1) as f32 * ui.spacing().item_spacing.x;
    glyphs + gaps
}
