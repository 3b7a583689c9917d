use crate::content::GalleryItem;
use eframe::egui::{self, load::TexturePoll, Align2, Color32, ColorImage, FontId, Rect, Sense, Vec2};

const CELL_GAP: f32 = 16.0;
const CELL_ROUNDING: f32 = 8.0;
const TITLE_MAX_CHARS: usize = 24;
const PLACEHOLDER_SIZE: usize = 150;

/// The two overlay lines shown on a hovered or focused cell.
pub fn overlay_lines(item: &GalleryItem) -> (String, String) {
    (
        truncate(&item.title, TITLE_MAX_CHARS),
        format!("Author: {}", truncate(&item.author, TITLE_MAX_CHARS)),
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Neutral tile drawn in place of thumbnails that failed to load.
pub fn placeholder_image() -> ColorImage {
    let n = PLACEHOLDER_SIZE;
    let mut img = ColorImage::new([n, n], Color32::from_gray(48));
    for i in 0..n {
        for (x, y) in [(i, i), (n - 1 - i, i)] {
            img[(x, y)] = Color32::from_gray(96);
        }
    }
    img
}

pub fn show(
    ui: &mut egui::Ui,
    items: &[GalleryItem],
    opacity: f32,
    placeholder: &egui::TextureHandle,
) {
    let side = ((ui.available_width() - CELL_GAP) / 2.0).max(32.0);
    egui::Grid::new("gallery_grid")
        .num_columns(2)
        .spacing([CELL_GAP, CELL_GAP])
        .show(ui, |ui| {
            for (i, item) in items.iter().enumerate() {
                cell(ui, item, Vec2::splat(side), opacity, placeholder);
                if i % 2 == 1 {
                    ui.end_row();
                }
            }
        });
}

fn cell(
    ui: &mut egui::Ui,
    item: &GalleryItem,
    size: Vec2,
    opacity: f32,
    placeholder: &egui::TextureHandle,
) {
    let (rect, resp) = ui.allocate_exact_size(size, Sense::click());
    resp.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::ImageButton, &item.title));
    let tint = Color32::WHITE.gamma_multiply(opacity);

    let image = egui::Image::new(item.image_url.as_str());
    match image.load_for_size(ui.ctx(), size) {
        Ok(TexturePoll::Ready { texture }) => {
            egui::Image::from_texture(texture)
                .rounding(CELL_ROUNDING)
                .tint(tint)
                .paint_at(ui, rect);
        }
        Ok(TexturePoll::Pending { .. }) => {
            egui::Spinner::new().paint_at(ui, rect.shrink(size.x * 0.35));
        }
        Err(err) => {
            tracing::trace!(url = %item.image_url, %err, "thumbnail failed, using placeholder");
            egui::Image::new(placeholder)
                .rounding(CELL_ROUNDING)
                .tint(tint)
                .paint_at(ui, rect);
        }
    }

    if resp.hovered() || resp.has_focus() {
        paint_overlay(ui, rect, item);
    }
}

fn paint_overlay(ui: &egui::Ui, rect: Rect, item: &GalleryItem) {
    let (title, author) = overlay_lines(item);
    let painter = ui.painter();
    painter.rect_filled(rect, CELL_ROUNDING, Color32::from_black_alpha(128));
    painter.text(
        rect.left_bottom() + Vec2::new(8.0, -24.0),
        Align2::LEFT_BOTTOM,
        title,
        FontId::proportional(13.0),
        Color32::WHITE,
    );
    painter.text(
        rect.left_bottom() + Vec2::new(8.0, -8.0),
        Align2::LEFT_BOTTOM,
        author,
        FontId::proportional(11.0),
        Color32::LIGHT_GRAY,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_titles_are_truncated() {
        assert_eq!(truncate("short", 24), "short");
        let long = "a".repeat(30);
        let t = truncate(&long, 24);
        assert_eq!(t.chars().count(), 24);
        assert!(t.ends_with('…'));
    }

    #[test]
    fn placeholder_has_expected_size() {
        let img = placeholder_image();
        assert_eq!(img.size, [PLACEHOLDER_SIZE, PLACEHOLDER_SIZE]);
        assert_eq!(img[(0, 0)], Color32::from_gray(96));
        assert_eq!(img[(10, 0)], Color32::from_gray(48));
    }
}
