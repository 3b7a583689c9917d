use super::{external_link, gallery_grid};
use crate::page::PageController;
use crate::panel::{GalleryView, MenuButtonA11y, PANEL_A11Y, PANEL_ID};
use crate::settings::Settings;
use eframe::egui::{self, accesskit, Color32, Vec2};
use std::time::Instant;

pub const PANEL_WIDTH: f32 = 320.0;
const PANEL_SLIDE_SECS: f32 = 0.25;
const PANEL_FILL: Color32 = Color32::from_rgba_premultiplied(23, 31, 41, 191);

/// User input collected while drawing, applied once drawing is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Toggle,
    LoadGallery,
    SetContentFilter(bool),
}

impl PanelAction {
    pub fn apply(self, page: &mut PageController) {
        match self {
            PanelAction::Toggle => page.toggle_panel(),
            PanelAction::LoadGallery => {
                if page.request_gallery().is_none() {
                    tracing::warn!("gallery requested while page is not mounted");
                }
            }
            PanelAction::SetContentFilter(enabled) => page.set_content_filter(enabled),
        }
    }
}

pub fn show_toggle(ctx: &egui::Context, a11y: MenuButtonA11y) -> Option<PanelAction> {
    let mut action = None;
    egui::Area::new(egui::Id::new("menu_toggle"))
        .anchor(egui::Align2::RIGHT_TOP, Vec2::new(-16.0, 16.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            let resp = ui
                .button(egui::RichText::new(a11y.caption).color(Color32::WHITE))
                .on_hover_text(a11y.label);
            resp.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Button, a11y.label));
            // Written after `widget_info`, which would otherwise overwrite the name.
            ctx.accesskit_node_builder(resp.id, |node| {
                node.set_name(a11y.label);
                node.set_expanded(a11y.expanded);
                node.push_controlled(accesskit_id(egui::Id::new(a11y.controls)));
            });
            if resp.clicked() {
                action = Some(PanelAction::Toggle);
            }
        });
    action
}

pub fn show_panel(
    ctx: &egui::Context,
    page: &PageController,
    settings: &Settings,
    placeholder: &egui::TextureHandle,
    now: Instant,
) -> Option<PanelAction> {
    let open = page.ui_state().panel_open();
    let shown = ctx.animate_bool_with_time(egui::Id::new(PANEL_ID).with("slide"), open, PANEL_SLIDE_SECS);
    if shown <= 0.0 {
        return None;
    }

    let screen = ctx.screen_rect();
    let panel_id = egui::Id::new(PANEL_A11Y.id);
    let left = screen.right() - PANEL_WIDTH * shown;
    // The dialog node has to exist before it can parent the panel's widgets.
    ctx.accesskit_node_builder(panel_id, |node| {
        node.set_role(PANEL_A11Y.role);
        node.set_name(PANEL_A11Y.label);
        if PANEL_A11Y.modal {
            node.set_modal();
        }
        node.set_bounds(accesskit::Rect {
            x0: left.into(),
            y0: screen.top().into(),
            x1: (left + PANEL_WIDTH).into(),
            y1: screen.bottom().into(),
        });
    });

    let mut action = None;
    ctx.with_accessibility_parent(panel_id, || {
        egui::Area::new(panel_id.with("area"))
            .fixed_pos(egui::pos2(left, screen.top()))
            .order(egui::Order::Middle)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(PANEL_FILL)
                    .inner_margin(16.0)
                    .show(ui, |ui| {
                        ui.set_width(PANEL_WIDTH - 32.0);
                        ui.set_min_height(screen.height() - 32.0);
                        egui::ScrollArea::vertical().show(ui, |ui| {
                            action = panel_contents(ui, page, settings, placeholder, now);
                        });
                    });
            });
    });
    action
}

/// Accesskit node id egui assigns to the widget with id `id`.
pub fn accesskit_id(id: egui::Id) -> accesskit::NodeId {
    accesskit::NodeId(id.value())
}

fn panel_contents(
    ui: &mut egui::Ui,
    page: &PageController,
    settings: &Settings,
    placeholder: &egui::TextureHandle,
    now: Instant,
) -> Option<PanelAction> {
    let mut action = None;

    ui.add_space(32.0);
    for link in &settings.nav_links {
        external_link(ui, egui::RichText::new(&link.label).color(Color32::WHITE), link);
        ui.add_space(8.0);
    }
    if ui.button("Load gallery").clicked() {
        action = Some(PanelAction::LoadGallery);
    }
    ui.add_space(16.0);

    let mut show_restricted = page.ui_state().content_filter_enabled;
    if ui.checkbox(&mut show_restricted, "Show R18 content").changed() {
        action = Some(PanelAction::SetContentFilter(show_restricted));
    }
    ui.add_space(16.0);

    let gallery = page.gallery();
    match gallery.view() {
        GalleryView::Loading => {
            ui.vertical_centered(|ui| {
                ui.add(egui::Spinner::new().size(48.0).color(Color32::WHITE));
            });
        }
        GalleryView::Error(msg) => {
            ui.colored_label(Color32::from_rgb(239, 68, 68), msg);
        }
        GalleryView::Grid(items) => {
            gallery_grid::show(ui, items, gallery.fade_in(now), placeholder);
            if gallery.fade_in(now) < 1.0 {
                ui.ctx().request_repaint();
            }
        }
    }
    action
}
