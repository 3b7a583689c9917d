mod content_view;
mod gallery_grid;
mod menu_panel;

pub use gallery_grid::{overlay_lines, placeholder_image};
pub use menu_panel::{accesskit_id, PanelAction};

use crate::content::ContentApi;
use crate::page::{PageController, PageView};
use crate::settings::{Link, Settings};
use crate::starfield::{now_seconds, EguiHost, FrameHost, PainterSurface, StarfieldRenderer};
use crate::stars::StarField;
use eframe::egui::{self, Align2, Color32, FontId, Vec2};
use std::sync::Arc;
use std::time::Instant;

/// Decorative glyphs in the bottom-left corner: moon, sun, star, cloud.
const CORNER_ICONS: &str = "🌙 ☀ ⭐ ☁";

pub(crate) fn open_link(url: &str) {
    tracing::debug!(url, "opening link");
    if let Err(err) = open::that(url) {
        tracing::error!(?err, url, "failed to open link");
    }
}

/// A clickable link to `link.url` that opens in the system browser.
pub(crate) fn external_link(ui: &mut egui::Ui, text: egui::RichText, link: &Link) -> egui::Response {
    let resp = ui.link(text).on_hover_text(link.url.as_str());
    // Selectable label text resets the node to static text; restore the link role.
    ui.ctx().accesskit_node_builder(resp.id, |node| {
        node.set_role(egui::accesskit::Role::Link);
        node.set_name(link.label.as_str());
        node.set_url(link.url.as_str());
    });
    if resp.clicked() {
        open_link(&link.url);
    }
    resp
}

pub struct LandingApp {
    settings: Settings,
    page: PageController,
    renderer: Option<StarfieldRenderer>,
    placeholder: egui::TextureHandle,
}

impl LandingApp {
    pub fn new(ctx: &egui::Context, settings: Settings, api: Arc<dyn ContentApi>) -> Self {
        egui_extras::install_image_loaders(ctx);

        let stars = match settings.star_seed {
            Some(seed) => StarField::from_seed(seed),
            None => StarField::new(),
        };
        let repaint_ctx = ctx.clone();
        let mut page = PageController::new(api, stars)
            .with_waker(Arc::new(move || repaint_ctx.request_repaint()));
        page.mount();

        let placeholder = ctx.load_texture(
            "gallery-placeholder",
            placeholder_image(),
            egui::TextureOptions::LINEAR,
        );

        Self {
            settings,
            page,
            renderer: None,
            placeholder,
        }
    }

    fn show_loading(&self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Spinner::new().size(128.0).color(Color32::WHITE));
                });
            });
    }

    fn show_page(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let Self {
            settings,
            page,
            renderer,
            placeholder,
        } = self;

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let host = EguiHost::new(ctx);
                let rect = ui.max_rect();
                let renderer = renderer.get_or_insert_with(|| {
                    StarfieldRenderer::mount(page.stars(host.viewport_size()), &host)
                });
                let mut surface = PainterSurface::new(ui.painter(), rect);
                renderer.tick(&host, Some(&mut surface), now_seconds());

                content_view::show(ui, page, settings, page.content_opacity(now));
            });

        if let Some(action) = menu_panel::show_toggle(ctx, page.menu_button()) {
            action.apply(page);
        }
        if let Some(action) = menu_panel::show_panel(ctx, page, settings, placeholder, now) {
            action.apply(page);
        }
        show_corner_icons(ctx);
    }

    /// Run one frame of the page against `ctx`.
    pub fn show(&mut self, ctx: &egui::Context) {
        self.page.poll();
        match self.page.view() {
            PageView::Loading => self.show_loading(ctx),
            PageView::Content => self.show_page(ctx),
        }
    }

    pub fn page(&self) -> &PageController {
        &self.page
    }

    /// The background renderer, mounted with the first content frame.
    pub fn starfield(&self) -> Option<&StarfieldRenderer> {
        self.renderer.as_ref()
    }
}

fn show_corner_icons(ctx: &egui::Context) {
    // Painted directly so the glyphs stay out of the accessibility tree.
    let screen = ctx.screen_rect();
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("corner_icons"),
    ));
    painter.text(
        screen.left_bottom() + Vec2::new(16.0, -16.0),
        Align2::LEFT_BOTTOM,
        CORNER_ICONS,
        FontId::proportional(20.0),
        Color32::WHITE,
    );
}

impl eframe::App for LandingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

impl Drop for LandingApp {
    fn drop(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.unmount();
        }
        self.page.unmount();
    }
}
