use starry_home::content::HttpContentApi;
use starry_home::gui::LandingApp;
use starry_home::logging;
use starry_home::settings::Settings;

use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load("settings.json")?;
    logging::init(settings.debug_logging, settings.log_file.as_ref().map(PathBuf::from));

    let api = Arc::new(HttpContentApi::new(
        settings.quote_endpoint.clone(),
        settings.gallery_endpoint.clone(),
    )?);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Starry Home")
            .with_inner_size(settings.window_size())
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    tracing::info!("starting window");
    eframe::run_native(
        "Starry Home",
        native_options,
        Box::new(move |cc| Box::new(LandingApp::new(&cc.egui_ctx, settings, api))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run window: {e}"))
}
