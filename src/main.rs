mod analysis;
mod app;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;
mod view_model;

use app::AttritionApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Ignoring configuration: {e:#}");
        AppConfig::default()
    });
    log::info!("Dataset source: {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "HR Attrition Analytics Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(AttritionApp::new(&config)))),
    )
}
