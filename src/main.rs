mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::BoilerDashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load().context("loading dashboard configuration")?;

    // Missing or malformed inputs abort startup; there is no empty dashboard.
    let datasets = data::loader::load_datasets(&config)
        .inspect_err(|e| log::error!("Data unavailable: {e}"))
        .context("loading dashboard data")?;

    let state = AppState::new(datasets, config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Boiler Efficiency Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(BoilerDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
