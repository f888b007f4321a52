//! Trabalhos - academic paper template editor
//!
//! Fill in a fixed paper template, keep it saved between sessions and export
//! it as a printable A4 document.

mod app;
mod core;
mod export;
mod ui;

use app::TrabalhosApp;
use crate::core::config::AppConfig;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> eframe::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    tracing::info!("Starting Trabalhos...");

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Using default config: {:#}", e);
        AppConfig::default().with_env_overrides()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Trabalhos — PDF"),
        ..Default::default()
    };

    eframe::run_native(
        "Trabalhos",
        native_options,
        Box::new(|cc| Ok(Box::new(TrabalhosApp::new(cc, config)))),
    )
}
