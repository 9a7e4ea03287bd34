#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod views;

use app::SteelCalcApp;
use sc_app::{Calculator, CalculatorConfig, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = CalculatorConfig::load_or_default(&config_path)?;
    tracing::info!(
        config = %config_path.display(),
        model = %config.model_path.display(),
        "starting steel strength calculator"
    );

    // No window without a model: there is nothing to show.
    let calculator = Calculator::from_config(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_title("Steel Strength Calculator"),
        ..Default::default()
    };

    eframe::run_native(
        "Steel Strength Calculator",
        options,
        Box::new(move |cc| Ok(Box::new(SteelCalcApp::new(cc, calculator)))),
    )?;
    Ok(())
}
