mod app;
mod chart;
mod color;
mod data;
mod report;
mod state;
mod ui;

use std::path::Path;

use app::CareerBoardApp;
use eframe::egui;

/// Data file looked up at startup before the user picks one manually.
const DEFAULT_DATA_PATH: &str = "data/student_career_outcomes.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Graduate Career Outcomes Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(CareerBoardApp::startup(Path::new(DEFAULT_DATA_PATH))))),
    )
}
