use std::path::Path;

use eframe::egui;

use crate::data::loader;
use crate::state::AppState;
use crate::ui::{page, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CareerBoardApp {
    pub state: AppState,
}

impl CareerBoardApp {
    /// Build the app, loading the default data file when it exists. The
    /// user can always open another file via File → Open.
    pub fn startup(default_data: &Path) -> Self {
        let mut state = AppState::default();
        if default_data.exists() {
            match loader::load_file(default_data) {
                Ok(dataset) => {
                    log::info!(
                        "Loaded {} graduates from {}",
                        dataset.len(),
                        default_data.display()
                    );
                    state.set_dataset(dataset);
                }
                Err(e) => {
                    log::error!("Failed to load {}: {e:#}", default_data.display());
                    state.status_message = Some(format!("Error: {e:#}"));
                }
            }
        }
        Self { state }
    }
}

impl eframe::App for CareerBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            page::show_page(ui, &self.state);
        });
    }
}
