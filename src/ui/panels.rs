use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::model::{CellValue, columns};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: a multi-select over fields of study and a
/// min/max slider pair over university GPA.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the closures.
    let field_values: Vec<CellValue> = dataset
        .categories(columns::FIELD_OF_STUDY)
        .into_iter()
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Field of Study multi-select ----
            let n_selected = state.filters.fields.len();
            let header = format!("Field of Study  ({n_selected}/{})", field_values.len());

            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("field_of_study")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_fields();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_fields();
                        }
                    });

                    for val in &field_values {
                        let mut checked = state.filters.fields.contains(val);
                        let label = val.to_string();

                        let mut text = RichText::new(&label);
                        if let Some(cm) = &state.field_colors {
                            text = text.color(cm.color_for(&label));
                        }

                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_field(val);
                        }
                    }
                });

            ui.separator();

            // ---- University GPA range ----
            ui.strong("University GPA range");
            let (lo_bound, hi_bound) = state.filters.gpa_bounds;
            let (mut lo, mut hi) = state.filters.gpa_range;

            let mut changed = false;
            changed |= ui
                .add(Slider::new(&mut lo, lo_bound..=hi_bound).text("min").fixed_decimals(2))
                .changed();
            changed |= ui
                .add(Slider::new(&mut hi, lo_bound..=hi_bound).text("max").fixed_decimals(2))
                .changed();
            if changed {
                state.set_gpa_range(lo, hi);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(page) = &state.page {
            ui.label(format!(
                "{} graduates loaded, {} match filters",
                page.total_rows, page.visible_rows
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open career outcomes data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} graduates with columns {:?}",
                    dataset.len(),
                    dataset.column_names
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
