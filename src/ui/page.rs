use eframe::egui::{RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::describe::DescribeTable;
use crate::state::AppState;
use crate::ui::charts;

// ---------------------------------------------------------------------------
// Central panel – the dashboard page
// ---------------------------------------------------------------------------

/// Render the whole dashboard page from the cached [`PageSpec`].
///
/// [`PageSpec`]: crate::report::PageSpec
pub fn show_page(ui: &mut Ui, state: &AppState) {
    let Some(page) = &state.page else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a data file to view the dashboard  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Graduate Career Outcomes Dashboard");
            ui.label("Interactive visualizations based on the student career outcomes dataset.");
            ui.add_space(10.0);

            ui.strong("Overview statistics");
            ui.add_space(4.0);
            overview_table(ui, &page.overview);

            for (section_idx, section) in page.sections.iter().enumerate() {
                ui.add_space(16.0);
                ui.heading(format!("{}. {}", section_idx + 1, section.title));
                ui.add_space(4.0);

                ui.columns(section.charts.len().max(1), |columns| {
                    for (chart_idx, panel) in section.charts.iter().enumerate() {
                        let col = &mut columns[chart_idx];
                        charts::show_chart(
                            col,
                            &panel.spec,
                            format!("chart_{section_idx}_{chart_idx}"),
                            state.field_colors.as_ref(),
                        );
                        col.label(RichText::new(&panel.caption).weak().italics());
                    }
                });
            }

            ui.add_space(16.0);
            ui.strong("Story Summary:");
            for bullet in &page.summary {
                ui.label(format!("• {bullet}"));
            }
            ui.add_space(12.0);
        });
}

// ---------------------------------------------------------------------------
// Overview statistics table
// ---------------------------------------------------------------------------

fn overview_table(ui: &mut Ui, table: &DescribeTable) {
    const HEADERS: &[&str] = &[
        "Column", "Count", "Unique", "Top", "Freq", "Mean", "Std", "Min", "Max",
    ];

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(150.0))
        .columns(Column::auto().at_least(58.0), HEADERS.len() - 1)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(*title);
                });
            }
        })
        .body(|mut body| {
            for summary in &table.columns {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&summary.name);
                    });
                    row.col(|ui| {
                        ui.label(summary.count.to_string());
                    });
                    row.col(|ui| {
                        ui.label(fmt_count(summary.unique));
                    });
                    row.col(|ui| {
                        ui.label(summary.top.clone().unwrap_or_else(|| "–".into()));
                    });
                    row.col(|ui| {
                        ui.label(fmt_count(summary.freq));
                    });
                    row.col(|ui| {
                        ui.label(fmt_number(summary.mean));
                    });
                    row.col(|ui| {
                        ui.label(fmt_number(summary.std));
                    });
                    row.col(|ui| {
                        ui.label(fmt_number(summary.min));
                    });
                    row.col(|ui| {
                        ui.label(fmt_number(summary.max));
                    });
                });
            }
        });
}

fn fmt_count(value: Option<usize>) -> String {
    value.map_or_else(|| "–".into(), |n| n.to_string())
}

fn fmt_number(value: Option<f64>) -> String {
    value.map_or_else(|| "–".into(), |v| format!("{v:.2}"))
}
