use eframe::egui::{
    self, Align2, Color32, CornerRadius, FontId, Pos2, Rect, RichText, Sense, Stroke, Ui, vec2,
};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Line, Plot, PlotPoints, Points, Polygon,
};

use crate::chart::{ChartData, ChartKind, ChartSpec};
use crate::color::{ColorMap, generate_palette, sequential_color, sequential_text_color};

pub const CHART_HEIGHT: f32 = 260.0;

const HISTOGRAM_BINS: usize = 10;

// ---------------------------------------------------------------------------
// Chart dispatch
// ---------------------------------------------------------------------------

/// Draw one chart from its spec. `field_colors` keeps field-of-study hues
/// consistent across charts that key on that column.
pub fn show_chart(ui: &mut Ui, spec: &ChartSpec, id: String, field_colors: Option<&ColorMap>) {
    ui.strong(&spec.title);
    match (&spec.kind, &spec.data) {
        (_, ChartData::Empty) => placeholder(ui),
        (ChartKind::Histogram, ChartData::Values(values)) => histogram(ui, spec, id, values),
        (ChartKind::Bar, ChartData::Categories(rows)) => bar(ui, spec, id, rows, field_colors),
        (ChartKind::Line, ChartData::Points(points)) => line(ui, spec, id, points),
        (ChartKind::Scatter, ChartData::Points(points)) => scatter(ui, spec, id, points),
        (ChartKind::Violin, ChartData::Groups(groups)) => violin(ui, spec, id, groups),
        (ChartKind::Box, ChartData::Groups(groups)) => boxplot(ui, spec, id, groups, field_colors),
        (ChartKind::Pie, ChartData::Categories(rows)) => pie(ui, rows),
        (ChartKind::Heatmap, ChartData::Categories(rows)) => heatmap(ui, spec, rows),
        // Kind/data mismatches cannot be built via the ChartSpec constructors.
        _ => placeholder(ui),
    }
}

/// Explicit "no data" panel shown instead of an empty plot.
fn placeholder(ui: &mut Ui) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.set_min_height(CHART_HEIGHT - 20.0);
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new("No data for the current filters").weak());
        });
    });
}

// ---------------------------------------------------------------------------
// egui_plot charts
// ---------------------------------------------------------------------------

fn histogram(ui: &mut Ui, spec: &ChartSpec, id: String, values: &[f64]) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / HISTOGRAM_BINS as f64;

    let bars: Vec<Bar> = if width <= 0.0 {
        // All samples identical: a single bar.
        vec![Bar::new(min, values.len() as f64).width(0.5).fill(Color32::LIGHT_BLUE)]
    } else {
        let mut counts = vec![0usize; HISTOGRAM_BINS];
        for &v in values {
            let bin = (((v - min) / width) as usize).min(HISTOGRAM_BINS - 1);
            counts[bin] += 1;
        }
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let center = min + (i as f64 + 0.5) * width;
                Bar::new(center, count as f64)
                    .width(width * 0.95)
                    .fill(Color32::LIGHT_BLUE)
            })
            .collect()
    };

    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn bar(
    ui: &mut Ui,
    spec: &ChartSpec,
    id: String,
    rows: &[(String, f64)],
    field_colors: Option<&ColorMap>,
) {
    let palette = generate_palette(rows.len());
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let color = field_colors
                .map(|cm| cm.color_for(label))
                .unwrap_or(palette[i]);
            Bar::new(i as f64, *value).width(0.6).name(label).fill(color)
        })
        .collect();

    let labels: Vec<String> = rows.iter().map(|(label, _)| label.clone()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .x_axis_formatter(move |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
            category_tick(mark.value, &labels)
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn line(ui: &mut Ui, spec: &ChartSpec, id: String, points: &[[f64; 2]]) {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.to_vec()))
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );
            // Per-point markers, matching the original line+marker style.
            plot_ui.points(
                Points::new(PlotPoints::from(points.to_vec()))
                    .color(Color32::LIGHT_BLUE)
                    .radius(3.0),
            );
        });
}

fn scatter(ui: &mut Ui, spec: &ChartSpec, id: String, points: &[[f64; 2]]) {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::from(points.to_vec()))
                    .color(Color32::from_rgba_unmultiplied(100, 150, 230, 180))
                    .radius(2.5),
            );
        });
}

fn violin(ui: &mut Ui, spec: &ChartSpec, id: String, groups: &[(String, Vec<f64>)]) {
    const DENSITY_BINS: usize = 12;
    const HALF_WIDTH: f64 = 0.38;

    let palette = generate_palette(groups.len());
    let labels: Vec<String> = groups.iter().map(|(label, _)| label.clone()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .x_axis_formatter(move |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
            category_tick(mark.value, &labels)
        })
        .show(ui, |plot_ui| {
            for (i, (label, values)) in groups.iter().enumerate() {
                let x0 = i as f64;
                let color = palette[i];
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let span = max - min;

                if values.len() < 2 || span <= 0.0 {
                    // Degenerate group: a single marker instead of a body.
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![[x0, min]]))
                            .color(color)
                            .radius(3.5)
                            .name(label),
                    );
                    continue;
                }

                let bin_h = span / DENSITY_BINS as f64;
                let mut counts = vec![0usize; DENSITY_BINS];
                for &v in values {
                    let bin = (((v - min) / bin_h) as usize).min(DENSITY_BINS - 1);
                    counts[bin] += 1;
                }
                let peak = *counts.iter().max().unwrap_or(&1) as f64;

                // Mirrored density outline: up the left side, down the right.
                let mut outline: Vec<[f64; 2]> = Vec::with_capacity(DENSITY_BINS * 2);
                for (bin, &count) in counts.iter().enumerate() {
                    let y = min + (bin as f64 + 0.5) * bin_h;
                    let w = HALF_WIDTH * count as f64 / peak;
                    outline.push([x0 - w, y]);
                }
                for (bin, &count) in counts.iter().enumerate().rev() {
                    let y = min + (bin as f64 + 0.5) * bin_h;
                    let w = HALF_WIDTH * count as f64 / peak;
                    outline.push([x0 + w, y]);
                }
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(outline))
                        .fill_color(color.gamma_multiply(0.35))
                        .stroke(Stroke::new(1.0, color))
                        .name(label),
                );

                // Mean marker, as in the original violins.
                if let Some(mean) = non_empty_mean(values) {
                    plot_ui.line(
                        Line::new(PlotPoints::from(vec![[x0 - 0.2, mean], [x0 + 0.2, mean]]))
                            .color(color)
                            .width(2.0),
                    );
                }
            }
        });
}

fn boxplot(
    ui: &mut Ui,
    spec: &ChartSpec,
    id: String,
    groups: &[(String, Vec<f64>)],
    field_colors: Option<&ColorMap>,
) {
    let palette = generate_palette(groups.len());
    let labels: Vec<String> = groups.iter().map(|(label, _)| label.clone()).collect();

    let boxes: Vec<BoxElem> = groups
        .iter()
        .enumerate()
        .map(|(i, (label, values))| {
            let mut sorted = values.clone();
            sorted.sort_by(f64::total_cmp);
            let color = field_colors
                .map(|cm| cm.color_for(label))
                .unwrap_or(palette[i]);
            BoxElem::new(
                i as f64,
                BoxSpread::new(
                    sorted[0],
                    quantile(&sorted, 0.25),
                    quantile(&sorted, 0.5),
                    quantile(&sorted, 0.75),
                    sorted[sorted.len() - 1],
                ),
            )
            .name(label)
            .box_width(0.5)
            .fill(color.gamma_multiply(0.35))
            .stroke(Stroke::new(1.5, color))
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .x_axis_formatter(move |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
            category_tick(mark.value, &labels)
        })
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
        });
}

// ---------------------------------------------------------------------------
// Painter-drawn panels (no egui_plot mark fits these)
// ---------------------------------------------------------------------------

fn pie(ui: &mut Ui, rows: &[(String, f64)]) {
    let total: f64 = rows.iter().map(|(_, v)| v).sum();
    if total <= 0.0 {
        placeholder(ui);
        return;
    }

    let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), CHART_HEIGHT), Sense::hover());
    let painter = ui.painter_at(rect);
    let colors = generate_palette(rows.len());

    let radius = rect.height().min(rect.width() * 0.6) * 0.42;
    let center = Pos2::new(rect.left() + rect.width() * 0.33, rect.center().y);

    let mut angle = -std::f32::consts::FRAC_PI_2;
    for ((_, value), color) in rows.iter().zip(&colors) {
        let frac = (value / total) as f32;
        let sweep = frac * std::f32::consts::TAU;

        // Fan of thin triangles so slices wider than a half turn stay convex.
        let steps = (sweep / 0.05).ceil().max(1.0) as usize;
        for step in 0..steps {
            let a0 = angle + sweep * step as f32 / steps as f32;
            let a1 = angle + sweep * (step + 1) as f32 / steps as f32;
            painter.add(egui::Shape::convex_polygon(
                vec![center, arc_point(center, radius, a0), arc_point(center, radius, a1)],
                *color,
                Stroke::NONE,
            ));
        }

        if frac >= 0.04 {
            let label_pos = arc_point(center, radius * 0.65, angle + sweep / 2.0);
            painter.text(
                label_pos,
                Align2::CENTER_CENTER,
                format!("{:.1}%", frac * 100.0),
                FontId::proportional(12.0),
                Color32::WHITE,
            );
        }
        angle += sweep;
    }

    // Legend column to the right of the pie.
    let mut y = rect.top() + 10.0;
    for ((label, _), color) in rows.iter().zip(&colors) {
        let swatch = Rect::from_min_size(
            Pos2::new(rect.left() + rect.width() * 0.66, y),
            vec2(12.0, 12.0),
        );
        painter.rect_filled(swatch, CornerRadius::same(2), *color);
        painter.text(
            Pos2::new(swatch.right() + 6.0, swatch.center().y),
            Align2::LEFT_CENTER,
            label,
            FontId::proportional(12.0),
            ui.visuals().text_color(),
        );
        y += 18.0;
    }
}

fn heatmap(ui: &mut Ui, spec: &ChartSpec, rows: &[(String, f64)]) {
    const ROW_HEIGHT: f32 = 26.0;
    const LEGEND_HEIGHT: f32 = 30.0;

    let height = rows.len() as f32 * ROW_HEIGHT + LEGEND_HEIGHT + 10.0;
    let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), height), Sense::hover());
    let painter = ui.painter_at(rect);

    let min = rows.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let max = rows.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let label_w = rect.width() * 0.45;
    for (i, (label, value)) in rows.iter().enumerate() {
        let t = if span > 0.0 {
            ((value - min) / span) as f32
        } else {
            0.5
        };
        let top = rect.top() + i as f32 * ROW_HEIGHT;
        let cell = Rect::from_min_size(
            Pos2::new(rect.left() + label_w, top),
            vec2(rect.width() - label_w, ROW_HEIGHT - 2.0),
        );
        painter.rect_filled(cell, CornerRadius::same(2), sequential_color(t));
        painter.text(
            Pos2::new(rect.left() + label_w - 8.0, top + ROW_HEIGHT / 2.0),
            Align2::RIGHT_CENTER,
            label,
            FontId::proportional(12.0),
            ui.visuals().text_color(),
        );
        painter.text(
            cell.center(),
            Align2::CENTER_CENTER,
            format!("{value:.2}"),
            FontId::proportional(12.0),
            sequential_text_color(t),
        );
    }

    // Colour ramp legend with the value label and observed bounds.
    let legend_top = rect.top() + rows.len() as f32 * ROW_HEIGHT + 8.0;
    let strip_w = (rect.width() - label_w) * 0.6;
    const STEPS: usize = 24;
    for step in 0..STEPS {
        let t = step as f32 / (STEPS - 1) as f32;
        let cell = Rect::from_min_size(
            Pos2::new(rect.left() + label_w + t * (strip_w - strip_w / STEPS as f32), legend_top),
            vec2(strip_w / STEPS as f32 + 1.0, 10.0),
        );
        painter.rect_filled(cell, CornerRadius::ZERO, sequential_color(t));
    }
    painter.text(
        Pos2::new(rect.left() + label_w - 8.0, legend_top + 5.0),
        Align2::RIGHT_CENTER,
        format!("{min:.2}"),
        FontId::proportional(11.0),
        ui.visuals().text_color(),
    );
    painter.text(
        Pos2::new(rect.left() + label_w + strip_w + 8.0, legend_top + 5.0),
        Align2::LEFT_CENTER,
        format!("{max:.2}  ({})", spec.x_label),
        FontId::proportional(11.0),
        ui.visuals().text_color(),
    );
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Tick label for integer category positions; blank elsewhere.
fn category_tick(value: f64, labels: &[String]) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 0.05 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

fn arc_point(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    Pos2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

fn non_empty_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Quantile with linear interpolation over a sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let frac = pos - lo as f64;
    if lo + 1 < sorted.len() {
        sorted[lo] * (1.0 - frac) + sorted[lo + 1] * frac
    } else {
        sorted[lo]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
