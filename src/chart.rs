//! Renderer-agnostic chart descriptions.
//!
//! Each aggregation result is wrapped into a [`ChartSpec`] naming the chart
//! kind, the labels, and the data series; the egui layer decides how to
//! draw it. An empty aggregation becomes [`ChartData::Empty`], which the
//! renderer shows as a "no data" placeholder instead of failing.

/// Which mark the renderer should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Histogram,
    Bar,
    Line,
    Scatter,
    Violin,
    Box,
    Pie,
    Heatmap,
}

/// The data series carried by a chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    /// Nothing to plot (empty filtered view).
    Empty,
    /// Raw sample values (histogram).
    Values(Vec<f64>),
    /// Labelled numeric values (bar, pie, heatmap).
    Categories(Vec<(String, f64)>),
    /// X/Y pairs (line, scatter).
    Points(Vec<[f64; 2]>),
    /// Labelled sample sets (violin, box).
    Groups(Vec<(String, Vec<f64>)>),
}

/// Declarative description of one chart, consumed by the egui layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub data: ChartData,
}

impl ChartSpec {
    fn new(kind: ChartKind, title: &str, x_label: &str, y_label: &str, data: ChartData) -> Self {
        let data = if data_is_empty(&data) {
            ChartData::Empty
        } else {
            data
        };
        ChartSpec {
            kind,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            data,
        }
    }

    /// True when the renderer should draw the "no data" placeholder.
    pub fn is_empty(&self) -> bool {
        matches!(self.data, ChartData::Empty)
    }

    pub fn histogram(title: &str, x_label: &str, y_label: &str, values: Vec<f64>) -> Self {
        Self::new(ChartKind::Histogram, title, x_label, y_label, ChartData::Values(values))
    }

    pub fn bar(title: &str, x_label: &str, y_label: &str, rows: Vec<(String, f64)>) -> Self {
        Self::new(ChartKind::Bar, title, x_label, y_label, ChartData::Categories(rows))
    }

    pub fn line(title: &str, x_label: &str, y_label: &str, points: Vec<[f64; 2]>) -> Self {
        Self::new(ChartKind::Line, title, x_label, y_label, ChartData::Points(points))
    }

    pub fn scatter(title: &str, x_label: &str, y_label: &str, points: Vec<[f64; 2]>) -> Self {
        Self::new(ChartKind::Scatter, title, x_label, y_label, ChartData::Points(points))
    }

    pub fn violin(title: &str, x_label: &str, y_label: &str, groups: Vec<(String, Vec<f64>)>) -> Self {
        Self::new(ChartKind::Violin, title, x_label, y_label, ChartData::Groups(groups))
    }

    pub fn boxplot(title: &str, x_label: &str, y_label: &str, groups: Vec<(String, Vec<f64>)>) -> Self {
        Self::new(ChartKind::Box, title, x_label, y_label, ChartData::Groups(groups))
    }

    /// Pie charts have no axes; labels live in the slices.
    pub fn pie(title: &str, rows: Vec<(String, f64)>) -> Self {
        Self::new(ChartKind::Pie, title, "", "", ChartData::Categories(rows))
    }

    /// Single-column heatmap: one coloured cell per category.
    pub fn heatmap(title: &str, value_label: &str, rows: Vec<(String, f64)>) -> Self {
        Self::new(ChartKind::Heatmap, title, value_label, "", ChartData::Categories(rows))
    }
}

fn data_is_empty(data: &ChartData) -> bool {
    match data {
        ChartData::Empty => true,
        ChartData::Values(v) => v.is_empty(),
        ChartData::Categories(rows) => rows.is_empty(),
        ChartData::Points(p) => p.is_empty(),
        ChartData::Groups(g) => g.is_empty(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_aggregations_become_placeholders() {
        assert!(ChartSpec::histogram("t", "x", "y", vec![]).is_empty());
        assert!(ChartSpec::bar("t", "x", "y", vec![]).is_empty());
        assert!(ChartSpec::line("t", "x", "y", vec![]).is_empty());
        assert!(ChartSpec::violin("t", "x", "y", vec![]).is_empty());
        assert!(ChartSpec::pie("t", vec![]).is_empty());
    }

    #[test]
    fn non_empty_data_is_kept_verbatim() {
        let spec = ChartSpec::bar(
            "Average Starting Salary by Field of Study",
            "Field of Study",
            "Average Starting Salary",
            vec![("CS".into(), 110.0)],
        );
        assert_eq!(spec.kind, ChartKind::Bar);
        assert!(!spec.is_empty());
        assert_eq!(spec.data, ChartData::Categories(vec![("CS".into(), 110.0)]));
        assert_eq!(spec.x_label, "Field of Study");
    }
}
