//! Builds the full page description for the current filter selection.
//!
//! [`render`] is a pure function of the dataset and the filters, free of
//! any framework control flow; the egui layer calls it once per filter
//! change and only draws the result.

use crate::chart::ChartSpec;
use crate::data::aggregate;
use crate::data::describe::{DescribeTable, describe};
use crate::data::filter::{FilterState, filtered_indices};
use crate::data::model::{CareerDataset, CellValue};

// ---------------------------------------------------------------------------
// Page description
// ---------------------------------------------------------------------------

/// One chart with its one-line caption.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPanel {
    pub spec: ChartSpec,
    pub caption: String,
}

/// A thematic section of two charts.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub charts: Vec<ChartPanel>,
}

/// Everything the central panel draws for one filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSpec {
    pub overview: DescribeTable,
    pub sections: Vec<Section>,
    pub summary: Vec<String>,
    pub visible_rows: usize,
    pub total_rows: usize,
}

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

/// Recompute the whole page from scratch: filter, aggregate, build specs.
pub fn render(dataset: &CareerDataset, filters: &FilterState) -> PageSpec {
    let idx = filtered_indices(dataset, filters);

    let sections = vec![
        Section {
            title: "Student Performance & Outcomes".into(),
            charts: vec![
                panel(
                    ChartSpec::histogram(
                        "Histogram of University GPA",
                        "University GPA",
                        "Frequency",
                        aggregate::gpa_distribution(dataset, &idx),
                    ),
                    "Distribution of students' university GPA.",
                ),
                panel(
                    ChartSpec::bar(
                        "Average Starting Salary by Field of Study",
                        "Field of Study",
                        "Average Starting Salary",
                        labelled(aggregate::salary_by_field(dataset, &idx)),
                    ),
                    "Average starting salary by field of study.",
                ),
            ],
        },
        Section {
            title: "Promotions, Networking and Offers".into(),
            charts: vec![
                panel(
                    ChartSpec::line(
                        "Average Starting Salary by Years to Promotion",
                        "Years to Promotion",
                        "Average Starting Salary",
                        keyed_points(aggregate::salary_by_promo_years(dataset, &idx)),
                    ),
                    "How starting salary changes with years to first promotion.",
                ),
                panel(
                    ChartSpec::line(
                        "Average Job Offers by Networking Score",
                        "Networking Score",
                        "Average Job Offers",
                        keyed_points(aggregate::offers_by_networking(dataset, &idx)),
                    ),
                    "Average job offers for each networking score.",
                ),
            ],
        },
        Section {
            title: "GPA, Satisfaction and Work-Life Balance".into(),
            charts: vec![
                panel(
                    ChartSpec::scatter(
                        "Do Higher GPAs Lead to Faster Promotions?",
                        "Years to Promotion",
                        "University GPA",
                        aggregate::gpa_vs_promotion(dataset, &idx),
                    ),
                    "Relationship between GPA and time to promotion.",
                ),
                panel(
                    ChartSpec::violin(
                        "How Does Career Satisfaction Differ by Gender?",
                        "Gender",
                        "Career Satisfaction",
                        labelled_groups(aggregate::satisfaction_by_gender(dataset, &idx)),
                    ),
                    "Career satisfaction distribution by gender.",
                ),
            ],
        },
        Section {
            title: "Job Levels and Overall Satisfaction".into(),
            charts: vec![
                panel(
                    ChartSpec::boxplot(
                        "Which Majors Achieve Better Work-Life Balance?",
                        "Field of Study",
                        "Work-Life Balance Score",
                        labelled_groups(aggregate::worklife_by_field(dataset, &idx)),
                    ),
                    "Which majors report better work-life balance.",
                ),
                panel(
                    ChartSpec::pie(
                        "Distribution of Job Levels Among Graduates",
                        counted(aggregate::joblevel_counts(dataset, &idx)),
                    ),
                    "Proportion of graduates at each job level.",
                ),
            ],
        },
        Section {
            title: "Extra: Offers vs Certifications and Satisfaction by Major".into(),
            charts: vec![
                panel(
                    ChartSpec::line(
                        "Job Offers vs Certifications",
                        "Certifications",
                        "Average Job Offers",
                        keyed_points(aggregate::offers_by_certifications(dataset, &idx)),
                    ),
                    "Average job offers by number of certifications.",
                ),
                panel(
                    ChartSpec::heatmap(
                        "Average Career Satisfaction by Major",
                        "Career Satisfaction",
                        labelled(aggregate::satisfaction_by_field(dataset, &idx)),
                    ),
                    "Average career satisfaction across majors.",
                ),
            ],
        },
    ];

    PageSpec {
        overview: describe(dataset, &idx),
        sections,
        summary: vec![
            "GPA and networking both relate to faster promotions and more job offers.".into(),
            "Some majors clearly lead to higher starting salaries and better work-life balance."
                .into(),
            "Job levels and satisfaction vary across fields and genders, highlighting where \
             support or guidance may be needed."
                .into(),
        ],
        visible_rows: idx.len(),
        total_rows: dataset.len(),
    }
}

fn panel(spec: ChartSpec, caption: &str) -> ChartPanel {
    ChartPanel {
        spec,
        caption: caption.to_string(),
    }
}

fn labelled(rows: Vec<(CellValue, f64)>) -> Vec<(String, f64)> {
    rows.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn counted(rows: Vec<(CellValue, usize)>) -> Vec<(String, f64)> {
    rows.into_iter()
        .map(|(k, n)| (k.to_string(), n as f64))
        .collect()
}

fn labelled_groups(groups: Vec<(CellValue, Vec<f64>)>) -> Vec<(String, Vec<f64>)> {
    groups
        .into_iter()
        .map(|(k, values)| (k.to_string(), values))
        .collect()
}

/// Grouped means as line points. Keys without a numeric reading fall back
/// to their ordinal position.
fn keyed_points(rows: Vec<(CellValue, f64)>) -> Vec<[f64; 2]> {
    rows.into_iter()
        .enumerate()
        .map(|(i, (key, value))| [key.as_f64().unwrap_or(i as f64), value])
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartKind;
    use crate::data::filter::init_filter_state;
    use crate::data::model::{Record, columns};

    fn graduate(field: &str, gpa: f64) -> Record {
        let pairs: Vec<(&str, CellValue)> = vec![
            (columns::FIELD_OF_STUDY, CellValue::String(field.into())),
            (columns::UNIVERSITY_GPA, CellValue::Float(gpa)),
            (columns::STARTING_SALARY, CellValue::Integer(70_000)),
            (columns::YEARS_TO_PROMOTION, CellValue::Integer(3)),
            (columns::NETWORKING_SCORE, CellValue::Integer(6)),
            (columns::JOB_OFFERS, CellValue::Integer(2)),
            (columns::GENDER, CellValue::String("Female".into())),
            (columns::CAREER_SATISFACTION, CellValue::Float(7.5)),
            (columns::WORK_LIFE_BALANCE, CellValue::Float(6.0)),
            (columns::CURRENT_JOB_LEVEL, CellValue::String("Mid".into())),
            (columns::CERTIFICATIONS, CellValue::Integer(1)),
        ];
        Record {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    fn sample() -> CareerDataset {
        CareerDataset::from_records(
            vec![graduate("CS", 3.4), graduate("Art", 2.8)],
            columns::REQUIRED.iter().map(|c| c.to_string()).collect(),
        )
    }

    #[test]
    fn page_has_five_sections_of_two_charts() {
        let ds = sample();
        let page = render(&ds, &init_filter_state(&ds));

        assert_eq!(page.sections.len(), 5);
        assert!(page.sections.iter().all(|s| s.charts.len() == 2));
        assert_eq!(page.visible_rows, 2);
        assert_eq!(page.total_rows, 2);
        assert_eq!(page.summary.len(), 3);

        let kinds: Vec<ChartKind> = page
            .sections
            .iter()
            .flat_map(|s| s.charts.iter().map(|c| c.spec.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ChartKind::Histogram,
                ChartKind::Bar,
                ChartKind::Line,
                ChartKind::Line,
                ChartKind::Scatter,
                ChartKind::Violin,
                ChartKind::Box,
                ChartKind::Pie,
                ChartKind::Line,
                ChartKind::Heatmap,
            ]
        );
    }

    #[test]
    fn empty_view_renders_placeholders_not_errors() {
        let ds = sample();
        let mut filters = init_filter_state(&ds);
        filters.fields.clear();

        let page = render(&ds, &filters);
        assert_eq!(page.visible_rows, 0);
        assert!(page
            .sections
            .iter()
            .flat_map(|s| s.charts.iter())
            .all(|c| c.spec.is_empty()));
        // The overview keeps its column rows, all with zero counts.
        assert!(page.overview.columns.iter().all(|c| c.count == 0));
    }

    #[test]
    fn ordinal_fallback_for_non_numeric_line_keys() {
        let rows = vec![
            (CellValue::String("None".into()), 1.0),
            (CellValue::Integer(2), 3.0),
        ];
        assert_eq!(keyed_points(rows), vec![[0.0, 1.0], [2.0, 3.0]]);
    }
}
