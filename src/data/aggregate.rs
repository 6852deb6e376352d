use std::collections::HashMap;

use super::model::{CareerDataset, CellValue, columns};

// ---------------------------------------------------------------------------
// Grouping primitives
// ---------------------------------------------------------------------------
//
// Every function takes the loaded table plus the indices of the currently
// filtered rows and returns a small owned result for one chart. Rows with a
// null grouping key or a null/non-numeric value cell are skipped silently,
// mirroring the filter policy. A group only exists once a row contributed to
// it, so an empty-group mean can never be produced.

/// How a grouped result is ordered before charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    KeyAscending,
    ValueAscending,
    ValueDescending,
}

/// Mean of `value_col` per distinct `key_col` value.
pub fn group_mean(
    dataset: &CareerDataset,
    indices: &[usize],
    key_col: &str,
    value_col: &str,
    order: SortOrder,
) -> Vec<(CellValue, f64)> {
    let mut keys: Vec<CellValue> = Vec::new();
    let mut acc: Vec<(f64, usize)> = Vec::new();
    let mut slot: HashMap<CellValue, usize> = HashMap::new();

    for &i in indices {
        let rec = &dataset.records[i];
        let Some(key) = rec.get(key_col).filter(|k| !k.is_null()) else {
            continue;
        };
        let Some(value) = rec.number(value_col) else {
            continue;
        };
        let at = *slot.entry(key.clone()).or_insert_with(|| {
            keys.push(key.clone());
            acc.push((0.0, 0));
            keys.len() - 1
        });
        acc[at].0 += value;
        acc[at].1 += 1;
    }

    let mut rows: Vec<(CellValue, f64)> = keys
        .into_iter()
        .zip(acc)
        .map(|(key, (sum, n))| (key, sum / n as f64))
        .collect();
    sort_grouped(&mut rows, order);
    rows
}

/// Row count per distinct `key_col` value, most frequent first. Ties keep
/// first-seen order (stable sort).
pub fn group_counts(
    dataset: &CareerDataset,
    indices: &[usize],
    key_col: &str,
) -> Vec<(CellValue, usize)> {
    let mut keys: Vec<CellValue> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();
    let mut slot: HashMap<CellValue, usize> = HashMap::new();

    for &i in indices {
        let Some(key) = dataset.records[i].get(key_col).filter(|k| !k.is_null()) else {
            continue;
        };
        let at = *slot.entry(key.clone()).or_insert_with(|| {
            keys.push(key.clone());
            counts.push(0);
            keys.len() - 1
        });
        counts[at] += 1;
    }

    let mut rows: Vec<(CellValue, usize)> = keys.into_iter().zip(counts).collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

/// All numeric `value_col` samples per distinct `key_col` value, groups in
/// order of first appearance. Groups whose samples are all null are omitted.
pub fn group_values(
    dataset: &CareerDataset,
    indices: &[usize],
    key_col: &str,
    value_col: &str,
) -> Vec<(CellValue, Vec<f64>)> {
    let mut groups: Vec<(CellValue, Vec<f64>)> = Vec::new();
    let mut slot: HashMap<CellValue, usize> = HashMap::new();

    for &i in indices {
        let rec = &dataset.records[i];
        let Some(key) = rec.get(key_col).filter(|k| !k.is_null()) else {
            continue;
        };
        let at = *slot.entry(key.clone()).or_insert_with(|| {
            groups.push((key.clone(), Vec::new()));
            groups.len() - 1
        });
        if let Some(value) = rec.number(value_col) {
            groups[at].1.push(value);
        }
    }

    groups.retain(|(_, values)| !values.is_empty());
    groups
}

/// Raw numeric values of one column, in input order.
pub fn column_values(dataset: &CareerDataset, indices: &[usize], column: &str) -> Vec<f64> {
    indices
        .iter()
        .filter_map(|&i| dataset.records[i].number(column))
        .collect()
}

/// `(x, y)` pairs of two numeric columns, in input order. Rows missing
/// either value contribute nothing.
pub fn paired_values(
    dataset: &CareerDataset,
    indices: &[usize],
    x_col: &str,
    y_col: &str,
) -> Vec<[f64; 2]> {
    indices
        .iter()
        .filter_map(|&i| {
            let rec = &dataset.records[i];
            Some([rec.number(x_col)?, rec.number(y_col)?])
        })
        .collect()
}

fn sort_grouped(rows: &mut [(CellValue, f64)], order: SortOrder) {
    match order {
        SortOrder::KeyAscending => rows.sort_by(|a, b| a.0.cmp(&b.0)),
        SortOrder::ValueAscending => rows.sort_by(|a, b| a.1.total_cmp(&b.1)),
        SortOrder::ValueDescending => rows.sort_by(|a, b| b.1.total_cmp(&a.1)),
    }
}

// ---------------------------------------------------------------------------
// Aggregation catalog – one function per chart
// ---------------------------------------------------------------------------

/// Raw GPA values for the histogram.
pub fn gpa_distribution(dataset: &CareerDataset, indices: &[usize]) -> Vec<f64> {
    column_values(dataset, indices, columns::UNIVERSITY_GPA)
}

/// Mean starting salary per field of study, best paid first.
pub fn salary_by_field(dataset: &CareerDataset, indices: &[usize]) -> Vec<(CellValue, f64)> {
    group_mean(
        dataset,
        indices,
        columns::FIELD_OF_STUDY,
        columns::STARTING_SALARY,
        SortOrder::ValueDescending,
    )
}

/// Mean starting salary per years-to-promotion bucket.
pub fn salary_by_promo_years(dataset: &CareerDataset, indices: &[usize]) -> Vec<(CellValue, f64)> {
    group_mean(
        dataset,
        indices,
        columns::YEARS_TO_PROMOTION,
        columns::STARTING_SALARY,
        SortOrder::KeyAscending,
    )
}

/// Mean job offers per networking score.
pub fn offers_by_networking(dataset: &CareerDataset, indices: &[usize]) -> Vec<(CellValue, f64)> {
    group_mean(
        dataset,
        indices,
        columns::NETWORKING_SCORE,
        columns::JOB_OFFERS,
        SortOrder::KeyAscending,
    )
}

/// `(years to promotion, GPA)` pairs for the scatter plot.
pub fn gpa_vs_promotion(dataset: &CareerDataset, indices: &[usize]) -> Vec<[f64; 2]> {
    paired_values(
        dataset,
        indices,
        columns::YEARS_TO_PROMOTION,
        columns::UNIVERSITY_GPA,
    )
}

/// Career satisfaction samples per gender.
pub fn satisfaction_by_gender(
    dataset: &CareerDataset,
    indices: &[usize],
) -> Vec<(CellValue, Vec<f64>)> {
    group_values(dataset, indices, columns::GENDER, columns::CAREER_SATISFACTION)
}

/// Work-life balance samples per field of study.
pub fn worklife_by_field(
    dataset: &CareerDataset,
    indices: &[usize],
) -> Vec<(CellValue, Vec<f64>)> {
    group_values(
        dataset,
        indices,
        columns::FIELD_OF_STUDY,
        columns::WORK_LIFE_BALANCE,
    )
}

/// Graduates per current job level, most common first.
pub fn joblevel_counts(dataset: &CareerDataset, indices: &[usize]) -> Vec<(CellValue, usize)> {
    group_counts(dataset, indices, columns::CURRENT_JOB_LEVEL)
}

/// Mean job offers per certification count.
pub fn offers_by_certifications(
    dataset: &CareerDataset,
    indices: &[usize],
) -> Vec<(CellValue, f64)> {
    group_mean(
        dataset,
        indices,
        columns::CERTIFICATIONS,
        columns::JOB_OFFERS,
        SortOrder::KeyAscending,
    )
}

/// Mean career satisfaction per field, least satisfied first.
pub fn satisfaction_by_field(
    dataset: &CareerDataset,
    indices: &[usize],
) -> Vec<(CellValue, f64)> {
    group_mean(
        dataset,
        indices,
        columns::FIELD_OF_STUDY,
        columns::CAREER_SATISFACTION,
        SortOrder::ValueAscending,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn rec(pairs: &[(&str, CellValue)]) -> Record {
        Record {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    fn s(v: &str) -> CellValue {
        CellValue::String(v.into())
    }

    fn all_indices(ds: &CareerDataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    fn salary_rows() -> CareerDataset {
        CareerDataset::from_records(
            vec![
                rec(&[
                    (columns::FIELD_OF_STUDY, s("CS")),
                    (columns::STARTING_SALARY, CellValue::Integer(100)),
                ]),
                rec(&[
                    (columns::FIELD_OF_STUDY, s("CS")),
                    (columns::STARTING_SALARY, CellValue::Integer(120)),
                ]),
                rec(&[
                    (columns::FIELD_OF_STUDY, s("Art")),
                    (columns::STARTING_SALARY, CellValue::Integer(60)),
                ]),
            ],
            vec![columns::FIELD_OF_STUDY.into(), columns::STARTING_SALARY.into()],
        )
    }

    #[test]
    fn salary_by_field_means_descend() {
        let ds = salary_rows();
        let rows = salary_by_field(&ds, &all_indices(&ds));
        assert_eq!(rows, vec![(s("CS"), 110.0), (s("Art"), 60.0)]);
    }

    #[test]
    fn value_sort_ties_keep_first_seen_order() {
        let ds = CareerDataset::from_records(
            vec![
                rec(&[
                    (columns::FIELD_OF_STUDY, s("Law")),
                    (columns::STARTING_SALARY, CellValue::Integer(90)),
                ]),
                rec(&[
                    (columns::FIELD_OF_STUDY, s("Biology")),
                    (columns::STARTING_SALARY, CellValue::Integer(90)),
                ]),
            ],
            vec![columns::FIELD_OF_STUDY.into(), columns::STARTING_SALARY.into()],
        );
        let rows = salary_by_field(&ds, &all_indices(&ds));
        assert_eq!(rows, vec![(s("Law"), 90.0), (s("Biology"), 90.0)]);
    }

    #[test]
    fn key_ascending_orders_numeric_keys() {
        let ds = CareerDataset::from_records(
            vec![
                rec(&[
                    (columns::YEARS_TO_PROMOTION, CellValue::Integer(4)),
                    (columns::STARTING_SALARY, CellValue::Integer(80)),
                ]),
                rec(&[
                    (columns::YEARS_TO_PROMOTION, CellValue::Integer(1)),
                    (columns::STARTING_SALARY, CellValue::Integer(95)),
                ]),
                rec(&[
                    (columns::YEARS_TO_PROMOTION, CellValue::Integer(4)),
                    (columns::STARTING_SALARY, CellValue::Integer(100)),
                ]),
            ],
            vec![
                columns::YEARS_TO_PROMOTION.into(),
                columns::STARTING_SALARY.into(),
            ],
        );
        let rows = salary_by_promo_years(&ds, &all_indices(&ds));
        assert_eq!(
            rows,
            vec![(CellValue::Integer(1), 95.0), (CellValue::Integer(4), 90.0)]
        );
    }

    #[test]
    fn null_keys_and_values_are_skipped() {
        let ds = CareerDataset::from_records(
            vec![
                rec(&[
                    (columns::FIELD_OF_STUDY, s("CS")),
                    (columns::STARTING_SALARY, CellValue::Integer(100)),
                ]),
                rec(&[
                    (columns::FIELD_OF_STUDY, CellValue::Null),
                    (columns::STARTING_SALARY, CellValue::Integer(999)),
                ]),
                rec(&[
                    (columns::FIELD_OF_STUDY, s("CS")),
                    (columns::STARTING_SALARY, CellValue::Null),
                ]),
            ],
            vec![columns::FIELD_OF_STUDY.into(), columns::STARTING_SALARY.into()],
        );
        let rows = salary_by_field(&ds, &all_indices(&ds));
        assert_eq!(rows, vec![(s("CS"), 100.0)]);
    }

    #[test]
    fn empty_view_yields_empty_everything() {
        let ds = salary_rows();
        let none: Vec<usize> = Vec::new();
        assert!(gpa_distribution(&ds, &none).is_empty());
        assert!(salary_by_field(&ds, &none).is_empty());
        assert!(salary_by_promo_years(&ds, &none).is_empty());
        assert!(offers_by_networking(&ds, &none).is_empty());
        assert!(gpa_vs_promotion(&ds, &none).is_empty());
        assert!(satisfaction_by_gender(&ds, &none).is_empty());
        assert!(worklife_by_field(&ds, &none).is_empty());
        assert!(joblevel_counts(&ds, &none).is_empty());
        assert!(offers_by_certifications(&ds, &none).is_empty());
        assert!(satisfaction_by_field(&ds, &none).is_empty());
    }

    #[test]
    fn group_values_keeps_first_appearance_order() {
        let ds = CareerDataset::from_records(
            vec![
                rec(&[
                    (columns::GENDER, s("Male")),
                    (columns::CAREER_SATISFACTION, CellValue::Float(6.0)),
                ]),
                rec(&[
                    (columns::GENDER, s("Female")),
                    (columns::CAREER_SATISFACTION, CellValue::Float(8.0)),
                ]),
                rec(&[
                    (columns::GENDER, s("Male")),
                    (columns::CAREER_SATISFACTION, CellValue::Float(7.0)),
                ]),
            ],
            vec![columns::GENDER.into(), columns::CAREER_SATISFACTION.into()],
        );
        let groups = satisfaction_by_gender(&ds, &all_indices(&ds));
        assert_eq!(
            groups,
            vec![(s("Male"), vec![6.0, 7.0]), (s("Female"), vec![8.0])]
        );
    }

    #[test]
    fn group_values_omits_groups_without_samples() {
        let ds = CareerDataset::from_records(
            vec![
                rec(&[
                    (columns::GENDER, s("Female")),
                    (columns::CAREER_SATISFACTION, CellValue::Null),
                ]),
                rec(&[
                    (columns::GENDER, s("Male")),
                    (columns::CAREER_SATISFACTION, CellValue::Float(7.0)),
                ]),
            ],
            vec![columns::GENDER.into(), columns::CAREER_SATISFACTION.into()],
        );
        let groups = satisfaction_by_gender(&ds, &all_indices(&ds));
        assert_eq!(groups, vec![(s("Male"), vec![7.0])]);
    }

    #[test]
    fn counts_descend_with_stable_ties() {
        let ds = CareerDataset::from_records(
            vec![
                rec(&[(columns::CURRENT_JOB_LEVEL, s("Entry"))]),
                rec(&[(columns::CURRENT_JOB_LEVEL, s("Mid"))]),
                rec(&[(columns::CURRENT_JOB_LEVEL, s("Mid"))]),
                rec(&[(columns::CURRENT_JOB_LEVEL, s("Senior"))]),
                rec(&[(columns::CURRENT_JOB_LEVEL, CellValue::Null)]),
            ],
            vec![columns::CURRENT_JOB_LEVEL.into()],
        );
        let rows = joblevel_counts(&ds, &all_indices(&ds));
        assert_eq!(
            rows,
            vec![(s("Mid"), 2), (s("Entry"), 1), (s("Senior"), 1)]
        );
    }

    #[test]
    fn satisfaction_by_field_ascends_by_mean() {
        let ds = CareerDataset::from_records(
            vec![
                rec(&[
                    (columns::FIELD_OF_STUDY, s("CS")),
                    (columns::CAREER_SATISFACTION, CellValue::Float(8.0)),
                ]),
                rec(&[
                    (columns::FIELD_OF_STUDY, s("Art")),
                    (columns::CAREER_SATISFACTION, CellValue::Float(5.0)),
                ]),
            ],
            vec![columns::FIELD_OF_STUDY.into(), columns::CAREER_SATISFACTION.into()],
        );
        let rows = satisfaction_by_field(&ds, &all_indices(&ds));
        assert_eq!(rows, vec![(s("Art"), 5.0), (s("CS"), 8.0)]);
    }

    #[test]
    fn paired_values_skip_incomplete_rows() {
        let ds = CareerDataset::from_records(
            vec![
                rec(&[
                    (columns::YEARS_TO_PROMOTION, CellValue::Integer(2)),
                    (columns::UNIVERSITY_GPA, CellValue::Float(3.4)),
                ]),
                rec(&[
                    (columns::YEARS_TO_PROMOTION, CellValue::Null),
                    (columns::UNIVERSITY_GPA, CellValue::Float(3.9)),
                ]),
            ],
            vec![
                columns::YEARS_TO_PROMOTION.into(),
                columns::UNIVERSITY_GPA.into(),
            ],
        );
        assert_eq!(gpa_vs_promotion(&ds, &all_indices(&ds)), vec![[2.0, 3.4]]);
    }
}
