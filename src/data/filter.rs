use std::collections::BTreeSet;

use super::model::{CareerDataset, CellValue, columns};

// ---------------------------------------------------------------------------
// Filter predicates chosen in the side panel
// ---------------------------------------------------------------------------

/// Current filter selections: which fields of study are shown and the
/// inclusive GPA interval. Rebuilt wholesale from the dataset on load,
/// never partially updated from stale state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Selected `Field_of_Study` values.
    pub fields: BTreeSet<CellValue>,
    /// Inclusive `[min, max]` interval on `University_GPA`.
    pub gpa_range: (f64, f64),
    /// Observed GPA bounds, used as slider limits.
    pub gpa_bounds: (f64, f64),
}

/// Initialise a [`FilterState`] that shows everything: all observed fields
/// selected, GPA range spanning the observed min/max.
pub fn init_filter_state(dataset: &CareerDataset) -> FilterState {
    let fields = dataset.categories(columns::FIELD_OF_STUDY);
    let gpa_bounds = dataset
        .numeric_bounds(columns::UNIVERSITY_GPA)
        .unwrap_or((0.0, 0.0));
    FilterState {
        fields,
        gpa_range: gpa_bounds,
        gpa_bounds,
    }
}

/// Return indices of records passing both filters, in original row order.
///
/// A record is retained iff its field of study is in the selected set AND
/// its GPA lies inside the inclusive range. Consequently:
/// * empty selected set → nothing matches
/// * inverted GPA interval (`min > max`) → nothing matches
/// * a null or missing value in either filtered column → record excluded
pub fn filtered_indices(dataset: &CareerDataset, filters: &FilterState) -> Vec<usize> {
    let (lo, hi) = filters.gpa_range;
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            let field_ok = rec
                .get(columns::FIELD_OF_STUDY)
                .is_some_and(|v| !v.is_null() && filters.fields.contains(v));
            let gpa_ok = rec
                .number(columns::UNIVERSITY_GPA)
                .is_some_and(|gpa| lo <= gpa && gpa <= hi);
            field_ok && gpa_ok
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn row(field: Option<&str>, gpa: Option<f64>) -> Record {
        let mut rec = Record::default();
        rec.values.insert(
            columns::FIELD_OF_STUDY.into(),
            match field {
                Some(f) => CellValue::String(f.into()),
                None => CellValue::Null,
            },
        );
        rec.values.insert(
            columns::UNIVERSITY_GPA.into(),
            match gpa {
                Some(g) => CellValue::Float(g),
                None => CellValue::Null,
            },
        );
        rec
    }

    fn dataset(rows: Vec<Record>) -> CareerDataset {
        CareerDataset::from_records(
            rows,
            vec![columns::FIELD_OF_STUDY.into(), columns::UNIVERSITY_GPA.into()],
        )
    }

    #[test]
    fn default_filters_are_the_identity() {
        let ds = dataset(vec![
            row(Some("CS"), Some(3.2)),
            row(Some("Art"), Some(2.1)),
            row(Some("CS"), Some(3.9)),
        ]);
        let filters = init_filter_state(&ds);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2]);
    }

    #[test]
    fn empty_field_selection_matches_nothing() {
        let ds = dataset(vec![row(Some("CS"), Some(3.2))]);
        let mut filters = init_filter_state(&ds);
        filters.fields.clear();
        assert!(filtered_indices(&ds, &filters).is_empty());
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let ds = dataset(vec![row(Some("CS"), Some(3.2))]);
        let mut filters = init_filter_state(&ds);
        filters.gpa_range = (3.5, 3.0);
        assert!(filtered_indices(&ds, &filters).is_empty());
    }

    #[test]
    fn range_endpoints_are_inclusive() {
        let ds = dataset(vec![
            row(Some("CS"), Some(2.9)),
            row(Some("CS"), Some(3.0)),
            row(Some("CS"), Some(3.0)),
            row(Some("CS"), Some(3.1)),
        ]);
        let mut filters = init_filter_state(&ds);
        filters.gpa_range = (3.0, 3.0);
        assert_eq!(filtered_indices(&ds, &filters), vec![1, 2]);
    }

    #[test]
    fn nulls_in_filtered_columns_are_excluded() {
        let ds = dataset(vec![
            row(Some("CS"), Some(3.2)),
            row(None, Some(3.2)),
            row(Some("CS"), None),
        ]);
        let filters = init_filter_state(&ds);
        assert_eq!(filtered_indices(&ds, &filters), vec![0]);
    }

    #[test]
    fn selection_restricts_by_field() {
        let ds = dataset(vec![
            row(Some("CS"), Some(3.2)),
            row(Some("Art"), Some(3.4)),
            row(Some("CS"), Some(2.5)),
        ]);
        let mut filters = init_filter_state(&ds);
        filters.fields = [CellValue::String("Art".into())].into_iter().collect();
        assert_eq!(filtered_indices(&ds, &filters), vec![1]);
    }

    #[test]
    fn output_satisfies_both_predicates() {
        let ds = dataset(vec![
            row(Some("CS"), Some(3.2)),
            row(Some("Art"), Some(2.0)),
            row(Some("Biology"), Some(3.8)),
            row(Some("CS"), Some(1.9)),
        ]);
        let mut filters = init_filter_state(&ds);
        filters.fields = [
            CellValue::String("CS".into()),
            CellValue::String("Biology".into()),
        ]
        .into_iter()
        .collect();
        filters.gpa_range = (2.5, 4.0);

        let idx = filtered_indices(&ds, &filters);
        assert_eq!(idx, vec![0, 2]);
        for i in idx {
            let rec = &ds.records[i];
            assert!(filters.fields.contains(rec.get(columns::FIELD_OF_STUDY).unwrap()));
            let gpa = rec.number(columns::UNIVERSITY_GPA).unwrap();
            assert!((2.5..=4.0).contains(&gpa));
        }
    }
}
