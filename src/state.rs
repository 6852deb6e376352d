use crate::color::ColorMap;
use crate::data::filter::{FilterState, init_filter_state};
use crate::data::model::{CareerDataset, CellValue, columns};
use crate::report::{PageSpec, render};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<CareerDataset>,

    /// Current filter selections.
    pub filters: FilterState,

    /// Page description for the current filters (cached; rebuilt on change).
    pub page: Option<PageSpec>,

    /// Consistent per-field colours shared across charts.
    pub field_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filters: FilterState::default(),
            page: None,
            field_colors: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, initialise filters and colours.
    pub fn set_dataset(&mut self, dataset: CareerDataset) {
        self.filters = init_filter_state(&dataset);
        self.field_colors = Some(ColorMap::new(
            dataset
                .categories(columns::FIELD_OF_STUDY)
                .iter()
                .map(|v| v.to_string()),
        ));
        self.page = Some(render(&dataset, &self.filters));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Rebuild the page after any filter change.
    pub fn refresh(&mut self) {
        if let Some(dataset) = &self.dataset {
            self.page = Some(render(dataset, &self.filters));
        }
    }

    /// Toggle a single field-of-study value in the filter.
    pub fn toggle_field(&mut self, value: &CellValue) {
        if !self.filters.fields.remove(value) {
            self.filters.fields.insert(value.clone());
        }
        self.refresh();
    }

    /// Select all observed fields of study.
    pub fn select_all_fields(&mut self) {
        if let Some(dataset) = &self.dataset {
            self.filters.fields = dataset.categories(columns::FIELD_OF_STUDY);
        }
        self.refresh();
    }

    /// Deselect every field of study (matches nothing).
    pub fn select_no_fields(&mut self) {
        self.filters.fields.clear();
        self.refresh();
    }

    /// Update the GPA interval. An inverted interval is kept as-is and
    /// simply matches nothing.
    pub fn set_gpa_range(&mut self, min: f64, max: f64) {
        self.filters.gpa_range = (min, max);
        self.refresh();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset() -> CareerDataset {
        let rows = [("CS", 3.5), ("Art", 2.9), ("CS", 3.9)];
        let records = rows
            .iter()
            .map(|(field, gpa)| {
                let mut rec = Record::default();
                for col in columns::REQUIRED {
                    rec.values.insert(col.to_string(), CellValue::Integer(1));
                }
                rec.values.insert(
                    columns::FIELD_OF_STUDY.into(),
                    CellValue::String(field.to_string()),
                );
                rec.values
                    .insert(columns::UNIVERSITY_GPA.into(), CellValue::Float(*gpa));
                rec
            })
            .collect();
        CareerDataset::from_records(
            records,
            columns::REQUIRED.iter().map(|c| c.to_string()).collect(),
        )
    }

    #[test]
    fn set_dataset_selects_everything() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        assert_eq!(state.filters.fields.len(), 2);
        assert_eq!(state.filters.gpa_range, (2.9, 3.9));
        let page = state.page.as_ref().unwrap();
        assert_eq!(page.visible_rows, 3);
    }

    #[test]
    fn toggling_a_field_narrows_the_page() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.toggle_field(&CellValue::String("CS".into()));
        assert_eq!(state.page.as_ref().unwrap().visible_rows, 1);

        state.toggle_field(&CellValue::String("CS".into()));
        assert_eq!(state.page.as_ref().unwrap().visible_rows, 3);
    }

    #[test]
    fn gpa_range_change_refreshes_the_page() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.set_gpa_range(3.4, 4.0);
        assert_eq!(state.page.as_ref().unwrap().visible_rows, 2);

        state.select_no_fields();
        assert_eq!(state.page.as_ref().unwrap().visible_rows, 0);
    }
}
