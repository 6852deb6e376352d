use std::collections::HashMap;

use super::model::{CareerDataset, CellValue};

// ---------------------------------------------------------------------------
// Overview statistics for the filtered rows
// ---------------------------------------------------------------------------

/// Summary of a single column. Numeric columns carry mean/std/min/max,
/// categorical ones unique/top/freq; `count` is always the non-null count.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub unique: Option<usize>,
    pub top: Option<String>,
    pub freq: Option<usize>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// One row per source column, in source column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescribeTable {
    pub columns: Vec<ColumnSummary>,
}

/// Per-column summary of the given rows. A column counts as numeric when
/// every non-null cell has a numeric reading; otherwise it is summarised
/// as categorical.
pub fn describe(dataset: &CareerDataset, indices: &[usize]) -> DescribeTable {
    let columns = dataset
        .column_names
        .iter()
        .map(|name| summarize_column(dataset, indices, name))
        .collect();
    DescribeTable { columns }
}

fn summarize_column(dataset: &CareerDataset, indices: &[usize], name: &str) -> ColumnSummary {
    let cells: Vec<&CellValue> = indices
        .iter()
        .filter_map(|&i| dataset.records[i].get(name))
        .filter(|v| !v.is_null())
        .collect();

    let mut summary = ColumnSummary {
        name: name.to_string(),
        count: cells.len(),
        unique: None,
        top: None,
        freq: None,
        mean: None,
        std: None,
        min: None,
        max: None,
    };
    if cells.is_empty() {
        return summary;
    }

    let numbers: Vec<f64> = cells.iter().filter_map(|v| v.as_f64()).collect();
    if numbers.len() == cells.len() {
        summary.mean = mean(&numbers);
        summary.std = std_dev(&numbers);
        summary.min = numbers.iter().copied().reduce(f64::min);
        summary.max = numbers.iter().copied().reduce(f64::max);
    } else {
        // Categorical: mode with first-seen tie-breaking.
        let mut order: Vec<&CellValue> = Vec::new();
        let mut freq: HashMap<&CellValue, usize> = HashMap::new();
        for &cell in &cells {
            let n = freq.entry(cell).or_insert(0);
            if *n == 0 {
                order.push(cell);
            }
            *n += 1;
        }
        summary.unique = Some(freq.len());
        let mut top: Option<&CellValue> = None;
        for &cell in &order {
            if top.map_or(true, |best| freq[cell] > freq[best]) {
                top = Some(cell);
            }
        }
        if let Some(top) = top {
            summary.top = Some(top.to_string());
            summary.freq = Some(freq[top]);
        }
    }
    summary
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n − 1 denominator). `None` below two samples.
pub(crate) fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
