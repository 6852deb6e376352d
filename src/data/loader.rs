use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CareerDataset, CellValue, Record, columns};

// ---------------------------------------------------------------------------
// Load error taxonomy
// ---------------------------------------------------------------------------

/// Classified load failures. I/O and parse failures travel as `anyhow`
/// context around the underlying error instead.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a career outcomes table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one record per line
/// * `.json`    – `[{ "Field_of_Study": "...", "University_GPA": 3.4, ... }, ...]`
/// * `.parquet` – scalar Utf8 / Int / Float / Boolean columns
///
/// Whatever the format, the loaded table must carry every column in
/// [`columns::REQUIRED`].
pub fn load_file(path: &Path) -> Result<CareerDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedExtension(other.to_string()).into()),
    };

    validate_columns(&dataset)?;
    Ok(dataset)
}

fn validate_columns(dataset: &CareerDataset) -> Result<()> {
    for col in columns::REQUIRED {
        if !dataset.column_names.iter().any(|c| c == col) {
            return Err(DataError::MissingColumn(col.to_string()).into());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one graduate per line. Cell
/// types are inferred per value; empty cells and the usual null tokens
/// become [`CellValue::Null`].
fn load_csv(path: &Path) -> Result<CareerDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut values = BTreeMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            let Some(col_name) = headers.get(col_idx) else {
                bail!("CSV row {row_no}: more cells than header columns");
            };
            values.insert(col_name.clone(), guess_cell_type(value));
        }
        records.push(Record { values });
    }

    Ok(CareerDataset::from_records(records, headers))
}

fn guess_cell_type(s: &str) -> CellValue {
    match s {
        "" | "NA" | "N/A" | "null" | "NaN" => return CellValue::Null,
        _ => {}
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Field_of_Study": "Computer Science",
///     "University_GPA": 3.4,
///     "Starting_Salary": 72000,
///     ...
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<CareerDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    let mut column_names: Vec<String> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut values = BTreeMap::new();
        for (key, val) in obj {
            if !column_names.iter().any(|c| c == key) {
                column_names.push(key.clone());
            }
            values.insert(key.clone(), json_to_cell(val));
        }
        records.push(Record { values });
    }

    Ok(CareerDataset::from_records(records, column_names))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of scalar columns. Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<CareerDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut column_names: Vec<String> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        if column_names.is_empty() {
            column_names = schema.fields().iter().map(|f| f.name().clone()).collect();
        }

        for row in 0..batch.num_rows() {
            let mut values = BTreeMap::new();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let value = extract_cell_value(batch.column(col_idx), row);
                values.insert(field.name().clone(), value);
            }
            records.push(Record { values });
        }
    }

    Ok(CareerDataset::from_records(records, column_names))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell_value(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
                CellValue::String(s.value(row).to_string())
            } else {
                // LargeStringArray
                let s = col.as_string::<i64>();
                CellValue::String(s.value(row).to_string())
            }
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            CellValue::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            CellValue::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            CellValue::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            CellValue::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            CellValue::Bool(arr.value(row))
        }
        _ => CellValue::String(format!("{:?}", col.data_type())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const HEADER: &str = "Field_of_Study,University_GPA,Starting_Salary,Years_to_Promotion,\
Networking_Score,Job_Offers,Gender,Career_Satisfaction,WorkLifeBalance_Score,\
Current_Job_Level,Certifications";

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn csv_loads_with_inferred_types() {
        let body = format!(
            "{HEADER}\n\
             Computer Science,3.5,72000,2,7,3,Female,8.0,6.5,Mid,2\n\
             Art,,41000,4,3,1,Male,6.0,7.5,Entry,0\n"
        );
        let path = write_temp("careerboard_load_csv.csv", &body);
        let ds = load_file(&path).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.column_names.len(), 11);
        assert_eq!(
            ds.records[0].get(columns::FIELD_OF_STUDY),
            Some(&CellValue::String("Computer Science".into()))
        );
        assert_eq!(
            ds.records[0].get(columns::UNIVERSITY_GPA),
            Some(&CellValue::Float(3.5))
        );
        assert_eq!(
            ds.records[0].get(columns::STARTING_SALARY),
            Some(&CellValue::Integer(72000))
        );
        // Empty GPA cell parses as null
        assert_eq!(ds.records[1].get(columns::UNIVERSITY_GPA), Some(&CellValue::Null));
    }

    #[test]
    fn csv_null_tokens_parse_as_null() {
        assert_eq!(guess_cell_type(""), CellValue::Null);
        assert_eq!(guess_cell_type("NA"), CellValue::Null);
        assert_eq!(guess_cell_type("NaN"), CellValue::Null);
        assert_eq!(guess_cell_type("3"), CellValue::Integer(3));
        assert_eq!(guess_cell_type("3.5"), CellValue::Float(3.5));
        assert_eq!(guess_cell_type("Senior"), CellValue::String("Senior".into()));
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let body = "Field_of_Study,University_GPA\nCS,3.2\n";
        let path = write_temp("careerboard_missing_col.csv", body);
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Starting_Salary"), "{err}");
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let path = write_temp("careerboard_bad_ext.txt", "not a table");
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported file extension"), "{err}");
    }

    #[test]
    fn json_records_load() {
        let body = r#"[
            {"Field_of_Study": "CS", "University_GPA": 3.5, "Starting_Salary": 72000,
             "Years_to_Promotion": 2, "Networking_Score": 7, "Job_Offers": 3,
             "Gender": "Female", "Career_Satisfaction": 8.0, "WorkLifeBalance_Score": 6.5,
             "Current_Job_Level": "Mid", "Certifications": 2},
            {"Field_of_Study": "Art", "University_GPA": null, "Starting_Salary": 41000,
             "Years_to_Promotion": 4, "Networking_Score": 3, "Job_Offers": 1,
             "Gender": "Male", "Career_Satisfaction": 6.0, "WorkLifeBalance_Score": 7.5,
             "Current_Job_Level": "Entry", "Certifications": 0}
        ]"#;
        let path = write_temp("careerboard_load_json.json", body);
        let ds = load_file(&path).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].get(columns::UNIVERSITY_GPA), Some(&CellValue::Null));
        assert_eq!(
            ds.records[1].get(columns::CURRENT_JOB_LEVEL),
            Some(&CellValue::String("Entry".into()))
        );
    }
}
