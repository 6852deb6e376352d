use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Column names of the career outcomes table
// ---------------------------------------------------------------------------

/// The fixed header of the source table.
pub mod columns {
    pub const FIELD_OF_STUDY: &str = "Field_of_Study";
    pub const UNIVERSITY_GPA: &str = "University_GPA";
    pub const STARTING_SALARY: &str = "Starting_Salary";
    pub const YEARS_TO_PROMOTION: &str = "Years_to_Promotion";
    pub const NETWORKING_SCORE: &str = "Networking_Score";
    pub const JOB_OFFERS: &str = "Job_Offers";
    pub const GENDER: &str = "Gender";
    pub const CAREER_SATISFACTION: &str = "Career_Satisfaction";
    pub const WORK_LIFE_BALANCE: &str = "WorkLifeBalance_Score";
    pub const CURRENT_JOB_LEVEL: &str = "Current_Job_Level";
    pub const CERTIFICATIONS: &str = "Certifications";

    /// Every loaded file must provide these columns.
    pub const REQUIRED: &[&str] = &[
        FIELD_OF_STUDY,
        UNIVERSITY_GPA,
        STARTING_SALARY,
        YEARS_TO_PROMOTION,
        NETWORKING_SCORE,
        JOB_OFFERS,
        GENDER,
        CAREER_SATISFACTION,
        WORK_LIFE_BALANCE,
        CURRENT_JOB_LEVEL,
        CERTIFICATIONS,
    ];
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the dtypes seen in the source
/// table. Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Numeric reading of the value, used by range filters and aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// A single graduate record (one row of the source table).
#[derive(Debug, Clone, Default)]
pub struct Record {
    /// Dynamic columns: column_name → value.
    pub values: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column)
    }

    /// Numeric view of a cell; `None` when the cell is missing, null, or
    /// not a number.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(CellValue::as_f64)
    }
}

// ---------------------------------------------------------------------------
// CareerDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed column indices. Immutable after
/// load; owned by the app state and passed by reference to every stage.
#[derive(Debug, Clone)]
pub struct CareerDataset {
    /// All records (rows), in source order.
    pub records: Vec<Record>,
    /// Column names in the order they appear in the source file.
    pub column_names: Vec<String>,
    /// For each column the sorted set of observed values (nulls included).
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl CareerDataset {
    /// Build column indices from the loaded records.
    pub fn from_records(records: Vec<Record>, column_names: Vec<String>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = BTreeMap::new();

        for rec in &records {
            for (col, val) in &rec.values {
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        CareerDataset {
            records,
            column_names,
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted non-null values observed in a column.
    pub fn categories(&self, column: &str) -> BTreeSet<CellValue> {
        self.unique_values
            .get(column)
            .map(|vals| vals.iter().filter(|v| !v.is_null()).cloned().collect())
            .unwrap_or_default()
    }

    /// Observed `(min, max)` of a numeric column, ignoring nulls and
    /// non-numeric cells. `None` when the column holds no numbers.
    pub fn numeric_bounds(&self, column: &str) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for rec in &self.records {
            if let Some(v) = rec.number(column) {
                bounds = Some(match bounds {
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                    None => (v, v),
                });
            }
        }
        bounds
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
