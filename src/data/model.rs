use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the employee table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, inferred per cell at load time.
/// Used as a key in `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

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
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64` for range filters and numeric aggregates.
    /// `NaN` counts as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if v.is_nan() => None,
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Interpret the value as an attrition outcome: `Some(true)` means the employee left.
    ///
    /// Only `0`/`1` (integer or float) and booleans are accepted.
    pub fn as_attrition(&self) -> Option<bool> {
        match self {
            CellValue::Integer(0) => Some(false),
            CellValue::Integer(1) => Some(true),
            CellValue::Float(v) if *v == 0.0 => Some(false),
            CellValue::Float(v) if *v == 1.0 => Some(true),
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// A float cell, with `NaN` stored as `Null`.
    pub fn float(v: f64) -> Self {
        if v.is_nan() {
            CellValue::Null
        } else {
            CellValue::Float(v)
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Text form used when writing the value back to a delimited file.
    ///
    /// Floats use the shortest representation that parses back to the same
    /// bits, keeping a trailing `.0` so integral floats stay floats.
    pub fn to_field(&self) -> String {
        match self {
            CellValue::String(s) => s.clone(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(v) => format!("{v:?}"),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Null => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one employee (one row of the source table)
// ---------------------------------------------------------------------------

/// A single employee record. `cells[i]` belongs to `Dataset::columns[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub cells: Vec<CellValue>,
}

/// Shared `Null` returned for out-of-range lookups.
pub(crate) static NULL_CELL: CellValue = CellValue::Null;

impl Record {
    pub fn get(&self, column: usize) -> &CellValue {
        self.cells.get(column).unwrap_or(&NULL_CELL)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed column indices.
///
/// Immutable once built; shared behind an `Arc` by the cache and every session.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Column names in source order.
    pub columns: Vec<String>,
    /// All records (rows), in source order.
    pub records: Vec<Record>,
    /// For each column the sorted set of distinct non-null values.
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl Dataset {
    /// Build column indices from the loaded rows.
    ///
    /// Rows shorter than the header are padded with `Null`, longer rows are truncated,
    /// so every record has exactly one cell per declared column.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = columns
            .iter()
            .map(|c| (c.clone(), BTreeSet::new()))
            .collect();

        let records: Vec<Record> = rows
            .into_iter()
            .map(|mut cells| {
                cells.resize(width, CellValue::Null);
                for (col, val) in columns.iter().zip(&cells) {
                    if !val.is_null() {
                        if let Some(set) = unique_values.get_mut(col) {
                            set.insert(val.clone());
                        }
                    }
                }
                Record { cells }
            })
            .collect();

        Dataset {
            columns,
            records,
            unique_values,
        }
    }

    /// Return a copy without the named column. Missing columns are a no-op.
    pub fn without_column(self, name: &str) -> Self {
        let Some(idx) = self.column_index(name) else {
            return self;
        };
        let mut columns = self.columns;
        columns.remove(idx);
        let rows = self
            .records
            .into_iter()
            .map(|mut r| {
                r.cells.remove(idx);
                r.cells
            })
            .collect();
        Dataset::from_rows(columns, rows)
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Whether every non-null value of the column is numeric (and at least one exists).
    pub fn is_numeric_column(&self, name: &str) -> bool {
        self.unique_values.get(name).is_some_and(|vals| {
            !vals.is_empty() && vals.iter().all(|v| v.as_f64().is_some())
        })
    }

    /// Numeric columns in source order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| self.is_numeric_column(c))
            .cloned()
            .collect()
    }

    /// Observed `(min, max)` over the numeric values of a column.
    pub fn numeric_bounds(&self, name: &str) -> Option<(f64, f64)> {
        let vals = self.unique_values.get(name)?;
        vals.iter()
            .filter_map(CellValue::as_f64)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
