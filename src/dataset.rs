use calamine::{open_workbook, Data, Reader, Xlsx};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Name of the worksheet holding the datasheet table.
pub const DATA_SHEET: &str = "data";

/// Errors raised while loading the datasheet workbook.
///
/// Loading is the only operation in the crate that can fail hard; everything
/// downstream degrades to placeholders instead of erroring.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX read error: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("sheet {0:?} not found in workbook")]
    MissingSheet(String),

    #[error("sheet {0:?} has no header row")]
    EmptySheet(String),
}

/// A single cell of the loaded table.
///
/// The comparison pipeline only ever needs three shapes: numbers (dimensions,
/// efficiencies, coordinates), free text (names, material codes, notes) and
/// missing cells. `Empty` never matches an equality filter and never appears
/// in a candidate list.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    Empty,
}

impl Value {
    /// Whether this cell counts as missing for filtering purposes.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// The text content, if this is a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The numeric content, if this is a number cell.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Renders the cell the way it appears in both the table and the CSV
    /// export: integral numbers without a fractional part, missing cells as
    /// an empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Text(s) => f.write_str(s),
            Value::Empty => Ok(()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl Ord for Value {
    /// Total order used for candidate sorting: missing cells first, then
    /// numbers ascending, then text lexicographically. `total_cmp` keeps the
    /// order bit-identical across runs even for pathological floats.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Empty, Value::Empty) => Ordering::Equal,
            (Value::Empty, _) => Ordering::Less,
            (_, Value::Empty) => Ordering::Greater,
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Number(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Number(_)) => Ordering::Greater,
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The datasheet table: one row per AHU model record, loaded once per
/// process and shared read-only across every render.
#[derive(Clone, Debug)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Load the datasheet from an xlsx workbook.
    ///
    /// The first row of the `data` sheet is taken as the column headers;
    /// every following row becomes a record. Short rows are padded with
    /// missing cells, long rows are truncated to the header width.
    ///
    /// # Arguments
    /// * `filepath` - Path to the xlsx workbook
    ///
    /// # Returns
    /// * `Result<Dataset, DatasetError>` - The loaded table or an error
    pub fn load(filepath: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let mut workbook: Xlsx<_> = open_workbook(filepath)?;

        if !workbook.sheet_names().iter().any(|s| s == DATA_SHEET) {
            return Err(DatasetError::MissingSheet(DATA_SHEET.to_string()));
        }

        let range = workbook.worksheet_range(DATA_SHEET)?;
        let mut rows_iter = range.rows();

        let header = rows_iter
            .next()
            .ok_or_else(|| DatasetError::EmptySheet(DATA_SHEET.to_string()))?;
        let columns: Vec<String> = header.iter().map(cell_to_header).collect();

        let rows = rows_iter
            .map(|row| row.iter().map(cell_to_value).collect())
            .collect();

        Ok(Self::from_rows(columns, rows))
    }

    /// Build a dataset directly from headers and cell rows.
    ///
    /// Used by tests and embedders; applies the same pad/truncate rule as
    /// the xlsx loader.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Empty);
                row
            })
            .collect();
        Dataset { columns, rows }
    }

    /// The column headers, in physical order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Index of the column with this exact header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The cell at (row, col). Both indices must be in range.
    pub fn value(&self, row: usize, col: usize) -> &Value {
        &self.rows[row][col]
    }
}

fn cell_to_header(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Empty,
        Data::String(s) => Value::Text(s.clone()),
        Data::Float(f) => Value::Number(*f),
        Data::Int(i) => Value::Number(*i as f64),
        Data::Bool(b) => Value::Text(b.to_string()),
        Data::Error(_) => Value::Empty,
        Data::DateTime(dt) => Value::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Value::Text(s.clone()),
        Data::DurationIso(s) => Value::Text(s.clone()),
    }
}
