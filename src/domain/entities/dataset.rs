use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;

/// A single cell. Columns whose every non-empty cell parses as a number are
/// loaded as `Number`; everything else stays `Text`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(value) => Some(*value),
            Value::Text(_) => None,
        }
    }

    /// Blank cells are missing in every column: NaN in numeric columns, an
    /// empty string in text columns.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Number(value) => value.is_nan(),
            Value::Text(value) => value.is_empty(),
        }
    }

    /// Total order used by the sort engine: numbers before text, NaN treated as
    /// equal to NaN. Callers place missing values themselves.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(left), Value::Number(right)) => {
                left.partial_cmp(right).unwrap_or(Ordering::Equal)
            }
            (Value::Text(left), Value::Text(right)) => left.cmp(right),
            (Value::Number(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Number(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(value) => f.write_str(&format_number(*value)),
            Value::Text(value) => f.write_str(value),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// Renders whole numbers without a fractional part so `3.0` reads as `3`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// One row as the table renders it: column name to value, columns in name order.
pub type Record = BTreeMap<String, Value>;

/// Raw string cells as read from a source, before type inference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// The listings table. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    column_index: HashMap<String, usize>,
    rows: Vec<Vec<Value>>,
    loaded_at: DateTime<Local>,
}

impl Dataset {
    pub fn from_tabular(data: TabularData) -> Self {
        let TabularData { columns, rows } = data;
        let numeric: Vec<bool> = (0..columns.len())
            .map(|col_idx| is_numeric_column(&rows, col_idx))
            .collect();

        let typed_rows = rows
            .iter()
            .map(|row| {
                numeric
                    .iter()
                    .enumerate()
                    .map(|(col_idx, is_numeric)| {
                        let raw = row.get(col_idx).map(String::as_str).unwrap_or("");
                        infer_cell(raw, *is_numeric)
                    })
                    .collect()
            })
            .collect();

        let column_index = columns
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();

        Self {
            columns,
            column_index,
            rows: typed_rows,
            loaded_at: Local::now(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Column names in the order the table shows them.
    pub fn sorted_columns(&self) -> Vec<String> {
        let mut columns = self.columns.clone();
        columns.sort();
        columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Local> {
        self.loaded_at
    }

    /// Row positions `0..len`, the starting point of every query.
    pub fn row_ids(&self) -> Vec<usize> {
        (0..self.rows.len()).collect()
    }

    pub fn value(&self, row: usize, col_idx: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|cells| cells.get(col_idx))
    }

    pub fn value_by_name(&self, row: usize, column: &str) -> Option<&Value> {
        self.column_index(column)
            .and_then(|col_idx| self.value(row, col_idx))
    }

    pub fn record(&self, row: usize) -> Record {
        self.columns
            .iter()
            .zip(self.rows.get(row).into_iter().flatten())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

fn is_numeric_column(rows: &[Vec<String>], col_idx: usize) -> bool {
    let mut seen_value = false;
    for row in rows {
        let raw = row.get(col_idx).map(|cell| cell.trim()).unwrap_or("");
        if raw.is_empty() {
            continue;
        }
        if raw.parse::<f64>().is_err() {
            return false;
        }
        seen_value = true;
    }
    seen_value
}

fn infer_cell(raw: &str, is_numeric: bool) -> Value {
    if is_numeric {
        Value::Number(raw.trim().parse::<f64>().unwrap_or(f64::NAN))
    } else {
        Value::Text(raw.to_string())
    }
}
