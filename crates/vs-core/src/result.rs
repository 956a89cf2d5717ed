//! Owned snapshots of drained result streams.
//!
//! A [`QueryResult`] is built by consuming a database cursor to the end. The
//! cursor itself never leaves the database layer, so counting and
//! aggregation work on plain data.

use serde::{Deserialize, Serialize};

/// A single cell value, independent of the database driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl CellValue {
    /// Interpret the cell as a non-negative count.
    ///
    /// Integers below zero, reals with a fractional part, and non-numeric
    /// cells yield `None`. Numeric text (some drivers return `COUNT` as text)
    /// is accepted.
    #[must_use]
    pub fn as_count(&self) -> Option<u64> {
        match self {
            Self::Integer(v) => u64::try_from(*v).ok(),
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss
            )]
            Self::Real(v) if *v >= 0.0 && v.fract() == 0.0 && *v <= u64::MAX as f64 => {
                Some(*v as u64)
            }
            Self::Text(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Ordered rows with named columns from one executed statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    /// Set when the stream ended with an error instead of end-of-stream.
    /// `rows` then holds everything read before the failure.
    pub interrupted: Option<String>,
}

impl QueryResult {
    #[must_use]
    pub const fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            interrupted: None,
        }
    }

    /// A snapshot for a statement that failed before producing any rows.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            interrupted: Some(reason.into()),
        }
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    /// Mark the snapshot as partial.
    pub fn interrupt(&mut self, reason: impl Into<String>) {
        self.interrupted = Some(reason.into());
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.interrupted.is_some()
    }

    /// Index of a column by case-insensitive name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.eq_ignore_ascii_case(name))
    }

    /// Iterate the cells of one column. Empty if the column is unknown.
    pub fn column<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a CellValue> + 'a {
        let index = self.column_index(name);
        self.rows
            .iter()
            .filter_map(move |row| index.and_then(|idx| row.get(idx)))
    }
}
