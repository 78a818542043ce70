//! Scan-window data structures

use serde::{Serialize, Serializer};
use std::fmt;

/// Largest magnitude at which an `f64` still holds every integer exactly
const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Cell value types
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
    /// ISO-8601 date/time text
    DateTime(String),
    Error(String),
}

impl CellValue {
    /// Check if the cell has no value at all
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the cell is empty or only whitespace once rendered as text
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) | CellValue::DateTime(s) | CellValue::Error(s) => {
                s.trim().is_empty()
            }
            _ => false,
        }
    }

    /// Key used when this value labels a column in a paired sample
    pub fn header_key(&self) -> String {
        match self {
            CellValue::Empty => "null".to_string(),
            other => other.to_string(),
        }
    }

    fn integral(f: f64) -> Option<i64> {
        if f.fract() == 0.0 && f.abs() < EXACT_INT_LIMIT {
            Some(f as i64)
        } else {
            None
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(x) => match Self::integral(*x) {
                Some(i) => write!(f, "{}", i),
                None => write!(f, "{}", x),
            },
            CellValue::Text(s) | CellValue::DateTime(s) | CellValue::Error(s) => f.write_str(s),
            CellValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_none(),
            CellValue::Int(i) => serializer.serialize_i64(*i),
            // Spreadsheet numbers are stored as floats; whole ones read back as integers
            CellValue::Float(x) => match Self::integral(*x) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*x),
            },
            CellValue::Text(s) | CellValue::DateTime(s) | CellValue::Error(s) => {
                serializer.serialize_str(s)
            }
            CellValue::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

/// The leading rows of one sheet, read up to the scan window
#[derive(Debug, Clone, PartialEq)]
pub struct RowWindow {
    /// Rows `1..=min(window, max_row)`, gaps filled, each padded to the sheet width
    pub rows: Vec<Vec<CellValue>>,
    /// Maximum row index the workbook reports for the sheet (1-based, at least 1)
    pub max_row: u32,
}

impl RowWindow {
    /// Build a window from sparse `(row, col, value)` cells (0-based positions).
    ///
    /// `reported_end` is the bottom-right corner the workbook declares for the
    /// sheet, if any. Cells at or beyond `max_rows` only raise `max_row`.
    pub fn from_cells<I>(cells: I, max_rows: u32, reported_end: Option<(u32, u32)>) -> Self
    where
        I: IntoIterator<Item = (u32, u32, CellValue)>,
    {
        let (mut last_row, mut width) = match reported_end {
            Some((row, col)) => (row + 1, col + 1),
            None => (1, 0),
        };

        let mut kept = Vec::new();
        for (row, col, value) in cells {
            last_row = last_row.max(row + 1);
            if row < max_rows {
                width = width.max(col + 1);
                kept.push((row, col, value));
            }
        }

        let height = last_row.min(max_rows) as usize;
        let mut rows = vec![vec![CellValue::Empty; width as usize]; height];
        for (row, col, value) in kept {
            rows[row as usize][col as usize] = value;
        }

        RowWindow {
            rows,
            max_row: last_row,
        }
    }

    /// Number of rows in the window with at least one non-blank cell
    pub fn non_blank_rows(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.is_blank()))
            .count()
    }
}
