//! In-memory workbook, for embedding callers and tests

use std::path::Path;

use super::{CellValue, RowWindow, SheetSource};
use crate::error::InspectError;

/// Ordered named sheets held as dense rows
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<(String, Vec<Vec<CellValue>>)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet, builder style
    pub fn with_sheet(mut self, name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        self.sheets.push((name.into(), rows));
        self
    }
}

impl SheetSource for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_window(&mut self, sheet: &str, max_rows: u32) -> Result<RowWindow, InspectError> {
        let rows = self
            .sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, rows)| rows)
            .ok_or_else(|| {
                InspectError::format(Path::new("<memory>"), format!("no sheet named '{}'", sheet))
            })?;

        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let end = match (rows.len() as u32, width) {
            (0, _) | (_, 0) => None,
            (height, width) => Some((height - 1, width - 1)),
        };

        let cells = rows
            .iter()
            .take(max_rows as usize)
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(c, value)| (r as u32, c as u32, value.clone()))
            });

        Ok(RowWindow::from_cells(cells, max_rows, end))
    }
}
