//! Excel/ODS workbook reader using calamine

use calamine::{Cell, Data, DataRef, Dimensions, ExcelDateTime, Reader, Sheets, open_workbook_auto};
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::InspectError;

pub mod memory;
pub mod workbook;

pub use memory::MemoryWorkbook;
pub use workbook::{CellValue, RowWindow};

/// A workbook the inspector can pull scan windows from
pub trait SheetSource {
    /// Sheet names in presentation order
    fn sheet_names(&self) -> Vec<String>;

    /// Read the leading `max_rows` rows of `sheet`
    fn read_window(&mut self, sheet: &str, max_rows: u32) -> Result<RowWindow, InspectError>;
}

/// A workbook opened read-only from disk
pub struct CalamineSource {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
}

/// Open a workbook from a file path
pub fn open_workbook<P: AsRef<Path>>(path: P) -> Result<CalamineSource, InspectError> {
    let path = path.as_ref();

    let metadata = fs::metadata(path).map_err(|e| InspectError::from_io(path, e))?;
    if metadata.is_dir() {
        return Err(InspectError::from_io(
            path,
            io::Error::other("path is a directory"),
        ));
    }
    // Surface permission problems before calamine folds them into its own error
    File::open(path).map_err(|e| InspectError::from_io(path, e))?;

    let workbook = open_workbook_auto(path).map_err(|e| InspectError::format(path, e))?;
    debug!(path = %path.display(), "opened workbook");

    Ok(CalamineSource {
        path: path.to_path_buf(),
        workbook,
    })
}

impl SheetSource for CalamineSource {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    fn read_window(&mut self, sheet: &str, max_rows: u32) -> Result<RowWindow, InspectError> {
        let path = self.path.as_path();
        match &mut self.workbook {
            // XLSX and XLSB can be streamed, so reading stops at the window edge
            Sheets::Xlsx(xlsx) => {
                let mut cells = xlsx
                    .worksheet_cells_reader(sheet)
                    .map_err(|e| InspectError::format(path, e))?;
                let dimensions = cells.dimensions();
                stream_window(path, max_rows, dimensions, || cells.next_cell())
            }
            Sheets::Xlsb(xlsb) => {
                let mut cells = xlsb
                    .worksheet_cells_reader(sheet)
                    .map_err(|e| InspectError::format(path, e))?;
                let dimensions = cells.dimensions();
                stream_window(path, max_rows, dimensions, || cells.next_cell())
            }
            other => {
                let range = other
                    .worksheet_range(sheet)
                    .map_err(|e| InspectError::format(path, e))?;
                let (start_row, start_col) = range.start().unwrap_or((0, 0));
                let take = max_rows.saturating_sub(start_row) as usize;

                let cells = range.rows().take(take).enumerate().flat_map(|(r, row)| {
                    row.iter().enumerate().filter_map(move |(c, data)| {
                        (!matches!(data, Data::Empty)).then(|| {
                            (
                                start_row + r as u32,
                                start_col + c as u32,
                                parse_cell_value(data),
                            )
                        })
                    })
                });
                Ok(RowWindow::from_cells(cells, max_rows, range.end()))
            }
        }
    }
}

fn stream_window<'a, E, F>(
    path: &Path,
    max_rows: u32,
    dimensions: Dimensions,
    mut next_cell: F,
) -> Result<RowWindow, InspectError>
where
    E: Display,
    F: FnMut() -> Result<Option<Cell<DataRef<'a>>>, E>,
{
    let (mut end_row, end_col) = dimensions.end;
    let mut cells = Vec::new();

    while let Some(cell) = next_cell().map_err(|e| InspectError::format(path, e))? {
        let (row, col) = cell.get_position();
        if row >= max_rows {
            // Cells arrive row by row; the first one past the window ends the scan
            end_row = end_row.max(row);
            break;
        }
        let value = parse_cell_ref(cell.get_value());
        if !value.is_empty() {
            cells.push((row, col, value));
        }
    }

    debug!(cells = cells.len(), max_rows, "streamed scan window");
    Ok(RowWindow::from_cells(cells, max_rows, Some((end_row, end_col))))
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) => parse_date_time(dt),
        Data::DateTimeIso(s) => CellValue::DateTime(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

fn parse_cell_ref(data: &DataRef<'_>) -> CellValue {
    match data {
        DataRef::Int(i) => CellValue::Int(*i),
        DataRef::Float(f) => CellValue::Float(*f),
        DataRef::String(s) => CellValue::Text(s.clone()),
        DataRef::SharedString(s) => CellValue::Text(s.to_string()),
        DataRef::Bool(b) => CellValue::Boolean(*b),
        DataRef::Error(e) => CellValue::Error(e.to_string()),
        DataRef::Empty => CellValue::Empty,
        DataRef::DateTime(dt) => parse_date_time(dt),
        DataRef::DateTimeIso(s) => CellValue::DateTime(s.clone()),
        DataRef::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

fn parse_date_time(dt: &ExcelDateTime) -> CellValue {
    match dt.as_datetime() {
        // Debug output of a naive date-time is already `YYYY-MM-DDTHH:MM:SS`
        Some(value) => CellValue::DateTime(format!("{:?}", value)),
        None => CellValue::Float(dt.as_f64()),
    }
}
