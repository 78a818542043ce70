//! sheetinspect-core: bounded spreadsheet-structure inspection
//!
//! Opens a workbook read-only, reads a fixed number of leading rows per
//! selected sheet and reports the header row, one sample row and row counts.

pub mod config;
pub mod error;
pub mod inspector;
pub mod layout;
pub mod reader;

pub use config::InspectConfig;
pub use error::InspectError;
pub use inspector::{
    CountMode, DEFAULT_SCAN_ROWS, InspectionResult, Inspector, ROW_COUNT_SCAN_ROWS,
    SheetInspection, SheetSelector, inspect,
};
pub use layout::{Layout, RenderOptions};
pub use reader::{CellValue, MemoryWorkbook, RowWindow, SheetSource};
