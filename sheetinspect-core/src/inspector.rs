//! Bounded sheet inspection: headers, one sample row and row counts

use indexmap::IndexMap;
use std::path::Path;
use tracing::debug;

use crate::config::InspectConfig;
use crate::error::InspectError;
use crate::reader::{self, CellValue, SheetSource};

/// Default scan window for a structure preview
pub const DEFAULT_SCAN_ROWS: u32 = 5;

/// Scan window of the row-count report
pub const ROW_COUNT_SCAN_ROWS: u32 = 100;

/// Which sheets of a workbook to inspect
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SheetSelector {
    /// Every sheet, in workbook order
    #[default]
    All,
    /// Explicit names, visited in the given order; absent names are skipped
    Named(Vec<String>),
    /// The first N sheets by position
    First(usize),
}

impl SheetSelector {
    /// Resolve against the workbook's sheet list
    pub fn select(&self, available: &[String]) -> Vec<String> {
        match self {
            SheetSelector::All => available.to_vec(),
            SheetSelector::First(n) => available.iter().take(*n).cloned().collect(),
            SheetSelector::Named(names) => {
                let mut selected: Vec<String> = Vec::new();
                for name in names {
                    if selected.contains(name) {
                        continue;
                    }
                    if available.contains(name) {
                        selected.push(name.clone());
                    } else {
                        debug!(sheet = %name, "requested sheet not in workbook, skipping");
                    }
                }
                selected
            }
        }
    }
}

/// What was learned about one sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetInspection {
    pub name: String,
    /// Values of row 1, empty when row 1 holds nothing
    pub headers: Vec<CellValue>,
    /// Values of row 2, empty when the window has a single row
    pub sample_row: Vec<CellValue>,
    /// Maximum row index reported by the workbook
    pub max_row: u32,
    /// Rows inside the scan window with at least one non-blank cell
    pub non_blank_rows: usize,
}

impl SheetInspection {
    pub fn has_sample(&self) -> bool {
        !self.sample_row.is_empty()
    }

    /// Pair headers with the sample row position by position.
    ///
    /// Extra entries on either side are dropped. A repeated header keeps its
    /// first position and takes the later value.
    pub fn paired_sample(&self) -> IndexMap<String, CellValue> {
        self.headers
            .iter()
            .zip(&self.sample_row)
            .map(|(header, value)| (header.header_key(), value.clone()))
            .collect()
    }

    /// Row count under the given counting semantics
    pub fn row_count(&self, mode: CountMode) -> usize {
        match mode {
            CountMode::MaxRow => self.max_row as usize,
            CountMode::NonBlank => self.non_blank_rows,
        }
    }
}

/// The two row-count semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMode {
    /// Maximum row index the workbook reports
    #[default]
    MaxRow,
    /// Non-blank rows within the scan window
    NonBlank,
}

/// Result of inspecting one workbook
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionResult {
    /// Every sheet name in the workbook, in order
    pub sheet_names: Vec<String>,
    /// Inspected sheets keyed by name, in visiting order
    pub sheets: IndexMap<String, SheetInspection>,
    /// Rows read per sheet
    pub scan_rows: u32,
}

impl InspectionResult {
    pub fn get(&self, name: &str) -> Option<&SheetInspection> {
        self.sheets.get(name)
    }
}

/// Main inspector interface
#[derive(Debug, Clone)]
pub struct Inspector {
    selector: SheetSelector,
    max_scan_rows: u32,
}

impl Inspector {
    /// Inspect every sheet with the default scan window
    pub fn new() -> Self {
        Self {
            selector: SheetSelector::All,
            max_scan_rows: DEFAULT_SCAN_ROWS,
        }
    }

    /// Build an inspector from a validated configuration
    pub fn from_config(config: &InspectConfig) -> Self {
        Self::new()
            .with_selector(config.selector())
            .with_max_scan_rows(config.scan_rows())
    }

    pub fn with_selector(mut self, selector: SheetSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Set the scan window; a zero window reads no rows at all
    pub fn with_max_scan_rows(mut self, rows: u32) -> Self {
        self.max_scan_rows = rows;
        self
    }

    pub fn max_scan_rows(&self) -> u32 {
        self.max_scan_rows
    }

    /// Open a workbook file, inspect it and close it again
    pub fn inspect_file<P: AsRef<Path>>(&self, path: P) -> Result<InspectionResult, InspectError> {
        let mut source = reader::open_workbook(path)?;
        self.inspect_source(&mut source)
    }

    /// Inspect an already opened workbook
    pub fn inspect_source<S: SheetSource>(
        &self,
        source: &mut S,
    ) -> Result<InspectionResult, InspectError> {
        let sheet_names = source.sheet_names();
        let mut sheets = IndexMap::new();

        for name in self.selector.select(&sheet_names) {
            let window = source.read_window(&name, self.max_scan_rows)?;
            let non_blank_rows = window.non_blank_rows();
            let mut rows = window.rows.into_iter();

            let headers = rows
                .next()
                .filter(|row| row.iter().any(|cell| !cell.is_empty()))
                .unwrap_or_default();
            let sample_row = rows.next().unwrap_or_default();

            debug!(
                sheet = %name,
                headers = headers.len(),
                max_row = window.max_row,
                non_blank_rows,
                "inspected sheet"
            );

            sheets.insert(
                name.clone(),
                SheetInspection {
                    name,
                    headers,
                    sample_row,
                    max_row: window.max_row,
                    non_blank_rows,
                },
            );
        }

        Ok(InspectionResult {
            sheet_names,
            sheets,
            scan_rows: self.max_scan_rows,
        })
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

/// Inspect `path` with the given selection and scan window
pub fn inspect<P: AsRef<Path>>(
    path: P,
    selector: SheetSelector,
    max_scan_rows: u32,
) -> Result<InspectionResult, InspectError> {
    Inspector::new()
        .with_selector(selector)
        .with_max_scan_rows(max_scan_rows)
        .inspect_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{MemoryWorkbook, RowWindow};

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn two_sheet_workbook() -> MemoryWorkbook {
        MemoryWorkbook::new()
            .with_sheet(
                "A",
                vec![
                    vec![text("id"), text("name")],
                    vec![CellValue::Float(1.0), text("x")],
                ],
            )
            .with_sheet("B", vec![vec![text("only")]])
    }

    /// Records the largest window any caller asked for
    struct WindowRecorder {
        inner: MemoryWorkbook,
        largest_request: u32,
        largest_row_returned: usize,
    }

    impl SheetSource for WindowRecorder {
        fn sheet_names(&self) -> Vec<String> {
            self.inner.sheet_names()
        }

        fn read_window(&mut self, sheet: &str, max_rows: u32) -> Result<RowWindow, InspectError> {
            self.largest_request = self.largest_request.max(max_rows);
            let window = self.inner.read_window(sheet, max_rows)?;
            self.largest_row_returned = self.largest_row_returned.max(window.rows.len());
            Ok(window)
        }
    }

    #[test]
    fn test_headers_and_paired_sample() {
        let result = Inspector::new()
            .inspect_source(&mut two_sheet_workbook())
            .unwrap();

        let a = result.get("A").unwrap();
        assert_eq!(a.headers, vec![text("id"), text("name")]);
        assert_eq!(
            serde_json::to_string(&a.paired_sample()).unwrap(),
            r#"{"id":1,"name":"x"}"#
        );
        assert_eq!(a.max_row, 2);
        assert_eq!(a.non_blank_rows, 2);

        let b = result.get("B").unwrap();
        assert_eq!(b.headers, vec![text("only")]);
        assert!(!b.has_sample());
        assert!(b.paired_sample().is_empty());
    }

    #[test]
    fn test_missing_named_sheet_is_omitted() {
        let selector = SheetSelector::Named(vec![
            "B".to_string(),
            "Missing".to_string(),
            "A".to_string(),
            "B".to_string(),
        ]);
        let result = Inspector::new()
            .with_selector(selector)
            .inspect_source(&mut two_sheet_workbook())
            .unwrap();

        let keys: Vec<_> = result.sheets.keys().cloned().collect();
        assert_eq!(keys, vec!["B", "A"]);
        assert_eq!(result.sheet_names, vec!["A", "B"]);
    }

    #[test]
    fn test_first_n_selector() {
        let result = Inspector::new()
            .with_selector(SheetSelector::First(1))
            .inspect_source(&mut two_sheet_workbook())
            .unwrap();
        assert_eq!(result.sheets.len(), 1);
        assert!(result.get("A").is_some());

        let result = Inspector::new()
            .with_selector(SheetSelector::First(10))
            .inspect_source(&mut two_sheet_workbook())
            .unwrap();
        assert_eq!(result.sheets.len(), 2);
    }

    #[test]
    fn test_never_reads_past_window() {
        let rows = (0..1000).map(|i| vec![CellValue::Int(i)]).collect();
        let mut source = WindowRecorder {
            inner: MemoryWorkbook::new().with_sheet("Big", rows),
            largest_request: 0,
            largest_row_returned: 0,
        };

        let result = Inspector::new()
            .with_max_scan_rows(3)
            .inspect_source(&mut source)
            .unwrap();

        assert_eq!(source.largest_request, 3);
        assert!(source.largest_row_returned <= 3);
        let big = result.get("Big").unwrap();
        assert_eq!(big.max_row, 1000);
        assert_eq!(big.non_blank_rows, 3);
    }

    #[test]
    fn test_non_blank_count_ignores_blank_tail() {
        let mut rows: Vec<Vec<CellValue>> = (0..49)
            .map(|i| vec![CellValue::Int(i), text("data")])
            .collect();
        rows.extend((49..100).map(|_| vec![CellValue::Empty, text("   ")]));
        let mut workbook = MemoryWorkbook::new().with_sheet("Tail", rows);

        let result = Inspector::new()
            .with_max_scan_rows(100)
            .inspect_source(&mut workbook)
            .unwrap();

        let tail = result.get("Tail").unwrap();
        assert_eq!(tail.row_count(CountMode::NonBlank), 49);
        assert_eq!(tail.row_count(CountMode::MaxRow), 100);
    }

    #[test]
    fn test_short_sample_row_is_padded() {
        let mut workbook = MemoryWorkbook::new().with_sheet(
            "S",
            vec![
                vec![text("a"), text("b"), text("c")],
                vec![CellValue::Int(1)],
            ],
        );
        let result = Inspector::new().inspect_source(&mut workbook).unwrap();
        let s = result.get("S").unwrap();

        // The sample row is padded to the sheet width, so every header pairs
        let paired = s.paired_sample();
        assert_eq!(paired.len(), 3);
        assert_eq!(paired["a"], CellValue::Int(1));
        assert_eq!(paired["c"], CellValue::Empty);
    }

    #[test]
    fn test_duplicate_headers_keep_first_position() {
        let s = SheetInspection {
            name: "S".to_string(),
            headers: vec![text("k"), text("other"), text("k")],
            sample_row: vec![CellValue::Int(1), CellValue::Int(2), CellValue::Int(3)],
            max_row: 2,
            non_blank_rows: 2,
        };
        let paired = s.paired_sample();
        let keys: Vec<_> = paired.keys().cloned().collect();
        assert_eq!(keys, vec!["k", "other"]);
        assert_eq!(paired["k"], CellValue::Int(3));
    }

    #[test]
    fn test_blank_first_row_yields_no_headers() {
        let mut workbook = MemoryWorkbook::new().with_sheet(
            "Gap",
            vec![vec![CellValue::Empty], vec![text("late header")]],
        );
        let result = Inspector::new().inspect_source(&mut workbook).unwrap();
        let gap = result.get("Gap").unwrap();
        assert!(gap.headers.is_empty());
        assert_eq!(gap.sample_row, vec![text("late header")]);
        assert!(gap.paired_sample().is_empty());
    }

    #[test]
    fn test_zero_window_reads_nothing() {
        let mut source = WindowRecorder {
            inner: MemoryWorkbook::new().with_sheet(
                "A",
                vec![vec![text("id")], vec![CellValue::Int(1)]],
            ),
            largest_request: 0,
            largest_row_returned: 0,
        };

        let result = Inspector::new()
            .with_max_scan_rows(0)
            .inspect_source(&mut source)
            .unwrap();

        assert_eq!(source.largest_row_returned, 0);
        let a = result.get("A").unwrap();
        assert!(a.headers.is_empty());
        assert!(a.sample_row.is_empty());
        assert_eq!(a.non_blank_rows, 0);
        assert_eq!(a.max_row, 2);
        assert_eq!(result.scan_rows, 0);
    }
}
