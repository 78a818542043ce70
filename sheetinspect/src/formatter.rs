//! Output formatters for inspection results

use anyhow::{Context, Result};
use colored::*;
use serde_json::Value;
use sheetinspect_core::InspectionResult;
use std::fs;
use std::path::Path;

/// Print the row-count report, skipping sheets with nothing in the scan window
pub fn print_human(result: &InspectionResult) {
    print!("{}", render_human(result));
}

pub fn render_human(result: &InspectionResult) -> String {
    let mut out = format!("{} {}\n\n", "Total sheets:".bold(), result.sheet_names.len());

    for (name, sheet) in &result.sheets {
        if sheet.non_blank_rows == 0 {
            continue;
        }
        out.push_str(&format!("{} {}\n", "Sheet:".bold(), name.cyan().bold()));
        out.push_str(&format!(
            "  Data rows (first {}): {}\n",
            result.scan_rows, sheet.non_blank_rows
        ));
        out.push_str(&format!("  Max row: {}\n\n", sheet.max_row));
    }

    out
}

/// Pretty JSON, two-space indent, non-ASCII text kept as is
pub fn to_json(document: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Write the JSON document to `path`
pub fn write_json(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sheetinspect_core::{CellValue, Inspector, MemoryWorkbook};

    fn result() -> InspectionResult {
        let mut workbook = MemoryWorkbook::new()
            .with_sheet(
                "Sales",
                vec![
                    vec![CellValue::Text("date".to_string())],
                    vec![CellValue::Float(3.0)],
                    vec![CellValue::Empty],
                ],
            )
            .with_sheet("Empty", vec![vec![CellValue::Text("  ".to_string())]]);
        Inspector::new()
            .with_max_scan_rows(100)
            .inspect_source(&mut workbook)
            .unwrap()
    }

    #[test]
    fn test_human_report() {
        colored::control::set_override(false);
        let report = render_human(&result());
        assert_eq!(
            report,
            "Total sheets: 2\n\nSheet: Sales\n  Data rows (first 100): 2\n  Max row: 3\n\n"
        );
    }

    #[test]
    fn test_json_is_pretty_and_literal() {
        let text = to_json(&json!({"العملاء": {"headers": ["الاسم"]}})).unwrap();
        assert_eq!(
            text,
            "{\n  \"العملاء\": {\n    \"headers\": [\n      \"الاسم\"\n    ]\n  }\n}"
        );
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("excel_structure.json");
        write_json(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
