//! JSON document shapes for an inspection result

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::inspector::{CountMode, InspectionResult, SheetInspection};

/// Top-level shape of the JSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// `{sheet: {headers, row_count, sample: {header: value}}}`
    #[default]
    Paired,
    /// `{sheet: {headers, row_count, sample_row: [..]}}`
    Raw,
    /// `{sheets: [..], sheet_details: {sheet: {headers, row_count, sample_row}}}`
    Details,
    /// `{sheets: [..], "<sheet>_headers": [..], "<sheet>_sample": {..}}`
    Structure,
}

/// Rendering knobs shared by all layouts
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub count_mode: CountMode,
    /// Truncate the `sheets` listing to this many names
    pub list_limit: Option<usize>,
}

impl Layout {
    /// Build the JSON document for `result`
    pub fn render(&self, result: &InspectionResult, options: &RenderOptions) -> Value {
        match self {
            Layout::Paired => Value::Object(
                result
                    .sheets
                    .iter()
                    .map(|(name, sheet)| (name.clone(), paired_entry(sheet, options.count_mode)))
                    .collect(),
            ),
            Layout::Raw => Value::Object(raw_entries(result, options.count_mode)),
            Layout::Details => json!({
                "sheets": sheet_listing(result, options.list_limit),
                "sheet_details": raw_entries(result, options.count_mode),
            }),
            Layout::Structure => {
                let mut doc = Map::new();
                doc.insert(
                    "sheets".to_string(),
                    json!(sheet_listing(result, options.list_limit)),
                );
                for (name, sheet) in &result.sheets {
                    doc.insert(format!("{}_headers", name), json!(sheet.headers));
                    if sheet.has_sample() {
                        doc.insert(format!("{}_sample", name), json!(sheet.paired_sample()));
                    }
                }
                Value::Object(doc)
            }
        }
    }
}

fn paired_entry(sheet: &SheetInspection, mode: CountMode) -> Value {
    json!({
        "headers": sheet.headers,
        "row_count": sheet.row_count(mode),
        "sample": sheet.paired_sample(),
    })
}

fn raw_entries(result: &InspectionResult, mode: CountMode) -> Map<String, Value> {
    result
        .sheets
        .iter()
        .map(|(name, sheet)| {
            let entry = json!({
                "headers": sheet.headers,
                "row_count": sheet.row_count(mode),
                "sample_row": sheet.sample_row,
            });
            (name.clone(), entry)
        })
        .collect()
}

fn sheet_listing(result: &InspectionResult, limit: Option<usize>) -> Vec<&str> {
    let limit = limit.unwrap_or(usize::MAX);
    result
        .sheet_names
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect()
}
