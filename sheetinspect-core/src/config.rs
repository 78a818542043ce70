//! Configuration file for inspection runs

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::inspector::{CountMode, DEFAULT_SCAN_ROWS, SheetSelector};
use crate::layout::{Layout, RenderOptions};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "sheetinspect.toml";

/// Main inspection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectConfig {
    /// Rows read per sheet; unset means the caller's default
    #[serde(default)]
    pub max_scan_rows: Option<u32>,
    #[serde(default)]
    pub count_mode: CountMode,
    #[serde(default)]
    pub layout: Layout,
    /// Sheets to inspect by name; empty means every sheet
    #[serde(default)]
    pub sheets: Vec<String>,
    /// Inspect only the first N sheets
    #[serde(default)]
    pub first: Option<usize>,
    /// Truncate the `sheets` listing of the wrapped layouts
    #[serde(default)]
    pub list_limit: Option<usize>,
    /// Also write the JSON document here
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            max_scan_rows: None,
            count_mode: CountMode::default(),
            layout: Layout::default(),
            sheets: Vec::new(),
            first: None,
            list_limit: None,
            output: None,
        }
    }
}

impl InspectConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: InspectConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Reject settings that cannot describe a single run
    pub fn validate(&self) -> Result<()> {
        if self.max_scan_rows == Some(0) {
            anyhow::bail!("Configuration error: max_scan_rows must be at least 1");
        }
        if !self.sheets.is_empty() && self.first.is_some() {
            anyhow::bail!("Configuration error: 'sheets' and 'first' cannot both be set");
        }
        if self.sheets.iter().any(|s| s.is_empty()) {
            anyhow::bail!("Configuration error: empty sheet name in 'sheets'");
        }
        Ok(())
    }

    /// Effective scan window, falling back to the structure-preview default
    pub fn scan_rows(&self) -> u32 {
        self.max_scan_rows.unwrap_or(DEFAULT_SCAN_ROWS)
    }

    /// Sheet selection described by this configuration
    pub fn selector(&self) -> SheetSelector {
        if !self.sheets.is_empty() {
            SheetSelector::Named(self.sheets.clone())
        } else if let Some(n) = self.first {
            SheetSelector::First(n)
        } else {
            SheetSelector::All
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            count_mode: self.count_mode,
            list_limit: self.list_limit,
        }
    }
}
