use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sheetinspect_core::config::DEFAULT_CONFIG_FILE;
use sheetinspect_core::{CountMode, InspectConfig, Inspector, Layout, ROW_COUNT_SCAN_ROWS};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

mod formatter;

#[derive(Parser)]
#[command(name = "sheetinspect")]
#[command(about = "Dump sheet headers, sample rows and row counts of a workbook", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the Excel/ODS file to inspect
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Shape of the JSON document
    #[arg(short, long, value_enum)]
    layout: Option<LayoutArg>,

    /// Inspect only these sheets (repeatable); missing ones are skipped
    #[arg(short, long = "sheet", value_name = "SHEET", conflicts_with = "first")]
    sheets: Vec<String>,

    /// Inspect only the first N sheets
    #[arg(long, value_name = "N")]
    first: Option<usize>,

    /// Rows read per sheet
    #[arg(short = 'n', long, value_name = "ROWS")]
    rows: Option<u32>,

    /// Which row count to report
    #[arg(long, value_enum)]
    count: Option<CountArg>,

    /// Also write the JSON document to this file
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Log inspection progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON document
    Json,
    /// Row-count report
    Human,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    /// Keyed by sheet, sample paired with headers
    Paired,
    /// Keyed by sheet, sample as a plain row
    Raw,
    /// Sheet list plus per-sheet details
    Details,
    /// Sheet list plus `<sheet>_headers` / `<sheet>_sample` keys
    Structure,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Paired => Layout::Paired,
            LayoutArg::Raw => Layout::Raw,
            LayoutArg::Details => Layout::Details,
            LayoutArg::Structure => Layout::Structure,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CountArg {
    /// Maximum row index reported by the workbook
    MaxRow,
    /// Rows with content inside the scan window
    NonBlank,
}

impl From<CountArg> for CountMode {
    fn from(arg: CountArg) -> Self {
        match arg {
            CountArg::MaxRow => CountMode::MaxRow,
            CountArg::NonBlank => CountMode::NonBlank,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    config.validate().context("Invalid configuration")?;
    debug!(?config, "effective configuration");

    let inspector = Inspector::from_config(&config);
    let result = inspector
        .inspect_file(&cli.file)
        .with_context(|| format!("Failed to inspect file: {}", cli.file.display()))?;
    info!(
        sheets = result.sheets.len(),
        scan_rows = result.scan_rows,
        "inspection finished"
    );

    match cli.format {
        OutputFormat::Human => formatter::print_human(&result),
        OutputFormat::Json => {
            let document = config.layout.render(&result, &config.render_options());
            let text = formatter::to_json(&document)?;
            if let Some(output) = &config.output {
                formatter::write_json(output, &text)?;
                info!(path = %output.display(), "wrote JSON document");
            }
            println!("{}", text);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file, then let command-line flags override it
fn load_config(cli: &Cli) -> Result<InspectConfig> {
    let mut config = if let Some(config_path) = &cli.config {
        read_config(config_path)?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if default_config_path.exists() {
            read_config(&default_config_path)?
        } else {
            InspectConfig::default()
        }
    };

    if let Some(layout) = cli.layout {
        config.layout = layout.into();
    }
    if let Some(count) = cli.count {
        config.count_mode = count.into();
    }
    if let Some(rows) = cli.rows {
        config.max_scan_rows = Some(rows);
    }
    // The row-count report looks further down each sheet than a preview does
    if config.max_scan_rows.is_none() && matches!(cli.format, OutputFormat::Human) {
        config.max_scan_rows = Some(ROW_COUNT_SCAN_ROWS);
    }
    if !cli.sheets.is_empty() {
        config.sheets = cli.sheets.clone();
        config.first = None;
    } else if let Some(first) = cli.first {
        config.sheets.clear();
        config.first = Some(first);
    }
    if let Some(output) = &cli.output {
        config.output = Some(output.clone());
    }

    Ok(config)
}

fn read_config(path: &Path) -> Result<InspectConfig> {
    InspectConfig::from_file(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}
