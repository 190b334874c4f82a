//! CLI argument definitions for the case dashboard.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use scdb_cli::filters::FilterFlags;
use scdb_ingest::IngestOptions;
use scdb_model::ViewKind;

#[derive(Parser)]
#[command(
    name = "scdb",
    version,
    about = "Supreme Court case analytics - dashboards over the case-centered database",
    long_about = "Load a Supreme Court case CSV, recode its categorical columns, and print \
                  the dashboard views.\n\n\
                  Views: overview, justices, issues, outcomes, states."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render one dashboard view.
    View(ViewArgs),

    /// Render every view for the same filters.
    Dashboard(DashboardArgs),

    /// List the values each filter accepts.
    Options(OptionsArgs),
}

#[derive(Args)]
pub struct DataArgs {
    /// Path to the case CSV file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Rows scanned to infer column types (default: the whole file).
    #[arg(long = "infer-schema-rows", value_name = "N")]
    pub infer_schema_rows: Option<usize>,

    /// Refuse files larger than this many megabytes.
    #[arg(long = "max-file-size-mb", value_name = "MB", default_value_t = 500)]
    pub max_file_size_mb: u64,
}

impl DataArgs {
    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions::default()
            .with_infer_schema_rows(self.infer_schema_rows)
            .with_max_file_size(self.max_file_size_mb.saturating_mul(1024 * 1024))
    }
}

#[derive(Args)]
pub struct FilterArgs {
    /// Keep cases decided in YEAR (repeatable, comma-separated).
    #[arg(long = "year", value_name = "YEAR", value_delimiter = ',')]
    pub years: Vec<String>,

    /// Keep cases with this jurisdiction label, e.g. Federal.
    #[arg(long = "jurisdiction", value_name = "LABEL", value_delimiter = ',')]
    pub jurisdictions: Vec<String>,

    /// Keep cases with this issue area label, e.g. "Tax disputes".
    #[arg(long = "issue-area", value_name = "LABEL", value_delimiter = ',')]
    pub issue_areas: Vec<String>,

    /// Keep cases with this law type label, e.g. Civil.
    #[arg(long = "law-type", value_name = "LABEL", value_delimiter = ',')]
    pub law_types: Vec<String>,

    /// Generic COLUMN=VALUE constraint (repeatable).
    #[arg(long = "filter", value_name = "COLUMN=VALUE")]
    pub filters: Vec<String>,
}

impl FilterArgs {
    pub fn flags(&self) -> FilterFlags {
        FilterFlags {
            years: self.years.clone(),
            jurisdictions: self.jurisdictions.clone(),
            issue_areas: self.issue_areas.clone(),
            law_types: self.law_types.clone(),
            extra: self.filters.clone(),
        }
    }
}

#[derive(Args)]
pub struct OutputArgs {
    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Number of case names in the "most common" panel.
    #[arg(long = "top", value_name = "N", default_value_t = 5)]
    pub top: usize,

    /// Characters kept when shortening case names.
    #[arg(long = "short-label-chars", value_name = "N", default_value_t = 25)]
    pub short_label_chars: usize,
}

#[derive(Args)]
pub struct ViewArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// View to render.
    #[arg(value_name = "VIEW", value_parser = parse_view)]
    pub view: ViewKind,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

fn parse_view(value: &str) -> Result<ViewKind, String> {
    value.parse::<ViewKind>().map_err(|error| error.to_string())
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
