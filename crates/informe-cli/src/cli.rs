//! CLI argument definitions for the report generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use informe_cli::logging::LogFormat;
use informe_ingest::RecordLayout;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "informe",
    version,
    about = "Medical report generator - fill .docx templates from tabular patient data",
    long_about = "Fill {{placeholder}} tokens in a .docx report template with one record of a\n\
                  CSV, JSON or .xlsx table plus doctor and case details.\n\n\
                  Writes informe_col<N>.docx and, when an office converter is available,\n\
                  informe_col<N>.pdf."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Allow patient values in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Configuration file (default: the per-user config, then built-in defaults).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a report for one record.
    Fill(FillArgs),

    /// List the placeholders a template uses.
    Tokens(TokensArgs),

    /// List the configured doctors.
    Doctors,

    /// Read the consent and next-visit checkboxes of a completed report.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct DataArgs {
    /// CSV, JSON or .xlsx table with one record per row (or column).
    #[arg(long = "data", value_name = "FILE")]
    pub data: PathBuf,

    /// Zero-based record index.
    #[arg(long = "index", value_name = "N", default_value_t = 0)]
    pub index: usize,

    /// How records are laid out in a CSV or .xlsx sheet.
    #[arg(long = "layout", value_enum, default_value = "rows")]
    pub layout: LayoutArg,
}

#[derive(Parser)]
pub struct FillArgs {
    /// The .docx template.
    #[arg(long = "template", value_name = "FILE")]
    pub template: PathBuf,

    #[command(flatten)]
    pub data: DataArgs,

    /// Reporting doctor, as listed in the configuration.
    #[arg(long = "doctor", value_name = "NAME")]
    pub doctor: String,

    /// Case (expedient) number.
    #[arg(long = "expediente", value_name = "TEXT", default_value = "")]
    pub expedient: String,

    /// Documentation supplied by the patient.
    #[arg(long = "doc-given", value_name = "TEXT", default_value = "")]
    pub documentation_given: String,

    /// Documentation the patient did not supply.
    #[arg(long = "doc-not-given", value_name = "TEXT", default_value = "")]
    pub documentation_not_given: String,

    /// Output directory (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Skip the PDF conversion.
    #[arg(long = "no-render")]
    pub no_render: bool,
}

#[derive(Parser)]
pub struct TokensArgs {
    /// The .docx template.
    #[arg(long = "template", value_name = "FILE")]
    pub template: PathBuf,

    /// Check record placeholders against this table.
    #[arg(long = "data", value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Zero-based record index used with --data.
    #[arg(long = "index", value_name = "N", default_value_t = 0)]
    pub index: usize,

    #[arg(long = "layout", value_enum, default_value = "rows")]
    pub layout: LayoutArg,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// A filled .docx report.
    #[arg(long = "document", value_name = "FILE")]
    pub document: PathBuf,
}

/// CSV record layout choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    Rows,
    Columns,
}

impl From<LayoutArg> for RecordLayout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Rows => Self::Rows,
            LayoutArg::Columns => Self::Columns,
        }
    }
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

impl From<LogLevelArg> for LevelFilter {
    fn from(value: LogLevelArg) -> Self {
        match value {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
