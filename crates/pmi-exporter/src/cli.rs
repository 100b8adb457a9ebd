//! CLI argument definitions for the maintenance exporter.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pmi-exporter",
    version,
    about = "Printer maintenance metrics exporter",
    long_about = "Export printer maintenance counters as metrics.\n\n\
                  Printers report maintenance counters as a two-row CSV snapshot; the\n\
                  exporter classifies every column through a per-model schema and\n\
                  renders the result as text exposition."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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
    /// Serve the probe endpoint.
    Serve(ServeArgs),

    /// Fetch one snapshot over HTTP and print its exposition.
    Probe(ProbeArgs),

    /// Classify a local snapshot CSV file and print its exposition.
    Check(CheckArgs),

    /// List registered printer models.
    Models(ModelsArgs),
}

#[derive(Parser)]
pub struct ServeArgs {
    /// Socket address to listen on.
    #[arg(long = "listen", value_name = "ADDR", default_value = "0.0.0.0:8035")]
    pub listen: SocketAddr,

    /// Additional JSON schema files to register on top of the built-in
    /// catalog. Repeatable.
    #[arg(long = "schemas", value_name = "PATH")]
    pub schemas: Vec<PathBuf>,
}

#[derive(Parser)]
pub struct ProbeArgs {
    /// URL of the printer's maintenance-info CSV.
    #[arg(value_name = "URL")]
    pub address: String,

    /// Additional JSON schema files to register. Repeatable.
    #[arg(long = "schemas", value_name = "PATH")]
    pub schemas: Vec<PathBuf>,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to a maintenance-info CSV snapshot.
    #[arg(value_name = "CSV")]
    pub file: PathBuf,

    /// Additional JSON schema files to register. Repeatable.
    #[arg(long = "schemas", value_name = "PATH")]
    pub schemas: Vec<PathBuf>,
}

#[derive(Parser)]
pub struct ModelsArgs {
    /// Additional JSON schema files to register. Repeatable.
    #[arg(long = "schemas", value_name = "PATH")]
    pub schemas: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
