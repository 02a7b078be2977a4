//! CLI argument definitions for the variant availability tool.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use variant_cli::commands::{CombinationInput, OutputFormat};
use variant_engine::DEFAULT_FETCH_TIMEOUT_SECS;
use variant_model::AttributeSelection;

#[derive(Parser)]
#[command(
    name = "variant",
    version,
    about = "Evaluate which product attribute values can still be selected",
    long_about = "Evaluate product attribute availability against published combinations.\n\n\
                  Loads a product layout (attribute pickers and their values), fetches the\n\
                  combination list from a file or URL, applies a selection and reports which\n\
                  values stay enabled."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute value availability for a product layout and selection.
    Check(CheckArgs),

    /// List the combinations published for a product.
    Combinations(SourceArgs),
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Read combinations from a JSON file.
    #[arg(long = "combinations", value_name = "FILE")]
    pub combinations: Option<PathBuf>,

    /// Fetch combinations from a URL.
    #[arg(long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// HTTP timeout in seconds.
    #[arg(
        long = "timeout",
        value_name = "SECS",
        default_value_t = DEFAULT_FETCH_TIMEOUT_SECS
    )]
    pub timeout_secs: u64,
}

impl SourceArgs {
    pub fn input(&self) -> Result<CombinationInput> {
        if let Some(path) = &self.combinations {
            Ok(CombinationInput::File(path.clone()))
        } else if let Some(url) = &self.url {
            Ok(CombinationInput::Url {
                url: url.clone(),
                timeout_secs: self.timeout_secs,
            })
        } else {
            bail!("either --combinations or --url is required")
        }
    }
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Product layout JSON describing attributes and their values.
    #[arg(long = "layout", value_name = "FILE")]
    pub layout: PathBuf,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Only consider attributes rendered in this container.
    #[arg(long = "scope", value_name = "NAME")]
    pub scope: Option<String>,

    /// Select values for an attribute (repeatable), e.g. --select 1=10,11.
    #[arg(long = "select", value_name = "ATTR=VALUE[,VALUE]")]
    pub select: Vec<AttributeSelection>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: FormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Table,
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
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

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
