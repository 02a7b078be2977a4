//! Variant availability CLI.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;
use variant_cli::commands::{CheckRequest, OutputFormat, run_check, run_combinations};
use variant_cli::logging::{LogConfig, LogFormat, init_logging};
use variant_cli::report::{availability_table, combinations_table, render_text};

mod cli;

use crate::cli::{CheckArgs, Cli, Command, LogFormatArg, LogLevelArg, SourceArgs};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Check(args) => check(args),
        Command::Combinations(args) => combinations(args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn check(args: &CheckArgs) -> Result<()> {
    let request = CheckRequest {
        layout: args.layout.clone(),
        input: args.source.input()?,
        scope: args.scope.clone(),
        selections: args.select.clone(),
    };
    let report = run_check(&request)?;
    match OutputFormat::from(args.format) {
        OutputFormat::Table => {
            println!("{}", availability_table(&report));
            println!(
                "{} of {} values enabled ({} combinations, {})",
                report.enabled_count(),
                report.rows.len(),
                report.combinations,
                report.load_state
            );
        }
        OutputFormat::Text => println!("{}", render_text(&report)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize report")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn combinations(args: &SourceArgs) -> Result<()> {
    let combinations = run_combinations(&args.input()?)?;
    println!("{}", combinations_table(&combinations));
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
