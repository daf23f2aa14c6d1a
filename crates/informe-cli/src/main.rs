//! Medical report generator CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use informe_cli::config::load_config;
use informe_cli::logging::{LogConfig, init_logging};
use informe_cli::summary::{print_fill_summary, print_inspect_report, print_token_report};

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{run_doctors, run_fill, run_inspect, run_tokens};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&log_config_from_cli(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let loaded = match load_config(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };
    let result = match &cli.command {
        Command::Fill(args) => run_fill(args, &loaded).map(|outcome| print_fill_summary(&outcome)),
        Command::Tokens(args) => {
            run_tokens(args, &loaded).map(|report| print_token_report(&report))
        }
        Command::Doctors => {
            run_doctors(&loaded);
            Ok(())
        }
        Command::Inspect(args) => run_inspect(args).map(|report| print_inspect_report(&report)),
    };
    if let Err(error) = result {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

/// Logging configuration from CLI flags. An explicit level or `-v`/`-q` wins over `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.verbosity.is_present() || cli.log_level.is_some();
    let level_filter = cli
        .log_level
        .map_or_else(|| cli.verbosity.tracing_level_filter(), Into::into);
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter,
        use_env_filter: !explicit,
        with_ansi,
        format: cli.log_format.into(),
        log_file: cli.log_file.clone(),
        log_data: cli.log_data,
        ..LogConfig::default()
    }
}
