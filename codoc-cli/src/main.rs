//! Command-line interface for codoc
//! This binary checks, prints and diffs codoc outlines.
//!
//! Usage:
//!   codoc check `<path>`             - Print diagnostics, exit 1 on syntax errors
//!   codoc tree `<path>`              - Print the parsed forest
//!   codoc diff `<old>` `<new>`       - Print the structural changes between two outlines
//!
//! Global flags: `--config <file>`, `--format <text|json>`, `--log-level <filter>`.

mod commands;

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use codoc_config::{CodocConfig, Loader, OutputFormat, UserLayer};
use std::path::Path;
use std::process::ExitCode;

fn cli() -> Command {
    Command::new("codoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for checking and diffing codoc outlines")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults (default: ./codoc.toml if present)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .global(true)
                .value_parser(["text", "json"])
                .help("Output format (overrides output.format)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("warn")
                .help("Log filter used when RUST_LOG is unset (e.g. 'debug', 'codoc=trace')"),
        )
        .subcommand(
            Command::new("check")
                .about("Parse an outline and print its diagnostics")
                .arg(
                    Arg::new("path")
                        .help("Path to the outline file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("tree")
                .about("Print the node tree of an outline")
                .arg(
                    Arg::new("path")
                        .help("Path to the outline file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("diff")
                .about("Print the structural changes between two outlines or scanner snapshots")
                .arg(
                    Arg::new("old")
                        .help("Earlier outline (or .json snapshot)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("new")
                        .help("Later outline (or .json snapshot)")
                        .required(true)
                        .index(2),
                ),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    let log_level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("warn");
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match run(&matches) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let config = load_config(matches)?;

    match matches.subcommand() {
        Some(("check", sub)) => commands::check(&config, required(sub, "path")?),
        Some(("tree", sub)) => commands::tree(&config, required(sub, "path")?),
        Some(("diff", sub)) => {
            commands::diff(&config, required(sub, "old")?, required(sub, "new")?)
        }
        _ => anyhow::bail!("unknown command"),
    }
}

fn load_config(matches: &ArgMatches) -> Result<CodocConfig> {
    let explicit = matches.get_one::<String>("config").map(Path::new);
    let mut loader = Loader::new().user_layer(UserLayer::resolve(explicit, Path::new(".")));
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.format(format.parse::<OutputFormat>()?);
    }
    loader.build().context("failed to load configuration")
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing argument <{}>", name))
}
