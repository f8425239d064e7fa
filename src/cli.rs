// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `stepgraph`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stepgraph",
    version,
    about = "Walk through a recipe's step graph with per-step countdown timers.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the recipe file (TOML).
    ///
    /// Default: `Recipe.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Recipe.toml")]
    pub recipe: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STEPGRAPH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the step plan, but don't start a session.
    #[arg(long)]
    pub dry_run: bool,

    /// Override `[session].tick_seconds` from the recipe file.
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u32).range(1..))]
    pub tick_seconds: Option<u32>,

    /// Keep the session open after every step is done.
    #[arg(long)]
    pub keep_open: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
