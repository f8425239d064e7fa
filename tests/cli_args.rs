// tests/cli_args.rs

use clap::Parser;
use stepgraph::cli::{CliArgs, LogLevel};
use stepgraph::logging::{parse_level_str, resolve_level};

#[test]
fn defaults() {
    let args = CliArgs::try_parse_from(["stepgraph"]).unwrap();
    assert_eq!(args.recipe, "Recipe.toml");
    assert!(args.log_level.is_none());
    assert!(!args.dry_run);
    assert!(args.tick_seconds.is_none());
    assert!(!args.keep_open);
}

#[test]
fn flags() {
    let args = CliArgs::try_parse_from([
        "stepgraph",
        "--recipe",
        "ribs.toml",
        "--log-level",
        "debug",
        "--dry-run",
        "--tick-seconds",
        "5",
        "--keep-open",
    ])
    .unwrap();

    assert_eq!(args.recipe, "ribs.toml");
    assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    assert!(args.dry_run);
    assert_eq!(args.tick_seconds, Some(5));
    assert!(args.keep_open);
}

#[test]
fn zero_tick_is_refused() {
    assert!(CliArgs::try_parse_from(["stepgraph", "--tick-seconds", "0"]).is_err());
}

#[test]
fn level_names() {
    assert_eq!(parse_level_str("INFO"), Some(tracing::Level::INFO));
    assert_eq!(parse_level_str(" warning "), Some(tracing::Level::WARN));
    assert_eq!(parse_level_str("loud"), None);
}

#[test]
fn log_level_flag_beats_environment() {
    use tracing::Level;

    assert_eq!(resolve_level(Some(LogLevel::Debug), Some("error")), Level::DEBUG);
    assert_eq!(resolve_level(None, Some("info")), Level::INFO);
    assert_eq!(resolve_level(None, Some("chatty")), Level::WARN);
    assert_eq!(resolve_level(None, None), Level::WARN);
}
