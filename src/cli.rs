use std::io;
use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Always,
    Never,
    Auto,
}

/// Command-line surface. `-E PATTERN` is the legacy single-shot entry
/// point kept for backward compatibility; everything else drives the
/// line-oriented / file-scan modes.
#[derive(Debug, Parser)]
#[command(name = "regex-lite-grep", about = "A small backtracking regex engine with a grep-style driver")]
pub struct Cli {
    /// The pattern to search for.
    pub pattern: Option<String>,

    /// Legacy single-shot invocation: compiles PATTERN, reads one line from
    /// stdin, and exits 0 if it matches, 1 otherwise.
    #[arg(short = 'E', value_name = "PATTERN")]
    pub legacy_pattern: Option<String>,

    /// Scan this file instead of standard input.
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Additional paths to scan (combined with positional PATTERN mode).
    pub paths: Vec<String>,

    /// Print only the matched substring of each match.
    #[arg(short = 'o')]
    pub use_o: bool,

    /// Recurse into directories given as paths.
    #[arg(short = 'r')]
    pub recursive: bool,

    /// Colorize matches.
    #[arg(long = "color", value_enum, default_value_t = ColorWhen::Never)]
    pub color: ColorWhen,

    /// Increase log verbosity (-v, -vv).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub enum Mode {
    /// `-E PATTERN`: one line from stdin, exit 0/1 on match.
    Legacy { pattern: String },
    /// Positional PATTERN, optional `-f`/paths: line-oriented or file-scan driver.
    Driver {
        pattern: String,
        file: Option<PathBuf>,
        paths: Vec<String>,
        use_o: bool,
        recursive: bool,
        use_color: bool,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("no pattern given (expected a positional PATTERN or -E PATTERN)")]
    NoPattern,
}

pub fn resolve_mode(cli: Cli) -> Result<Mode, UsageError> {
    if let Some(pattern) = cli.legacy_pattern {
        return Ok(Mode::Legacy { pattern });
    }

    let pattern = cli.pattern.ok_or(UsageError::NoPattern)?;
    Ok(Mode::Driver {
        pattern,
        file: cli.file,
        paths: cli.paths,
        use_o: cli.use_o,
        recursive: cli.recursive,
        use_color: resolve_use_color(cli.color),
    })
}

pub fn resolve_use_color(color: ColorWhen) -> bool {
    match color {
        ColorWhen::Always => true,
        ColorWhen::Never => false,
        ColorWhen::Auto => io::stdout().is_terminal(),
    }
}
