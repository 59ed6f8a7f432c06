mod app;
mod cli;
mod fs_walk;
mod output;
mod regex;
mod search;

use std::process;

use clap::Parser;
use log::error;

fn main() {
    let cli = cli::Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mode = match cli::resolve_mode(cli) {
        Ok(mode) => mode,
        Err(e) => {
            error!("{e}");
            process::exit(app::EXIT_BAD_PATTERN);
        }
    };

    process::exit(app::run(mode));
}
