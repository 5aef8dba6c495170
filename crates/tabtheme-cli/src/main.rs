use std::process::ExitCode;

use clap::Parser;
use tabtheme_cli::cli::Cli;
use tabtheme_cli::config::Config;
use tabtheme_cli::logging::setup_logger;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    // load() has already checked the level parses
    setup_logger(cli.verbose, config.log_level().ok().flatten());

    match tabtheme_cli::run(cli, &config) {
        Ok(code) => code,
        Err(err) => {
            log::debug!("{:?}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
