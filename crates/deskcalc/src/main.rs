//! deskcalc binary

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use deskcalc::commands::{run_keys, Cli, Commands};
use deskcalc::config::EngineConfig;
use deskcalc::error::CliResult;
use deskcalc::logging;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "deskcalc failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_config())?;
    let config = cli.engine_config()?;

    match &cli.command {
        None | Some(Commands::Tui) => run_tui(config),
        Some(Commands::Keys(args)) => {
            println!("{}", run_keys(config, args)?);
            Ok(())
        }
    }
}

#[cfg(feature = "tui")]
fn run_tui(config: EngineConfig) -> CliResult<()> {
    Ok(deskcalc::tui::run(config)?)
}

#[cfg(not(feature = "tui"))]
fn run_tui(_config: EngineConfig) -> CliResult<()> {
    Err(deskcalc::error::CliError::Io(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "built without the `tui` feature; use `deskcalc keys`",
    )))
}
