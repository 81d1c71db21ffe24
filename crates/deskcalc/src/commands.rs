//! CLI command definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::EngineConfig;
use crate::core::{Action, CalculatorEngine, DisplayFormatter, View};
use crate::error::{CliError, CliResult};
use crate::logging::{LogConfig, LogTarget};

/// deskcalc: keypad calculator
#[derive(Parser, Debug)]
#[command(name = "deskcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Longest operand accepted from the keypad
    #[arg(
        long,
        env = "DESKCALC_MAX_DIGITS",
        default_value_t = EngineConfig::DEFAULT_MAX_DIGITS,
        global = true
    )]
    pub max_digits: usize,

    /// Fractional digits shown on the display
    #[arg(
        long,
        env = "DESKCALC_PRECISION",
        default_value_t = DisplayFormatter::DEFAULT_FRACTION_DIGITS,
        global = true
    )]
    pub precision: usize,

    /// Append log lines to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to run (defaults to `tui`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive terminal calculator
    Tui,

    /// Feed a key sequence through the calculator and print the result
    Keys(KeysArgs),
}

/// Arguments for the keys command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct KeysArgs {
    /// Keys to press, e.g. "12+30=" (C clears, < or ⌫ deletes)
    pub sequence: String,

    /// Print the final view as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Engine configuration from the flags, validated
    pub fn engine_config(&self) -> CliResult<EngineConfig> {
        let config = EngineConfig::new()
            .with_max_digits(self.max_digits)
            .with_fraction_digits(self.precision);
        config.validate()?;
        Ok(config)
    }

    /// Logging configuration for the selected command.
    ///
    /// The TUI owns the terminal, so it only logs when a file is given.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        let interactive = matches!(self.command, None | Some(Commands::Tui));
        let target = match (&self.log_file, interactive) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, true) => LogTarget::Disabled,
            (None, false) => LogTarget::Stderr,
        };
        LogConfig {
            target,
            verbosity: self.verbose,
            json: self.log_json,
        }
    }
}

/// Decodes a key sequence into actions, skipping whitespace
pub fn parse_keys(sequence: &str) -> CliResult<Vec<Action>> {
    sequence
        .chars()
        .enumerate()
        .filter(|(_, key)| !key.is_whitespace())
        .map(|(position, key)| {
            Action::from_key_char(key).ok_or(CliError::InvalidKey { key, position })
        })
        .collect()
}

/// Runs the keys command, returning the text to print
pub fn run_keys(config: EngineConfig, args: &KeysArgs) -> CliResult<String> {
    let actions = parse_keys(&args.sequence)?;
    let mut engine = CalculatorEngine::with_config(config);
    let view = engine.apply_all(actions);

    if args.json {
        return Ok(serde_json::to_string_pretty(&view)?);
    }
    Ok(render_plain(&view))
}

/// Memory line (when present) above the display
#[must_use]
pub fn render_plain(view: &View) -> String {
    let secondary = view.secondary.trim_end();
    if secondary.is_empty() {
        view.display.clone()
    } else {
        format!("{secondary}\n{}", view.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operator;

    fn keys_args(sequence: &str, json: bool) -> KeysArgs {
        KeysArgs {
            sequence: sequence.to_string(),
            json,
        }
    }

    #[test]
    fn test_cli_parses_defaults() {
        let cli = Cli::try_parse_from(["deskcalc"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.max_digits, 16);
        assert_eq!(cli.precision, 10);
        assert_eq!(cli.engine_config().unwrap(), EngineConfig::default());
        assert_eq!(cli.log_config().target, LogTarget::Disabled);
    }

    #[test]
    fn test_cli_parses_keys_command() {
        let cli =
            Cli::try_parse_from(["deskcalc", "-vv", "keys", "8*5=", "--json", "--max-digits", "8"])
                .unwrap();
        assert_eq!(cli.command, Some(Commands::Keys(keys_args("8*5=", true))));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.engine_config().unwrap().max_digits, 8);
        assert_eq!(cli.log_config().target, LogTarget::Stderr);
    }

    #[test]
    fn test_cli_tui_logs_to_file_only() {
        let cli = Cli::try_parse_from(["deskcalc", "tui", "--log-file", "calc.log"]).unwrap();
        assert_eq!(
            cli.log_config().target,
            LogTarget::File(PathBuf::from("calc.log"))
        );
    }

    #[test]
    fn test_cli_rejects_bad_config() {
        let cli = Cli::try_parse_from(["deskcalc", "--max-digits", "0"]).unwrap();
        assert!(matches!(cli.engine_config(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_parse_keys() {
        let actions = parse_keys("1 + 2 =").unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Digit(1),
                Action::Operator(Operator::Add),
                Action::Digit(2),
                Action::Equals,
            ]
        );
    }

    #[test]
    fn test_parse_keys_rejects_unknown() {
        let err = parse_keys("12x").unwrap_err();
        assert!(matches!(
            err,
            CliError::InvalidKey {
                key: 'x',
                position: 2
            }
        ));
    }

    #[test]
    fn test_run_keys_plain() {
        let out = run_keys(EngineConfig::default(), &keys_args("1200*3=", false)).unwrap();
        assert_eq!(out, "1200*3 =\n3,600");
    }

    #[test]
    fn test_run_keys_plain_without_memory_line() {
        let out = run_keys(EngineConfig::default(), &keys_args("42", false)).unwrap();
        assert_eq!(out, "42");
    }

    #[test]
    fn test_run_keys_error() {
        let out = run_keys(EngineConfig::default(), &keys_args("6/0=", false)).unwrap();
        assert_eq!(out, "Cannot divide by zero\nError");
    }

    #[test]
    fn test_run_keys_json() {
        let out = run_keys(EngineConfig::default(), &keys_args("5+2%", true)).unwrap();
        let view: View = serde_json::from_str(&out).unwrap();
        assert_eq!(view.display, "0.1");
        assert_eq!(view.secondary, "5 + 0.1");
        assert!(!view.is_error);
    }
}
