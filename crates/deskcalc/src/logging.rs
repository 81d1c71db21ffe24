//! Subscriber setup for the `deskcalc` binary
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! binary's job. `RUST_LOG` takes precedence over the verbosity flag.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// No subscriber is installed
    Disabled,
    /// Standard error
    Stderr,
    /// Appended to a file
    File(PathBuf),
}

/// Logging options collected from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Destination
    pub target: LogTarget,
    /// Count of `-v` flags
    pub verbosity: u8,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            target: LogTarget::Stderr,
            verbosity: 0,
            json: false,
        }
    }
}

impl LogConfig {
    /// Directive used when `RUST_LOG` is unset
    #[must_use]
    pub fn default_directive(&self) -> String {
        let level = match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        format!("deskcalc={level}")
    }
}

/// Installs the global subscriber described by `config`
pub fn init(config: &LogConfig) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = match &config.target {
        LogTarget::Disabled => return Ok(()),
        LogTarget::File(path) => {
            let builder = builder
                .with_ansi(false)
                .with_writer(Mutex::new(open_log_file(path)?));
            if config.json {
                builder.json().try_init()
            } else {
                builder.try_init()
            }
        }
        LogTarget::Stderr if config.json => builder.with_writer(std::io::stderr).json().try_init(),
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
    };

    result.map_err(|e| CliError::logging(e.to_string()))
}

fn open_log_file(path: &Path) -> CliResult<std::fs::File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_by_verbosity() {
        let mut config = LogConfig::default();
        assert_eq!(config.default_directive(), "deskcalc=warn");
        config.verbosity = 1;
        assert_eq!(config.default_directive(), "deskcalc=info");
        config.verbosity = 2;
        assert_eq!(config.default_directive(), "deskcalc=debug");
        config.verbosity = 9;
        assert_eq!(config.default_directive(), "deskcalc=trace");
    }

    #[test]
    fn test_disabled_installs_nothing() {
        let config = LogConfig {
            target: LogTarget::Disabled,
            ..LogConfig::default()
        };
        assert!(init(&config).is_ok());
    }

    #[test]
    fn test_open_log_file_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deskcalc.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("deskcalc.log");
        assert!(matches!(open_log_file(&path), Err(CliError::Io(_))));
    }
}
