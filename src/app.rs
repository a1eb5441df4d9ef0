//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use emqx_admin::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1): bad arguments, unreadable config file.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2): broker unreachable, rejected request.
    ///
    /// `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Returns the follow-up advice for `error`, if there is any.
fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::USERNAME => Some(
            "Pass --username on the command line or set broker.username in the config file.",
        ),
        ConfigError::FileRead { .. } => {
            Some("Run 'emqx-admin init' to generate a configuration template.")
        }
        ConfigError::InvalidHost { .. } | ConfigError::InvalidPort => {
            Some("The admin API usually listens on the dashboard port (18083).")
        }
        _ => None,
    }
}

/// Sets up the tracing subscriber for logging.
///
/// `RUST_LOG` overrides the level chosen by `verbose`.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
