//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;

use crate::transport::{ClientConfig, Credentials, RetryPolicy};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Broker connection settings
    pub client: ClientConfig,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Config {{ {}, verbose: {} }}", self.client, self.verbose)
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values, which take
    /// precedence over built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A password is given without a username
    /// - The retry attempt cap is zero
    /// - The resulting [`ClientConfig`] fails validation
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let host = cli
            .host
            .clone()
            .or_else(|| toml.and_then(|t| t.broker.host.clone()))
            .unwrap_or_else(|| defaults::HOST.to_string());

        let port = cli
            .port
            .or_else(|| toml.and_then(|t| t.broker.port))
            .unwrap_or(defaults::PORT);

        let mut client = ClientConfig::new()
            .with_host(host)
            .with_port(port)
            .with_retry(Self::build_retry_policy(cli, toml)?);

        if let Some(credentials) = Self::resolve_credentials(cli, toml)? {
            client = client.with_credentials(credentials);
        }

        client.validate()?;

        Ok(Self {
            client,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_credentials(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<Credentials>, ConfigError> {
        let username = cli
            .username
            .as_deref()
            .or_else(|| toml.and_then(|t| t.broker.username.as_deref()));

        let password = cli
            .password
            .as_deref()
            .or_else(|| toml.and_then(|t| t.broker.password.as_deref()));

        match (username, password) {
            (Some(user), pass) => Ok(Some(Credentials::new(user, pass.unwrap_or_default()))),
            (None, Some(_)) => Err(ConfigError::missing(
                field::USERNAME,
                "A password was given; use --username or set broker.username in config file",
            )),
            (None, None) => Ok(None),
        }
    }

    fn build_retry_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RetryPolicy, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        // Priority: CLI explicit > TOML > default
        let delay_secs = cli
            .retry_delay
            .or_else(|| retry.and_then(|r| r.delay))
            .unwrap_or(defaults::RETRY_DELAY_SECS);

        let max_attempts = cli
            .retry_max
            .or_else(|| retry.and_then(|r| r.max_attempts))
            .map(|n| {
                NonZeroU32::new(n).ok_or_else(|| {
                    ConfigError::InvalidRetry("max_attempts must be greater than 0".to_string())
                })
            })
            .transpose()?;

        Ok(RetryPolicy::new()
            .with_delay(Duration::from_secs(delay_secs))
            .with_max_attempts(max_attempts))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
