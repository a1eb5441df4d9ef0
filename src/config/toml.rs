//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Broker connection section
    #[serde(default)]
    pub broker: BrokerSection,

    /// Retry policy section
    #[serde(default)]
    pub retry: RetrySection,
}

/// Broker connection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrokerSection {
    /// Broker host
    pub host: Option<String>,

    /// Dashboard / REST API port
    pub port: Option<u16>,

    /// Basic auth username
    pub username: Option<String>,

    /// Basic auth password
    pub password: Option<String>,
}

/// Retry policy section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Delay between attempts in seconds
    pub delay: Option<u64>,

    /// Maximum number of attempts
    pub max_attempts: Option<u32>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# emqx-admin Configuration File

[broker]
# Broker host (default: localhost)
host = "localhost"

# Dashboard / REST API port (default: 18083)
port = 18083

# Basic auth credentials (API key / secret). Auth is only sent when a
# username is set.
# username = "admin"
# password = "public"

[retry]
# Delay between attempts in seconds after a connection failure (default: 5)
# delay = 5

# Maximum number of attempts (default: retry until interrupted)
# max_attempts = 10
"#
    .to_string()
}
