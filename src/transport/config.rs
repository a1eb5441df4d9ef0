//! Connection configuration for the broker's admin API.

use std::fmt;

use url::Url;

use crate::config::{ConfigError, defaults};

use super::RetryPolicy;

/// HTTP Basic credentials for the admin API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API key or dashboard username.
    pub username: String,
    /// API secret or dashboard password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials from a username and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Connection settings for one broker.
///
/// Built once, validated by [`Transport::new`](super::Transport::new), and
/// never mutated afterwards.
///
/// # Example
///
/// ```
/// use emqx_admin::transport::{ClientConfig, Credentials};
///
/// let config = ClientConfig::new()
///     .with_host("broker.internal")
///     .with_port(18083)
///     .with_credentials(Credentials::new("admin", "public"));
///
/// assert_eq!(
///     config.base_url().unwrap().as_str(),
///     "http://broker.internal:18083/api/v5"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Broker host name or IP address. IPv6 literals may be given with or
    /// without brackets.
    pub host: String,
    /// Dashboard / REST API port.
    pub port: u16,
    /// Basic auth credentials, applied only when present.
    pub credentials: Option<Credentials>,
    /// Retry behavior for transport failures.
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// Creates a configuration pointing at `localhost:18083` without
    /// credentials and with the default retry policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
            credentials: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Sets the broker host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the broker port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the Basic auth credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Renders the versioned API root, `http://{host}:{port}/api/v5`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHost`] if the host is empty and
    /// [`ConfigError::InvalidUrl`] if the rendered URL does not parse.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidHost {
                host: self.host.clone(),
                reason: "must not be empty".to_string(),
            });
        }

        let raw = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("http://[{}]:{}{}", self.host, self.port, defaults::API_PREFIX)
        } else {
            format!("http://{}:{}{}", self.host, self.port, defaults::API_PREFIX)
        };
        Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
            url: raw,
            reason: e.to_string(),
        })
    }

    /// Checks every field and returns the parsed base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is empty, the port is 0, the base URL
    /// cannot be parsed, or the credentials carry an empty username.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if let Some(credentials) = &self.credentials {
            if credentials.username.is_empty() {
                return Err(ConfigError::InvalidCredentials(
                    "username must not be empty".to_string(),
                ));
            }
        }

        self.base_url()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let auth = self
            .credentials
            .as_ref()
            .map_or("none", |c| c.username.as_str());
        let attempts = self
            .retry
            .max_attempts
            .map_or_else(|| "unbounded".to_string(), |n| n.to_string());

        write!(
            f,
            "Broker {{ host: {}, port: {}, user: {}, retry: {}ms/{} }}",
            self.host,
            self.port,
            auth,
            self.retry.delay.as_millis(),
            attempts,
        )
    }
}
