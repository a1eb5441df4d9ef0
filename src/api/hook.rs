//! Exhook resource record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An exhook server registration.
///
/// The broker forwards hook events over gRPC to `url`. `name` identifies
/// the resource in `/exhooks/{name}`. Empty `request_timeout` and
/// `failed_action`, and an unset `auto_reconnect`, are omitted from the
/// payload so the broker applies its defaults.
///
/// Fields the broker adds to responses (status, metrics, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hook {
    pub name: String,
    pub enable: bool,
    pub url: String,
    /// Per-request timeout as a broker duration string, e.g. `5s`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub request_timeout: String,
    /// `deny` or `ignore`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub failed_action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_reconnect: Option<AutoReconnect>,
    pub pool_size: u32,
}

/// Reconnect policy of an exhook server.
///
/// On the wire this is either a duration string such as `"60s"` or the
/// boolean `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AutoReconnect {
    /// Boolean form; the broker only emits `false`.
    Flag(bool),
    /// Reconnect interval, e.g. `60s`.
    Interval(String),
}

impl AutoReconnect {
    /// Reconnecting turned off.
    #[must_use]
    pub const fn disabled() -> Self {
        Self::Flag(false)
    }

    #[must_use]
    pub fn interval(interval: impl Into<String>) -> Self {
        Self::Interval(interval.into())
    }

    /// Returns false for the `false` flag.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        match self {
            Self::Flag(enabled) => *enabled,
            Self::Interval(_) => true,
        }
    }
}

impl fmt::Display for AutoReconnect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(enabled) => write!(f, "{enabled}"),
            Self::Interval(interval) => f.write_str(interval),
        }
    }
}
