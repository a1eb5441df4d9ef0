//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default broker host.
pub const HOST: &str = "localhost";

/// Default dashboard / REST API port.
pub const PORT: u16 = 18083;

/// Path prefix of the versioned admin API.
pub const API_PREFIX: &str = "/api/v5";

/// Default delay between transport retries in seconds.
pub const RETRY_DELAY_SECS: u64 = 5;

/// Default output path for `init`.
pub const CONFIG_FILE: &str = "emqx-admin.toml";

/// Default retry delay as Duration.
#[must_use]
pub const fn retry_delay() -> Duration {
    Duration::from_secs(RETRY_DELAY_SECS)
}

/// Per-attempt HTTP timeout in seconds used by the binary.
pub const REQUEST_TIMEOUT_SECS: u64 = 5;

/// Per-attempt HTTP timeout as Duration.
#[must_use]
pub const fn request_timeout() -> Duration {
    Duration::from_secs(REQUEST_TIMEOUT_SECS)
}
