//! emqx-admin: EMQX admin API client
//!
//! A library for managing protocol gateways and exhook servers on an
//! EMQX broker over its HTTP admin API, with basic auth and fixed-delay
//! retries that callers can cancel.

pub mod api;
pub mod cancel;
pub mod config;
pub mod time;
pub mod transport;
