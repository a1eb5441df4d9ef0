//! Transport layer for the broker's admin API.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Connection settings ([`ClientConfig`], [`Credentials`])
//! - Retry policy configuration ([`RetryPolicy`])
//! - Authenticated execution with retries ([`Transport`])

mod client;
mod config;
mod error;
mod executor;
mod http;
mod retry;

#[cfg(test)]
mod retry_tests;

pub use client::ReqwestClient;
pub use config::{ClientConfig, Credentials};
pub use error::HttpError;
pub use executor::Transport;
pub use self::http::{HttpClient, HttpRequest, HttpResponse};
pub use retry::RetryPolicy;
