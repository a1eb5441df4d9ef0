//! Gateway and exhook operations on the broker's admin API.
//!
//! - [`Gateway`], [`ExProtoGateway`]: gateway configuration records
//! - [`Hook`]: exhook server registration
//! - [`Client`]: update gateways, create/update/fetch hooks
//! - [`ClientError`]: failures tagged with the [`Phase`] they happened in

mod client;
mod error;
mod gateway;
mod hook;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod hook_tests;

pub use client::Client;
pub use error::{ClientError, Phase};
pub use gateway::{ExProtoGateway, ExProtoHandler, ExProtoServer, Gateway, GatewayListener};
pub use hook::{AutoReconnect, Hook};
