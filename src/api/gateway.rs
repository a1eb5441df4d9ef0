//! Gateway resource records.

use serde::{Deserialize, Serialize};

/// A protocol gateway configuration.
///
/// Each variant carries the record for one gateway kind; the kind string
/// selects the `/gateways/{kind}` resource. The payload is serialized
/// without a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Gateway {
    /// Extension-protocol gateway (`exproto`).
    ExProto(ExProtoGateway),
}

impl Gateway {
    /// Returns the gateway kind used as the resource identifier.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ExProto(_) => ExProtoGateway::KIND,
        }
    }
}

impl From<ExProtoGateway> for Gateway {
    fn from(gateway: ExProtoGateway) -> Self {
        Self::ExProto(gateway)
    }
}

/// gRPC server the broker exposes to the exproto handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExProtoServer {
    /// Listen address, e.g. `0.0.0.0:9100`.
    pub bind: String,
}

/// Upstream gRPC handler the broker forwards connection events to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExProtoHandler {
    /// Handler URL, e.g. `http://127.0.0.1:9001`.
    pub address: String,
}

/// A listener attached to a gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayListener {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub running: bool,
    pub acceptors: u32,
    pub proxy_protocol: bool,
    pub proxy_protocol_timeout: String,
    pub enable: bool,
    pub bind: String,
    pub max_connections: u64,
    pub max_conn_rate: u64,
    pub enable_authn: bool,
    pub mountpoint: String,
    pub access_rules: Vec<String>,
}

/// Configuration of the `exproto` gateway.
///
/// `name`, `mountpoint` and `idle_timeout` are left out of the payload
/// when empty so the broker keeps its own values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExProtoGateway {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub enable: bool,
    /// Idle timeout as a broker duration string, e.g. `30s`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub idle_timeout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mountpoint: String,
    pub enable_stats: bool,
    pub server: ExProtoServer,
    pub handler: ExProtoHandler,
    pub listeners: Vec<GatewayListener>,
}

impl ExProtoGateway {
    /// Resource identifier of this gateway kind.
    pub const KIND: &'static str = "exproto";
}
