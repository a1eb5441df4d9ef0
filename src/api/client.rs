//! Resource operations on gateways and exhooks.

use http::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::cancel::CancellationToken;
use crate::config::ConfigError;
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{ClientConfig, HttpClient, HttpRequest, HttpResponse, Transport};

use super::{ClientError, Gateway, Hook};

const GATEWAYS: &str = "gateways";
const EXHOOKS: &str = "exhooks";

/// Admin API client for one broker.
///
/// Each operation encodes its record as JSON, sends it through the
/// [`Transport`] (which serializes requests and retries transport failures)
/// and accepts exactly one success status. Any other status is reported as
/// [`ClientError::Api`] with the response body.
///
/// # Example
///
/// ```no_run
/// use emqx_admin::api::{Client, Hook};
/// use emqx_admin::cancel::CancellationToken;
/// use emqx_admin::transport::{ClientConfig, Credentials, ReqwestClient};
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::new().with_credentials(Credentials::new("admin", "public"));
/// let client = Client::new(config, ReqwestClient::new())?;
///
/// let hook = client.hook_get(&CancellationToken::new(), "audit").await?;
/// println!("{} -> {}", hook.name, hook.url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client<H, S = TokioSleeper> {
    transport: Transport<H, S>,
}

impl<H> Client<H, TokioSleeper> {
    /// Creates a client for the broker described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn new(config: ClientConfig, http: H) -> Result<Self, ConfigError> {
        Ok(Self {
            transport: Transport::new(config, http)?,
        })
    }
}

impl<H, S> Client<H, S> {
    /// Replaces the sleeper used between retry attempts.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Client<H, S2> {
        Client {
            transport: self.transport.with_sleeper(sleeper),
        }
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.transport.config().host
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.transport.config().port
    }

    /// Returns the versioned API root, e.g. `http://localhost:18083/api/v5`.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        self.transport.base_url()
    }
}

impl<H: HttpClient, S: Sleeper> Client<H, S> {
    /// Replaces the configuration of the gateway `gateway.kind()`.
    ///
    /// `PUT /gateways/{kind}`, expects `204 No Content`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if encoding, the request, or the status check fails.
    pub async fn gateway_update(
        &self,
        cancel: &CancellationToken,
        gateway: &Gateway,
    ) -> Result<(), ClientError> {
        let url = self.resource_url(&[GATEWAYS, gateway.kind()])?;
        let request = HttpRequest::put(url).with_body(encode(gateway)?);

        self.send(cancel, request, StatusCode::NO_CONTENT).await?;
        tracing::info!(kind = gateway.kind(), "Gateway updated");
        Ok(())
    }

    /// Registers a new exhook server.
    ///
    /// `POST /exhooks`, expects `200 OK`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if encoding, the request, or the status check fails.
    pub async fn hook_create(
        &self,
        cancel: &CancellationToken,
        hook: &Hook,
    ) -> Result<(), ClientError> {
        let url = self.resource_url(&[EXHOOKS])?;
        let request = HttpRequest::post(url).with_body(encode(hook)?);

        self.send(cancel, request, StatusCode::OK).await?;
        tracing::info!(name = %hook.name, "Hook created");
        Ok(())
    }

    /// Replaces the exhook named `hook.name`.
    ///
    /// `PUT /exhooks/{name}`, expects `200 OK`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if encoding, the request, or the status check fails.
    pub async fn hook_update(
        &self,
        cancel: &CancellationToken,
        hook: &Hook,
    ) -> Result<(), ClientError> {
        let url = self.resource_url(&[EXHOOKS, hook.name.as_str()])?;
        let request = HttpRequest::put(url).with_body(encode(hook)?);

        self.send(cancel, request, StatusCode::OK).await?;
        tracing::info!(name = %hook.name, "Hook updated");
        Ok(())
    }

    /// Fetches the exhook named `name`.
    ///
    /// `GET /exhooks/{name}`, expects `200 OK`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or the status check fails, or
    /// the body is not a valid hook record.
    pub async fn hook_get(&self, cancel: &CancellationToken, name: &str) -> Result<Hook, ClientError> {
        let url = self.resource_url(&[EXHOOKS, name])?;
        let response = self.send(cancel, HttpRequest::get(url), StatusCode::OK).await?;
        decode(&response)
    }

    async fn send(
        &self,
        cancel: &CancellationToken,
        request: HttpRequest,
        expected: StatusCode,
    ) -> Result<HttpResponse, ClientError> {
        let response = self.transport.execute(cancel, request).await?;

        if response.status != expected {
            return Err(ClientError::Api {
                status: response.status,
                body: response.body_lossy(),
            });
        }

        Ok(response)
    }

    /// Appends percent-encoded `segments` to the API root.
    fn resource_url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.transport.base_url().clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidPath(self.transport.base_url().to_string()))?
            .extend(segments);
        Ok(url)
    }
}

fn encode<T: Serialize>(record: &T) -> Result<Vec<u8>, ClientError> {
    serde_json::to_vec(record).map_err(ClientError::Serialization)
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ClientError> {
    serde_json::from_slice(&response.body).map_err(ClientError::Deserialization)
}
