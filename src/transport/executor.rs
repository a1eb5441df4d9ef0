//! Authenticated, serialized request execution with retries.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::HeaderValue;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tokio::sync::Mutex;
use url::Url;

use crate::cancel::CancellationToken;
use crate::config::ConfigError;
use crate::time::{Sleeper, TokioSleeper};

use super::{ClientConfig, Credentials, HttpClient, HttpError, HttpRequest, HttpResponse};

/// Executes requests against one broker.
///
/// Every request gets a JSON content type and, when credentials are
/// configured, a Basic `Authorization` header. Transport failures are
/// retried with a fixed delay until the request gets a response, the error
/// is not retryable, the attempt cap is hit, or the caller cancels.
///
/// # Concurrency
///
/// A `Transport` is a serialized client: the whole attempt/retry sequence
/// of one request runs under an internal async mutex, so at most one
/// request is in flight per instance. Concurrent callers queue on the lock.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper used between attempts (defaults to [`TokioSleeper`])
#[derive(Debug)]
pub struct Transport<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
    config: ClientConfig,
    base_url: Url,
    authorization: Option<HeaderValue>,
    lock: Mutex<()>,
}

impl<H> Transport<H, TokioSleeper> {
    /// Validates `config` and creates a transport over `client`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn new(config: ClientConfig, client: H) -> Result<Self, ConfigError> {
        let base_url = config.validate()?;
        let authorization = config
            .credentials
            .as_ref()
            .map(basic_authorization)
            .transpose()?;

        Ok(Self {
            client,
            sleeper: TokioSleeper,
            config,
            base_url,
            authorization,
            lock: Mutex::new(()),
        })
    }
}

impl<H, S> Transport<H, S> {
    /// Replaces the sleeper used between attempts.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Transport<H, S2> {
        Transport {
            client: self.client,
            sleeper,
            config: self.config,
            base_url: self.base_url,
            authorization: self.authorization,
            lock: self.lock,
        }
    }

    /// Returns the configuration this transport was built from.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the versioned API root.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl<H: HttpClient, S: Sleeper> Transport<H, S> {
    /// Sends `request`, retrying transport failures.
    ///
    /// Any received response is returned as-is whatever its status code.
    /// `cancel` is checked only after a failed attempt; when it is set, the
    /// failure is returned without sleeping.
    ///
    /// # Errors
    ///
    /// Returns the last [`HttpError`] when retrying stops.
    pub async fn execute(
        &self,
        cancel: &CancellationToken,
        mut request: HttpRequest,
    ) -> Result<HttpResponse, HttpError> {
        let _guard = self.lock.lock().await;
        self.prepare(&mut request);

        let mut attempt: u32 = 0;
        loop {
            attempt = attempt.saturating_add(1);
            tracing::debug!(method = %request.method, url = %request.url, attempt, "Sending request");

            match self.client.request(request.clone()).await {
                Ok(response) => {
                    tracing::debug!(status = %response.status, "Received response");
                    return Ok(response);
                }
                Err(e) => {
                    tracing::warn!(
                        method = %request.method,
                        url = %request.url,
                        attempt,
                        error = %e,
                        "Request attempt failed"
                    );

                    if !e.is_retryable()
                        || cancel.is_cancelled()
                        || !self.config.retry.should_retry(attempt)
                    {
                        return Err(e);
                    }

                    self.sleeper.sleep(self.config.retry.delay).await;
                }
            }
        }
    }

    fn prepare(&self, request: &mut HttpRequest) {
        request
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(value) = &self.authorization {
            request.headers.insert(AUTHORIZATION, value.clone());
        }
    }
}

fn basic_authorization(credentials: &Credentials) -> Result<HeaderValue, ConfigError> {
    let token = STANDARD.encode(format!(
        "{}:{}",
        credentials.username, credentials.password
    ));
    let mut value = HeaderValue::from_str(&format!("Basic {token}"))
        .map_err(|e| ConfigError::InvalidCredentials(e.to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}
