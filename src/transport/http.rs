//! Request/response values and the [`HttpClient`] seam.

use std::future::Future;
use std::sync::Arc;

use http::{HeaderMap, Method, StatusCode};
use url::Url;

use super::HttpError;

/// One outgoing admin API call.
///
/// Plain data built on `http` and `url` types so that any [`HttpClient`]
/// can send it. [`Transport`](super::Transport) adds the content type and
/// authorization headers before sending.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// JSON payload, absent for reads
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    #[must_use]
    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    #[must_use]
    pub fn put(url: Url) -> Self {
        Self::new(Method::PUT, url)
    }

    /// Attaches an encoded payload.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// A complete broker response with its body read into memory.
///
/// Any status code is a valid response at this level; judging it is up
/// to the caller.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends a single HTTP request.
///
/// Implementations make exactly one attempt and report failures to get a
/// response as [`HttpError`]. [`ReqwestClient`](super::ReqwestClient) is the
/// production implementation; tests script their own.
///
/// ```ignore
/// use emqx_admin::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
///
/// struct Canned(HttpResponse);
///
/// impl HttpClient for Canned {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends `req` and returns whatever response arrives.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Connection`] when the broker cannot be reached
    /// - [`HttpError::Timeout`] when the attempt times out
    /// - [`HttpError::InvalidUrl`] when the request cannot be built
    /// - [`HttpError::Body`] when the response body cannot be read
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<T: HttpClient> HttpClient for Arc<T> {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).request(req)
    }
}
