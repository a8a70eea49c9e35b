//! The network seam of the client.
//!
//! A [`Transport`] sends one [`PreparedRequest`] and hands back the raw
//! status and body. It does not retry or interpret the body.
//! [`ReqwestTransport`] is the default implementation.

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_request::{HttpMethod, PreparedRequest};

/// Status and body of a response, before any interpretation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The response body as text.
    pub body: String,
}

impl RawResponse {
    /// Creates a new raw response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` if the status code is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }
}

/// Sends prepared requests over the network.
///
/// Implementations own connection acquisition and release. They must be
/// `Send + Sync` so a [`Connection`](crate::Connection) can be shared across
/// tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request once.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response could be obtained.
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a [`reqwest::Client`].
///
/// Query parameters are sent in the query string for every method.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport, optionally skipping TLS certificate verification.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the underlying client cannot be
    /// created (e.g. TLS initialization failure).
    pub fn new(verify_ssl: bool) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(!verify_ssl)
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        let res = req_builder.send().await?;
        let status = res.status().as_u16();
        let body = res.text().await?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_success_range() {
        assert!(RawResponse::new(200, "{}").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(RawResponse::new(299, "").is_success());
        assert!(!RawResponse::new(199, "").is_success());
        assert!(!RawResponse::new(301, "").is_success());
        assert!(!RawResponse::new(429, "").is_success());
        assert!(!RawResponse::new(500, "").is_success());
    }

    #[test]
    fn test_reqwest_transport_builds() {
        assert!(ReqwestTransport::new(true).is_ok());
        assert!(ReqwestTransport::new(false).is_ok());
    }

    #[test]
    fn test_transport_is_object_safe() {
        let transport = ReqwestTransport::from_client(reqwest::Client::new());
        let _: Box<dyn Transport> = Box::new(transport);
    }
}
