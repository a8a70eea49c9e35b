//! The request/retry loop.
//!
//! [`Connection::request`] builds the request once, then repeats
//! send → classify → decide until an attempt succeeds, a fatal error occurs,
//! or the [`RetryPolicy`] says stop.

use std::collections::HashMap;

use crate::clients::classifier::classify;
use crate::clients::errors::{DatalinkError, RequestError};
use crate::clients::http_request::{HttpMethod, PreparedRequest, RequestBuilder, RequestSpec};
use crate::clients::retry::RetryPolicy;
use crate::clients::transport::{ReqwestTransport, Transport};
use crate::config::ApiConfig;

/// Result of a single attempt that reached the API.
#[derive(Debug)]
enum AttemptOutcome {
    Succeeded(serde_json::Value),
    Failed(DatalinkError),
}

/// Client for the Nasdaq Data Link REST API.
///
/// Owns its [`ApiConfig`], so every request made through one connection sees
/// the same settings. Build a new connection to change them.
///
/// # Thread Safety
///
/// `Connection` is `Send + Sync` when its transport is. Concurrent calls run
/// independent retry loops.
///
/// # Example
///
/// ```rust,ignore
/// use datalink::{ApiConfig, ApiKey, Connection};
///
/// let config = ApiConfig::builder()
///     .api_key(ApiKey::new("your-api-key").unwrap())
///     .build()
///     .unwrap();
///
/// let connection = Connection::new(config)?;
/// let databases = connection.get("databases", None).await?;
/// ```
#[derive(Debug)]
pub struct Connection<T = ReqwestTransport> {
    config: ApiConfig,
    transport: T,
}

// Verify Connection is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Connection>();
};

impl Connection {
    /// Creates a connection that talks HTTP through reqwest.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Transport`] if the HTTP client cannot be created.
    pub fn new(config: ApiConfig) -> Result<Self, RequestError> {
        let transport = ReqwestTransport::new(config.verify_ssl())?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> Connection<T> {
    /// Creates a connection over a custom transport.
    #[must_use]
    pub const fn with_transport(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Returns the configuration this connection reads.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends a request and returns the parsed JSON payload.
    ///
    /// Transient API errors are retried per the configured [`RetryPolicy`],
    /// sleeping for the backoff delay between attempts.
    ///
    /// # Errors
    ///
    /// - [`RequestError::Api`]: the error of the last attempt, once it is
    ///   non-retryable or retries are exhausted
    /// - [`RequestError::MalformedResponse`]: a non-empty 2xx body that is not
    ///   JSON (never retried). An empty 2xx body yields `{}`.
    /// - [`RequestError::Transport`]: the transport failed (never retried)
    pub async fn request(&self, spec: &RequestSpec) -> Result<serde_json::Value, RequestError> {
        let prepared = RequestBuilder::new(&self.config).build(spec);
        let policy = RetryPolicy::from_config(&self.config);

        let mut attempt: u32 = 0;
        loop {
            let error = match self.attempt(&prepared, attempt).await? {
                AttemptOutcome::Succeeded(payload) => return Ok(payload),
                AttemptOutcome::Failed(error) => error,
            };

            let decision = policy.should_retry(attempt, &error);
            if !decision.retry {
                return Err(error.into());
            }

            tracing::warn!(
                method = %prepared.method,
                url = %prepared.url,
                attempt,
                status = error.status_code,
                code = error.code.as_deref().unwrap_or_default(),
                delay_ms = u64::try_from(decision.delay.as_millis()).unwrap_or(u64::MAX),
                "Retrying request after {}",
                error.kind
            );

            if !decision.delay.is_zero() {
                tokio::time::sleep(decision.delay).await;
            }
            attempt += 1;
        }
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get(
        &self,
        path: &str,
        params: Option<HashMap<String, String>>,
    ) -> Result<serde_json::Value, RequestError> {
        self.request(&Self::spec(HttpMethod::Get, path, params)).await
    }

    /// Sends a POST request. Parameters travel in the query string.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn post(
        &self,
        path: &str,
        params: Option<HashMap<String, String>>,
    ) -> Result<serde_json::Value, RequestError> {
        self.request(&Self::spec(HttpMethod::Post, path, params)).await
    }

    fn spec(method: HttpMethod, path: &str, params: Option<HashMap<String, String>>) -> RequestSpec {
        RequestSpec::builder(method, path)
            .params(params.unwrap_or_default())
            .build()
    }

    async fn attempt(
        &self,
        prepared: &PreparedRequest,
        attempt: u32,
    ) -> Result<AttemptOutcome, RequestError> {
        tracing::debug!(
            method = %prepared.method,
            url = %prepared.url,
            attempt,
            "Sending request"
        );

        let response = self.transport.send(prepared).await?;

        if response.is_success() {
            if response.body.is_empty() {
                return Ok(AttemptOutcome::Succeeded(serde_json::json!({})));
            }
            return serde_json::from_str(&response.body)
                .map(AttemptOutcome::Succeeded)
                .map_err(|source| RequestError::MalformedResponse {
                    status: response.status,
                    source,
                });
        }

        Ok(AttemptOutcome::Failed(classify(response.status, &response.body)))
    }
}
