//! Configuration types for the Nasdaq Data Link client.
//!
//! # Overview
//!
//! - [`ApiConfig`]: the settings read on every request
//! - [`ApiConfigBuilder`]: a builder for constructing [`ApiConfig`] instances
//! - [`ApiKey`]: a validated API key newtype with masked debug output
//! - [`ApiVersion`]: a validated API version newtype
//!
//! A configuration is a plain value. It is handed to a
//! [`Connection`](crate::Connection) when the connection is created, so each
//! connection reads its own copy and nothing is shared between them.
//!
//! # Example
//!
//! ```rust
//! use datalink::{ApiConfig, ApiKey, ApiVersion};
//!
//! let config = ApiConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .api_version(ApiVersion::new("2015-04-09").unwrap())
//!     .max_retries(3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://data.nasdaq.com/api/v3");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, ApiVersion};

use std::time::Duration;

use crate::error::ConfigError;

/// Default protocol for API requests.
pub const DEFAULT_PROTOCOL: &str = "https";

/// Default API host.
pub const DEFAULT_HOST: &str = "data.nasdaq.com";

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default backoff factor, in seconds.
pub const DEFAULT_RETRY_BACKOFF_FACTOR: f64 = 0.5;

/// Path prefix every endpoint lives under.
pub const API_PATH_PREFIX: &str = "api/v3";

/// Status codes retried when the response carries no recognizable error code.
#[must_use]
pub fn default_retry_status_codes() -> Vec<u16> {
    std::iter::once(429).chain(500..=511).collect()
}

/// Configuration for the Nasdaq Data Link client.
///
/// Apart from the credential newtypes, fields are not validated: a bad host or
/// a negative backoff factor surfaces as a failed or immediate request rather
/// than a configuration error.
///
/// # Thread Safety
///
/// `ApiConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use datalink::ApiConfig;
///
/// let config = ApiConfig::default();
/// assert_eq!(config.protocol(), "https");
/// assert_eq!(config.host(), "data.nasdaq.com");
/// assert!(config.use_retries());
/// assert_eq!(config.max_retries(), 5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    api_key: Option<ApiKey>,
    api_version: Option<ApiVersion>,
    protocol: String,
    host: String,
    port: Option<u16>,
    use_retries: bool,
    max_retries: u32,
    retry_backoff_factor: f64,
    max_wait_between_retries: Option<Duration>,
    retry_status_codes: Vec<u16>,
    verify_ssl: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_version: None,
            protocol: DEFAULT_PROTOCOL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: None,
            use_retries: true,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff_factor: DEFAULT_RETRY_BACKOFF_FACTOR,
            max_wait_between_retries: None,
            retry_status_codes: default_retry_status_codes(),
            verify_ssl: true,
        }
    }
}

impl ApiConfig {
    /// Creates a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Returns the API key, if configured.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the API version, if configured.
    #[must_use]
    pub const fn api_version(&self) -> Option<&ApiVersion> {
        self.api_version.as_ref()
    }

    /// Returns the protocol (e.g. `https`).
    #[must_use]
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Returns the API host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port, if one overrides the protocol default.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns whether transient failures are retried.
    #[must_use]
    pub const fn use_retries(&self) -> bool {
        self.use_retries
    }

    /// Returns the maximum number of retries after the first attempt.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the backoff factor in seconds.
    #[must_use]
    pub const fn retry_backoff_factor(&self) -> f64 {
        self.retry_backoff_factor
    }

    /// Returns the upper bound on a single backoff delay, if any.
    #[must_use]
    pub const fn max_wait_between_retries(&self) -> Option<Duration> {
        self.max_wait_between_retries
    }

    /// Returns the status codes retried for errors without a known code family.
    #[must_use]
    pub fn retry_status_codes(&self) -> &[u16] {
        &self.retry_status_codes
    }

    /// Returns whether TLS certificates are verified.
    #[must_use]
    pub const fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// Returns the URL every request path is appended to.
    ///
    /// # Example
    ///
    /// ```rust
    /// use datalink::ApiConfig;
    ///
    /// let config = ApiConfig::builder()
    ///     .protocol("http")
    ///     .host("localhost")
    ///     .port(8080)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(config.base_url(), "http://localhost:8080/api/v3");
    /// ```
    #[must_use]
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!(
                "{}://{}:{port}/{API_PATH_PREFIX}",
                self.protocol, self.host
            ),
            None => format!("{}://{}/{API_PATH_PREFIX}", self.protocol, self.host),
        }
    }
}

// Verify ApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
};

/// Builder for constructing [`ApiConfig`] instances.
///
/// Every field is optional; unset fields take the values of
/// [`ApiConfig::default`].
///
/// # Example
///
/// ```rust
/// use datalink::{ApiConfig, ApiKey};
/// use std::time::Duration;
///
/// let config = ApiConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .use_retries(true)
///     .max_retries(3)
///     .retry_backoff_factor(0.25)
///     .max_wait_between_retries(Duration::from_secs(8))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.max_retries(), 3);
/// ```
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    api_key: Option<ApiKey>,
    api_version: Option<ApiVersion>,
    protocol: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    use_retries: Option<bool>,
    max_retries: Option<u32>,
    retry_backoff_factor: Option<f64>,
    max_wait_between_retries: Option<Duration>,
    retry_status_codes: Option<Vec<u16>>,
    verify_ssl: Option<bool>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the protocol.
    #[must_use]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Sets the API host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets an explicit port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Enables or disables retries.
    #[must_use]
    pub const fn use_retries(mut self, use_retries: bool) -> Self {
        self.use_retries = Some(use_retries);
        self
    }

    /// Sets the maximum number of retries after the first attempt.
    #[must_use]
    pub const fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Sets the backoff factor in seconds. Zero disables waiting between retries.
    #[must_use]
    pub const fn retry_backoff_factor(mut self, factor: f64) -> Self {
        self.retry_backoff_factor = Some(factor);
        self
    }

    /// Caps a single backoff delay.
    #[must_use]
    pub const fn max_wait_between_retries(mut self, max_wait: Duration) -> Self {
        self.max_wait_between_retries = Some(max_wait);
        self
    }

    /// Sets the status codes retried for errors without a known code family.
    #[must_use]
    pub fn retry_status_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.retry_status_codes = Some(codes.into_iter().collect());
        self
    }

    /// Enables or disables TLS certificate verification.
    #[must_use]
    pub const fn verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = Some(verify_ssl);
        self
    }

    /// Builds the [`ApiConfig`].
    ///
    /// # Errors
    ///
    /// Currently infallible; the credential newtypes are validated when they
    /// are constructed. The `Result` keeps room for cross-field checks.
    #[allow(clippy::unnecessary_wraps)]
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let defaults = ApiConfig::default();

        Ok(ApiConfig {
            api_key: self.api_key,
            api_version: self.api_version,
            protocol: self.protocol.unwrap_or(defaults.protocol),
            host: self.host.unwrap_or(defaults.host),
            port: self.port,
            use_retries: self.use_retries.unwrap_or(defaults.use_retries),
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
            retry_backoff_factor: self
                .retry_backoff_factor
                .unwrap_or(defaults.retry_backoff_factor),
            max_wait_between_retries: self.max_wait_between_retries,
            retry_status_codes: self
                .retry_status_codes
                .unwrap_or(defaults.retry_status_codes),
            verify_ssl: self.verify_ssl.unwrap_or(defaults.verify_ssl),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();

        assert!(config.api_key().is_none());
        assert!(config.api_version().is_none());
        assert_eq!(config.protocol(), "https");
        assert_eq!(config.host(), "data.nasdaq.com");
        assert!(config.port().is_none());
        assert!(config.use_retries());
        assert_eq!(config.max_retries(), 5);
        assert!((config.retry_backoff_factor() - 0.5).abs() < f64::EPSILON);
        assert!(config.max_wait_between_retries().is_none());
        assert!(config.verify_ssl());
    }

    #[test]
    fn test_default_retry_status_codes() {
        let codes = default_retry_status_codes();
        assert_eq!(codes.len(), 13);
        assert_eq!(codes[0], 429);
        assert!(codes.contains(&500));
        assert!(codes.contains(&503));
        assert!(codes.contains(&511));
        assert!(!codes.contains(&512));
        assert!(!codes.contains(&404));
    }

    #[test]
    fn test_empty_builder_matches_default() {
        let config = ApiConfig::builder().build().unwrap();
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_builder_with_all_fields() {
        let config = ApiConfig::builder()
            .api_key(ApiKey::new("api_token").unwrap())
            .api_version(ApiVersion::new("2015-04-09").unwrap())
            .protocol("http")
            .host("localhost")
            .port(3000)
            .use_retries(false)
            .max_retries(2)
            .retry_backoff_factor(0.0)
            .max_wait_between_retries(Duration::from_secs(8))
            .retry_status_codes([502, 503])
            .verify_ssl(false)
            .build()
            .unwrap();

        assert_eq!(config.api_key().unwrap().as_ref(), "api_token");
        assert_eq!(config.api_version().unwrap().as_ref(), "2015-04-09");
        assert_eq!(config.protocol(), "http");
        assert_eq!(config.host(), "localhost");
        assert_eq!(config.port(), Some(3000));
        assert!(!config.use_retries());
        assert_eq!(config.max_retries(), 2);
        assert!(config.retry_backoff_factor().abs() < f64::EPSILON);
        assert_eq!(
            config.max_wait_between_retries(),
            Some(Duration::from_secs(8))
        );
        assert_eq!(config.retry_status_codes(), &[502, 503]);
        assert!(!config.verify_ssl());
    }

    #[test]
    fn test_base_url_without_port() {
        assert_eq!(
            ApiConfig::default().base_url(),
            "https://data.nasdaq.com/api/v3"
        );
    }

    #[test]
    fn test_base_url_with_port() {
        let config = ApiConfig::builder()
            .protocol("http")
            .host("127.0.0.1")
            .port(4545)
            .build()
            .unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:4545/api/v3");
    }

    #[test]
    fn test_config_debug_masks_api_key() {
        let config = ApiConfig::builder()
            .api_key(ApiKey::new("do-not-log-me").unwrap())
            .build()
            .unwrap();

        let debug = format!("{config:?}");
        assert!(debug.contains("ApiConfig"));
        assert!(!debug.contains("do-not-log-me"));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiConfig>();
    }
}
