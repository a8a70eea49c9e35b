//! Request types for the Nasdaq Data Link API.
//!
//! A [`RequestSpec`] describes a logical call (method, path, params, extra
//! headers). [`RequestBuilder`] combines it with an [`ApiConfig`] into a
//! [`PreparedRequest`] carrying the absolute URL and the complete header set.

use std::collections::HashMap;
use std::fmt;

use crate::config::ApiConfig;

/// Identifies this client family in the `request-source` header.
pub const REQUEST_SOURCE: &str = "rust";

/// Client version sent in the `request-source-version` header.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base media type accepted from the API.
pub const ACCEPT_JSON: &str = "application/json";

/// Vendor media type used to select an API version.
pub const VENDOR_MEDIA_TYPE: &str = "application/vnd.data.nasdaq+json";

/// HTTP methods supported by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method.
    Get,
    /// HTTP POST method.
    Post,
    /// HTTP PUT method.
    Put,
    /// HTTP DELETE method.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A logical request: what to call, independent of host and credentials.
///
/// # Example
///
/// ```rust
/// use datalink::{HttpMethod, RequestSpec};
///
/// let spec = RequestSpec::builder(HttpMethod::Get, "databases")
///     .param("per_page", 10)
///     .param("page", 2)
///     .header("x-custom-header", "header value")
///     .build();
///
/// assert_eq!(spec.params.get("per_page"), Some(&"10".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestSpec {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The path relative to `/api/v3/`.
    pub path: String,
    /// Query parameters.
    pub params: HashMap<String, String>,
    /// Caller-supplied headers. These win over the client's own headers.
    pub headers: HashMap<String, String>,
}

impl RequestSpec {
    /// Creates a new builder for constructing a `RequestSpec`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> RequestSpecBuilder {
        RequestSpecBuilder::new(method, path)
    }
}

/// Builder for constructing [`RequestSpec`] instances.
#[derive(Debug)]
pub struct RequestSpecBuilder {
    method: HttpMethod,
    path: String,
    params: HashMap<String, String>,
    headers: HashMap<String, String>,
}

impl RequestSpecBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: HashMap::new(),
            headers: HashMap::new(),
        }
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Adds all the given query parameters.
    #[must_use]
    pub fn params(mut self, params: HashMap<String, String>) -> Self {
        self.params.extend(params);
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Adds all the given headers.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Builds the [`RequestSpec`].
    #[must_use]
    pub fn build(self) -> RequestSpec {
        RequestSpec {
            method: self.method,
            path: self.path,
            params: self.params,
            headers: self.headers,
        }
    }
}

/// A request ready for the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute URL.
    pub url: String,
    /// The complete header set.
    pub headers: HashMap<String, String>,
    /// Query parameters, unchanged from the [`RequestSpec`].
    pub params: HashMap<String, String>,
}

/// Assembles [`PreparedRequest`]s from a configuration.
///
/// Every request carries `accept`, `request-source` and
/// `request-source-version`, plus `x-api-token` when an API key is
/// configured. Caller headers are merged last and win on collision. Header
/// names are lowercased, so `Accept` replaces `accept`.
///
/// # Example
///
/// ```rust
/// use datalink::{ApiConfig, ApiKey, HttpMethod, RequestBuilder, RequestSpec};
///
/// let config = ApiConfig::builder()
///     .api_key(ApiKey::new("api_token").unwrap())
///     .build()
///     .unwrap();
///
/// let spec = RequestSpec::builder(HttpMethod::Get, "databases").build();
/// let prepared = RequestBuilder::new(&config).build(&spec);
///
/// assert_eq!(prepared.url, "https://data.nasdaq.com/api/v3/databases");
/// assert_eq!(prepared.headers["x-api-token"], "api_token");
/// assert_eq!(prepared.headers["accept"], "application/json");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RequestBuilder<'a> {
    config: &'a ApiConfig,
}

impl<'a> RequestBuilder<'a> {
    /// Creates a builder reading from the given configuration.
    #[must_use]
    pub const fn new(config: &'a ApiConfig) -> Self {
        Self { config }
    }

    /// Returns the `accept` header value for the configured API version.
    #[must_use]
    pub fn accept_header(&self) -> String {
        self.config.api_version().map_or_else(
            || ACCEPT_JSON.to_string(),
            |version| format!("{ACCEPT_JSON}, {VENDOR_MEDIA_TYPE};version={version}"),
        )
    }

    /// Returns the absolute URL for a path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url(),
            path.trim_start_matches('/')
        )
    }

    /// Assembles the request. Performs no I/O.
    #[must_use]
    pub fn build(&self, spec: &RequestSpec) -> PreparedRequest {
        let mut headers = HashMap::new();
        headers.insert("accept".to_string(), self.accept_header());
        headers.insert("request-source".to_string(), REQUEST_SOURCE.to_string());
        headers.insert(
            "request-source-version".to_string(),
            CLIENT_VERSION.to_string(),
        );
        if let Some(api_key) = self.config.api_key() {
            headers.insert("x-api-token".to_string(), api_key.as_ref().to_string());
        }
        for (key, value) in &spec.headers {
            headers.insert(key.to_ascii_lowercase(), value.clone());
        }

        PreparedRequest {
            method: spec.method,
            url: self.url(&spec.path),
            headers,
            params: spec.params.clone(),
        }
    }
}
