//! Request execution for the Nasdaq Data Link API.
//!
//! This module builds authenticated requests, sends them, classifies failed
//! responses into typed errors and retries transient failures.
//!
//! # Overview
//!
//! - [`Connection`]: the entry point; runs the request/retry loop
//! - [`RequestSpec`]: a logical request (method, path, params, headers)
//! - [`RequestBuilder`]: turns a [`RequestSpec`] into a [`PreparedRequest`]
//! - [`classify`]: maps a failed response to a [`DatalinkError`]
//! - [`RetryPolicy`]: decides whether and when to retry
//! - [`Transport`]: the network seam, with [`ReqwestTransport`] as default
//!
//! # Retry Behavior
//!
//! - **Rate limit, internal server error, service unavailable**: retried up
//!   to `max_retries` times, waiting `retry_backoff_factor * 2^n` seconds
//!   before retry `n`
//! - **Unrecognized errors**: retried only when the status code is one of
//!   `retry_status_codes` (429 and 500-511 by default)
//! - **Authentication, forbidden, invalid request, not found**: returned
//!   immediately
//! - **Malformed success body, transport failure**: returned immediately
//!
//! # Example
//!
//! ```rust,ignore
//! use datalink::{ApiConfig, Connection, HttpMethod, RequestSpec};
//!
//! let connection = Connection::new(ApiConfig::default())?;
//!
//! let spec = RequestSpec::builder(HttpMethod::Get, "datasets")
//!     .param("database_code", "WIKI")
//!     .param("per_page", 10)
//!     .build();
//!
//! let datasets = connection.request(&spec).await?;
//! ```

mod classifier;
mod connection;
mod errors;
mod http_request;
mod retry;
mod transport;

pub use classifier::{classify, parse_error_envelope};
pub use connection::Connection;
pub use errors::{
    DatalinkError, DatalinkErrorKind, ErrorEnvelope, RequestError, TransportError,
    MALFORMED_ENVELOPE_MESSAGE,
};
pub use http_request::{
    HttpMethod, PreparedRequest, RequestBuilder, RequestSpec, RequestSpecBuilder, ACCEPT_JSON,
    CLIENT_VERSION, REQUEST_SOURCE, VENDOR_MEDIA_TYPE,
};
pub use retry::{RetryDecision, RetryPolicy};
pub use transport::{RawResponse, ReqwestTransport, Transport};
