//! # Nasdaq Data Link Rust Client
//!
//! A client-side request layer for the Nasdaq Data Link REST API: it builds
//! authenticated requests, executes them, classifies failures into typed
//! errors and retries transient failures with exponential backoff.
//!
//! ## Overview
//!
//! - Configuration via [`ApiConfig`] and [`ApiConfigBuilder`]
//! - Validated newtypes for the API key and version
//! - [`Connection`] for sending requests with automatic retries
//! - A closed error taxonomy: [`DatalinkError`] tagged with [`DatalinkErrorKind`]
//! - A pluggable [`Transport`], with a reqwest-based default
//!
//! ## Quick Start
//!
//! ```rust
//! use datalink::{ApiConfig, ApiKey, ApiVersion};
//!
//! let config = ApiConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .api_version(ApiVersion::new("2015-04-09").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use datalink::{ApiConfig, Connection, DatalinkErrorKind, RequestError};
//!
//! let connection = Connection::new(config)?;
//!
//! match connection.get("databases", None).await {
//!     Ok(payload) => println!("{payload}"),
//!     Err(RequestError::Api(e)) if e.kind == DatalinkErrorKind::NotFound => {
//!         println!("No such resource: {}", e.message);
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is owned by each [`Connection`]
//! - **Total classification**: every failed response maps to a [`DatalinkError`]
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod clients;
pub mod config;
pub mod error;

pub use config::{ApiConfig, ApiConfigBuilder, ApiKey, ApiVersion};
pub use error::ConfigError;

pub use clients::{
    classify, Connection, DatalinkError, DatalinkErrorKind, ErrorEnvelope, HttpMethod,
    PreparedRequest, RawResponse, RequestBuilder, RequestError, RequestSpec, ReqwestTransport,
    RetryDecision, RetryPolicy, Transport, TransportError,
};
