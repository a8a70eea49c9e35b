//! Error types for client configuration.
//!
//! Errors raised while talking to the API live in
//! [`clients`](crate::clients); this module only covers values rejected
//! while building an [`ApiConfig`](crate::ApiConfig).
//!
//! # Example
//!
//! ```rust
//! use datalink::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Leave the key unset to send unauthenticated requests.")]
    EmptyApiKey,

    /// API version cannot be empty.
    #[error("API version cannot be empty. Leave the version unset to use the server default.")]
    EmptyApiVersion,
}
