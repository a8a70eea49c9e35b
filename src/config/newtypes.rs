//! Validated newtype wrappers for configuration values.
//!
//! These wrappers reject empty strings on construction so an absent key or
//! version is always spelled `None`, never `Some("")`.

use crate::error::ConfigError;
use std::fmt;

/// A validated Nasdaq Data Link API key.
///
/// The key is sent as the `x-api-token` header. Its `Debug` output is masked
/// so configurations can be logged without leaking the credential.
///
/// # Example
///
/// ```rust
/// use datalink::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated API version, such as `2015-04-09`.
///
/// The version is advertised through the vendor media type in the `accept`
/// header. The server decides which versions it honors, so the format is not
/// checked beyond being non-empty.
///
/// # Example
///
/// ```rust
/// use datalink::ApiVersion;
///
/// let version = ApiVersion::new("2015-04-09").unwrap();
/// assert_eq!(version.to_string(), "2015-04-09");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiVersion(String);

impl ApiVersion {
    /// Creates a new validated API version.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiVersion`] if the version is empty.
    pub fn new(version: impl Into<String>) -> Result<Self, ConfigError> {
        let version = version.into();
        if version.is_empty() {
            return Err(ConfigError::EmptyApiVersion);
        }
        Ok(Self(version))
    }
}

impl AsRef<str> for ApiVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
