//! Error types for requests against the Nasdaq Data Link API.
//!
//! # Error Handling
//!
//! - [`DatalinkError`]: an error reported by the API (non-2xx response),
//!   tagged with a [`DatalinkErrorKind`]
//! - [`TransportError`]: the request could not be delivered at all
//! - [`RequestError`]: unified error returned by
//!   [`Connection::request`](crate::Connection::request)
//!
//! # Example
//!
//! ```rust,ignore
//! use datalink::{DatalinkErrorKind, RequestError};
//!
//! match connection.get("databases", None).await {
//!     Ok(payload) => println!("Databases: {payload}"),
//!     Err(RequestError::Api(e)) if e.kind == DatalinkErrorKind::LimitExceeded => {
//!         println!("Rate limited even after retries: {}", e.message);
//!     }
//!     Err(RequestError::Api(e)) => println!("API error {}: {}", e.status_code, e.message),
//!     Err(RequestError::MalformedResponse { status, .. }) => {
//!         println!("Unreadable success body (status {status})");
//!     }
//!     Err(RequestError::Transport(e)) => println!("Network error: {e}"),
//! }
//! ```

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Message used when a failed response has no usable error envelope.
pub const MALFORMED_ENVELOPE_MESSAGE: &str = "Response body was not the expected error envelope";

/// The closed set of API error kinds.
///
/// Each kind corresponds to a family of application error codes
/// (`QE<letter>x<nn>`). Codes outside the known families, and responses
/// without an error envelope, are [`Generic`](Self::Generic).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DatalinkErrorKind {
    /// Rate limit exceeded (`QELx..`, usually 429).
    LimitExceeded,
    /// Internal server error (`QEMx..`, usually 500).
    InternalServer,
    /// Missing or invalid credentials (`QEAx..`, usually 400/401).
    Authentication,
    /// Credentials lack access to the resource (`QEPx..`, usually 403).
    Forbidden,
    /// Request parameters were rejected (`QESx..`, usually 422).
    InvalidRequest,
    /// Resource does not exist (`QECx..`, usually 404).
    NotFound,
    /// Service temporarily unavailable (`QEXx..`, usually 503).
    ServiceUnavailable,
    /// Anything else.
    Generic,
}

impl DatalinkErrorKind {
    /// Maps an application error code to its kind.
    ///
    /// The family is the letter between the `QE` prefix and the `x`
    /// separator.
    ///
    /// # Example
    ///
    /// ```rust
    /// use datalink::DatalinkErrorKind;
    ///
    /// assert_eq!(DatalinkErrorKind::from_code("QELx04"), DatalinkErrorKind::LimitExceeded);
    /// assert_eq!(DatalinkErrorKind::from_code("QEZx02"), DatalinkErrorKind::Generic);
    /// assert_eq!(DatalinkErrorKind::from_code("oops"), DatalinkErrorKind::Generic);
    /// ```
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.as_bytes() {
            [b'Q', b'E', family, b'x', ..] => match family {
                b'L' => Self::LimitExceeded,
                b'M' => Self::InternalServer,
                b'A' => Self::Authentication,
                b'P' => Self::Forbidden,
                b'S' => Self::InvalidRequest,
                b'C' => Self::NotFound,
                b'X' => Self::ServiceUnavailable,
                _ => Self::Generic,
            },
            _ => Self::Generic,
        }
    }

    /// Returns `true` for kinds that describe a transient upstream condition.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(
            self,
            Self::LimitExceeded | Self::InternalServer | Self::ServiceUnavailable
        )
    }
}

impl fmt::Display for DatalinkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LimitExceeded => "limit exceeded",
            Self::InternalServer => "internal server error",
            Self::Authentication => "authentication error",
            Self::Forbidden => "forbidden",
            Self::InvalidRequest => "invalid request",
            Self::NotFound => "not found",
            Self::ServiceUnavailable => "service unavailable",
            Self::Generic => "error",
        };
        f.write_str(name)
    }
}

/// The `datalink_error` object of an error response body.
///
/// ```json
/// {"datalink_error": {"code": "QELx04", "message": "..."}}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorEnvelope {
    /// Application error code, e.g. `QELx04`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// An error reported by the API.
///
/// All kinds share this one shape; use [`kind`](Self::kind) to tell them
/// apart.
///
/// # Example
///
/// ```rust
/// use datalink::{DatalinkError, DatalinkErrorKind};
///
/// let error = DatalinkError {
///     kind: DatalinkErrorKind::NotFound,
///     status_code: 404,
///     message: "database not found".to_string(),
///     code: Some("QECx05".to_string()),
///     http_body: String::new(),
/// };
///
/// assert_eq!(
///     error.to_string(),
///     "(Status 404) (Nasdaq Data Link Error QECx05) database not found"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub struct DatalinkError {
    /// The classified kind.
    pub kind: DatalinkErrorKind,
    /// The HTTP status code of the response.
    pub status_code: u16,
    /// The API message, or [`MALFORMED_ENVELOPE_MESSAGE`].
    pub message: String,
    /// The application error code, when the body carried an envelope.
    pub code: Option<String>,
    /// The raw response body.
    pub http_body: String,
}

impl DatalinkError {
    /// Returns `true` if the error was classified as the given kind.
    #[must_use]
    pub fn is(&self, kind: DatalinkErrorKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for DatalinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Status {}) ", self.status_code)?;
        if let Some(code) = &self.code {
            write!(f, "(Nasdaq Data Link Error {code}) ")?;
        }
        f.write_str(&self.message)
    }
}

/// Error returned when the transport could not complete a request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network or connection error from the HTTP client.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failure reported by a custom transport.
    #[error("Transport error: {0}")]
    Other(String),
}

/// Unified error type for [`Connection`](crate::Connection) requests.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The API reported an error and no further retry was allowed.
    #[error(transparent)]
    Api(#[from] DatalinkError),

    /// A success response whose body is not valid JSON.
    #[error("Error parsing response as JSON (status {status}): {source}")]
    MalformedResponse {
        /// The HTTP status code of the response.
        status: u16,
        /// The JSON parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The request could not be delivered.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl RequestError {
    /// Returns the API error, if this is one.
    #[must_use]
    pub const fn as_datalink(&self) -> Option<&DatalinkError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }

    /// Returns the kind of the API error, if this is one.
    #[must_use]
    pub const fn kind(&self) -> Option<DatalinkErrorKind> {
        match self {
            Self::Api(error) => Some(error.kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(kind: DatalinkErrorKind, status_code: u16, code: Option<&str>) -> DatalinkError {
        DatalinkError {
            kind,
            status_code,
            message: "something went wrong".to_string(),
            code: code.map(String::from),
            http_body: String::new(),
        }
    }

    #[test]
    fn test_from_code_known_families() {
        let cases = [
            ("QELx04", DatalinkErrorKind::LimitExceeded),
            ("QEMx01", DatalinkErrorKind::InternalServer),
            ("QEAx01", DatalinkErrorKind::Authentication),
            ("QEPx02", DatalinkErrorKind::Forbidden),
            ("QESx03", DatalinkErrorKind::InvalidRequest),
            ("QECx05", DatalinkErrorKind::NotFound),
            ("QEXx01", DatalinkErrorKind::ServiceUnavailable),
        ];
        for (code, kind) in cases {
            assert_eq!(DatalinkErrorKind::from_code(code), kind, "code {code}");
        }
    }

    #[test]
    fn test_from_code_unknown_family_is_generic() {
        assert_eq!(
            DatalinkErrorKind::from_code("QEZx02"),
            DatalinkErrorKind::Generic
        );
    }

    #[test]
    fn test_from_code_requires_prefix_and_separator() {
        for code in ["", "QE", "QEL", "QELy04", "qelx04", "XQELx04", "QE-x01"] {
            assert_eq!(
                DatalinkErrorKind::from_code(code),
                DatalinkErrorKind::Generic,
                "code {code:?}"
            );
        }
    }

    #[test]
    fn test_from_code_lowercase_family_is_generic() {
        // Families are upper-case; an unknown lower-case letter falls through.
        assert_eq!(
            DatalinkErrorKind::from_code("QElx04"),
            DatalinkErrorKind::Generic
        );
    }

    #[test]
    fn test_transient_kinds() {
        assert!(DatalinkErrorKind::LimitExceeded.is_transient());
        assert!(DatalinkErrorKind::InternalServer.is_transient());
        assert!(DatalinkErrorKind::ServiceUnavailable.is_transient());

        assert!(!DatalinkErrorKind::Authentication.is_transient());
        assert!(!DatalinkErrorKind::Forbidden.is_transient());
        assert!(!DatalinkErrorKind::InvalidRequest.is_transient());
        assert!(!DatalinkErrorKind::NotFound.is_transient());
        assert!(!DatalinkErrorKind::Generic.is_transient());
    }

    #[test]
    fn test_display_with_code() {
        let error = error(DatalinkErrorKind::LimitExceeded, 429, Some("QELx04"));
        assert_eq!(
            error.to_string(),
            "(Status 429) (Nasdaq Data Link Error QELx04) something went wrong"
        );
    }

    #[test]
    fn test_display_without_code() {
        let error = DatalinkError {
            message: MALFORMED_ENVELOPE_MESSAGE.to_string(),
            ..error(DatalinkErrorKind::Generic, 500, None)
        };
        assert_eq!(
            error.to_string(),
            "(Status 500) Response body was not the expected error envelope"
        );
    }

    #[test]
    fn test_request_error_is_transparent_for_api_errors() {
        let inner = error(DatalinkErrorKind::NotFound, 404, Some("QECx05"));
        let expected = inner.to_string();
        let error = RequestError::from(inner);

        assert_eq!(error.to_string(), expected);
        assert_eq!(error.kind(), Some(DatalinkErrorKind::NotFound));
        assert_eq!(error.as_datalink().unwrap().status_code, 404);
    }

    #[test]
    fn test_malformed_response_is_not_an_api_error() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = RequestError::MalformedResponse {
            status: 200,
            source,
        };

        assert!(error.to_string().contains("Error parsing response as JSON"));
        assert!(error.to_string().contains("200"));
        assert!(error.as_datalink().is_none());
        assert!(error.kind().is_none());
    }

    #[test]
    fn test_transport_error_message() {
        let error = RequestError::from(TransportError::Other("connection reset".to_string()));
        assert_eq!(error.to_string(), "Transport error: connection reset");
        assert!(error.kind().is_none());
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let api: &dyn std::error::Error = &error(DatalinkErrorKind::Generic, 400, None);
        let _ = api;
        let transport: &dyn std::error::Error = &TransportError::Other("x".to_string());
        let _ = transport;
    }
}
