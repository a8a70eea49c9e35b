//! Classification of failed responses into [`DatalinkError`]s.
//!
//! [`classify`] is total: any status code and any body yields an error value,
//! falling back to [`DatalinkErrorKind::Generic`] when the body does not
//! carry a recognizable `datalink_error` envelope.

use serde::Deserialize;

use crate::clients::errors::{
    DatalinkError, DatalinkErrorKind, ErrorEnvelope, MALFORMED_ENVELOPE_MESSAGE,
};

/// Top-level shape of an error response body.
#[derive(Deserialize)]
struct ErrorBody {
    datalink_error: ErrorEnvelope,
}

/// Extracts the error envelope from a response body, if present and well formed.
///
/// # Example
///
/// ```rust
/// use datalink::clients::parse_error_envelope;
///
/// let body = r#"{"datalink_error": {"code": "QECx05", "message": "not found"}}"#;
/// let envelope = parse_error_envelope(body).unwrap();
/// assert_eq!(envelope.code, "QECx05");
///
/// assert!(parse_error_envelope("not json").is_none());
/// assert!(parse_error_envelope(r#"{"foobar": {}}"#).is_none());
/// ```
#[must_use]
pub fn parse_error_envelope(body: &str) -> Option<ErrorEnvelope> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|parsed| parsed.datalink_error)
}

/// Classifies a non-success response.
///
/// The kind is decided by the application code family alone; the status code
/// is carried through unchanged.
///
/// # Example
///
/// ```rust
/// use datalink::{classify, DatalinkErrorKind};
///
/// let body = r#"{"datalink_error": {"code": "QELx04", "message": "slow down"}}"#;
/// let error = classify(429, body);
///
/// assert_eq!(error.kind, DatalinkErrorKind::LimitExceeded);
/// assert_eq!(error.status_code, 429);
/// assert_eq!(error.message, "slow down");
/// assert_eq!(error.code.as_deref(), Some("QELx04"));
/// ```
#[must_use]
pub fn classify(status_code: u16, body: &str) -> DatalinkError {
    let Some(envelope) = parse_error_envelope(body) else {
        tracing::debug!(
            status_code,
            "Error response body was not a datalink_error envelope"
        );
        return DatalinkError {
            kind: DatalinkErrorKind::Generic,
            status_code,
            message: MALFORMED_ENVELOPE_MESSAGE.to_string(),
            code: None,
            http_body: body.to_string(),
        };
    };

    let kind = DatalinkErrorKind::from_code(&envelope.code);
    tracing::debug!(status_code, code = %envelope.code, %kind, "Classified error response");

    DatalinkError {
        kind,
        status_code,
        message: envelope.message,
        code: Some(envelope.code),
        http_body: body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope_body(code: &str, message: &str) -> String {
        json!({"datalink_error": {"code": code, "message": message}}).to_string()
    }

    #[test]
    fn test_classify_table() {
        let cases = [
            ("QELx04", 429, DatalinkErrorKind::LimitExceeded),
            ("QEMx01", 500, DatalinkErrorKind::InternalServer),
            ("QEAx01", 400, DatalinkErrorKind::Authentication),
            ("QEAx01", 401, DatalinkErrorKind::Authentication),
            ("QEPx02", 403, DatalinkErrorKind::Forbidden),
            ("QESx03", 422, DatalinkErrorKind::InvalidRequest),
            ("QECx05", 404, DatalinkErrorKind::NotFound),
            ("QEXx01", 503, DatalinkErrorKind::ServiceUnavailable),
            ("QEZx02", 400, DatalinkErrorKind::Generic),
        ];

        for (code, status, kind) in cases {
            let body = envelope_body(code, "something went wrong");
            let error = classify(status, &body);

            assert_eq!(error.kind, kind, "code {code}");
            assert_eq!(error.status_code, status);
            assert_eq!(error.message, "something went wrong");
            assert_eq!(error.code.as_deref(), Some(code));
            assert_eq!(error.http_body, body);
        }
    }

    #[test]
    fn test_classify_unmapped_codes_are_generic() {
        for (code, status) in [("QEZx02", 400), ("E1234", 418), ("", 500), ("QEQx99", 200)] {
            let error = classify(status, &envelope_body(code, "nope"));
            assert_eq!(error.kind, DatalinkErrorKind::Generic, "code {code:?}");
            assert_eq!(error.status_code, status);
            assert_eq!(error.message, "nope");
        }
    }

    #[test]
    fn test_classify_body_not_json() {
        let error = classify(500, "not json");

        assert_eq!(error.kind, DatalinkErrorKind::Generic);
        assert_eq!(error.status_code, 500);
        assert_eq!(error.message, MALFORMED_ENVELOPE_MESSAGE);
        assert!(error.code.is_none());
        assert_eq!(error.http_body, "not json");
    }

    #[test]
    fn test_classify_json_without_envelope() {
        let body = json!({"foobar": {"code": "blah", "message": "something went wrong"}}).to_string();
        let error = classify(500, &body);

        assert_eq!(error.kind, DatalinkErrorKind::Generic);
        assert_eq!(error.message, MALFORMED_ENVELOPE_MESSAGE);
        assert!(error.code.is_none());
    }

    #[test]
    fn test_classify_envelope_missing_fields() {
        let missing_message = json!({"datalink_error": {"code": "QELx04"}}).to_string();
        let missing_code = json!({"datalink_error": {"message": "hi"}}).to_string();
        let not_object = json!({"datalink_error": "QELx04"}).to_string();
        let wrong_type = json!({"datalink_error": {"code": 4, "message": "hi"}}).to_string();

        for body in [missing_message, missing_code, not_object, wrong_type] {
            let error = classify(429, &body);
            assert_eq!(error.kind, DatalinkErrorKind::Generic, "body {body}");
            assert!(error.code.is_none());
        }
    }

    #[test]
    fn test_classify_empty_body() {
        let error = classify(503, "");
        assert_eq!(error.kind, DatalinkErrorKind::Generic);
        assert_eq!(error.status_code, 503);
    }

    #[test]
    fn test_classify_envelope_ignores_extra_fields() {
        let body = json!({
            "datalink_error": {"code": "QECx05", "message": "missing", "detail": 1},
            "meta": {}
        })
        .to_string();

        let error = classify(404, &body);
        assert_eq!(error.kind, DatalinkErrorKind::NotFound);
    }
}
