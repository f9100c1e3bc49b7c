//! Interpretation of exchange response envelopes.

use crate::error::{ApiError, Result};
use crate::port::{HeaderCode, Response};

/// Unwrap the payload of an OK response, or turn the status and header
/// codes into an error.
///
/// A missing session or exceeded throttle in the header takes precedence
/// over the operation status.
pub(crate) fn into_payload<T>(response: Response<T>, operation: &'static str) -> Result<T> {
    if response.is_ok() {
        return Ok(response.body);
    }

    let err = match response.header.error_code {
        HeaderCode::NoSession => ApiError::NoSession,
        HeaderCode::ExceededThrottle => ApiError::Throttled,
        code => ApiError::Operation {
            operation,
            status: response.status,
            api_code: code.to_string(),
        },
    };
    Err(err.into())
}
