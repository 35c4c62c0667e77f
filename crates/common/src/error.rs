//! Common error types shared across crates.

use thiserror::Error;

use crate::protocol::error_code;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::Configuration`] → 500
/// - [`ServiceError::CryptoFailure`] → 500
/// - [`ServiceError::Internal`] → 500
///
/// Everything except [`ServiceError::BadRequest`] reports the same
/// `INTERNAL_SERVER_ERROR` envelope code. Callers are never told whether a
/// failure was a bad tag, bad padding, or a malformed string — distinguishing
/// those at the boundary would hand probing clients a decryption oracle. The
/// variant (and its message) still reaches the internal logs.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed — missing field, wrong type, or length out of range.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Required key material is absent or unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Encryption or decryption failed in the crypto layer.
    #[error("crypto failure: {0}")]
    CryptoFailure(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::Configuration(_) => 500,
            ServiceError::CryptoFailure(_) => 500,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Returns the machine-readable envelope code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => error_code::BAD_REQUEST,
            _ => error_code::INTERNAL_SERVER_ERROR,
        }
    }
}
