//! Request and response types exchanged over the public HTTP API.
//!
//! Every endpoint wraps its payload in the uniform [`ApiResponse`] envelope:
//! `{"successful": bool, "error_code": string, "data": object | null}`.

use serde::{Deserialize, Serialize};

/// Maximum accepted payload length, in characters.
///
/// Enforced at the HTTP boundary; the crypto layer never re-validates it.
pub const MAX_PAYLOAD_CHARS: usize = 2000;

/// Machine-readable envelope codes.
pub mod error_code {
    /// The operation completed successfully.
    pub const SUCCESS: &str = "SUCCESS";
    /// The request shape was invalid and the operation was never attempted.
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    /// The operation was attempted and failed; no further detail is exposed.
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
    /// The requested route does not exist.
    pub const NOT_FOUND: &str = "NOT_FOUND";
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// Uniform response envelope returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded.
    pub successful: bool,
    /// One of the [`error_code`] constants.
    pub error_code: String,
    /// Endpoint-specific payload; `null` on failure.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Build a success envelope carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            successful: true,
            error_code: error_code::SUCCESS.into(),
            data: Some(data),
        }
    }

    /// Build a failure envelope with the given code and no data.
    pub fn failure(code: &str) -> Self {
        Self {
            successful: false,
            error_code: code.into(),
            data: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Encrypt endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /get-encrypt-data`.
///
/// Unknown fields are rejected rather than ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncryptRequest {
    /// Plaintext to encrypt. Must be non-empty and at most
    /// [`MAX_PAYLOAD_CHARS`] characters.
    pub payload: String,
}

/// Successful response data for `POST /get-encrypt-data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptResponse {
    /// Base64 of the asymmetrically wrapped one-time payload key.
    pub data1: String,
    /// Transport envelope: `<ciphertext>:<nonce>:<tag>`, each segment base64.
    pub data2: String,
}

// ---------------------------------------------------------------------------
// Decrypt endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /get-decrypt-data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecryptRequest {
    /// Base64 key envelope produced by the encrypt endpoint.
    pub data1: String,
    /// Colon-delimited transport envelope produced by the encrypt endpoint.
    pub data2: String,
}

/// Successful response data for `POST /get-decrypt-data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptResponse {
    /// The recovered plaintext.
    pub payload: String,
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Whether the RSA private key is loaded (encrypt available).
    pub encrypt_ready: bool,
    /// Whether the RSA public key is loaded (decrypt available).
    pub decrypt_ready: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let resp = ApiResponse::success(EncryptResponse {
            data1: "a".into(),
            data2: "b:c:d".into(),
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["successful"], true);
        assert_eq!(json["error_code"], error_code::SUCCESS);
        assert_eq!(json["data"]["data1"], "a");
        assert_eq!(json["data"]["data2"], "b:c:d");
    }

    #[test]
    fn failure_envelope_has_null_data() {
        let resp = ApiResponse::<DecryptResponse>::failure(error_code::BAD_REQUEST);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["successful"], false);
        assert_eq!(json["error_code"], error_code::BAD_REQUEST);
        assert!(json["data"].is_null());
    }

    #[test]
    fn encrypt_request_round_trip() {
        let req: EncryptRequest = serde_json::from_str(r#"{"payload":"hello"}"#).unwrap();
        assert_eq!(req.payload, "hello");
    }

    #[test]
    fn encrypt_request_rejects_unknown_fields() {
        let result =
            serde_json::from_str::<EncryptRequest>(r#"{"payload":"x","extra":"nope"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn decrypt_request_rejects_missing_field() {
        let result = serde_json::from_str::<DecryptRequest>(r#"{"data1":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn decrypt_request_rejects_non_string_fields() {
        let result = serde_json::from_str::<DecryptRequest>(r#"{"data1":1,"data2":2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn health_response_serde() {
        let h = HealthResponse {
            status: "ok".into(),
            encrypt_ready: true,
            decrypt_ready: false,
        };
        let json = serde_json::to_string(&h).unwrap();
        let decoded: HealthResponse = serde_json::from_str(&json).unwrap();
        assert!(decoded.encrypt_ready);
        assert!(!decoded.decrypt_ready);
    }
}
