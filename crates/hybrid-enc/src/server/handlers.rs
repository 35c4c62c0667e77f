//! Axum request handlers for all service endpoints.
//!
//! Request-shape validation lives here, at the boundary — the crypto core
//! never observes an invalid shape and does not re-validate. Core failures
//! of any kind (missing keys, bad tags, malformed envelopes) are collapsed
//! into one opaque `INTERNAL_SERVER_ERROR` response; the distinct cause goes
//! to the logs only.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{
    error_code, ApiResponse, DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse,
    HealthResponse, MAX_PAYLOAD_CHARS,
};
use common::ServiceError;
use tracing::warn;

use super::state::AppState;
use crate::crypto::{self, CryptoError};

/// `POST /get-encrypt-data` — encrypt the request payload.
///
/// Returns the wrapped one-time key as `data1` and the ciphertext envelope
/// as `data2`, inside the uniform response envelope.
pub async fn encrypt(
    State(state): State<AppState>,
    payload: Result<Json<EncryptRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    if req.payload.is_empty() {
        return bad_request("payload must not be empty".into());
    }
    if req.payload.chars().count() > MAX_PAYLOAD_CHARS {
        return bad_request(format!(
            "payload must be at most {MAX_PAYLOAD_CHARS} characters"
        ));
    }

    match crypto::encrypt_payload(&req.payload, &state.keys) {
        Ok(encrypted) => (
            StatusCode::OK,
            Json(ApiResponse::success(EncryptResponse {
                data1: encrypted.key_envelope,
                data2: encrypted.transport_envelope,
            })),
        )
            .into_response(),
        Err(e) => crypto_failure(e, "encryption failed"),
    }
}

/// `POST /get-decrypt-data` — recover the plaintext from an envelope pair.
pub async fn decrypt(
    State(state): State<AppState>,
    payload: Result<Json<DecryptRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    if req.data1.is_empty() || req.data2.is_empty() {
        return bad_request("data1 and data2 must not be empty".into());
    }

    match crypto::decrypt_payload(&req.data1, &req.data2, &state.keys) {
        Ok(plaintext) => (
            StatusCode::OK,
            Json(ApiResponse::success(DecryptResponse { payload: plaintext })),
        )
            .into_response(),
        Err(e) => crypto_failure(e, "decryption failed"),
    }
}

/// `GET /health` — liveness and readiness check.
///
/// Returns `200 OK` while at least one of the two operations has its key
/// material; `503 Service Unavailable` when neither key is configured.
pub async fn health(State(state): State<AppState>) -> Response {
    let encrypt_ready = state.keys.encrypt_ready();
    let decrypt_ready = state.keys.decrypt_ready();

    let (status_code, status_str) = if encrypt_ready || decrypt_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status: status_str.into(),
        encrypt_ready,
        decrypt_ready,
    };
    (status_code, Json(body)).into_response()
}

/// `GET /api-docs` — serve the OpenAPI document.
pub async fn api_docs(State(state): State<AppState>) -> Response {
    (StatusCode::OK, Json(&*state.api_docs)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::failure(error_code::NOT_FOUND)),
    )
}

/// Reject a malformed request with the uniform envelope.
fn bad_request(reason: String) -> Response {
    warn!(reason = %reason, "rejecting bad request");
    failure_response(ServiceError::BadRequest(reason))
}

/// Map a core failure to the opaque internal-error envelope.
///
/// The log line carries the distinct cause; the response never does.
fn crypto_failure(e: CryptoError, what: &str) -> Response {
    warn!(error = %e, "{what}");
    failure_response(e.into())
}

fn failure_response(err: ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiResponse::<()>::failure(err.error_code()))).into_response()
}
