//! Orchestration of the two public operations.
//!
//! [`encrypt_payload`] composes seal → wrap → encode; [`decrypt_payload`]
//! composes decode → unwrap → open, in that order — the one-time key must be
//! recovered before the payload can be opened. Both are stateless,
//! single-attempt, fail-fast transforms: any stage failure aborts the call
//! with no partial output and nothing is ever retried.

use common::ServiceError;
use thiserror::Error;

use crate::keys::{KeyRing, KeyRingError};

use super::cipher::{self, CipherError};
use super::codec::{self, CodecError};
use super::envelope::{self, EnvelopeError};

/// The two strings produced by a successful encryption.
#[derive(Debug, Clone)]
pub struct HybridCiphertext {
    /// Base64 of the wrapped one-time payload key (`data1`).
    pub key_envelope: String,
    /// Colon-delimited ciphertext envelope (`data2`).
    pub transport_envelope: String,
}

/// Unified error for the crypto core.
///
/// Handlers collapse every variant into one opaque external failure; the
/// variant distinction exists for internal logging only.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Required key material is absent or unusable.
    #[error("key material unavailable: {0}")]
    KeyRing(#[from] KeyRingError),

    /// The symmetric cipher failed (including tag verification).
    #[error(transparent)]
    Cipher(#[from] CipherError),

    /// The asymmetric key envelope failed to wrap or unwrap.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// One of the wire strings failed to parse.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The decrypted bytes are not valid UTF-8.
    #[error("decrypted payload is not valid utf-8")]
    NotUtf8,
}

impl CryptoError {
    /// Whether this failure is a key-configuration problem rather than a
    /// cryptographic one. Used for log wording only — the external response
    /// is identical either way.
    pub fn is_configuration(&self) -> bool {
        matches!(self, CryptoError::KeyRing(_))
    }
}

impl From<CryptoError> for ServiceError {
    /// Collapse into the boundary taxonomy. Both variants report the same
    /// opaque envelope code; only the internal message differs.
    fn from(e: CryptoError) -> Self {
        if e.is_configuration() {
            ServiceError::Configuration(e.to_string())
        } else {
            ServiceError::CryptoFailure(e.to_string())
        }
    }
}

/// Encrypt `plaintext`, producing the key envelope and transport envelope.
///
/// The key-ring check runs first so a misconfigured service fails before any
/// cipher work. Atomic: no partial envelope is ever returned.
///
/// # Errors
///
/// Returns [`CryptoError::KeyRing`] if no private key is configured, or the
/// underlying stage error if seal or wrap fails.
pub fn encrypt_payload(plaintext: &str, keys: &KeyRing) -> Result<HybridCiphertext, CryptoError> {
    let private_key = keys.private_key()?;

    let (payload_key, sealed) = cipher::seal(plaintext.as_bytes())?;
    let wrapped = envelope::wrap(payload_key.as_bytes(), private_key)?;

    Ok(HybridCiphertext {
        key_envelope: codec::encode_key_envelope(&wrapped),
        transport_envelope: codec::encode_transport(&sealed),
    })
}

/// Decrypt a key envelope + transport envelope pair back to the plaintext.
///
/// # Errors
///
/// Returns [`CryptoError::KeyRing`] if no public key is configured, a codec
/// error if either string is malformed, an envelope error if the key unwrap
/// fails, a cipher error if tag verification fails, or
/// [`CryptoError::NotUtf8`] if the authenticated plaintext is not UTF-8.
pub fn decrypt_payload(
    key_envelope: &str,
    transport_envelope: &str,
    keys: &KeyRing,
) -> Result<String, CryptoError> {
    let public_key = keys.public_key()?;

    let wrapped = codec::decode_key_envelope(key_envelope)?;
    let sealed = codec::decode_transport(transport_envelope)?;

    let payload_key = envelope::unwrap(&wrapped, public_key)?;
    let plaintext = cipher::open(&sealed, &payload_key)?;

    String::from_utf8(plaintext).map_err(|_| CryptoError::NotUtf8)
}
