//! [`KeyRing`]: immutable process-lifetime holder of the RSA key pair.
//!
//! The key pair is parsed from PEM once at startup and injected into the
//! request handlers through shared state — never read from the environment
//! at call time. There is no rotation and no multi-key support: the ring is
//! read-only for the life of the process, so concurrent access needs no
//! locking.
//!
//! Either half may be absent. A missing (or unparsable) private key makes
//! encryption unavailable; a missing public key makes decryption
//! unavailable. The affected operation fails per call with a configuration
//! error while the other keeps working.

use rsa::{
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    pkcs8::{DecodePrivateKey, DecodePublicKey},
    RsaPrivateKey, RsaPublicKey,
};
use thiserror::Error;
use tracing::warn;

use crate::config::Config;

/// Errors produced when required key material is unavailable.
#[derive(Debug, Error)]
pub enum KeyRingError {
    /// No usable RSA private key is configured; encryption cannot proceed.
    #[error("rsa private key is not configured or could not be parsed")]
    PrivateKeyUnavailable,

    /// No usable RSA public key is configured; decryption cannot proceed.
    #[error("rsa public key is not configured or could not be parsed")]
    PublicKeyUnavailable,
}

/// The process-wide RSA key pair, parsed once at startup.
pub struct KeyRing {
    private: Option<RsaPrivateKey>,
    public: Option<RsaPublicKey>,
}

impl KeyRing {
    /// Build a ring from already-parsed keys.
    pub fn new(private: Option<RsaPrivateKey>, public: Option<RsaPublicKey>) -> Self {
        Self { private, public }
    }

    /// An empty ring with no key material. Suitable for tests.
    pub fn empty() -> Self {
        Self::new(None, None)
    }

    /// Parse the PEM strings from configuration.
    ///
    /// A PEM that is present but unparsable logs a warning and leaves that
    /// slot empty — the service still starts, and the affected operation
    /// fails per call.
    pub fn from_config(cfg: &Config) -> Self {
        let private = cfg.rsa_private_key.as_deref().and_then(|pem| {
            let parsed = parse_private_pem(pem);
            if parsed.is_none() {
                warn!("RSA_PRIVATE_KEY is present but could not be parsed; encryption is unavailable");
            }
            parsed
        });

        let public = cfg.rsa_public_key.as_deref().and_then(|pem| {
            let parsed = parse_public_pem(pem);
            if parsed.is_none() {
                warn!("RSA_PUBLIC_KEY is present but could not be parsed; decryption is unavailable");
            }
            parsed
        });

        Self::new(private, public)
    }

    /// Borrow the private key, or fail if encryption is unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`KeyRingError::PrivateKeyUnavailable`] if no usable private
    /// key was configured.
    pub fn private_key(&self) -> Result<&RsaPrivateKey, KeyRingError> {
        self.private
            .as_ref()
            .ok_or(KeyRingError::PrivateKeyUnavailable)
    }

    /// Borrow the public key, or fail if decryption is unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`KeyRingError::PublicKeyUnavailable`] if no usable public key
    /// was configured.
    pub fn public_key(&self) -> Result<&RsaPublicKey, KeyRingError> {
        self.public
            .as_ref()
            .ok_or(KeyRingError::PublicKeyUnavailable)
    }

    /// Whether the encrypt operation has its key material.
    pub fn encrypt_ready(&self) -> bool {
        self.private.is_some()
    }

    /// Whether the decrypt operation has its key material.
    pub fn decrypt_ready(&self) -> bool {
        self.public.is_some()
    }
}

impl std::fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Report presence only; never print key material.
        f.debug_struct("KeyRing")
            .field("private", &self.private.is_some())
            .field("public", &self.public.is_some())
            .finish()
    }
}

/// Accept PKCS#8 (`BEGIN PRIVATE KEY`) or PKCS#1 (`BEGIN RSA PRIVATE KEY`) PEM.
fn parse_private_pem(pem: &str) -> Option<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .ok()
        .or_else(|| RsaPrivateKey::from_pkcs1_pem(pem).ok())
}

/// Accept SPKI (`BEGIN PUBLIC KEY`) or PKCS#1 (`BEGIN RSA PUBLIC KEY`) PEM.
fn parse_public_pem(pem: &str) -> Option<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem)
        .ok()
        .or_else(|| RsaPublicKey::from_pkcs1_pem(pem).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};

    fn test_config(private_pem: Option<String>, public_pem: Option<String>) -> Config {
        Config {
            rsa_private_key: private_pem,
            rsa_public_key: public_pem,
            port: 3000,
            log_level: "info".into(),
        }
    }

    fn test_pems() -> (String, String) {
        let private_key =
            RsaPrivateKey::new(&mut rand::rngs::OsRng, 1024).expect("generate test key");
        let private_pem = private_key
            .to_pkcs8_pem(LineEnding::LF)
            .expect("encode private pem")
            .to_string();
        let public_pem = private_key
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)
            .expect("encode public pem");
        (private_pem, public_pem)
    }

    #[test]
    fn parses_both_keys_from_config() {
        let (private_pem, public_pem) = test_pems();
        let ring = KeyRing::from_config(&test_config(Some(private_pem), Some(public_pem)));
        assert!(ring.encrypt_ready());
        assert!(ring.decrypt_ready());
        assert!(ring.private_key().is_ok());
        assert!(ring.public_key().is_ok());
    }

    #[test]
    fn missing_private_key_fails_per_call() {
        let (_, public_pem) = test_pems();
        let ring = KeyRing::from_config(&test_config(None, Some(public_pem)));
        assert!(!ring.encrypt_ready());
        assert!(matches!(
            ring.private_key(),
            Err(KeyRingError::PrivateKeyUnavailable)
        ));
        assert!(ring.public_key().is_ok());
    }

    #[test]
    fn missing_public_key_fails_per_call() {
        let (private_pem, _) = test_pems();
        let ring = KeyRing::from_config(&test_config(Some(private_pem), None));
        assert!(matches!(
            ring.public_key(),
            Err(KeyRingError::PublicKeyUnavailable)
        ));
    }

    #[test]
    fn garbage_pem_leaves_slot_empty() {
        let ring = KeyRing::from_config(&test_config(
            Some("not a pem".into()),
            Some("also not a pem".into()),
        ));
        assert!(!ring.encrypt_ready());
        assert!(!ring.decrypt_ready());
    }

    #[test]
    fn debug_never_prints_key_material() {
        let (private_pem, public_pem) = test_pems();
        let ring = KeyRing::from_config(&test_config(Some(private_pem), Some(public_pem)));
        let rendered = format!("{ring:?}");
        assert_eq!(rendered, "KeyRing { private: true, public: true }");
    }
}
