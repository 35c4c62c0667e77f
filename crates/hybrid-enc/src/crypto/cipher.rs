//! AES-256-GCM authenticated encryption of the request payload.
//!
//! Every [`seal`] call generates a fresh one-time key and nonce from the OS
//! CSPRNG, so encrypting the same plaintext twice yields entirely different
//! output. The key exists only for the duration of the call chain and is
//! zeroed when dropped.
//!
//! The nonce is 128 bits rather than GCM's usual 96 — the transport format
//! carries a 16-byte nonce, and the GCM construction derives the counter
//! block through GHASH for non-96-bit nonces.

use aes_gcm::{
    aead::{
        consts::U16,
        rand_core::RngCore,
        AeadInPlace, KeyInit, OsRng,
    },
    aes::Aes256,
    AesGcm, Nonce, Tag,
};
use thiserror::Error;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of the nonce carried in the transport envelope.
pub const NONCE_LEN: usize = 16;

/// Byte length of the GCM authentication tag.
pub const TAG_LEN: usize = 16;

/// AES-256-GCM with a 128-bit nonce.
type PayloadCipher = AesGcm<Aes256, U16>;

/// One-time symmetric key generated per [`seal`] call.
///
/// Never persisted, logged, or reused. The backing memory is overwritten
/// with zeroes on drop.
pub struct PayloadKey(Box<[u8; KEY_LEN]>);

impl PayloadKey {
    /// Borrow the raw key bytes for wrapping.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl Drop for PayloadKey {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for PayloadKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("PayloadKey([REDACTED])")
    }
}

/// A sealed payload: ciphertext plus the non-secret values needed to open it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedPayload {
    /// Ciphertext, same length as the plaintext.
    pub ciphertext: Vec<u8>,
    /// Raw nonce bytes. Not secret; travels alongside the ciphertext.
    pub nonce: [u8; NONCE_LEN],
    /// Detached authentication tag.
    pub tag: [u8; TAG_LEN],
}

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid payload key length: expected {KEY_LEN} bytes")]
    InvalidKeyLength,

    /// AES-GCM encryption or decryption failed. On decryption this means the
    /// tag did not verify — the ciphertext, nonce, tag, or key is wrong.
    #[error("aead operation failed")]
    AeadFailure,
}

/// Encrypt `plaintext` under a freshly generated one-time key and nonce.
///
/// Returns the key separately from the sealed payload: the key is wrapped
/// asymmetrically and travels in its own envelope, never next to the
/// ciphertext.
///
/// # Errors
///
/// Returns [`CipherError::AeadFailure`] on an internal AEAD error (should be
/// unreachable with a freshly generated key and nonce).
pub fn seal(plaintext: &[u8]) -> Result<(PayloadKey, SealedPayload), CipherError> {
    let mut key = Box::new([0u8; KEY_LEN]);
    OsRng.fill_bytes(key.as_mut());
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let cipher = build_cipher(&key[..])?;
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::<U16>::from_slice(&nonce), b"", &mut buffer)
        .map_err(|_| CipherError::AeadFailure)?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(&tag);

    Ok((
        PayloadKey(key),
        SealedPayload {
            ciphertext: buffer,
            nonce,
            tag: tag_bytes,
        },
    ))
}

/// Verify and decrypt a [`SealedPayload`] with the recovered one-time key.
///
/// The authentication tag is verified before any plaintext is released; on
/// mismatch no partial output is produced.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`]
/// bytes, or [`CipherError::AeadFailure`] if authentication fails.
pub fn open(sealed: &SealedPayload, key: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key)?;
    let mut buffer = sealed.ciphertext.clone();
    cipher
        .decrypt_in_place_detached(
            Nonce::<U16>::from_slice(&sealed.nonce),
            b"",
            &mut buffer,
            Tag::<U16>::from_slice(&sealed.tag),
        )
        .map_err(|_| CipherError::AeadFailure)?;
    Ok(buffer)
}

fn build_cipher(key: &[u8]) -> Result<PayloadCipher, CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength);
    }
    PayloadCipher::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength)
}
