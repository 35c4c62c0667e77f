//! Cryptographic core: payload cipher, key envelope, transport codec.
//!
//! This module is intentionally free of HTTP dependencies. It provides the
//! pure transforms composed by [`hybrid`] into the two public operations.
//!
//! # Wire format
//!
//! ```text
//! data1 = base64(rsa_private_wrap(payload_key))
//! data2 = base64(ciphertext) ":" base64(nonce) ":" base64(tag)
//! ```
//!
//! Base64 uses the standard padded alphabet, which never contains `:`, so the
//! colon framing is unambiguous.

pub mod cipher;
pub mod codec;
pub mod envelope;
pub mod hybrid;

pub use hybrid::{decrypt_payload, encrypt_payload, CryptoError};
