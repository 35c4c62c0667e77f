//! Wire-level codec for the two envelope strings.
//!
//! The transport envelope is three independently base64-encoded segments
//! joined by `:` in fixed order — ciphertext, nonce, tag. The base64 alphabet
//! never contains `:`, so the framing is unambiguous. The key envelope is a
//! single base64 string.
//!
//! Decoding is strict: exactly three segments, each valid base64, with the
//! nonce and tag decoding to their fixed lengths. A string that merely
//! "mostly" parses is rejected here rather than left for the cipher to choke
//! on.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use super::cipher::{SealedPayload, NONCE_LEN, TAG_LEN};

/// Segment separator for the transport envelope.
const SEPARATOR: char = ':';

/// Errors produced by the codec layer.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The transport envelope does not split into exactly three valid-base64
    /// segments with correctly sized nonce and tag.
    #[error("transport envelope is malformed")]
    MalformedTransport,

    /// The key envelope is not valid base64.
    #[error("key envelope is not valid base64")]
    MalformedKeyEnvelope,
}

/// Encode a sealed payload as `<ciphertext>:<nonce>:<tag>`.
pub fn encode_transport(sealed: &SealedPayload) -> String {
    format!(
        "{}{SEPARATOR}{}{SEPARATOR}{}",
        STANDARD.encode(&sealed.ciphertext),
        STANDARD.encode(sealed.nonce),
        STANDARD.encode(sealed.tag),
    )
}

/// Parse a transport envelope string back into a [`SealedPayload`].
///
/// The ciphertext segment may be empty (the empty string is valid base64 of
/// zero bytes — an empty plaintext must round-trip); the nonce and tag
/// segments must decode to exactly [`NONCE_LEN`] and [`TAG_LEN`] bytes.
///
/// # Errors
///
/// Returns [`CodecError::MalformedTransport`] on any structural failure.
pub fn decode_transport(s: &str) -> Result<SealedPayload, CodecError> {
    let parts: Vec<&str> = s.split(SEPARATOR).collect();
    if parts.len() != 3 {
        return Err(CodecError::MalformedTransport);
    }

    let ciphertext = STANDARD
        .decode(parts[0])
        .map_err(|_| CodecError::MalformedTransport)?;

    let nonce_bytes = STANDARD
        .decode(parts[1])
        .map_err(|_| CodecError::MalformedTransport)?;
    if nonce_bytes.len() != NONCE_LEN {
        return Err(CodecError::MalformedTransport);
    }
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&nonce_bytes);

    let tag_bytes = STANDARD
        .decode(parts[2])
        .map_err(|_| CodecError::MalformedTransport)?;
    if tag_bytes.len() != TAG_LEN {
        return Err(CodecError::MalformedTransport);
    }
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&tag_bytes);

    Ok(SealedPayload {
        ciphertext,
        nonce,
        tag,
    })
}

/// Encode a wrapped key as a single base64 string.
pub fn encode_key_envelope(envelope: &[u8]) -> String {
    STANDARD.encode(envelope)
}

/// Decode a base64 key envelope back to raw bytes.
///
/// # Errors
///
/// Returns [`CodecError::MalformedKeyEnvelope`] if `s` is not valid base64.
pub fn decode_key_envelope(s: &str) -> Result<Vec<u8>, CodecError> {
    STANDARD
        .decode(s)
        .map_err(|_| CodecError::MalformedKeyEnvelope)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SealedPayload {
        SealedPayload {
            ciphertext: b"some ciphertext bytes".to_vec(),
            nonce: [0x01; NONCE_LEN],
            tag: [0x02; TAG_LEN],
        }
    }

    #[test]
    fn transport_round_trip() {
        let sealed = sample();
        let encoded = encode_transport(&sealed);
        let decoded = decode_transport(&encoded).unwrap();
        assert_eq!(decoded, sealed);
    }

    #[test]
    fn transport_has_exactly_three_segments() {
        let encoded = encode_transport(&sample());
        assert_eq!(encoded.split(':').count(), 3);
    }

    #[test]
    fn segments_never_contain_the_separator() {
        // Base64 output stays inside [A-Za-z0-9+/=].
        let sealed = SealedPayload {
            ciphertext: (0u8..=255).collect(),
            nonce: [0xff; NONCE_LEN],
            tag: [0xff; TAG_LEN],
        };
        let encoded = encode_transport(&sealed);
        assert_eq!(encoded.matches(':').count(), 2);
    }

    #[test]
    fn empty_ciphertext_round_trips() {
        let sealed = SealedPayload {
            ciphertext: Vec::new(),
            nonce: [0x01; NONCE_LEN],
            tag: [0x02; TAG_LEN],
        };
        let encoded = encode_transport(&sealed);
        assert!(encoded.starts_with(':'));
        let decoded = decode_transport(&encoded).unwrap();
        assert!(decoded.ciphertext.is_empty());
    }

    #[test]
    fn rejects_too_few_segments() {
        assert!(decode_transport("onlyone").is_err());
        assert!(decode_transport("dHdv:cGFydHM=").is_err());
    }

    #[test]
    fn rejects_too_many_segments() {
        let encoded = encode_transport(&sample());
        assert!(decode_transport(&format!("{encoded}:extra")).is_err());
    }

    #[test]
    fn rejects_invalid_base64_segment() {
        let sealed = sample();
        let encoded = encode_transport(&sealed);
        let mut parts: Vec<String> = encoded.split(':').map(str::to_owned).collect();
        parts[0] = "!!!not-base64!!!".into();
        assert!(decode_transport(&parts.join(":")).is_err());
    }

    #[test]
    fn rejects_wrong_nonce_length() {
        let encoded = format!(
            "{}:{}:{}",
            STANDARD.encode(b"ct"),
            STANDARD.encode([0u8; 12]),
            STANDARD.encode([0u8; TAG_LEN]),
        );
        assert!(decode_transport(&encoded).is_err());
    }

    #[test]
    fn rejects_wrong_tag_length() {
        let encoded = format!(
            "{}:{}:{}",
            STANDARD.encode(b"ct"),
            STANDARD.encode([0u8; NONCE_LEN]),
            STANDARD.encode([0u8; 8]),
        );
        assert!(decode_transport(&encoded).is_err());
    }

    #[test]
    fn key_envelope_round_trip() {
        let envelope = vec![0x5au8; 128];
        let encoded = encode_key_envelope(&envelope);
        assert_eq!(decode_key_envelope(&encoded).unwrap(), envelope);
    }

    #[test]
    fn key_envelope_rejects_invalid_base64() {
        assert!(decode_key_envelope("invalid-base64!@#").is_err());
    }
}
