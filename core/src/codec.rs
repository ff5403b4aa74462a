//! # Text Codec
//!
//! Keys, signatures and hashes travel as URL-safe base64 **with** `=`
//! padding. Encoding is total; decoding checks the decoded length against
//! the fixed size of the artifact being parsed and refuses anything else.
//!
//! The length check is the only validation the rest of the crate relies on.
//! Whether 32 bytes form a valid curve point is the signer's problem, not
//! the codec's.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use thiserror::Error;

use crate::config::{SIGNATURE_LENGTH, SIGNING_KEY_LENGTH, TEXT_HASH_LENGTH};

/// What a piece of text is supposed to decode into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// A signing or verifying key.
    Key,
    /// An Ed25519 signature.
    Signature,
    /// A 32-byte object hash.
    Hash,
}

impl ArtifactKind {
    /// Decoded byte length required for this kind.
    pub const fn expected_len(self) -> usize {
        match self {
            ArtifactKind::Key => SIGNING_KEY_LENGTH,
            ArtifactKind::Signature => SIGNATURE_LENGTH,
            ArtifactKind::Hash => TEXT_HASH_LENGTH,
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ArtifactKind::Key => "key",
            ArtifactKind::Signature => "signature",
            ArtifactKind::Hash => "hash",
        })
    }
}

/// Errors from parsing text-encoded artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The text decoded cleanly but to the wrong number of bytes.
    #[error("invalid length for {kind}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        kind: ArtifactKind,
        expected: usize,
        actual: usize,
    },

    /// The text is not URL-safe base64 with canonical padding.
    #[error("malformed base64: {0}")]
    Malformed(#[from] base64::DecodeError),
}

/// Render bytes as padded URL-safe base64.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE.encode(bytes)
}

/// Decode `text` and require exactly `kind.expected_len()` bytes.
pub fn decode(text: &str, kind: ArtifactKind) -> Result<Vec<u8>, CodecError> {
    let bytes = URL_SAFE.decode(text)?;
    let expected = kind.expected_len();
    if bytes.len() != expected {
        return Err(CodecError::InvalidLength {
            kind,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Decode straight into a fixed-size array.
///
/// `N` must equal `kind.expected_len()`; the length error reports the
/// kind's size either way.
pub fn decode_fixed<const N: usize>(text: &str, kind: ArtifactKind) -> Result<[u8; N], CodecError> {
    debug_assert_eq!(N, kind.expected_len());
    let bytes = decode(text, kind)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| CodecError::InvalidLength {
            kind,
            expected: N,
            actual: bytes.len(),
        })
}

/// Text form of a 32-byte key, signing or verifying.
pub fn fmt_key(key: &[u8; SIGNING_KEY_LENGTH]) -> String {
    encode(key)
}

/// Parse a key's text form, which must decode to exactly 32 bytes.
pub fn unfmt_key(text: &str) -> Result<[u8; SIGNING_KEY_LENGTH], CodecError> {
    decode_fixed(text, ArtifactKind::Key)
}

/// Text form of a 64-byte signature.
pub fn fmt_sig(sig: &[u8; SIGNATURE_LENGTH]) -> String {
    encode(sig)
}

/// Parse a signature's text form. Anything but 64 bytes is rejected.
pub fn unfmt_sig(text: &str) -> Result<[u8; SIGNATURE_LENGTH], CodecError> {
    decode_fixed(text, ArtifactKind::Signature)
}

/// Text form of a 32-byte hash.
pub fn fmt_hash(hash: &[u8; TEXT_HASH_LENGTH]) -> String {
    encode(hash)
}

/// Parse a hash's text form, which must decode to exactly 32 bytes.
pub fn unfmt_hash(text: &str) -> Result<[u8; TEXT_HASH_LENGTH], CodecError> {
    decode_fixed(text, ArtifactKind::Hash)
}
