//! # Signing and Verification
//!
//! Ed25519 over messages that may be split across several buffers.
//!
//! Real call sites sign structured records: a header here, a payload there,
//! maybe a trailer borrowed from somewhere else. Copying them into one
//! buffer just to sign is wasted work, so [`sign_vector`] takes the pieces
//! as a list of slices and streams them straight into the two SHA-512
//! computations Ed25519 performs. The output is bit-for-bit the standard
//! signature over the concatenation, which is why there is no separate
//! vector verify: [`verify_blob`] over the joined bytes is the check.
//!
//! Segment order is part of the signed content. `["ab", "c"]` and
//! `["a", "bc"]` sign the same message; `["c", "ab"]` does not.
//!
//! ## Both keys on the signing path
//!
//! Ed25519 hashes the public key into every signature. We take the
//! verifying key from the caller instead of re-deriving it. A mismatched
//! pair therefore signs without complaint and produces signatures that never
//! verify, which is what [`check_keypair`] is for.

use ed25519_dalek::hazmat::{raw_sign_byupdate, ExpandedSecretKey};
use ed25519_dalek::{
    Signature as DalekSignature, SignatureError as DalekSignatureError, Verifier,
    VerifyingKey as DalekVerifyingKey,
};
use sha2::{Digest, Sha512};
use thiserror::Error;

use super::keys::{Signature, SigningKey, VerifyingKey};
use crate::config::{KEYPAIR_CHECK_FILL, KEYPAIR_CHECK_LENGTH};

/// Errors during signing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The verifying key bytes do not decode to a curve point.
    #[error("invalid verifying key: not a valid Ed25519 point")]
    InvalidVerifyingKey,
}

/// A read-only view of several byte slices as one logical message.
///
/// Nothing is copied; iteration walks the original slices in order.
#[derive(Debug, Clone, Copy)]
pub struct Segments<'a> {
    parts: &'a [&'a [u8]],
}

impl<'a> Segments<'a> {
    pub fn new(parts: &'a [&'a [u8]]) -> Self {
        Self { parts }
    }

    /// Total length of the logical message in bytes.
    pub fn len(&self) -> usize {
        self.parts.iter().map(|p| p.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|p| p.is_empty())
    }

    pub fn segment_count(&self) -> usize {
        self.parts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        self.parts.iter().copied()
    }

    /// Push every segment, in order, into `digest`.
    pub fn feed<D: Digest>(&self, digest: &mut D) {
        for part in self.parts {
            digest.update(part);
        }
    }

    /// The concatenation, materialized. For tests and debugging; the signing
    /// path never calls this.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for part in self.parts {
            out.extend_from_slice(part);
        }
        out
    }
}

/// Sign the concatenation of `segments` without building it.
///
/// Empty segments, and an empty list, are fine: they add nothing to the
/// message.
pub fn sign_vector(
    signing_key: &SigningKey,
    verifying_key: &VerifyingKey,
    segments: &[&[u8]],
) -> Result<Signature, SignatureError> {
    let dalek_vk = DalekVerifyingKey::from_bytes(verifying_key.as_bytes())
        .map_err(|_| SignatureError::InvalidVerifyingKey)?;
    let expanded = ExpandedSecretKey::from(signing_key.as_bytes());
    let view = Segments::new(segments);

    let signature = raw_sign_byupdate::<Sha512, _>(
        &expanded,
        |digest: &mut Sha512| -> Result<(), DalekSignatureError> {
            view.feed(digest);
            Ok(())
        },
        &dalek_vk,
    )
    // The update closure above cannot fail.
    .map_err(|_| SignatureError::InvalidVerifyingKey)?;

    tracing::trace!(
        segments = view.segment_count(),
        bytes = view.len(),
        "signed message vector"
    );
    Ok(Signature::from_bytes(signature.to_bytes()))
}

/// Sign a single contiguous message.
pub fn sign_blob(
    signing_key: &SigningKey,
    verifying_key: &VerifyingKey,
    message: &[u8],
) -> Result<Signature, SignatureError> {
    sign_vector(signing_key, verifying_key, &[message])
}

/// Check `signature` over `message` against `verifying_key`.
///
/// Returns `false` for any mismatch, including a verifying key that is not
/// a curve point. A failed check is an ordinary answer, not an error.
pub fn verify_blob(verifying_key: &VerifyingKey, signature: &Signature, message: &[u8]) -> bool {
    let Ok(dalek_vk) = DalekVerifyingKey::from_bytes(verifying_key.as_bytes()) else {
        return false;
    };
    let dalek_sig = DalekSignature::from_bytes(signature.as_bytes());
    dalek_vk.verify(message, &dalek_sig).is_ok()
}

/// Whether `signing_key` and `verifying_key` belong together.
///
/// Signs a fixed plaintext with the pair and verifies the result.
pub fn check_keypair(signing_key: &SigningKey, verifying_key: &VerifyingKey) -> bool {
    tracing::debug!(verifying_key = %verifying_key, "checking keypair");
    let plaintext = [KEYPAIR_CHECK_FILL; KEYPAIR_CHECK_LENGTH];
    match sign_blob(signing_key, verifying_key, &plaintext) {
        Ok(signature) => verify_blob(verifying_key, &signature, &plaintext),
        Err(err) => {
            tracing::debug!(error = %err, "keypair check could not sign");
            false
        }
    }
}
