//! # Keys and Signatures
//!
//! Fixed-size value types for Ed25519 material, plus key generation.
//!
//! The types here are plain byte holders. A `VerifyingKey` is not checked
//! to be a valid curve point when it is built; that check happens when it
//! is actually used to sign or verify, and fails closed there.
//!
//! ## Key generation
//!
//! [`generate_keypair`] keeps drawing fresh pairs until the verifying key's
//! text form does not start with [`RESERVED_KEY_MARKER`]. The loop is split
//! into a generic retry combinator ([`regenerate_until`]), a generator
//! ([`Keypair::generate_unchecked`]) and a predicate ([`is_presentable`]) so
//! each piece can be tested and reasoned about alone.
//!
//! Key bytes are never logged, and `Debug` on secret material is redacted.
//! Signing keys are zeroized on drop and deliberately have no `PartialEq`;
//! compare `as_bytes()` in tests if you must.

use std::fmt;
use std::str::FromStr;

use ed25519_dalek::SigningKey as DalekSigningKey;
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::codec::{self, CodecError};
use crate::config::{
    RESERVED_KEY_MARKER, SIGNATURE_LENGTH, SIGNING_KEY_LENGTH, VERIFYING_KEY_LENGTH,
};

use super::signatures::{self, SignatureError};

/// The 32-byte Ed25519 seed. Whoever holds this can sign.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningKey([u8; SIGNING_KEY_LENGTH]);

/// The 32-byte public half of a keypair.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerifyingKey([u8; VERIFYING_KEY_LENGTH]);

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

/// A signing key together with the verifying key it is used with.
///
/// Pairs built by [`generate_keypair`] or [`Keypair::from_seed`] always
/// match. Pairs built by [`Keypair::from_bytes`] are taken on trust; use
/// [`signatures::check_keypair`] to test them.
#[derive(Clone)]
pub struct Keypair {
    signing: SigningKey,
    verifying: VerifyingKey,
}

// ---------------------------------------------------------------------------
// SigningKey
// ---------------------------------------------------------------------------

impl SigningKey {
    pub fn from_bytes(bytes: [u8; SIGNING_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNING_KEY_LENGTH] {
        &self.0
    }

    /// Text form. Treat the result as secret.
    pub fn to_text(&self) -> String {
        codec::fmt_key(&self.0)
    }
}

impl FromStr for SigningKey {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = Zeroizing::new(codec::unfmt_key(s)?);
        Ok(Self(*bytes))
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// VerifyingKey
// ---------------------------------------------------------------------------

impl VerifyingKey {
    pub fn from_bytes(bytes: [u8; VERIFYING_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; VERIFYING_KEY_LENGTH] {
        &self.0
    }

    /// Verify `signature` over `message`. See [`signatures::verify_blob`].
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        signatures::verify_blob(self, signature, message)
    }
}

impl FromStr for VerifyingKey {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::unfmt_key(s).map(Self)
    }
}

impl fmt::Display for VerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::fmt_key(&self.0))
    }
}

impl fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VerifyingKey({})", self)
    }
}

impl Serialize for VerifyingKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for VerifyingKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

impl Signature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; SIGNATURE_LENGTH] {
        self.0
    }
}

impl FromStr for Signature {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::unfmt_sig(s).map(Self)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::fmt_sig(&self.0))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_string();
        write!(f, "Signature({}...{})", &text[..8], &text[text.len() - 8..])
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Keypair
// ---------------------------------------------------------------------------

impl Keypair {
    /// Pair up externally supplied keys. Nothing is checked.
    pub fn from_bytes(
        signing: [u8; SIGNING_KEY_LENGTH],
        verifying: [u8; VERIFYING_KEY_LENGTH],
    ) -> Self {
        Self {
            signing: SigningKey(signing),
            verifying: VerifyingKey(verifying),
        }
    }

    /// Deterministic pair from a seed. Does not apply the marker check.
    pub fn from_seed(seed: &[u8; SIGNING_KEY_LENGTH]) -> Self {
        let dalek = DalekSigningKey::from_bytes(seed);
        Self::from_dalek(&dalek)
    }

    /// One fresh pair from the OS RNG, with no presentation check.
    pub fn generate_unchecked() -> Self {
        Self::from_dalek(&DalekSigningKey::generate(&mut OsRng))
    }

    fn from_dalek(dalek: &DalekSigningKey) -> Self {
        Self {
            signing: SigningKey(dalek.to_bytes()),
            verifying: VerifyingKey(dalek.verifying_key().to_bytes()),
        }
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.signing
    }

    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying
    }

    pub fn into_parts(self) -> (SigningKey, VerifyingKey) {
        (self.signing, self.verifying)
    }

    pub fn sign(&self, message: &[u8]) -> Result<Signature, SignatureError> {
        signatures::sign_blob(&self.signing, &self.verifying, message)
    }

    pub fn sign_vector(&self, segments: &[&[u8]]) -> Result<Signature, SignatureError> {
        signatures::sign_vector(&self.signing, &self.verifying, segments)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair(vk={})", self.verifying)
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Call `generate` until `accept` returns true for its output.
///
/// There is no attempt limit. Callers pick predicates that almost every
/// candidate satisfies.
pub fn regenerate_until<T>(mut generate: impl FnMut() -> T, accept: impl Fn(&T) -> bool) -> T {
    loop {
        let candidate = generate();
        if accept(&candidate) {
            return candidate;
        }
    }
}

/// Whether `key`'s text form is safe to show and paste.
///
/// A text key starting with [`RESERVED_KEY_MARKER`] is misread as an
/// option flag by command-line parsers and collides with reserved prefixes
/// in the URI syntax keys are embedded in. This is a presentation rule, not
/// a cryptographic one.
pub fn is_presentable(key: &VerifyingKey) -> bool {
    !codec::fmt_key(&key.0).starts_with(RESERVED_KEY_MARKER)
}

/// Generate a fresh keypair whose verifying key [`is_presentable`].
pub fn generate_keypair() -> Keypair {
    let mut attempts = 0u32;
    let keypair = regenerate_until(
        || {
            attempts += 1;
            Keypair::generate_unchecked()
        },
        |kp| is_presentable(kp.verifying_key()),
    );
    if attempts > 1 {
        tracing::debug!(attempts, "regenerated keypair to avoid reserved marker");
    }
    keypair
}
