//! # Protocol Constants
//!
//! Every fixed size and magic value used by vecsign lives here. The codec,
//! the signer and the session registry all read from this module, so a
//! length only ever has one source of truth.

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// The signature scheme behind every sign/verify call.
pub const SIGNING_ALGORITHM: &str = "Ed25519";

/// Signing key length in bytes. Ed25519 secret keys are 32-byte seeds.
pub const SIGNING_KEY_LENGTH: usize = 32;

/// Verifying (public) key length in bytes.
pub const VERIFYING_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// The hash function behind the digest engine and the session registry.
/// It is also the hash Ed25519 uses internally, which is why the two share
/// a crate.
pub const HASH_ALGORITHM: &str = "SHA-512";

/// Digest output length in bytes (512 bits).
pub const DIGEST_LENGTH: usize = 64;

/// Decoded length of a hash in its text form. Hashes exchanged as text are
/// 32-byte object identifiers, not full SHA-512 digests, so they share the
/// key length.
pub const TEXT_HASH_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Leading character that a freshly generated verifying key must never have
/// in its text form.
///
/// Keys are routinely passed on command lines and embedded in URIs where a
/// leading `-` reads as an option flag or a reserved prefix. Roughly one key
/// in 64 would start with it; those are regenerated.
pub const RESERVED_KEY_MARKER: char = '-';

// ---------------------------------------------------------------------------
// Keypair self-check
// ---------------------------------------------------------------------------

/// Length of the plaintext signed by the keypair self-check.
pub const KEYPAIR_CHECK_LENGTH: usize = 128;

/// Byte value the self-check plaintext is filled with.
pub const KEYPAIR_CHECK_FILL: u8 = 0xAF;
