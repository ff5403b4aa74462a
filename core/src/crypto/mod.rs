//! # Cryptographic Primitives
//!
//! Everything that touches key material or hashes flows through here.
//!
//! - **Ed25519** (`ed25519-dalek`) for signatures, including signatures over
//!   messages split into several buffers.
//! - **SHA-512** (`sha2`) for digests, one-shot or incremental, with an
//!   optional handle-based session layer for callers that cannot keep a
//!   hasher object alive between calls.
//! - **OS randomness** (`rand::rngs::OsRng`) for callers that need raw
//!   random bytes.
//!
//! Nothing here implements curve arithmetic or a hash compression function.
//! These are thin, typed wrappers around audited crates.

pub mod hash;
pub mod keys;
pub mod random;
pub mod session;
pub mod signatures;

pub use hash::{hash_final, hash_init, hash_update, sha512, sha512_multi, HashDigest, HashState};
pub use keys::{generate_keypair, is_presentable, Keypair, Signature, SigningKey, VerifyingKey};
pub use random::{fill_random, random_bytes, RandomError};
pub use session::{HashSessionRegistry, SessionError, SessionHandle};
pub use signatures::{
    check_keypair, sign_blob, sign_vector, verify_blob, Segments, SignatureError,
};
