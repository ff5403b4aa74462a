// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # vecsign
//!
//! Ed25519 signatures over messages that arrive in pieces, and a SHA-512
//! service that can be driven one call at a time by callers that only hold
//! an integer handle.
//!
//! ## Modules
//!
//! - **crypto**: keys, signing, verification, digests, hash sessions and
//!   OS randomness.
//! - **codec**: the URL-safe base64 text form of keys, signatures and hashes.
//! - **config**: every length and marker value in one place.
//!
//! ## Quick look
//!
//! ```
//! use vecsign::crypto::{generate_keypair, sign_vector, verify_blob};
//!
//! let kp = generate_keypair();
//! let header = b"v1|".as_slice();
//! let body = b"payload".as_slice();
//! let sig = sign_vector(kp.signing_key(), kp.verifying_key(), &[header, body]).unwrap();
//! assert!(verify_blob(kp.verifying_key(), &sig, b"v1|payload"));
//! ```
//!
//! ```
//! use vecsign::crypto::{hash_final, hash_init, hash_update, sha512};
//!
//! let handle = hash_init();
//! hash_update(handle, b"hello ").unwrap();
//! hash_update(handle, b"world").unwrap();
//! assert_eq!(hash_final(handle).unwrap(), sha512(b"hello world"));
//! ```

pub mod codec;
pub mod config;
pub mod crypto;

pub use codec::{ArtifactKind, CodecError};
pub use crypto::{
    check_keypair, generate_keypair, random_bytes, sign_blob, sign_vector, verify_blob, HashDigest,
    Keypair, RandomError, SessionError, SessionHandle, Signature, SignatureError, SigningKey,
    VerifyingKey,
};
