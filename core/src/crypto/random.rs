//! # Random Bytes
//!
//! OS-backed randomness for callers that need nonces, salts or seeds and
//! would otherwise have to bring their own RNG. Reads go straight to
//! [`OsRng`]; nothing is buffered or reseeded here.

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RandomError {
    #[error("operating system RNG unavailable: {0}")]
    Unavailable(#[from] rand::Error),
}

/// Fill `dest` with bytes from the operating system RNG.
///
/// An empty `dest` is a no-op.
pub fn fill_random(dest: &mut [u8]) -> Result<(), RandomError> {
    if dest.is_empty() {
        return Ok(());
    }
    OsRng.try_fill_bytes(dest)?;
    tracing::trace!(len = dest.len(), "filled random bytes");
    Ok(())
}

/// `len` fresh random bytes.
pub fn random_bytes(len: usize) -> Result<Vec<u8>, RandomError> {
    let mut out = vec![0u8; len];
    fill_random(&mut out)?;
    Ok(out)
}
