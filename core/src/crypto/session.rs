//! # Hash Session Registry
//!
//! Holds in-flight [`HashState`]s on behalf of callers that can only carry a
//! small integer between calls. A caller opens a session, gets a
//! [`SessionHandle`], pushes bytes through it any number of times, and
//! finally trades the handle for a digest.
//!
//! ## Design
//!
//! - One `parking_lot::Mutex` guards both the handle counter and the
//!   handle → state map. Allocation and lookup happen under the same lock,
//!   so two callers can never be handed the same handle and a finalize can
//!   never interleave with an update on the same session.
//! - Hashing in [`update`](HashSessionRegistry::update) runs with the lock
//!   held. SHA-512 is fast and sessions are short; correctness wins over
//!   throughput here.
//! - Handles come from a `u32` counter that wraps. After a wrap, handles that
//!   are still live are skipped, so a long-lived session is never aliased by
//!   a new one.
//! - Using a handle that is not live (never issued, already finalized, or
//!   aborted) is always [`SessionError::UnknownSession`]. The registry never
//!   panics on bad handles.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hash::{HashDigest, HashState};

/// Opaque token naming one live hash session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHandle(u32);

impl SessionHandle {
    /// Rebuild a handle from the raw integer a foreign caller held on to.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The handle does not name a live session.
    #[error("unknown hash session {0}")]
    UnknownSession(SessionHandle),
}

#[derive(Default)]
struct RegistryInner {
    next_handle: u32,
    sessions: HashMap<u32, HashState>,
}

impl RegistryInner {
    fn allocate(&mut self) -> u32 {
        loop {
            let candidate = self.next_handle;
            self.next_handle = self.next_handle.wrapping_add(1);
            if !self.sessions.contains_key(&candidate) {
                return candidate;
            }
            tracing::debug!(handle = candidate, "handle counter wrapped onto live session, skipping");
        }
    }
}

/// Handle → accumulator table.
///
/// Use [`HashSessionRegistry::global`] for the process-wide instance, or
/// [`HashSessionRegistry::new`] for an isolated one (tests, embedding).
#[derive(Default)]
pub struct HashSessionRegistry {
    inner: Mutex<RegistryInner>,
}

impl HashSessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by [`hash_init`](super::hash::hash_init) and
    /// friends. Built on first use.
    pub fn global() -> &'static HashSessionRegistry {
        static GLOBAL: OnceLock<HashSessionRegistry> = OnceLock::new();
        GLOBAL.get_or_init(HashSessionRegistry::new)
    }

    /// Start a new session and return its handle.
    pub fn open(&self) -> SessionHandle {
        let mut inner = self.inner.lock();
        let handle = inner.allocate();
        inner.sessions.insert(handle, HashState::new());
        tracing::trace!(handle, live = inner.sessions.len(), "hash session opened");
        SessionHandle(handle)
    }

    /// Append `data` to the session behind `handle`.
    pub fn update(&self, handle: SessionHandle, data: &[u8]) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        let state = inner
            .sessions
            .get_mut(&handle.0)
            .ok_or(SessionError::UnknownSession(handle))?;
        state.update(data);
        Ok(())
    }

    /// Finish the session, remove it, and return the digest of every byte
    /// it received. The handle is dead afterwards.
    pub fn finalize(&self, handle: SessionHandle) -> Result<HashDigest, SessionError> {
        let state = {
            let mut inner = self.inner.lock();
            inner
                .sessions
                .remove(&handle.0)
                .ok_or(SessionError::UnknownSession(handle))?
        };
        tracing::trace!(handle = handle.0, bytes = state.bytes_hashed(), "hash session finalized");
        Ok(state.finalize())
    }

    /// Drop the session without computing a digest.
    pub fn abort(&self, handle: SessionHandle) -> Result<(), SessionError> {
        let state = self
            .inner
            .lock()
            .sessions
            .remove(&handle.0)
            .ok_or(SessionError::UnknownSession(handle))?;
        tracing::trace!(handle = handle.0, bytes = state.bytes_hashed(), "hash session aborted");
        Ok(())
    }

    pub fn is_live(&self, handle: SessionHandle) -> bool {
        self.inner.lock().sessions.contains_key(&handle.0)
    }

    /// Number of sessions opened and not yet finalized or aborted.
    pub fn len(&self) -> usize {
        self.inner.lock().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    fn set_next_handle(&self, next: u32) {
        self.inner.lock().next_handle = next;
    }
}

impl fmt::Debug for HashSessionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("HashSessionRegistry")
            .field("next_handle", &inner.next_handle)
            .field("live", &inner.sessions.len())
            .finish()
    }
}
