//! Error types shared across the store, coalescer, Group, and HTTP
//! transport.

use std::fmt;

/// Errors a [`Group`](crate::group::Group) read can surface to its caller.
///
/// Cloneable so the single-flight coalescer can hand the same error to every
/// waiter on a failed load (Section 8 property 3 of the design: all callers
/// in an overlapping burst observe the same `(value, error)` pair).
#[derive(Debug, Clone, thiserror::Error)]
pub enum GroupError {
    /// `Group::get` was called with an empty key.
    #[error("key is empty")]
    EmptyKey,

    /// `GetGroup`/the HTTP transport looked up a name with no registered
    /// group.
    #[error("no such group: {0}")]
    UnknownGroup(String),

    /// The caller-supplied loader returned an error.
    #[error("loader error: {0}")]
    Loader(String),

    /// A peer fetch failed (transport or remote-side). Always recovered
    /// from internally by falling back to the local loader; only reaches a
    /// caller if the fallback also fails, wrapped as a `Loader` error noting
    /// the original cause.
    #[error("peer fetch failed: {0}")]
    Peer(String),

    /// The loader task panicked or was cancelled.
    #[error("loader task did not complete: {0}")]
    Join(String),

    /// `Group::register_peers` was called a second time on the same group.
    #[error("peers already registered for group: {0}")]
    PeersAlreadyRegistered(String),
}

impl GroupError {
    pub(crate) fn loader(err: impl fmt::Display) -> Self {
        GroupError::Loader(err.to_string())
    }

    pub(crate) fn peer(err: impl fmt::Display) -> Self {
        GroupError::Peer(err.to_string())
    }
}
