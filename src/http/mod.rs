//! HTTP peer transport (Section 4.6): the default `PeerPicker`/`PeerGetter`
//! pairing, wiring a process's consistent-hash ring to a concrete wire
//! protocol.
//!
//! Grounded on the reference implementation's `http.go`: one mount point
//! serving `GET <base_path>/<group>/<key>`, percent-encoded path segments,
//! and server-side log lines carrying the serving peer's own address.
//!
//! Gated behind the `http` feature, a process embedding only the local
//! cache (no peers) can build without `axum`/`reqwest`.

mod client;
mod server;

pub use client::HttpPeerClient;
pub use server::serve;

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::config::Config;
use crate::consistent_hash::Ring;
use crate::peer::{PeerGetter, PeerPicker};

/// This process's view of the peer ring, and the factory for HTTP-backed
/// [`PeerGetter`]s pointing at the other members.
///
/// `self_addr` is excluded from routing: [`HttpPool::pick_peer`] returns
/// `None` whenever the ring resolves a key back to this same address, so
/// `Group` falls through to its local loader instead of making a loopback
/// HTTP call (Section 4.5).
pub struct HttpPool {
    self_addr: String,
    base_path: String,
    replicas: usize,
    hasher: fn(&[u8]) -> u32,
    ring: RwLock<Ring>,
    client: reqwest::Client,
}

impl HttpPool {
    /// Builds a pool for `self_addr` (this process's own address, e.g.
    /// `"http://10.0.0.1:8080"`) with no peers configured yet. Call
    /// [`HttpPool::set_peers`] before any key resolves to a remote peer.
    pub fn new(self_addr: impl Into<String>, config: &Config) -> Self {
        HttpPool {
            self_addr: self_addr.into(),
            base_path: config.base_path.clone(),
            replicas: config.replicas,
            hasher: config.hasher,
            ring: RwLock::new(Ring::new(config.replicas, config.hasher)),
            client: reqwest::Client::new(),
        }
    }

    /// This process's own address, as passed to [`HttpPool::new`].
    pub fn self_addr(&self) -> &str {
        &self.self_addr
    }

    /// Replaces the ring membership wholesale. Peers not in `addrs` are
    /// dropped; `addrs` should include `self_addr` if this process also
    /// serves keys from its own ring share.
    pub fn set_peers(&self, addrs: &[String]) {
        let mut ring = Ring::new(self.replicas, self.hasher);
        ring.add(addrs.iter().cloned());
        *self.ring.write() = ring;
        info!(self_addr = %self.self_addr, peers = addrs.len(), "peer ring reconfigured");
    }

    #[cfg(test)]
    fn resolve_raw(&self, key: &str) -> Option<String> {
        self.ring.read().get(key).map(str::to_string)
    }
}

impl PeerPicker for HttpPool {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>> {
        let ring = self.ring.read();
        let addr = ring.get(key)?;
        if addr == self.self_addr {
            return None;
        }
        Some(Arc::new(HttpPeerClient::new(
            self.client.clone(),
            addr.to_string(),
            self.base_path.clone(),
        )))
    }
}
