//! The Group orchestrator (Section 4.4): ties the local store, the
//! single-flight coalescer, and the peer selector together behind one
//! `get(key)` entry point.
//!
//! A process may host several groups (e.g. one per logical dataset), each
//! named and independently configured. Groups are looked up by name through
//! a process-global registry, mirroring the original's package-level
//! `NewGroup`/`GetGroup` pair.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, trace, warn};

use crate::byte_view::ByteView;
use crate::config::Config;
use crate::error::GroupError;
use crate::peer::PeerPicker;
use crate::singleflight::Coalescer;
use crate::store::Store;

/// Caller-supplied fallback for keys missing from every cache, local or
/// remote (Section 4's "Loader" role).
#[async_trait]
pub trait Loader: Send + Sync {
    /// Produces the value for `key`. Called at most once per overlapping
    /// burst of misses, and only on the peer that owns `key` (or locally, if
    /// no peer does or the peer fetch failed).
    async fn load(&self, key: &str) -> Result<ByteView, GroupError>;
}

/// A named, independently configured cache.
pub struct Group {
    name: String,
    store: Mutex<Store<ByteView>>,
    coalescer: Coalescer<ByteView>,
    loader: Arc<dyn Loader>,
    peers: RwLock<Option<Arc<dyn PeerPicker>>>,
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Group {
    fn new(name: String, config: &Config, loader: Arc<dyn Loader>) -> Self {
        Group {
            name,
            store: Mutex::new(Store::new(config.cache_bytes, None)),
            coalescer: Coalescer::new(),
            loader,
            peers: RwLock::new(None),
        }
    }

    /// Group name, as passed to [`new_group`].
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Installs the peer selector this group fetches remote keys through.
    /// May be called at most once; a second call returns
    /// [`GroupError::PeersAlreadyRegistered`] without disturbing the first
    /// registration.
    pub fn register_peers(&self, picker: Arc<dyn PeerPicker>) -> Result<(), GroupError> {
        let mut slot = self.peers.write();
        if slot.is_some() {
            return Err(GroupError::PeersAlreadyRegistered(self.name.clone()));
        }
        *slot = Some(picker);
        info!(group = %self.name, "registered peer picker");
        Ok(())
    }

    /// Reads `key`: local cache, then (if a peer owns it) the remote peer,
    /// then the loader, in that order, each step only run on a miss from the
    /// one before it. A successful peer fetch is returned without touching
    /// the local cache, each peer already owns a slice of the keyspace, so
    /// duplicating a remote-owned key into every requester's LRU would just
    /// dilute the cluster's effective cache size. A key is cached locally
    /// only when the loader ran locally: no peer owns the key, or the peer
    /// fetch failed and the node fell back to its own loader.
    pub async fn get(&self, key: &str) -> Result<ByteView, GroupError> {
        if key.is_empty() {
            return Err(GroupError::EmptyKey);
        }

        if let Some(value) = self.store.lock().get(key) {
            trace!(group = %self.name, key, "local cache hit");
            return Ok(value);
        }
        trace!(group = %self.name, key, "local cache miss");

        self.coalescer.do_once(key, || self.load(key)).await
    }

    async fn load(&self, key: &str) -> Result<ByteView, GroupError> {
        let peer = self.peers.read().as_ref().and_then(|picker| picker.pick_peer(key));

        if let Some(peer) = peer {
            debug!(group = %self.name, key, "routing to peer");
            match peer.get(&self.name, key).await {
                // Owned by a peer; that peer's own `load` is the one that
                // populates its local cache. Not ours to duplicate here.
                Ok(value) => return Ok(value),
                Err(err) => {
                    warn!(group = %self.name, key, error = %err, "peer fetch failed, falling back to loader");
                    let value = self.loader.load(key).await?;
                    self.store.lock().add(key.to_string(), value.clone());
                    return Ok(value);
                }
            }
        }

        let value = self.loader.load(key).await?;
        self.store.lock().add(key.to_string(), value.clone());
        Ok(value)
    }
}

type Registry = RwLock<HashMap<String, Arc<Group>>>;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Creates and registers a new group, replacing any prior group of the same
/// name. Mirrors the reference implementation's package-level `NewGroup`,
/// which is likewise last-writer-wins across the process.
pub fn new_group(name: impl Into<String>, config: Config, loader: Arc<dyn Loader>) -> Arc<Group> {
    let name = name.into();
    let group = Arc::new(Group::new(name.clone(), &config, loader));
    registry().write().insert(name.clone(), Arc::clone(&group));
    info!(group = %name, cache_bytes = config.cache_bytes, "group registered");
    group
}

/// Looks up a previously registered group by name.
pub fn get_group(name: &str) -> Option<Arc<Group>> {
    registry().read().get(name).cloned()
}
