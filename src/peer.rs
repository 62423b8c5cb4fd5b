//! Peer selector and peer fetch contracts (Section 4.5).
//!
//! `Group` depends only on these two traits, never on HTTP directly, the
//! [`http`](crate::http) module is one possible transport, supplied to a
//! group through [`Group::register_peers`](crate::group::Group::register_peers).
//! Tests exercise `Group` against an in-memory `PeerPicker`/`PeerGetter` pair
//! with no networking involved.

use std::sync::Arc;

use async_trait::async_trait;

use crate::byte_view::ByteView;
use crate::error::GroupError;

/// Fetches a key from one specific remote peer.
#[async_trait]
pub trait PeerGetter: Send + Sync {
    /// Fetches `key` from `group` on this peer. Implementations should map
    /// connection and remote-side failures to [`GroupError::Peer`], callers
    /// always treat a peer failure as recoverable and fall back to the local
    /// loader.
    async fn get(&self, group: &str, key: &str) -> Result<ByteView, GroupError>;
}

/// Resolves which peer, if any other than the local process, owns a key.
pub trait PeerPicker: Send + Sync {
    /// Returns the remote peer responsible for `key`, or `None` if the key
    /// resolves to the local process or no peers are configured. Resolution
    /// is a pure function of current ring membership (Section 8, property 4).
    /// Implementations must not consult the local cache or loader.
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct StubPeer {
        values: HashMap<(String, String), ByteView>,
    }

    #[async_trait]
    impl PeerGetter for StubPeer {
        async fn get(&self, group: &str, key: &str) -> Result<ByteView, GroupError> {
            self.values
                .get(&(group.to_string(), key.to_string()))
                .cloned()
                .ok_or_else(|| GroupError::peer("not found on stub peer"))
        }
    }

    struct StubPicker {
        peer: Option<Arc<dyn PeerGetter>>,
        calls: Mutex<Vec<String>>,
    }

    impl PeerPicker for StubPicker {
        fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>> {
            self.calls.lock().unwrap().push(key.to_string());
            self.peer.clone()
        }
    }

    #[tokio::test]
    async fn picker_returns_the_configured_peer_and_records_the_key() {
        let mut values = HashMap::new();
        values.insert(
            ("g".to_string(), "k".to_string()),
            ByteView::new(b"remote-value"),
        );
        let peer: Arc<dyn PeerGetter> = Arc::new(StubPeer { values });
        let picker = StubPicker {
            peer: Some(peer),
            calls: Mutex::new(Vec::new()),
        };

        let picked = picker.pick_peer("k").expect("peer configured");
        let result = picked.get("g", "k").await.unwrap();
        assert_eq!(result.as_slice(), b"remote-value");
        assert_eq!(*picker.calls.lock().unwrap(), vec!["k".to_string()]);
    }

    #[tokio::test]
    async fn peer_get_reports_a_recoverable_error_on_miss() {
        let peer = StubPeer {
            values: HashMap::new(),
        };
        let err = peer.get("g", "missing").await.unwrap_err();
        assert!(matches!(err, GroupError::Peer(_)));
    }
}
