//! Runs one group behind two HTTP listeners and fetches through a
//! consistent-hash ring that picks which listener to ask for each key.
//!
//! A production deployment runs one process per peer, each with its own
//! `Group` registered under the same name and its own `HttpPool` whose
//! `self_addr` matches that process, so a peer asked for a key it owns
//! resolves that key locally rather than forwarding it again. This demo
//! folds every peer into one binary and one registry so it can run with
//! `cargo run --example two_peers` and nothing else, which means the two
//! listeners necessarily share the same backing `Group` instead of each
//! holding an independent slice of the keyspace; routing the router would
//! forward through would otherwise loop a request back into the same
//! shared group over and over. So the ring here only picks *which address*
//! to send a request to; it does not gate the servers' own `Group::get`
//! calls, since those never get a peer picker of their own.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ringcache::http::HttpPool;
use ringcache::peer::PeerPicker;
use ringcache::{new_group, ByteView, Config, GroupError, Loader};

struct SourceOfRecord {
    calls: AtomicU64,
}

#[async_trait]
impl Loader for SourceOfRecord {
    async fn load(&self, key: &str) -> Result<ByteView, GroupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ByteView::from_owned(format!("value-for-{key}").into_bytes()))
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::default();
    let group_name = "demo";
    let peer_a = "http://127.0.0.1:7071".to_string();
    let peer_b = "http://127.0.0.1:7072".to_string();

    let loader = Arc::new(SourceOfRecord {
        calls: AtomicU64::new(0),
    });
    // No peers registered on this group: both listeners below serve it
    // directly, so a request that reaches either one always terminates in
    // the local cache or the loader, never forwards again.
    new_group(group_name, config.clone(), loader.clone());

    for (addr, self_addr) in [
        (SocketAddr::from(([127, 0, 0, 1], 7071)), peer_a.clone()),
        (SocketAddr::from(([127, 0, 0, 1], 7072)), peer_b.clone()),
    ] {
        let base_path = config.base_path.clone();
        tokio::spawn(async move {
            ringcache::http::serve(addr, self_addr, &base_path)
                .await
                .expect("peer transport");
        });
    }

    // Give both listeners a moment to bind before routing traffic at them.
    tokio::time::sleep(Duration::from_millis(100)).await;

    // A router that never resolves to itself: every key picks peer_a or
    // peer_b, so each fetch below is a real loopback HTTP round trip.
    let router = HttpPool::new("http://router:0", &config);
    router.set_peers(&[peer_a.clone(), peer_b.clone()]);

    for key in ["alpha", "bravo", "charlie", "delta"] {
        let peer = router.pick_peer(key).expect("ring always picks one of two peers");
        let value = peer.get(group_name, key).await.expect("get succeeds");
        println!("{key} -> {}", value.as_str().unwrap());
    }

    // A repeat read hits the server's local cache and never reaches the
    // loader again, regardless of which of the two addresses serves it.
    let peer = router.pick_peer("alpha").expect("ring always picks one of two peers");
    let _ = peer.get(group_name, "alpha").await.expect("get succeeds");
    println!("loader invocations: {}", loader.calls.load(Ordering::SeqCst));
}
