//! Consistent-hash ring with virtual replicas (Section 4.2).
//!
//! Each peer contributes `replicas` virtual positions computed as
//! `hash(format!("{i}{peer}"))` for `i in 0..replicas`. Positions are kept
//! in a sorted `Vec` alongside a map back to the owning peer; `get` does a
//! binary search for the first position `>= hash(key)`, wrapping to index 0
//! when the key's hash sorts past every position on the ring.
//!
//! The ring is immutable from the point of view of anyone holding a `&Ring`:
//! [`HttpPool`](crate::http::HttpPool) rebuilds it wholesale on
//! reconfiguration rather than mutating one in place, matching Section 4.2's
//! "not mutated after Set completes" note.

use std::collections::HashMap;

/// `key -> peer` resolver built from a fixed peer list and replica count.
pub struct Ring {
    replicas: usize,
    hasher: fn(&[u8]) -> u32,
    positions: Vec<u32>,
    position_to_peer: HashMap<u32, String>,
}

impl Ring {
    /// Builds an empty ring. `Ring::get` on an empty ring always returns
    /// `None` until peers are added with [`Ring::add`].
    pub fn new(replicas: usize, hasher: fn(&[u8]) -> u32) -> Self {
        Ring {
            replicas,
            hasher,
            positions: Vec::new(),
            position_to_peer: HashMap::new(),
        }
    }

    /// Adds peers to the ring, inserting `replicas` virtual positions for
    /// each. Duplicate positions across peers are tolerated: the map is
    /// last-writer-wins, but `get` still resolves deterministically off the
    /// sorted position list.
    pub fn add<I, S>(&mut self, peers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for peer in peers {
            let peer = peer.as_ref();
            for i in 0..self.replicas {
                let virtual_key = format!("{i}{peer}");
                let position = (self.hasher)(virtual_key.as_bytes());
                self.positions.push(position);
                self.position_to_peer.insert(position, peer.to_string());
            }
        }
        self.positions.sort_unstable();
    }

    /// Resolves the peer responsible for `key`. Returns `None` if the ring
    /// has no peers. Deterministic: the same ring membership and the same
    /// key always yield the same peer (Section 8, property 4).
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.positions.is_empty() {
            return None;
        }
        let hash = (self.hasher)(key.as_bytes());
        let idx = match self.positions.binary_search(&hash) {
            Ok(i) => i,
            Err(i) => i % self.positions.len(),
        };
        self.position_to_peer
            .get(&self.positions[idx])
            .map(String::as_str)
    }

    /// `true` if no peers have been added.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
