//! Group Configuration
//!
//! A single `Config` covers the knobs Section 6 of the design names: the
//! per-group cache byte budget, the consistent-hash replica count, the HTTP
//! mount point, and the ring's hash function. Unlike the teacher crate,
//! which dedicated one config struct per eviction algorithm, there is only
//! one algorithm in scope here, so one struct covers it.
//!
//! # Examples
//!
//! ```
//! use ringcache::config::Config;
//!
//! let config = Config {
//!     cache_bytes: 1 << 20,
//!     ..Config::default()
//! };
//! assert_eq!(config.replicas, 50);
//! assert_eq!(config.base_path, "/_ringcache/");
//! ```

/// Default number of virtual replicas each peer gets on the consistent-hash
/// ring (Section 6).
pub const DEFAULT_REPLICAS: usize = 50;

/// Default HTTP mount point for the peer transport (Section 6).
pub const DEFAULT_BASE_PATH: &str = "/_ringcache/";

/// Per-group and per-pool configuration.
///
/// `cache_bytes` governs the LRU store created for a [`Group`](crate::group::Group);
/// `replicas`, `base_path`, and `hasher` govern the [`HttpPool`](crate::http::HttpPool)
/// a process uses to talk to its peers. Both halves are kept on one struct
/// since a process normally wants to set them together.
#[derive(Clone)]
pub struct Config {
    /// Byte budget for a group's local LRU store. `0` means unbounded
    /// (eviction disabled), matching Section 4.1.
    pub cache_bytes: u64,

    /// Virtual replicas per peer on the consistent-hash ring.
    pub replicas: usize,

    /// HTTP path prefix the peer transport serves and fetches under.
    pub base_path: String,

    /// Hash function backing the consistent-hash ring. Defaults to CRC-32
    /// IEEE, the spec's reference choice; any deterministic, reasonably
    /// uniform 32-bit hash is a valid substitute.
    pub hasher: fn(&[u8]) -> u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cache_bytes: 8 << 20,
            replicas: DEFAULT_REPLICAS,
            base_path: DEFAULT_BASE_PATH.to_string(),
            hasher: crc32_ieee,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("cache_bytes", &self.cache_bytes)
            .field("replicas", &self.replicas)
            .field("base_path", &self.base_path)
            .finish_non_exhaustive()
    }
}

/// CRC-32 (IEEE), the spec's reference hash function for the ring.
pub fn crc32_ieee(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}
