#![doc = include_str!("../README.md")]
//!
//! ## Modules
//!
//! - [`byte_view`]: the immutable byte value handed out by every `Group`
//! - [`store`]: the byte-bounded LRU store backing each group's local cache
//! - [`consistent_hash`]: the ring that maps keys to owning peers
//! - [`singleflight`]: in-flight load deduplication
//! - [`peer`]: the `PeerPicker`/`PeerGetter` contracts `Group` depends on
//! - [`group`]: the orchestrator tying the above together behind `get(key)`
//! - [`http`]: the default HTTP-backed peer transport (`http` feature)
//! - [`config`]: per-group and per-pool configuration
//! - [`error`]: the shared error type

mod byte_view;
mod entry;
mod list;

pub mod config;
pub mod consistent_hash;
pub mod error;
pub mod group;
#[cfg(feature = "http")]
pub mod http;
pub mod peer;
mod singleflight;
mod store;

pub use byte_view::ByteView;
pub use config::Config;
pub use consistent_hash::Ring;
pub use error::GroupError;
pub use group::{get_group, new_group, Group, Loader};
pub use peer::{PeerGetter, PeerPicker};

#[cfg(feature = "http")]
pub use http::HttpPool;
