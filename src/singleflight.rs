//! Single-flight coalescer (Section 4.3): suppresses duplicate concurrent
//! loads of the same key.
//!
//! `Coalescer::do_once` runs at most one in-flight invocation of its future
//! per key; callers that arrive while one is in flight ("followers") await
//! the leader's result instead of running their own future. Once the leader
//! publishes, the record is removed, a later arrival starts a fresh one and
//! may re-run the work (the coalescer deduplicates in-flight work only, it
//! never caches values).
//!
//! Completion is published through a [`tokio::sync::watch`] channel rather
//! than a condvar/notify pair: a follower's `rx.borrow()` always reflects the
//! latest published value regardless of when it subscribed, so there's no
//! window where a follower's wait can miss a publish that raced ahead of it
//! (the classic hazard with `Notify::notify_waiters`, which only wakes
//! already-registered waiters).
//!
//! The leader's future runs behind [`FutureExt::catch_unwind`], so a panic
//! inside it surfaces as a `GroupError::Join` to every waiter rather than
//! poisoning the coalescer or leaving followers waiting forever (Section
//! 4.3's "guaranteed-release discipline" requirement), without requiring
//! the leader's future to be `'static` the way spawning it onto the runtime
//! would.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Mutex;

use futures::FutureExt;
use tokio::sync::watch;

use crate::error::GroupError;

type Published<V> = Option<Result<V, GroupError>>;

/// Deduplicates concurrent loads keyed by a string.
pub(crate) struct Coalescer<V> {
    calls: Mutex<HashMap<String, watch::Receiver<Published<V>>>>,
}

impl<V> Coalescer<V> {
    pub(crate) fn new() -> Self {
        Coalescer {
            calls: Mutex::new(HashMap::new()),
        }
    }
}

impl<V: Clone + Send> Coalescer<V> {
    /// Runs `make_fut()` at most once per key among overlapping callers.
    /// `make_fut` is only invoked for the leader of a burst; a follower's
    /// closure is never called.
    pub(crate) async fn do_once<F, Fut>(&self, key: &str, make_fut: F) -> Result<V, GroupError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, GroupError>>,
    {
        enum Role<V> {
            Leader(watch::Sender<Published<V>>),
            Follower(watch::Receiver<Published<V>>),
        }

        let role = {
            let mut calls = self.calls.lock().unwrap();
            if let Some(rx) = calls.get(key) {
                Role::Follower(rx.clone())
            } else {
                let (tx, rx) = watch::channel(None);
                calls.insert(key.to_string(), rx);
                Role::Leader(tx)
            }
        };

        match role {
            Role::Follower(mut rx) => loop {
                if let Some(result) = rx.borrow().clone() {
                    return result;
                }
                if rx.changed().await.is_err() {
                    return Err(GroupError::Join(
                        "single-flight leader dropped without publishing a result".to_string(),
                    ));
                }
            },
            Role::Leader(tx) => {
                let result = match AssertUnwindSafe(make_fut()).catch_unwind().await {
                    Ok(result) => result,
                    Err(panic) => Err(GroupError::Join(panic_message(&panic))),
                };
                // Always publish, even on panic, so no follower waits forever.
                let _ = tx.send(Some(result.clone()));
                self.calls.lock().unwrap().remove(key);
                result
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "single-flight leader panicked".to_string()
    }
}
