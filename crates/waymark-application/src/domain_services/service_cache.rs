//! Service cache
//!
//! Singleton instances keyed by (contract, implementation). The first
//! resolution of a key constructs; concurrent first resolutions wait for
//! that construction and receive the same instance.
//!
//! Waiting is tracked as a wait-for graph: which thread builds each key and
//! which key each thread is blocked on. A thread about to block on a key
//! whose builder (transitively) waits on the current thread would never
//! wake, so it fails instead.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use tracing::warn;
use waymark_domain::{Result, RouterError, SharedService};

/// Cache key of one singleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceKey {
    pub contract: TypeId,
    pub implementation: TypeId,
}

#[derive(Default)]
struct WaitGraph {
    builders: HashMap<ServiceKey, ThreadId>,
    waiting: HashMap<ThreadId, ServiceKey>,
}

impl WaitGraph {
    /// True when blocking `me` on `key` closes a cycle
    fn closes_cycle(&self, me: ThreadId, key: ServiceKey) -> bool {
        let mut next = self.builders.get(&key);
        // Each thread waits on at most one key, so the walk is bounded.
        for _ in 0..=self.waiting.len() {
            match next {
                Some(&builder) if builder == me => return true,
                Some(builder) => {
                    next = self
                        .waiting
                        .get(builder)
                        .and_then(|waited| self.builders.get(waited));
                }
                None => return false,
            }
        }
        false
    }
}

/// Contract → singleton
#[derive(Default)]
pub struct ServiceCache {
    entries: DashMap<ServiceKey, Arc<OnceCell<SharedService>>>,
    graph: Mutex<WaitGraph>,
    constructed: AtomicUsize,
}

impl ServiceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached instance, if constructed
    pub fn get(&self, key: ServiceKey) -> Option<SharedService> {
        self.entries
            .get(&key)
            .and_then(|cell| cell.get().cloned())
    }

    /// Return the cached instance or construct it exactly once
    ///
    /// A failed construction leaves the key empty, so a later call retries.
    /// When waiting for another thread's construction would deadlock, the
    /// error from `on_cycle` is returned instead.
    pub fn get_or_try_init(
        &self,
        key: ServiceKey,
        init: impl FnOnce() -> Result<SharedService>,
        on_cycle: impl FnOnce() -> RouterError,
    ) -> Result<SharedService> {
        // Clone the cell out so the shard lock is not held during `init`,
        // which may resolve other services.
        let cell = Arc::clone(
            self.entries
                .entry(key)
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .value(),
        );
        if let Some(shared) = cell.get() {
            return Ok(Arc::clone(shared));
        }

        let me = thread::current().id();
        {
            let mut graph = self.graph();
            if graph.closes_cycle(me, key) {
                drop(graph);
                warn!(?key, "Service construction would wait on itself across threads");
                return Err(on_cycle());
            }
            graph.waiting.insert(me, key);
        }

        let result = cell
            .get_or_try_init(|| {
                {
                    let mut graph = self.graph();
                    graph.waiting.remove(&me);
                    graph.builders.insert(key, me);
                }
                let built = init();
                self.graph().builders.remove(&key);
                let service = built?;
                self.constructed.fetch_add(1, Ordering::Relaxed);
                Ok(service)
            })
            .cloned();
        self.graph().waiting.remove(&me);
        result
    }

    /// Number of singletons constructed so far
    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::Relaxed)
    }

    fn graph(&self) -> MutexGuard<'_, WaitGraph> {
        self.graph.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
