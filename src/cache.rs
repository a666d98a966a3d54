//! Build cache for derived structures
//!
//! Entries are keyed by a fingerprint of the input rows plus the builder
//! parameters. Each key owns a once-cell, so concurrent requests for the same
//! key wait on a single build instead of racing.

use crate::dataset::PostingRow;
use crate::graph::GraphKind;
use lru::LruCache;
use rustc_hash::FxHashMap;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::debug;

/// SHA-256 digest of a row set and builder parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint `rows` together with the serialized `params`.
    ///
    /// Row order matters: it determines label and edge order in the output.
    pub fn of_rows<P: Serialize>(rows: &[PostingRow], params: &P) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((rows.len() as u64).to_le_bytes());
        for row in rows {
            for field in [&row.specialty, &row.region, &row.skills] {
                match field {
                    Some(value) => {
                        hasher.update([1u8]);
                        hasher.update((value.len() as u64).to_le_bytes());
                        hasher.update(value.as_bytes());
                    }
                    None => hasher.update([0u8]),
                }
            }
        }
        // Serializing plain config structs cannot fail
        let params = serde_json::to_vec(params).unwrap_or_default();
        hasher.update(&params);
        Fingerprint(hasher.finalize().into())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Cache key: what was built from which input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub fingerprint: Fingerprint,
    pub kind: GraphKind,
}

impl CacheKey {
    pub fn new(fingerprint: Fingerprint, kind: GraphKind) -> Self {
        Self { fingerprint, kind }
    }
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

type Slot<V> = Arc<OnceLock<Arc<V>>>;

/// Finished slots in LRU order, plus slots whose build has not returned yet.
/// Pending slots are never evicted.
struct Slots<V> {
    ready: LruCache<CacheKey, Slot<V>>,
    pending: FxHashMap<CacheKey, Slot<V>>,
}

/// Bounded LRU of built values with at most one build in flight per key
pub struct BuildCache<V> {
    slots: Mutex<Slots<V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V> BuildCache<V> {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            slots: Mutex::new(Slots {
                ready: LruCache::new(capacity),
                pending: FxHashMap::default(),
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached value for `key`, building it with `build` on a miss.
    ///
    /// The map lock is released before `build` runs; callers racing on the
    /// same key block on that key's cell until the first build finishes.
    /// The slot joins the LRU only once its build has returned.
    pub fn get_or_build<F>(&self, key: CacheKey, build: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        let slot = {
            let mut guard = self.lock();
            let slots = &mut *guard;
            let existing = slots.ready.get(&key).or_else(|| slots.pending.get(&key)).cloned();
            match existing {
                Some(slot) => slot,
                None => {
                    let slot: Slot<V> = Arc::new(OnceLock::new());
                    slots.pending.insert(key, slot.clone());
                    slot
                }
            }
        };

        let mut built = false;
        let value = slot
            .get_or_init(|| {
                built = true;
                Arc::new(build())
            })
            .clone();

        if built {
            let mut slots = self.lock();
            if let Some(slot) = slots.pending.remove(&key) {
                slots.ready.put(key, slot);
            }
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!("Cache miss for {} graph {}", key.kind, key.fingerprint);
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        value
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.lock().ready.len();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }

    /// Drop every finished entry. Builds still in flight are kept.
    pub fn clear(&self) {
        self.lock().ready.clear();
    }

    fn lock(&self) -> MutexGuard<'_, Slots<V>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
