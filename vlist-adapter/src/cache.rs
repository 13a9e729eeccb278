#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, btree_map::Entry};
#[cfg(feature = "std")]
use std::collections::{HashMap, hash_map::Entry};

use vlist::ListKey;

#[cfg(feature = "std")]
type SlotMap<K, V> = HashMap<K, Slot<V>>;
#[cfg(not(feature = "std"))]
type SlotMap<K, V> = BTreeMap<K, Slot<V>>;

#[derive(Clone, Debug)]
struct Slot<V> {
    value: V,
    stored_at_ms: u64,
}

impl<V> Slot<V> {
    fn is_fresh(&self, now_ms: u64, ttl_ms: u64) -> bool {
        now_ms.saturating_sub(self.stored_at_ms) < ttl_ms
    }
}

/// A time-to-live cache for row data backed by slow reads.
///
/// The cache is an ordinary value owned by whoever needs it (no global state), and it never
/// reads a clock: every operation takes `now_ms` from the caller, like the rest of the adapter.
/// An entry is fresh for `ttl_ms` after it was stored; a TTL of 0 disables caching.
#[derive(Clone, Debug)]
pub struct TtlCache<K, V> {
    ttl_ms: u64,
    entries: SlotMap<K, V>,
}

impl<K: ListKey, V> TtlCache<K, V> {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            ttl_ms,
            entries: SlotMap::new(),
        }
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Changes the TTL. Existing entries are judged against the new value.
    pub fn set_ttl_ms(&mut self, ttl_ms: u64) {
        self.ttl_ms = ttl_ms;
    }

    /// Number of stored entries, fresh or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value for `key` if it is still fresh at `now_ms`.
    pub fn get(&self, key: &K, now_ms: u64) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|slot| slot.is_fresh(now_ms, self.ttl_ms))
            .map(|slot| &slot.value)
    }

    pub fn is_fresh(&self, key: &K, now_ms: u64) -> bool {
        self.get(key, now_ms).is_some()
    }

    /// Stores `value` as of `now_ms`, returning the previous value (fresh or not).
    pub fn insert(&mut self, key: K, value: V, now_ms: u64) -> Option<V> {
        self.entries
            .insert(
                key,
                Slot {
                    value,
                    stored_at_ms: now_ms,
                },
            )
            .map(|slot| slot.value)
    }

    /// Returns the fresh value for `key`, or fetches, stores and returns a new one.
    ///
    /// A failed fetch is returned to the caller and leaves the cache untouched, including any
    /// expired value already stored for `key`.
    pub fn get_or_fetch<E>(
        &mut self,
        key: K,
        now_ms: u64,
        fetch: impl FnOnce(&K) -> Result<V, E>,
    ) -> Result<&V, E> {
        let ttl_ms = self.ttl_ms;
        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if !occupied.get().is_fresh(now_ms, ttl_ms) {
                    vtrace!(now_ms, "TtlCache: expired entry, refetching");
                    let value = fetch(occupied.key())?;
                    occupied.insert(Slot {
                        value,
                        stored_at_ms: now_ms,
                    });
                }
                Ok(&occupied.into_mut().value)
            }
            Entry::Vacant(vacant) => {
                vtrace!(now_ms, "TtlCache: miss");
                let value = fetch(vacant.key())?;
                let slot = vacant.insert(Slot {
                    value,
                    stored_at_ms: now_ms,
                });
                Ok(&slot.value)
            }
        }
    }

    /// Removes `key`, returning its value (fresh or not).
    pub fn invalidate(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|slot| slot.value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops every entry that is no longer fresh at `now_ms`. Returns how many were dropped.
    pub fn purge_expired(&mut self, now_ms: u64) -> usize {
        let before = self.entries.len();
        let ttl_ms = self.ttl_ms;
        self.entries.retain(|_, slot| slot.is_fresh(now_ms, ttl_ms));
        let purged = before - self.entries.len();
        if purged > 0 {
            vdebug!(purged, remaining = self.entries.len(), "TtlCache::purge_expired");
        }
        purged
    }
}
