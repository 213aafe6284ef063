use hashbrown::HashMap as FastHashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::options::DEFAULT_CACHE_CAPACITY;
use crate::pattern::{CompiledPattern, PatternResult};

/// Bounded, thread-safe cache of compiled patterns with least-recently-used eviction.
///
/// Compile errors are never cached; a rejected pattern is re-parsed on every request.
#[derive(Debug)]
pub struct PatternCache {
    capacity: usize,
    slots: Mutex<Slots>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PatternCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            slots: Mutex::new(Slots::with_capacity(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    #[tracing::instrument(level = "trace", skip(self, pattern), fields(pattern_len = pattern.len() as u64))]
    pub fn get_or_compile(
        &self,
        pattern: &str,
        separator: Option<char>,
    ) -> PatternResult<Arc<CompiledPattern>> {
        let key = SlotKey::new(pattern, separator);

        let cached = self.slots.lock().touch(&key);
        if let Some(compiled) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::event!(tracing::Level::TRACE, operation = "cache_lookup", hit = true);
            return Ok(compiled);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::event!(tracing::Level::TRACE, operation = "cache_lookup", hit = false);

        let compiled = Arc::new(CompiledPattern::new(pattern, separator)?);
        let evicted = self
            .slots
            .lock()
            .store(key, Arc::clone(&compiled), self.capacity);
        if let Some(evicted) = evicted {
            tracing::event!(
                tracing::Level::TRACE,
                operation = "cache_evict",
                pattern = %evicted.pattern
            );
        }

        Ok(compiled)
    }

    /// Cached counterpart of [`crate::match_once`]: the pattern is compiled without a separator.
    pub fn is_match(&self, pattern: &str, input: &str) -> PatternResult<bool> {
        Ok(self.get_or_compile(pattern, None)?.matches(input))
    }

    pub fn len(&self) -> usize {
        self.slots.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.slots.lock().entries.clear();
    }

    /// Returns `(hits, misses)` since construction.
    pub fn metrics(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SlotKey {
    pattern: Box<str>,
    separator: Option<char>,
}

impl SlotKey {
    fn new(pattern: &str, separator: Option<char>) -> Self {
        Self {
            pattern: pattern.into(),
            separator,
        }
    }
}

#[derive(Debug)]
struct Slot {
    compiled: Arc<CompiledPattern>,
    last_used: u64,
}

// Recency is a logical clock stamped on every touch; the oldest stamp is evicted.
#[derive(Debug)]
struct Slots {
    clock: u64,
    entries: FastHashMap<SlotKey, Slot>,
}

impl Slots {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            clock: 0,
            entries: FastHashMap::with_capacity(capacity),
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn touch(&mut self, key: &SlotKey) -> Option<Arc<CompiledPattern>> {
        let now = self.tick();
        let slot = self.entries.get_mut(key)?;
        slot.last_used = now;
        Some(Arc::clone(&slot.compiled))
    }

    fn store(
        &mut self,
        key: SlotKey,
        compiled: Arc<CompiledPattern>,
        capacity: usize,
    ) -> Option<SlotKey> {
        let now = self.tick();
        let evicted = if self.entries.len() >= capacity && !self.entries.contains_key(&key) {
            self.least_recent()
        } else {
            None
        };
        if let Some(old) = &evicted {
            self.entries.remove(old);
        }

        self.entries.insert(
            key,
            Slot {
                compiled,
                last_used: now,
            },
        );
        evicted
    }

    fn least_recent(&self) -> Option<SlotKey> {
        self.entries
            .iter()
            .min_by_key(|(_, slot)| slot.last_used)
            .map(|(key, _)| key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(pattern: &str) -> Arc<CompiledPattern> {
        Arc::new(CompiledPattern::new(pattern, None).expect("pattern should compile"))
    }

    #[test]
    fn touch_refreshes_recency() {
        let mut slots = Slots::with_capacity(4);
        let first = SlotKey::new("*.rs", None);
        let second = SlotKey::new("*.go", None);
        slots.store(first.clone(), compiled("*.rs"), 4);
        slots.store(second.clone(), compiled("*.go"), 4);

        assert_eq!(slots.least_recent(), Some(first.clone()));
        assert!(slots.touch(&first).is_some());
        assert_eq!(slots.least_recent(), Some(second));
    }

    #[test]
    fn store_evicts_least_recently_used() {
        let mut slots = Slots::with_capacity(2);
        let a = SlotKey::new("a*", None);
        let b = SlotKey::new("b*", None);
        let c = SlotKey::new("c*", None);
        slots.store(a.clone(), compiled("a*"), 2);
        slots.store(b.clone(), compiled("b*"), 2);
        slots.touch(&a);

        let evicted = slots.store(c.clone(), compiled("c*"), 2);
        assert_eq!(evicted, Some(b));
        assert_eq!(slots.entries.len(), 2);
        assert!(slots.entries.contains_key(&a));
        assert!(slots.entries.contains_key(&c));
    }

    #[test]
    fn store_replacing_existing_key_evicts_nothing() {
        let mut slots = Slots::with_capacity(1);
        let key = SlotKey::new("a*", None);
        slots.store(key.clone(), compiled("a*"), 1);
        assert_eq!(slots.store(key, compiled("a*"), 1), None);
        assert_eq!(slots.entries.len(), 1);
    }

    #[test]
    fn separator_is_part_of_the_key() {
        let mut slots = Slots::with_capacity(4);
        slots.store(SlotKey::new("*", None), compiled("*"), 4);
        assert!(slots.touch(&SlotKey::new("*", Some('/'))).is_none());
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        assert_eq!(PatternCache::new(0).capacity(), 1);
    }
}
