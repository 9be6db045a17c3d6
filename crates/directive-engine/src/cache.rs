//! Content-addressed cache of parsed directives.
//!
//! Entries are keyed by a hash of the prompt content. The content itself is
//! stored beside the parse so a hash collision is detected and treated as a
//! miss. Entries expire after a TTL; when the cache is full the oldest third
//! of entries, by insertion order, is dropped in one go.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use directive_models::DirectiveSet;
use tracing::debug;

use crate::parser::parse_with_diagnostics;

/// Counters for cache diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub len: usize,
}

impl CacheStats {
    /// Hit rate as a fraction (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    content: String,
    directives: Arc<DirectiveSet>,
    created_at: Instant,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<u64, CacheEntry>,
    /// Keys in insertion order, oldest first.
    order: VecDeque<u64>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl CacheState {
    fn remove(&mut self, key: u64) {
        self.entries.remove(&key);
        self.order.retain(|k| *k != key);
    }

    /// Drops the oldest third of entries.
    fn evict_oldest_third(&mut self) {
        let count = self.entries.len().div_ceil(3).max(1);
        for _ in 0..count {
            let Some(key) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&key);
            self.evictions += 1;
        }
        debug!(evicted = count, remaining = self.entries.len(), "Directive cache evicted");
    }
}

/// Memoizes [`parse`](crate::parser::parse) output by content.
///
/// Lookups take `&self`; state sits behind a `Mutex` so one cache can be
/// shared by the validation and trigger paths.
#[derive(Debug)]
pub struct DirectiveCache {
    state: Mutex<CacheState>,
    capacity: usize,
    ttl: Duration,
}

impl Default for DirectiveCache {
    fn default() -> Self {
        Self::new(500, Duration::from_secs(300))
    }
}

impl DirectiveCache {
    /// Creates a cache holding at most `capacity` entries, each fresh for `ttl`.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            capacity: capacity.max(1),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // A panic mid-update leaves at worst a stale entry; keep serving.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns the directives for `content`, parsing on a miss or stale hit.
    pub fn get(&self, content: &str) -> Arc<DirectiveSet> {
        if content.is_empty() {
            return Arc::new(DirectiveSet::default());
        }

        let key = content_hash(content);
        let mut state = self.lock();

        if let Some(entry) = state.entries.get(&key) {
            if entry.content == content && entry.created_at.elapsed() < self.ttl {
                let directives = Arc::clone(&entry.directives);
                state.hits += 1;
                return directives;
            }
        }

        state.misses += 1;
        // Stale or colliding entry gives up its slot.
        if state.entries.contains_key(&key) {
            state.remove(key);
        }

        let outcome = parse_with_diagnostics(content);
        for line in &outcome.unknown {
            debug!(line = %line, "Ignoring unknown directive");
        }
        let directives = Arc::new(outcome.directives);

        if state.entries.len() >= self.capacity {
            state.evict_oldest_third();
        }
        state.entries.insert(
            key,
            CacheEntry {
                content: content.to_string(),
                directives: Arc::clone(&directives),
                created_at: Instant::now(),
            },
        );
        state.order.push_back(key);

        directives
    }

    /// Returns true if a fresh entry for `content` is cached.
    pub fn contains(&self, content: &str) -> bool {
        let state = self.lock();
        state
            .entries
            .get(&content_hash(content))
            .is_some_and(|e| e.content == content && e.created_at.elapsed() < self.ttl)
    }

    /// Removes every entry.
    pub fn clear(&self) {
        let mut state = self.lock();
        let dropped = state.entries.len();
        state.entries.clear();
        state.order.clear();
        debug!(dropped, "Directive cache cleared");
    }

    /// Number of entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the diagnostic counters.
    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            evictions: state.evictions,
            len: state.entries.len(),
        }
    }
}

/// Fast non-cryptographic hash of prompt content.
fn content_hash(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}
