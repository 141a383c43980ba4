//! Single-slot value with TTL (Time To Live) support.
//!
//! The slot holds at most one value together with the instant it was fetched.
//! Reads return the value only while it is younger than the TTL.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// A stored value with the instant it was fetched.
#[derive(Debug, Clone)]
struct Slot<V> {
    value: V,
    fetched_at: Instant,
}

/// A thread-safe single value with time-based expiration.
///
/// The value lives for the lifetime of the process; it is never persisted.
/// Clones share the same slot (uses Arc internally).
#[derive(Clone)]
pub struct TimedValue<V>
where
    V: Clone,
{
    slot: Arc<RwLock<Option<Slot<V>>>>,
    ttl: Duration,
}

impl<V> TimedValue<V>
where
    V: Clone,
{
    /// Create an empty slot with the specified TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Create an empty slot with the specified TTL in seconds.
    pub fn from_secs(ttl_seconds: u64) -> Self {
        Self::new(Duration::from_secs(ttl_seconds))
    }

    /// Store a value stamped with the current instant.
    pub fn set(&self, value: V) {
        self.set_at(value, Instant::now());
    }

    /// Store a value stamped with `fetched_at`.
    ///
    /// Replaces whatever was there before.
    pub fn set_at(&self, value: V, fetched_at: Instant) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(Slot { value, fetched_at });
        }
    }

    /// Get the value if one is stored and it hasn't expired.
    pub fn get(&self) -> Option<V> {
        self.get_at(Instant::now())
    }

    /// Get the value as seen at `now`.
    pub fn get_at(&self, now: Instant) -> Option<V> {
        let slot = self.slot.read().ok()?;
        slot.as_ref()
            .filter(|s| now.saturating_duration_since(s.fetched_at) < self.ttl)
            .map(|s| s.value.clone())
    }

    /// Check whether a value is stored and still fresh.
    pub fn is_fresh(&self) -> bool {
        self.get().is_some()
    }

    /// Age of the stored value, fresh or not.
    pub fn age(&self) -> Option<Duration> {
        let slot = self.slot.read().ok()?;
        slot.as_ref().map(|s| s.fetched_at.elapsed())
    }

    /// Drop the stored value.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }

    /// Get the TTL duration for this slot.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<V> std::fmt::Debug for TimedValue<V>
where
    V: Clone + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedValue")
            .field("ttl", &self.ttl)
            .field("age", &self.age())
            .finish()
    }
}
