//! Object pooling
//!
//! Steps and sequences are recycled through a free list so the per-tick hot
//! path allocates nothing in steady state. Slots live in a `SlotMap` and are
//! never removed: releasing recycles the value in place and parks the key,
//! so a later acquire hands back the same slot with defaulted fields and the
//! key stays stable for the chain links that reference it.
//!
//! Ownership transfers only at the acquire/release boundary. A key must
//! never be live in a structure and parked on the free list at once; that is
//! enforced by usage discipline, not runtime checks.

use slotmap::{Key, SlotMap};

/// Clears all externally visible state, returning a slot to its defaults.
pub trait Recycle: Default {
    fn recycle(&mut self);
}

/// Free-list recycler over slotmap storage.
///
/// Unbounded: grows to peak concurrent demand and never shrinks. That is the
/// intended trade for a per-frame workload.
pub struct Pool<K: Key, V: Recycle> {
    slots: SlotMap<K, V>,
    free: Vec<K>,
}

impl<K: Key, V: Recycle> Pool<K, V> {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            free: Vec::new(),
        }
    }

    /// Hand out a recycled slot if one is parked, else grow by one.
    pub fn acquire(&mut self) -> K {
        match self.free.pop() {
            Some(key) => key,
            None => self.slots.insert(V::default()),
        }
    }

    /// Recycle the slot in place and park its key for reuse.
    pub fn release(&mut self, key: K) {
        debug_assert!(
            !self.free.contains(&key),
            "slot released twice without reacquisition"
        );
        if let Some(value) = self.slots.get_mut(key) {
            value.recycle();
            self.free.push(key);
        }
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.slots.get(key)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.slots.get_mut(key)
    }

    /// True for keys currently owned by a live structure (allocated and not
    /// parked on the free list).
    pub fn is_live(&self, key: K) -> bool {
        self.slots.contains_key(key) && !self.free.contains(&key)
    }

    /// Slots currently in use.
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Slots parked for reuse.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }
}

impl<K: Key, V: Recycle> Default for Pool<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
