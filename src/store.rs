//! Backing store shared between collection handles.
//!
//! A [`Store`] is only ever mutated while it is reachable from a single
//! handle: freshly built, freshly copied, or uniquely owned through
//! [`Arc::make_mut`](std::sync::Arc::make_mut). Once published behind a
//! shared `Arc` it is read-only.

use std::collections::HashMap;
use std::collections::hash_map;
use std::hash::Hash;

use crate::adhash;
use crate::batch::Intent;

/// Primitive-keyed entries plus the `AdHash` of their key set.
pub struct Store<K, V> {
    entries: HashMap<K, V>,
    adhash: u64,
}

// ---------------------------------------------------------------------------
// Construction & accessors — no trait bounds
// ---------------------------------------------------------------------------

impl<K, V> Store<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            adhash: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub const fn adhash(&self) -> u64 {
        self.adhash
    }

    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Reads & in-place writes — K: Hash + Eq
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V> Store<K, V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            adhash: 0,
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or overwrites; returns `true` if the key was new.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.entries.entry(key) {
            hash_map::Entry::Occupied(mut slot) => {
                slot.insert(value);
                false
            }
            hash_map::Entry::Vacant(slot) => {
                self.adhash = adhash::with_key(self.adhash, slot.key());
                slot.insert(value);
                true
            }
        }
    }

    /// Removes `key`; returns `true` if it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        if self.entries.remove(key).is_some() {
            self.adhash = adhash::without_key(self.adhash, key);
            true
        } else {
            false
        }
    }

    /// Replaces the value at `key` with `updater(old)`; absent keys are
    /// left alone and the updater is dropped unrun.
    pub fn update<F: FnOnce(&V) -> V>(&mut self, key: &K, updater: F) {
        if let Some(slot) = self.entries.get_mut(key) {
            let next = updater(slot);
            *slot = next;
        }
    }

    /// Applies a single batch intent in place.
    pub fn apply(&mut self, intent: Intent<'_, K, V>) {
        match intent {
            Intent::Set { key, value } => {
                self.insert(key, value);
            }
            Intent::Update { key, updater } => self.update(&key, updater),
            Intent::Delete { key } => {
                self.remove(&key);
            }
        }
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for Store<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for Store<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut store = Self::with_capacity(iter.size_hint().0);
        store.extend(iter);
        store
    }
}

// ---------------------------------------------------------------------------
// Copy
// ---------------------------------------------------------------------------

impl<K: Clone, V: Clone> Clone for Store<K, V> {
    fn clone(&self) -> Self {
        crate::trace_event!(len = self.entries.len(), "copying backing store");
        #[cfg(test)]
        copies::record();
        Self {
            entries: self.entries.clone(),
            adhash: self.adhash,
        }
    }
}

/// Per-thread count of store copies, observed by the copy-count tests.
#[cfg(test)]
pub mod copies {
    use std::cell::Cell;

    thread_local! {
        static COPIES: Cell<usize> = const { Cell::new(0) };
    }

    pub fn record() {
        COPIES.with(|c| c.set(c.get() + 1));
    }

    /// Returns the number of copies made on this thread so far.
    pub fn count() -> usize {
        COPIES.with(Cell::get)
    }

    /// Runs `f` and returns its result with the number of copies it made.
    pub fn during<R>(f: impl FnOnce() -> R) -> (R, usize) {
        let before = count();
        let out = f();
        (out, count() - before)
    }
}
