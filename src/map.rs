//! Immutable primitive-keyed hash map.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops;
use std::sync::Arc;

use crate::Diff;
use crate::batch::{BatchPlan, Intent};
use crate::iter::{Iter, Keys, Values};
use crate::key::Primitive;
use crate::store::Store;

/// Immutable hash map over [`Primitive`] keys.
///
/// Every write-like method returns a new map and leaves `self` untouched.
/// Maps share their backing store through an [`Arc`] until a write forces a
/// copy; writes that change nothing return a map sharing `self`'s store
/// (see [`ptr_eq`](Self::ptr_eq)).
///
/// ```
/// use immap::IMap;
///
/// let m1 = IMap::from([("a", 1), ("b", 2)]);
/// let m2 = m1.insert("c", 3);
/// assert_eq!(m2.len(), 3);
/// assert_eq!(m2.get(&"a"), Some(&1));
/// assert_eq!(m1.len(), 2);
/// ```
pub struct IMap<K, V> {
    store: Arc<Store<K, V>>,
    size: usize,
}

// ---------------------------------------------------------------------------
// Construction & accessors — no trait bounds
// ---------------------------------------------------------------------------

impl<K, V> IMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::from_store(Store::new())
    }

    fn from_store(store: Store<K, V>) -> Self {
        Self {
            size: store.len(),
            store: Arc::new(store),
        }
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the `AdHash` of the key set.
    ///
    /// Maps with equal key sets have equal `AdHash` values regardless of
    /// insertion order or values.
    #[must_use]
    pub fn adhash(&self) -> u64 {
        self.store.adhash()
    }

    /// Returns `true` if both maps share the same backing store.
    ///
    /// Sharing implies equality; the converse does not hold.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }

    /// Returns an iterator over `(&K, &V)` pairs.
    ///
    /// Repeated iteration of the same map yields the same order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.store.iter())
    }

    /// Returns an iterator over the keys.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over the values.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }
}

// ---------------------------------------------------------------------------
// Read operations — K: Hash + Eq
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V> IMap<K, V> {
    /// Builds a map from `(key, value)` pairs. Later duplicates win.
    #[must_use]
    pub fn from_entries<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        Self::from_store(entries.into_iter().collect())
    }

    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.store.get(key)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    /// Structural equality with a caller-supplied value comparison.
    ///
    /// Order-independent. Rejects on size or key `AdHash` mismatch before
    /// comparing any entry. Maps sharing a store are equal without calling
    /// `value_eq`, which is therefore assumed reflexive.
    #[must_use]
    pub fn equals_with<F>(&self, other: &Self, mut value_eq: F) -> bool
    where
        F: FnMut(&V, &V) -> bool,
    {
        if self.ptr_eq(other) {
            return true;
        }
        if self.size != other.size || self.adhash() != other.adhash() {
            return false;
        }
        self.iter()
            .all(|(k, v)| other.get(k).is_some_and(|w| value_eq(v, w)))
    }
}

// ---------------------------------------------------------------------------
// Write operations — K: Primitive, V: Clone
// ---------------------------------------------------------------------------

impl<K: Primitive, V: Clone> IMap<K, V> {
    /// Returns a map with `key ↦ value` added or overwritten.
    ///
    /// Always copies the store. Use
    /// [`insert_if_changed`](Self::insert_if_changed) to skip the copy when
    /// the stored value is already equal.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        self.edited(|store| {
            store.insert(key, value);
        })
    }

    /// Like [`insert`](Self::insert), but if `key` already maps to a value
    /// equal to `value`, the result shares `self`'s store and nothing is
    /// copied.
    #[must_use]
    pub fn insert_if_changed(&self, key: K, value: V) -> Self
    where
        V: PartialEq,
    {
        if self.get(&key) == Some(&value) {
            return self.clone();
        }
        self.insert(key, value)
    }

    /// Returns a map without `key`. Absent keys return a map sharing
    /// `self`'s store.
    #[must_use]
    pub fn remove(&self, key: &K) -> Self {
        if !self.contains_key(key) {
            return self.clone();
        }
        self.edited(|store| {
            store.remove(key);
        })
    }

    /// Returns a map with the value at `key` replaced by `updater(old)`.
    ///
    /// The updater only runs for present keys; absent keys return a map
    /// sharing `self`'s store.
    #[must_use]
    pub fn update<F: FnOnce(&V) -> V>(&self, key: &K, updater: F) -> Self {
        let Some(current) = self.get(key) else {
            return self.clone();
        };
        let next = updater(current);
        self.edited(|store| {
            store.insert(key.clone(), next);
        })
    }

    /// Applies every intent of `plan` in order and returns the final map.
    ///
    /// Equivalent to folding `self` through [`insert`](Self::insert),
    /// [`update`](Self::update) and [`remove`](Self::remove), but copies
    /// the backing store exactly once (not at all for an empty plan).
    #[must_use]
    pub fn apply_batch(&self, plan: BatchPlan<'_, K, V>) -> Self {
        self.clone().into_batch(plan)
    }

    /// Like [`apply_batch`](Self::apply_batch), consuming `self`.
    ///
    /// If this map is the sole owner of its store, the plan is applied in
    /// place without any copy.
    #[must_use]
    pub fn into_batch(mut self, plan: BatchPlan<'_, K, V>) -> Self {
        if plan.is_empty() {
            return self;
        }
        crate::trace_event!(intents = plan.len(), len = self.size, "applying batch");
        let store = Arc::make_mut(&mut self.store);
        for intent in plan {
            store.apply(intent);
        }
        self.size = store.len();
        self
    }

    /// Returns a map with the entries for which `pred` returns `true`.
    #[must_use]
    pub fn filter<F: FnMut(&K, &V) -> bool>(&self, mut pred: F) -> Self {
        Self::from_store(
            self.iter()
                .filter(|(k, v)| pred(k, v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Returns a map with every value transformed by `f`.
    #[must_use]
    pub fn map_values<U, F: FnMut(&K, &V) -> U>(&self, mut f: F) -> IMap<K, U> {
        IMap::from_store(self.iter().map(|(k, v)| (k.clone(), f(k, v))).collect())
    }

    /// Returns a map with every key transformed by `f`.
    ///
    /// Keys that collide after transformation keep one entry; which one is
    /// unspecified, as iteration order is.
    #[must_use]
    pub fn map_keys<K2: Primitive, F: FnMut(&K, &V) -> K2>(&self, mut f: F) -> IMap<K2, V> {
        IMap::from_store(self.iter().map(|(k, v)| (f(k, v), v.clone())).collect())
    }

    /// Returns the union of both maps; on shared keys `other`'s value wins.
    ///
    /// Copies the larger operand once and inserts the smaller into it.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        if self.len() >= other.len() {
            self.edited(|store| {
                for (k, v) in other.iter() {
                    store.insert(k.clone(), v.clone());
                }
            })
        } else {
            other.edited(|store| {
                for (k, v) in self.iter() {
                    if !store.contains(k) {
                        store.insert(k.clone(), v.clone());
                    }
                }
            })
        }
    }

    /// Key-presence diff from `self` (old) to `newer`.
    ///
    /// `added` holds `newer`'s entries whose keys `self` lacks; `deleted`
    /// holds `self`'s entries whose keys `newer` lacks. Changed values under
    /// a shared key appear in neither.
    #[must_use]
    pub fn diff(&self, newer: &Self) -> Diff<Self> {
        Diff {
            added: newer.filter(|k, _| !self.contains_key(k)),
            deleted: self.filter(|k, _| !newer.contains_key(k)),
        }
    }

    /// Returns a map with every pair of `entries` inserted, in order.
    ///
    /// Consumes `self`, so a sole owner fills its store in place.
    #[must_use]
    pub fn extended<I: IntoIterator<Item = (K, V)>>(self, entries: I) -> Self {
        let plan = entries
            .into_iter()
            .map(|(key, value)| Intent::Set { key, value })
            .collect();
        self.into_batch(plan)
    }

    /// Copies the entries into a standard mutable map.
    #[must_use]
    pub fn to_hash_map(&self) -> HashMap<K, V> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Copies the store once, edits the unpublished copy, and publishes it.
    fn edited(&self, edit: impl FnOnce(&mut Store<K, V>)) -> Self {
        let mut next = self.clone();
        let store = Arc::make_mut(&mut next.store);
        edit(store);
        next.size = store.len();
        next
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V> Clone for IMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            size: self.size,
        }
    }
}

impl<K, V> Default for IMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IMap ")?;
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for IMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.equals_with(other, V::eq)
    }
}

impl<K: Hash + Eq, V: Eq> Eq for IMap<K, V> {}

/// Hashes the length and key-set `AdHash`, which equal maps always share.
impl<K, V> Hash for IMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.store.adhash().hash(state);
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for IMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl<K: Hash + Eq, V, const N: usize> From<[(K, V); N]> for IMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        Self::from_entries(entries)
    }
}

impl<K: Hash + Eq, V, S> From<HashMap<K, V, S>> for IMap<K, V> {
    fn from(entries: HashMap<K, V, S>) -> Self {
        Self::from_entries(entries)
    }
}

impl<K: Hash + Eq, V> ops::Index<&K> for IMap<K, V> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if `key` is not present.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V> IntoIterator for &'a IMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
