//! Immutable hash map keyed through a [`KeyMapping`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::Diff;
use crate::batch::BatchPlan;
use crate::iter::{MappedIter, MappedKeys, Values};
use crate::map::IMap;
use crate::mapping::KeyMapping;

/// Immutable hash map over arbitrary keys, stored under their
/// [`KeyMapping::Mapped`] projection.
///
/// Every key argument goes through [`KeyMapping::to_key`]; every key handed
/// back is rebuilt with [`KeyMapping::from_key`]. Sharing, batching and
/// equality are those of the underlying [`IMap`], so equality compares the
/// primitive view.
pub struct IMapMapped<M: KeyMapping, V> {
    inner: IMap<M::Mapped, V>,
    _mapping: PhantomData<fn() -> M>,
}

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl<M: KeyMapping, V> IMapMapped<M, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::from_primitive(IMap::new())
    }

    /// Builds a map from `(key, value)` pairs. Later duplicates win,
    /// including distinct keys with the same projection.
    #[must_use]
    pub fn from_entries<I: IntoIterator<Item = (M::Key, V)>>(entries: I) -> Self {
        Self::from_primitive(
            entries
                .into_iter()
                .map(|(k, v)| (M::to_key(&k), v))
                .collect(),
        )
    }

    /// Wraps a primitive-keyed map. Its keys must be projections of keys
    /// `M` can rebuild.
    #[must_use]
    pub const fn from_primitive(inner: IMap<M::Mapped, V>) -> Self {
        Self {
            inner,
            _mapping: PhantomData,
        }
    }

    /// Returns the primitive-keyed view.
    #[must_use]
    pub const fn as_primitive(&self) -> &IMap<M::Mapped, V> {
        &self.inner
    }

    /// Unwraps into the primitive-keyed map.
    #[must_use]
    pub fn into_primitive(self) -> IMap<M::Mapped, V> {
        self.inner
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns `true` if both maps share the same backing store.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.inner.ptr_eq(&other.inner)
    }

    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &M::Key) -> Option<&V> {
        self.inner.get(&M::to_key(key))
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &M::Key) -> bool {
        self.inner.contains_key(&M::to_key(key))
    }

    /// Returns an iterator over `(K, &V)` pairs with rebuilt keys.
    #[must_use]
    pub fn iter(&self) -> MappedIter<'_, M, V> {
        MappedIter::new(self.inner.iter())
    }

    /// Returns an iterator over the rebuilt keys.
    #[must_use]
    pub fn keys(&self) -> MappedKeys<'_, M, V> {
        MappedKeys::new(self.inner.keys())
    }

    /// Returns an iterator over the values.
    #[must_use]
    pub fn values(&self) -> Values<'_, M::Mapped, V> {
        self.inner.values()
    }

    /// Structural equality over the primitive view with a caller-supplied
    /// value comparison.
    #[must_use]
    pub fn equals_with<F: FnMut(&V, &V) -> bool>(&self, other: &Self, value_eq: F) -> bool {
        self.inner.equals_with(&other.inner, value_eq)
    }
}

// ---------------------------------------------------------------------------
// Write operations — V: Clone
// ---------------------------------------------------------------------------

impl<M: KeyMapping, V: Clone> IMapMapped<M, V> {
    /// Returns a map with `key ↦ value` added or overwritten.
    #[must_use]
    pub fn insert(&self, key: M::Key, value: V) -> Self {
        Self::from_primitive(self.inner.insert(M::to_key(&key), value))
    }

    /// Like [`insert`](Self::insert), sharing `self`'s store when the stored
    /// value is already equal to `value`.
    #[must_use]
    pub fn insert_if_changed(&self, key: M::Key, value: V) -> Self
    where
        V: PartialEq,
    {
        Self::from_primitive(self.inner.insert_if_changed(M::to_key(&key), value))
    }

    /// Returns a map without `key`.
    #[must_use]
    pub fn remove(&self, key: &M::Key) -> Self {
        Self::from_primitive(self.inner.remove(&M::to_key(key)))
    }

    /// Returns a map with the value at `key` replaced by `updater(old)`.
    /// The updater never runs for absent keys.
    #[must_use]
    pub fn update<F: FnOnce(&V) -> V>(&self, key: &M::Key, updater: F) -> Self {
        Self::from_primitive(self.inner.update(&M::to_key(key), updater))
    }

    /// Applies every intent of `plan` in order with a single store copy.
    ///
    /// Intent keys are projected once each; the plan is then applied by the
    /// underlying map unchanged.
    #[must_use]
    pub fn apply_batch(&self, plan: BatchPlan<'_, M::Key, V>) -> Self {
        Self::from_primitive(self.inner.apply_batch(plan.map_keys(|k| M::to_key(&k))))
    }

    /// Like [`apply_batch`](Self::apply_batch), consuming `self`.
    #[must_use]
    pub fn into_batch(self, plan: BatchPlan<'_, M::Key, V>) -> Self {
        Self::from_primitive(self.inner.into_batch(plan.map_keys(|k| M::to_key(&k))))
    }

    /// Returns a map with every pair of `entries` inserted, in order.
    #[must_use]
    pub fn extended<I: IntoIterator<Item = (M::Key, V)>>(self, entries: I) -> Self {
        Self::from_primitive(
            self.inner
                .extended(entries.into_iter().map(|(k, v)| (M::to_key(&k), v))),
        )
    }

    /// Returns a map with the entries for which `pred` returns `true`.
    #[must_use]
    pub fn filter<F: FnMut(&M::Key, &V) -> bool>(&self, mut pred: F) -> Self {
        Self::from_primitive(self.inner.filter(|km, v| pred(&M::from_key(km), v)))
    }

    /// Returns a map with every value transformed by `f`.
    #[must_use]
    pub fn map_values<U, F: FnMut(&M::Key, &V) -> U>(&self, mut f: F) -> IMapMapped<M, U> {
        IMapMapped::from_primitive(self.inner.map_values(|km, v| f(&M::from_key(km), v)))
    }

    /// Returns the union of both maps; on shared keys `other`'s value wins.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self::from_primitive(self.inner.merge(&other.inner))
    }

    /// Key-presence diff from `self` (old) to `newer`.
    #[must_use]
    pub fn diff(&self, newer: &Self) -> Diff<Self> {
        let Diff { added, deleted } = self.inner.diff(&newer.inner);
        Diff {
            added: Self::from_primitive(added),
            deleted: Self::from_primitive(deleted),
        }
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<M: KeyMapping, V> Clone for IMapMapped<M, V> {
    fn clone(&self) -> Self {
        Self::from_primitive(self.inner.clone())
    }
}

impl<M: KeyMapping, V> Default for IMapMapped<M, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: KeyMapping, V: fmt::Debug> fmt::Debug for IMapMapped<M, V>
where
    M::Key: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IMapMapped ")?;
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<M: KeyMapping, V: PartialEq> PartialEq for IMapMapped<M, V> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<M: KeyMapping, V: Eq> Eq for IMapMapped<M, V> {}

impl<M: KeyMapping, V> Hash for IMapMapped<M, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<M: KeyMapping, V> FromIterator<(M::Key, V)> for IMapMapped<M, V> {
    fn from_iter<I: IntoIterator<Item = (M::Key, V)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl<'a, M: KeyMapping, V> IntoIterator for &'a IMapMapped<M, V> {
    type Item = (M::Key, &'a V);
    type IntoIter = MappedIter<'a, M, V>;

    fn into_iter(self) -> MappedIter<'a, M, V> {
        self.iter()
    }
}
