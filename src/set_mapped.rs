//! Immutable hash set of elements stored through a [`KeyMapping`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::Diff;
use crate::batch::BatchPlan;
use crate::iter::MappedKeys;
use crate::mapping::KeyMapping;
use crate::set::ISet;

/// Immutable hash set over arbitrary elements, stored under their
/// [`KeyMapping::Mapped`] projection.
pub struct ISetMapped<M: KeyMapping> {
    inner: ISet<M::Mapped>,
    _mapping: PhantomData<fn() -> M>,
}

impl<M: KeyMapping> ISetMapped<M> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::from_primitive(ISet::new())
    }

    /// Wraps a primitive set. Its elements must be projections of keys `M`
    /// can rebuild.
    #[must_use]
    pub const fn from_primitive(inner: ISet<M::Mapped>) -> Self {
        Self {
            inner,
            _mapping: PhantomData,
        }
    }

    /// Returns the primitive view.
    #[must_use]
    pub const fn as_primitive(&self) -> &ISet<M::Mapped> {
        &self.inner
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns `true` if both sets share the same backing store.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.inner.ptr_eq(&other.inner)
    }

    /// Returns `true` if the set contains `key`.
    #[must_use]
    pub fn contains(&self, key: &M::Key) -> bool {
        self.inner.contains(&M::to_key(key))
    }

    /// Returns an iterator over the rebuilt elements.
    #[must_use]
    pub fn iter(&self) -> MappedKeys<'_, M, ()> {
        MappedKeys::new(self.inner.iter())
    }

    /// Returns a set with `key` added.
    #[must_use]
    pub fn insert(&self, key: M::Key) -> Self {
        Self::from_primitive(self.inner.insert(M::to_key(&key)))
    }

    /// Returns a set without `key`.
    #[must_use]
    pub fn remove(&self, key: &M::Key) -> Self {
        Self::from_primitive(self.inner.remove(&M::to_key(key)))
    }

    /// Applies a plan of `add`/`delete` intents with a single store copy.
    #[must_use]
    pub fn apply_batch(&self, plan: BatchPlan<'_, M::Key, ()>) -> Self {
        Self::from_primitive(self.inner.apply_batch(plan.map_keys(|k| M::to_key(&k))))
    }

    /// Like [`apply_batch`](Self::apply_batch), consuming `self`.
    #[must_use]
    pub fn into_batch(self, plan: BatchPlan<'_, M::Key, ()>) -> Self {
        Self::from_primitive(self.inner.into_batch(plan.map_keys(|k| M::to_key(&k))))
    }

    /// Returns a set with every element of `keys` added.
    #[must_use]
    pub fn extended<I: IntoIterator<Item = M::Key>>(self, keys: I) -> Self {
        Self::from_primitive(self.inner.extended(keys.into_iter().map(|k| M::to_key(&k))))
    }

    /// Returns the elements present in `self` or `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_primitive(self.inner.union(&other.inner))
    }

    /// Returns the elements present in both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self::from_primitive(self.inner.intersection(&other.inner))
    }

    /// Returns the elements of `self` not present in `other`.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        Self::from_primitive(self.inner.subtract(&other.inner))
    }

    /// Returns the elements added and deleted going from `self` (old) to
    /// `newer`.
    #[must_use]
    pub fn diff(&self, newer: &Self) -> Diff<Self> {
        let Diff { added, deleted } = self.inner.diff(&newer.inner);
        Diff {
            added: Self::from_primitive(added),
            deleted: Self::from_primitive(deleted),
        }
    }

    /// Returns `true` if every element of `self` is in `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.inner.is_subset_of(&other.inner)
    }

    /// Returns `true` if every element of `other` is in `self`.
    #[must_use]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        self.inner.is_superset_of(&other.inner)
    }

    /// Returns the elements for which `pred` returns `true`.
    #[must_use]
    pub fn filter<F: FnMut(&M::Key) -> bool>(&self, mut pred: F) -> Self {
        Self::from_primitive(self.inner.filter(|km| pred(&M::from_key(km))))
    }
}

impl<M: KeyMapping> Clone for ISetMapped<M> {
    fn clone(&self) -> Self {
        Self::from_primitive(self.inner.clone())
    }
}

impl<M: KeyMapping> Default for ISetMapped<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: KeyMapping> fmt::Debug for ISetMapped<M>
where
    M::Key: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ISetMapped ")?;
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<M: KeyMapping> PartialEq for ISetMapped<M> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<M: KeyMapping> Eq for ISetMapped<M> {}

impl<M: KeyMapping> Hash for ISetMapped<M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<M: KeyMapping> FromIterator<M::Key> for ISetMapped<M> {
    fn from_iter<I: IntoIterator<Item = M::Key>>(iter: I) -> Self {
        Self::from_primitive(iter.into_iter().map(|k| M::to_key(&k)).collect())
    }
}

impl<'a, M: KeyMapping> IntoIterator for &'a ISetMapped<M> {
    type Item = M::Key;
    type IntoIter = MappedKeys<'a, M, ()>;

    fn into_iter(self) -> MappedKeys<'a, M, ()> {
        self.iter()
    }
}
