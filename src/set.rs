//! Immutable primitive-keyed hash set.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::Diff;
use crate::batch::BatchPlan;
use crate::iter::SetIter;
use crate::key::Primitive;
use crate::map::IMap;

/// Immutable hash set over [`Primitive`] elements.
///
/// A projection of [`IMap`] with unit values: same sharing, batching and
/// equality rules.
pub struct ISet<K> {
    map: IMap<K, ()>,
}

// ---------------------------------------------------------------------------
// Construction & accessors — no trait bounds
// ---------------------------------------------------------------------------

impl<K> ISet<K> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self { map: IMap::new() }
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns `true` if both sets share the same backing store.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.map.ptr_eq(&other.map)
    }

    /// Returns an iterator over the elements.
    #[must_use]
    pub fn iter(&self) -> SetIter<'_, K> {
        self.map.keys()
    }

    /// Returns the underlying unit-valued map.
    #[must_use]
    pub const fn as_map(&self) -> &IMap<K, ()> {
        &self.map
    }
}

// ---------------------------------------------------------------------------
// Read operations — K: Hash + Eq
// ---------------------------------------------------------------------------

impl<K: Hash + Eq> ISet<K> {
    /// Returns `true` if the set contains `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Returns `true` if every element of `self` is in `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|k| other.contains(k))
    }

    /// Returns `true` if every element of `other` is in `self`.
    #[must_use]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        other.is_subset_of(self)
    }
}

// ---------------------------------------------------------------------------
// Write operations & set algebra — K: Primitive
// ---------------------------------------------------------------------------

impl<K: Primitive> ISet<K> {
    /// Returns a set with `key` added. Present keys return a set sharing
    /// `self`'s store.
    #[must_use]
    pub fn insert(&self, key: K) -> Self {
        Self {
            map: self.map.insert_if_changed(key, ()),
        }
    }

    /// Returns a set without `key`. Absent keys return a set sharing
    /// `self`'s store.
    #[must_use]
    pub fn remove(&self, key: &K) -> Self {
        Self {
            map: self.map.remove(key),
        }
    }

    /// Applies a plan of `add`/`delete` intents with a single store copy.
    ///
    /// `update` intents are accepted and have no visible effect beyond
    /// running the updater for present elements.
    #[must_use]
    pub fn apply_batch(&self, plan: BatchPlan<'_, K, ()>) -> Self {
        Self {
            map: self.map.apply_batch(plan),
        }
    }

    /// Like [`apply_batch`](Self::apply_batch), consuming `self`.
    #[must_use]
    pub fn into_batch(self, plan: BatchPlan<'_, K, ()>) -> Self {
        Self {
            map: self.map.into_batch(plan),
        }
    }

    /// Returns a set with every element of `keys` added.
    ///
    /// Consumes `self`, so a sole owner fills its store in place.
    #[must_use]
    pub fn extended<I: IntoIterator<Item = K>>(self, keys: I) -> Self {
        Self {
            map: self.map.extended(keys.into_iter().map(|k| (k, ()))),
        }
    }

    /// Returns the elements present in `self` or `other`.
    ///
    /// Copies the larger operand once and adds the smaller one to it.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            map: self.map.merge(&other.map),
        }
    }

    /// Returns the elements present in both sets, in one pass over the
    /// smaller.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.filter(|k| large.contains(k))
    }

    /// Returns the elements of `self` not present in `other`.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        self.filter(|k| !other.contains(k))
    }

    /// Returns the elements added and deleted going from `self` (old) to
    /// `newer`.
    #[must_use]
    pub fn diff(&self, newer: &Self) -> Diff<Self> {
        Diff {
            added: newer.subtract(self),
            deleted: self.subtract(newer),
        }
    }

    /// Returns the elements for which `pred` returns `true`.
    #[must_use]
    pub fn filter<F: FnMut(&K) -> bool>(&self, mut pred: F) -> Self {
        Self {
            map: self.map.filter(|k, _| pred(k)),
        }
    }

    /// Returns the set of `f` applied to each element.
    #[must_use]
    pub fn map<K2: Primitive, F: FnMut(&K) -> K2>(&self, mut f: F) -> ISet<K2> {
        ISet {
            map: self.map.map_keys(|k, _| f(k)),
        }
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K> Clone for ISet<K> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<K> Default for ISet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for ISet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ISet ")?;
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq> PartialEq for ISet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<K: Hash + Eq> Eq for ISet<K> {}

impl<K> Hash for ISet<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.map.hash(state);
    }
}

impl<K: Hash + Eq> FromIterator<K> for ISet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().map(|k| (k, ())).collect(),
        }
    }
}

impl<K: Hash + Eq, const N: usize> From<[K; N]> for ISet<K> {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<K> From<IMap<K, ()>> for ISet<K> {
    fn from(map: IMap<K, ()>) -> Self {
        Self { map }
    }
}

impl<'a, K> IntoIterator for &'a ISet<K> {
    type Item = &'a K;
    type IntoIter = SetIter<'a, K>;

    fn into_iter(self) -> SetIter<'a, K> {
        self.iter()
    }
}
