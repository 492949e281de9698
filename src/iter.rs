//! Iterator types for the immutable collections.
//!
//! Every iterator borrows one instance's backing store. Iterating the same
//! instance again yields the same order; order across different instances
//! is unspecified.

use std::collections::hash_map;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::mapping::KeyMapping;

/// Iterator over `(&K, &V)` pairs of an [`IMap`](crate::IMap).
pub struct Iter<'a, K, V> {
    inner: hash_map::Iter<'a, K, V>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) const fn new(inner: hash_map::Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Iterator over the keys of an [`IMap`](crate::IMap) or the elements of an
/// [`ISet`](crate::ISet).
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) const fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Iterator over the elements of an [`ISet`](crate::ISet).
pub type SetIter<'a, K> = Keys<'a, K, ()>;

/// Iterator over the values of an [`IMap`](crate::IMap).
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) const fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

// ---------------------------------------------------------------------------
// Mapped iterators — reconstruct keys through `KeyMapping::from_key`
// ---------------------------------------------------------------------------

/// Iterator over `(K, &V)` pairs of an [`IMapMapped`](crate::IMapMapped).
///
/// Keys are rebuilt from their mapped form on every step, so they are
/// yielded by value.
pub struct MappedIter<'a, M: KeyMapping, V> {
    inner: Iter<'a, M::Mapped, V>,
    _mapping: PhantomData<fn() -> M>,
}

impl<'a, M: KeyMapping, V> MappedIter<'a, M, V> {
    pub(crate) const fn new(inner: Iter<'a, M::Mapped, V>) -> Self {
        Self {
            inner,
            _mapping: PhantomData,
        }
    }
}

impl<'a, M: KeyMapping, V> Iterator for MappedIter<'a, M, V> {
    type Item = (M::Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(km, v)| (M::from_key(km), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<M: KeyMapping, V> ExactSizeIterator for MappedIter<'_, M, V> {}

impl<M: KeyMapping, V> FusedIterator for MappedIter<'_, M, V> {}

/// Iterator over the reconstructed keys of an
/// [`IMapMapped`](crate::IMapMapped) or elements of an
/// [`ISetMapped`](crate::ISetMapped).
pub struct MappedKeys<'a, M: KeyMapping, V> {
    inner: Keys<'a, M::Mapped, V>,
    _mapping: PhantomData<fn() -> M>,
}

impl<'a, M: KeyMapping, V> MappedKeys<'a, M, V> {
    pub(crate) const fn new(inner: Keys<'a, M::Mapped, V>) -> Self {
        Self {
            inner,
            _mapping: PhantomData,
        }
    }
}

impl<M: KeyMapping, V> Iterator for MappedKeys<'_, M, V> {
    type Item = M::Key;

    fn next(&mut self) -> Option<M::Key> {
        self.inner.next().map(M::from_key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<M: KeyMapping, V> ExactSizeIterator for MappedKeys<'_, M, V> {}

impl<M: KeyMapping, V> FusedIterator for MappedKeys<'_, M, V> {}
