//! Batched mutation plans.
//!
//! A [`BatchPlan`] is an ordered list of [`Intent`]s consumed by
//! [`IMap::apply_batch`](crate::IMap::apply_batch) and its siblings. Applying
//! a plan has the same effect as calling the matching single-entry method
//! for each intent in order, but copies the backing store once instead of
//! once per intent.

use std::fmt;

/// Boxed value updater carried by [`Intent::Update`].
pub type Updater<'a, V> = Box<dyn FnOnce(&V) -> V + 'a>;

/// One mutation intent in a [`BatchPlan`].
pub enum Intent<'a, K, V> {
    /// Insert or overwrite `key ↦ value`.
    Set {
        /// Target key.
        key: K,
        /// New value.
        value: V,
    },
    /// Replace the value at `key` with `updater(old)`. Ignored, without
    /// running the updater, if `key` is absent at that point of the plan.
    Update {
        /// Target key.
        key: K,
        /// Computes the new value from the current one.
        updater: Updater<'a, V>,
    },
    /// Remove `key` if present.
    Delete {
        /// Target key.
        key: K,
    },
}

impl<'a, K, V> Intent<'a, K, V> {
    /// Returns the key this intent targets.
    #[must_use]
    pub const fn key(&self) -> &K {
        match self {
            Self::Set { key, .. } | Self::Update { key, .. } | Self::Delete { key } => key,
        }
    }

    /// Rewrites the intent's key, leaving the operation untouched.
    #[must_use]
    pub fn map_key<K2>(self, f: impl FnOnce(K) -> K2) -> Intent<'a, K2, V> {
        match self {
            Self::Set { key, value } => Intent::Set { key: f(key), value },
            Self::Update { key, updater } => Intent::Update {
                key: f(key),
                updater,
            },
            Self::Delete { key } => Intent::Delete { key: f(key) },
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Intent<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set { key, value } => f
                .debug_struct("Set")
                .field("key", key)
                .field("value", value)
                .finish(),
            Self::Update { key, .. } => f
                .debug_struct("Update")
                .field("key", key)
                .finish_non_exhaustive(),
            Self::Delete { key } => f.debug_struct("Delete").field("key", key).finish(),
        }
    }
}

/// Ordered, finite sequence of mutation intents.
///
/// ```
/// use immap::{BatchPlan, IMap};
///
/// let m: IMap<&str, i32> = IMap::new();
/// let plan = BatchPlan::new()
///     .set("x", 1_i32)
///     .update("x", |v| v + 1)
///     .delete("y");
/// let m2 = m.apply_batch(plan);
/// assert_eq!(m2.get(&"x"), Some(&2));
/// assert_eq!(m2.len(), 1);
/// assert!(m.is_empty());
/// ```
pub struct BatchPlan<'a, K, V> {
    intents: Vec<Intent<'a, K, V>>,
}

impl<'a, K, V> BatchPlan<'a, K, V> {
    /// Creates an empty plan.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            intents: Vec::new(),
        }
    }

    /// Creates an empty plan with room for `capacity` intents.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            intents: Vec::with_capacity(capacity),
        }
    }

    /// Appends a `set` intent.
    #[must_use]
    pub fn set(mut self, key: K, value: V) -> Self {
        self.intents.push(Intent::Set { key, value });
        self
    }

    /// Appends an `update` intent.
    #[must_use]
    pub fn update(mut self, key: K, updater: impl FnOnce(&V) -> V + 'a) -> Self {
        self.intents.push(Intent::Update {
            key,
            updater: Box::new(updater),
        });
        self
    }

    /// Appends a `delete` intent.
    #[must_use]
    pub fn delete(mut self, key: K) -> Self {
        self.intents.push(Intent::Delete { key });
        self
    }

    /// Appends an intent in place.
    pub fn push(&mut self, intent: Intent<'a, K, V>) {
        self.intents.push(intent);
    }

    /// Returns the number of intents.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.intents.len()
    }

    /// Returns `true` if the plan has no intents.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Returns the intents in application order.
    #[must_use]
    pub fn intents(&self) -> &[Intent<'a, K, V>] {
        &self.intents
    }

    /// Rewrites every intent's key, preserving order and operations.
    #[must_use]
    pub fn map_keys<K2>(self, mut f: impl FnMut(K) -> K2) -> BatchPlan<'a, K2, V> {
        BatchPlan {
            intents: self
                .intents
                .into_iter()
                .map(|intent| intent.map_key(&mut f))
                .collect(),
        }
    }
}

impl<K> BatchPlan<'_, K, ()> {
    /// Appends a set-membership `add` intent.
    #[must_use]
    pub fn add(self, key: K) -> Self {
        self.set(key, ())
    }
}

impl<K, V> Default for BatchPlan<'_, K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BatchPlan<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.intents).finish()
    }
}

impl<'a, K, V> FromIterator<Intent<'a, K, V>> for BatchPlan<'a, K, V> {
    fn from_iter<I: IntoIterator<Item = Intent<'a, K, V>>>(iter: I) -> Self {
        Self {
            intents: iter.into_iter().collect(),
        }
    }
}

impl<'a, K, V> Extend<Intent<'a, K, V>> for BatchPlan<'a, K, V> {
    fn extend<I: IntoIterator<Item = Intent<'a, K, V>>>(&mut self, iter: I) {
        self.intents.extend(iter);
    }
}

impl<'a, K, V> IntoIterator for BatchPlan<'a, K, V> {
    type Item = Intent<'a, K, V>;
    type IntoIter = std::vec::IntoIter<Intent<'a, K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.intents.into_iter()
    }
}
