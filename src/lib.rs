//! Immutable hash map and set with copy-on-write storage.
//!
//! [`IMap`] and [`ISet`] behave like the standard hash collections from the
//! caller's side, but never change in place: every write-like method returns
//! a new collection. Unmodified storage is shared between versions through
//! an `Arc`, and a [`BatchPlan`] applies any number of writes with a single
//! copy of the backing store.
//!
//! Keys of the base collections are [`Primitive`]s. Any other key type can
//! be used through a [`KeyMapping`], which projects it to a primitive and
//! rebuilds it on the way out ([`IMapMapped`], [`ISetMapped`]).
//!
//! # Key properties
//!
//! - **Immutability**: a published collection never changes
//! - **COW sharing**: no-op writes share storage; real writes copy once
//! - **Batching**: O(plan + size) per batch, not O(plan × size)
//! - **Fast inequality**: size and key-set `AdHash` reject before any entry
//!   comparison
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`IMap`] and [`ISet`]
//! - `tracing`: `trace!` events on store copies and batch application

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Emits a `tracing::trace!` event when the `tracing` feature is enabled.
macro_rules! trace_event {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
    };
}

pub(crate) use trace_event;

pub mod adhash;
pub mod batch;
pub mod iter;
pub mod key;
pub mod mapping;

mod map;
mod map_mapped;
#[cfg(feature = "serde")]
mod serde_impl;
mod set;
mod set_mapped;
mod store;

#[cfg(test)]
mod tests;

pub use batch::{BatchPlan, Intent};
pub use key::{NumberKey, Primitive, PrimitiveKey};
pub use map::IMap;
pub use map_mapped::IMapMapped;
pub use mapping::KeyMapping;
pub use set::ISet;
pub use set_mapped::ISetMapped;

/// Entries added and deleted between an old and a new collection.
///
/// Returned by the `diff` method of every collection flavor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diff<C> {
    /// Entries of the new collection whose keys the old one lacks.
    pub added: C,
    /// Entries of the old collection whose keys the new one lacks.
    pub deleted: C,
}
