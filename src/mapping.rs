//! Key mapping: arbitrary key types over primitive-keyed storage.

use crate::key::Primitive;

/// A pair of total functions projecting a custom key to a [`Primitive`]
/// and back.
///
/// Implementors are usually zero-sized marker types, so every mapped
/// collection is monomorphized over its mapping and calls `to_key`/`from_key`
/// directly.
///
/// # Contract
///
/// For every key `k` ever inserted, `from_key(&to_key(&k))` must be
/// observably equivalent to `k`, and `to_key` should be injective. Neither
/// property is checked. If `to_key` maps two distinct keys to the same
/// primitive, they occupy one slot and the last write wins; if `from_key`
/// is not an inverse, iteration yields keys that differ from the inserted
/// ones.
///
/// ```
/// use immap::{ISetMapped, KeyMapping};
///
/// #[derive(Debug, PartialEq)]
/// struct User {
///     id: u32,
/// }
///
/// struct ById;
///
/// impl KeyMapping for ById {
///     type Key = User;
///     type Mapped = u32;
///
///     fn to_key(key: &User) -> u32 {
///         key.id
///     }
///
///     fn from_key(mapped: &u32) -> User {
///         User { id: *mapped }
///     }
/// }
///
/// let users: ISetMapped<ById> = ISetMapped::new().insert(User { id: 1 });
/// assert!(users.contains(&User { id: 1 }));
/// assert_eq!(users.iter().collect::<Vec<_>>(), vec![User { id: 1 }]);
/// ```
pub trait KeyMapping {
    /// The caller-facing key type.
    type Key;

    /// The primitive key actually stored.
    type Mapped: Primitive;

    /// Projects a key to its primitive form.
    fn to_key(key: &Self::Key) -> Self::Mapped;

    /// Reconstructs a key from its primitive form.
    fn from_key(mapped: &Self::Mapped) -> Self::Key;
}
