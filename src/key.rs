//! Primitive key kinds accepted by the base collections.
//!
//! A collection is instantiated with exactly one concrete key type. Any type
//! implementing [`Primitive`] qualifies; [`PrimitiveKey`] covers the case
//! where one collection must hold keys of several primitive kinds at once.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A key type usable directly by [`IMap`](crate::IMap) and [`ISet`](crate::ISet).
///
/// Primitive keys are cheap to clone and compare and have a hash consistent
/// with their equality. Non-primitive keys go through a
/// [`KeyMapping`](crate::KeyMapping) instead.
pub trait Primitive: Hash + Eq + Clone {}

macro_rules! impl_primitive {
    ($($ty:ty),* $(,)?) => {
        $(impl Primitive for $ty {})*
    };
}

impl_primitive!(
    String,
    Arc<str>,
    Box<str>,
    &'static str,
    bool,
    char,
    (),
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    NumberKey,
    PrimitiveKey,
);

// ---------------------------------------------------------------------------
// NumberKey
// ---------------------------------------------------------------------------

/// Floating-point key compared with SameValueZero semantics.
///
/// `NaN` equals `NaN`, and `+0.0` equals `-0.0`. All other values compare
/// by their numeric value.
#[derive(Clone, Copy)]
pub struct NumberKey(f64);

impl NumberKey {
    /// Wraps a float, folding `-0.0` into `+0.0` and every `NaN` into one.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        if value.is_nan() {
            Self(f64::NAN)
        } else if value == 0.0 {
            Self(0.0)
        } else {
            Self(value)
        }
    }

    /// Returns the wrapped float.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    const fn bits(self) -> u64 {
        self.0.to_bits()
    }
}

impl PartialEq for NumberKey {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for NumberKey {}

impl Hash for NumberKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl fmt::Debug for NumberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl From<f64> for NumberKey {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for NumberKey {
    fn from(value: i32) -> Self {
        Self::new(f64::from(value))
    }
}

// ---------------------------------------------------------------------------
// PrimitiveKey
// ---------------------------------------------------------------------------

/// Tagged union of every admissible primitive key kind.
///
/// Values of different kinds never compare equal: `Number(1.0)` and
/// `BigInt(1)` are distinct keys, as are `Null` and `Undefined`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveKey {
    /// The absent value.
    Undefined,
    /// The null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A float with SameValueZero equality.
    Number(NumberKey),
    /// An arbitrary-precision integer, bounded here to 128 bits.
    BigInt(i128),
    /// A string.
    Str(Arc<str>),
    /// A symbol, identified by a caller-assigned id.
    Symbol(u64),
}

impl PrimitiveKey {
    /// Returns the name of this key's kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::BigInt(_) => "bigint",
            Self::Str(_) => "string",
            Self::Symbol(_) => "symbol",
        }
    }
}

impl fmt::Debug for PrimitiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n:?}"),
            Self::BigInt(i) => write!(f, "{i}n"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Symbol(id) => write!(f, "Symbol({id})"),
        }
    }
}

impl From<bool> for PrimitiveKey {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PrimitiveKey {
    fn from(value: f64) -> Self {
        Self::Number(NumberKey::new(value))
    }
}

impl From<i32> for PrimitiveKey {
    fn from(value: i32) -> Self {
        Self::Number(NumberKey::from(value))
    }
}

impl From<i128> for PrimitiveKey {
    fn from(value: i128) -> Self {
        Self::BigInt(value)
    }
}

impl From<&str> for PrimitiveKey {
    fn from(value: &str) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<String> for PrimitiveKey {
    fn from(value: String) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<Arc<str>> for PrimitiveKey {
    fn from(value: Arc<str>) -> Self {
        Self::Str(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for PrimitiveKey {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Undefined, Into::into)
    }
}
