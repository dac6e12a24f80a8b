//! Opaque kinds for constructs without a first-class node variant.

use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies the grammar production a native node comes from.
///
/// Front ends provide their own kinds; any `Eq + Hash` type with a
/// `Display` form is a native kind. Two kinds are equal only when they
/// have the same concrete type and compare equal as that type.
pub trait NativeKind: fmt::Debug + fmt::Display + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn kind_eq(&self, other: &dyn NativeKind) -> bool;

    fn kind_hash(&self, state: &mut dyn Hasher);
}

impl<T> NativeKind for T
where
    T: Any + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind_eq(&self, other: &dyn NativeKind) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn kind_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }
}

impl<'k> PartialEq for dyn NativeKind + 'k {
    fn eq(&self, other: &Self) -> bool {
        self.kind_eq(other)
    }
}

impl<'k> Eq for dyn NativeKind + 'k {}

impl<'k> Hash for dyn NativeKind + 'k {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind_hash(state);
    }
}

/// Native kind identified by a plain string, used for trees rebuilt
/// from an external representation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StringNativeKind(String);

impl StringNativeKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StringNativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
