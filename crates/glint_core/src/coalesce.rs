//! Shallow comparison and partial-update merging
//!
//! [`ShallowEq`] decides whether a single field changed: scalars compare by
//! value, shared composites (`Arc`, `Rc`) compare by pointer identity.
//! [`Coalesce`] lifts that to a whole state object and its partial patch.
//!
//! Structs normally get their [`Coalesce`] impl from
//! `#[derive(ShallowState)]`, which compares every field present in the
//! patch and leaves absent fields alone. Map-shaped state (`HashMap`,
//! `FxHashMap`, `IndexMap`) is supported directly, with a patch of the same
//! map type.

use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;

/// Field-level change detection used by [`Coalesce`] implementations.
///
/// Two values are shallow-equal when replacing one with the other would not
/// be observable by a consumer that compares scalars by value and shared
/// composites by identity.
pub trait ShallowEq {
    fn shallow_eq(&self, other: &Self) -> bool;
}

/// Implement [`ShallowEq`] by value (`PartialEq`) for the listed types.
///
/// Use this for application types that behave like scalars (enums, colors,
/// small `Copy` structs):
///
/// ```rust
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// enum Tone { Neutral, Accent }
///
/// glint_core::impl_shallow_eq_by_value!(Tone);
/// ```
#[macro_export]
macro_rules! impl_shallow_eq_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::ShallowEq for $ty {
                #[inline]
                fn shallow_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_shallow_eq_by_value!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    // IEEE semantics: NaN never equals itself, so a NaN field always counts as a change
    f32,
    f64,
    &'static str,
    String,
);

impl<T: ?Sized> ShallowEq for Arc<T> {
    #[inline]
    fn shallow_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> ShallowEq for Rc<T> {
    #[inline]
    fn shallow_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ShallowEq> ShallowEq for Option<T> {
    #[inline]
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.shallow_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// A state shape that accepts partial updates.
///
/// Implementations must keep `differs` and `merged` consistent: whenever
/// `differs` returns `false`, `merged` would produce a value shallow-equal to
/// `self`, which is what lets [`CoalescedState`](crate::CoalescedState) skip
/// the merge entirely.
pub trait Coalesce: Sized {
    /// Partial update: every field optional, absent fields are left alone.
    type Patch;

    /// Returns `true` if at least one field present in `patch` differs from
    /// the corresponding field of `self`.
    fn differs(&self, patch: &Self::Patch) -> bool;

    /// Returns a fresh value with every field present in `patch` overlaid on
    /// `self`. Neither input is modified.
    fn merged(&self, patch: &Self::Patch) -> Self;
}

impl<K, V, S> Coalesce for HashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: ShallowEq + Clone,
    S: BuildHasher + Clone,
{
    type Patch = Self;

    fn differs(&self, patch: &Self) -> bool {
        // A key missing from the current state counts as a change
        patch
            .iter()
            .any(|(key, value)| !self.get(key).is_some_and(|cur| cur.shallow_eq(value)))
    }

    fn merged(&self, patch: &Self) -> Self {
        let mut next = self.clone();
        next.extend(patch.iter().map(|(k, v)| (k.clone(), v.clone())));
        next
    }
}

impl<K, V, S> Coalesce for IndexMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: ShallowEq + Clone,
    S: BuildHasher + Clone,
{
    type Patch = Self;

    fn differs(&self, patch: &Self) -> bool {
        patch
            .iter()
            .any(|(key, value)| !self.get(key).is_some_and(|cur| cur.shallow_eq(value)))
    }

    /// Existing keys keep their position; new keys are appended in patch order.
    fn merged(&self, patch: &Self) -> Self {
        let mut next = self.clone();
        next.extend(patch.iter().map(|(k, v)| (k.clone(), v.clone())));
        next
    }
}
