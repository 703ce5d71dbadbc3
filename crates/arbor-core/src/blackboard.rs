use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Vec3;

/// Shared typed key/value store visible to every node of one tree.
///
/// The store keeps five independent maps, one per value type (`f32`, `i32`,
/// `bool`, [`Vec3`], `String`). Type and key together form identity: the same key
/// string may live in several maps at once with unrelated values, and callers
/// agree out-of-band on which type a given key holds.
///
/// Writes are visible immediately. An action that sets a key is observed by a
/// sibling condition ticked later in the same pass.
///
/// ```
/// use arbor_core::Blackboard;
///
/// let mut bb = Blackboard::new();
/// bb.set("hp", 42.0f32);
/// assert_eq!(bb.get("hp", 0.0f32), 42.0);
/// assert_eq!(bb.get("missing", 7), 7);
/// bb.remove_key("hp");
/// assert!(!bb.has_key("hp"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Blackboard {
    floats: HashMap<String, f32>,
    ints: HashMap<String, i32>,
    bools: HashMap<String, bool>,
    vectors: HashMap<String, Vec3>,
    strings: HashMap<String, String>,
}

mod sealed {
    pub trait Sealed {}
}

/// A value type that has its own map on the [`Blackboard`].
///
/// Sealed: the set of types is fixed.
pub trait BlackboardValue: Clone + sealed::Sealed + 'static {
    #[doc(hidden)]
    fn slot(blackboard: &Blackboard) -> &HashMap<String, Self>;

    #[doc(hidden)]
    fn slot_mut(blackboard: &mut Blackboard) -> &mut HashMap<String, Self>;
}

macro_rules! blackboard_value {
    ($ty:ty, $field:ident) => {
        impl sealed::Sealed for $ty {}

        impl BlackboardValue for $ty {
            #[inline]
            fn slot(blackboard: &Blackboard) -> &HashMap<String, Self> {
                &blackboard.$field
            }

            #[inline]
            fn slot_mut(blackboard: &mut Blackboard) -> &mut HashMap<String, Self> {
                &mut blackboard.$field
            }
        }
    };
}

blackboard_value!(f32, floats);
blackboard_value!(i32, ints);
blackboard_value!(bool, bools);
blackboard_value!(Vec3, vectors);
blackboard_value!(String, strings);

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under `key` in `T`'s map, or `default` if absent there.
    ///
    /// A key stored only under another type counts as absent.
    pub fn get<T: BlackboardValue>(&self, key: &str, default: T) -> T {
        self.get_ref::<T>(key).cloned().unwrap_or(default)
    }

    pub fn get_ref<T: BlackboardValue>(&self, key: &str) -> Option<&T> {
        T::slot(self).get(key)
    }

    pub fn get_mut<T: BlackboardValue>(&mut self, key: &str) -> Option<&mut T> {
        T::slot_mut(self).get_mut(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    pub fn set<T: BlackboardValue>(&mut self, key: impl Into<String>, value: T) {
        T::slot_mut(self).insert(key.into(), value);
    }

    pub fn set_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    /// True if `key` exists in `T`'s map.
    pub fn contains<T: BlackboardValue>(&self, key: &str) -> bool {
        T::slot(self).contains_key(key)
    }

    /// True if `key` exists in any of the typed maps.
    pub fn has_key(&self, key: &str) -> bool {
        self.floats.contains_key(key)
            || self.ints.contains_key(key)
            || self.bools.contains_key(key)
            || self.vectors.contains_key(key)
            || self.strings.contains_key(key)
    }

    /// Removes `key` from `T`'s map only.
    pub fn remove<T: BlackboardValue>(&mut self, key: &str) -> Option<T> {
        T::slot_mut(self).remove(key)
    }

    /// Removes `key` from every typed map. Returns whether anything was removed.
    pub fn remove_key(&mut self, key: &str) -> bool {
        let mut removed = self.floats.remove(key).is_some();
        removed |= self.ints.remove(key).is_some();
        removed |= self.bools.remove(key).is_some();
        removed |= self.vectors.remove(key).is_some();
        removed |= self.strings.remove(key).is_some();
        removed
    }

    pub fn clear(&mut self) {
        self.floats.clear();
        self.ints.clear();
        self.bools.clear();
        self.vectors.clear();
        self.strings.clear();
    }

    /// Total number of entries across all typed maps.
    pub fn len(&self) -> usize {
        self.floats.len()
            + self.ints.len()
            + self.bools.len()
            + self.vectors.len()
            + self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies every entry of `other` into `self`, overwriting same-typed keys.
    pub fn extend_from(&mut self, other: &Blackboard) {
        self.floats
            .extend(other.floats.iter().map(|(k, v)| (k.clone(), *v)));
        self.ints
            .extend(other.ints.iter().map(|(k, v)| (k.clone(), *v)));
        self.bools
            .extend(other.bools.iter().map(|(k, v)| (k.clone(), *v)));
        self.vectors
            .extend(other.vectors.iter().map(|(k, v)| (k.clone(), *v)));
        self.strings
            .extend(other.strings.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}
