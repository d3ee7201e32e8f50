//! Opaque argument-slot identifiers and sets of them.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one argument slot within a command schema.
///
/// The constraint engine compares these tokens and nothing else; it never
/// learns the prefix or label a slot is displayed as. Ids are plain values:
/// totally ordered, hashable, and equal only when they denote the same slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ArgId(u16);

impl ArgId {
    /// Create an id from its raw schema-local value.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ArgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// The set of argument slots already present in the line being typed.
///
/// Value-equal with set semantics: duplicates collapse and ordering carries
/// no meaning. Callers build a fresh set per suggestion query; the engine
/// only ever reads it and keeps no reference past the call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArgSet(BTreeSet<ArgId>);

impl ArgSet {
    /// The empty set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ArgId) -> bool {
        self.0.contains(&id)
    }

    /// Record a slot as present. Returns false if it already was.
    pub fn insert(&mut self, id: ArgId) -> bool {
        self.0.insert(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, ArgId> {
        self.0.iter()
    }
}

impl FromIterator<ArgId> for ArgSet {
    fn from_iter<I: IntoIterator<Item = ArgId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[ArgId; N]> for ArgSet {
    fn from(ids: [ArgId; N]) -> Self {
        ids.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a ArgSet {
    type Item = &'a ArgId;
    type IntoIter = btree_set::Iter<'a, ArgId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_equal_only_for_same_slot() {
        assert_eq!(ArgId::new(3), ArgId::new(3));
        assert_ne!(ArgId::new(3), ArgId::new(4));
    }

    #[test]
    fn test_set_collapses_duplicates() {
        let set: ArgSet = [ArgId::new(1), ArgId::new(1), ArgId::new(2)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(ArgId::new(1)));
        assert!(!set.contains(ArgId::new(9)));
    }

    #[test]
    fn test_set_value_equality() {
        let a = ArgSet::from([ArgId::new(2), ArgId::new(1)]);
        let b = ArgSet::from([ArgId::new(1), ArgId::new(2)]);
        assert_eq!(a, b);
    }
}
