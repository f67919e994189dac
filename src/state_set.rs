use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

use bit_set::BitSet;
use itertools::Itertools;

use crate::StateIndex;

/// A set of state indices, backed by a growable bit vector.
///
/// Equality and hashing only take the contained elements into account, so two sets that
/// were created with different capacities compare equal as long as they hold the same states.
/// This makes a [`StateSet`] usable directly as a key when deduplicating subsets.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: BitSet,
}

impl StateSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set that can hold the states `0..capacity` without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: BitSet::with_capacity(capacity),
        }
    }

    /// Creates the set `{state}`.
    pub fn singleton(state: StateIndex) -> Self {
        let mut set = Self::with_capacity(state + 1);
        set.insert(state);
        set
    }

    /// Inserts `state`, returns `true` if it was not present before.
    pub fn insert(&mut self, state: StateIndex) -> bool {
        self.bits.insert(state)
    }

    /// Removes `state`, returns `true` if it was present.
    pub fn remove(&mut self, state: StateIndex) -> bool {
        self.bits.remove(state)
    }

    /// Checks whether `state` is an element of the set.
    pub fn contains(&self, state: StateIndex) -> bool {
        self.bits.contains(state)
    }

    /// Adds every element of `other` to `self`.
    pub fn union_with(&mut self, other: &StateSet) {
        self.bits.union_with(&other.bits);
    }

    /// Returns `true` if `self` and `other` have at least one element in common.
    pub fn intersects(&self, other: &StateSet) -> bool {
        !self.bits.is_disjoint(&other.bits)
    }

    /// Returns `true` if the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Iterates over the elements in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.bits.iter()
    }

    /// Returns the smallest element, if any.
    pub fn first(&self) -> Option<StateIndex> {
        self.bits.iter().next()
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl Hash for StateSet {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for q in self.iter() {
            q.hash(state);
        }
        self.len().hash(state);
    }
}

impl FromIterator<StateIndex> for StateSet {
    fn from_iter<T: IntoIterator<Item = StateIndex>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<StateIndex> for StateSet {
    fn extend<T: IntoIterator<Item = StateIndex>>(&mut self, iter: T) {
        for q in iter {
            self.insert(q);
        }
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = StateIndex;
    type IntoIter = bit_set::Iter<'a, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter()
    }
}

impl Display for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.iter().join(", "))
    }
}

impl Debug for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::StateSet;
    use crate::math;

    #[test]
    fn insertion_and_membership() {
        let mut set = StateSet::new();
        assert!(set.is_empty());
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert!(set.insert(0));
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
        assert!(!set.contains(1));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 3]);
        assert!(set.remove(3));
        assert!(!set.remove(3));
        assert_eq!(set.first(), Some(0));
    }

    #[test]
    fn equality_ignores_capacity() {
        let small: StateSet = [1, 4].into_iter().collect();
        let mut large = StateSet::with_capacity(1024);
        large.insert(4);
        large.insert(1);
        assert_eq!(small, large);

        let mut seen = math::Set::default();
        seen.insert(small);
        assert!(seen.contains(&large));

        let mut grown = StateSet::singleton(900);
        grown.remove(900);
        assert_eq!(grown, StateSet::new());
    }

    #[test]
    fn union_and_intersection() {
        let mut left: StateSet = [0, 2].into_iter().collect();
        let right: StateSet = [2, 5].into_iter().collect();
        assert!(left.intersects(&right));
        left.union_with(&right);
        assert_eq!(left.to_string(), "{0, 2, 5}");
        assert!(!StateSet::singleton(1).intersects(&right));
        assert!(!StateSet::new().intersects(&right));
    }
}
