//! State identifiers, state sets and the per-run state allocator.

use fixedbitset::FixedBitSet;
use std::fmt;

/// A state identifier represented as a u32.
pub type StateId = u32;

/// A set of states implemented using a fixed-size bit set.
///
/// Iteration is always in ascending state order, which is what the determinizer and the
/// minimizer rely on for reproducible numbering.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Insert a state into the set.
    pub fn insert(&mut self, state: StateId) {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        self.bits.insert(idx);
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        let idx = state as usize;
        idx < self.bits.len() && self.bits.contains(idx)
    }

    /// Check if the set holds no states.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over all states in the set, lowest first.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    /// The lowest state in the set.
    pub fn first(&self) -> Option<StateId> {
        self.iter().next()
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Create a new set that is the intersection of this set and another.
    pub fn intersection(&self, other: &StateSet) -> StateSet {
        let mut result = self.clone();
        result.bits.intersect_with(&other.bits);
        result
    }

    /// Create a new set with states not in other.
    pub fn difference(&self, other: &StateSet) -> StateSet {
        let mut result = self.clone();
        result.bits.difference_with(&other.bits);
        result
    }

    /// Canonical form of the set, used as a map key (sorted, no duplicates).
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        // Bit sets of different lengths can hold the same members.
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let items: Vec<StateId> = iter.into_iter().collect();
        let capacity = items.iter().copied().max().map_or(0, |m| m as usize + 1);
        let mut set = Self::with_capacity(capacity);
        for state in items {
            set.insert(state);
        }
        set
    }
}

/// Hands out fresh state ids for one compilation run.
///
/// Ids are monotonic and never reused, even for fragments that end up discarded, so an id also
/// records creation order. Each run owns its own allocator; there is no shared counter.
#[derive(Debug, Default)]
pub struct StateAllocator {
    next: StateId,
}

impl StateAllocator {
    /// Create an allocator whose first id is 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next unused state id.
    pub fn fresh(&mut self) -> StateId {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_set_basic() {
        let mut set = StateSet::with_capacity(10);
        assert!(set.is_empty());

        set.insert(3);
        set.insert(7);
        assert!(!set.is_empty());
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
        assert!(set.contains(7));
        assert!(!set.contains(5));
        assert!(!set.contains(200));
    }

    #[test]
    fn test_state_set_grows_past_capacity() {
        let mut set = StateSet::with_capacity(2);
        set.insert(40);
        assert!(set.contains(40));
        assert_eq!(set.to_vec(), vec![40]);
    }

    #[test]
    fn test_state_set_union() {
        let mut set1: StateSet = [1, 3].into_iter().collect();
        let set2: StateSet = [2, 3, 12].into_iter().collect();

        set1.union_with(&set2);
        assert_eq!(set1.to_vec(), vec![1, 2, 3, 12]);
    }

    #[test]
    fn test_state_set_intersection_and_difference() {
        let set1: StateSet = [1, 3, 5].into_iter().collect();
        let set2: StateSet = [2, 3, 5, 9].into_iter().collect();

        assert_eq!(set1.intersection(&set2).to_vec(), vec![3, 5]);
        assert_eq!(set1.difference(&set2).to_vec(), vec![1]);
        assert!(set1.difference(&set1).is_empty());
    }

    #[test]
    fn test_state_set_equality_ignores_capacity() {
        let small = StateSet::singleton(2, 3);
        let large = StateSet::singleton(2, 64);
        assert_eq!(small, large);
        assert_eq!(small.first(), Some(2));
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut states = StateAllocator::new();
        assert_eq!(states.fresh(), 0);
        assert_eq!(states.fresh(), 1);
        assert_eq!(states.fresh(), 2);

        // A second run starts from zero again.
        let mut other = StateAllocator::new();
        assert_eq!(other.fresh(), 0);
    }
}
