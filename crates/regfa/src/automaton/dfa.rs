//! Deterministic Finite Automaton (DFA) implementation.

use crate::automaton::state::{StateId, StateSet};
use crate::error::ContractViolation;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// A partial Deterministic Finite Automaton over literal symbols.
///
/// A missing transition is an implicit reject, never an error and never an explicit sink state.
#[derive(Debug, Clone)]
pub struct DFA {
    /// Number of states (states are numbered 0..num_states)
    num_states: StateId,
    /// Start state (None if empty)
    start_state: Option<StateId>,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, symbol) -> destination
    transitions: HashMap<(StateId, char), StateId>,
    /// All symbols used
    alphabet: BTreeSet<char>,
    /// Mapping from DFA states to original NFA states (if created via subset construction)
    state_mapping: Option<HashMap<StateId, Vec<StateId>>>,
}

impl DFA {
    /// Create a new empty DFA.
    pub fn new() -> Self {
        Self {
            num_states: 0,
            start_state: None,
            final_states: StateSet::with_capacity(16),
            transitions: HashMap::new(),
            alphabet: BTreeSet::new(),
            state_mapping: None,
        }
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        id
    }

    /// Set the start state.
    pub fn set_start_state(&mut self, state: StateId) {
        self.start_state = Some(state);
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    /// Add a transition.
    ///
    /// Re-adding an identical transition is a no-op; a second, different target for the same
    /// state and symbol would break determinism and is refused.
    pub fn add_transition(
        &mut self,
        source: StateId,
        symbol: char,
        destination: StateId,
    ) -> Result<(), ContractViolation> {
        if let Some(&existing) = self.transitions.get(&(source, symbol)) {
            if existing != destination {
                return Err(ContractViolation::ConflictingTransition {
                    state: source,
                    symbol,
                    existing,
                    conflicting: destination,
                });
            }
            return Ok(());
        }

        self.alphabet.insert(symbol);
        self.transitions.insert((source, symbol), destination);
        Ok(())
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: StateId, symbol: char) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// Get the number of states.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// Get the start state, if one has been set.
    pub fn start_state(&self) -> Option<StateId> {
        self.start_state
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Check if a state is final.
    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// Get the alphabet, in ascending order.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    pub(crate) fn set_state_mapping(&mut self, mapping: HashMap<StateId, Vec<StateId>>) {
        self.state_mapping = Some(mapping);
    }

    /// The NFA states each DFA state stands for, when known. Kept for tracing only.
    pub fn state_mapping(&self) -> Option<&HashMap<StateId, Vec<StateId>>> {
        self.state_mapping.as_ref()
    }

    /// Get all transitions as an iterator.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, char, StateId)> + '_ {
        self.transitions
            .iter()
            .map(|(&(src, sym), &dst)| (src, sym, dst))
    }

    /// Get the number of transitions.
    pub fn num_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// Find all states reachable from the start state.
    pub(crate) fn find_reachable_states(&self) -> StateSet {
        let mut reachable = StateSet::with_capacity(self.num_states as usize);

        let Some(start) = self.start_state else {
            return reachable;
        };

        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(state) = queue.pop_front() {
            if reachable.contains(state) {
                continue;
            }
            reachable.insert(state);

            for &symbol in &self.alphabet {
                if let Some(next) = self.transition(state, symbol) {
                    if !reachable.contains(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        reachable
    }
}

impl Default for DFA {
    fn default() -> Self {
        Self::new()
    }
}
