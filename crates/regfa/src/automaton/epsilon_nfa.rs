//! Epsilon Non-deterministic Finite Automaton (ε-NFA) implementation.

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::Symbol;
use crate::error::ContractViolation;
use std::collections::{BTreeSet, HashMap};

/// An epsilon-NFA with exactly one start and one accept state.
///
/// This is also the fragment type of the Thompson construction: a fragment is just an NFA whose
/// endpoints have not been wired into anything yet.
#[derive(Debug, Clone)]
pub struct EpsilonNFA {
    start: StateId,
    accept: StateId,
    /// Every state mentioned by this automaton.
    states: StateSet,
    /// One past the highest state id in `states`.
    bound: StateId,
    /// Transitions: (source, symbol) -> set of destination states
    transitions: HashMap<(StateId, Symbol), StateSet>,
    /// All literal symbols used (never epsilon)
    alphabet: BTreeSet<char>,
}

impl EpsilonNFA {
    /// Create an automaton with the given endpoints and no transitions.
    pub fn new(start: StateId, accept: StateId) -> Self {
        let mut nfa = Self {
            start,
            accept,
            states: StateSet::with_capacity(2),
            bound: 0,
            transitions: HashMap::new(),
            alphabet: BTreeSet::new(),
        };
        nfa.ensure_state(start);
        nfa.ensure_state(accept);
        nfa
    }

    fn ensure_state(&mut self, state: StateId) {
        self.states.insert(state);
        if state >= self.bound {
            self.bound = state + 1;
        }
    }

    /// Add a transition from source to destination on the given symbol.
    pub fn add_transition(&mut self, source: StateId, symbol: Symbol, destination: StateId) {
        self.ensure_state(source);
        self.ensure_state(destination);

        if let Symbol::Literal(c) = symbol {
            self.alphabet.insert(c);
        }

        self.transitions
            .entry((source, symbol))
            .or_default()
            .insert(destination);
    }

    /// Add an epsilon transition from source to destination.
    pub fn add_epsilon_transition(&mut self, source: StateId, destination: StateId) {
        self.add_transition(source, Symbol::Epsilon, destination);
    }

    /// Move both endpoints. The new endpoints become part of the state set.
    pub(crate) fn set_endpoints(&mut self, start: StateId, accept: StateId) {
        self.ensure_state(start);
        self.ensure_state(accept);
        self.start = start;
        self.accept = accept;
    }

    /// Merge another automaton's states and transitions into this one.
    ///
    /// Fragments built in one run never share states, so the merge is a plain union of key
    /// spaces. Overlap means two fragments came from different allocators and is refused.
    /// Endpoints of `self` are left untouched.
    pub fn absorb(&mut self, other: EpsilonNFA) -> Result<(), ContractViolation> {
        if let Some(shared) = self.states.intersection(&other.states).first() {
            return Err(ContractViolation::OverlappingFragments(shared));
        }

        for state in other.states.iter() {
            self.ensure_state(state);
        }
        self.alphabet.extend(other.alphabet);
        for (key, destinations) in other.transitions {
            self.transitions
                .entry(key)
                .or_default()
                .union_with(&destinations);
        }
        Ok(())
    }

    /// Get the start state.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Get the accept state.
    pub fn accept(&self) -> StateId {
        self.accept
    }

    /// All states of the automaton.
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// Get the number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Get the alphabet (all symbols except epsilon), in ascending order.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Direct successors of `state` on `symbol`, without closure.
    pub fn successors(&self, state: StateId, symbol: Symbol) -> Option<&StateSet> {
        self.transitions.get(&(state, symbol))
    }

    /// Get the epsilon closure of a set of states.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.bound as usize);
        let mut stack: Vec<StateId> = states.iter().collect();

        while let Some(s) = stack.pop() {
            if closure.contains(s) {
                continue;
            }
            closure.insert(s);

            if let Some(destinations) = self.transitions.get(&(s, Symbol::Epsilon)) {
                stack.extend(destinations.iter().filter(|&dest| !closure.contains(dest)));
            }
        }

        closure
    }

    /// Get the states reachable from a set of states on a given symbol.
    /// Returns the epsilon closure of the reached states.
    pub fn move_on_symbol(
        &self,
        states: &StateSet,
        symbol: Symbol,
    ) -> Result<StateSet, ContractViolation> {
        let c = symbol.literal().ok_or(ContractViolation::EpsilonMove)?;
        if !self.alphabet.contains(&c) {
            return Err(ContractViolation::UnknownSymbol(symbol));
        }

        let mut reached = StateSet::with_capacity(self.bound as usize);
        for state in states.iter() {
            if let Some(destinations) = self.transitions.get(&(state, symbol)) {
                reached.union_with(destinations);
            }
        }

        Ok(self.epsilon_closure(&reached))
    }

    /// Get all transitions as an iterator.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |dst| (src, sym, dst)))
    }

    /// Total number of (source, symbol, destination) triples.
    pub fn num_transitions(&self) -> usize {
        self.transitions.values().map(StateSet::len).sum()
    }
}
