//! Subset construction algorithm for converting ε-NFA to DFA.

use crate::automaton::dfa::DFA;
use crate::automaton::epsilon_nfa::EpsilonNFA;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::Symbol;
use crate::error::ContractViolation;
use indexmap::IndexMap;
use log::trace;
use std::collections::{HashMap, VecDeque};

/// Convert an epsilon-NFA to a DFA using the powerset construction algorithm.
///
/// DFA ids are handed out in discovery order starting at 0 for the closure of the NFA start.
/// Sets are processed first-in first-out and symbols in ascending order, so the numbering is
/// the same on every run. Symbols whose move is empty get no transition.
pub fn subset_construction(nfa: &EpsilonNFA) -> Result<DFA, ContractViolation> {
    // Canonical (sorted) NFA state set -> DFA state id, in discovery order.
    let mut state_mapping: IndexMap<Vec<StateId>, StateId> = IndexMap::new();
    let mut dfa = DFA::new();
    let mut queue: VecDeque<(StateSet, StateId)> = VecDeque::new();

    let initial_set = nfa.epsilon_closure(&StateSet::singleton(nfa.start(), 1));
    let initial_dfa_state = dfa.add_state();
    dfa.set_start_state(initial_dfa_state);
    if initial_set.contains(nfa.accept()) {
        dfa.add_final_state(initial_dfa_state);
    }
    state_mapping.insert(initial_set.to_vec(), initial_dfa_state);
    queue.push_back((initial_set, initial_dfa_state));

    while let Some((current_nfa_set, current_dfa_state)) = queue.pop_front() {
        for &c in nfa.alphabet() {
            let next_nfa_set = nfa.move_on_symbol(&current_nfa_set, Symbol::Literal(c))?;

            if next_nfa_set.is_empty() {
                continue;
            }

            let next_vec = next_nfa_set.to_vec();
            let next_dfa_state = match state_mapping.get(&next_vec) {
                Some(&existing) => existing,
                None => {
                    let new_state = dfa.add_state();
                    if next_nfa_set.contains(nfa.accept()) {
                        dfa.add_final_state(new_state);
                    }
                    trace!("dfa state {new_state} = nfa states {next_vec:?}");
                    state_mapping.insert(next_vec, new_state);
                    queue.push_back((next_nfa_set, new_state));
                    new_state
                }
            };

            dfa.add_transition(current_dfa_state, c, next_dfa_state)?;
        }
    }

    let inverse_mapping: HashMap<StateId, Vec<StateId>> = state_mapping
        .into_iter()
        .map(|(nfa_states, dfa_state)| (dfa_state, nfa_states))
        .collect();
    dfa.set_state_mapping(inverse_mapping);

    Ok(dfa)
}
