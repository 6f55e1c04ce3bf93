//! DFA minimization by Moore-style partition refinement.

use crate::automaton::dfa::DFA;
use crate::automaton::state::{StateId, StateSet};
use crate::error::ContractViolation;
use indexmap::IndexMap;
use log::trace;
use std::collections::HashMap;

/// For each symbol of the alphabet, the group the transition lands in, or `None` when there is
/// no transition at all. `None` never compares equal to a real group.
type Signature = Vec<Option<usize>>;

/// Minimize a DFA.
///
/// States unreachable from the start are dropped first. The initial partition is
/// `[accepting, non-accepting]` (empty groups omitted); every pass splits each group by
/// signature, keeping the sub-groups in order of their lowest member, until a pass splits
/// nothing. Final group `i` becomes state `i` of the result, so the start state of the result
/// is not necessarily 0.
pub fn minimize(dfa: &DFA) -> Result<DFA, ContractViolation> {
    if dfa.start_state().is_none() || dfa.num_states() == 0 {
        return Ok(DFA::new());
    }

    let reachable = dfa.find_reachable_states();
    let accepting = dfa.final_states().intersection(&reachable);
    let rejecting = reachable.difference(dfa.final_states());

    let mut partitions: Vec<StateSet> = [accepting, rejecting]
        .into_iter()
        .filter(|group| !group.is_empty())
        .collect();

    let symbols: Vec<char> = dfa.alphabet().iter().copied().collect();
    let mut pass = 0usize;

    loop {
        pass += 1;
        let group_of = partition_index(&partitions);
        let mut refined = Vec::with_capacity(partitions.len());
        let mut changed = false;

        for group in &partitions {
            let mut by_signature: IndexMap<Signature, StateSet> = IndexMap::new();
            for state in group.iter() {
                let signature = symbols
                    .iter()
                    .map(|&c| {
                        dfa.transition(state, c)
                            .and_then(|target| group_of.get(&target).copied())
                    })
                    .collect();
                by_signature.entry(signature).or_default().insert(state);
            }

            changed |= by_signature.len() > 1;
            refined.extend(by_signature.into_values());
        }

        trace!(
            "refinement pass {pass}: {} -> {} groups",
            partitions.len(),
            refined.len()
        );
        partitions = refined;

        if !changed {
            break;
        }
    }

    build_minimized_dfa(dfa, &partitions)
}

/// Map every partitioned state to the index of its group.
fn partition_index(partitions: &[StateSet]) -> HashMap<StateId, usize> {
    partitions
        .iter()
        .enumerate()
        .flat_map(|(idx, group)| group.iter().map(move |state| (state, idx)))
        .collect()
}

/// Build a minimized DFA from a stable partition.
fn build_minimized_dfa(dfa: &DFA, partitions: &[StateSet]) -> Result<DFA, ContractViolation> {
    let mut minimized = DFA::new();
    let state_to_partition = partition_index(partitions);

    for _ in 0..partitions.len() {
        minimized.add_state();
    }

    if let Some(&new_start) = dfa
        .start_state()
        .and_then(|start| state_to_partition.get(&start))
    {
        minimized.set_start_state(new_start as StateId);
    }

    for (part_idx, partition) in partitions.iter().enumerate() {
        let Some(representative) = partition.first() else {
            continue;
        };

        // Groups never mix accepting and non-accepting states.
        if dfa.is_final(representative) {
            minimized.add_final_state(part_idx as StateId);
        }

        // Every member agrees on target groups, so any representative will do.
        for &symbol in dfa.alphabet() {
            if let Some(dest) = dfa.transition(representative, symbol) {
                if let Some(&new_dest) = state_to_partition.get(&dest) {
                    minimized.add_transition(part_idx as StateId, symbol, new_dest as StateId)?;
                }
            }
        }
    }

    if let Some(orig_mapping) = dfa.state_mapping() {
        let mut new_mapping: HashMap<StateId, Vec<StateId>> = HashMap::new();
        for (part_idx, partition) in partitions.iter().enumerate() {
            let mut nfa_states: Vec<StateId> = partition
                .iter()
                .filter_map(|old| orig_mapping.get(&old))
                .flatten()
                .copied()
                .collect();
            nfa_states.sort_unstable();
            nfa_states.dedup();
            new_mapping.insert(part_idx as StateId, nfa_states);
        }
        minimized.set_state_mapping(new_mapping);
    }

    Ok(minimized)
}
