//! Finite automata.
//!
//! This module provides the epsilon-NFA and DFA types with:
//! - Epsilon closure computation
//! - Subset construction (NFA to DFA conversion)
//! - Moore partition-refinement DFA minimization
//! - A renderer-facing graph view with DOT export

mod dfa;
mod epsilon_nfa;
mod graph;
mod minimize;
mod state;
mod subset_construction;
mod symbol;

pub use dfa::DFA;
pub use epsilon_nfa::EpsilonNFA;
pub use graph::{AutomatonGraph, Edge, ToGraph};
pub use minimize::minimize;
pub use state::{StateAllocator, StateId, StateSet};
pub use subset_construction::subset_construction;
pub use symbol::Symbol;
