//! Traversable view of an automaton, for renderers.
//!
//! A renderer only needs the states, the start marker, the accepting markers and the
//! `(source, symbol, destination)` triples. Nothing about postfix tokens, partitions or closures
//! leaks through here.

use crate::automaton::dfa::DFA;
use crate::automaton::epsilon_nfa::EpsilonNFA;
use crate::automaton::state::StateId;
use crate::automaton::symbol::Symbol;
use indexmap::IndexMap;

/// One labeled transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub source: StateId,
    pub destination: StateId,
    pub symbol: Symbol,
}

/// States, markers and edges of an automaton, each list sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutomatonGraph {
    pub states: Vec<StateId>,
    pub start: Option<StateId>,
    pub accepting: Vec<StateId>,
    pub edges: Vec<Edge>,
}

/// Anything that can be handed to a renderer.
pub trait ToGraph {
    fn to_graph(&self) -> AutomatonGraph;
}

impl ToGraph for EpsilonNFA {
    fn to_graph(&self) -> AutomatonGraph {
        let mut edges: Vec<Edge> = self
            .transitions()
            .map(|(source, symbol, destination)| Edge {
                source,
                destination,
                symbol,
            })
            .collect();
        edges.sort_unstable();

        AutomatonGraph {
            states: self.states().to_vec(),
            start: Some(self.start()),
            accepting: vec![self.accept()],
            edges,
        }
    }
}

impl ToGraph for DFA {
    fn to_graph(&self) -> AutomatonGraph {
        let mut edges: Vec<Edge> = self
            .transitions()
            .map(|(source, c, destination)| Edge {
                source,
                destination,
                symbol: Symbol::Literal(c),
            })
            .collect();
        edges.sort_unstable();

        AutomatonGraph {
            states: (0..self.num_states()).collect(),
            start: self.start_state(),
            accepting: self.final_states().to_vec(),
            edges,
        }
    }
}

impl AutomatonGraph {
    /// Check if a state is accepting.
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.binary_search(&state).is_ok()
    }

    /// Render as Graphviz DOT source.
    ///
    /// Parallel edges between the same pair of states collapse into one edge whose label lists
    /// the symbols separated by commas.
    pub fn to_dot(&self, name: &str) -> String {
        let mut dot = format!("digraph \"{name}\" {{\n    rankdir=LR;\n    overlap=false;\n");

        if let Some(start) = self.start {
            dot.push_str("    start [label=\"\", shape=none];\n");
            dot.push_str(&format!("    start -> {start};\n"));
        }

        for &state in &self.states {
            let shape = if self.is_accepting(state) {
                "doublecircle"
            } else {
                "circle"
            };
            dot.push_str(&format!("    {state} [shape={shape}];\n"));
        }

        let mut labels: IndexMap<(StateId, StateId), Vec<String>> = IndexMap::new();
        for edge in &self.edges {
            labels
                .entry((edge.source, edge.destination))
                .or_default()
                .push(edge.symbol.to_string());
        }
        for ((source, destination), symbols) in labels {
            dot.push_str(&format!(
                "    {source} -> {destination} [label=\"{}\"];\n",
                symbols.join(",")
            ));
        }

        dot.push_str("}\n");
        dot
    }
}
