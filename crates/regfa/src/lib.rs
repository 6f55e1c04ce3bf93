//! Compile regular expressions into finite automata.
//!
//! The pipeline is strictly linear:
//!
//! 1. [`regex::validate`] rejects inadmissible patterns.
//! 2. [`regex::add_concat`] and [`regex::infix_to_postfix`] normalize the pattern into postfix.
//! 3. [`regex::thompson_construction`] builds an [`EpsilonNFA`].
//! 4. [`subset_construction`] determinizes it into a [`DFA`].
//! 5. [`minimize`] reduces that DFA to the fewest states.
//!
//! Patterns are built from ASCII letters and digits with `|` (alternation), `.` (explicit
//! concatenation), `*`, `+`, `?` and parentheses. Each stage is a pure function of its input;
//! the only run-scoped state is the [`StateAllocator`] owned by one [`compile`] call.

pub mod automaton;
pub mod config;
pub mod error;
pub mod regex;

pub use automaton::{
    AutomatonGraph, DFA, Edge, EpsilonNFA, StateAllocator, StateId, StateSet, Symbol, ToGraph,
    minimize, subset_construction,
};
pub use config::{CompileOptions, ValidationMode};
pub use error::{CompileError, ContractViolation, SyntaxError};
pub use regex::Token;

use log::{debug, warn};

/// Every stage's output for one pattern.
#[derive(Debug, Clone)]
pub struct Compilation {
    pattern: String,
    postfix: Vec<Token>,
    nfa: EpsilonNFA,
    dfa: DFA,
    minimized: DFA,
}

impl Compilation {
    /// The pattern as given.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The postfix token sequence fed to the Thompson construction.
    pub fn postfix(&self) -> &[Token] {
        &self.postfix
    }

    /// The Thompson epsilon-NFA.
    pub fn nfa(&self) -> &EpsilonNFA {
        &self.nfa
    }

    /// The DFA from subset construction.
    pub fn dfa(&self) -> &DFA {
        &self.dfa
    }

    /// The minimized DFA.
    pub fn minimized(&self) -> &DFA {
        &self.minimized
    }

    /// Renderer views of the NFA, the DFA and the minimized DFA, in that order.
    pub fn graphs(&self) -> [AutomatonGraph; 3] {
        [
            self.nfa.to_graph(),
            self.dfa.to_graph(),
            self.minimized.to_graph(),
        ]
    }
}

/// Run the whole pipeline on one pattern.
///
/// Nothing past validation runs on a rejected pattern. A [`CompileError::Contract`] means a
/// pattern got through validation that the later stages cannot handle; with
/// [`ValidationMode::Strict`] that does not happen.
pub fn compile(pattern: &str, options: &CompileOptions) -> Result<Compilation, CompileError> {
    regex::validate(pattern, options.validation)?;
    debug!("validated {pattern:?} ({:?})", options.validation);

    build(pattern).map_err(|err| {
        warn!("contract violation while compiling {pattern:?}: {err}");
        CompileError::from(err)
    })
}

fn build(pattern: &str) -> Result<Compilation, ContractViolation> {
    let explicit = regex::add_concat(pattern);
    let postfix = regex::infix_to_postfix(&explicit)?;
    debug!(
        "postfix of {pattern:?}: {}",
        regex::postfix_to_string(&postfix)
    );

    let mut states = StateAllocator::new();
    let nfa = regex::thompson_construction(&postfix, &mut states)?;
    debug!(
        "nfa: {} states, {} transitions",
        nfa.num_states(),
        nfa.num_transitions()
    );

    let dfa = subset_construction(&nfa)?;
    debug!("dfa: {} states", dfa.num_states());

    let minimized = minimize(&dfa)?;
    debug!("minimized dfa: {} states", minimized.num_states());

    Ok(Compilation {
        pattern: pattern.to_owned(),
        postfix,
        nfa,
        dfa,
        minimized,
    })
}
