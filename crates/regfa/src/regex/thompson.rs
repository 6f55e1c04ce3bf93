//! Thompson construction: postfix tokens to an epsilon-NFA.

use crate::automaton::{EpsilonNFA, StateAllocator, Symbol};
use crate::error::ContractViolation;
use crate::regex::normalize::Token;

/// Build an NFA from a postfix token sequence.
///
/// Every token pushes or combines fragments on an operand stack; exactly one fragment must be
/// left at the end. Fresh states come from `states`, so ids stay unique across all fragments of
/// the run. Running short of operands, or ending with anything but one fragment, means the
/// postfix was malformed and is reported as a [`ContractViolation`].
pub fn thompson_construction(
    postfix: &[Token],
    states: &mut StateAllocator,
) -> Result<EpsilonNFA, ContractViolation> {
    let mut stack: Vec<EpsilonNFA> = Vec::new();

    for (position, &token) in postfix.iter().enumerate() {
        let mut pop = || {
            stack
                .pop()
                .ok_or(ContractViolation::StackUnderflow { token, position })
        };

        let fragment = match token {
            Token::Literal(c) => literal(states, c),
            Token::Concat => {
                let b = pop()?;
                let a = pop()?;
                concat(a, b)?
            }
            Token::Alternate => {
                let b = pop()?;
                let a = pop()?;
                alternate(states, a, b)?
            }
            Token::Star => star(states, pop()?)?,
            Token::Plus => plus(states, pop()?)?,
            Token::Optional => optional(states, pop()?)?,
        };
        stack.push(fragment);
    }

    match (stack.pop(), stack.len()) {
        (Some(nfa), 0) => Ok(nfa),
        (None, _) => Err(ContractViolation::FragmentCount(0)),
        (Some(_), rest) => Err(ContractViolation::FragmentCount(rest + 1)),
    }
}

/// `start --c--> accept`.
fn literal(states: &mut StateAllocator, c: char) -> EpsilonNFA {
    let start = states.fresh();
    let accept = states.fresh();
    let mut nfa = EpsilonNFA::new(start, accept);
    nfa.add_transition(start, Symbol::Literal(c), accept);
    nfa
}

/// `a.accept --ε--> b.start`, keeping a's start and b's accept.
fn concat(mut a: EpsilonNFA, b: EpsilonNFA) -> Result<EpsilonNFA, ContractViolation> {
    let (start, bridge_from, bridge_to, accept) = (a.start(), a.accept(), b.start(), b.accept());
    a.absorb(b)?;
    a.add_epsilon_transition(bridge_from, bridge_to);
    a.set_endpoints(start, accept);
    Ok(a)
}

/// Fresh start branching into both operands, both operands joining a fresh accept.
fn alternate(
    states: &mut StateAllocator,
    a: EpsilonNFA,
    b: EpsilonNFA,
) -> Result<EpsilonNFA, ContractViolation> {
    let start = states.fresh();
    let accept = states.fresh();
    let (a_start, a_accept, b_start, b_accept) = (a.start(), a.accept(), b.start(), b.accept());

    let mut nfa = EpsilonNFA::new(start, accept);
    nfa.absorb(a)?;
    nfa.absorb(b)?;

    nfa.add_epsilon_transition(start, a_start);
    nfa.add_epsilon_transition(start, b_start);
    nfa.add_epsilon_transition(a_accept, accept);
    nfa.add_epsilon_transition(b_accept, accept);
    Ok(nfa)
}

/// Wrap `inner` in fresh endpoints.
///
/// `skip` adds `start --ε--> accept`; `repeat` adds `inner.accept --ε--> inner.start`.
fn wrap(
    states: &mut StateAllocator,
    inner: EpsilonNFA,
    skip: bool,
    repeat: bool,
) -> Result<EpsilonNFA, ContractViolation> {
    let start = states.fresh();
    let accept = states.fresh();
    let (inner_start, inner_accept) = (inner.start(), inner.accept());

    let mut nfa = EpsilonNFA::new(start, accept);
    nfa.absorb(inner)?;

    nfa.add_epsilon_transition(start, inner_start);
    if skip {
        nfa.add_epsilon_transition(start, accept);
    }
    if repeat {
        nfa.add_epsilon_transition(inner_accept, inner_start);
    }
    nfa.add_epsilon_transition(inner_accept, accept);
    Ok(nfa)
}

fn star(states: &mut StateAllocator, inner: EpsilonNFA) -> Result<EpsilonNFA, ContractViolation> {
    wrap(states, inner, true, true)
}

fn plus(states: &mut StateAllocator, inner: EpsilonNFA) -> Result<EpsilonNFA, ContractViolation> {
    wrap(states, inner, false, true)
}

fn optional(
    states: &mut StateAllocator,
    inner: EpsilonNFA,
) -> Result<EpsilonNFA, ContractViolation> {
    wrap(states, inner, true, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::StateSet;
    use crate::regex::normalize::{add_concat, infix_to_postfix};

    fn build(pattern: &str) -> EpsilonNFA {
        let postfix = infix_to_postfix(&add_concat(pattern)).unwrap();
        thompson_construction(&postfix, &mut StateAllocator::new()).unwrap()
    }

    fn epsilon_targets(nfa: &EpsilonNFA, state: u32) -> Vec<u32> {
        nfa.successors(state, Symbol::Epsilon)
            .map(StateSet::to_vec)
            .unwrap_or_default()
    }

    #[test]
    fn test_literal() {
        let nfa = build("a");
        assert_eq!(nfa.start(), 0);
        assert_eq!(nfa.accept(), 1);
        assert_eq!(nfa.num_states(), 2);
        assert_eq!(nfa.num_transitions(), 1);
        assert_eq!(
            nfa.successors(0, Symbol::Literal('a'))
                .map(StateSet::to_vec),
            Some(vec![1])
        );
    }

    #[test]
    fn test_concat() {
        // a: 0->1, b: 2->3, bridge 1 -ε-> 2
        let nfa = build("ab");
        assert_eq!((nfa.start(), nfa.accept()), (0, 3));
        assert_eq!(epsilon_targets(&nfa, 1), vec![2]);
        assert_eq!(nfa.num_states(), 4);
        assert_eq!(nfa.num_transitions(), 3);
    }

    #[test]
    fn test_alternate() {
        // a: 0->1, b: 2->3, new start 4, new accept 5
        let nfa = build("a|b");
        assert_eq!((nfa.start(), nfa.accept()), (4, 5));
        assert_eq!(epsilon_targets(&nfa, 4), vec![0, 2]);
        assert_eq!(epsilon_targets(&nfa, 1), vec![5]);
        assert_eq!(epsilon_targets(&nfa, 3), vec![5]);
        assert_eq!(nfa.num_states(), 6);
        assert_eq!(nfa.num_transitions(), 6);
    }

    #[test]
    fn test_star() {
        // a: 0->1, new start 2, new accept 3
        let nfa = build("a*");
        assert_eq!((nfa.start(), nfa.accept()), (2, 3));
        assert_eq!(epsilon_targets(&nfa, 2), vec![0, 3]);
        assert_eq!(epsilon_targets(&nfa, 1), vec![0, 3]);
        assert!(epsilon_targets(&nfa, 3).is_empty());
    }

    #[test]
    fn test_plus() {
        let nfa = build("a+");
        assert_eq!((nfa.start(), nfa.accept()), (2, 3));
        assert_eq!(epsilon_targets(&nfa, 2), vec![0]);
        assert_eq!(epsilon_targets(&nfa, 1), vec![0, 3]);
    }

    #[test]
    fn test_optional() {
        let nfa = build("a?");
        assert_eq!((nfa.start(), nfa.accept()), (2, 3));
        assert_eq!(epsilon_targets(&nfa, 2), vec![0, 3]);
        assert_eq!(epsilon_targets(&nfa, 1), vec![3]);
    }

    #[test]
    fn test_accept_has_no_outgoing_transitions() {
        for pattern in ["a", "ab", "a|b", "a*", "(a|b)*c+", "((ab)?c)*"] {
            let nfa = build(pattern);
            let accept = nfa.accept();
            assert!(
                nfa.transitions().all(|(src, _, _)| src != accept),
                "{pattern}"
            );
        }
    }

    #[test]
    fn test_every_state_is_unique_and_counted() {
        // Thompson uses two states per literal and per operator except concatenation.
        let nfa = build("(a|b)*abb");
        assert_eq!(nfa.num_states(), 2 * 5 + 2 + 2);
    }

    #[test]
    fn test_stack_underflow() {
        let postfix = [Token::Literal('a'), Token::Alternate];
        assert_eq!(
            thompson_construction(&postfix, &mut StateAllocator::new()).unwrap_err(),
            ContractViolation::StackUnderflow {
                token: Token::Alternate,
                position: 1
            }
        );

        let postfix = [Token::Star];
        assert!(matches!(
            thompson_construction(&postfix, &mut StateAllocator::new()),
            Err(ContractViolation::StackUnderflow { position: 0, .. })
        ));
    }

    #[test]
    fn test_leftover_fragments() {
        let postfix = [Token::Literal('a'), Token::Literal('b')];
        assert_eq!(
            thompson_construction(&postfix, &mut StateAllocator::new()).unwrap_err(),
            ContractViolation::FragmentCount(2)
        );
        assert_eq!(
            thompson_construction(&[], &mut StateAllocator::new()).unwrap_err(),
            ContractViolation::FragmentCount(0)
        );
    }
}
