//! Library for working with deterministic and nondeterministic finite automata over the 7-bit
//! alphabet, that is symbols with codes in `0..128`.
//!
//! Automata are built state by state. An automaton is created with a fixed number of states,
//! which are addressed by their index in `0..size`, and state `0` is always the initial state.
//! Transitions and accepting states are then added through mutating calls, each of which
//! checks its indices and reports an [`AutomatonError`] instead of silently ignoring bad input.
//!
//! - [`DFA`] maps every state and symbol to at most one successor. A run that encounters a
//!   missing transition rejects right away.
//! - [`NFA`] maps every state and symbol to a [`StateSet`] of successors. It is simulated by
//!   tracking the set of all states it could currently be in.
//! - [`convert`] (or [`Determinizer`] for a bounded variant) turns an [`NFA`] into an
//!   equivalent [`DFA`] through the subset construction, materializing only those sets of
//!   NFA states that are actually reachable.
//!
//! Both automata implement [`FiniteAutomaton`], which provides [`FiniteAutomaton::accepts`]
//! for running them on a string. Characters that are not part of the alphabet have no
//! transitions.
//!
//! ```
//! use finite_automata::prelude::*;
//!
//! let mut nfa = NFA::new(3).with_accepting([2]).unwrap();
//! nfa.add_transition_for_all(0, 0).unwrap();
//! nfa.add_transition(0, 'a', 1).unwrap();
//! nfa.add_transition(1, 'b', 2).unwrap();
//!
//! let dfa = convert(&nfa);
//! assert!(nfa.accepts("xxab") && dfa.accepts("xxab"));
//! assert!(!nfa.accepts("abx") && !dfa.accepts("abx"));
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use finite_automata::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Symbol, ALPHABET_SIZE},
        automaton::{FiniteAutomaton, DFA, NFA},
        determinize::{convert, Determinizer},
        error::{AutomatonError, IndexKind},
        math, StateIndex, StateSet,
    };
}

/// Type aliases for the collections used throughout the crate.
pub mod math;

/// The input alphabet and its symbols.
pub mod alphabet;

/// Errors reported when building or converting automata.
pub mod error;
pub use error::AutomatonError;

mod state_set;
pub use state_set::StateSet;

/// Deterministic and nondeterministic finite automata.
#[allow(clippy::upper_case_acronyms)]
pub mod automaton;
pub use automaton::{FiniteAutomaton, DFA, NFA};

/// Conversion of nondeterministic into deterministic automata.
pub mod determinize;
pub use determinize::{convert, Determinizer};

pub mod samples;

/// Generation of random automata and words, used for testing the subset construction.
/// This is feature gated behind the `random` feature.
#[cfg(feature = "random")]
pub mod random;

/// States are identified by their position, valid indices of an automaton with `n` states are
/// `0..n`.
pub type StateIndex = usize;
