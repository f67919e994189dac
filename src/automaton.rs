use crate::{alphabet::Symbol, StateIndex, StateSet};

mod dfa;
pub use dfa::DFA;

mod nfa;
pub use nfa::NFA;

/// Common interface of deterministic and nondeterministic finite automata over the
/// 7-bit alphabet. States are dense indices `0..size()` and the initial state is always `0`.
pub trait FiniteAutomaton {
    /// Returns the number of states.
    fn size(&self) -> usize;

    /// Returns `true` if `state` is accepting. States that do not exist are never accepting.
    fn is_accepting(&self, state: StateIndex) -> bool;

    /// Returns the set of all accepting states.
    fn accepting_states(&self) -> &StateSet;

    /// Runs the automaton on `input` and returns whether it is accepted.
    fn accepts(&self, input: &str) -> bool;

    /// Returns the symbols on which at least one transition exists, in ascending order.
    fn used_symbols(&self) -> Vec<Symbol>;

    /// Returns `true` if the automaton has no states at all.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// Renders a transition table with one row per state and one column per symbol that is
/// actually used. Accepting states are printed in bold.
pub(crate) fn render_transition_table<A, F>(automaton: &A, mut cell: F) -> String
where
    A: FiniteAutomaton,
    F: FnMut(StateIndex, Symbol) -> Option<String>,
{
    use owo_colors::OwoColorize;

    let symbols = automaton.used_symbols();
    let mut builder = tabled::builder::Builder::default();
    builder.push_record(
        std::iter::once("State".to_string()).chain(symbols.iter().map(|sym| format!("{sym}"))),
    );
    for state in 0..automaton.size() {
        let mut row = vec![if automaton.is_accepting(state) {
            format!("{state}").bold().to_string()
        } else {
            format!("{state}")
        }];
        row.extend(
            symbols
                .iter()
                .map(|&sym| cell(state, sym).unwrap_or_else(|| "-".to_string())),
        );
        builder.push_record(row);
    }
    builder
        .build()
        .with(tabled::settings::Style::rounded())
        .to_string()
}
