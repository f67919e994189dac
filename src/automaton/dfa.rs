use tracing::trace;

use crate::{
    alphabet::Symbol,
    automaton::{render_transition_table, FiniteAutomaton},
    error::{AutomatonError, Result},
    math, StateIndex, StateSet,
};

/// A deterministic finite automaton with states `0..size` and initial state `0`.
///
/// Each state maps a symbol to at most one successor. A missing transition is not an error,
/// a run that needs it simply rejects.
///
/// ```
/// use finite_automata::prelude::*;
///
/// // accepts all words that start with "cat"
/// let mut dfa = DFA::new(4)
///     .with_transitions([(0, 'c', 1), (1, 'a', 2), (2, 't', 3)])
///     .unwrap()
///     .with_accepting([3])
///     .unwrap();
/// dfa.set_transition_for_all(3, 3).unwrap();
///
/// assert!(dfa.accepts("cats"));
/// assert!(!dfa.accepts("ca"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct DFA {
    accepting: StateSet,
    transitions: Vec<math::OrderedMap<Symbol, StateIndex>>,
}

impl DFA {
    /// Creates an automaton with `size` states, no transitions and no accepting states.
    pub fn new(size: usize) -> Self {
        Self {
            accepting: StateSet::with_capacity(size),
            transitions: vec![math::OrderedMap::new(); size],
        }
    }

    /// Adds all given `(source, symbol, target)` triples, see [`DFA::set_transition`].
    pub fn with_transitions<I>(mut self, transitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = (StateIndex, char, StateIndex)>,
    {
        for (source, symbol, target) in transitions {
            self.set_transition(source, symbol, target)?;
        }
        Ok(self)
    }

    /// Marks all given states as accepting.
    pub fn with_accepting<I: IntoIterator<Item = StateIndex>>(mut self, states: I) -> Result<Self> {
        for state in states {
            self.set_accepting(state, true)?;
        }
        Ok(self)
    }

    /// Appends a fresh state without transitions and returns its index.
    pub fn add_state(&mut self) -> StateIndex {
        self.transitions.push(math::OrderedMap::new());
        self.transitions.len() - 1
    }

    fn check_state(&self, state: StateIndex) -> Result<()> {
        if state < self.size() {
            Ok(())
        } else {
            Err(AutomatonError::state(state, self.size()))
        }
    }

    fn set_all<I>(&mut self, source: StateIndex, symbols: I, target: StateIndex) -> Result<()>
    where
        I: IntoIterator<Item = Symbol>,
    {
        self.check_state(source)?;
        self.check_state(target)?;
        let row = &mut self.transitions[source];
        for symbol in symbols {
            row.insert(symbol, target);
        }
        Ok(())
    }

    /// Sets the successor of `source` on `symbol` to `target`, replacing any previous one.
    pub fn set_transition(
        &mut self,
        source: StateIndex,
        symbol: char,
        target: StateIndex,
    ) -> Result<()> {
        let symbol = Symbol::try_from(symbol)?;
        self.set_all(source, [symbol], target)
    }

    pub(crate) fn insert_transition(
        &mut self,
        source: StateIndex,
        symbol: Symbol,
        target: StateIndex,
    ) {
        debug_assert!(source < self.size() && target < self.size());
        self.transitions[source].insert(symbol, target);
    }

    pub(crate) fn mark_accepting(&mut self, state: StateIndex) {
        debug_assert!(state < self.size());
        self.accepting.insert(state);
    }

    /// Sets the successor of `source` to `target` for every symbol occurring in `symbols`.
    /// Nothing is changed if any of the characters is not a symbol.
    pub fn set_transition_str(
        &mut self,
        source: StateIndex,
        symbols: &str,
        target: StateIndex,
    ) -> Result<()> {
        let symbols = Symbol::all_of(symbols)?;
        self.set_all(source, symbols, target)
    }

    /// Sets the successor of `source` to `target` for every symbol of the alphabet.
    pub fn set_transition_for_all(&mut self, source: StateIndex, target: StateIndex) -> Result<()> {
        self.set_all(source, Symbol::universe(), target)
    }

    /// Removes the transition of `source` on `symbol`, returning the previous successor.
    pub fn remove_transition(
        &mut self,
        source: StateIndex,
        symbol: char,
    ) -> Result<Option<StateIndex>> {
        self.check_state(source)?;
        let symbol = Symbol::try_from(symbol)?;
        Ok(self.transitions[source].remove(&symbol))
    }

    /// Marks `state` as accepting if `accepting` is true, otherwise removes it from the
    /// accepting states. Both directions are idempotent.
    pub fn set_accepting(&mut self, state: StateIndex, accepting: bool) -> Result<()> {
        self.check_state(state)?;
        if accepting {
            self.accepting.insert(state);
        } else {
            self.accepting.remove(state);
        }
        Ok(())
    }

    /// Returns the successor of `source` on `symbol`, or `None` if there is no transition.
    pub fn get_transition(&self, source: StateIndex, symbol: char) -> Result<Option<StateIndex>> {
        self.check_state(source)?;
        let symbol = Symbol::try_from(symbol)?;
        Ok(self.successor(source, symbol))
    }

    /// Returns the successor of `source` on `symbol`, a state that does not exist has none.
    pub fn successor(&self, source: StateIndex, symbol: Symbol) -> Option<StateIndex> {
        self.transitions
            .get(source)
            .and_then(|row| row.get(&symbol))
            .copied()
    }

    /// Iterates over the transitions of `state` in ascending symbol order.
    pub fn outgoing(&self, state: StateIndex) -> impl Iterator<Item = (Symbol, StateIndex)> + '_ {
        self.transitions
            .get(state)
            .into_iter()
            .flat_map(|row| row.iter())
            .map(|(symbol, target)| (*symbol, *target))
    }

    /// Returns the total number of transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions.iter().map(|row| row.len()).sum()
    }

    /// Returns the state that is reached by reading `input` from state `0`, or `None` if the run
    /// gets stuck. The run stops at the first character without a transition.
    pub fn reached_state(&self, input: &str) -> Option<StateIndex> {
        if self.transitions.is_empty() {
            return None;
        }
        let mut current = 0;
        for c in input.chars() {
            let Some(next) = Symbol::try_from(c)
                .ok()
                .and_then(|symbol| self.successor(current, symbol))
            else {
                trace!("no transition from {current} on {c:?}, rejecting");
                return None;
            };
            trace!("{current} --{c:?}--> {next}");
            current = next;
        }
        Some(current)
    }

    /// Runs the automaton on `input`, see [`FiniteAutomaton::accepts`].
    pub fn run(&self, input: &str) -> bool {
        self.accepts(input)
    }
}

impl FiniteAutomaton for DFA {
    fn size(&self) -> usize {
        self.transitions.len()
    }

    fn is_accepting(&self, state: StateIndex) -> bool {
        self.accepting.contains(state)
    }

    fn accepting_states(&self) -> &StateSet {
        &self.accepting
    }

    fn accepts(&self, input: &str) -> bool {
        self.reached_state(input)
            .is_some_and(|state| self.is_accepting(state))
    }

    fn used_symbols(&self) -> Vec<Symbol> {
        let used: std::collections::BTreeSet<_> = self
            .transitions
            .iter()
            .flat_map(|row| row.keys().copied())
            .collect();
        used.into_iter().collect()
    }
}

impl std::fmt::Display for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            render_transition_table(self, |state, symbol| {
                self.successor(state, symbol).map(|target| target.to_string())
            })
        )
    }
}

impl std::fmt::Debug for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "DFA with {} states, accepting {}",
            self.size(),
            self.accepting
        )?;
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{AutomatonError, IndexKind},
        prelude::*,
    };

    fn csc173() -> DFA {
        DFA::new(7)
            .with_transitions([
                (0, 'c', 1),
                (1, 's', 2),
                (2, 'c', 3),
                (3, '1', 4),
                (4, '7', 5),
                (5, '3', 6),
            ])
            .unwrap()
            .with_accepting([6])
            .unwrap()
    }

    #[test_log::test]
    fn dfa_run() {
        let dfa = csc173();
        assert_eq!(dfa.size(), 7);
        assert!(dfa.accepts("csc173"));
        assert!(!dfa.accepts("csc17"));
        assert!(!dfa.accepts("xsc173"));
        assert!(!dfa.accepts("csc1734"));
        assert!(!dfa.run(""));
        assert_eq!(dfa.reached_state("csc"), Some(3));
        assert_eq!(dfa.reached_state("cx"), None);
    }

    #[test]
    fn missing_transition_rejects_immediately() {
        let mut dfa = DFA::new(2).with_accepting([1]).unwrap();
        dfa.set_transition_for_all(1, 1).unwrap();
        dfa.set_transition(0, 'a', 1).unwrap();
        assert!(dfa.accepts("abc"));
        assert!(!dfa.accepts("babc"));
        // characters outside of the alphabet have no transition
        assert!(!dfa.accepts("aé"));
    }

    #[test]
    fn empty_input_checks_initial_state() {
        let mut dfa = DFA::new(1);
        assert!(!dfa.accepts(""));
        dfa.set_accepting(0, true).unwrap();
        assert!(dfa.accepts(""));
        assert!(!DFA::new(0).accepts(""));
    }

    #[test]
    fn even_number_of_zeros() {
        let dfa = DFA::new(2)
            .with_transitions([(0, '0', 1), (1, '0', 0), (0, '1', 0), (1, '1', 1)])
            .unwrap()
            .with_accepting([0])
            .unwrap();
        assert!(dfa.accepts("0011"));
        assert!(!dfa.accepts("001"));
        assert!(dfa.accepts(""));
    }

    #[test]
    fn transitions_are_replaced() {
        let mut dfa = DFA::new(3);
        dfa.set_transition_str(0, "ab", 1).unwrap();
        dfa.set_transition(0, 'b', 2).unwrap();
        assert_eq!(dfa.get_transition(0, 'a'), Ok(Some(1)));
        assert_eq!(dfa.get_transition(0, 'b'), Ok(Some(2)));
        assert_eq!(dfa.get_transition(0, 'c'), Ok(None));
        assert_eq!(dfa.transition_count(), 2);
        assert_eq!(dfa.remove_transition(0, 'a'), Ok(Some(1)));
        assert_eq!(dfa.get_transition(0, 'a'), Ok(None));
    }

    #[test]
    fn growing_and_range_checks() {
        let mut dfa = DFA::new(1);
        assert_eq!(
            dfa.set_transition(0, 'a', 1),
            Err(AutomatonError::IndexOutOfRange {
                kind: IndexKind::State,
                index: 1,
                bound: 1
            })
        );
        assert_eq!(dfa.add_state(), 1);
        dfa.set_transition(0, 'a', 1).unwrap();
        assert_eq!(dfa.size(), 2);
        assert!(dfa.get_transition(2, 'a').is_err());
        assert!(dfa.set_transition_str(0, "aö", 1).is_err());
        assert_eq!(dfa.get_transition(0, 'a'), Ok(Some(1)));
        assert!(dfa.set_accepting(2, true).is_err());
    }

    #[test]
    fn accepting_states_form_a_set() {
        let mut dfa = DFA::new(2);
        dfa.set_accepting(1, true).unwrap();
        dfa.set_accepting(1, true).unwrap();
        assert_eq!(dfa.accepting_states().len(), 1);
        dfa.set_accepting(1, false).unwrap();
        assert!(dfa.accepting_states().is_empty());
    }

    #[test]
    fn display_transition_table() {
        let table = csc173().to_string();
        assert!(table.contains("State"));
        for symbol in ['c', 's', '1', '7', '3'] {
            assert!(table.contains(symbol));
        }
        assert_eq!(table.lines().count(), 2 + 2 + 7);
    }
}
