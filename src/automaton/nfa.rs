use std::sync::OnceLock;

use tracing::trace;

use crate::{
    alphabet::Symbol,
    automaton::{render_transition_table, FiniteAutomaton},
    error::{AutomatonError, Result},
    math, StateIndex, StateSet,
};

fn empty_set() -> &'static StateSet {
    static EMPTY: OnceLock<StateSet> = OnceLock::new();
    EMPTY.get_or_init(StateSet::new)
}

/// A nondeterministic finite automaton with states `0..size` and initial state `0`.
///
/// For each state the transition relation maps a symbol to a set of successor states. Slots
/// that were never written are simply absent and behave like an empty set, so sparse automata
/// only pay for the transitions they actually have.
///
/// ```
/// use finite_automata::prelude::*;
///
/// // accepts all words that end in "code"
/// let mut nfa = NFA::new(5)
///     .with_transitions([(0, 'c', 1), (1, 'o', 2), (2, 'd', 3), (3, 'e', 4)])
///     .unwrap()
///     .with_accepting([4])
///     .unwrap();
/// nfa.add_transition_for_all(0, 0).unwrap();
///
/// assert!(nfa.accepts("xcode"));
/// assert!(!nfa.accepts("codex"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct NFA {
    size: usize,
    accepting: StateSet,
    transitions: Vec<math::OrderedMap<Symbol, StateSet>>,
}

impl NFA {
    /// Creates an automaton with `size` states, no transitions and no accepting states.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            accepting: StateSet::with_capacity(size),
            transitions: vec![math::OrderedMap::new(); size],
        }
    }

    /// Adds all given `(source, symbol, target)` triples, see [`NFA::add_transition`].
    pub fn with_transitions<I>(mut self, transitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = (StateIndex, char, StateIndex)>,
    {
        for (source, symbol, target) in transitions {
            self.add_transition(source, symbol, target)?;
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

    fn check_state(&self, state: StateIndex) -> Result<()> {
        if state < self.size {
            Ok(())
        } else {
            Err(AutomatonError::state(state, self.size))
        }
    }

    pub(crate) fn insert_transition(
        &mut self,
        source: StateIndex,
        symbol: Symbol,
        target: StateIndex,
    ) {
        debug_assert!(source < self.size && target < self.size);
        self.transitions[source]
            .entry(symbol)
            .or_default()
            .insert(target);
    }

    pub(crate) fn mark_accepting(&mut self, state: StateIndex) {
        debug_assert!(state < self.size);
        self.accepting.insert(state);
    }

    fn insert_all<I>(&mut self, source: StateIndex, symbols: I, target: StateIndex) -> Result<()>
    where
        I: IntoIterator<Item = Symbol>,
    {
        self.check_state(source)?;
        self.check_state(target)?;
        for symbol in symbols {
            self.insert_transition(source, symbol, target);
        }
        Ok(())
    }

    /// Adds `target` to the successors of `source` on `symbol`. Adding a transition that is
    /// already present has no effect.
    pub fn add_transition(
        &mut self,
        source: StateIndex,
        symbol: char,
        target: StateIndex,
    ) -> Result<()> {
        let symbol = Symbol::try_from(symbol)?;
        self.insert_all(source, [symbol], target)
    }

    /// Adds a transition from `source` to `target` for every symbol occurring in `symbols`.
    /// Nothing is added if any of the characters is not a symbol.
    pub fn add_transition_str(
        &mut self,
        source: StateIndex,
        symbols: &str,
        target: StateIndex,
    ) -> Result<()> {
        let symbols = Symbol::all_of(symbols)?;
        self.insert_all(source, symbols, target)
    }

    /// Adds a transition from `source` to `target` for every symbol of the alphabet.
    pub fn add_transition_for_all(&mut self, source: StateIndex, target: StateIndex) -> Result<()> {
        self.insert_all(source, Symbol::universe(), target)
    }

    /// Adds a transition from `source` to `target` for every symbol except `excluded`.
    pub fn add_transition_except(
        &mut self,
        source: StateIndex,
        excluded: char,
        target: StateIndex,
    ) -> Result<()> {
        let excluded = Symbol::try_from(excluded)?;
        self.insert_all(source, Symbol::all_except(excluded), target)
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

    /// Returns the successors of `state` on `symbol`. The set is empty if there are none.
    pub fn get_transitions(&self, state: StateIndex, symbol: char) -> Result<&StateSet> {
        self.check_state(state)?;
        let symbol = Symbol::try_from(symbol)?;
        Ok(self.successors(state, symbol))
    }

    /// Returns the successors of `state` on `symbol`, a state that does not exist has none.
    pub fn successors(&self, state: StateIndex, symbol: Symbol) -> &StateSet {
        self.transitions
            .get(state)
            .and_then(|row| row.get(&symbol))
            .unwrap_or_else(|| empty_set())
    }

    /// Iterates over the non-empty transition slots of `state` in ascending symbol order.
    pub fn outgoing(&self, state: StateIndex) -> impl Iterator<Item = (Symbol, &StateSet)> + '_ {
        self.transitions
            .get(state)
            .into_iter()
            .flat_map(|row| row.iter())
            .filter(|(_, targets)| !targets.is_empty())
            .map(|(symbol, targets)| (*symbol, targets))
    }

    /// Returns the total number of `(source, symbol, target)` triples.
    pub fn transition_count(&self) -> usize {
        self.transitions
            .iter()
            .flat_map(|row| row.values())
            .map(StateSet::len)
            .sum()
    }

    /// The subset the automaton starts in, that is `{0}`, or the empty set if there are no states.
    pub fn initial_states(&self) -> StateSet {
        if self.size == 0 {
            StateSet::new()
        } else {
            StateSet::singleton(0)
        }
    }

    /// Computes the union of the successors on `symbol` of all states in `live`.
    pub fn step(&self, live: &StateSet, symbol: Symbol) -> StateSet {
        let mut next = StateSet::with_capacity(self.size);
        for state in live {
            next.union_with(self.successors(state, symbol));
        }
        next
    }

    /// Returns the set of states the automaton can be in after reading `input` from state `0`.
    /// Once this set becomes empty the remaining input is not looked at.
    pub fn reached_states(&self, input: &str) -> StateSet {
        let mut live = self.initial_states();
        for (position, c) in input.chars().enumerate() {
            if live.is_empty() {
                trace!("no live states left after {position} characters");
                break;
            }
            live = match Symbol::try_from(c) {
                Ok(symbol) => self.step(&live, symbol),
                Err(_) => StateSet::new(),
            };
            trace!("live states after {c:?}: {live}");
        }
        live
    }

    /// Runs the automaton on `input`, see [`FiniteAutomaton::accepts`].
    pub fn run(&self, input: &str) -> bool {
        self.accepts(input)
    }
}

impl FiniteAutomaton for NFA {
    fn size(&self) -> usize {
        self.size
    }

    fn is_accepting(&self, state: StateIndex) -> bool {
        self.accepting.contains(state)
    }

    fn accepting_states(&self) -> &StateSet {
        &self.accepting
    }

    fn accepts(&self, input: &str) -> bool {
        self.reached_states(input).intersects(&self.accepting)
    }

    fn used_symbols(&self) -> Vec<Symbol> {
        let used: std::collections::BTreeSet<_> = (0..self.size)
            .flat_map(|state| self.outgoing(state).map(|(symbol, _)| symbol))
            .collect();
        used.into_iter().collect()
    }
}

impl std::fmt::Display for NFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            render_transition_table(self, |state, symbol| {
                let targets = self.successors(state, symbol);
                (!targets.is_empty()).then(|| targets.to_string())
            })
        )
    }
}

impl std::fmt::Debug for NFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "NFA with {} states, accepting {}",
            self.size, self.accepting
        )?;
        write!(f, "{self}")
    }
}
