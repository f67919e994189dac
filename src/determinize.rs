use std::convert::Infallible;

use tracing::{debug, trace};

use crate::{
    alphabet::Symbol,
    error::{AutomatonError, Result},
    math, FiniteAutomaton, StateIndex, StateSet, DFA, NFA,
};

/// Configuration of the subset construction.
///
/// By default the construction is unbounded. As the number of reachable subsets can be
/// exponential in the size of the [`NFA`], a ceiling on the number of produced states can be
/// set with [`Determinizer::with_limit`].
///
/// ```
/// use finite_automata::{prelude::*, samples};
///
/// let nfa = samples::washington().unwrap();
/// let err = Determinizer::new().with_limit(4).determinize(&nfa).unwrap_err();
/// assert_eq!(err, AutomatonError::CapacityExceeded { limit: 4 });
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Determinizer {
    limit: Option<usize>,
}

impl Determinizer {
    /// Creates an unbounded determinizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`AutomatonError::CapacityExceeded`] once more than `limit` subsets have
    /// been discovered.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the configured ceiling, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Converts `nfa` into an equivalent [`DFA`], see [`convert`].
    pub fn determinize(&self, nfa: &NFA) -> Result<DFA> {
        self.determinize_with_subsets(nfa).map(|(dfa, _)| dfa)
    }

    /// Like [`Determinizer::determinize`] but also returns the subsets of NFA states, the
    /// subset at position `k` is the one that DFA state `k` stands for.
    pub fn determinize_with_subsets(&self, nfa: &NFA) -> Result<(DFA, Vec<StateSet>)> {
        let limit = self.limit;
        subset_construction(nfa, |discovered| match limit {
            Some(limit) if discovered > limit => Err(AutomatonError::CapacityExceeded { limit }),
            _ => Ok(()),
        })
        .map(|(dfa, subsets)| (dfa, subsets.into_iter().collect()))
    }
}

/// Converts `nfa` into a [`DFA`] accepting the same words by means of the subset construction.
///
/// Each state of the resulting automaton corresponds to a distinct set of NFA states that is
/// reachable from `{0}`. States are numbered in the order in which their subsets are
/// discovered when the subsets are processed first-in first-out, so state `0` is `{0}` and the
/// numbering is the same on every call. Only reachable subsets are materialized.
///
/// ```
/// use finite_automata::{prelude::*, samples};
///
/// let nfa = samples::ends_with_code().unwrap();
/// let dfa = convert(&nfa);
/// assert_eq!(dfa.size(), 5);
/// for word in ["xcode", "codex", "code", ""] {
///     assert_eq!(nfa.accepts(word), dfa.accepts(word));
/// }
/// ```
pub fn convert(nfa: &NFA) -> DFA {
    match subset_construction(nfa, |_| Ok::<_, Infallible>(())) {
        Ok((dfa, _)) => dfa,
        Err(never) => match never {},
    }
}

impl NFA {
    /// Converts `self` into an equivalent [`DFA`], see [`convert`].
    pub fn determinize(&self) -> DFA {
        convert(self)
    }
}

impl From<&NFA> for DFA {
    fn from(nfa: &NFA) -> Self {
        convert(nfa)
    }
}

/// For each symbol on which some state of `subset` has a transition, computes the union of
/// the successors. Symbols whose union would be empty do not appear.
fn successor_subsets(nfa: &NFA, subset: &StateSet) -> math::OrderedMap<Symbol, StateSet> {
    let mut successors: math::OrderedMap<Symbol, StateSet> = math::OrderedMap::new();
    for state in subset {
        for (symbol, targets) in nfa.outgoing(state) {
            successors
                .entry(symbol)
                .or_insert_with(|| StateSet::with_capacity(nfa.size()))
                .union_with(targets);
        }
    }
    successors
}

/// The actual construction. `admit` is consulted with the number of discovered subsets every
/// time a new one is found and may abort the construction.
fn subset_construction<E, F>(
    nfa: &NFA,
    mut admit: F,
) -> Result<(DFA, math::IndexedSet<StateSet>), E>
where
    F: FnMut(usize) -> Result<(), E>,
{
    let mut discovered = math::indexed_set();
    let initial = StateSet::singleton(0);
    let initial_accepting = initial.intersects(nfa.accepting_states());
    discovered.insert(initial);
    admit(discovered.len())?;

    let mut dfa = DFA::new(1);
    if initial_accepting {
        dfa.mark_accepting(0);
    }

    let mut position: StateIndex = 0;
    while let Some(current) = discovered.get_index(position) {
        let successors = successor_subsets(nfa, current);
        for (symbol, subset) in successors {
            let accepting = subset.intersects(nfa.accepting_states());
            let (target, fresh) = discovered.insert_full(subset);
            if fresh {
                admit(discovered.len())?;
                let added = dfa.add_state();
                debug_assert_eq!(added, target);
                if accepting {
                    dfa.mark_accepting(target);
                }
                trace!(
                    "discovered subset {} as state {target}",
                    discovered[target]
                );
            }
            dfa.insert_transition(position, symbol, target);
        }
        position += 1;
    }

    debug!(
        "subset construction turned {} NFA states into {} DFA states with {} transitions",
        nfa.size(),
        dfa.size(),
        dfa.transition_count()
    );
    Ok((dfa, discovered))
}

#[cfg(test)]
mod tests {
    use crate::{prelude::*, samples};

    fn assert_equivalent_on(nfa: &NFA, dfa: &DFA, words: &[&str]) {
        for word in words {
            assert_eq!(
                nfa.accepts(word),
                dfa.accepts(word),
                "disagreement on {word:?}\n{nfa:?}\n{dfa:?}"
            );
        }
    }

    const WORDS: &[&str] = &[
        "", "c", "code", "xcode", "codex", "cocode", "ccode", "codecode", "coda", "washington",
        "washingtonw", "nnn", "rose", "arouse", "eros", "co de", "cödé",
    ];

    #[test_log::test]
    fn convert_ends_with_code() {
        let nfa = samples::ends_with_code().unwrap();
        let (dfa, subsets) = Determinizer::new().determinize_with_subsets(&nfa).unwrap();
        assert_eq!(dfa.size(), 5);
        assert_eq!(
            subsets,
            vec![
                StateSet::singleton(0),
                [0, 1].into_iter().collect(),
                [0, 2].into_iter().collect(),
                [0, 3].into_iter().collect(),
                [0, 4].into_iter().collect(),
            ]
        );
        assert!(dfa.run("xcode"));
        assert!(!dfa.run("codex"));
        assert_equivalent_on(&nfa, &dfa, WORDS);
        // every state has a transition on every symbol because of the catch-all loop on 0
        assert_eq!(dfa.transition_count(), 5 * ALPHABET_SIZE);
    }

    #[test]
    fn convert_samples() {
        for nfa in [
            samples::contains_code().unwrap(),
            samples::washington().unwrap(),
            samples::rose_in_sequence().unwrap(),
        ] {
            let dfa = convert(&nfa);
            assert_equivalent_on(&nfa, &dfa, WORDS);
        }
    }

    #[test]
    fn subsets_are_discovered_breadth_first() {
        let nfa = NFA::new(5)
            .with_transitions([(0, 'a', 1), (0, 'b', 2), (1, 'a', 3), (2, 'a', 4)])
            .unwrap();
        let (dfa, subsets) = Determinizer::new().determinize_with_subsets(&nfa).unwrap();
        let expected: Vec<StateSet> = (0..5).map(StateSet::singleton).collect();
        assert_eq!(subsets, expected);
        assert_eq!(dfa.reached_state("ba"), Some(4));
        assert_eq!(dfa.reached_state("aa"), Some(3));
    }

    #[test]
    fn conversion_is_deterministic() {
        let nfa = samples::washington().unwrap();
        assert_eq!(convert(&nfa), convert(&nfa));
        assert_eq!(nfa.determinize(), DFA::from(&nfa));
    }

    #[test]
    fn accepting_initial_state_is_kept() {
        let mut nfa = NFA::new(2)
            .with_transitions([(0, 'a', 1)])
            .unwrap()
            .with_accepting([0])
            .unwrap();
        let dfa = convert(&nfa);
        assert!(dfa.accepts(""));
        assert!(!dfa.accepts("a"));

        nfa.set_accepting(1, true).unwrap();
        let dfa = convert(&nfa);
        assert!(dfa.accepts("a"));
        assert_eq!(dfa.accepting_states().len(), 2);
    }

    #[test]
    fn degenerate_inputs_produce_a_single_state() {
        for nfa in [NFA::new(0), NFA::new(3), NFA::new(1).with_accepting([0]).unwrap()] {
            let dfa = convert(&nfa);
            assert_eq!(dfa.size(), 1);
            assert_eq!(dfa.transition_count(), 0);
            assert_eq!(dfa.accepts(""), nfa.accepts(""));
            assert!(!dfa.accepts("a"));
        }
    }

    #[test]
    fn duplicate_transitions_do_not_matter() {
        let nfa = samples::ends_with_code().unwrap();
        let mut doubled = nfa.clone();
        doubled.add_transition(0, 'c', 1).unwrap();
        doubled.add_transition_for_all(0, 0).unwrap();
        assert_eq!(convert(&nfa), convert(&doubled));
    }

    #[test]
    fn exponential_blowup() {
        // the fourth symbol from the end is an `a`
        let n = 4;
        let mut nfa = NFA::new(n + 1).with_accepting([n]).unwrap();
        nfa.add_transition_for_all(0, 0).unwrap();
        nfa.add_transition(0, 'a', 1).unwrap();
        for state in 1..n {
            nfa.add_transition_str(state, "ab", state + 1).unwrap();
        }
        let dfa = convert(&nfa);
        assert_eq!(dfa.size(), 1 << n);
        assert_equivalent_on(&nfa, &dfa, &["abbb", "babbb", "bbbb", "aaaa", "abab", "aab"]);
    }

    #[test]
    fn limit_is_enforced() {
        let nfa = samples::washington().unwrap();
        let full = convert(&nfa);

        assert_eq!(
            Determinizer::new().with_limit(3).determinize(&nfa),
            Err(AutomatonError::CapacityExceeded { limit: 3 })
        );
        assert_eq!(
            Determinizer::new().with_limit(0).determinize(&NFA::new(1)),
            Err(AutomatonError::CapacityExceeded { limit: 0 })
        );
        assert_eq!(
            Determinizer::new().with_limit(full.size()).determinize(&nfa),
            Ok(full.clone())
        );
        assert!(Determinizer::new()
            .with_limit(full.size() - 1)
            .determinize(&nfa)
            .is_err());
    }

    #[cfg(feature = "random")]
    #[test_log::test]
    fn random_equivalence() {
        use crate::random::{random_nfa, random_words};

        let mut rng = fastrand::Rng::with_seed(0xc5c173);
        let alphabet = ['a', 'b', 'c'];
        for round in 0..200 {
            let size = 1 + round % 7;
            let nfa = random_nfa(&mut rng, size, &alphabet, 0.3);
            let dfa = convert(&nfa);
            assert!(dfa.size() <= 1 << size);
            for word in random_words(&mut rng, &alphabet, 0, 12, 40) {
                assert_eq!(
                    nfa.accepts(&word),
                    dfa.accepts(&word),
                    "disagreement on {word:?}\n{nfa:?}\n{dfa:?}"
                );
                assert_eq!(
                    nfa.reached_states(&word).is_empty(),
                    dfa.reached_state(&word).is_none()
                );
            }
        }
    }
}
