use fastrand::Rng;
use tracing::trace;

use crate::{alphabet::Symbol, math, FiniteAutomaton, NFA};

/// Generates a random [`NFA`] with `size` states over the given `alphabet`. Characters of the
/// alphabet that are not symbols are ignored. For every source state, symbol and target state
/// the corresponding transition is inserted with probability `density`, and every state is
/// accepting with probability one half.
pub fn random_nfa(rng: &mut Rng, size: usize, alphabet: &[char], density: f64) -> NFA {
    let symbols: Vec<Symbol> = alphabet
        .iter()
        .filter_map(|&c| Symbol::try_from(c).ok())
        .collect();

    let mut nfa = NFA::new(size);
    for source in 0..size {
        for &symbol in &symbols {
            for target in 0..size {
                if rng.f64() < density {
                    nfa.insert_transition(source, symbol, target);
                }
            }
        }
    }
    for state in 0..size {
        if rng.bool() {
            nfa.mark_accepting(state);
        }
    }

    trace!(
        "generated random NFA with {} states and {} transitions",
        nfa.size(),
        nfa.transition_count()
    );
    nfa
}

/// Generate a random `String` over the `alphabet`.
/// The length of the `String` is drawn uniformly from the range `min_len..=max_len`.
/// Panics if the alphabet is empty while `min_len` is positive.
pub fn random_word(rng: &mut Rng, alphabet: &[char], min_len: usize, max_len: usize) -> String {
    let length = rng.usize(min_len..=max_len);
    (0..length)
        .map(|_| alphabet[rng.usize(..alphabet.len())])
        .collect()
}

/// Generate a set of `number` distinct random `String`s over the `alphabet`.
/// The length for each sampled word is drawn uniformly from the range `min_len..=max_len`.
/// The caller has to make sure that enough distinct words of these lengths exist.
pub fn random_words(
    rng: &mut Rng,
    alphabet: &[char],
    min_len: usize,
    max_len: usize,
    number: usize,
) -> math::Set<String> {
    let mut word_set = math::Set::with_capacity_and_hasher(number, Default::default());

    while word_set.len() < number {
        word_set.insert(random_word(rng, alphabet, min_len, max_len));
    }

    word_set
}
