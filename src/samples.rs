//! A small zoo of hand-built automata. They serve as documentation of the construction API and
//! as fixtures for tests and benchmarks.
use crate::{error::Result, DFA, NFA};

/// Accepts exactly the word `csc173`.
pub fn csc173() -> Result<DFA> {
    DFA::new(7)
        .with_transitions([
            (0, 'c', 1),
            (1, 's', 2),
            (2, 'c', 3),
            (3, '1', 4),
            (4, '7', 5),
            (5, '3', 6),
        ])?
        .with_accepting([6])
}

/// Accepts every word that starts with `cat`.
pub fn starts_with_cat() -> Result<DFA> {
    let mut dfa = DFA::new(4)
        .with_transitions([(0, 'c', 1), (1, 'a', 2), (2, 't', 3)])?
        .with_accepting([3])?;
    dfa.set_transition_for_all(3, 3)?;
    Ok(dfa)
}

/// Accepts words over `{0, 1}` that contain an even number of `0`s.
pub fn even_zeros() -> Result<DFA> {
    DFA::new(2)
        .with_transitions([(0, '0', 1), (1, '0', 0), (0, '1', 0), (1, '1', 1)])?
        .with_accepting([0])
}

/// Accepts words over `{0, 1}` that contain an even number of `0`s and an even number of `1`s.
pub fn even_zeros_and_ones() -> Result<DFA> {
    DFA::new(4)
        .with_transitions([
            (0, '0', 1),
            (1, '0', 0),
            (0, '1', 2),
            (2, '1', 0),
            (2, '0', 3),
            (3, '0', 2),
            (3, '1', 1),
            (1, '1', 3),
        ])?
        .with_accepting([0])
}

/// Accepts words over `{0, 1}` that contain `01` as an infix.
pub fn contains_01() -> Result<DFA> {
    DFA::new(4)
        .with_transitions([
            (0, '1', 1),
            (0, '0', 2),
            (1, '1', 1),
            (1, '0', 2),
            (2, '0', 2),
            (2, '1', 3),
        ])?
        .with_accepting([3])
        .and_then(|mut dfa| {
            dfa.set_transition_str(3, "01", 3)?;
            Ok(dfa)
        })
}

/// Accepts every word that ends with `code`.
pub fn ends_with_code() -> Result<NFA> {
    let mut nfa = NFA::new(5)
        .with_transitions([(0, 'c', 1), (1, 'o', 2), (2, 'd', 3), (3, 'e', 4)])?
        .with_accepting([4])?;
    nfa.add_transition_for_all(0, 0)?;
    Ok(nfa)
}

/// Accepts every word that contains `code` as an infix.
pub fn contains_code() -> Result<NFA> {
    let mut nfa = ends_with_code()?;
    nfa.add_transition_for_all(4, 4)?;
    Ok(nfa)
}

/// Accepts every word that ends in a letter of `washington` which occurs in the word more often
/// than it does in `washington`. That is at least twice, or at least three times for `n`.
pub fn washington() -> Result<NFA> {
    let mut nfa = NFA::new(20);
    nfa.add_transition_for_all(0, 0)?;
    let mut next = 1;
    for letter in "aghiostw".chars() {
        let (waiting, done) = (next, next + 1);
        nfa.add_transition(0, letter, waiting)?;
        nfa.add_transition_except(waiting, letter, waiting)?;
        nfa.add_transition(waiting, letter, done)?;
        nfa.set_accepting(done, true)?;
        next += 2;
        if letter == 'i' {
            // `n` occurs twice in `washington`, it is wired up right after `i`
            nfa.add_transition(0, 'n', 9)?;
            nfa.add_transition_except(9, 'n', 9)?;
            nfa.add_transition(9, 'n', 10)?;
            nfa.add_transition_except(10, 'n', 10)?;
            nfa.add_transition(10, 'n', 11)?;
            nfa.set_accepting(11, true)?;
            next = 12;
        }
    }
    Ok(nfa)
}

/// Accepts every word that contains the letters `r`, `o`, `s` and `e` in this order, possibly
/// with other characters in between.
pub fn rose_in_sequence() -> Result<NFA> {
    let mut nfa = NFA::new(5).with_accepting([4])?;
    nfa.add_transition_for_all(0, 0)?;
    nfa.add_transition(0, 'r', 1)?;
    nfa.add_transition_for_all(1, 1)?;
    nfa.add_transition(1, 'o', 2)?;
    nfa.add_transition_for_all(2, 2)?;
    nfa.add_transition(2, 's', 3)?;
    nfa.add_transition_for_all(3, 3)?;
    nfa.add_transition(3, 'e', 4)?;
    nfa.add_transition_for_all(4, 4)?;
    Ok(nfa)
}
