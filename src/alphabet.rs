use std::fmt::{Debug, Display};

use crate::error::{AutomatonError, IndexKind};

/// The number of distinct symbols. Every state of an automaton has a (possibly empty)
/// transition slot for each of them.
pub const ALPHABET_SIZE: usize = 128;

/// A single input symbol, that is a character code in the range `[0, 128)`.
///
/// Symbols are usually obtained from `char`s through [`TryFrom`], which fails with
/// [`AutomatonError::IndexOutOfRange`] for anything outside of the 7-bit range.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u8);

impl Symbol {
    /// Creates the symbol with the given `code`, fails if the code lies outside of the alphabet.
    pub fn new(code: u8) -> Result<Self, AutomatonError> {
        if (code as usize) < ALPHABET_SIZE {
            Ok(Self(code))
        } else {
            Err(AutomatonError::IndexOutOfRange {
                kind: IndexKind::Symbol,
                index: code as usize,
                bound: ALPHABET_SIZE,
            })
        }
    }

    /// Returns the numeric code of the symbol.
    pub fn code(&self) -> u8 {
        self.0
    }

    /// Returns the character that this symbol stands for.
    pub fn as_char(&self) -> char {
        self.0 as char
    }

    /// Iterates over all symbols of the alphabet in ascending order.
    pub fn universe() -> impl Iterator<Item = Symbol> + Clone {
        (0..ALPHABET_SIZE as u8).map(Symbol)
    }

    /// Iterates over all symbols except `excluded`.
    pub fn all_except(excluded: Symbol) -> impl Iterator<Item = Symbol> + Clone {
        Self::universe().filter(move |sym| *sym != excluded)
    }

    /// Turns every character of `input` into a symbol, stopping at the first one that lies outside
    /// of the alphabet.
    pub fn all_of(input: &str) -> Result<Vec<Symbol>, AutomatonError> {
        input.chars().map(Symbol::try_from).collect()
    }
}

impl TryFrom<char> for Symbol {
    type Error = AutomatonError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let code = value as u32 as usize;
        if code < ALPHABET_SIZE {
            Ok(Self(code as u8))
        } else {
            Err(AutomatonError::IndexOutOfRange {
                kind: IndexKind::Symbol,
                index: code,
                bound: ALPHABET_SIZE,
            })
        }
    }
}

impl TryFrom<u8> for Symbol {
    type Error = AutomatonError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Symbol> for char {
    fn from(value: Symbol) -> Self {
        value.as_char()
    }
}

impl Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.as_char())
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.as_char().is_ascii_graphic() {
            write!(f, "{}", self.as_char())
        } else {
            write!(f, "{}", self.as_char().escape_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_conversion() {
        let c = Symbol::try_from('c').unwrap();
        assert_eq!(c.code(), b'c');
        assert_eq!(c.as_char(), 'c');
        assert_eq!(Symbol::new(127).unwrap().code(), 127);

        assert_eq!(
            Symbol::try_from('é'),
            Err(AutomatonError::IndexOutOfRange {
                kind: IndexKind::Symbol,
                index: 'é' as usize,
                bound: ALPHABET_SIZE
            })
        );
        assert!(Symbol::new(128).is_err());
        assert!(Symbol::all_of("code").is_ok());
        assert!(Symbol::all_of("cødé").is_err());
    }

    #[test]
    fn universe_is_ordered_and_complete() {
        let all: Vec<_> = Symbol::universe().collect();
        assert_eq!(all.len(), ALPHABET_SIZE);
        assert!(all.windows(2).all(|w| w[0] < w[1]));

        let a = Symbol::try_from('a').unwrap();
        let rest: Vec<_> = Symbol::all_except(a).collect();
        assert_eq!(rest.len(), ALPHABET_SIZE - 1);
        assert!(!rest.contains(&a));
    }

    #[test]
    fn display_escapes_control_symbols() {
        assert_eq!(Symbol::try_from('x').unwrap().to_string(), "x");
        assert_eq!(Symbol::try_from('\n').unwrap().to_string(), "\\n");
        assert_eq!(format!("{:?}", Symbol::try_from('x').unwrap()), "'x'");
    }
}
