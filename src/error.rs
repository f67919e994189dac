use thiserror::Error;

/// Distinguishes what kind of index was out of range in an [`AutomatonError::IndexOutOfRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// A state index, valid states are `0..size`.
    State,
    /// A symbol code, valid symbols are `0..ALPHABET_SIZE`.
    Symbol,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::State => write!(f, "state"),
            IndexKind::Symbol => write!(f, "symbol"),
        }
    }
}

/// Errors that can occur while building or converting automata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    /// A state or symbol lies outside of the declared bounds. The automaton that was being
    /// modified is left unchanged.
    #[error("{kind} {index} is out of range, it must be smaller than {bound}")]
    IndexOutOfRange {
        /// Whether a state or a symbol was out of range.
        kind: IndexKind,
        /// The offending index.
        index: usize,
        /// The exclusive upper bound that was violated.
        bound: usize,
    },
    /// The subset construction would have produced more states than allowed.
    #[error("subset construction exceeded the limit of {limit} states")]
    CapacityExceeded {
        /// The configured maximal number of subsets.
        limit: usize,
    },
}

impl AutomatonError {
    pub(crate) fn state(index: usize, bound: usize) -> Self {
        Self::IndexOutOfRange {
            kind: IndexKind::State,
            index,
            bound,
        }
    }
}

/// Result type used throughout the crate.
pub type Result<T, E = AutomatonError> = std::result::Result<T, E>;
