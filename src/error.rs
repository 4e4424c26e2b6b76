//! Error types shared by every stage of the coder.

use std::fmt;
use std::num::ParseIntError;

use thiserror::Error;

/// Result type alias for table, tree and codec operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// plaintext holds a symbol that has no leaf in the tree
    #[error("symbol {symbol:?} at position {position} is not in the frequency table")]
    InvalidAlphabet { symbol: char, position: usize },

    /// bitstring ends before the code starting at `position` reached a leaf
    #[error("bitstring ends inside a code: {remaining} trailing bit(s) starting at bit {position}")]
    MalformedCode { position: usize, remaining: usize },

    /// there is something other than 0s and 1s in the bitstring
    #[error("unexpected {found:?} at position {position} of bitstring")]
    NonBinary { found: char, position: usize },

    /// no symbols to build a tree from
    #[error("frequency table is empty")]
    EmptyTable,

    /// same symbol has been given two frequencies
    #[error("symbol {0:?} appears more than once in the frequency table")]
    DuplicateSymbol(char),

    /// sum of frequencies does not fit
    #[error("total frequency overflows")]
    FrequencyOverflow,

    /// something is wrong with a line of the frequency table
    #[error("invalid frequency table entry at {0}")]
    InvalidTableEntry(IsAt<TableEntryError>),

    /// this would never happen
    #[error("internal invariant broken: {0}")]
    Unreachable(&'static str),
}

/// Locates a parse problem inside a text input.
#[derive(Debug)]
pub struct IsAt<T> {
    /// number of lines from the top, starting at 1
    pub line: usize,
    /// number of characters from the left, starting at 0
    pub character: usize,
    pub is: T,
}

impl<T: fmt::Display> fmt::Display for IsAt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, character {}: {}", self.line, self.character, self.is)
    }
}

#[derive(Debug, Error)]
pub enum TableEntryError {
    /// entry is not in "symbol SEPARATOR frequency" style
    #[error("entry is not a symbol followed by a frequency")]
    Misformatted,

    /// no field after the symbol carries digits
    #[error("entry has no frequency")]
    MissingFrequency,

    /// digits are there but do not make a frequency
    #[error("invalid frequency: {0}")]
    InvalidFrequency(#[source] ParseIntError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_entry_error_names_its_location() {
        let err = Error::InvalidTableEntry(IsAt {
            line: 3,
            character: 0,
            is: TableEntryError::MissingFrequency,
        });
        assert_eq!(
            err.to_string(),
            "invalid frequency table entry at line 3, character 0: entry has no frequency"
        );
    }

    #[test]
    fn malformed_code_reports_trailing_bits() {
        let err = Error::MalformedCode {
            position: 4,
            remaining: 2,
        };
        assert!(err.to_string().contains("2 trailing bit(s) starting at bit 4"));
    }
}
