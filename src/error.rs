//! Error types for prefix code construction.

use thiserror::Error;

/// Error variants for building a code.
///
/// Every variant aborts the build; no partial tree or table is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Requested radix is below 2.
    #[error("invalid radix: {0} (expected at least 2)")]
    InvalidRadix(usize),

    /// No symbols were supplied.
    #[error("empty input: at least one symbol is required")]
    EmptyInput,

    /// The same symbol id appeared more than once.
    #[error("duplicate symbol: {0:?}")]
    DuplicateSymbol(String),

    /// A symbol weight is zero, negative, or non-finite.
    #[error("invalid weight for symbol {symbol:?}: {weight}")]
    InvalidWeight {
        /// Offending symbol id.
        symbol: String,
        /// Offending weight.
        weight: f64,
    },

    /// The merge process could not reduce the alphabet to a single root.
    #[error("unreachable radix configuration: {symbols} symbols with radix {radix}")]
    UnreachableRadixConfiguration {
        /// Number of symbols in the alphabet.
        symbols: usize,
        /// Requested radix.
        radix: usize,
    },

    /// A supplied codeword uses a digit the table's radix cannot produce.
    #[error("digit {digit} in codeword for {symbol:?} is out of range for radix {radix}")]
    DigitOutOfRange {
        /// Symbol owning the codeword.
        symbol: String,
        /// Offending digit value.
        digit: u32,
        /// Radix of the table.
        radix: usize,
    },

    /// A supplied codeword is a prefix of another one.
    #[error("codeword for {prefix:?} is a prefix of the codeword for {word:?}")]
    NotPrefixFree {
        /// Symbol whose codeword is the prefix.
        prefix: String,
        /// Symbol whose codeword starts with it.
        word: String,
    },
}

/// A specialized Result type for code construction.
pub type Result<T> = std::result::Result<T, Error>;
