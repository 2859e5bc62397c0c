//! Code radix (number of distinct digit values per codeword position).

use crate::error::{Error, Result};

/// A validated code radix, at least 2.
///
/// Digits render as `0-9`, then `a`, `b`, `c`, … with no upper bound, so
/// radices above 36 continue past `z` into the following code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "usize", into = "usize"))]
pub struct Radix(usize);

impl Radix {
    /// Smallest supported radix.
    pub const MIN: usize = 2;
    /// Binary codes.
    pub const BINARY: Radix = Radix(2);

    /// Validate a radix.
    pub fn new(radix: usize) -> Result<Self> {
        if radix >= Self::MIN {
            Ok(Self(radix))
        } else {
            Err(Error::InvalidRadix(radix))
        }
    }

    /// The radix as a plain integer.
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for Radix {
    fn default() -> Self {
        Self::BINARY
    }
}

impl TryFrom<usize> for Radix {
    type Error = Error;

    fn try_from(radix: usize) -> Result<Self> {
        Self::new(radix)
    }
}

impl From<Radix> for usize {
    fn from(radix: Radix) -> usize {
        radix.get()
    }
}

impl std::fmt::Display for Radix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
