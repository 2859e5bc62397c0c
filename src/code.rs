//! Codeword assignment and the resulting code table.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::error::Result;
use crate::huffman::HuffmanTree;
use crate::radix::Radix;

/// Render one digit: `0-9`, then `a` for 10, `b` for 11, and so on.
///
/// Digit `d >= 10` is the character `d - 10` code points after `'a'`, so
/// radices above 36 continue past `z` (`{` for 36, `|` for 37, ...). Returns
/// `None` only where that position is not a Unicode scalar value.
pub fn render_digit(digit: u32) -> Option<char> {
    match digit {
        0..=9 => char::from_digit(digit, 10),
        _ => ('a' as u32)
            .checked_add(digit - 10)
            .and_then(char::from_u32),
    }
}

/// Inverse of [`render_digit`].
pub fn parse_digit(c: char) -> Option<u32> {
    match c {
        '0'..='9' => c.to_digit(10),
        _ if c >= 'a' => Some(c as u32 - 'a' as u32 + 10),
        _ => None,
    }
}

/// The digit path from the root to one leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codeword {
    digits: Vec<u32>,
}

impl Codeword {
    /// Raw digit values, most significant (closest to the root) first.
    pub fn digits(&self) -> &[u32] {
        &self.digits
    }

    /// Number of digits.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// True only for the sole symbol of a one-symbol alphabet.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// True if `self` is a prefix of `other` (including equality).
    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        other.digits.starts_with(&self.digits)
    }
}

impl From<Vec<u32>> for Codeword {
    fn from(digits: Vec<u32>) -> Self {
        Self { digits }
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &d in &self.digits {
            let c = render_digit(d).ok_or(fmt::Error)?;
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Returned when a rendered codeword contains a character below `'a'` that is
/// not a decimal digit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid codeword digit {0:?}")]
pub struct InvalidDigit(pub char);

impl FromStr for Codeword {
    type Err = InvalidDigit;

    fn from_str(s: &str) -> std::result::Result<Self, InvalidDigit> {
        let digits = s
            .chars()
            .map(|c| parse_digit(c).ok_or(InvalidDigit(c)))
            .collect::<std::result::Result<_, _>>()?;
        Ok(Self { digits })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Codeword {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Codeword {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Mapping from symbol id to codeword.
///
/// Every codeword uses digits below the radix and none is a prefix of
/// another. Iteration is sorted by symbol id. The sort is presentation only;
/// lookups do not depend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCodeTable"))]
pub struct CodeTable {
    radix: Radix,
    codes: BTreeMap<String, Codeword>,
}

/// Unchecked wire form of a [`CodeTable`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCodeTable {
    radix: Radix,
    codes: BTreeMap<String, Codeword>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCodeTable> for CodeTable {
    type Error = crate::Error;

    fn try_from(raw: RawCodeTable) -> Result<Self> {
        Self::from_codewords(raw.radix, raw.codes)
    }
}

impl CodeTable {
    /// Build a table from externally supplied codewords.
    ///
    /// Fails on an empty or duplicated symbol set, a digit not below `radix`,
    /// or a codeword that prefixes another.
    pub fn from_codewords<I, S>(radix: Radix, codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Codeword)>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (id, code) in codes {
            let id = id.into();
            if let Some(&digit) = code.digits.iter().find(|&&d| d as usize >= radix.get()) {
                return Err(crate::Error::DigitOutOfRange {
                    symbol: id,
                    digit,
                    radix: radix.get(),
                });
            }
            if map.contains_key(&id) {
                return Err(crate::Error::DuplicateSymbol(id));
            }
            map.insert(id, code);
        }
        if map.is_empty() {
            return Err(crate::Error::EmptyInput);
        }

        let table = Self { radix, codes: map };
        if let Some((prefix, word)) = table.prefix_conflict() {
            return Err(crate::Error::NotPrefixFree {
                prefix: prefix.to_string(),
                word: word.to_string(),
            });
        }
        Ok(table)
    }

    /// Radix of every codeword in the table.
    pub fn radix(&self) -> Radix {
        self.radix
    }

    /// Codeword for a symbol id.
    pub fn get(&self, id: &str) -> Option<&Codeword> {
        self.codes.get(id)
    }

    /// True if `id` has a codeword.
    pub fn contains(&self, id: &str) -> bool {
        self.codes.contains_key(id)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True if the table holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(id, codeword)` pairs sorted by id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Codeword)> + '_ {
        self.codes.iter().map(|(id, code)| (id.as_str(), code))
    }

    /// Check that no codeword is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        self.prefix_conflict().is_none()
    }

    /// First `(prefix, word)` symbol pair whose codewords collide.
    ///
    /// After sorting, a prefix always sorts directly before some word it
    /// prefixes, so only neighbours need comparing.
    fn prefix_conflict(&self) -> Option<(&str, &str)> {
        let mut words: Vec<(&Codeword, &str)> =
            self.codes.iter().map(|(id, code)| (code, id.as_str())).collect();
        words.sort();
        words
            .windows(2)
            .find(|w| w[0].0.is_prefix_of(w[1].0))
            .map(|w| (w[0].1, w[1].1))
    }
}

impl<'a> IntoIterator for &'a CodeTable {
    type Item = (&'a String, &'a Codeword);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Codeword>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

/// One `symbol,codeword` line per symbol, sorted by symbol.
impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, code) in &self.codes {
            writeln!(f, "{id},{code}")?;
        }
        Ok(())
    }
}

/// Turns a finished tree into a [`CodeTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeAssigner;

impl CodeAssigner {
    /// Assign every leaf the digit path leading to it from the root.
    ///
    /// A child's digit is its position among its parent's children. A root
    /// that is itself a leaf gets the empty codeword.
    pub fn assign(tree: &HuffmanTree) -> CodeTable {
        // Only paths of internal nodes with unvisited children are held.
        let mut paths: Vec<Vec<u32>> = vec![Vec::new(); tree.len()];
        let mut codes = BTreeMap::new();

        for visit in tree.walk() {
            let mut path = match (visit.parent, visit.digit) {
                (Some(p), Some(d)) => {
                    let last = d as usize + 1 == tree.node(p).children().len();
                    let slot = &mut paths[p.index()];
                    let mut path = if last {
                        std::mem::take(slot)
                    } else {
                        slot.clone()
                    };
                    path.push(d);
                    path
                }
                _ => Vec::new(),
            };

            let node = tree.node(visit.node);
            if node.is_leaf() {
                path.shrink_to_fit();
                codes.insert(node.label().to_string(), Codeword { digits: path });
            } else {
                paths[visit.node.index()] = path;
            }
        }

        debug!(symbols = codes.len(), radix = tree.radix().get(), "assigned codewords");
        CodeTable {
            radix: tree.radix(),
            codes,
        }
    }
}
