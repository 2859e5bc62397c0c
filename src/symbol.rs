//! Weighted input alphabets.
//!
//! A [`SymbolSet`] is validated once at construction (non-empty, unique ids,
//! finite positive weights) and is read-only afterwards. Weights do not have to
//! sum to one; only their relative order shapes the code tree.

use std::collections::HashSet;

use crate::error::{Error, Result};

/// A symbol id paired with its weight (frequency or probability).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedSymbol {
    /// Symbol identifier, unique within one alphabet.
    pub id: String,
    /// Strictly positive, finite weight.
    pub weight: f64,
}

impl WeightedSymbol {
    /// Create a new weighted symbol.
    pub fn new(id: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }
}

impl<S: Into<String>> From<(S, f64)> for WeightedSymbol {
    fn from((id, weight): (S, f64)) -> Self {
        Self::new(id, weight)
    }
}

/// An immutable, validated alphabet in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolSet {
    symbols: Vec<WeightedSymbol>,
}

impl SymbolSet {
    /// Validate and collect an alphabet.
    ///
    /// Input order is preserved; it is the tie-break key when weights are
    /// equal, so the same input order always yields the same code.
    pub fn new<I, T>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<WeightedSymbol>,
    {
        let symbols: Vec<WeightedSymbol> = symbols.into_iter().map(Into::into).collect();
        if symbols.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut seen = HashSet::with_capacity(symbols.len());
        for s in &symbols {
            if !s.weight.is_finite() || s.weight <= 0.0 {
                return Err(Error::InvalidWeight {
                    symbol: s.id.clone(),
                    weight: s.weight,
                });
            }
            if !seen.insert(s.id.as_str()) {
                return Err(Error::DuplicateSymbol(s.id.clone()));
            }
        }

        Ok(Self { symbols })
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false: a validated set holds at least one symbol.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, WeightedSymbol> {
        self.symbols.iter()
    }

    /// Look up a symbol weight by id.
    pub fn weight(&self, id: &str) -> Option<f64> {
        self.symbols.iter().find(|s| s.id == id).map(|s| s.weight)
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.symbols.iter().map(|s| s.weight).sum()
    }
}

impl<'a> IntoIterator for &'a SymbolSet {
    type Item = &'a WeightedSymbol;
    type IntoIter = std::slice::Iter<'a, WeightedSymbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
