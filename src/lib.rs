//! # r-ary Huffman Codes
//!
//! *Minimum-redundancy prefix codes over any digit alphabet.*
//!
//! ## Intuition First
//!
//! Picture every symbol as a pebble whose size is its weight. Repeatedly pick
//! up the lightest handful of pebbles and glue them into one bigger pebble.
//! When a single pebble is left, read the gluing history backwards: every glue
//! step is a branching point, and the route from the final pebble down to an
//! original one spells that symbol's codeword. Light symbols are glued early,
//! sit deep in the tree, and get long codewords; heavy ones stay short.
//!
//! ## The Problem
//!
//! With a binary alphabet "a handful" is two pebbles and everything just
//! works. With `r` digits each glue step takes `r` pebbles, but `N` symbols
//! only reduce to exactly one pebble when `(N - 1) mod (r - 1) == 0`. Gluing
//! blindly leaves a short final group at the *top* of the tree, wasting the
//! shortest codewords. The correction is to make the *first* group short.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy as the lower bound on average code length
//! 1949  Fano        Top-down splitting (Shannon-Fano), not always optimal
//! 1952  Huffman     Bottom-up merging, optimal; r-ary case in the same paper
//! 1976  van Leeuwen Linear-time construction from sorted weights
//! ```
//!
//! ## Mathematical Formulation
//!
//! Given weights `w_1..w_N` and radix `r`, find codeword lengths `l_i` with
//!
//! ```text
//! sum_i r^(-l_i) <= 1           (Kraft inequality)
//! minimize sum_i w_i * l_i
//! ```
//!
//! The first merge groups `s` nodes, the smallest `s` in `[2, r]` with
//! `(N - s) mod (r - 1) == 0`; every later merge groups exactly `r`.
//!
//! ## Complexity Analysis
//!
//! - **Time**: `O(N log N)` for the heap-driven merges, `O(N * depth)` to
//!   materialize codewords.
//! - **Space**: `O(N)` nodes in the arena.
//!
//! ## Failure Modes
//!
//! 1. **Ties**: several trees can be optimal. Ties are broken by input order,
//!    so the result is deterministic but not canonical across reorderings.
//! 2. **Skewed weights**: codeword length grows up to `N - 1` digits for
//!    Fibonacci-like weights. Nothing caps it.
//!
//! ## Usage
//!
//! ```
//! let code = rhuff::build_code([("A", 0.1), ("B", 0.2), ("C", 0.3), ("D", 0.4)], 2)?;
//! assert_eq!(code.get("D").map(|c| c.len()), Some(1));
//! assert!(code.is_prefix_free());
//! # Ok::<(), rhuff::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - Cover, T. M., & Thomas, J. A. (2006). *Elements of Information Theory*, ch. 5.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod code;
pub mod error;
pub mod huffman;
pub mod radix;
pub mod symbol;

pub use code::{CodeAssigner, CodeTable, Codeword};
pub use error::{Error, Result};
pub use huffman::{HuffmanTree, MergeNode, NodeId, TreeBuilder};
pub use radix::Radix;
pub use symbol::{SymbolSet, WeightedSymbol};

/// Build a code table in one step.
///
/// The radix is validated before the symbols, so an invalid radix is reported
/// even for empty input.
pub fn build_code<I, T>(symbols: I, radix: usize) -> Result<CodeTable>
where
    I: IntoIterator<Item = T>,
    T: Into<WeightedSymbol>,
{
    let builder = TreeBuilder::new(radix)?;
    let symbols = SymbolSet::new(symbols)?;
    let tree = builder.build(&symbols)?;
    Ok(CodeAssigner::assign(&tree))
}
