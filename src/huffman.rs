//! r-ary Huffman tree construction.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]; children are index
//! lists and the parent is an optional index, set once by the merge that adopts
//! the node.
//!
//! # Historical Context
//!
//! Huffman's 1952 paper already covers codes over `r` digits. The binary
//! procedure (merge the two lightest nodes until one remains) generalizes to
//! merging `r` nodes, with one catch: `N` leaves only collapse to a single root
//! by full `r`-way merges when `(N - 1) mod (r - 1) == 0`. Otherwise the last
//! merge is short and the shallowest level of the tree wastes digits. The fix is
//! to make the *first* (lightest) group short instead, of size `s` with
//! `(N - s) mod (r - 1) == 0`. This is equivalent to padding the alphabet with
//! zero-weight dummies.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::radix::Radix;
use crate::symbol::SymbolSet;

/// Index of a node within a [`HuffmanTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena position. Leaves occupy `0..leaf_count` in input order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A leaf wrapping one input symbol, or an internal node formed by a merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeNode {
    weight: f64,
    label: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    height: usize,
}

impl MergeNode {
    fn leaf(label: String, weight: f64) -> Self {
        Self {
            weight,
            label,
            children: Vec::new(),
            parent: None,
            height: 0,
        }
    }

    /// Sum of leaf weights beneath this node.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Symbol id for a leaf, `"{merge}_{weight:.2}"` for an internal node.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Children in ascending weight order. Position is the child's digit.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The merge node that adopted this one, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Distance to the deepest leaf below; 0 for leaves.
    pub fn height(&self) -> usize {
        self.height
    }

    /// True if this node wraps an input symbol.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Working-set entry, ordered by `(weight, seq)`.
///
/// `seq` is the input position for leaves and a running counter for merged
/// nodes, so equal weights pop in a reproducible order.
#[derive(Debug, Clone, Copy)]
struct Pending {
    weight: f64,
    seq: usize,
    id: NodeId,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-priority queue
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

/// Size of the first merge group for `symbols` leaves.
///
/// The smallest `s` in `[2, radix]` with `s <= symbols` and
/// `(symbols - s) mod (radix - 1) == 0`. Returns `None` for fewer than two
/// symbols, where no merge happens at all.
pub fn first_group_size(symbols: usize, radix: Radix) -> Option<usize> {
    if symbols < 2 {
        return None;
    }
    let r = radix.get();
    (2..=r.min(symbols)).find(|&s| (symbols - s) % (r - 1) == 0)
}

/// A completed code tree.
#[derive(Debug, Clone, PartialEq)]
pub struct HuffmanTree {
    nodes: Vec<MergeNode>,
    root: NodeId,
    leaf_count: usize,
    radix: Radix,
    first_group: Option<usize>,
}

impl HuffmanTree {
    /// The single node without a parent.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node by id.
    ///
    /// # Panics
    ///
    /// If `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> &MergeNode {
        &self.nodes[id.0]
    }

    /// Node by id, `None` if out of range.
    pub fn get(&self, id: NodeId) -> Option<&MergeNode> {
        self.nodes.get(id.0)
    }

    /// Total node count (leaves plus merges).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves, equal to the alphabet size.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of merge nodes.
    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count
    }

    /// Leaf ids in input order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.leaf_count).map(NodeId)
    }

    /// Radix the tree was built for.
    pub fn radix(&self) -> Radix {
        self.radix
    }

    /// Size of the first merge, `None` for a single-symbol tree.
    pub fn first_group_size(&self) -> Option<usize> {
        self.first_group
    }

    /// Pre-order walk from the root.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            stack: vec![Visit {
                node: self.root,
                parent: None,
                digit: None,
                depth: 0,
            }],
        }
    }
}

/// One step of a [`Walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    /// The visited node.
    pub node: NodeId,
    /// Its parent, `None` for the root.
    pub parent: Option<NodeId>,
    /// Position among the parent's children, `None` for the root.
    pub digit: Option<u32>,
    /// Distance from the root.
    pub depth: usize,
}

/// Depth-first, pre-order iterator over a tree.
///
/// A parent is always yielded before its children, and siblings are yielded in
/// digit order.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    tree: &'a HuffmanTree,
    stack: Vec<Visit>,
}

impl Iterator for Walk<'_> {
    type Item = Visit;

    fn next(&mut self) -> Option<Visit> {
        let tree = self.tree;
        let visit = self.stack.pop()?;
        let children = tree.node(visit.node).children();
        for (digit, &child) in children.iter().enumerate().rev() {
            self.stack.push(Visit {
                node: child,
                parent: Some(visit.node),
                digit: Some(digit as u32),
                depth: visit.depth + 1,
            });
        }
        Some(visit)
    }
}

impl std::iter::FusedIterator for Walk<'_> {}

/// Builds [`HuffmanTree`]s for a fixed radix.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder {
    radix: Radix,
}

impl TreeBuilder {
    /// Create a builder, validating the radix.
    pub fn new(radix: usize) -> Result<Self> {
        Ok(Self::with_radix(Radix::new(radix)?))
    }

    /// Create a builder from an already validated radix.
    pub fn with_radix(radix: Radix) -> Self {
        Self { radix }
    }

    /// Radix used for every merge.
    pub fn radix(&self) -> Radix {
        self.radix
    }

    /// Merge the alphabet into a single rooted tree.
    pub fn build(&self, symbols: &SymbolSet) -> Result<HuffmanTree> {
        let n = symbols.len();
        let r = self.radix.get();
        let unreachable = || Error::UnreachableRadixConfiguration {
            symbols: n,
            radix: r,
        };
        if n == 0 {
            return Err(Error::EmptyInput);
        }

        let mut nodes = Vec::with_capacity(2 * n - 1);
        let mut heap = BinaryHeap::with_capacity(n);
        for (seq, s) in symbols.iter().enumerate() {
            let id = NodeId(nodes.len());
            nodes.push(MergeNode::leaf(s.id.clone(), s.weight));
            heap.push(Pending {
                weight: s.weight,
                seq,
                id,
            });
        }

        let first_group = if n > 1 {
            Some(first_group_size(n, self.radix).ok_or_else(unreachable)?)
        } else {
            None
        };
        debug!(symbols = n, radix = r, first_group = ?first_group, "building huffman tree");

        let mut group_size = first_group.unwrap_or(r);
        let mut group = Vec::with_capacity(r.min(n));
        let mut next_seq = n;
        let mut merges = 0usize;

        while heap.len() > 1 {
            if heap.len() < group_size {
                return Err(unreachable());
            }
            group.clear();
            for _ in 0..group_size {
                group.push(heap.pop().ok_or_else(unreachable)?);
            }

            let id = NodeId(nodes.len());
            let weight: f64 = group.iter().map(|p| p.weight).sum();
            let mut height = 0;
            let mut children = Vec::with_capacity(group.len());
            for p in &group {
                let child = &mut nodes[p.id.0];
                debug_assert!(child.parent.is_none(), "node adopted twice");
                child.parent = Some(id);
                height = height.max(child.height + 1);
                children.push(p.id);
            }

            let label = format!("{merges}_{weight:.2}");
            trace!(group = children.len(), weight, label = %label, "merged nodes");
            nodes.push(MergeNode {
                weight,
                label,
                children,
                parent: None,
                height,
            });
            heap.push(Pending {
                weight,
                seq: next_seq,
                id,
            });

            next_seq += 1;
            merges += 1;
            group_size = r;
        }

        let root = heap.pop().map(|p| p.id).ok_or_else(unreachable)?;
        debug!(nodes = nodes.len(), merges, "huffman tree complete");

        Ok(HuffmanTree {
            nodes,
            root,
            leaf_count: n,
            radix: self.radix,
            first_group,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(weights: &[f64], radix: usize) -> HuffmanTree {
        let symbols = SymbolSet::new(
            weights
                .iter()
                .enumerate()
                .map(|(i, &w)| (format!("s{i}"), w)),
        )
        .unwrap();
        TreeBuilder::new(radix).unwrap().build(&symbols).unwrap()
    }

    #[test]
    fn test_first_group_size() {
        let r = |x| Radix::new(x).unwrap();
        assert_eq!(first_group_size(0, r(3)), None);
        assert_eq!(first_group_size(1, r(3)), None);
        assert_eq!(first_group_size(2, r(3)), Some(2));
        assert_eq!(first_group_size(5, r(3)), Some(3));
        assert_eq!(first_group_size(6, r(3)), Some(2));
        assert_eq!(first_group_size(3, r(5)), Some(3));
        assert_eq!(first_group_size(6, r(4)), Some(3));
        assert_eq!(first_group_size(7, r(4)), Some(4));
        for n in 2..50 {
            assert_eq!(first_group_size(n, Radix::BINARY), Some(2));
        }
    }

    #[test]
    fn test_single_leaf_is_root() {
        let tree = build(&[1.0], 3);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), NodeId(0));
        assert!(tree.node(tree.root()).is_leaf());
        assert_eq!(tree.first_group_size(), None);
        assert_eq!(tree.internal_count(), 0);
    }

    #[test]
    fn test_binary_internal_count() {
        for n in 2..20 {
            let weights: Vec<f64> = (1..=n).map(|w| w as f64).collect();
            let tree = build(&weights, 2);
            assert_eq!(tree.leaf_count(), n);
            assert_eq!(tree.internal_count(), n - 1);
        }
    }

    #[test]
    fn test_rary_internal_count() {
        for r in 3..=8 {
            for n in 2..40 {
                let weights: Vec<f64> = (1..=n).map(|w| w as f64).collect();
                let tree = build(&weights, r);
                let s = first_group_size(n, tree.radix()).unwrap();
                assert_eq!(tree.internal_count(), 1 + (n - s) / (r - 1), "n={n} r={r}");
            }
        }
    }

    #[test]
    fn test_root_weight_and_parents() {
        let tree = build(&[0.1, 0.2, 0.3, 0.4], 2);
        let root = tree.node(tree.root());
        assert!((root.weight() - 1.0).abs() < 1e-12);
        assert_eq!(root.parent(), None);

        let orphans = (0..tree.len())
            .filter(|&i| tree.node(NodeId(i)).parent().is_none())
            .count();
        assert_eq!(orphans, 1);

        for i in 0..tree.len() {
            let node = tree.node(NodeId(i));
            for &c in node.children() {
                assert_eq!(tree.node(c).parent(), Some(NodeId(i)));
                assert!(tree.node(c).height() < node.height());
            }
        }
    }

    #[test]
    fn test_children_ascending() {
        let tree = build(&[5.0, 1.0, 4.0, 2.0, 3.0, 7.0, 6.0], 3);
        for v in tree.walk() {
            let node = tree.node(v.node);
            let ws: Vec<f64> = node.children().iter().map(|&c| tree.node(c).weight()).collect();
            assert!(ws.windows(2).all(|w| w[0] <= w[1]), "{ws:?}");
        }
    }

    #[test]
    fn test_ties_follow_input_order() {
        let tree = build(&[1.0, 1.0, 1.0, 1.0], 2);
        // s0 and s1 merge first, then s2 and s3.
        let first = tree.node(NodeId(4));
        assert_eq!(first.children(), &[NodeId(0), NodeId(1)]);
        let second = tree.node(NodeId(5));
        assert_eq!(second.children(), &[NodeId(2), NodeId(3)]);
        assert_eq!(first.label(), "0_2.00");
    }

    #[test]
    fn test_walk_visits_each_node_once() {
        let tree = build(&[3.0, 1.0, 4.0, 1.5, 5.0, 9.0, 2.0, 6.0], 3);
        let mut seen = vec![0usize; tree.len()];
        for v in tree.walk() {
            seen[v.node.index()] += 1;
            match v.parent {
                None => assert_eq!(v.node, tree.root()),
                Some(p) => {
                    let digit = v.digit.unwrap() as usize;
                    assert_eq!(tree.node(p).children()[digit], v.node);
                }
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_height_of_root() {
        let tree = build(&[1.0, 1.0, 2.0, 4.0], 2);
        let depth = tree.walk().map(|v| v.depth).max().unwrap();
        assert_eq!(tree.node(tree.root()).height(), depth);
        assert_eq!(depth, 3);
    }

    #[test]
    fn test_radix_wider_than_alphabet() {
        let tree = build(&[2.0, 1.0, 3.0], usize::MAX);
        assert_eq!(tree.first_group_size(), Some(3));
        assert_eq!(tree.internal_count(), 1);
        assert_eq!(tree.node(tree.root()).children().len(), 3);
    }

    #[test]
    fn test_leaves_in_input_order() {
        let tree = build(&[0.5, 0.25, 0.25], 2);
        let labels: Vec<&str> = tree.leaves().map(|id| tree.node(id).label()).collect();
        assert_eq!(labels, ["s0", "s1", "s2"]);
    }
}
