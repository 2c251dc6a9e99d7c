use std::cmp::Ordering;

use tracing::trace;

use crate::{
    error::{GoldenError, Result},
    huffman::{CreationIndex, HuffmanTree, Node},
    policy::{OrderingPolicy, Placement},
    weights::WeightTable,
};

/// Builds one tree per call. The creation counter is local to each
/// [`TreeBuilder::build_from_leaves`] call, so builds never observe each other.
pub struct TreeBuilder<'p, P: ?Sized> {
    policy: &'p P,
}

impl<'p, P: OrderingPolicy + ?Sized> TreeBuilder<'p, P> {
    pub fn new(policy: &'p P) -> Self {
        Self { policy }
    }

    pub fn build(&self, weights: &WeightTable) -> Result<HuffmanTree> {
        self.build_from_leaves(weights.leaves())
    }

    /// Merge `leaves` down to a single root. Leaves must carry creation
    /// indices `0..leaves.len()`; internal nodes continue from there.
    pub fn build_from_leaves(&self, leaves: Vec<Node>) -> Result<HuffmanTree> {
        if leaves.is_empty() {
            return Err(GoldenError::InvalidInput(
                "cannot build a tree without leaves".into(),
            ));
        }

        let mut next_creation = leaves.len() as CreationIndex;
        let mut candidates = leaves;
        let mut merges = 0;

        while candidates.len() > 1 {
            let first = candidates.remove(self.select(&candidates));
            let second = candidates.remove(self.select(&candidates));

            let (left, right) = match self.policy.orient(&first.key(), &second.key()) {
                Placement::FirstLeft => (first, second),
                Placement::SecondLeft => (second, first),
            };

            trace!(
                left = ?left.key(),
                right = ?right.key(),
                creation = next_creation,
                "merge"
            );

            candidates.push(Node::Internal {
                weight: left.weight() + right.weight(),
                creation: next_creation,
                left: Box::new(left),
                right: Box::new(right),
            });
            next_creation += 1;
            merges += 1;
        }

        let root = candidates
            .pop()
            .ok_or_else(|| GoldenError::InvalidInput("tree reduction left no root".into()))?;

        Ok(HuffmanTree { root, merges })
    }

    /// Index of the top-ranked candidate; equal keys keep the earlier one.
    fn select(&self, candidates: &[Node]) -> usize {
        let mut best = 0;
        for i in 1..candidates.len() {
            let ordering = self
                .policy
                .compare(&candidates[i].key(), &candidates[best].key());
            if ordering == Ordering::Less {
                best = i;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        huffman::NodeKey,
        policy::{DescendingId, LeafFirst, PolicyKind},
        symbol::{Symbol, ALPHABET},
    };

    fn table(weights: [u32; 8]) -> WeightTable {
        WeightTable::new(weights)
    }

    fn assert_sums(node: &Node) {
        if let Some((left, right)) = node.children() {
            assert_eq!(node.weight(), left.weight() + right.weight());
            assert!(node.creation() > left.creation());
            assert!(node.creation() > right.creation());
            assert_sums(left);
            assert_sums(right);
        }
    }

    #[test]
    fn seven_merges_one_root() {
        let weights = table([5, 9, 12, 13, 16, 45, 2, 7]);
        for kind in PolicyKind::ALL {
            let tree = TreeBuilder::new(&kind).build(&weights).unwrap();
            assert_eq!(tree.merges, 7);
            assert_eq!(tree.weight(), 109);
            assert_eq!(tree.root.creation(), 14);
            assert_eq!(tree.leaves().count(), 8);
            assert_sums(&tree.root);
        }
    }

    #[test]
    fn first_merge_takes_two_lightest() {
        // O(2) and A(5) are lightest; A is heavier so it lands left.
        let tree = TreeBuilder::new(&LeafFirst)
            .build(&table([5, 9, 12, 13, 16, 45, 2, 7]))
            .unwrap();
        let first_merge = tree
            .nodes()
            .into_iter()
            .find(|n| n.creation() == 8)
            .unwrap();
        let (left, right) = first_merge.children().unwrap();
        assert_eq!(left.symbol(), Some(Symbol::A));
        assert_eq!(right.symbol(), Some(Symbol::O));
    }

    #[test]
    fn descending_id_merges_newest_leaves_first() {
        let tree = TreeBuilder::new(&DescendingId).build(&table([1; 8])).unwrap();
        let first_merge = tree
            .nodes()
            .into_iter()
            .find(|n| n.creation() == 8)
            .unwrap();
        let (left, right) = first_merge.children().unwrap();
        assert_eq!(left.symbol(), Some(Symbol::O));
        assert_eq!(right.symbol(), Some(Symbol::V));
    }

    #[test]
    fn single_leaf_needs_no_merge() {
        let tree = TreeBuilder::new(&LeafFirst)
            .build_from_leaves(vec![Node::leaf(Symbol::A, 4, 0)])
            .unwrap();
        assert_eq!(tree.merges, 0);
        assert!(tree.root.is_leaf());
    }

    #[test]
    fn empty_leaf_set_is_rejected() {
        let err = TreeBuilder::new(&LeafFirst)
            .build_from_leaves(Vec::new())
            .unwrap_err();
        assert!(matches!(err, GoldenError::InvalidInput(_)));
    }

    #[test]
    fn equal_keys_fall_back_to_candidate_order() {
        let weight_only = |a: &NodeKey, b: &NodeKey| a.weight.cmp(&b.weight);
        let tree = TreeBuilder::new(&weight_only).build(&table([1; 8])).unwrap();
        let first_merge = tree
            .nodes()
            .into_iter()
            .find(|n| n.creation() == 8)
            .unwrap();
        let (left, right) = first_merge.children().unwrap();
        assert_eq!(left.symbol(), Some(ALPHABET[1]));
        assert_eq!(right.symbol(), Some(ALPHABET[0]));
    }

    #[test]
    fn builds_are_independent() {
        let builder = TreeBuilder::new(&LeafFirst);
        let weights = table([7, 1, 3, 3, 2, 6, 1, 4]);
        let first = builder.build(&weights).unwrap();
        let _other = builder.build(&table([3; 8])).unwrap();
        assert_eq!(builder.build(&weights).unwrap(), first);
    }
}
