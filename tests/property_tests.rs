//! Property-based checks over arbitrary weight vectors.

use huffman_golden::{
    Codebook, HuffmanEncoder, Mode, Node, Pattern, PolicyKind, TreeBuilder, WeightTable, ALPHABET,
};
use proptest::prelude::*;

fn weights_strategy() -> impl Strategy<Value = [u32; 8]> {
    prop::array::uniform8(0u32..10_000)
}

fn policy_strategy() -> impl Strategy<Value = PolicyKind> {
    prop::sample::select(PolicyKind::ALL.to_vec())
}

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop::sample::select(Mode::ALL.to_vec())
}

fn check_sums(node: &Node) -> Result<(), TestCaseError> {
    if let Some((left, right)) = node.children() {
        prop_assert_eq!(node.weight(), left.weight() + right.weight());
        check_sums(left)?;
        check_sums(right)?;
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_codebook_is_complete_prefix_free_code(
        weights in weights_strategy(),
        policy in policy_strategy(),
    ) {
        let tree = TreeBuilder::new(&policy).build(&WeightTable::new(weights)).unwrap();
        let codebook = Codebook::from_tree(&tree);

        prop_assert_eq!(tree.merges, 7);
        prop_assert_eq!(codebook.symbols().collect::<Vec<_>>(), ALPHABET.to_vec());
        prop_assert!(codebook.iter().all(|(_, code)| !code.is_empty()));
        prop_assert!(codebook.is_prefix_free());
        prop_assert!(codebook.kraft_sum_is_one());
    }

    #[test]
    fn prop_internal_weights_are_child_sums(
        weights in weights_strategy(),
        policy in policy_strategy(),
    ) {
        let table = WeightTable::new(weights);
        let tree = TreeBuilder::new(&policy).build(&table).unwrap();

        prop_assert_eq!(tree.weight(), table.total());
        check_sums(&tree.root)?;
    }

    #[test]
    fn prop_pipeline_is_deterministic(
        weights in weights_strategy(),
        policy in policy_strategy(),
        mode in mode_strategy(),
    ) {
        let pattern = Pattern::new(WeightTable::new(weights), mode);
        let first = pattern.solve(&policy).unwrap();
        let second = pattern.solve(&policy).unwrap();

        prop_assert_eq!(&first.codebook, &second.codebook);
        prop_assert_eq!(first.golden_line(), second.golden_line());
    }

    #[test]
    fn prop_encoding_length_is_codeword_sum(
        weights in weights_strategy(),
        policy in policy_strategy(),
        mode in mode_strategy(),
    ) {
        let tree = TreeBuilder::new(&policy).build(&WeightTable::new(weights)).unwrap();
        let codebook = Codebook::from_tree(&tree);
        let bits = HuffmanEncoder::new(&codebook).encode_mode(mode).unwrap();

        let expected: usize = mode
            .sequence()
            .iter()
            .map(|s| codebook.get(*s).unwrap().len())
            .sum();
        prop_assert_eq!(bits.len(), expected);
    }

    #[test]
    fn prop_records_round_trip(
        weights in weights_strategy(),
        mode in mode_strategy(),
    ) {
        let pattern = Pattern::new(WeightTable::new(weights), mode);
        let parsed = Pattern::parse_record(0, &pattern.to_record_line()).unwrap();
        prop_assert_eq!(parsed, pattern);
    }
}
