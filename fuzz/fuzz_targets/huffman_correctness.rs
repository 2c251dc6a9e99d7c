#![no_main]

use huffman_golden::{Codebook, PolicyKind, TreeBuilder, WeightTable, ALPHABET};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 16 {
        return;
    }

    let mut weights = [0u32; 8];
    for (w, chunk) in weights.iter_mut().zip(data.chunks_exact(2)) {
        *w = u32::from(u16::from_le_bytes([chunk[0], chunk[1]]));
    }
    let weights = WeightTable::new(weights);

    for policy in PolicyKind::ALL {
        let tree = TreeBuilder::new(&policy).build(&weights).unwrap();
        assert_eq!(tree.merges, 7);
        assert_eq!(tree.weight(), weights.total());

        let codebook = Codebook::from_tree(&tree);
        assert_eq!(codebook.symbols().collect::<Vec<_>>(), ALPHABET.to_vec());
        assert!(codebook.is_prefix_free());
        assert!(codebook.kraft_sum_is_one());

        assert_eq!(TreeBuilder::new(&policy).build(&weights).unwrap(), tree);
    }
});
