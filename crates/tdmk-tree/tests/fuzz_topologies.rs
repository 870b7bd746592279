use proptest::prelude::*;
use tdmk_core::Parameters;
use tdmk_tree::{canonical_tree_hash, tree_from_bytes, tree_to_bytes, CliqueTree};

proptest! {
    #[test]
    fn built_topologies_respect_invariants(
        m in 1u32..16,
        k in 1u32..7,
        overlap_fraction in 0u32..6,
        b in 1u32..5,
    ) {
        let o = overlap_fraction % k;
        let parameters = Parameters::new(m, k, o, b).unwrap();
        let tree = CliqueTree::build(parameters).unwrap();

        tree.verify().unwrap();
        prop_assert_eq!(tree.num_cliques(), m as usize);
        prop_assert_eq!(tree.num_variables(), (m - 1) * (k - o) + k);

        for (index, record) in tree.records().iter().enumerate() {
            prop_assert!(record.children().len() <= b as usize);
            for &child in record.children() {
                prop_assert!(child > index);
                prop_assert_eq!(tree.records()[child].parent(), Some(index));
            }
        }

        let bytes = tree_to_bytes(&tree).unwrap();
        let restored = tree_from_bytes(&bytes).unwrap();
        prop_assert_eq!(canonical_tree_hash(&tree), canonical_tree_hash(&restored));
    }
}
