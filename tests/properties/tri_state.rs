//! Property tests for tri-state evaluation.

use proptest::prelude::*;

use seltree::{LeafResolver, SelectionConfig, SelectionState, SelectionTree};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Realizing leaf positions never changes a node's evaluated state.
    #[test]
    fn property_realizing_leaves_keeps_state(
        flags in proptest::collection::vec(any::<bool>(), 1..24),
        realize in proptest::collection::vec(any::<bool>(), 1..24),
    ) {
        let items: Vec<usize> = (0..flags.len()).collect();
        let mut tree = SelectionTree::with_source(items, LeafResolver, SelectionConfig::default());
        let root = tree.root();
        for (index, selected) in flags.iter().enumerate() {
            tree.select(root, index, *selected).unwrap();
        }

        let selected = flags.iter().filter(|flag| **flag).count();
        let expected = if selected == 0 {
            SelectionState::NotSelected
        } else if selected == flags.len() {
            SelectionState::Selected
        } else {
            SelectionState::PartiallySelected
        };
        prop_assert_eq!(tree.evaluate_children(root).unwrap(), expected);

        for (index, realize) in realize.iter().enumerate() {
            if *realize {
                tree.realize_child(root, index).unwrap();
            }
        }
        prop_assert_eq!(tree.evaluate_children(root).unwrap(), expected);
        prop_assert_eq!(tree.node_count(), 1);
    }
}
