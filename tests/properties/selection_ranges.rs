//! Property tests for range-compressed selection bookkeeping.

use std::collections::BTreeSet;

use proptest::prelude::*;

use seltree::{IndexRange, LeafResolver, SelectionConfig, SelectionTree};

#[derive(Debug, Clone)]
enum Edit {
    Single(usize, bool),
    Range(usize, usize, bool),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0usize..40, any::<bool>()).prop_map(|(index, select)| Edit::Single(index, select)),
        (0usize..40, 0usize..40, any::<bool>()).prop_map(|(a, b, select)| Edit::Range(a, b, select)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Any mix of single and range edits matches a per-index set.
    #[test]
    fn property_selection_matches_reference_set(
        len in 1usize..32,
        edits in proptest::collection::vec(edit(), 0..=24),
    ) {
        let items: Vec<usize> = (0..len).collect();
        let mut tree = SelectionTree::with_source(items, LeafResolver, SelectionConfig::default());
        let root = tree.root();
        let mut model = BTreeSet::new();

        for edit in edits {
            match edit {
                Edit::Single(index, select) => {
                    let accepted = tree.select(root, index, select).unwrap();
                    prop_assert_eq!(accepted, index < len);
                    if accepted {
                        if select {
                            model.insert(index);
                        } else {
                            model.remove(&index);
                        }
                    }
                }
                Edit::Range(a, b, select) => {
                    let range = IndexRange::new(a, b);
                    let accepted = tree.select_range(root, range, select).unwrap();
                    prop_assert_eq!(accepted, range.end() < len);
                    if accepted {
                        for index in range.indices() {
                            if select {
                                model.insert(index);
                            } else {
                                model.remove(&index);
                            }
                        }
                    }
                }
            }

            let node = tree.node(root).unwrap();
            prop_assert_eq!(node.selected_count(), model.len());
        }

        let expected: Vec<usize> = model.iter().copied().collect();
        prop_assert_eq!(tree.selected_indices(root).unwrap(), expected.as_slice());
        for index in 0..len {
            prop_assert_eq!(tree.is_selected(root, index).unwrap(), model.contains(&index));
        }
    }

    /// PROPERTY: Clearing always leaves an empty, zero-count selection.
    #[test]
    fn property_clear_resets_everything(
        len in 1usize..32,
        edits in proptest::collection::vec(edit(), 0..=12),
    ) {
        let items: Vec<usize> = (0..len).collect();
        let mut tree = SelectionTree::with_source(items, LeafResolver, SelectionConfig::default());
        let root = tree.root();

        for edit in edits {
            match edit {
                Edit::Single(index, select) => {
                    tree.select(root, index, select).unwrap();
                }
                Edit::Range(a, b, select) => {
                    tree.select_range(root, IndexRange::new(a, b), select).unwrap();
                }
            }
        }
        tree.clear(root).unwrap();

        let node = tree.node(root).unwrap();
        prop_assert_eq!(node.selected_count(), 0);
        prop_assert!(node.selected_ranges().is_empty());
        prop_assert!(node.selected_indices().is_empty());
        prop_assert_eq!(node.anchor_index(), None);
    }
}
