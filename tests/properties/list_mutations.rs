//! Property tests for keeping selection attached to items across list edits.

use proptest::prelude::*;

use seltree::{LeafResolver, SelectionConfig, SelectionTree, SharedList};

#[derive(Debug, Clone)]
enum Step {
    Toggle(usize),
    Insert(usize, usize),
    Remove(usize, usize),
    Replace(usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..64).prop_map(Step::Toggle),
        (0usize..64, 0usize..4).prop_map(|(at, count)| Step::Insert(at, count)),
        (0usize..64, 1usize..4).prop_map(|(at, count)| Step::Remove(at, count)),
        (0usize..64).prop_map(Step::Replace),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Selection follows items through inserts, removals and replacements,
    /// and every removed selected item is reported.
    #[test]
    fn property_selection_follows_items(
        initial in 0usize..16,
        steps in proptest::collection::vec(step(), 0..=32),
    ) {
        let mut next_id: u32 = 0;
        let mut fresh = |count: usize| -> Vec<u32> {
            let ids: Vec<u32> = (next_id..next_id + count as u32).collect();
            next_id += count as u32;
            ids
        };

        let list: SharedList<u32> = fresh(initial).into_iter().collect();
        let mut tree = SelectionTree::with_source(list.clone(), LeafResolver, SelectionConfig::default());
        let root = tree.root();
        // One flag per item, kept in list order
        let mut model: Vec<(u32, bool)> = list.to_vec().into_iter().map(|id| (id, false)).collect();

        for step in steps {
            let len = model.len();
            match step {
                Step::Toggle(at) => {
                    if len == 0 {
                        continue;
                    }
                    let index = at % len;
                    prop_assert!(tree.toggle_select(root, index).unwrap());
                    model[index].1 = !model[index].1;
                }
                Step::Insert(at, count) => {
                    let index = at % (len + 1);
                    let ids = fresh(count);
                    let report = tree.apply_mutation(root, list.insert_many(index, ids.clone())).unwrap();
                    prop_assert!(report.removed_items.is_empty());
                    model.splice(index..index, ids.into_iter().map(|id| (id, false)));
                }
                Step::Remove(at, count) => {
                    if len == 0 {
                        continue;
                    }
                    let index = at % len;
                    let end = (index + count).min(len);
                    let report = tree.apply_mutation(root, list.remove_range(index..end)).unwrap();
                    let expected: Vec<u32> = model
                        .drain(index..end)
                        .filter(|(_, selected)| *selected)
                        .map(|(id, _)| id)
                        .collect();
                    prop_assert!(report.selection_invalidated || expected.is_empty());
                    prop_assert_eq!(report.removed_items, expected);
                }
                Step::Replace(at) => {
                    if len == 0 {
                        continue;
                    }
                    let index = at % len;
                    let id = fresh(1)[0];
                    let report = tree.apply_mutation(root, list.replace(index, id)).unwrap();
                    let was_selected = model[index].1;
                    prop_assert_eq!(report.removed_items.len(), usize::from(was_selected));
                    model[index] = (id, false);
                }
            }

            let expected: Vec<usize> = model
                .iter()
                .enumerate()
                .filter(|(_, (_, selected))| *selected)
                .map(|(index, _)| index)
                .collect();
            prop_assert_eq!(tree.selected_indices(root).unwrap(), expected.as_slice());
            prop_assert_eq!(tree.node(root).unwrap().selected_count(), expected.len());
            prop_assert_eq!(list.to_vec(), model.iter().map(|(id, _)| *id).collect::<Vec<_>>());
        }
    }
}
