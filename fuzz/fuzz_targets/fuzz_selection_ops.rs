#![no_main]

use libfuzzer_sys::fuzz_target;
use seltree::{IndexRange, LeafResolver, SelectionConfig, SelectionTree, SharedList};

// Each pair of bytes is one operation on a flat list: opcode, argument.
fuzz_target!(|data: &[u8]| {
    let list: SharedList<u8> = (0..16).collect();
    let mut tree = SelectionTree::with_source(list.clone(), LeafResolver, SelectionConfig::default());
    let root = tree.root();

    for op in data.chunks_exact(2) {
        let len = list.len();
        let arg = usize::from(op[1]);
        let result = match op[0] % 6 {
            0 => tree.toggle_select(root, arg % (len + 1)).map(|_| ()),
            1 => tree
                .select_range(root, IndexRange::new(arg % 8, arg / 8), op[0] & 0x80 != 0)
                .map(|_| ()),
            2 => tree.apply_mutation(root, list.insert(arg % (len + 1), op[1])).map(|_| ()),
            3 if len > 0 => tree.apply_mutation(root, list.remove(arg % len)).map(|_| ()),
            4 if len > 0 => tree.apply_mutation(root, list.replace(arg % len, op[1])).map(|_| ()),
            5 => tree.clear(root),
            _ => Ok(()),
        };
        if result.is_err() {
            return;
        }

        let node = match tree.node(root) {
            Ok(node) => node,
            Err(_) => return,
        };
        assert_eq!(node.selected_count(), node.selected_indices().len());
        assert!(node.selected_indices().iter().all(|&index| index < list.len()));
    }
});
