use avl_tree::balanced::Tree;
use avl_tree::error::TreeError;

use std::collections::HashSet;

use crate::Op;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The tallest an AVL tree with `size` elements can be, counting edges.
fn max_height(size: usize) -> isize {
    (1.4405 * ((size + 2) as f64).log2() - 1.0).floor() as isize
}

/// Applies a set of operations to a tree and a hashset.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same set of elements in both.
fn do_ops<T>(ops: &[Op<T>], tree: &mut Tree<T>, set: &mut HashSet<T>)
where
    T: std::hash::Hash + Eq + Clone + Ord,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                tree.insert(x.clone());
                set.insert(x.clone());
            }
            Op::Remove(x) => {
                let _ = tree.remove(x);
                set.remove(x);
            }
        }
    }
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        init();
        let mut tree = Tree::new();
        let mut set = HashSet::new();

        do_ops(&ops, &mut tree, &mut set);
        tree.size() == set.len()
            && set.iter().all(|x| tree.contains(x))
            && tree.height() <= max_height(tree.size())
    }
}

quickcheck::quickcheck! {
    fn inorder_is_sorted_and_sized(xs: Vec<i32>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let inorder = tree.inorder();

        inorder.len() == tree.size() && inorder.windows(2).all(|w| w[0] < w[1])
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.contains(x) && tree.depth(x) == Err(TreeError::NotFound))
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        for delete in &deletes {
            let _ = tree.remove(delete);
        }

        let mut still_present = xs;
        for delete in &deletes {
            // We may have inserted the same element multiple times - drop each one.
            while let Some(pos) = still_present.iter().position(|x| x == delete) {
                still_present.swap_remove(pos);
            }
        }

        deletes.iter().all(|x| !tree.contains(x))
            && still_present.iter().all(|x| tree.contains(x))
            && tree.height() <= max_height(tree.size())
    }
}

quickcheck::quickcheck! {
    fn duplicate_inserts_are_idempotent(xs: Vec<u8>) -> bool {
        let once: Tree<_> = xs.iter().copied().collect();
        let mut twice = once.clone();
        twice.extend(xs.iter().copied());

        once.size() == twice.size() && once.inorder() == twice.inorder()
    }
}

quickcheck::quickcheck! {
    fn missing_removal_leaves_tree_unchanged(xs: Vec<i8>, missing: i8) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().filter(|x| *x != missing).collect();
        let before = tree.clone();

        tree.remove(&missing) == Err(TreeError::NotFound)
            && tree.size() == before.size()
            && tree.preorder() == before.preorder()
            && tree.postorder() == before.postorder()
    }
}

quickcheck::quickcheck! {
    fn root_has_depth_one(xs: Vec<i16>) -> bool {
        let tree: Tree<_> = xs.into_iter().collect();

        match tree.root() {
            Some(root) => tree.depth(root) == Ok(1),
            None => tree.is_empty() && tree.height() == -1,
        }
    }
}

#[test]
fn ascending_insertions_stay_within_height_bound() {
    init();
    let mut tree = Tree::new();
    for x in 0..1000 {
        tree.insert(x);
        assert!(tree.height() <= max_height(tree.size()));
    }
    for x in (0..1000).step_by(3) {
        assert_eq!(tree.remove(&x), Ok(x));
        assert!(tree.height() <= max_height(tree.size()));
    }
    assert_eq!(tree.size(), 666);
}
