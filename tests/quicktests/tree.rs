use avl::{Node, Tree};

use crate::{init_logging, Op};

/// `⌈log2(n + 1)⌉`, the number of bits needed to write `n`.
fn minimal_height(n: usize) -> usize {
    (usize::BITS - n.leading_zeros()) as usize
}

/// Whether every node's cached height and balance factor hold up.
fn every_node_balanced<K>(tree: &Tree<K>) -> bool {
    fn actual_height<K>(node: Option<&Node<K>>) -> usize {
        node.map_or(0, |n| 1 + actual_height(n.left()).max(actual_height(n.right())))
    }

    tree.levels().all(|(_, n)| {
        (-1..=1).contains(&n.balance_factor()) && n.height() == actual_height(Some(n))
    })
}

/// Applies a set of operations to a tree and a sorted vector holding the same multiset of keys,
/// checking the invariants after every step.
fn do_ops<K>(ops: &[Op<K>], tree: &mut Tree<K>, sorted: &mut Vec<K>) -> bool
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                tree.insert(k.clone());
                let pos = sorted.partition_point(|x| x <= k);
                sorted.insert(pos, k.clone());
            }
            Op::Delete(k) => {
                let deleted = tree.delete(k);
                let expected = sorted.binary_search(k).map(|pos| sorted.remove(pos)).is_ok();
                if deleted != expected {
                    return false;
                }
            }
        }

        if !every_node_balanced(tree) || !tree.is_well_balanced() || tree.validate().is_err() {
            return false;
        }
    }

    true
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut sorted = Vec::new();

        do_ops(&ops, &mut tree, &mut sorted)
            && tree.iter().eq(sorted.iter())
            && tree.len() == sorted.len()
    }
}

quickcheck::quickcheck! {
    fn inorder_is_sorted_multiset(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let mut sorted = xs;
        sorted.sort();

        tree.into_iter().eq(sorted)
    }
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();

        xs.iter().all(|x| tree.contains(x))
    }
}

quickcheck::quickcheck! {
    fn height_is_logarithmic(xs: Vec<u16>) -> bool {
        let tree: Tree<_> = xs.into_iter().collect();
        let bound = 1.4405 * ((tree.len() + 2) as f64).log2();

        (tree.height() as f64) <= bound
    }
}

quickcheck::quickcheck! {
    fn deleting_a_unique_key_keeps_the_rest(xs: Vec<i8>, pick: usize) -> bool {
        let mut keys = xs;
        keys.sort();
        keys.dedup();
        if keys.is_empty() {
            return true;
        }

        let mut tree: Tree<_> = keys.iter().rev().copied().collect();
        let victim = keys.remove(pick % keys.len());

        tree.delete(&victim) && tree.iter().eq(keys.iter())
    }
}

quickcheck::quickcheck! {
    fn deleting_a_missing_key_changes_nothing(xs: Vec<i8>, missing: i8) -> bool {
        let mut tree: Tree<_> = xs.into_iter().filter(|x| *x != missing).collect();
        let before = tree.clone();

        !tree.delete(&missing) && tree == before
    }
}

quickcheck::quickcheck! {
    fn rebuild_is_minimal(xs: Vec<i16>) -> bool {
        let mut sorted = xs;
        sorted.sort();
        let n = sorted.len();

        let tree = Tree::from_sorted(sorted.clone());

        tree.height() == minimal_height(n)
            && tree.is_well_balanced()
            && tree.validate().is_ok()
            && tree.iter().eq(sorted.iter())
    }
}

quickcheck::quickcheck! {
    fn rebalance_never_grows(xs: Vec<i16>) -> bool {
        let mut tree: Tree<_> = xs.into_iter().collect();
        let before = tree.height();
        tree.rebalance();

        tree.height() <= before && tree.height() == minimal_height(tree.len())
    }
}

#[test]
fn scenario_insert_with_rotations() {
    init_logging();

    let mut tree = Tree::new();
    tree.extend([10, 20, 30]);
    // Inserting 30 rotated 20 up to the root.
    assert_eq!(tree.root().map(|n| *n.key()), Some(20));

    tree.extend([40, 50, 25]);
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [10, 20, 25, 30, 40, 50]);
    assert_eq!(tree.height(), 3);
    assert!(every_node_balanced(&tree));
}

#[test]
fn scenario_delete_smallest() {
    init_logging();

    let built: Tree<_> = [10, 20, 25, 30, 40, 50].into_iter().collect();
    let rebuilt = Tree::from_sorted([10, 20, 25, 30, 40, 50]);

    for mut tree in [built, rebuilt] {
        assert!(tree.delete(&10));
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [20, 25, 30, 40, 50]);
        assert!(every_node_balanced(&tree));
    }
}

#[test]
fn large_mixed_workload() {
    init_logging();

    let mut tree = Tree::new();
    for i in 0..2_000u32 {
        tree.insert(i.wrapping_mul(7_919) % 1_000);
    }
    for i in (0..1_000u32).step_by(3) {
        assert!(tree.delete(&i));
    }

    assert_eq!(tree.validate(), Ok(()));
    assert!(tree.height() <= 1 + (1.4405 * ((tree.len() + 2) as f64).log2()) as usize);
}
