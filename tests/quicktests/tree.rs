use int_bst::{Error, Key, Tree};
use quickcheck_macros::quickcheck;

use std::collections::BTreeSet;

use crate::Op;

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and erases we have the same set of keys in both.
fn do_ops(ops: &[Op], bst: &mut Tree, set: &mut BTreeSet<Key>) {
    for op in ops {
        match *op {
            Op::Insert(k) => {
                bst.insert(k).unwrap();
                set.insert(k);
            }
            Op::Erase(k) => {
                bst.erase(k);
                set.remove(&k);
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations(ops: Vec<Op>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.len() == set.len() && (-128..128).all(|key| tree.contains(key) == set.contains(&key))
}

#[quickcheck]
fn traversal_is_strictly_ascending(ops: Vec<Op>) -> bool {
    let mut tree = Tree::new();
    do_ops(&ops, &mut tree, &mut BTreeSet::new());

    tree.in_order().windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(Key::from(*x)).unwrap();
    }
    let added: BTreeSet<_> = xs.into_iter().collect();
    let nots: BTreeSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.count(Key::from(*x)) == 0)
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(Key::from(*x)).unwrap();
    }
    for delete in &deletes {
        tree.erase(Key::from(*delete));
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - erase each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| !tree.contains(Key::from(*x)))
        && still_present.iter().all(|x| tree.contains(Key::from(*x)))
}

#[quickcheck]
fn erase_twice_is_erase_once(xs: Vec<i8>, key: i8) -> bool {
    let key = Key::from(key);
    let mut once = Tree::new();
    for x in &xs {
        once.insert(Key::from(*x)).unwrap();
    }
    let mut twice = once.clone();

    once.erase(key);
    twice.erase(key);
    twice.erase(key);

    once == twice && !twice.contains(key)
}

#[quickcheck]
fn copies_are_independent(xs: Vec<Op>, ys: Vec<Op>) -> bool {
    let mut original = Tree::new();
    do_ops(&xs, &mut original, &mut BTreeSet::new());
    let before = original.in_order();

    let mut copy = original.try_clone().unwrap();
    let mut model: BTreeSet<Key> = before.iter().copied().collect();
    do_ops(&ys, &mut copy, &mut model);

    original.in_order() == before && copy.in_order() == model.into_iter().collect::<Vec<_>>()
}

#[quickcheck]
fn empty_tree_has_no_extremes(ops: Vec<Op>) -> bool {
    let mut tree = Tree::new();
    do_ops(&ops, &mut tree, &mut BTreeSet::new());
    let keys = tree.in_order();
    for key in &keys {
        tree.erase(*key);
    }

    tree.is_empty()
        && tree.smallest() == Err(Error::EmptyTree)
        && tree.largest() == Err(Error::EmptyTree)
}
