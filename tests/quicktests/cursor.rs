use int_bst::{Error, Key, Tree};
use quickcheck_macros::quickcheck;

use std::collections::BTreeSet;

fn tree_of(xs: &[i8]) -> Tree {
    let mut tree = Tree::new();
    for x in xs {
        tree.insert(Key::from(*x)).unwrap();
    }
    tree
}

#[quickcheck]
fn forward_steps_match_sorted_keys(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);
    let expected: Vec<Key> = xs
        .iter()
        .map(|x| Key::from(*x))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut cursor = tree.begin();
    let mut seen = Vec::new();
    while let Ok(key) = cursor.get() {
        seen.push(*key);
        cursor.step_forward().unwrap();
    }

    seen == expected && cursor == tree.end()
}

#[quickcheck]
fn len_steps_reach_end(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);
    let mut cursor = tree.begin();
    for _ in 0..tree.len() {
        if cursor.step_forward().is_err() {
            return false;
        }
    }

    cursor == tree.end() && cursor.step_forward() == Err(Error::CursorAtEnd)
}

#[quickcheck]
fn backward_from_end_starts_at_largest(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);
    let mut cursor = tree.end();

    match tree.largest() {
        Ok(largest) => cursor.step_backward().is_ok() && cursor.get() == Ok(&largest),
        Err(_) => cursor.step_backward() == Err(Error::EmptyTree),
    }
}

#[quickcheck]
fn backward_walk_stops_at_smallest(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);
    if tree.is_empty() {
        return true;
    }

    let mut cursor = tree.end();
    let mut seen = Vec::new();
    while cursor.step_backward().is_ok() {
        seen.push(*cursor.get().unwrap());
    }
    seen.reverse();

    seen == tree.in_order() && cursor == tree.begin()
}

#[quickcheck]
fn iter_rev_matches_reverse(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);
    let mut forward: Vec<Key> = tree.iter().copied().collect();
    forward.reverse();

    tree.iter().rev().copied().collect::<Vec<_>>() == forward
}
