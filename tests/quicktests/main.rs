use int_bst::Key;
use quickcheck::{Arbitrary, Gen};

mod cursor;
mod tree;

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op {
    /// Insert the key into the tree
    Insert(Key),
    /// Erase the key from the tree
    Erase(Key),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        // Narrow keys so inserts and erases hit each other.
        let key = Key::from(i8::arbitrary(g));
        if bool::arbitrary(g) {
            Op::Insert(key)
        } else {
            Op::Erase(key)
        }
    }
}
