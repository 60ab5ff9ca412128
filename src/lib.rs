//! An ordered container of unique integers backed by an (unbalanced) Binary Search Tree, with
//! cursors that walk the keys in sorted order in either direction.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! sometimes has child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)`. This tree does no balancing at all, so inserting
//! keys in sorted order gives it a height equal to its size.
//!
//! ## Cursors
//!
//! Every node also keeps a (non-owning) link to its parent. That's what lets a
//! [`Cursor`] step to the next or previous key in amortized constant time without
//! remembering the path it came down. [`Tree::end`] is a cursor one past the
//! largest key and stepping backwards from it lands on [`Tree::largest`].
//!
//! ```
//! use int_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [3, 2, 11, 13, 5, 17] {
//!     tree.insert(key)?;
//! }
//! tree.erase(11);
//!
//! let mut copy = tree.try_clone()?;
//! copy.insert(7)?;
//!
//! assert_eq!(tree.in_order(), [2, 3, 5, 13, 17]);
//! assert_eq!(copy.in_order(), [2, 3, 5, 7, 13, 17]);
//! # Ok::<(), int_bst::Error>(())
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod cursor;
mod error;
mod node;
pub mod tree;


pub use cursor::{Cursor, Iter};
pub use error::Error;
pub use tree::Tree;

/// The type of every key stored in a [`Tree`].
pub type Key = i32;
