//! Bidirectional cursors over a [`Tree`], plus the borrowing [`Iter`] built on top of them.
//!
//! A cursor is either on a node or at the end, one past the largest key. Stepping uses the
//! parent links stored in every node, so no stack of ancestors is kept.
//!
//! A cursor borrows its tree, so the tree can't be mutated while the cursor is alive:
//!
//! ```compile_fail
//! use int_bst::Tree;
//!
//! let mut tree = Tree::new();
//! tree.insert(1)?;
//! let cursor = tree.begin();
//! tree.erase(1);
//! let _ = cursor.get();
//! # Ok::<(), int_bst::Error>(())
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::ptr::NonNull;

use crate::node::{Link, Node};
use crate::{Error, Key, Tree};

/// A position within a [`Tree`]: either on one of its keys or at the end.
///
/// Two cursors are equal when they are on the same node, or when both are at the end.
///
/// # Examples
///
/// ```
/// use int_bst::{Error, Tree};
///
/// let mut tree = Tree::new();
/// for key in [2, 1, 3] {
///     tree.insert(key)?;
/// }
///
/// let mut cursor = tree.begin();
/// assert_eq!(cursor.get(), Ok(&1));
///
/// cursor.step_forward()?;
/// cursor.step_forward()?;
/// cursor.step_forward()?;
/// assert_eq!(cursor, tree.end());
/// assert_eq!(cursor.get(), Err(Error::CursorAtEnd));
///
/// // Stepping back from the end lands on the largest key.
/// cursor.step_backward()?;
/// assert_eq!(cursor.get(), Ok(&3));
/// # Ok::<(), int_bst::Error>(())
/// ```
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    tree: &'a Tree,
    node: Link,
}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for Cursor<'_> {}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Ok(key) => f.debug_tuple("Cursor").field(key).finish(),
            Err(_) => f.write_str("Cursor(end)"),
        }
    }
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tree: &'a Tree, node: Link) -> Self {
        Self { tree, node }
    }

    /// Whether this cursor is one past the largest key.
    pub fn is_end(&self) -> bool {
        self.node.0.is_none()
    }

    /// The key under the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::CursorAtEnd`] if the cursor is at the end.
    pub fn get(&self) -> Result<&'a Key, Error> {
        let node = self.node.0.ok_or(Error::CursorAtEnd)?;
        // SAFETY: A non-end cursor is always on a live node of `self.tree`. The tree is borrowed
        // for `'a`, so it can't be mutated (and the node can't be freed) while the key is borrowed.
        Ok(unsafe { &(*node.as_ptr()).key })
    }

    /// Moves to the next larger key, or to the end when there is none.
    ///
    /// # Errors
    ///
    /// [`Error::CursorAtEnd`] if the cursor is already at the end. The cursor doesn't move.
    pub fn step_forward(&mut self) -> Result<(), Error> {
        let node = self.node.0.ok_or(Error::CursorAtEnd)?;
        self.node = Link(successor(node));
        if self.is_end() {
            tracing::trace!("cursor stepped past the largest key");
        }
        Ok(())
    }

    /// Moves to the next smaller key. From the end this lands on the largest key.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyTree`] when stepping back from the end of an empty tree.
    /// - [`Error::CursorAtStart`] when the cursor is on the smallest key.
    ///
    /// In both cases the cursor doesn't move.
    pub fn step_backward(&mut self) -> Result<(), Error> {
        let previous = match self.node.0 {
            None => Node::rightmost(self.tree.root().0.ok_or(Error::EmptyTree)?),
            Some(node) => predecessor(node).ok_or_else(|| {
                tracing::trace!("cursor is already on the smallest key");
                Error::CursorAtStart
            })?,
        };
        self.node = Link(Some(previous));
        Ok(())
    }

    /// Steps forward and returns where the cursor was before stepping.
    ///
    /// # Errors
    ///
    /// Same as [`Cursor::step_forward`].
    pub fn post_step_forward(&mut self) -> Result<Self, Error> {
        let before = *self;
        self.step_forward()?;
        Ok(before)
    }

    /// Steps backward and returns where the cursor was before stepping.
    ///
    /// # Errors
    ///
    /// Same as [`Cursor::step_backward`].
    pub fn post_step_backward(&mut self) -> Result<Self, Error> {
        let before = *self;
        self.step_backward()?;
        Ok(before)
    }
}

/// The node holding the next larger key after `node`'s, if any.
fn successor(node: NonNull<Node>) -> Option<NonNull<Node>> {
    // SAFETY: Callers only pass live nodes, and live nodes only link to live nodes.
    let current = unsafe { node.as_ref() };
    if let Some(right) = current.right.0 {
        return Some(Node::leftmost(right));
    }

    // Climb while we're a right child. The first ancestor we reach from its left side is next.
    let mut child = node;
    let mut parent = current.parent.0;
    while let Some(ancestor) = parent {
        // SAFETY: As above.
        let ancestor_ref = unsafe { ancestor.as_ref() };
        if ancestor_ref.right.0 != Some(child) {
            break;
        }
        child = ancestor;
        parent = ancestor_ref.parent.0;
    }
    parent
}

/// The node holding the next smaller key before `node`'s, if any.
fn predecessor(node: NonNull<Node>) -> Option<NonNull<Node>> {
    // SAFETY: Callers only pass live nodes, and live nodes only link to live nodes.
    let current = unsafe { node.as_ref() };
    if let Some(left) = current.left.0 {
        return Some(Node::rightmost(left));
    }

    let mut child = node;
    let mut parent = current.parent.0;
    while let Some(ancestor) = parent {
        // SAFETY: As above.
        let ancestor_ref = unsafe { ancestor.as_ref() };
        if ancestor_ref.left.0 != Some(child) {
            break;
        }
        child = ancestor;
        parent = ancestor_ref.parent.0;
    }
    parent
}

/// An iterator over the keys of a [`Tree`] in ascending order. Created by [`Tree::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// The next key to yield from the front.
    front: Cursor<'a>,
    /// One past the next key to yield from the back.
    back: Cursor<'a>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(tree: &'a Tree) -> Self {
        Self {
            front: tree.begin(),
            back: tree.end(),
            remaining: tree.len(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Key;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let key = self.front.post_step_forward().ok()?.get().ok()?;
        self.remaining -= 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back.step_backward().ok()?;
        let key = self.back.get().ok()?;
        self.remaining -= 1;
        Some(key)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
