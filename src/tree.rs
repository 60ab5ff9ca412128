//! An unbalanced BST of unique [`Key`]s. Nodes are linked with raw pointers and every node knows
//! its parent so a [`Cursor`] can step in either direction without an auxiliary stack.
//!
//! # Examples
//!
//! ```
//! use int_bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(1));
//!
//! tree.insert(1)?;
//! assert!(tree.contains(1));
//!
//! // Inserting the same key again does nothing.
//! tree.insert(1)?;
//! assert_eq!(tree.len(), 1);
//!
//! // Neither does erasing a key that isn't there.
//! tree.erase(42);
//! tree.erase(1);
//! assert!(tree.is_empty());
//! # Ok::<(), int_bst::Error>(())
//! ```

use std::alloc::{self, Layout};
use std::cmp::Ordering;
use std::fmt;
use std::io;
use std::ptr::NonNull;

use crate::cursor::{Cursor, Iter};
use crate::node::{self, Link, Node};
use crate::{Error, Key};

/// A Binary Search Tree holding unique keys. This can be used for inserting, finding, and erasing
/// keys and for walking them in sorted order. No balancing is performed, so inserting keys in
/// sorted order produces a tree shaped like a linked list.
pub struct Tree {
    // This is a `Link` instead of an `Option<Node>` so that it can be moved around with the `Tree`
    // without the children's parent pointers breaking.
    root: Link,
    len: usize,
}

// SAFETY: A `Tree` exclusively owns every node reachable from `root`, exactly like a `Box` would,
// and parent links never leave the tree. Moving it to another thread moves all of its nodes.
unsafe impl Send for Tree {}

// SAFETY: Every method taking `&self` (including all cursor operations) only reads nodes. Keys are
// `Copy` integers with no interior mutability.
unsafe impl Sync for Tree {}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Tree {
    fn drop(&mut self) {
        if let Some(root) = self.root.take().0 {
            // SAFETY: We own the root and just unlinked it, so nothing else can reach the subtree.
            unsafe { node::free_subtree(root) };
        }
    }
}

impl Clone for Tree {
    fn clone(&self) -> Self {
        self.try_clone()
            .unwrap_or_else(|_| alloc::handle_alloc_error(Layout::new::<Node>()))
    }

    fn clone_from(&mut self, source: &Self) {
        if self.assign(source).is_err() {
            alloc::handle_alloc_error(Layout::new::<Node>());
        }
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for Tree {}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a Key;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Tree {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: Link::NONE,
            len: 0,
        }
    }

    /// How many keys are stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.root.0.is_none()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Inserts `key` into the tree. Inserting a key that is already present does nothing.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if a node for `key` couldn't be allocated. The tree is left
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use int_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(3)?;
    /// tree.insert(2)?;
    /// tree.insert(3)?;
    ///
    /// assert_eq!(tree.in_order(), [2, 3]);
    /// # Ok::<(), int_bst::Error>(())
    /// ```
    pub fn insert(&mut self, key: Key) -> Result<(), Error> {
        if self.count(key) == 1 {
            tracing::trace!(key, "ignoring duplicate insert");
            return Ok(());
        }

        let new_node = Node::allocate(key)?;
        match self.root.0 {
            Some(root) => {
                // SAFETY: `root` is live, `new_node` was just allocated and `&mut self` means
                // nothing else is looking into the tree.
                let attached = unsafe { Node::insert_node(root, new_node) };
                debug_assert!(attached, "`count` said {key} was absent");
                if !attached {
                    // SAFETY: `insert_node` refused the node so it was never linked anywhere.
                    unsafe { Node::free(new_node) };
                    return Ok(());
                }
            }
            None => self.root = Link(Some(new_node)),
        }
        self.len += 1;
        tracing::debug!(key, len = self.len, "inserted key");
        Ok(())
    }

    /// Returns `1` if `key` is in the tree and `0` otherwise.
    pub fn count(&self, key: Key) -> usize {
        match self.root.node() {
            Some(root) if root.find(key) => 1,
            _ => 0,
        }
    }

    /// Whether `key` is in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use int_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1)?;
    ///
    /// assert!(tree.contains(1));
    /// assert!(!tree.contains(42));
    /// # Ok::<(), int_bst::Error>(())
    /// ```
    pub fn contains(&self, key: Key) -> bool {
        self.count(key) == 1
    }

    /// Erases `key` from the tree. Erasing a key that isn't present does nothing.
    ///
    /// A node with two children isn't unlinked itself. Instead it takes the key of its in-order
    /// predecessor (the largest key in its left subtree) and that predecessor, which never has a
    /// right child, is unlinked in its place.
    ///
    /// # Examples
    ///
    /// ```
    /// use int_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [3, 2, 11, 13, 5, 17] {
    ///     tree.insert(key)?;
    /// }
    ///
    /// tree.erase(6);
    /// tree.erase(11);
    /// assert_eq!(tree.in_order(), [2, 3, 5, 13, 17]);
    /// # Ok::<(), int_bst::Error>(())
    /// ```
    pub fn erase(&mut self, key: Key) {
        let Some(mut target) = self.locate(key) else {
            tracing::trace!(key, "erase of absent key");
            return;
        };

        // SAFETY: `target` was just found by walking live links and we hold `&mut self`, so no
        // other reference into the tree exists.
        let target_node = unsafe { target.as_mut() };
        match (target_node.left.0, target_node.right.0) {
            (Some(left), Some(_)) => {
                let predecessor = Node::rightmost(left);
                // SAFETY: `predecessor` is a live node distinct from `target`.
                target_node.key = unsafe { predecessor.as_ref().key };
                tracing::debug!(key, replacement = target_node.key, "erasing node with two children");
                // SAFETY: `predecessor` is the rightmost node of a subtree so it has no right child.
                unsafe { self.splice_out(predecessor) };
            }
            _ => {
                tracing::debug!(key, "erasing node with at most one child");
                // SAFETY: `target` has at most one child.
                unsafe { self.splice_out(target) };
            }
        }
        self.len -= 1;
    }

    /// The smallest key in the tree.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if there are no keys.
    pub fn smallest(&self) -> Result<Key, Error> {
        let root = self.root.0.ok_or(Error::EmptyTree)?;
        // SAFETY: `leftmost` returns a live node of this tree.
        Ok(unsafe { Node::leftmost(root).as_ref() }.key)
    }

    /// The largest key in the tree.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if there are no keys.
    pub fn largest(&self) -> Result<Key, Error> {
        let root = self.root.0.ok_or(Error::EmptyTree)?;
        // SAFETY: `rightmost` returns a live node of this tree.
        Ok(unsafe { Node::rightmost(root).as_ref() }.key)
    }

    /// A cursor on the smallest key, or [`Tree::end`] if the tree is empty.
    pub fn begin(&self) -> Cursor<'_> {
        Cursor::new(self, Link(self.root.0.map(Node::leftmost)))
    }

    /// A cursor one past the largest key.
    pub fn end(&self) -> Cursor<'_> {
        Cursor::new(self, Link::NONE)
    }

    /// Iterates the keys in ascending order. The iterator can also be driven from the back.
    ///
    /// # Examples
    ///
    /// ```
    /// use int_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [5, 1, 3] {
    ///     tree.insert(key)?;
    /// }
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 5]);
    /// assert_eq!(tree.iter().rev().next(), Some(&5));
    /// # Ok::<(), int_bst::Error>(())
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Every key in ascending order.
    pub fn in_order(&self) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.len);
        if let Some(root) = self.root.node() {
            root.emit_in_order(&mut keys);
        }
        keys
    }

    /// Writes every key in ascending order to `out`, one per line.
    pub fn print_to<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        for key in self {
            writeln!(out, "{key}")?;
        }
        Ok(())
    }

    /// Builds an independent deep copy of this tree with the same shape.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if any node couldn't be allocated. Whatever was copied so far is
    /// freed and `self` is untouched.
    pub fn try_clone(&self) -> Result<Self, Error> {
        let mut copy = Self::new();
        let Some(source_root) = self.root.0 else {
            return Ok(copy);
        };

        // SAFETY: `source_root` is a live node of `self`.
        let copy_root = Node::allocate(unsafe { source_root.as_ref() }.key)?;
        copy.root = Link(Some(copy_root));

        // Every new node is linked into `copy` as soon as it's allocated, so bailing out with `?`
        // drops `copy` and frees the partial structure.
        let mut stack = vec![(source_root, copy_root)];
        while let Some((source, mut dest)) = stack.pop() {
            // SAFETY: `source` is a live node of `self`, which we only read.
            let source = unsafe { source.as_ref() };
            // SAFETY: `dest` is a node of `copy` which nothing else references yet.
            let dest_node = unsafe { dest.as_mut() };

            if let Some(left) = source.left.0 {
                // SAFETY: `left` is a live child of `source`.
                let mut new_left = Node::allocate(unsafe { left.as_ref() }.key)?;
                // SAFETY: `new_left` was just allocated and is only referenced here.
                unsafe { new_left.as_mut().parent = Link(Some(dest)) };
                dest_node.left = Link(Some(new_left));
                stack.push((left, new_left));
            }
            if let Some(right) = source.right.0 {
                // SAFETY: `right` is a live child of `source`.
                let mut new_right = Node::allocate(unsafe { right.as_ref() }.key)?;
                // SAFETY: `new_right` was just allocated and is only referenced here.
                unsafe { new_right.as_mut().parent = Link(Some(dest)) };
                dest_node.right = Link(Some(new_right));
                stack.push((right, new_right));
            }
        }

        copy.len = self.len;
        tracing::debug!(len = copy.len, "deep copied tree");
        Ok(copy)
    }

    /// Replaces the contents of this tree with a deep copy of `source`.
    ///
    /// The copy is built completely before anything is replaced, so on failure `self` still holds
    /// exactly what it held before.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if the copy couldn't be built.
    pub fn assign(&mut self, source: &Self) -> Result<(), Error> {
        let mut copy = source.try_clone()?;
        std::mem::swap(self, &mut copy);
        // `copy` now holds our old nodes and frees them when it goes out of scope.
        Ok(())
    }

    pub(crate) fn root(&self) -> Link {
        self.root
    }

    /// Finds the node holding `key` without recursing.
    fn locate(&self, key: Key) -> Option<NonNull<Node>> {
        let mut current = self.root.0;
        while let Some(node) = current {
            // SAFETY: `node` was reached by following live links from the root.
            let node_ref = unsafe { node.as_ref() };
            current = match key.cmp(&node_ref.key) {
                Ordering::Less => node_ref.left.0,
                Ordering::Greater => node_ref.right.0,
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Unlinks `node`, promotes its only child (if any) into its slot and frees it.
    ///
    /// # Safety
    ///
    /// `node` must be a live node of this tree with at most one child, and no reference to it may
    /// be used afterwards.
    unsafe fn splice_out(&mut self, node: NonNull<Node>) {
        let (child, parent) = {
            let node = node.as_ref();
            debug_assert!(node.left.0.is_none() || node.right.0.is_none());
            (node.left.0.or(node.right.0), node.parent)
        };

        if let Some(mut child) = child {
            child.as_mut().parent = parent;
        }

        match parent.0 {
            None => self.root = Link(child),
            Some(mut parent) => {
                let parent = parent.as_mut();
                if parent.left.0 == Some(node) {
                    parent.left = Link(child);
                } else {
                    parent.right = Link(child);
                }
            }
        }

        Node::free(node);
    }
}
