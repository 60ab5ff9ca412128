//! The vertices of a [`Tree`][crate::Tree]. Nodes own their children through raw [`Link`]s and
//! keep a non-owning back-link to their parent so cursors can walk upwards.

use std::alloc::{self, Layout};
use std::cmp::Ordering;
use std::ptr::NonNull;

use crate::{Error, Key};

/// A possibly-null pointer to a heap allocated [`Node`]. A `Link` stored in `left`/`right` owns the
/// node it points to. A `Link` stored in `parent` does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link(pub(crate) Option<NonNull<Node>>);

impl Link {
    pub(crate) const NONE: Self = Link(None);

    pub(crate) fn node(&self) -> Option<&Node> {
        // SAFETY: A non-null `Link` always points at a live node. Nodes are only freed after every
        // link to them has been cleared (see `Tree::erase` and `free_subtree`) so this can't
        // dangle.
        unsafe { self.0.as_ref().map(|ptr| ptr.as_ref()) }
    }

    pub(crate) fn take(&mut self) -> Self {
        Link(self.0.take())
    }
}

pub(crate) struct Node {
    pub(crate) key: Key,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) parent: Link,
}

impl Node {
    /// Allocates a detached node (no children, no parent) holding `key`.
    ///
    /// Allocation goes through [`std::alloc::alloc`] rather than `Box::new` so that running out
    /// of memory is reported as [`Error::AllocationFailed`] instead of aborting the process.
    pub(crate) fn allocate(key: Key) -> Result<NonNull<Self>, Error> {
        let ptr = if allocation_permitted() {
            // SAFETY: `Node` is not zero-sized so the layout is valid for `alloc`.
            unsafe { alloc::alloc(Layout::new::<Self>()) }.cast::<Self>()
        } else {
            std::ptr::null_mut()
        };

        let Some(ptr) = NonNull::new(ptr) else {
            tracing::warn!(key, "failed to allocate tree node");
            return Err(Error::AllocationFailed);
        };

        // SAFETY: `ptr` is non-null, properly aligned for `Node` and uninitialized, so writing
        // doesn't drop anything.
        unsafe {
            ptr.as_ptr().write(Node {
                key,
                left: Link::NONE,
                right: Link::NONE,
                parent: Link::NONE,
            });
        }
        Ok(ptr)
    }

    /// Frees a single node. Its children are left alone.
    ///
    /// # Safety
    ///
    /// `node` must have come from [`Node::allocate`], must not have been freed already and must
    /// never be dereferenced again. No live `Link` may still point at it.
    pub(crate) unsafe fn free(node: NonNull<Self>) {
        // `alloc` with `Layout::new::<Node>()` is exactly how `Box<Node>` allocates, so handing
        // the pointer to `Box` for deallocation is sound.
        drop(Box::from_raw(node.as_ptr()));
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.node()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.node()
    }

    /// Attaches `new_node` beneath `this` at its ordered position, setting its parent link.
    /// Returns `false` (and leaves `new_node` detached) when a node with the same key already
    /// exists. The caller still owns `new_node` in that case.
    ///
    /// The descent walks raw child links instead of recursing through `&mut` reborrows. The
    /// parent link handed to `new_node` is therefore the same owning pointer its parent's own
    /// parent holds, so later reads through it (by cursors, or by `Tree::erase`) stay valid.
    ///
    /// # Safety
    ///
    /// `this` must be a live node, `new_node` must be detached, and no references into the
    /// subtree under `this` may be alive during the call.
    pub(crate) unsafe fn insert_node(this: NonNull<Self>, mut new_node: NonNull<Self>) -> bool {
        let key = new_node.as_ref().key;
        let mut current = this;
        loop {
            let node = current.as_ptr();
            let slot = match key.cmp(&(*node).key) {
                Ordering::Less => &mut (*node).left,
                Ordering::Equal => return false,
                Ordering::Greater => &mut (*node).right,
            };
            match slot.0 {
                Some(child) => current = child,
                None => {
                    new_node.as_mut().parent = Link(Some(current));
                    *slot = Link(Some(new_node));
                    return true;
                }
            }
        }
    }

    /// Whether `key` is stored somewhere in the subtree rooted at this node.
    pub(crate) fn find(&self, key: Key) -> bool {
        let mut current = Some(self);
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return true,
                Ordering::Greater => node.right(),
            };
        }
        false
    }

    /// Pushes every key of this subtree onto `out` in ascending order.
    pub(crate) fn emit_in_order(&self, out: &mut Vec<Key>) {
        let mut pending: Vec<&Self> = Vec::new();
        let mut current = Some(self);
        loop {
            while let Some(node) = current {
                pending.push(node);
                current = node.left();
            }
            let Some(node) = pending.pop() else {
                return;
            };
            out.push(node.key);
            current = node.right();
        }
    }

    /// The node holding the smallest key in the subtree rooted at `node`.
    pub(crate) fn leftmost(mut node: NonNull<Self>) -> NonNull<Self> {
        // SAFETY: Every non-null child link points at a live node.
        while let Some(left) = unsafe { node.as_ref().left.0 } {
            node = left;
        }
        node
    }

    /// The node holding the largest key in the subtree rooted at `node`.
    pub(crate) fn rightmost(mut node: NonNull<Self>) -> NonNull<Self> {
        // SAFETY: Every non-null child link points at a live node.
        while let Some(right) = unsafe { node.as_ref().right.0 } {
            node = right;
        }
        node
    }
}

/// Frees every node in the subtree rooted at `root` using an explicit stack, so degenerate
/// (list shaped) trees don't overflow the call stack.
///
/// # Safety
///
/// `root` must be a live subtree that nothing references any more, including its former parent.
pub(crate) unsafe fn free_subtree(root: NonNull<Node>) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        // Children are read out before the node itself is released.
        let (left, right) = {
            let node = node.as_ref();
            (node.left.0, node.right.0)
        };
        stack.extend(left);
        stack.extend(right);
        Node::free(node);
    }
}

#[cfg(test)]
thread_local! {
    /// How many more node allocations may succeed on the current thread. `None` is unlimited.
    static ALLOCATION_BUDGET: std::cell::Cell<Option<usize>> = const { std::cell::Cell::new(None) };
}

/// Limits how many node allocations may succeed on the current thread before they start failing.
#[cfg(test)]
pub(crate) fn set_allocation_budget(budget: Option<usize>) {
    ALLOCATION_BUDGET.with(|b| b.set(budget));
}

#[cfg(test)]
fn allocation_permitted() -> bool {
    ALLOCATION_BUDGET.with(|budget| match budget.get() {
        None => true,
        Some(0) => false,
        Some(left) => {
            budget.set(Some(left - 1));
            true
        }
    })
}

#[cfg(not(test))]
fn allocation_permitted() -> bool {
    true
}
