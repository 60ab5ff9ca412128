//! Errors surfaced by [`Tree`][crate::Tree] and [`Cursor`][crate::Cursor] operations.
//!
//! Erasing an absent key and inserting a duplicate key are not errors. Both are silent no-ops.

use thiserror::Error;

/// Everything that can go wrong while using a [`Tree`][crate::Tree] or one of its cursors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The allocator could not provide memory for a new node. The operation that needed it was
    /// abandoned and the tree is exactly as it was before the call.
    #[error("failed to allocate memory for a tree node")]
    AllocationFailed,

    /// The query needs at least one element but the tree has none.
    #[error("the tree is empty")]
    EmptyTree,

    /// The cursor is one past the largest element so there is nothing to read and nothing after it.
    #[error("the cursor is past the last element")]
    CursorAtEnd,

    /// The cursor is on the smallest element so there is nothing before it.
    #[error("the cursor is already on the first element")]
    CursorAtStart,
}
