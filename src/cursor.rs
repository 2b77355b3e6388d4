//! Cursor framework shared by every container.
//!
//! A cursor denotes one element of a container, or the end sentinel that
//! sits one past the last element. Each container specializes a single
//! cursor type over a [`Direction`]; forward and reverse cursors differ
//! only in which step function `move_next` uses.
//!
//! Misuse that would be undefined for a raw pointer cursor is memory-safe
//! here: a cursor borrows its container, so structural mutation while a
//! cursor is alive does not compile, and stepping past either end lands on
//! the end sentinel.

use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

/// Traversal direction of a cursor.
pub trait Direction {
    const FORWARD: bool;
}

/// Ascending index order / in-order successor.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Forward;

/// Descending index order / in-order predecessor.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reverse;

impl Direction for Forward {
    const FORWARD: bool = true;
}

impl Direction for Reverse {
    const FORWARD: bool = false;
}

/// Minimal cursor: dereference and advance.
pub trait Cursor {
    type Item;

    /// The element under the cursor, or `None` at the end sentinel.
    fn current(&self) -> Option<Self::Item>;

    /// Advance by exactly one logical element. At the end this is a no-op.
    fn move_next(&mut self);

    fn is_end(&self) -> bool {
        self.current().is_none()
    }

    /// Consume the cursor as a std iterator starting at its position.
    fn walk(self) -> Walk<Self>
    where
        Self: Sized,
    {
        Walk { cursor: self }
    }
}

/// Cursor whose traversal is invertible.
///
/// `move_prev` from the end sentinel lands on the last element in the
/// cursor's direction; `move_prev` from the first element lands on the end.
pub trait BidirectionalCursor: Cursor {
    fn move_prev(&mut self);
}

/// Adapts a [`Cursor`] into an [`Iterator`].
#[derive(Clone)]
pub struct Walk<C> {
    cursor: C,
}

impl<C: Cursor> Walk<C> {
    /// Cursor at the element the next call to `next` would yield.
    pub fn cursor(&self) -> &C {
        &self.cursor
    }
}

impl<C: Cursor> Iterator for Walk<C> {
    type Item = C::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.cursor.current()?;
        self.cursor.move_next();
        Some(item)
    }
}

impl<C: Cursor> FusedIterator for Walk<C> {}

impl<C: fmt::Debug> fmt::Debug for Walk<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walk").field("cursor", &self.cursor).finish()
    }
}

/// Cursor over a contiguous run of elements.
///
/// `offset` counts logical steps from the first element in direction `D`;
/// `offset == items.len()` is the end sentinel.
pub struct SliceCursor<'a, T, D> {
    items: &'a [T],
    offset: usize,
    _dir: PhantomData<D>,
}

impl<'a, T, D: Direction> SliceCursor<'a, T, D> {
    pub(crate) fn begin(items: &'a [T]) -> Self {
        Self {
            items,
            offset: 0,
            _dir: PhantomData,
        }
    }

    pub(crate) fn end(items: &'a [T]) -> Self {
        Self {
            items,
            offset: items.len(),
            _dir: PhantomData,
        }
    }

    /// Physical index of the element under the cursor, `None` at the end.
    pub fn index(&self) -> Option<usize> {
        let len = self.items.len();
        if self.offset >= len {
            None
        } else if D::FORWARD {
            Some(self.offset)
        } else {
            Some(len - 1 - self.offset)
        }
    }

    /// Element `n` logical steps ahead of the cursor.
    pub fn peek(&self, n: usize) -> Option<&'a T> {
        let ahead = Self {
            items: self.items,
            offset: self.offset.saturating_add(n),
            _dir: PhantomData,
        };
        ahead.current()
    }
}

impl<'a, T, D: Direction> Cursor for SliceCursor<'a, T, D> {
    type Item = &'a T;

    #[inline]
    fn current(&self) -> Option<&'a T> {
        self.index().map(|i| &self.items[i])
    }

    #[inline]
    fn move_next(&mut self) {
        if self.offset < self.items.len() {
            self.offset += 1;
        }
    }
}

impl<'a, T, D: Direction> BidirectionalCursor for SliceCursor<'a, T, D> {
    #[inline]
    fn move_prev(&mut self) {
        self.offset = match self.offset {
            0 => self.items.len(),
            n => n - 1,
        };
    }
}

impl<T, D> Clone for SliceCursor<'_, T, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, D> Copy for SliceCursor<'_, T, D> {}

impl<T, D> PartialEq for SliceCursor<'_, T, D> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.items, other.items) && self.offset == other.offset
    }
}

impl<T, D> Eq for SliceCursor<'_, T, D> {}

impl<T, D> fmt::Debug for SliceCursor<'_, T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceCursor")
            .field("offset", &self.offset)
            .field("len", &self.items.len())
            .finish()
    }
}
