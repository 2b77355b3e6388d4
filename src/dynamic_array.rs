//! DynamicArray: contiguous growable buffer over a raw allocation.
//!
//! Slots `[0, len)` are initialized, `[len, cap)` are reserved. Capacity
//! starts at 1, doubles when a push would overflow it, and never shrinks
//! except by swapping or moving the whole array out.

use crate::cursor::{Forward, Reverse, SliceCursor};
use crate::error::{ContainerError, Result};
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ops::{Index, IndexMut};
use core::ptr::{self, NonNull};
use core::slice;
use log::trace;
use std::alloc::{self, Layout};

pub struct DynamicArray<T> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
    _owns: PhantomData<T>,
}

// SAFETY: the array uniquely owns its elements, like `Box<[T]>`.
unsafe impl<T: Send> Send for DynamicArray<T> {}
unsafe impl<T: Sync> Sync for DynamicArray<T> {}

/// Forward cursor over a `DynamicArray`.
pub type Cursor<'a, T> = SliceCursor<'a, T, Forward>;
/// Reverse cursor over a `DynamicArray`.
pub type ReverseCursor<'a, T> = SliceCursor<'a, T, Reverse>;

// Allocation failure aborts like `Vec`; anything else is a capacity overflow.
fn growth_failed(e: ContainerError) -> ! {
    match e {
        ContainerError::AllocationFailure { layout } => alloc::handle_alloc_error(layout),
        other => panic!("{other}"),
    }
}

impl<T> DynamicArray<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Empty array with capacity 1.
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Empty array with room for `capacity` elements (at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|e| growth_failed(e))
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let cap = capacity.max(1);
        Ok(Self {
            ptr: Self::allocate(cap)?,
            len: 0,
            cap,
            _owns: PhantomData,
        })
    }

    /// `n` clones of `value`, with capacity `2 * n`.
    pub fn from_elem(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut array = Self::with_capacity(n.saturating_mul(2));
        if n > 0 {
            for _ in 1..n {
                array.push_back(value.clone());
            }
            array.push_back(value);
        }
        array
    }

    fn allocate(cap: usize) -> Result<NonNull<T>> {
        if Self::IS_ZST {
            return Ok(NonNull::dangling());
        }
        let layout = Layout::array::<T>(cap).map_err(|_| ContainerError::CapacityOverflow)?;
        // SAFETY: `cap >= 1` and `T` is not zero-sized, so the layout is non-empty.
        let raw = unsafe { alloc::alloc(layout) } as *mut T;
        NonNull::new(raw).ok_or(ContainerError::AllocationFailure { layout })
    }

    /// Frees the block without touching its elements.
    fn release(&mut self) {
        if Self::IS_ZST {
            return;
        }
        if let Ok(layout) = Layout::array::<T>(self.cap) {
            // SAFETY: `ptr` was allocated with exactly this layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout) };
        }
    }

    fn next_capacity(&self) -> Result<usize> {
        self.cap
            .checked_mul(2)
            .map(|c| c.max(1))
            .ok_or(ContainerError::CapacityOverflow)
    }

    /// Move every live element, in index order, into a fresh block of
    /// `new_cap` slots and release the old block. Moved-from slots are
    /// never dropped, so no element is duplicated or lost.
    fn relocate(&mut self, new_cap: usize) -> Result<()> {
        debug_assert!(new_cap >= self.len);
        let new_ptr = Self::allocate(new_cap)?;
        if !Self::IS_ZST {
            // SAFETY: both blocks hold at least `len` slots and do not overlap.
            unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len) };
        }
        self.release();
        trace!(
            "dynamic array relocated: capacity {} -> {}, {} elements moved",
            self.cap,
            new_cap,
            self.len
        );
        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }

    fn reserve_one(&mut self) -> Result<()> {
        if self.len < self.cap {
            return Ok(());
        }
        let new_cap = self.next_capacity()?;
        self.relocate(new_cap)
    }

    /// Ensure room for `additional` more elements, doubling until it fits.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(ContainerError::CapacityOverflow)?;
        if required <= self.cap {
            return Ok(());
        }
        let mut new_cap = self.cap;
        while new_cap < required {
            new_cap = new_cap.checked_mul(2).ok_or(ContainerError::CapacityOverflow)?;
        }
        self.relocate(new_cap)
    }

    /// Append `value`, reporting allocation failure instead of aborting.
    pub fn try_push_back(&mut self, value: T) -> Result<()> {
        self.reserve_one()?;
        // SAFETY: `len < cap` after `reserve_one`; the slot is uninitialized.
        unsafe { ptr::write(self.ptr.as_ptr().add(self.len), value) };
        self.len += 1;
        Ok(())
    }

    pub fn push_back(&mut self, value: T) {
        if let Err(e) = self.try_push_back(value) {
            growth_failed(e);
        }
    }

    /// Construct the new last element in place and return it.
    ///
    /// Room is made before `make` runs; if `make` panics the array is
    /// unchanged apart from possibly having grown.
    pub fn emplace_back<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        if let Err(e) = self.reserve_one() {
            growth_failed(e);
        }
        // SAFETY: `len < cap`; the slot is uninitialized until written.
        unsafe {
            let slot = self.ptr.as_ptr().add(self.len);
            ptr::write(slot, make());
            self.len += 1;
            &mut *slot
        }
    }

    /// Remove and return the last element, `None` when empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was initialized and is now outside the live range.
        Some(unsafe { ptr::read(self.ptr.as_ptr().add(self.len)) })
    }

    /// Checked access.
    pub fn at(&self, index: usize) -> Result<&T> {
        self.as_slice().get(index).ok_or(ContainerError::OutOfRange {
            index,
            len: self.len,
        })
    }

    /// Checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(ContainerError::OutOfRange { index, len })
    }

    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every live element; capacity is unchanged.
    pub fn clear(&mut self) {
        let live = self.len;
        // Shrink first so a panicking destructor cannot cause a double drop.
        self.len = 0;
        // SAFETY: the first `live` slots were initialized.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), live)) };
    }

    /// O(1) exchange of buffer, length and capacity.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Move the contents out, leaving an empty capacity-1 array behind.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `ptr` is non-null and aligned; `[0, len)` is initialized.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    pub fn begin(&self) -> Cursor<'_, T> {
        SliceCursor::begin(self.as_slice())
    }

    pub fn end(&self) -> Cursor<'_, T> {
        SliceCursor::end(self.as_slice())
    }

    pub fn rbegin(&self) -> ReverseCursor<'_, T> {
        SliceCursor::begin(self.as_slice())
    }

    pub fn rend(&self) -> ReverseCursor<'_, T> {
        SliceCursor::end(self.as_slice())
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        self.clear();
        self.release();
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    /// Element-wise copy with the same capacity.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.cap);
        for item in self.iter() {
            copy.push_back(item.clone());
        }
        copy
    }

    /// Copy-and-swap: the copy is complete before the old contents drop.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

/// Initializer-list construction: capacity is twice the element count.
impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(items: [T; N]) -> Self {
        let mut array = Self::with_capacity(N.saturating_mul(2));
        for item in items {
            array.push_back(item);
        }
        array
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
