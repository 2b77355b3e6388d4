//! FixedArray: inline array of exactly `N` elements.

use crate::cursor::{Forward, Reverse, SliceCursor};
use crate::error::{ContainerError, Result};
use core::fmt;
use core::mem;
use core::ops::{Index, IndexMut};
use core::slice;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FixedArray<T, const N: usize> {
    items: [T; N],
}

impl<T: Default, const N: usize> FixedArray<T, N> {
    /// Every position holds `T::default()`.
    pub fn new() -> Self {
        Self {
            items: core::array::from_fn(|_| T::default()),
        }
    }

    /// Copies `values` into the leading positions; the rest are defaulted.
    pub fn from_slice(values: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        if values.len() > N {
            return Err(ContainerError::TooManyElements {
                given: values.len(),
                capacity: N,
            });
        }
        Ok(Self {
            items: core::array::from_fn(|i| values.get(i).cloned().unwrap_or_default()),
        })
    }
}

impl<T, const N: usize> FixedArray<T, N> {
    pub fn at(&self, index: usize) -> Result<&T> {
        self.items
            .get(index)
            .ok_or(ContainerError::OutOfRange { index, len: N })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        self.items
            .get_mut(index)
            .ok_or(ContainerError::OutOfRange { index, len: N })
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.items.fill(value);
    }

    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.items, &mut other.items);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn begin(&self) -> SliceCursor<'_, T, Forward> {
        SliceCursor::begin(&self.items)
    }

    pub fn end(&self) -> SliceCursor<'_, T, Forward> {
        SliceCursor::end(&self.items)
    }

    pub fn rbegin(&self) -> SliceCursor<'_, T, Reverse> {
        SliceCursor::begin(&self.items)
    }

    pub fn rend(&self) -> SliceCursor<'_, T, Reverse> {
        SliceCursor::end(&self.items)
    }
}

impl<T: Default, const N: usize> Default for FixedArray<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> From<[T; N]> for FixedArray<T, N> {
    fn from(items: [T; N]) -> Self {
        Self { items }
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for FixedArray<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T, const N: usize> Index<usize> for FixedArray<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T, const N: usize> IndexMut<usize> for FixedArray<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a FixedArray<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut FixedArray<T, N> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
