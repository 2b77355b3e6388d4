//! LinkedList: doubly linked list over a `SlotMap` arena.
//!
//! Backs the [`Stack`](crate::Stack) and [`Queue`](crate::Queue) adapters.

use crate::cursor::{BidirectionalCursor, Cursor, Direction, Forward, Reverse};
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    struct LinkKey;
}

struct Link<T> {
    value: T,
    prev: Option<LinkKey>,
    next: Option<LinkKey>,
}

pub struct LinkedList<T> {
    links: SlotMap<LinkKey, Link<T>>,
    head: Option<LinkKey>,
    tail: Option<LinkKey>,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self {
            links: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    /// `count` clones of `value`.
    pub fn from_elem(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut list = Self::new();
        for _ in 0..count {
            list.push_back(value.clone());
        }
        list
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn push_back(&mut self, value: T) {
        let old_tail = self.tail;
        let k = self.links.insert(Link {
            value,
            prev: old_tail,
            next: None,
        });
        match old_tail {
            Some(t) => self.links[t].next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
    }

    pub fn push_front(&mut self, value: T) {
        let old_head = self.head;
        let k = self.links.insert(Link {
            value,
            prev: None,
            next: old_head,
        });
        match old_head {
            Some(h) => self.links[h].prev = Some(k),
            None => self.tail = Some(k),
        }
        self.head = Some(k);
    }

    pub fn pop_back(&mut self) -> Option<T> {
        let link = self.links.remove(self.tail?)?;
        self.tail = link.prev;
        match link.prev {
            Some(p) => self.links[p].next = None,
            None => self.head = None,
        }
        Some(link.value)
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let link = self.links.remove(self.head?)?;
        self.head = link.next;
        match link.next {
            Some(n) => self.links[n].prev = None,
            None => self.tail = None,
        }
        Some(link.value)
    }

    pub fn front(&self) -> Option<&T> {
        self.head.map(|k| &self.links[k].value)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.map(|k| &self.links[k].value)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        let k = self.head?;
        Some(&mut self.links[k].value)
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        let k = self.tail?;
        Some(&mut self.links[k].value)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    pub fn clear(&mut self) {
        self.links.clear();
        self.head = None;
        self.tail = None;
    }

    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    fn step(&self, k: LinkKey, forward: bool) -> Option<LinkKey> {
        let link = &self.links[k];
        if forward {
            link.next
        } else {
            link.prev
        }
    }

    fn first(&self, forward: bool) -> Option<LinkKey> {
        if forward {
            self.head
        } else {
            self.tail
        }
    }

    pub fn begin(&self) -> ListCursor<'_, T, Forward> {
        ListCursor::new(self, self.head)
    }

    pub fn end(&self) -> ListCursor<'_, T, Forward> {
        ListCursor::new(self, None)
    }

    pub fn rbegin(&self) -> ListCursor<'_, T, Reverse> {
        ListCursor::new(self, self.tail)
    }

    pub fn rend(&self) -> ListCursor<'_, T, Reverse> {
        ListCursor::new(self, None)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            front: self.begin(),
            back: self.rbegin(),
            remaining: self.len(),
        }
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const N: usize> From<[T; N]> for LinkedList<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.push_back(v);
        }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct ListCursor<'a, T, D> {
    list: &'a LinkedList<T>,
    link: Option<LinkKey>,
    _dir: PhantomData<D>,
}

impl<'a, T, D> ListCursor<'a, T, D> {
    fn new(list: &'a LinkedList<T>, link: Option<LinkKey>) -> Self {
        Self {
            list,
            link,
            _dir: PhantomData,
        }
    }
}

impl<'a, T, D: Direction> Cursor for ListCursor<'a, T, D> {
    type Item = &'a T;

    fn current(&self) -> Option<&'a T> {
        let list = self.list;
        self.link.map(|k| &list.links[k].value)
    }

    fn move_next(&mut self) {
        if let Some(k) = self.link {
            self.link = self.list.step(k, D::FORWARD);
        }
    }
}

impl<'a, T, D: Direction> BidirectionalCursor for ListCursor<'a, T, D> {
    fn move_prev(&mut self) {
        self.link = match self.link {
            None => self.list.first(!D::FORWARD),
            Some(k) => self.list.step(k, !D::FORWARD),
        };
    }
}

impl<T, D> Clone for ListCursor<'_, T, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, D> Copy for ListCursor<'_, T, D> {}

impl<T, D> PartialEq for ListCursor<'_, T, D> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.list, other.list) && self.link == other.link
    }
}

impl<T, D> Eq for ListCursor<'_, T, D> {}

impl<T, D> fmt::Debug for ListCursor<'_, T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListCursor")
            .field("at_end", &self.link.is_none())
            .finish()
    }
}

pub struct Iter<'a, T> {
    front: ListCursor<'a, T, Forward>,
    back: ListCursor<'a, T, Reverse>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.remaining = self.remaining.checked_sub(1)?;
        let v = self.front.current()?;
        self.front.move_next();
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.remaining = self.remaining.checked_sub(1)?;
        let v = self.back.current()?;
        self.back.move_next();
        Some(v)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// LIFO adapter: the list's back end is the top.
#[derive(Clone, PartialEq, Eq)]
pub struct Stack<T> {
    list: LinkedList<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self {
            list: LinkedList::new(),
        }
    }

    pub fn push(&mut self, value: T) {
        self.list.push_back(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.list.pop_back()
    }

    pub fn top(&self) -> Option<&T> {
        self.list.back()
    }

    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.list.back_mut()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.list.swap(&mut other.list);
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.list.contains(value)
    }

    /// Bottom to top.
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Stack<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// FIFO adapter: push at the back, pop at the front.
#[derive(Clone, PartialEq, Eq)]
pub struct Queue<T> {
    list: LinkedList<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            list: LinkedList::new(),
        }
    }

    pub fn push(&mut self, value: T) {
        self.list.push_back(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    pub fn front(&self) -> Option<&T> {
        self.list.front()
    }

    pub fn back(&self) -> Option<&T> {
        self.list.back()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.list.swap(&mut other.list);
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.list.contains(value)
    }

    /// Front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
