//! BinarySearchTree: unbalanced BST over an arena of parent-linked nodes.
//!
//! Ownership flows root to children through `left`/`right`; `parent` is a
//! lookup-only link used to step to the in-order successor or predecessor
//! without an auxiliary stack. Nodes live in a `SlotMap`, so removal and
//! splicing never leave two owners for one node.

use crate::cursor::{BidirectionalCursor, Cursor, Direction, Forward, Reverse};
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;
use log::{debug, trace};
use slotmap::{new_key_type, SecondaryMap, SlotMap};

new_key_type! {
    struct NodeKey;
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    left: Option<NodeKey>,
    right: Option<NodeKey>,
    parent: Option<NodeKey>,
}

impl<T> Node<T> {
    fn leaf(value: T, parent: Option<NodeKey>) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent,
        }
    }
}

#[derive(Copy, Clone)]
enum Side {
    Left,
    Right,
}

pub struct BinarySearchTree<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
    root: Option<NodeKey>,
}

impl<T> BinarySearchTree<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
        }
    }

    /// Number of values; equals the number of nodes reachable from the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Nodes on the longest root-to-leaf path; 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut depth: SecondaryMap<NodeKey, usize> = SecondaryMap::new();
        let mut tallest = 0;
        let mut cur = self.root;
        while let Some(k) = cur {
            let node = &self.nodes[k];
            let d = node.parent.and_then(|p| depth.get(p).copied()).unwrap_or(0) + 1;
            depth.insert(k, d);
            tallest = tallest.max(d);
            cur = self.preorder_next(k);
        }
        tallest
    }

    pub fn clear(&mut self) {
        if !self.nodes.is_empty() {
            debug!("clearing binary search tree of {} nodes", self.nodes.len());
        }
        self.nodes.clear();
        self.root = None;
    }

    /// Move the contents out, leaving an empty tree behind.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    pub fn min(&self) -> Option<&T> {
        self.root.map(|r| &self.nodes[self.min_from(r)].value)
    }

    pub fn max(&self) -> Option<&T> {
        self.root.map(|r| &self.nodes[self.max_from(r)].value)
    }

    /// Leftmost node of the subtree rooted at `k`.
    fn min_from(&self, mut k: NodeKey) -> NodeKey {
        while let Some(l) = self.nodes[k].left {
            k = l;
        }
        k
    }

    /// Rightmost node of the subtree rooted at `k`.
    fn max_from(&self, mut k: NodeKey) -> NodeKey {
        while let Some(r) = self.nodes[k].right {
            k = r;
        }
        k
    }

    /// In-order successor: the right subtree's minimum, else the first
    /// ancestor reached from its left side.
    fn successor(&self, k: NodeKey) -> Option<NodeKey> {
        let node = &self.nodes[k];
        if let Some(r) = node.right {
            return Some(self.min_from(r));
        }
        let mut child = k;
        let mut up = node.parent;
        while let Some(p) = up {
            let parent = &self.nodes[p];
            if parent.right != Some(child) {
                break;
            }
            child = p;
            up = parent.parent;
        }
        up
    }

    fn predecessor(&self, k: NodeKey) -> Option<NodeKey> {
        let node = &self.nodes[k];
        if let Some(l) = node.left {
            return Some(self.max_from(l));
        }
        let mut child = k;
        let mut up = node.parent;
        while let Some(p) = up {
            let parent = &self.nodes[p];
            if parent.left != Some(child) {
                break;
            }
            child = p;
            up = parent.parent;
        }
        up
    }

    fn step(&self, k: NodeKey, forward: bool) -> Option<NodeKey> {
        if forward {
            self.successor(k)
        } else {
            self.predecessor(k)
        }
    }

    fn first(&self, forward: bool) -> Option<NodeKey> {
        let root = self.root?;
        Some(if forward {
            self.min_from(root)
        } else {
            self.max_from(root)
        })
    }

    /// Pre-order successor (node, left, right) using parent links only.
    fn preorder_next(&self, k: NodeKey) -> Option<NodeKey> {
        let node = &self.nodes[k];
        if let Some(l) = node.left {
            return Some(l);
        }
        if let Some(r) = node.right {
            return Some(r);
        }
        let mut child = k;
        let mut up = node.parent;
        while let Some(p) = up {
            let parent = &self.nodes[p];
            if parent.left == Some(child) {
                if let Some(r) = parent.right {
                    return Some(r);
                }
            }
            child = p;
            up = parent.parent;
        }
        None
    }

    fn side_of(&self, child: NodeKey, parent: NodeKey) -> Side {
        if self.nodes[parent].left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    fn attach(&mut self, key: NodeKey, parent: Option<(NodeKey, Side)>) {
        match parent {
            None => self.root = Some(key),
            Some((p, Side::Left)) => self.nodes[p].left = Some(key),
            Some((p, Side::Right)) => self.nodes[p].right = Some(key),
        }
    }

    /// Replace `k` in its parent's slot by its only child (or nothing).
    /// The node itself stays in the arena for the caller to remove.
    fn splice_out(&mut self, k: NodeKey) {
        let node = &self.nodes[k];
        debug_assert!(node.left.is_none() || node.right.is_none());
        let child = node.left.or(node.right);
        let parent = node.parent;
        if let Some(c) = child {
            self.nodes[c].parent = parent;
        }
        match parent {
            None => self.root = child,
            Some(p) => {
                let slot = match self.side_of(k, p) {
                    Side::Left => &mut self.nodes[p].left,
                    Side::Right => &mut self.nodes[p].right,
                };
                *slot = child;
            }
        }
    }

    pub fn begin(&self) -> TreeCursor<'_, T, Forward> {
        TreeCursor::new(self, self.first(true))
    }

    pub fn end(&self) -> TreeCursor<'_, T, Forward> {
        TreeCursor::new(self, None)
    }

    pub fn rbegin(&self) -> TreeCursor<'_, T, Reverse> {
        TreeCursor::new(self, self.first(false))
    }

    pub fn rend(&self) -> TreeCursor<'_, T, Reverse> {
        TreeCursor::new(self, None)
    }

    /// In-order iterator; `.rev()` walks in descending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            front: self.begin(),
            back: self.rbegin(),
            remaining: self.len(),
        }
    }
}

impl<T: Ord> BinarySearchTree<T> {
    /// Insert `value` as a new leaf. Returns `false`, leaving the tree
    /// untouched, when an equal value is already present.
    pub fn insert(&mut self, value: T) -> bool {
        let mut parent = None;
        let mut cur = self.root;
        while let Some(k) = cur {
            let node = &self.nodes[k];
            match value.cmp(&node.value) {
                Ordering::Less => {
                    parent = Some((k, Side::Left));
                    cur = node.left;
                }
                Ordering::Greater => {
                    parent = Some((k, Side::Right));
                    cur = node.right;
                }
                Ordering::Equal => return false,
            }
        }
        let key = self.nodes.insert(Node::leaf(value, parent.map(|(p, _)| p)));
        self.attach(key, parent);
        true
    }

    fn find_key<Q>(&self, value: &Q) -> Option<NodeKey>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut cur = self.root;
        while let Some(k) = cur {
            let node = &self.nodes[k];
            cur = match value.cmp(node.value.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(k),
            };
        }
        None
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find_key(value).is_some()
    }

    /// Stored value equal to `value`.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find_key(value).map(|k| &self.nodes[k].value)
    }

    /// Remove the value equal to `value` and return it; absent values leave
    /// the tree unchanged.
    ///
    /// A node with two children takes over its in-order successor's value,
    /// and the successor (which has no left child) is spliced out instead.
    pub fn delete<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let target = self.find_key(value)?;
        let node = &self.nodes[target];
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let succ = self.min_from(right);
                trace!("bst delete: two children, promoting in-order successor");
                self.splice_out(succ);
                let promoted = self.nodes.remove(succ)?.value;
                Some(mem::replace(&mut self.nodes[target].value, promoted))
            }
            (None, None) => {
                trace!("bst delete: leaf");
                self.splice_out(target);
                self.nodes.remove(target).map(|n| n.value)
            }
            _ => {
                trace!("bst delete: one child, splicing");
                self.splice_out(target);
                self.nodes.remove(target).map(|n| n.value)
            }
        }
    }
}

impl<T> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for BinarySearchTree<T> {
    /// Same-shape copy. Pre-order guarantees each parent is copied before
    /// its children, so parent links are rebuilt as subtrees attach.
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        let mut mapped: SecondaryMap<NodeKey, NodeKey> = SecondaryMap::new();
        let mut cur = self.root;
        while let Some(k) = cur {
            let src = &self.nodes[k];
            let parent = src
                .parent
                .and_then(|p| mapped.get(p).map(|&dp| (dp, self.side_of(k, p))));
            let key = copy
                .nodes
                .insert(Node::leaf(src.value.clone(), parent.map(|(p, _)| p)));
            copy.attach(key, parent);
            mapped.insert(k, key);
            cur = self.preorder_next(k);
        }
        copy
    }
}

impl<T: PartialEq> PartialEq for BinarySearchTree<T> {
    /// Structural equality: same shape and equal values at matching
    /// positions. Trees holding the same values in different shapes are
    /// not equal.
    fn eq(&self, other: &Self) -> bool {
        let mut a = self.root;
        let mut b = other.root;
        loop {
            match (a, b) {
                (None, None) => return true,
                (Some(ka), Some(kb)) => {
                    let (na, nb) = (&self.nodes[ka], &other.nodes[kb]);
                    if na.value != nb.value
                        || na.left.is_some() != nb.left.is_some()
                        || na.right.is_some() != nb.right.is_some()
                    {
                        return false;
                    }
                    a = self.preorder_next(ka);
                    b = other.preorder_next(kb);
                }
                _ => return false,
            }
        }
    }
}

impl<T: Eq> Eq for BinarySearchTree<T> {}

impl<T: fmt::Debug> fmt::Debug for BinarySearchTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for BinarySearchTree<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Ord> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for BinarySearchTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<'a, T> IntoIterator for &'a BinarySearchTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Cursor over a tree in direction `D`. `None` is the end sentinel; no
/// past-the-end node exists.
pub struct TreeCursor<'a, T, D> {
    tree: &'a BinarySearchTree<T>,
    node: Option<NodeKey>,
    _dir: PhantomData<D>,
}

impl<'a, T, D> TreeCursor<'a, T, D> {
    fn new(tree: &'a BinarySearchTree<T>, node: Option<NodeKey>) -> Self {
        Self {
            tree,
            node,
            _dir: PhantomData,
        }
    }
}

impl<'a, T, D: Direction> Cursor for TreeCursor<'a, T, D> {
    type Item = &'a T;

    fn current(&self) -> Option<&'a T> {
        let tree = self.tree;
        self.node.map(|k| &tree.nodes[k].value)
    }

    fn move_next(&mut self) {
        if let Some(k) = self.node {
            self.node = self.tree.step(k, D::FORWARD);
        }
    }
}

impl<'a, T, D: Direction> BidirectionalCursor for TreeCursor<'a, T, D> {
    fn move_prev(&mut self) {
        self.node = match self.node {
            None => self.tree.first(!D::FORWARD),
            Some(k) => self.tree.step(k, !D::FORWARD),
        };
    }
}

impl<T, D> Clone for TreeCursor<'_, T, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, D> Copy for TreeCursor<'_, T, D> {}

impl<T, D> PartialEq for TreeCursor<'_, T, D> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.node == other.node
    }
}

impl<T, D> Eq for TreeCursor<'_, T, D> {}

impl<T, D> fmt::Debug for TreeCursor<'_, T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeCursor")
            .field("at_end", &self.node.is_none())
            .finish()
    }
}

/// Double-ended in-order iterator built from a forward and a reverse cursor.
pub struct Iter<'a, T> {
    front: TreeCursor<'a, T, Forward>,
    back: TreeCursor<'a, T, Reverse>,
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

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BinarySearchTree<i32> {
        BinarySearchTree::from([20, 10, 30, 5, 15, 25, 35])
    }

    fn in_order(t: &BinarySearchTree<i32>) -> Vec<i32> {
        t.iter().copied().collect()
    }

    /// Invariant: every node's parent link points at the node that owns it.
    fn assert_links(t: &BinarySearchTree<i32>) {
        if let Some(r) = t.root {
            assert!(t.nodes[r].parent.is_none());
        }
        for (k, n) in t.nodes.iter() {
            for c in [n.left, n.right].into_iter().flatten() {
                assert_eq!(t.nodes[c].parent, Some(k));
            }
        }
        let mut reachable = 0;
        let mut cur = t.root;
        while let Some(k) = cur {
            reachable += 1;
            cur = t.preorder_next(k);
        }
        assert_eq!(reachable, t.len());
    }

    /// Invariant: duplicates are rejected without mutation.
    #[test]
    fn insert_rejects_duplicates() {
        let mut t = sample();
        assert!(!t.insert(15));
        assert_eq!(t.len(), 7);
        assert!(t.insert(16));
        assert_eq!(t.len(), 8);
        assert_links(&t);
    }

    #[test]
    fn contains_and_bounds() {
        let t = sample();
        assert!(t.contains(&25));
        assert!(!t.contains(&26));
        assert_eq!(t.min(), Some(&5));
        assert_eq!(t.max(), Some(&35));
        assert_eq!(t.get(&10), Some(&10));

        let empty: BinarySearchTree<i32> = BinarySearchTree::new();
        assert_eq!(empty.min(), None);
        assert!(!empty.contains(&1));
    }

    /// Invariant: deleting a node with two children promotes its successor.
    #[test]
    fn delete_two_children() {
        let mut t = sample();
        assert_eq!(t.delete(&20), Some(20));
        assert_eq!(t.len(), 6);
        assert!(!t.contains(&20));
        assert_eq!(in_order(&t), [5, 10, 15, 25, 30, 35]);
        assert_eq!(t.root.map(|r| t.nodes[r].value), Some(25));
        assert_links(&t);
    }

    #[test]
    fn delete_leaf_and_one_child() {
        let mut t = sample();
        assert_eq!(t.delete(&5), Some(5));
        assert_links(&t);
        // 10 now has only a right child.
        assert_eq!(t.delete(&10), Some(10));
        assert_eq!(in_order(&t), [15, 20, 25, 30, 35]);
        assert_links(&t);
    }

    /// Invariant: deleting the root down to empty keeps links consistent.
    #[test]
    fn delete_everything() {
        let mut t = sample();
        for v in [20, 25, 30, 35, 10, 5, 15] {
            assert!(t.delete(&v).is_some());
            assert_links(&t);
        }
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
        assert_eq!(t.begin(), t.end());
    }

    #[test]
    fn delete_absent_is_noop() {
        let mut t = sample();
        let before = t.clone();
        assert_eq!(t.delete(&99), None);
        assert_eq!(t, before);
    }

    #[test]
    fn cursors_step_through_parent_links() {
        let t = sample();
        let mut c = t.begin();
        let mut seen = Vec::new();
        while let Some(v) = c.current() {
            seen.push(*v);
            c.move_next();
        }
        assert_eq!(seen, [5, 10, 15, 20, 25, 30, 35]);
        assert_eq!(c, t.end());

        c.move_prev();
        assert_eq!(c.current(), Some(&35));
        c.move_prev();
        assert_eq!(c.current(), Some(&30));

        let mut r = t.rbegin();
        assert_eq!(r.current(), Some(&35));
        r.move_prev();
        assert_eq!(r, t.rend());
        r.move_prev();
        assert_eq!(r.current(), Some(&5));
    }

    #[test]
    fn iter_is_double_ended() {
        let t = sample();
        let mut it = t.iter();
        assert_eq!(it.len(), 7);
        assert_eq!(it.next(), Some(&5));
        assert_eq!(it.next_back(), Some(&35));
        assert_eq!(it.next_back(), Some(&30));
        assert_eq!(it.len(), 4);
        let rest: Vec<_> = it.copied().collect();
        assert_eq!(rest, [10, 15, 20, 25]);
        let desc: Vec<_> = t.iter().rev().copied().collect();
        assert_eq!(desc, [35, 30, 25, 20, 15, 10, 5]);
    }

    /// Invariant: a clone has the same shape and is independent.
    #[test]
    fn clone_is_deep() {
        let original = BinarySearchTree::from([10, 5, 15]);
        let mut copy = original.clone();
        assert_eq!(copy, original);
        assert_links(&copy);
        copy.delete(&5);
        assert!(original.contains(&5));
        assert_ne!(copy, original);
    }

    /// Invariant: equality compares shape, not just sorted content.
    #[test]
    fn equality_is_structural() {
        let a = BinarySearchTree::from([2, 1, 3]);
        let b = BinarySearchTree::from([1, 2, 3]);
        assert!(a.iter().eq(b.iter()));
        assert_ne!(a, b);
        assert_eq!(a, BinarySearchTree::from([2, 3, 1]));
    }

    #[test]
    fn degenerate_height() {
        let chain: BinarySearchTree<u32> = (0..50).collect();
        assert_eq!(chain.height(), 50);
        assert_eq!(sample().height(), 3);
        assert_eq!(BinarySearchTree::<u8>::new().height(), 0);
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut t = sample();
        let moved = t.take();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
        assert_eq!(in_order(&moved), [5, 10, 15, 20, 25, 30, 35]);
    }

    #[test]
    fn borrowed_lookup() {
        let mut t = BinarySearchTree::new();
        t.insert("pear".to_string());
        t.insert("apple".to_string());
        assert!(t.contains("pear"));
        assert_eq!(t.delete("apple"), Some("apple".to_string()));
        assert_eq!(format!("{t:?}"), r#"{"pear"}"#);
    }
}
