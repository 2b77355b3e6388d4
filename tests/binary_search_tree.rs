// BinarySearchTree integration tests.
//
// The core invariants exercised:
// - Ordering: in-order traversal is strictly ascending.
// - Uniqueness: duplicate insert returns false and changes nothing.
// - Deletion: each of the leaf, one-child and two-children cases keeps
//   the remaining values and their order intact.
// - Equality is structural: same values in a different shape differ.
use std::cell::Cell;
use std::cmp::Ordering;
use std::rc::Rc;
use vessel::{BidirectionalCursor, BinarySearchTree, Cursor};

// Ordered by `key` only; drops are counted through a shared cell.
#[derive(Debug)]
struct Counted {
    key: i32,
    drops: Rc<Cell<usize>>,
}

impl PartialEq for Counted {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}
impl Eq for Counted {}
impl PartialOrd for Counted {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Counted {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}
impl Drop for Counted {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

fn in_order(t: &BinarySearchTree<i32>) -> Vec<i32> {
    t.iter().copied().collect()
}

// Test: traversal order is independent of insertion order.
// Assumes: inserting a permutation yields the same set.
// Verifies: ascending in-order walk and descending reverse walk.
#[test]
fn traversal_is_sorted() {
    let t: BinarySearchTree<i32> = [50, 20, 80, 10, 30, 70, 90, 25, 35].into_iter().collect();
    assert_eq!(in_order(&t), [10, 20, 25, 30, 35, 50, 70, 80, 90]);
    let desc: Vec<i32> = t.rbegin().walk().copied().collect();
    assert_eq!(desc, [90, 80, 70, 50, 35, 30, 25, 20, 10]);
    assert_eq!(t.len(), 9);
    assert_eq!(t.height(), 4);
}

// Test: degenerate insertion order.
// Assumes: no balancing is performed.
// Verifies: sorted input yields a chain whose height equals its length,
// and traversal still works in both directions.
#[test]
fn sorted_input_degenerates_to_a_chain() {
    let t: BinarySearchTree<u32> = (0..64).collect();
    assert_eq!(t.height(), 64);
    assert_eq!(t.iter().count(), 64);
    assert_eq!(t.iter().rev().next(), Some(&63));
}

// Test: duplicates.
// Assumes: equal values compare Equal under Ord.
// Verifies: the duplicate is dropped by the caller side, the stored one kept.
#[test]
fn duplicate_insert_keeps_original() {
    let drops = Rc::new(Cell::new(0));
    let mut t = BinarySearchTree::new();
    assert!(t.insert(Counted { key: 1, drops: Rc::clone(&drops) }));
    assert!(!t.insert(Counted { key: 1, drops: Rc::clone(&drops) }));
    assert_eq!(drops.get(), 1);
    assert_eq!(t.len(), 1);
    drop(t);
    assert_eq!(drops.get(), 2);
}

// Test: deletion ownership.
// Assumes: delete returns the removed value by move.
// Verifies: the two-children case hands back the target value and keeps
// the promoted successor alive; nothing is dropped twice.
#[test]
fn delete_moves_values_out() {
    let drops = Rc::new(Cell::new(0));
    let mut t = BinarySearchTree::new();
    for key in [20, 10, 30, 25, 35] {
        t.insert(Counted { key, drops: Rc::clone(&drops) });
    }
    let probe = Counted { key: 20, drops: Rc::new(Cell::new(0)) };
    let removed = t.delete(&probe).expect("present");
    assert_eq!(removed.key, 20);
    assert_eq!(drops.get(), 0);
    drop(removed);
    assert_eq!(drops.get(), 1);

    let keys: Vec<i32> = t.iter().map(|c| c.key).collect();
    assert_eq!(keys, [10, 25, 30, 35]);
    drop(t);
    assert_eq!(drops.get(), 5);
}

// Test: interleaved insert/delete.
// Assumes: deletion may restructure around the root repeatedly.
// Verifies: membership and order after each step.
#[test]
fn interleaved_insert_delete() {
    let mut t = BinarySearchTree::from([8, 4, 12, 2, 6, 10, 14]);
    assert_eq!(t.delete(&8), Some(8));
    assert_eq!(t.delete(&10), Some(10));
    assert!(t.insert(9));
    assert_eq!(t.delete(&4), Some(4));
    assert_eq!(t.delete(&4), None);
    assert_eq!(in_order(&t), [2, 6, 9, 12, 14]);
    assert_eq!(t.min(), Some(&2));
    assert_eq!(t.max(), Some(&14));
}

// Test: structural equality.
// Assumes: equality compares shape as well as values.
// Verifies: equal insertion orders compare equal; a different order with
// the same values does not; a clone compares equal.
#[test]
fn equality_is_structural() {
    let a = BinarySearchTree::from([2, 1, 3]);
    let b = BinarySearchTree::from([2, 1, 3]);
    let c = BinarySearchTree::from([1, 2, 3]);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(in_order(&a), in_order(&c));
    assert_eq!(c.clone(), c);
}

// Test: cursor wraparound at both ends.
// Assumes: end is a single sentinel shared by both directions of travel.
// Verifies: stepping back from begin reaches end, and from end reaches max.
#[test]
fn cursor_wraps_through_end() {
    let t = BinarySearchTree::from([2, 1, 3]);
    let mut c = t.begin();
    c.move_prev();
    assert!(c.is_end());
    c.move_prev();
    assert_eq!(c.current(), Some(&3));
    c.move_next();
    assert_eq!(c, t.end());
    c.move_next();
    assert_eq!(c, t.end());
}

// Test: take and clear.
#[test]
fn take_leaves_empty_tree() {
    let mut t = BinarySearchTree::from(["b", "a", "c"]);
    let moved = t.take();
    assert!(t.is_empty());
    assert_eq!(moved.len(), 3);
    t.insert("z");
    assert_eq!(t.iter().collect::<Vec<_>>(), [&"z"]);
    t.clear();
    assert_eq!(t.begin(), t.end());
    assert_eq!(format!("{:?}", moved), r#"{"a", "b", "c"}"#);
}
