// DynamicArray integration tests.
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Growth: capacity starts at 1 and doubles only when a push overflows it.
// - Ownership: every element is dropped exactly once across relocation,
//   pop, clear, clone, take and drop of the array itself.
// - Access: checked access reports the index and length on failure.
// - Cursors: forward and reverse cursors agree with slice order.
use std::cell::Cell;
use std::rc::Rc;
use vessel::{BidirectionalCursor, ContainerError, Cursor, DynamicArray};

// Counts drops through a shared cell.
#[derive(Clone, Debug)]
struct Tracked {
    id: u32,
    drops: Rc<Cell<usize>>,
}

impl Tracked {
    fn new(id: u32, drops: &Rc<Cell<usize>>) -> Self {
        Self {
            id,
            drops: Rc::clone(drops),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

// Test: capacity sequence under repeated push.
// Assumes: a new array starts with capacity 1.
// Verifies: capacity is 1, 2, 4, 8, 16 as size crosses each power of two.
#[test]
fn capacity_doubles_on_overflow() {
    let mut a = DynamicArray::new();
    let mut seen = vec![a.capacity()];
    for i in 0..16 {
        a.push_back(i);
        if *seen.last().unwrap() != a.capacity() {
            seen.push(a.capacity());
        }
    }
    assert_eq!(seen, [1, 2, 4, 8, 16]);
    assert_eq!(a.len(), 16);
    assert_eq!(a.as_slice(), (0..16).collect::<Vec<_>>().as_slice());
}

// Test: relocation moves elements without dropping or duplicating them.
// Assumes: growth happens several times during the push loop.
// Verifies: no drop happens until the array itself is dropped, and then
// exactly one drop per element.
#[test]
fn relocation_neither_leaks_nor_duplicates() {
    let drops = Rc::new(Cell::new(0));
    {
        let mut a = DynamicArray::new();
        for id in 0..100 {
            a.push_back(Tracked::new(id, &drops));
        }
        assert_eq!(drops.get(), 0);
        assert_eq!(a.iter().map(|t| t.id).sum::<u32>(), (0..100).sum());
    }
    assert_eq!(drops.get(), 100);
}

// Test: pop, clear and take hand ownership around correctly.
// Assumes: pop_back returns the element by value.
// Verifies: drop counts after each operation; capacity kept by clear.
#[test]
fn pop_clear_take_drop_counts() {
    let drops = Rc::new(Cell::new(0));
    let mut a = DynamicArray::new();
    for id in 0..8 {
        a.push_back(Tracked::new(id, &drops));
    }

    let last = a.pop_back().expect("non-empty");
    assert_eq!(last.id, 7);
    assert_eq!(drops.get(), 0);
    drop(last);
    assert_eq!(drops.get(), 1);

    let cap = a.capacity();
    a.clear();
    assert_eq!(drops.get(), 8);
    assert_eq!(a.capacity(), cap);
    assert!(a.pop_back().is_none());

    a.push_back(Tracked::new(100, &drops));
    let moved = a.take();
    assert!(a.is_empty());
    assert_eq!(a.capacity(), 1);
    assert_eq!(moved.len(), 1);
    drop(moved);
    assert_eq!(drops.get(), 9);
}

// Test: clone is a deep copy.
// Assumes: Clone duplicates each element with T::clone.
// Verifies: independent drop of original and copy; equality before edits.
#[test]
fn clone_is_deep_and_independent() {
    let drops = Rc::new(Cell::new(0));
    let a: DynamicArray<Tracked> = (0..5).map(|id| Tracked::new(id, &drops)).collect();
    let b = a.clone();
    assert_eq!(b.len(), 5);
    assert_eq!(b.capacity(), a.capacity());
    drop(a);
    assert_eq!(drops.get(), 5);
    assert_eq!(b.back().map(|t| t.id), Some(4));
    drop(b);
    assert_eq!(drops.get(), 10);

    let x = DynamicArray::from([1, 2, 3]);
    let mut y = x.clone();
    assert_eq!(x, y);
    y[0] = 9;
    assert_ne!(x, y);
    assert_eq!(x[0], 1);
}

// Test: emplace_back constructs in place.
// Assumes: the returned reference points at the new last element.
// Verifies: writes through the reference are visible in the array.
#[test]
fn emplace_back_returns_new_slot() {
    let mut a = DynamicArray::from_elem(2, String::from("x"));
    assert_eq!(a.capacity(), 4);
    let s = a.emplace_back(|| String::from("y"));
    s.push('z');
    assert_eq!(a.back().map(String::as_str), Some("yz"));
    assert_eq!(a.len(), 3);
}

// Test: checked access at the boundary.
// Assumes: at(len) is the first invalid index.
// Verifies: the error carries the index and current length.
#[test]
fn checked_access_boundaries() {
    let mut a = DynamicArray::from([10, 20, 30]);
    assert_eq!(a.at(0), Ok(&10));
    assert_eq!(a.at(2), Ok(&30));
    assert_eq!(a.at(3), Err(ContainerError::OutOfRange { index: 3, len: 3 }));
    assert!(a.at_mut(usize::MAX).is_err());
    *a.at_mut(1).unwrap() += 1;
    assert_eq!(a[1], 21);
    assert_eq!(
        ContainerError::OutOfRange { index: 3, len: 3 }.to_string(),
        "index out of range: index 3 is beyond length 3"
    );
}

// Test: cursor protocol over the array.
// Assumes: end() is one past the last element.
// Verifies: begin walks to end, reverse mirrors forward, and retreating
// from the end lands on the last element.
#[test]
fn cursor_protocol() {
    let a: DynamicArray<i32> = (1..=4).collect();
    let mut c = a.begin();
    let mut fwd = Vec::new();
    while c != a.end() {
        fwd.push(*c.current().unwrap());
        c.move_next();
    }
    assert_eq!(fwd, [1, 2, 3, 4]);

    let rev: Vec<i32> = a.rbegin().walk().copied().collect();
    assert_eq!(rev, [4, 3, 2, 1]);

    let mut e = a.end();
    e.move_prev();
    assert_eq!(e.current(), Some(&4));
    assert_eq!(e.index(), Some(3));

    let empty: DynamicArray<i32> = DynamicArray::new();
    assert_eq!(empty.begin(), empty.end());
    assert_eq!(empty.rbegin(), empty.rend());
}

// Test: zero-sized element types.
// Assumes: no allocation is made for a zero-sized T.
// Verifies: len and capacity bookkeeping still follow doubling.
#[test]
fn zero_sized_elements() {
    let mut a = DynamicArray::new();
    for _ in 0..5 {
        a.push_back(());
    }
    assert_eq!(a.len(), 5);
    assert_eq!(a.capacity(), 8);
    assert_eq!(a.pop_back(), Some(()));
    assert_eq!(a.iter().count(), 4);
}

// Test: swap exchanges contents and capacity.
#[test]
fn swap_exchanges_everything() {
    let mut a = DynamicArray::with_capacity(16);
    a.push_back('a');
    let mut b = DynamicArray::from(['x', 'y']);
    a.swap(&mut b);
    assert_eq!(a.as_slice(), &['x', 'y']);
    assert_eq!(b.as_slice(), &['a']);
    assert_eq!(b.capacity(), 16);
}
