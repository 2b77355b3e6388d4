//! vessel: value-semantic containers with an STL-style cursor protocol.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small set of owned containers whose structural invariants
//!   hold across every mutation and whose iteration is expressed through
//!   one shared cursor framework.
//! - Layers:
//!   - cursor: `Cursor` / `BidirectionalCursor` traits, the `Forward` and
//!     `Reverse` direction markers, and `Walk`, which turns any cursor
//!     into a std iterator.
//!   - DynamicArray<T>: contiguous buffer over a raw allocation; capacity
//!     doubles on overflow and elements are relocated in index order.
//!   - BinarySearchTree<T>: unbalanced BST over a slotmap arena with
//!     parent links; in-order traversal in both directions without an
//!     auxiliary stack.
//!   - ChainedHashMap<K, V, S>: fixed bucket array; each bucket heads a
//!     singly linked chain in a slotmap arena. Iteration is bucket-major,
//!     chain order within a bucket.
//!   - FixedArray<T, N>, LinkedList<T>, Stack<T>, Queue<T>: the simple
//!     collaborators.
//!
//! Constraints
//! - Single-threaded containers; no internal synchronization.
//! - Cursors borrow their container, so structural mutation while a cursor
//!   is alive is rejected at compile time.
//! - Stepping a cursor past either end lands on the end sentinel instead
//!   of reading out of bounds.
//! - Only `DynamicArray` touches raw memory; the linked containers index
//!   generational slotmap keys with safe Rust.
//!
//! Hasher and bucket invariants
//! - Bucket index is `hash(key) % bucket_count` and the bucket count is
//!   fixed at construction. The default hasher is deterministic so two
//!   maps with equal contents inserted in the same order compare equal.
//!
//! Notes and non-goals
//! - No tree balancing; degenerate insertion orders give linear height.
//! - No rehashing; long chains are the caller's concern.
//! - No persistence or serialization.
//! - The library logs through the `log` facade and never installs a logger.

pub mod binary_search_tree;
pub mod chained_hash_map;
mod chained_hash_map_proptest;
pub mod cursor;
pub mod dynamic_array;
pub mod error;
pub mod fixed_array;
pub mod linked_list;

// Public surface
pub use binary_search_tree::BinarySearchTree;
pub use chained_hash_map::{ChainedHashMap, FixedState, DEFAULT_BUCKET_COUNT};
pub use cursor::{BidirectionalCursor, Cursor, Direction, Forward, Reverse, Walk};
pub use dynamic_array::DynamicArray;
pub use error::{ContainerError, Result};
pub use fixed_array::FixedArray;
pub use linked_list::{LinkedList, Queue, Stack};
