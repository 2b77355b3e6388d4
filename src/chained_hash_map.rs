//! ChainedHashMap: fixed bucket array heading singly linked chains.
//!
//! A key lives in bucket `hash(key) % bucket_count` for the whole life of
//! the map; the bucket array is never resized. Chain nodes sit in a
//! `SlotMap` arena and are appended at the tail, so iteration order is
//! bucket index order, then first-insertion order within a bucket.

use crate::cursor::{Cursor, Walk};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, BuildHasherDefault, Hash};
use core::mem;
use core::ops::Index;
use log::debug;
use slotmap::{new_key_type, SlotMap};
use std::collections::hash_map::DefaultHasher;

/// Bucket count used by [`ChainedHashMap::new`].
pub const DEFAULT_BUCKET_COUNT: usize = 10;

/// Deterministic hasher state: identical keys land in identical buckets
/// across map instances, which keeps iteration order and bucket-wise
/// equality reproducible.
pub type FixedState = BuildHasherDefault<DefaultHasher>;

new_key_type! {
    struct ChainKey;
}

#[derive(Debug, Clone)]
struct ChainNode<K, V> {
    key: K,
    value: V,
    next: Option<ChainKey>,
}

/// Outcome of scanning one chain for a key.
enum Probe {
    Found(ChainKey),
    /// Key absent; `tail` is the chain's last node, if any.
    Vacant { tail: Option<ChainKey> },
}

pub struct ChainedHashMap<K, V, S = FixedState> {
    hasher: S,
    buckets: Box<[Option<ChainKey>]>,
    nodes: SlotMap<ChainKey, ChainNode<K, V>>,
}

impl<K, V> ChainedHashMap<K, V> {
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKET_COUNT)
    }

    /// # Panics
    /// If `bucket_count` is zero.
    pub fn with_buckets(bucket_count: usize) -> Self {
        Self::with_buckets_and_hasher(bucket_count, FixedState::default())
    }
}

impl<K, V, S: Default> Default for ChainedHashMap<K, V, S> {
    fn default() -> Self {
        Self::with_buckets_and_hasher(DEFAULT_BUCKET_COUNT, S::default())
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// # Panics
    /// If `bucket_count` is zero; every bucket index would be undefined.
    pub fn with_buckets_and_hasher(bucket_count: usize, hasher: S) -> Self {
        assert!(bucket_count > 0, "ChainedHashMap requires at least one bucket");
        debug!("chained hash map created with {bucket_count} buckets");
        Self {
            hasher,
            buckets: (0..bucket_count).map(|_| None).collect(),
            nodes: SlotMap::with_key(),
        }
    }

    /// Bucket count, fixed at construction. See [`len`](Self::len) for the
    /// number of entries.
    pub fn size(&self) -> usize {
        self.buckets.len()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Number of entries chained in bucket `bucket`.
    pub fn bucket_len(&self, bucket: usize) -> usize {
        let mut n = 0;
        let mut cur = self.buckets.get(bucket).copied().flatten();
        while let Some(k) = cur {
            n += 1;
            cur = self.nodes[k].next;
        }
        n
    }

    /// Free every chain; the bucket count is retained.
    pub fn clear(&mut self) {
        if !self.nodes.is_empty() {
            debug!(
                "clearing chained hash map: {} entries across {} buckets",
                self.nodes.len(),
                self.buckets.len()
            );
        }
        self.nodes.clear();
        self.buckets.iter_mut().for_each(|b| *b = None);
    }

    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Move the contents out, leaving an empty default-sized map behind.
    pub fn take(&mut self) -> Self
    where
        S: Default,
    {
        mem::take(self)
    }

    fn next_occupied(&self, from: usize) -> (usize, Option<ChainKey>) {
        for (i, head) in self.buckets.iter().enumerate().skip(from) {
            if head.is_some() {
                return (i, *head);
            }
        }
        (self.buckets.len(), None)
    }

    pub fn begin(&self) -> MapCursor<'_, K, V, S> {
        let (bucket, node) = self.next_occupied(0);
        MapCursor {
            map: self,
            bucket,
            node,
        }
    }

    pub fn end(&self) -> MapCursor<'_, K, V, S> {
        MapCursor {
            map: self,
            bucket: self.buckets.len(),
            node: None,
        }
    }

    /// Entries in canonical order: bucket index, then chain order.
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        self.begin().walk()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub(crate) fn bucket_of<Q>(&self, q: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(q) % self.buckets.len() as u64) as usize
    }

    fn probe<Q>(&self, bucket: usize, q: &Q) -> Probe
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut tail = None;
        let mut cur = self.buckets[bucket];
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if node.key.borrow() == q {
                return Probe::Found(k);
            }
            tail = Some(k);
            cur = node.next;
        }
        Probe::Vacant { tail }
    }

    fn find_key<Q>(&self, q: &Q) -> Option<ChainKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.probe(self.bucket_of(q), q) {
            Probe::Found(k) => Some(k),
            Probe::Vacant { .. } => None,
        }
    }

    fn append(&mut self, bucket: usize, tail: Option<ChainKey>, key: K, value: V) -> ChainKey {
        let k = self.nodes.insert(ChainNode {
            key,
            value,
            next: None,
        });
        match tail {
            Some(t) => self.nodes[t].next = Some(k),
            None => self.buckets[bucket] = Some(k),
        }
        k
    }

    /// Insert or overwrite. Returns the previous value when `key` was
    /// already present; a new key is appended to the tail of its chain.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let bucket = self.bucket_of(&key);
        match self.probe(bucket, &key) {
            Probe::Found(k) => Some(mem::replace(&mut self.nodes[k].value, value)),
            Probe::Vacant { tail } => {
                self.append(bucket, tail, key, value);
                None
            }
        }
    }

    /// Index access that creates a default entry for an absent key.
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Like [`get_or_default`](Self::get_or_default); `make` only runs
    /// when the key is absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let bucket = self.bucket_of(&key);
        let k = match self.probe(bucket, &key) {
            Probe::Found(k) => k,
            Probe::Vacant { tail } => self.append(bucket, tail, key, make()),
        };
        &mut self.nodes[k].value
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_key(q).map(|k| &self.nodes[k].value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let k = self.find_key(q)?;
        Some(&mut self.nodes[k].value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_key(q).is_some()
    }

    /// Unlink `q`'s node from its chain, keeping the order of the rest.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let bucket = self.bucket_of(q);
        let mut prev = None;
        let mut cur = self.buckets[bucket];
        while let Some(k) = cur {
            let node = &self.nodes[k];
            let next = node.next;
            if node.key.borrow() == q {
                match prev {
                    Some(p) => self.nodes[p].next = next,
                    None => self.buckets[bucket] = next,
                }
                return self.nodes.remove(k).map(|n| n.value);
            }
            prev = Some(k);
            cur = next;
        }
        None
    }
}

impl<K: Clone, V: Clone, S: Clone> Clone for ChainedHashMap<K, V, S> {
    /// Bucket-by-bucket chain copy; keys keep their bucket and position.
    fn clone(&self) -> Self {
        let mut buckets: Box<[Option<ChainKey>]> = self.buckets.iter().map(|_| None).collect();
        let mut nodes = SlotMap::with_capacity_and_key(self.nodes.len());
        for (bucket, head) in self.buckets.iter().enumerate() {
            let mut tail: Option<ChainKey> = None;
            let mut cur = *head;
            while let Some(k) = cur {
                let src = &self.nodes[k];
                let copy = nodes.insert(ChainNode {
                    key: src.key.clone(),
                    value: src.value.clone(),
                    next: None,
                });
                match tail {
                    Some(t) => nodes[t].next = Some(copy),
                    None => buckets[bucket] = Some(copy),
                }
                tail = Some(copy);
                cur = src.next;
            }
        }
        Self {
            hasher: self.hasher.clone(),
            buckets,
            nodes,
        }
    }
}

impl<K: PartialEq, V: PartialEq, S> PartialEq for ChainedHashMap<K, V, S> {
    /// Same bucket count and, bucket by bucket, the same keys and values
    /// at the same chain positions.
    fn eq(&self, other: &Self) -> bool {
        if self.buckets.len() != other.buckets.len() {
            return false;
        }
        self.buckets.iter().zip(other.buckets.iter()).all(|(&a, &b)| {
            let (mut a, mut b) = (a, b);
            loop {
                match (a, b) {
                    (None, None) => return true,
                    (Some(ka), Some(kb)) => {
                        let (na, nb) = (&self.nodes[ka], &other.nodes[kb]);
                        if na.key != nb.key || na.value != nb.value {
                            return false;
                        }
                        a = na.next;
                        b = nb.next;
                    }
                    _ => return false,
                }
            }
        })
    }
}

impl<K: Eq, V: Eq, S> Eq for ChainedHashMap<K, V, S> {}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainedHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, Q, V, S> Index<&Q> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Eq + Hash,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    /// If the key is absent. Use [`get_or_default`](ChainedHashMap::get_or_default)
    /// for auto-vivifying access.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("key not present in ChainedHashMap"),
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward-only cursor: chains are singly linked.
pub struct MapCursor<'a, K, V, S> {
    map: &'a ChainedHashMap<K, V, S>,
    bucket: usize,
    node: Option<ChainKey>,
}

impl<'a, K, V, S> MapCursor<'a, K, V, S> {
    /// Bucket of the entry under the cursor; `size()` at the end.
    pub fn bucket(&self) -> usize {
        self.bucket
    }

    pub fn key(&self) -> Option<&'a K> {
        self.current().map(|(k, _)| k)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.current().map(|(_, v)| v)
    }
}

impl<'a, K, V, S> Cursor for MapCursor<'a, K, V, S> {
    type Item = (&'a K, &'a V);

    fn current(&self) -> Option<(&'a K, &'a V)> {
        let map = self.map;
        self.node.map(|k| {
            let n = &map.nodes[k];
            (&n.key, &n.value)
        })
    }

    /// Follow the chain; when it runs out, skip to the next non-empty
    /// bucket or to the end.
    fn move_next(&mut self) {
        let Some(k) = self.node else { return };
        match self.map.nodes[k].next {
            Some(next) => self.node = Some(next),
            None => {
                let (bucket, node) = self.map.next_occupied(self.bucket + 1);
                self.bucket = bucket;
                self.node = node;
            }
        }
    }
}

impl<K, V, S> Clone for MapCursor<'_, K, V, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, S> Copy for MapCursor<'_, K, V, S> {}

impl<K, V, S> PartialEq for MapCursor<'_, K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.map, other.map) && self.node == other.node
    }
}

impl<K, V, S> Eq for MapCursor<'_, K, V, S> {}

impl<K, V, S> fmt::Debug for MapCursor<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapCursor")
            .field("bucket", &self.bucket)
            .field("at_end", &self.node.is_none())
            .finish()
    }
}

/// Iterator over `(&K, &V)` in canonical order.
pub type Iter<'a, K, V, S> = Walk<MapCursor<'a, K, V, S>>;
