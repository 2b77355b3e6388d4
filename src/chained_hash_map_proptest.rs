#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can check
// bucket placement through the crate-private `bucket_of`.

use crate::chained_hash_map::ChainedHashMap;
use crate::cursor::Cursor;
use core::hash::BuildHasher;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::Hasher;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    GetOrDefault(usize),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Clear,
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => idx.clone().prop_map(OpI::GetOrDefault),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Clear),
            2 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Model: entries in first-insertion order. Overwrites keep position;
// removal drops the entry so a later insert goes to the back.
#[derive(Default)]
struct Model {
    entries: Vec<(Key, i32)>,
}

impl Model {
    fn position(&self, k: &Key) -> Option<usize> {
        self.entries.iter().position(|(mk, _)| mk == k)
    }

    fn insert(&mut self, k: Key, v: i32) -> Option<i32> {
        match self.position(&k) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, v)),
            None => {
                self.entries.push((k, v));
                None
            }
        }
    }

    fn remove(&mut self, k: &Key) -> Option<i32> {
        let i = self.position(k)?;
        Some(self.entries.remove(i).1)
    }

    fn get(&self, k: &Key) -> Option<i32> {
        self.position(k).map(|i| self.entries[i].1)
    }
}

fn run_scenario<S: BuildHasher>(
    mut sut: ChainedHashMap<Key, i32, S>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model = Model::default();
    let buckets = sut.size();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = key_from(&pool, i);
                let prev = sut.insert(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k, v));
            }
            OpI::GetOrDefault(i) => {
                let k = key_from(&pool, i);
                let expected = model.get(&k).unwrap_or_default();
                if model.get(&k).is_none() {
                    model.insert(k.clone(), 0);
                }
                prop_assert_eq!(*sut.get_or_default(k), expected);
            }
            OpI::Remove(i) => {
                let k = key_from(&pool, i);
                prop_assert_eq!(sut.remove(&k), model.remove(&k));
                prop_assert!(!sut.contains_key(&k));
            }
            OpI::Get(i) => {
                let k = key_from(&pool, i);
                prop_assert_eq!(sut.get(&k).copied(), model.get(&k));
            }
            OpI::Contains(s) => {
                let has = sut.contains_key(s.as_str());
                let has_model = model.entries.iter().any(|(k, _)| k.0 == s);
                prop_assert_eq!(has, has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(&pool, i);
                if let Some(vr) = sut.get_mut(&k) {
                    *vr = vr.saturating_add(d);
                    let mv = model.get(&k).expect("model tracks live key");
                    model.insert(k, mv.saturating_add(d));
                } else {
                    prop_assert!(model.get(&k).is_none());
                }
            }
            OpI::Clear => {
                sut.clear();
                model.entries.clear();
            }
            OpI::Iterate => {
                // Canonical order: stable sort of first-insertion order by bucket.
                let mut expected: Vec<(Key, i32)> = model.entries.clone();
                expected.sort_by_key(|(k, _)| sut.bucket_of(k));
                let actual: Vec<(Key, i32)> =
                    sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(actual, expected);
            }
        }

        // Post-conditions after each op
        // 1) Each key appears exactly once, in the bucket its hash selects.
        let mut seen = BTreeSet::new();
        let mut cursor = sut.begin();
        while let Some((k, _)) = cursor.current() {
            prop_assert!(seen.insert(k.clone()), "duplicate key {:?}", k);
            prop_assert_eq!(cursor.bucket(), sut.bucket_of(k));
            cursor.move_next();
        }
        // 2) Size parity; bucket count never changes.
        prop_assert_eq!(sut.len(), model.entries.len());
        prop_assert_eq!(sut.is_empty(), model.entries.is_empty());
        prop_assert_eq!(sut.size(), buckets);
    }

    // Values match the last write per key.
    let final_model: HashMap<Key, i32> = model.entries.into_iter().collect();
    let final_sut: HashMap<Key, i32> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
    prop_assert_eq!(final_sut, final_model);
    Ok(())
}

// Property: state-machine equivalence against an insertion-ordered model.
// Invariants exercised across random operation sequences:
// - insert overwrites in place and reports the previous value.
// - get_or_default auto-vivifies absent keys with the default value.
// - remove unlinks exactly one entry; the key is absent afterwards.
// - iteration is bucket order, then first-insertion order within a chain.
// - each key sits in bucket hash(key) % size; size never changes.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(buckets in 1usize..=12, (pool, ops) in arb_scenario()) {
        run_scenario(ChainedHashMap::with_buckets(buckets), pool, ops)?;
    }
}

// Collision variant using a constant hasher: one chain holds everything.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: same invariants under worst-case collisions. This stresses
// chain scanning, tail append and mid-chain unlinking.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions(buckets in 1usize..=4, (pool, ops) in arb_scenario()) {
        let sut = ChainedHashMap::with_buckets_and_hasher(buckets, ConstBuildHasher);
        run_scenario(sut, pool, ops)?;
    }
}

// Property: a clone equals its source and stays independent of it.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_clone_independence(entries in proptest::collection::vec(("[a-c]{1,2}", any::<i32>()), 0..20), probe in "[a-c]{1,2}") {
        let mut original: ChainedHashMap<Key, i32> = ChainedHashMap::with_buckets(3);
        for (k, v) in entries {
            original.insert(Key(k), v);
        }
        let mut copy = original.clone();
        prop_assert!(copy == original);

        let before = original.get(probe.as_str()).copied();
        *copy.get_or_default(Key(probe.clone())) = i32::MIN;
        prop_assert_eq!(original.get(probe.as_str()).copied(), before);
    }
}
