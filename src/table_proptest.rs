#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can check the
// slot-level invariants after every operation.

use crate::{HashTable, TableConfig, TableError};
use proptest::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Hash)]
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

// Hashes only the length, so keys of equal length share a probe sequence.
#[derive(Clone, Eq, PartialEq)]
struct Clashing(String);
impl fmt::Debug for Clashing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl Hash for Clashing {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
    }
}

// Pool-indexed operations: indices shrink to earlier keys, op lists shrink
// in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Get(usize),
    Remove(usize),
    Mutate(usize, i32),
    Contains(String),
}

// Strides are coprime to every capacity the table can reach, so each probe
// sequence covers the whole slot array and an insert can only exhaust once
// no empty slot is left at all.
fn arb_config() -> impl Strategy<Value = TableConfig> {
    (
        9usize..=12,
        proptest::sample::select(vec![0.25f32, 0.5, 0.75, 1.0, 1.5]),
        proptest::sample::select(vec![1usize, 7, 13]),
    )
        .prop_map(|(cap, lf, stride)| TableConfig::new(cap, lf).with_stride(stride))
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Get),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => "[a-z]{0,5}".prop_map(OpI::Contains),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `put` returns the model's previous value; `get`/`remove` agree with it.
// - `size` matches the model after every op.
// - Every occupied slot is reachable by its key's own probe walk and the
//   occupied-slot count equals `size`.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(config in arb_config(), (pool, ops) in arb_scenario()) {
        let mut sut: HashTable<Key, i32> = HashTable::with_config(config).unwrap();
        let mut model: HashMap<Key, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = Key(pool[i].clone());
                    match sut.try_put(k.clone(), v) {
                        Ok(prev) => prop_assert_eq!(prev, model.insert(k, v)),
                        Err(TableError::CapacityExhausted { .. }) => {
                            // Every slot is live or a tombstone; nothing changed.
                            prop_assert!(!sut.has_empty_slot());
                            prop_assert!(!model.contains_key(&k));
                        }
                        Err(e) => prop_assert!(false, "unexpected error: {}", e),
                    }
                }
                OpI::Get(i) => {
                    let k = Key(pool[i].clone());
                    prop_assert_eq!(sut.get(&k), model.get(&k));
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    let before = sut.size();
                    let removed = sut.remove(k.as_str());
                    prop_assert_eq!(removed, model.remove(k.as_str()));
                    let expected = if removed.is_some() { before - 1 } else { before };
                    prop_assert_eq!(sut.size(), expected);
                    prop_assert!(sut.get(k.as_str()).is_none());
                }
                OpI::Mutate(i, d) => {
                    let k = Key(pool[i].clone());
                    if let Some(v) = sut.get_mut(&k) {
                        *v = v.saturating_add(d);
                    }
                    if let Some(v) = model.get_mut(&k) {
                        *v = v.saturating_add(d);
                    }
                    prop_assert_eq!(sut.get(&k), model.get(&k));
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(s.as_str()));
                }
            }

            sut.assert_invariants();
            prop_assert_eq!(sut.size(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }

        for (k, v) in &model {
            prop_assert_eq!(sut.get(k), Some(v));
        }
    }
}

// Property: Same invariants under heavy collisions, where most keys share a
// probe sequence and tombstones sit in the middle of long chains.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions(config in arb_config(), (pool, ops) in arb_scenario()) {
        let mut sut: HashTable<Clashing, i32> = HashTable::with_config(config).unwrap();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = &pool[i];
                    match sut.try_put(Clashing(k.clone()), v) {
                        Ok(prev) => prop_assert_eq!(prev, model.insert(k.clone(), v)),
                        Err(TableError::CapacityExhausted { .. }) => {
                            prop_assert!(!sut.has_empty_slot());
                            prop_assert!(!model.contains_key(k));
                        }
                        Err(e) => prop_assert!(false, "unexpected error: {}", e),
                    }
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(&Clashing(k.clone())), model.get(k));
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.remove(&Clashing(k.clone())), model.remove(k));
                }
                OpI::Mutate(i, d) => {
                    let k = &pool[i];
                    if let Some(v) = sut.get_mut(&Clashing(k.clone())) {
                        *v = v.wrapping_sub(d);
                    }
                    if let Some(v) = model.get_mut(k) {
                        *v = v.wrapping_sub(d);
                    }
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains_key(&Clashing(s.clone())), model.contains_key(&s));
                }
            }

            sut.assert_invariants();
            prop_assert_eq!(sut.size(), model.len());
        }
    }
}

// Property: growth keeps every entry and never changes `size` by itself.
// Load factors stay below 1 so `size <= threshold < capacity` always leaves
// an empty slot.
proptest! {
    #[test]
    fn prop_growth_preserves_entries(
        cap in 1usize..=8,
        lf in proptest::sample::select(vec![0.25f32, 0.5, 0.75]),
        n in 1u32..200,
    ) {
        let mut t: HashTable<u32, u32> = HashTable::with_capacity_and_load_factor(cap, lf).unwrap();
        for k in 0..n {
            let capacity = t.capacity();
            prop_assert_eq!(t.put(k, k.wrapping_mul(31)), None);
            prop_assert_eq!(t.size(), k as usize + 1);
            prop_assert!(t.capacity() >= capacity);
            prop_assert!(t.size() <= t.threshold());
        }
        t.assert_invariants();
        for k in 0..n {
            prop_assert_eq!(t.get(&k), Some(&k.wrapping_mul(31)));
        }
    }
}
