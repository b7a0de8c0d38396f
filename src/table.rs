//! HashTable: open addressing with fixed-stride probing and lazy tombstones.

use crate::config::{
    threshold_for, Params, TableConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR,
    DEFAULT_STRIDE,
};
use crate::error::TableError;
use crate::hasher::structural_hash;
use crate::probe::ProbeSeq;
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use core::mem;

#[derive(Debug)]
enum Slot<K, V> {
    /// Untouched since the slot array was allocated. Ends every probe walk.
    Empty,
    Occupied(K, V),
    /// Removed entry. Walks continue past it; inserts may reuse it.
    Tombstone,
}

impl<K, V> Slot<K, V> {
    fn value(&self) -> Option<&V> {
        match self {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }

    fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }

    fn replace_value(&mut self, value: V) -> Option<V> {
        self.value_mut().map(|v| mem::replace(v, value))
    }

    fn into_value(self) -> Option<V> {
        match self {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || Slot::Empty);
    slots
}

/// Where a probe walk for one key ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    /// Occupied slot holding the key.
    Found(usize),
    /// Key is absent; an insert belongs here (first tombstone seen, else the
    /// terminating empty slot).
    Vacant(usize),
    /// Probe bound exceeded without reaching an empty slot.
    Exhausted,
}

/// Generic key/value table using open addressing.
///
/// Every key has a probe sequence `floor_mod(hash + stride * i, capacity)`
/// over the slot array. Removal leaves a tombstone so that walks for other
/// keys keep going past it; tombstones are only discarded when the table
/// grows. The slot array is allocated on the first insert.
pub struct HashTable<K, V> {
    slots: Vec<Slot<K, V>>,
    size: usize,
    capacity: usize,
    threshold: usize,
    load_factor: f32,
    stride: usize,
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    /// Capacity 16, load factor 0.5, stride 13.
    pub fn new() -> Self {
        Self::from_params(Params {
            capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            stride: DEFAULT_STRIDE,
        })
    }

    pub fn with_capacity(initial_capacity: usize) -> Result<Self, TableError> {
        Self::with_capacity_and_load_factor(initial_capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Fails if `initial_capacity` is zero or `load_factor` is not positive.
    /// Capacities above [`MAXIMUM_CAPACITY`](crate::MAXIMUM_CAPACITY) are
    /// clamped to it.
    pub fn with_capacity_and_load_factor(
        initial_capacity: usize,
        load_factor: f32,
    ) -> Result<Self, TableError> {
        Self::with_config(TableConfig::new(initial_capacity, load_factor))
    }

    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        let params = config.validate()?;
        log::debug!(
            "hash table: capacity {} (requested {}), load factor {}, stride {}",
            params.capacity,
            config.initial_capacity,
            params.load_factor,
            params.stride
        );
        Ok(Self::from_params(params))
    }

    fn from_params(params: Params) -> Self {
        Self {
            slots: Vec::new(),
            size: 0,
            capacity: params.capacity,
            threshold: threshold_for(params.capacity, params.load_factor),
            load_factor: params.load_factor,
            stride: params.stride,
        }
    }

    /// Number of live entries.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Same as [`size`](Self::size).
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Growth is triggered once `size` exceeds this.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Walk `key`'s probe sequence. Non-matching entries and tombstones are
    /// skipped; the first tombstone is remembered as the insert position.
    fn walk<Q>(&self, hash: i64, key: &Q) -> Walk
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut reusable = None;
        for index in ProbeSeq::new(hash, self.stride, self.capacity) {
            match &self.slots[index] {
                Slot::Empty => return Walk::Vacant(reusable.unwrap_or(index)),
                Slot::Tombstone => {
                    reusable.get_or_insert(index);
                }
                Slot::Occupied(k, _) if k.borrow() == key => return Walk::Found(index),
                Slot::Occupied(..) => {}
            }
        }
        Walk::Exhausted
    }

    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if self.slots.is_empty() {
            return None;
        }
        match self.walk(structural_hash(key), key) {
            Walk::Found(index) => Some(index),
            Walk::Vacant(_) | Walk::Exhausted => None,
        }
    }

    /// Insert or update. Returns the previous value for `key`, if any.
    ///
    /// # Panics
    ///
    /// If no empty slot is reachable on `key`'s probe sequence
    /// ([`TableError::CapacityExhausted`]). Use [`try_put`](Self::try_put) to
    /// get the error instead.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.try_put(key, value) {
            Ok(previous) => previous,
            Err(e) => panic!("{e}"),
        }
    }

    /// Like [`put`](Self::put), but reports an exhausted probe walk as an
    /// error. The table's contents are unspecified after that error.
    pub fn try_put(&mut self, key: K, value: V) -> Result<Option<V>, TableError> {
        if self.slots.is_empty() {
            self.slots = empty_slots(self.capacity);
        }
        match self.walk(structural_hash(&key), &key) {
            Walk::Found(index) => Ok(self.slots[index].replace_value(value)),
            Walk::Vacant(index) => {
                self.slots[index] = Slot::Occupied(key, value);
                self.size += 1;
                if self.size > self.threshold {
                    self.resize()?;
                }
                Ok(None)
            }
            Walk::Exhausted => {
                log::error!(
                    "probe walk exhausted: capacity {}, size {}, stride {}",
                    self.capacity,
                    self.size,
                    self.stride
                );
                Err(TableError::CapacityExhausted {
                    capacity: self.capacity,
                })
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.find(key)?;
        self.slots[index].value()
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.find(key)?;
        self.slots[index].value_mut()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(key).is_some()
    }

    /// Remove `key`, leaving a tombstone in its slot. Absent keys are a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.find(key)?;
        let removed = mem::replace(&mut self.slots[index], Slot::Tombstone);
        self.size -= 1;
        removed.into_value()
    }

    /// Double the slot array and reinsert live entries in old slot order.
    ///
    /// The new threshold is computed from the capacity *before* doubling and
    /// the doubled capacity is not clamped. Reinsertion goes through
    /// `try_put`, so it may cross the new threshold and grow again.
    fn resize(&mut self) -> Result<(), TableError> {
        let old_capacity = self.capacity;
        let live = self.size;
        self.capacity = old_capacity * 2;
        self.threshold = threshold_for(old_capacity, self.load_factor);
        self.size = 0;
        let old_slots = mem::replace(&mut self.slots, empty_slots(self.capacity));
        log::trace!(
            "resize: capacity {} -> {}, threshold {}, reinserting {} entries",
            old_capacity,
            self.capacity,
            self.threshold,
            live
        );

        for slot in old_slots {
            if let Slot::Occupied(key, value) = slot {
                self.try_put(key, value)?;
            }
        }
        debug_assert_eq!(self.size, live);
        Ok(())
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for HashTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("size", &self.size)
            .field("capacity", &self.capacity)
            .field("threshold", &self.threshold)
            .field("load_factor", &self.load_factor)
            .field("stride", &self.stride)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    /// Slot index currently holding `key`.
    pub(crate) fn slot_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(key)
    }

    pub(crate) fn tombstones(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Tombstone))
            .count()
    }

    pub(crate) fn has_empty_slot(&self) -> bool {
        self.slots.iter().any(|s| matches!(s, Slot::Empty))
    }

    pub(crate) fn is_allocated(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Panics unless `size` matches the occupied slots and every occupied
    /// key is found by its own probe walk at its own slot.
    pub(crate) fn assert_invariants(&self) {
        assert!(self.capacity > 0);
        if self.slots.is_empty() {
            assert_eq!(self.size, 0);
            return;
        }
        assert_eq!(self.slots.len(), self.capacity);
        let mut occupied = 0;
        for (index, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied(k, _) = slot {
                occupied += 1;
                assert_eq!(
                    self.walk(structural_hash(k), k),
                    Walk::Found(index),
                    "occupied slot {index} unreachable from its key's probe sequence"
                );
            }
        }
        assert_eq!(occupied, self.size);
    }
}
