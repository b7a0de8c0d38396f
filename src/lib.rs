//! stride-hashtable: a single-threaded open-addressing hash table with
//! fixed-stride probing, lazy tombstone deletion and doubling growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, predictable associative container whose probe positions
//!   are fully determined by the key, the stride and the capacity.
//! - Pieces:
//!   - `hasher`: deterministic FNV-1a structural hash, taken as signed `i64`.
//!   - `probe`: the probe sequence `floor_mod(hash + stride * i, capacity)`.
//!   - `config`: construction parameters, defaults and validation.
//!   - `table`: `HashTable<K, V>`, the slot array and the put/get/remove
//!     walks plus growth.
//!
//! Slots
//! - Each slot is Empty, Occupied(key, value) or Tombstone.
//! - A walk stops at the first Empty slot. Tombstones and occupied slots
//!   with other keys are stepped over; the first tombstone seen is where a
//!   new key is inserted.
//! - Removing turns the slot into a tombstone and drops nothing else.
//!   Tombstones only disappear when the table grows.
//!
//! Growth
//! - When `size` exceeds `threshold`, capacity doubles and live entries are
//!   reinserted in old slot order through the ordinary insert path.
//! - The new threshold is `floor(old_capacity * load_factor)`, i.e. it lags
//!   one doubling behind. The first growth of a table therefore re-triggers
//!   once during reinsertion.
//! - Doubling is not clamped to `MAXIMUM_CAPACITY`; only the requested
//!   initial capacity is.
//!
//! Failure boundaries
//! - Construction rejects a zero capacity, a load factor that is not
//!   positive (or NaN) and a zero stride.
//! - A walk is bounded to `capacity + 1` probes. When a stride shares a
//!   factor with the capacity, or every empty slot has become a tombstone,
//!   an insert can fail to find a place: `put` panics with
//!   `TableError::CapacityExhausted`, `try_put` returns it. Lookups and
//!   removals treat the same situation as "absent".
//!
//! Notes and non-goals
//! - Single-threaded; no interior mutability.
//! - No iteration, no shrinking, no pluggable hasher, no persistence.
//! - Slots are allocated on the first insert.

mod config;
mod error;
pub mod hasher;
mod probe;
mod table;
mod table_proptest;

// Public surface
pub use config::{
    TableConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR, DEFAULT_STRIDE, MAXIMUM_CAPACITY,
};
pub use error::{InvalidArgument, TableError};
pub use table::HashTable;
