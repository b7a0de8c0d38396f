//! Construction parameters for [`HashTable`](crate::HashTable).

use crate::error::InvalidArgument;

/// Capacity used by [`HashTable::new`](crate::HashTable::new).
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;
/// Load factor used when none is given.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.5;
/// Requested capacities above this are clamped down to it.
pub const MAXIMUM_CAPACITY: usize = 1 << 30;
/// Distance between consecutive probes.
pub const DEFAULT_STRIDE: usize = 13;

/// Parameters a table is built from. Fixed for the lifetime of the table,
/// except that capacity grows on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableConfig {
    pub initial_capacity: usize,
    pub load_factor: f32,
    pub stride: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            stride: DEFAULT_STRIDE,
        }
    }
}

/// Validated parameters: capacity is clamped, load factor and stride checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Params {
    pub(crate) capacity: usize,
    pub(crate) load_factor: f32,
    pub(crate) stride: usize,
}

impl TableConfig {
    pub fn new(initial_capacity: usize, load_factor: f32) -> Self {
        Self {
            initial_capacity,
            load_factor,
            ..Self::default()
        }
    }

    /// Replace the probe stride. A stride sharing a factor with the capacity
    /// leaves some slots unreachable from a given home slot.
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub(crate) fn validate(self) -> Result<Params, InvalidArgument> {
        if self.initial_capacity == 0 {
            return Err(InvalidArgument::Capacity(self.initial_capacity));
        }
        if self.load_factor.is_nan() || self.load_factor <= 0.0 {
            return Err(InvalidArgument::LoadFactor(self.load_factor));
        }
        if self.stride == 0 {
            return Err(InvalidArgument::Stride(self.stride));
        }
        Ok(Params {
            capacity: self.initial_capacity.min(MAXIMUM_CAPACITY),
            load_factor: self.load_factor,
            stride: self.stride,
        })
    }
}

/// `floor(capacity * load_factor)`, saturating.
pub(crate) fn threshold_for(capacity: usize, load_factor: f32) -> usize {
    (capacity as f32 * load_factor) as usize
}
