//! Error types for table construction and insertion.

/// A construction parameter that was rejected.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidArgument {
    #[error("illegal initial capacity: {0}")]
    Capacity(usize),
    #[error("illegal load factor: {0}")]
    LoadFactor(f32),
    #[error("illegal probe stride: {0}")]
    Stride(usize),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    /// The probe walk ran past `capacity` steps without meeting an empty
    /// slot. The table is degenerate; its contents are unspecified after this.
    #[error("no free slot reachable: probe walk exceeded capacity {capacity}")]
    CapacityExhausted { capacity: usize },
}
