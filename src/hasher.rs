//! Default structural hash: 64-bit FNV-1a over the bytes `Hash` feeds in.
//!
//! Deterministic across runs and instances, so equal keys hash identically
//! everywhere and probe positions are reproducible.

use core::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};

/// Fowler–Noll–Vo (FNV-1a) hasher.
#[derive(Debug, Copy, Clone)]
pub struct FnvHasher {
    hash: u64,
}

impl FnvHasher {
    const PRIME: u64 = 0x0000_0100_0000_01B3;
    const OFFSET_BASIS: u64 = 0xCBF2_9CE4_8422_2325;

    pub const fn new() -> Self {
        Self {
            hash: Self::OFFSET_BASIS,
        }
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.hash ^= u64::from(byte);
            self.hash = self.hash.wrapping_mul(Self::PRIME);
        }
    }
}

pub type FnvBuildHasher = BuildHasherDefault<FnvHasher>;

/// Signed structural hash of `key`. The sign bit is kept: probe positions
/// are taken with a floor modulus, so negative hashes are ordinary input.
#[inline]
pub fn structural_hash<Q>(key: &Q) -> i64
where
    Q: ?Sized + Hash,
{
    FnvBuildHasher::default().hash_one(key) as i64
}
