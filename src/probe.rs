//! Fixed-stride probe sequence.

/// Slot indices visited for one hash: step `i` lands on
/// `floor_mod(hash + stride * i, capacity)`.
///
/// Yields steps `0..=capacity`. Step `capacity + 1` lands where step 1 did
/// (`stride * capacity ≡ 0`), so a walk that has not terminated by then
/// never will.
#[derive(Debug, Clone)]
pub(crate) struct ProbeSeq {
    hash: i128,
    stride: i128,
    capacity: usize,
    step: usize,
}

impl ProbeSeq {
    pub(crate) fn new(hash: i64, stride: usize, capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            hash: i128::from(hash),
            stride: stride as i128,
            capacity,
            step: 0,
        }
    }
}

/// `floor_mod(hash + stride * step, capacity)`; always in `[0, capacity)`.
#[inline]
fn probe_index(hash: i128, stride: i128, step: usize, capacity: usize) -> usize {
    (hash + stride * step as i128).rem_euclid(capacity as i128) as usize
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.step > self.capacity {
            return None;
        }
        let index = probe_index(self.hash, self.stride, self.step, self.capacity);
        self.step += 1;
        Some(index)
    }
}
