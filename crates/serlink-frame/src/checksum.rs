//! Streaming Fletcher-16 checksum.
//!
//! Two running sums accumulated modulo 255, with a final remap of zero
//! sums to 255 so the emitted bytes land in `[1, 255]`. The remap matches
//! the output range of the optimized table-free implementations commonly
//! found in firmware; only this mod-255 streaming form is implemented.

/// Two-accumulator Fletcher-16 state.
///
/// Construct with [`Fletcher16::new`] for a fresh computation, or with
/// [`Fletcher16::resume`] to continue from checksum bytes produced by an
/// earlier [`finish`](Fletcher16::finish). Resuming from the remapped
/// bytes is exact: 255 and 0 are congruent modulo 255, so a split
/// computation always equals the checksum of the concatenated input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fletcher16 {
    sum1: u16,
    sum2: u16,
}

impl Fletcher16 {
    /// Start a fresh checksum (both accumulators at zero).
    pub fn new() -> Self {
        Self { sum1: 0, sum2: 0 }
    }

    /// Continue a checksum from previously emitted `[check_a, check_b]`.
    pub fn resume(check: [u8; 2]) -> Self {
        Self {
            sum1: u16::from(check[0]),
            sum2: u16::from(check[1]),
        }
    }

    /// Fold a slice of bytes into the running sums.
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.sum1 = (self.sum1 + u16::from(byte)) % 255;
            self.sum2 = (self.sum2 + self.sum1) % 255;
        }
    }

    /// Emit the checksum bytes, remapping zero sums to 255.
    pub fn finish(&self) -> [u8; 2] {
        let a = if self.sum1 == 0 { 0xFF } else { self.sum1 as u8 };
        let b = if self.sum2 == 0 { 0xFF } else { self.sum2 as u8 };
        [a, b]
    }
}

impl Default for Fletcher16 {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot Fletcher-16 over a byte slice.
pub fn fletcher16(data: &[u8]) -> [u8; 2] {
    let mut state = Fletcher16::new();
    state.update(data);
    state.finish()
}

/// Verify a buffer whose final two bytes are its own checksum.
///
/// Returns false for buffers shorter than the checksum trailer.
pub(crate) fn verify_trailer(buf: &[u8]) -> bool {
    let Some(body_len) = buf.len().checked_sub(2) else {
        return false;
    };
    fletcher16(&buf[..body_len]) == buf[body_len..]
}
