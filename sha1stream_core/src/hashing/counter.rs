//! Message length bookkeeping

/// Total number of message bits, stored as two 32-bit halves.
///
/// The counter is exact up to 2^64 - 1 bits. Longer messages (2^61 bytes and
/// beyond) wrap modulo 2^64, matching the width of the SHA-1 length field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BitCounter {
    lo: u32,
    hi: u32,
}

impl BitCounter {
    /// Account for `len` more bytes
    pub(crate) fn add_bytes(&mut self, len: usize) {
        let len = len as u64;
        // len * 8 split across the halves: bits above 2^29 bytes go to `hi`
        let bits_lo = (len << 3) as u32;
        let bits_hi = (len >> 29) as u32;

        let (lo, carry) = self.lo.overflowing_add(bits_lo);
        self.lo = lo;
        self.hi = self.hi.wrapping_add(bits_hi).wrapping_add(u32::from(carry));
    }

    pub(crate) fn as_u64(&self) -> u64 {
        (u64::from(self.hi) << 32) | u64::from(self.lo)
    }

    /// Length field as written into the final block: high word first
    pub(crate) fn to_be_bytes(self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[..4].copy_from_slice(&self.hi.to_be_bytes());
        out[4..].copy_from_slice(&self.lo.to_be_bytes());
        out
    }
}
