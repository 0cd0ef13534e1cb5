//! SHA-1 compression function
//!
//! Folds one 64-byte block into the five running registers. Message words
//! are decoded big-endian explicitly, so the result does not depend on host
//! byte order. The 80-word schedule is kept in a rolling 16-word window.

use super::BLOCK_LEN;

/// Initial register values h0..h4
pub(crate) const INITIAL_REGISTERS: [u32; 5] =
    [0x6745_2301, 0xEFCD_AB89, 0x98BA_DCFE, 0x1032_5476, 0xC3D2_E1F0];

const ROUND1_K: u32 = 0x5A82_7999;
const ROUND2_K: u32 = 0x6ED9_EBA1;
const ROUND3_K: u32 = 0x8F1B_BCDC;
const ROUND4_K: u32 = 0xCA62_C1D6;

#[inline(always)]
fn choose(b: u32, c: u32, d: u32) -> u32 {
    (b & c) | (!b & d)
}

#[inline(always)]
fn parity(b: u32, c: u32, d: u32) -> u32 {
    b ^ c ^ d
}

#[inline(always)]
fn majority(b: u32, c: u32, d: u32) -> u32 {
    (b & c) | (b & d) | (c & d)
}

/// Decode a block into sixteen big-endian words
#[inline]
fn load_words(block: &[u8; BLOCK_LEN]) -> [u32; 16] {
    let mut words = [0u32; 16];
    for (word, bytes) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    words
}

/// Run the 80 rounds over `block` and add the result into `registers`
pub(crate) fn compress(registers: &mut [u32; 5], block: &[u8; BLOCK_LEN]) {
    let mut w = load_words(block);
    let [mut a, mut b, mut c, mut d, mut e] = *registers;

    for t in 0..80 {
        let s = t & 15;
        if t >= 16 {
            // w[t-3] ^ w[t-8] ^ w[t-14] ^ w[t-16], indices taken mod 16
            w[s] = (w[(s + 13) & 15] ^ w[(s + 8) & 15] ^ w[(s + 2) & 15] ^ w[s]).rotate_left(1);
        }

        let (f, k) = match t {
            0..=19 => (choose(b, c, d), ROUND1_K),
            20..=39 => (parity(b, c, d), ROUND2_K),
            40..=59 => (majority(b, c, d), ROUND3_K),
            _ => (parity(b, c, d), ROUND4_K),
        };

        let temp = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(w[s])
            .wrapping_add(k);

        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    for (register, value) in registers.iter_mut().zip([a, b, c, d, e]) {
        *register = register.wrapping_add(value);
    }
}
