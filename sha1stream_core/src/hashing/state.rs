//! Incremental SHA-1 state

use super::compress::{INITIAL_REGISTERS, compress};
use super::counter::BitCounter;
use super::{BLOCK_LEN, Digest};
use crate::{Result, error::StateError};
use std::io;

/// Offset of the 64-bit length field inside the final block
const LENGTH_OFFSET: usize = BLOCK_LEN - 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Absorbing,
    Finished,
}

/// Streaming SHA-1 engine.
///
/// Feed input with [`update`](Self::update) in chunks of any size, call
/// [`finish`](Self::finish) once, then read the digest with
/// [`result`](Self::result) as often as needed. Memory use is one 64-byte
/// block regardless of input length.
///
/// Calls out of order are rejected with [`StateError`] and leave the state
/// untouched; [`reset`](Self::reset) starts a new message.
///
/// ```
/// use sha1stream_core::hashing::Sha1State;
///
/// let mut state = Sha1State::new();
/// state.update(b"ab")?;
/// state.update(b"c")?;
/// state.finish()?;
/// assert_eq!(
///     state.result()?.to_hex(),
///     "a9993e364706816aba3e25717850c26c9cd0d89d"
/// );
/// # Ok::<(), sha1stream_core::Error>(())
/// ```
#[derive(Clone)]
pub struct Sha1State {
    buffer: [u8; BLOCK_LEN],
    fill: usize,
    bit_count: BitCounter,
    registers: [u32; 5],
    phase: Phase,
}

impl Sha1State {
    /// Fresh state with the standard initial registers
    pub fn new() -> Self {
        Self {
            buffer: [0; BLOCK_LEN],
            fill: 0,
            bit_count: BitCounter::default(),
            registers: INITIAL_REGISTERS,
            phase: Phase::Absorbing,
        }
    }

    /// Return to the freshly initialized state, from either phase
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Hash `data` in one go
    pub fn digest(data: impl AsRef<[u8]>) -> Digest {
        let mut state = Self::new();
        state.absorb(data.as_ref());
        state.pad_and_close();
        Digest::from_registers(&state.registers)
    }

    /// Consume the next chunk of the message. Zero-length chunks are no-ops.
    pub fn update(&mut self, chunk: &[u8]) -> Result<()> {
        self.ensure_absorbing("update")?;
        self.absorb(chunk);
        Ok(())
    }

    /// Apply the final padding and run the last compression round(s)
    pub fn finish(&mut self) -> Result<()> {
        self.ensure_absorbing("finish")?;
        self.pad_and_close();
        log::trace!("SHA-1 finished after {} bits", self.bit_count.as_u64());
        Ok(())
    }

    /// The finished digest. Repeatable; performs no further processing.
    pub fn result(&self) -> Result<Digest> {
        match self.phase {
            Phase::Finished => Ok(Digest::from_registers(&self.registers)),
            Phase::Absorbing => Err(StateError::NotFinished.into()),
        }
    }

    /// Whether [`finish`](Self::finish) has run
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Total message bits consumed so far
    pub fn bit_count(&self) -> u64 {
        self.bit_count.as_u64()
    }

    /// Bytes waiting in the block buffer, always below 64 between calls
    pub fn buffered_len(&self) -> usize {
        self.fill
    }

    fn ensure_absorbing(&self, operation: &'static str) -> Result<()> {
        match self.phase {
            Phase::Absorbing => Ok(()),
            Phase::Finished => Err(StateError::AlreadyFinished { operation }.into()),
        }
    }

    fn absorb(&mut self, chunk: &[u8]) {
        self.bit_count.add_bytes(chunk.len());
        let mut input = chunk;

        if self.fill > 0 {
            let take = (BLOCK_LEN - self.fill).min(input.len());
            self.buffer[self.fill..self.fill + take].copy_from_slice(&input[..take]);
            self.fill += take;
            input = &input[take..];

            if self.fill < BLOCK_LEN {
                return;
            }
            compress(&mut self.registers, &self.buffer);
            self.fill = 0;
        }

        // Whole blocks are compressed straight from the input
        let (blocks, tail) = input.as_chunks::<BLOCK_LEN>();
        for block in blocks {
            compress(&mut self.registers, block);
        }

        self.buffer[..tail.len()].copy_from_slice(tail);
        self.fill = tail.len();
    }

    fn pad_and_close(&mut self) {
        let length = self.bit_count.to_be_bytes();

        self.buffer[self.fill] = 0x80;
        self.fill += 1;

        // No room left for the length field: flush and start a zeroed block
        if self.fill > LENGTH_OFFSET {
            self.buffer[self.fill..].fill(0);
            compress(&mut self.registers, &self.buffer);
            self.fill = 0;
        }

        self.buffer[self.fill..LENGTH_OFFSET].fill(0);
        self.buffer[LENGTH_OFFSET..].copy_from_slice(&length);
        compress(&mut self.registers, &self.buffer);

        self.fill = 0;
        self.phase = Phase::Finished;
    }
}

impl Default for Sha1State {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Sha1State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha1State")
            .field("fill", &self.fill)
            .field("bit_count", &self.bit_count.as_u64())
            .field("phase", &self.phase)
            .finish()
    }
}

/// Lets `std::io::copy` drive the engine
impl io::Write for Sha1State {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::Write;

    const EMPTY: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";
    const ABC: &str = "a9993e364706816aba3e25717850c26c9cd0d89d";

    fn finished(data: &[u8]) -> Sha1State {
        let mut state = Sha1State::new();
        state.update(data).unwrap();
        state.finish().unwrap();
        state
    }

    #[test]
    fn test_new_state() {
        let state = Sha1State::new();
        assert_eq!(state.buffered_len(), 0);
        assert_eq!(state.bit_count(), 0);
        assert!(!state.is_finished());
        assert_eq!(state.registers, INITIAL_REGISTERS);
    }

    #[test]
    fn test_empty_message() {
        let mut state = Sha1State::new();
        state.finish().unwrap();
        assert_eq!(state.result().unwrap().to_hex(), EMPTY);

        assert_eq!(finished(b"").result().unwrap().to_hex(), EMPTY);
    }

    #[test]
    fn test_fill_stays_below_block_len() {
        let mut state = Sha1State::new();
        for len in [1, 62, 1, 64, 0, 127, 3] {
            state.update(&vec![0xAB; len]).unwrap();
            assert!(state.buffered_len() < BLOCK_LEN);
        }
        // 1 + 62 + 1 + 64 + 127 + 3 = 258 = 4 * 64 + 2
        assert_eq!(state.buffered_len(), 2);
        assert_eq!(state.bit_count(), 258 * 8);
    }

    #[test]
    fn test_exact_block_leaves_empty_buffer() {
        let mut state = Sha1State::new();
        state.update(&[0u8; 40]).unwrap();
        state.update(&[0u8; 24]).unwrap();
        assert_eq!(state.buffered_len(), 0);
    }

    #[test]
    fn test_result_is_repeatable() {
        let state = finished(b"abc");
        let first = state.result().unwrap();
        let second = state.result().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_hex(), ABC);
    }

    #[test]
    fn test_update_after_finish_is_rejected() {
        let mut state = finished(b"abc");
        let error = state.update(b"more").unwrap_err();

        assert!(matches!(
            error,
            Error::State(StateError::AlreadyFinished { operation: "update" })
        ));
        // Rejected call leaves the digest intact
        assert_eq!(state.result().unwrap().to_hex(), ABC);
        assert_eq!(state.bit_count(), 24);
    }

    #[test]
    fn test_finish_twice_is_rejected() {
        let mut state = finished(b"abc");
        let error = state.finish().unwrap_err();

        assert!(matches!(
            error,
            Error::State(StateError::AlreadyFinished { operation: "finish" })
        ));
        assert_eq!(state.result().unwrap().to_hex(), ABC);
    }

    #[test]
    fn test_result_before_finish_is_rejected() {
        let mut state = Sha1State::new();
        state.update(b"abc").unwrap();

        assert!(matches!(
            state.result(),
            Err(Error::State(StateError::NotFinished))
        ));
        // Still usable afterwards
        state.finish().unwrap();
        assert_eq!(state.result().unwrap().to_hex(), ABC);
    }

    #[test]
    fn test_reset_starts_a_new_message() {
        let mut state = finished(b"something else entirely");
        state.reset();

        assert!(!state.is_finished());
        assert_eq!(state.bit_count(), 0);
        state.update(b"abc").unwrap();
        state.finish().unwrap();
        assert_eq!(state.result().unwrap().to_hex(), ABC);
    }

    #[test]
    fn test_digest_shortcut() {
        assert_eq!(Sha1State::digest(b"abc").to_hex(), ABC);
        assert_eq!(Sha1State::digest("").to_hex(), EMPTY);
    }

    #[test]
    fn test_io_write() {
        let mut state = Sha1State::new();
        let mut reader: &[u8] = b"abc";
        let copied = std::io::copy(&mut reader, &mut state).unwrap();
        assert_eq!(copied, 3);

        state.finish().unwrap();
        assert_eq!(state.result().unwrap().to_hex(), ABC);

        let error = state.write(b"x").unwrap_err();
        assert_eq!(error.kind(), std::io::ErrorKind::Other);
    }

    #[test]
    fn test_clone_shares_prefix() {
        let mut prefix = Sha1State::new();
        prefix.update(b"ab").unwrap();

        let mut branch = prefix.clone();
        branch.update(b"c").unwrap();
        branch.finish().unwrap();
        assert_eq!(branch.result().unwrap().to_hex(), ABC);

        prefix.update(b"c").unwrap();
        prefix.finish().unwrap();
        assert_eq!(prefix.result().unwrap(), branch.result().unwrap());
    }
}
