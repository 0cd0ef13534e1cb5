//! SHA-1 streaming engine
//!
//! [`Sha1State`] consumes a message in chunks of any size and alignment,
//! buffering at most one partial 64-byte block, and produces a 20-byte
//! [`Digest`] once the message is finished.

mod compress;
mod counter;
mod digest;
mod state;

pub use digest::Digest;
pub use state::Sha1State;

/// Size of one compression block in bytes
pub const BLOCK_LEN: usize = 64;

/// Size of a SHA-1 digest in bytes
pub const DIGEST_LEN: usize = 20;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Test SHA-1 with known test vectors
    #[test]
    fn test_sha1_known_vectors() {
        let test_cases: Vec<(&[u8], &str)> = vec![
            (b"", "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
            (b"abc", "a9993e364706816aba3e25717850c26c9cd0d89d"),
            (
                b"The quick brown fox jumps over the lazy dog",
                "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12",
            ),
            (
                b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
                "84983e441c3bd26ebaae4aa1f95129e5e54670f1",
            ),
        ];

        for (input, expected) in test_cases {
            assert_eq!(
                Sha1State::digest(input).to_hex(),
                expected,
                "SHA-1 mismatch for input: {:?}",
                String::from_utf8_lossy(input)
            );
        }
    }

    /// Lengths around the padding boundaries: 55 fits the length field in the
    /// same block, 56 and 57 force an extra block, 64 is exactly one block.
    #[test]
    fn test_padding_boundaries() {
        let cases = [
            (55, "c1c8bbdc22796e28c0e15163d20899b65621d65a"),
            (56, "c2db330f6083854c99d4b5bfb6e8f29f201be699"),
            (57, "f08f24908d682555111be7ff6f004e78283d989a"),
            (63, "03f09f5b158a7a8cdad920bddc29b81c18a551f5"),
            (64, "0098ba824b5c16427bd7a1122a5a442a25ec644d"),
            (65, "11655326c708d70319be2610e8a57d9a5b959d3b"),
            (119, "ee971065aaa017e0632a8ca6c77bb3bf8b1dfc56"),
            (120, "f34c1488385346a55709ba056ddd08280dd4c6d6"),
            (121, "fa6b5a6f8ac27182f838fe7841ec6d2aef3ade29"),
        ];

        for (len, expected) in cases {
            let data = vec![b'a'; len];
            assert_eq!(
                Sha1State::digest(&data).to_hex(),
                expected,
                "SHA-1 mismatch for {len} bytes of 'a'"
            );
        }
    }

    #[test]
    fn test_million_a_byte_at_a_time() {
        let mut state = Sha1State::new();
        for _ in 0..1_000_000 {
            state.update(b"a").unwrap();
        }
        state.finish().unwrap();

        assert_eq!(
            state.result().unwrap().to_hex(),
            "34aa973cd4c4daa4f61eeb2bdbad27316534016f"
        );
    }

    #[test]
    fn test_large_input_single_call_matches_byte_updates() {
        let data: Vec<u8> = (0..3 * 1024 * 1024 + 17).map(|i| (i % 251) as u8).collect();

        let whole = Sha1State::digest(&data);

        let mut state = Sha1State::new();
        for byte in &data {
            state.update(std::slice::from_ref(byte)).unwrap();
        }
        state.finish().unwrap();

        assert_eq!(state.result().unwrap(), whole);
        assert_eq!(whole.to_hex(), "da6de52b0377c05cb5717f7517861dc0eb7ba169");
    }

    #[test]
    fn test_zero_length_chunks_are_no_ops() {
        let mut state = Sha1State::new();
        state.update(&[]).unwrap();
        state.update(b"a").unwrap();
        state.update(&[]).unwrap();
        state.update(b"bc").unwrap();
        state.update(&[]).unwrap();
        state.finish().unwrap();

        assert_eq!(state.bit_count(), 24);
        assert_eq!(
            state.result().unwrap().to_hex(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    proptest! {
        #[test]
        fn test_chunking_invariance(
            data in proptest::collection::vec(any::<u8>(), 0..600),
            cuts in proptest::collection::vec(any::<prop::sample::Index>(), 0..12),
        ) {
            let expected = Sha1State::digest(&data);

            // Split points may repeat, which yields zero-length chunks
            let mut points: Vec<usize> = cuts.iter().map(|c| c.index(data.len() + 1)).collect();
            points.sort_unstable();

            let mut state = Sha1State::new();
            let mut start = 0;
            for point in points {
                state.update(&data[start..point]).unwrap();
                start = point;
            }
            state.update(&data[start..]).unwrap();
            state.finish().unwrap();

            prop_assert_eq!(state.result().unwrap(), expected);
            prop_assert_eq!(state.bit_count(), data.len() as u64 * 8);
        }
    }

    proptest! {
        #[test]
        fn test_hash_determinism(data: Vec<u8>) {
            let first = Sha1State::digest(&data);
            let second = Sha1State::digest(&data);

            prop_assert_eq!(first, second);
            prop_assert_eq!(first.to_hex().len(), DIGEST_LEN * 2);
            prop_assert!(first.to_hex().chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
