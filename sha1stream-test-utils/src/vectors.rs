//! Known-answer SHA-1 vectors
//!
//! Digests were produced with an independent SHA-1 implementation.

use sha1stream_core::Digest;

/// One input with its expected digest
#[derive(Debug, Clone)]
pub struct KnownVector {
    pub name: String,
    pub input: Vec<u8>,
    pub digest: &'static str,
}

impl KnownVector {
    fn new(name: impl Into<String>, input: impl Into<Vec<u8>>, digest: &'static str) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            digest,
        }
    }

    /// Expected digest in parsed form
    pub fn expected(&self) -> Digest {
        self.digest
            .parse()
            .unwrap_or_else(|e| panic!("vector '{}' has a malformed digest: {e}", self.name))
    }
}

/// Published test vectors
pub fn known_vectors() -> Vec<KnownVector> {
    vec![
        KnownVector::new("empty", b"", "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
        KnownVector::new("abc", b"abc", "a9993e364706816aba3e25717850c26c9cd0d89d"),
        KnownVector::new(
            "quick brown fox",
            b"The quick brown fox jumps over the lazy dog",
            "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12",
        ),
        KnownVector::new(
            "448-bit message",
            b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
            "84983e441c3bd26ebaae4aa1f95129e5e54670f1",
        ),
        KnownVector::new(
            "896-bit message",
            b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrsnopqrstnopqrstu",
            "bd81afdbfa471a91515814b1d08f46f73a45e729",
        ),
        KnownVector::new(
            "test content",
            b"test content",
            "1eebdf4fdc9fc7bf283031b93f9aef3338de9052",
        ),
    ]
}

/// Runs of `a` whose lengths sit on either side of the padding boundaries
pub fn boundary_vectors() -> Vec<KnownVector> {
    [
        (1, "86f7e437faa5a7fce15d1ddcb9eaeaea377667b8"),
        (55, "c1c8bbdc22796e28c0e15163d20899b65621d65a"),
        (56, "c2db330f6083854c99d4b5bfb6e8f29f201be699"),
        (57, "f08f24908d682555111be7ff6f004e78283d989a"),
        (63, "03f09f5b158a7a8cdad920bddc29b81c18a551f5"),
        (64, "0098ba824b5c16427bd7a1122a5a442a25ec644d"),
        (65, "11655326c708d70319be2610e8a57d9a5b959d3b"),
        (119, "ee971065aaa017e0632a8ca6c77bb3bf8b1dfc56"),
        (120, "f34c1488385346a55709ba056ddd08280dd4c6d6"),
        (121, "fa6b5a6f8ac27182f838fe7841ec6d2aef3ade29"),
    ]
    .into_iter()
    .map(|(len, digest)| KnownVector::new(format!("{len} x 'a'"), vec![b'a'; len], digest))
    .collect()
}
