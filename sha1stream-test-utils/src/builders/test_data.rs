//! Test data builders for creating hashing scenarios

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Shape of the generated bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fill {
    /// `i % modulus` for every offset `i`
    Pattern { modulus: u32 },
    /// A single byte repeated
    Repeat(u8),
    /// Linear congruential sequence from a seed
    Seeded(u32),
}

/// Builder for deterministic byte payloads
#[derive(Debug, Clone)]
pub struct TestDataBuilder {
    len: usize,
    fill: Fill,
}

impl TestDataBuilder {
    /// Create a new builder producing `len` bytes of `i % 256`
    pub fn new(len: usize) -> Self {
        Self {
            len,
            fill: Fill::Pattern { modulus: 256 },
        }
    }

    /// Use `i % modulus` as the byte at offset `i`
    pub fn with_pattern(mut self, modulus: u32) -> Self {
        assert!(
            (1..=256).contains(&modulus),
            "modulus must be in 1..=256, got {modulus}"
        );
        self.fill = Fill::Pattern { modulus };
        self
    }

    /// Repeat one byte
    pub fn with_repeated(mut self, byte: u8) -> Self {
        self.fill = Fill::Repeat(byte);
        self
    }

    /// Pseudo-random bytes that are stable across runs
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.fill = Fill::Seeded(seed);
        self
    }

    /// Build the payload
    pub fn build(&self) -> Vec<u8> {
        match self.fill {
            Fill::Pattern { modulus } => (0..self.len)
                .map(|i| (i as u64 % u64::from(modulus)) as u8)
                .collect(),
            Fill::Repeat(byte) => vec![byte; self.len],
            Fill::Seeded(seed) => {
                let mut state = seed;
                (0..self.len)
                    .map(|_| {
                        state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                        (state >> 24) as u8
                    })
                    .collect()
            }
        }
    }
}

/// Chunk lengths for splitting one payload across several `update` calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    lengths: Vec<usize>,
}

impl ChunkPlan {
    /// Same-sized chunks, the last one possibly shorter
    pub fn fixed(total: usize, chunk: usize) -> Self {
        assert!(chunk > 0, "chunk size must be positive");
        let mut lengths = vec![chunk; total / chunk];
        if total % chunk != 0 {
            lengths.push(total % chunk);
        }
        Self { lengths }
    }

    /// Cycle through `pattern` until `total` bytes are covered.
    /// Zero entries produce empty chunks.
    pub fn cycling(total: usize, pattern: &[usize]) -> Self {
        assert!(
            pattern.iter().any(|&len| len > 0),
            "pattern needs at least one non-zero length"
        );
        let mut lengths = Vec::new();
        let mut covered = 0;
        for &len in pattern.iter().cycle() {
            if covered >= total {
                break;
            }
            let len = len.min(total - covered);
            lengths.push(len);
            covered += len;
        }
        Self { lengths }
    }

    /// Chunk lengths in order
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Split `data` along the plan. Panics if the plan does not cover it.
    pub fn split<'a>(&self, data: &'a [u8]) -> Vec<&'a [u8]> {
        let total: usize = self.lengths.iter().sum();
        assert_eq!(total, data.len(), "chunk plan does not cover the data");

        let mut rest = data;
        self.lengths
            .iter()
            .map(|&len| {
                let (head, tail) = rest.split_at(len);
                rest = tail;
                head
            })
            .collect()
    }
}

/// Builder for files on disk
pub struct TestFileBuilder {
    dir: PathBuf,
}

impl TestFileBuilder {
    /// Create files inside `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Write `contents` to `name` and return its path
    pub fn create_file(&self, name: &str, contents: &[u8]) -> io::Result<PathBuf> {
        let path = self.dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write an empty file
    pub fn create_empty_file(&self, name: &str) -> io::Result<PathBuf> {
        self.create_file(name, &[])
    }

    /// Write a file whose contents come from a [`TestDataBuilder`]
    pub fn create_generated_file(&self, name: &str, data: &TestDataBuilder) -> io::Result<PathBuf> {
        self.create_file(name, &data.build())
    }

    /// Create a subdirectory, useful for not-a-file scenarios
    pub fn create_dir(&self, name: &str) -> io::Result<PathBuf> {
        let path = self.dir.join(name);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// A path inside the directory that does not exist
    pub fn missing_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pattern_data() {
        let data = TestDataBuilder::new(300).with_pattern(251).build();
        assert_eq!(data.len(), 300);
        assert_eq!(data[250], 250);
        assert_eq!(data[251], 0);
    }

    #[test]
    fn test_seeded_data_is_stable() {
        let a = TestDataBuilder::new(1000).with_seed(42).build();
        let b = TestDataBuilder::new(1000).with_seed(42).build();
        let c = TestDataBuilder::new(1000).with_seed(43).build();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_fixed_plan() {
        let plan = ChunkPlan::fixed(10, 4);
        assert_eq!(plan.lengths(), &[4, 4, 2]);
    }

    #[test]
    fn test_cycling_plan_with_empty_chunks() {
        let plan = ChunkPlan::cycling(7, &[0, 3]);
        assert_eq!(plan.lengths(), &[0, 3, 0, 3, 0, 1]);

        let data = [1u8, 2, 3, 4, 5, 6, 7];
        let pieces = plan.split(&data);
        assert_eq!(pieces.concat(), data);
    }

    #[test]
    fn test_file_builder() {
        let dir = TempDir::new().unwrap();
        let builder = TestFileBuilder::new(dir.path());

        let path = builder.create_file("nested/a.bin", b"abc").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"abc");
        assert!(!builder.missing_path("nope").exists());
        assert!(builder.create_dir("sub").unwrap().is_dir());
    }
}
