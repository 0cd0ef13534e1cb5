//! sha1stream core library
//!
//! Incremental SHA-1 hashing over byte streams of unbounded length, plus a
//! paged file driver that feeds the engine from disk with constant memory.

pub mod buffer;
pub mod error;
pub mod file_io;
pub mod hashing;
pub mod progress;

// Re-export main types
pub use buffer::{DEFAULT_BUFFER_SIZE, DEFAULT_MEMORY_LIMIT, MIN_BUFFER_SIZE, MemoryTracker};
pub use error::{Error, Result};
pub use file_io::{FileProcessingResult, FileProcessor, hash_bytes};
pub use hashing::{BLOCK_LEN, DIGEST_LEN, Digest, Sha1State};
pub use progress::{NullProvider, ProgressProvider, ProgressUpdate, SharedProvider};

use error::ValidationError;

/// Page and memory settings for the file driver
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    /// Bytes requested from the chunk source per read
    pub buffer_size: usize,
    /// Upper bound on page buffer memory
    pub max_memory_usage: usize,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_memory_usage: DEFAULT_MEMORY_LIMIT,
        }
    }
}

impl HashingConfig {
    /// Create a test configuration
    pub fn test() -> Self {
        Self {
            buffer_size: 1024,                 // 1KB pages for faster tests
            max_memory_usage: 4 * 1024 * 1024, // 4MB for tests
        }
    }

    /// Check that one page fits the memory limit and holds at least a block
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size < MIN_BUFFER_SIZE {
            return Err(Error::Validation(ValidationError::invalid_configuration(
                &format!(
                    "buffer_size must be at least {MIN_BUFFER_SIZE} bytes, got {}",
                    self.buffer_size
                ),
            )));
        }
        if self.buffer_size > self.max_memory_usage {
            return Err(Error::Validation(ValidationError::invalid_configuration(
                &format!(
                    "buffer_size ({}) exceeds max_memory_usage ({})",
                    self.buffer_size, self.max_memory_usage
                ),
            )));
        }
        Ok(())
    }
}
