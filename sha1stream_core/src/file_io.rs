//! File I/O driver for the streaming engine
//!
//! Reads a chunk source one page at a time into a single reusable buffer and
//! feeds every page to a [`Sha1State`]. Memory use is bounded by the page
//! size, never by the input size.

use crate::buffer::MemoryTracker;
use crate::hashing::{Digest, Sha1State};
use crate::progress::{ProgressProvider, ProgressUpdate};
use crate::{Error, HashingConfig, Result, error::IoError};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;

/// Result of hashing one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessingResult {
    pub file_path: PathBuf,
    pub file_size: u64,
    pub digest: Digest,
    pub processing_time: Duration,
}

impl FileProcessingResult {
    /// Average throughput in MiB/s, if any time elapsed
    pub fn throughput_mbps(&self) -> Option<f64> {
        throughput_mbps(self.file_size, self.processing_time)
    }
}

/// File processor that drives the engine from files and readers
#[derive(Debug)]
pub struct FileProcessor {
    config: HashingConfig,
    memory_tracker: MemoryTracker,
}

impl FileProcessor {
    /// Create a new file processor with configuration
    pub fn new(config: HashingConfig) -> Self {
        let memory_tracker = MemoryTracker::new(config.max_memory_usage);
        Self {
            config,
            memory_tracker,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &HashingConfig {
        &self.config
    }

    /// Hash a file, reading `buffer_size` bytes per page until end of file
    pub async fn process_file(
        &self,
        file_path: &Path,
        progress_provider: &dyn ProgressProvider,
    ) -> Result<FileProcessingResult> {
        let start_time = Instant::now();
        self.config.validate()?;

        let metadata = tokio::fs::metadata(file_path)
            .await
            .map_err(|e| open_error(file_path, e))?;
        if metadata.is_dir() {
            return Err(Error::Io(IoError::not_a_file(file_path)));
        }
        let total_bytes = metadata.len();

        let mut file = tokio::fs::File::open(file_path)
            .await
            .map_err(|e| open_error(file_path, e))?;

        log::debug!(
            "Hashing {} ({total_bytes} bytes) with {} byte pages",
            file_path.display(),
            self.config.buffer_size
        );

        let mut buffer = self.memory_tracker.allocate(self.config.buffer_size)?;
        let mut state = Sha1State::new();
        let mut bytes_processed = 0u64;

        let outcome = loop {
            let read = match file.read(&mut buffer).await {
                Ok(0) => break Ok(()),
                Ok(read) => read,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => break Err(Error::Io(IoError::from_std(e).with_path(file_path))),
            };

            if let Err(e) = state.update(&buffer[..read]) {
                break Err(e);
            }
            bytes_processed += read as u64;
            log::trace!("Read {read} byte page, {bytes_processed} bytes total");

            progress_provider.report(ProgressUpdate::FileProgress {
                path: file_path.to_path_buf(),
                bytes_processed,
                total_bytes,
                throughput_mbps: throughput_mbps(bytes_processed, start_time.elapsed()),
                buffer_size: Some(self.config.buffer_size),
            });
        };

        self.memory_tracker.release(buffer);
        outcome?;

        state.finish()?;
        let digest = state.result()?;

        Ok(FileProcessingResult {
            file_path: file_path.to_path_buf(),
            file_size: bytes_processed,
            digest,
            processing_time: start_time.elapsed(),
        })
    }

    /// Hash everything a reader yields. Returns the digest and the byte count.
    pub fn process_reader<R: Read>(&self, mut reader: R) -> Result<(Digest, u64)> {
        self.config.validate()?;

        let mut buffer = self.memory_tracker.allocate(self.config.buffer_size)?;
        let mut state = Sha1State::new();
        let mut bytes_processed = 0u64;

        let outcome = loop {
            let read = match reader.read(&mut buffer) {
                Ok(0) => break Ok(()),
                Ok(read) => read,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => break Err(Error::from(e)),
            };

            if let Err(e) = state.update(&buffer[..read]) {
                break Err(e);
            }
            bytes_processed += read as u64;
        };

        self.memory_tracker.release(buffer);
        outcome?;

        state.finish()?;
        Ok((state.result()?, bytes_processed))
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new(HashingConfig::default())
    }
}

/// Digest of an in-memory buffer
pub fn hash_bytes(data: &[u8]) -> Digest {
    Sha1State::digest(data)
}

fn open_error(path: &Path, source: std::io::Error) -> Error {
    let error = match source.kind() {
        std::io::ErrorKind::NotFound => IoError::file_not_found(path),
        std::io::ErrorKind::PermissionDenied => IoError::permission_denied(path, source),
        _ => IoError::from_std(source).with_path(path),
    };
    Error::Io(error)
}

fn throughput_mbps(bytes: u64, elapsed: Duration) -> Option<f64> {
    let seconds = elapsed.as_secs_f64();
    (seconds > 0.0).then(|| (bytes as f64 / 1_048_576.0) / seconds)
}
