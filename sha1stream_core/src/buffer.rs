//! Page buffer allocation with memory tracking
//!
//! The file driver reads its input one page at a time into a single reusable
//! buffer. Allocation goes through [`MemoryTracker`] so an oversized page is
//! refused up front, and an allocator failure surfaces as an error instead of
//! aborting the process.

use crate::{Error, Result, error::InternalError};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Default page size for file reads (512 KiB)
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 64;

/// Smallest accepted page size: one compression block
pub const MIN_BUFFER_SIZE: usize = crate::hashing::BLOCK_LEN;

/// Default memory limit for page buffers (64 MiB)
pub const DEFAULT_MEMORY_LIMIT: usize = 64 * 1024 * 1024;

/// Memory tracker for managing memory allocation limits
#[derive(Debug, Clone)]
pub struct MemoryTracker {
    /// Current memory usage
    memory_used: Arc<AtomicUsize>,
    /// Memory limit
    memory_limit: usize,
}

impl Default for MemoryTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_LIMIT)
    }
}

impl MemoryTracker {
    /// Create a new memory tracker with the specified limit
    pub fn new(limit: usize) -> Self {
        Self {
            memory_used: Arc::new(AtomicUsize::new(0)),
            memory_limit: limit,
        }
    }

    /// Get the current memory limit
    pub fn limit(&self) -> usize {
        self.memory_limit
    }

    /// Get current memory usage
    pub fn used(&self) -> usize {
        self.memory_used.load(Ordering::Relaxed)
    }

    /// Allocate a zeroed buffer of `size` bytes against the limit
    pub fn allocate(&self, size: usize) -> Result<Vec<u8>> {
        let mut old_value = self.memory_used.load(Ordering::Relaxed);
        loop {
            let requested = old_value.saturating_add(size);
            if requested > self.memory_limit {
                return Err(Error::Internal(InternalError::memory_limit_exceeded(
                    self.memory_limit,
                    requested,
                )));
            }

            match self.memory_used.compare_exchange_weak(
                old_value,
                requested,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(current) => old_value = current,
            }
        }

        let mut buffer = Vec::new();
        if buffer.try_reserve_exact(size).is_err() {
            self.memory_used.fetch_sub(size, Ordering::AcqRel);
            return Err(Error::Internal(InternalError::buffer_allocation(size)));
        }
        buffer.resize(size, 0);

        log::debug!(
            "Allocated {size} byte page buffer ({} of {} bytes in use)",
            self.used(),
            self.memory_limit
        );
        Ok(buffer)
    }

    /// Release a buffer and update memory tracking
    pub fn release(&self, buffer: Vec<u8>) {
        let size = buffer.len();
        drop(buffer);
        let _ = self
            .memory_used
            .fetch_update(Ordering::AcqRel, Ordering::Relaxed, |current| {
                Some(current.saturating_sub(size))
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_release() {
        let tracker = MemoryTracker::new(1024);

        let buffer = tracker.allocate(512).unwrap();
        assert_eq!(buffer.len(), 512);
        assert!(buffer.iter().all(|&b| b == 0));
        assert_eq!(tracker.used(), 512);

        tracker.release(buffer);
        assert_eq!(tracker.used(), 0);
    }

    #[test]
    fn test_limit_is_enforced() {
        let tracker = MemoryTracker::new(1000);
        let first = tracker.allocate(600).unwrap();

        let error = tracker.allocate(600).unwrap_err();
        assert!(matches!(
            error,
            Error::Internal(InternalError::MemoryLimitExceeded {
                limit: 1000,
                current: 1200
            })
        ));
        // Failed request does not count against the limit
        assert_eq!(tracker.used(), 600);

        tracker.release(first);
        assert!(tracker.allocate(600).is_ok());
    }

    #[test]
    fn test_allocator_refusal_is_reported() {
        let tracker = MemoryTracker::new(usize::MAX);

        let error = tracker.allocate(usize::MAX / 2).unwrap_err();
        assert!(matches!(
            error,
            Error::Internal(InternalError::BufferAllocation { .. })
        ));
        assert_eq!(tracker.used(), 0);
    }

    #[test]
    fn test_clones_share_usage() {
        let tracker = MemoryTracker::new(4096);
        let clone = tracker.clone();

        let buffer = clone.allocate(1024).unwrap();
        assert_eq!(tracker.used(), 1024);
        tracker.release(buffer);
        assert_eq!(clone.used(), 0);
    }

    #[test]
    fn test_default_sizes() {
        assert_eq!(DEFAULT_BUFFER_SIZE, 512 * 1024);
        assert_eq!(MIN_BUFFER_SIZE, 64);
        assert!(DEFAULT_BUFFER_SIZE <= DEFAULT_MEMORY_LIMIT);
        assert_eq!(MemoryTracker::default().limit(), DEFAULT_MEMORY_LIMIT);
    }
}
