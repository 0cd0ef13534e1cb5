//! Internal library error types

use thiserror::Error;

/// Internal library errors
#[derive(Error, Debug)]
pub enum InternalError {
    /// The allocator refused a page buffer
    #[error("Can't allocate page buffer of {size} bytes")]
    BufferAllocation { size: usize },

    /// Memory limit exceeded
    #[error(
        "Memory limit exceeded: current usage {current} bytes would exceed limit of {limit} bytes"
    )]
    MemoryLimitExceeded { limit: usize, current: usize },
}

impl InternalError {
    /// Create a buffer allocation error
    pub fn buffer_allocation(size: usize) -> Self {
        Self::BufferAllocation { size }
    }

    /// Create a memory limit exceeded error
    pub fn memory_limit_exceeded(limit: usize, current: usize) -> Self {
        Self::MemoryLimitExceeded { limit, current }
    }

    /// Whether the failure is about memory
    pub fn is_allocation_failure(&self) -> bool {
        matches!(
            self,
            Self::BufferAllocation { .. } | Self::MemoryLimitExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_allocation_error() {
        let error = InternalError::buffer_allocation(524_288);
        assert!(error.to_string().contains("Can't allocate"));
        assert!(error.to_string().contains("524288"));
        assert!(error.is_allocation_failure());
    }

    #[test]
    fn test_memory_limit_exceeded_error() {
        let error = InternalError::memory_limit_exceeded(500_000_000, 600_000_000);
        assert!(error.to_string().contains("Memory limit exceeded"));
        assert!(error.to_string().contains("500000000"));
        assert!(error.to_string().contains("600000000"));
        assert!(error.is_allocation_failure());
    }
}
