//! Progress reporting abstractions
//!
//! This module provides a trait-based abstraction for progress reporting,
//! allowing the file driver to report progress without depending on
//! specific channel implementations or UI concerns.

use std::path::PathBuf;
use std::sync::Arc;

/// Core trait for progress reporting
pub trait ProgressProvider: Send + Sync {
    /// Report a progress update
    fn report(&self, update: ProgressUpdate);

    /// Signal that the operation is complete
    fn complete(&self);
}

/// Unified progress update type
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressUpdate {
    /// Bytes of a file fed into the engine so far
    FileProgress {
        path: PathBuf,
        bytes_processed: u64,
        total_bytes: u64,
        throughput_mbps: Option<f64>,
        buffer_size: Option<usize>,
    },

    /// Generic status message
    Status { message: String },
}

/// Null implementation for when no progress is needed
pub struct NullProvider;

impl ProgressProvider for NullProvider {
    fn report(&self, _update: ProgressUpdate) {}

    fn complete(&self) {}
}

/// Arc-wrapped provider for sharing across tasks
pub struct SharedProvider {
    inner: Arc<dyn ProgressProvider>,
}

impl SharedProvider {
    /// Create a new shared provider wrapping the given provider
    pub fn new(provider: Arc<dyn ProgressProvider>) -> Self {
        Self { inner: provider }
    }
}

impl ProgressProvider for SharedProvider {
    fn report(&self, update: ProgressUpdate) {
        self.inner.report(update);
    }

    fn complete(&self) {
        self.inner.complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        updates: Mutex<Vec<ProgressUpdate>>,
        completed: Mutex<bool>,
    }

    impl ProgressProvider for Recorder {
        fn report(&self, update: ProgressUpdate) {
            self.updates.lock().unwrap().push(update);
        }

        fn complete(&self) {
            *self.completed.lock().unwrap() = true;
        }
    }

    #[test]
    fn test_null_provider_accepts_everything() {
        let provider = NullProvider;
        provider.report(ProgressUpdate::Status {
            message: "ignored".to_string(),
        });
        provider.complete();
    }

    #[test]
    fn test_shared_provider_forwards() {
        let recorder = Arc::new(Recorder::default());
        let shared = SharedProvider::new(recorder.clone());

        shared.report(ProgressUpdate::Status {
            message: "hello".to_string(),
        });
        shared.complete();

        assert_eq!(recorder.updates.lock().unwrap().len(), 1);
        assert!(*recorder.completed.lock().unwrap());
    }
}
