//! Progress provider implementation for CLI
//!
//! Bridges the core library's progress reporting with the CLI's rendering
//! task.

use sha1stream_core::progress::{ProgressProvider, ProgressUpdate};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Channel-based progress provider for CLI rendering
///
/// Updates travel through a bounded channel to a separate rendering task.
/// When the channel is full the update is dropped rather than stalling the
/// hashing loop.
pub struct ChannelProvider {
    tx: Mutex<Option<mpsc::Sender<ProgressUpdate>>>,
}

impl ChannelProvider {
    /// Create a new channel provider
    pub fn new(tx: mpsc::Sender<ProgressUpdate>) -> Self {
        Self {
            tx: Mutex::new(Some(tx)),
        }
    }
}

impl ProgressProvider for ChannelProvider {
    fn report(&self, update: ProgressUpdate) {
        let tx = match self.tx.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        if let Some(tx) = tx {
            let _ = tx.try_send(update);
        }
    }

    fn complete(&self) {
        // Dropping the sender lets the renderer leave its loop
        if let Ok(mut guard) = self.tx.lock() {
            *guard = None;
        }
    }
}

/// Create a progress provider and receiver pair for CLI operations
pub fn create_progress_infrastructure()
-> (Arc<dyn ProgressProvider>, mpsc::Receiver<ProgressUpdate>) {
    let (tx, rx) = mpsc::channel(100);
    let provider = Arc::new(ChannelProvider::new(tx)) as Arc<dyn ProgressProvider>;
    (provider, rx)
}
