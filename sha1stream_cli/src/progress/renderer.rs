//! Progress rendering for the CLI
//!
//! Turns ProgressUpdate messages into indicatif bars on stderr.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use sha1stream_core::progress::ProgressUpdate;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

const BAR_TEMPLATE: &str = "{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% | {bytes}/{total_bytes} | {bytes_per_sec} | ETA: {eta} | {prefix}";

/// Render progress updates from a channel
pub async fn render_progress(mut rx: mpsc::Receiver<ProgressUpdate>) {
    let mut renderer = ProgressRenderer::new();

    while let Some(update) = rx.recv().await {
        renderer.handle_update(update);
    }

    renderer.finish();
}

/// Progress renderer that keeps one bar per file
pub struct ProgressRenderer {
    file_bars: HashMap<PathBuf, ProgressBar>,
    style: ProgressStyle,
}

impl ProgressRenderer {
    /// Create a new progress renderer
    pub fn new() -> Self {
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        Self {
            file_bars: HashMap::new(),
            style,
        }
    }

    /// Handle a progress update
    pub fn handle_update(&mut self, update: ProgressUpdate) {
        match update {
            ProgressUpdate::FileProgress {
                path,
                bytes_processed,
                total_bytes,
                throughput_mbps,
                buffer_size,
            } => {
                let pb = self.bar_for(&path, total_bytes);
                pb.set_position(bytes_processed);

                let mut prefix_parts = Vec::new();
                if let Some(mbps) = throughput_mbps {
                    prefix_parts.push(super::format_rate(mbps));
                }
                if let Some(buf_size) = buffer_size {
                    prefix_parts.push(format!("Page: {}", super::format_size(buf_size as u64)));
                }
                if !prefix_parts.is_empty() {
                    pb.set_prefix(prefix_parts.join(" | "));
                }
            }

            ProgressUpdate::Status { message } => {
                eprintln!("{} {}", "→".green(), message);
            }
        }
    }

    fn bar_for(&mut self, path: &Path, total_bytes: u64) -> &ProgressBar {
        let style = &self.style;
        self.file_bars.entry(path.to_path_buf()).or_insert_with(|| {
            let pb = ProgressBar::new(total_bytes);
            pb.set_style(style.clone());

            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("stdin")
                .to_string();
            pb.set_message(format!("{}: {}", "Hashing".bold(), file_name.cyan()));
            pb
        })
    }

    /// Number of files seen so far
    pub fn file_count(&self) -> usize {
        self.file_bars.len()
    }

    /// Finish all progress bars
    pub fn finish(self) {
        for (_, pb) in self.file_bars {
            pb.finish_with_message("✓ Complete".green().to_string());
        }
    }
}

impl Default for ProgressRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_update(path: &str, done: u64) -> ProgressUpdate {
        ProgressUpdate::FileProgress {
            path: PathBuf::from(path),
            bytes_processed: done,
            total_bytes: 100,
            throughput_mbps: Some(12.5),
            buffer_size: Some(8192 * 64),
        }
    }

    #[test]
    fn test_one_bar_per_file() {
        let mut renderer = ProgressRenderer::new();
        renderer.handle_update(file_update("a.bin", 10));
        renderer.handle_update(file_update("a.bin", 100));
        renderer.handle_update(file_update("b.bin", 50));
        assert_eq!(renderer.file_count(), 2);
        renderer.finish();
    }

    #[tokio::test]
    async fn test_render_exits_when_channel_closes() {
        let (tx, rx) = mpsc::channel(4);
        let handle = tokio::spawn(render_progress(rx));
        tx.send(file_update("a.bin", 100)).await.unwrap();
        drop(tx);
        handle.await.unwrap();
    }
}
