mod formatters;

pub use formatters::{CsvFormatter, JsonFormatter, TextFormatter, group_digest};

use anyhow::Result;
use sha1stream_core::FileProcessingResult;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format a single result
    fn format_single(&self, result: &FileProcessingResult) -> Result<String>;

    /// Format a batch of results
    fn format_batch(&self, results: &[FileProcessingResult]) -> Result<String> {
        let formatted: Result<Vec<String>> =
            results.iter().map(|r| self.format_single(r)).collect();

        Ok(formatted?.join("\n"))
    }
}

/// Create a formatter based on output format
pub fn create_formatter(
    format: OutputFormat,
    use_color: bool,
    grouped: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_color, grouped)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
