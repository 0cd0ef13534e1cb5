use super::OutputFormatter;
use anyhow::Result;
use colored::*;
use serde_json::{Value, json};
use sha1stream_core::{Digest, FileProcessingResult};

/// Hex digits per cluster in grouped digests (five bytes)
const GROUP_WIDTH: usize = 10;

/// Lowercase hex digest, optionally split into space separated clusters
pub fn group_digest(digest: &Digest, grouped: bool) -> String {
    let hex = digest.to_hex();
    if !grouped {
        return hex;
    }
    hex.as_bytes()
        .chunks(GROUP_WIDTH)
        .map(|chunk| String::from_utf8_lossy(chunk))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    use_color: bool,
    grouped: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool, grouped: bool) -> Self {
        Self { use_color, grouped }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_single(&self, result: &FileProcessingResult) -> Result<String> {
        let digest = group_digest(&result.digest, self.grouped);
        Ok(format!(
            "digest (sha1) of `{}` file: {}",
            result.file_path.display(),
            self.colorize(&digest, |s| s.cyan())
        ))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_value(result: &FileProcessingResult) -> Value {
        json!({
            "path": result.file_path.to_string_lossy(),
            "file_size": result.file_size,
            "sha1": result.digest,
            "processing_time_ms": result.processing_time.as_millis(),
        })
    }

    fn render(&self, value: &Value) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_single(&self, result: &FileProcessingResult) -> Result<String> {
        self.render(&Self::to_value(result))
    }

    fn format_batch(&self, results: &[FileProcessingResult]) -> Result<String> {
        let values: Vec<Value> = results.iter().map(Self::to_value).collect();
        self.render(&Value::Array(values))
    }
}

/// CSV formatter for tabular output
pub struct CsvFormatter;

impl CsvFormatter {
    const HEADERS: [&'static str; 4] = ["path", "size", "sha1", "processing_time_ms"];

    fn result_to_record(result: &FileProcessingResult) -> [String; 4] {
        [
            result.file_path.to_string_lossy().to_string(),
            result.file_size.to_string(),
            result.digest.to_hex(),
            result.processing_time.as_millis().to_string(),
        ]
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_single(&self, result: &FileProcessingResult) -> Result<String> {
        self.format_batch(std::slice::from_ref(result))
    }

    fn format_batch(&self, results: &[FileProcessingResult]) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(Self::HEADERS)?;

        for result in results {
            wtr.write_record(Self::result_to_record(result))?;
        }

        let data = wtr.into_inner()?;
        Ok(String::from_utf8(data)?.trim_end().to_string())
    }
}
