use crate::output::OutputFormat;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use sha1stream_core::{HashingConfig, MIN_BUFFER_SIZE};
use std::fs;
use std::path::PathBuf;

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub hashing: HashingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub default_format: String,
    pub group_digest: bool,
    pub show_timing: bool,
    pub color_enabled: bool,
    pub progress_enabled: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            group_digest: true,
            show_timing: false,
            color_enabled: true,
            progress_enabled: true,
        }
    }
}

impl AppConfig {
    /// Apply CLI argument overrides to the configuration
    pub fn apply_cli_overrides(&mut self, buffer_size: Option<usize>) {
        if let Some(size) = buffer_size {
            self.hashing.buffer_size = size;
        }
    }
}

/// Keys accepted by `config set`
const KNOWN_KEYS: &[&str] = &[
    "hashing.buffer_size",
    "hashing.max_memory_usage",
    "output.default_format",
    "output.group_digest",
    "output.show_timing",
    "output.color_enabled",
    "output.progress_enabled",
];

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Get the default XDG-compliant configuration path
    fn default_config_path() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("sha1stream/config.toml");
        }

        #[cfg(target_os = "macos")]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Library/Application Support/sha1stream/config.toml")
        }

        #[cfg(target_os = "windows")]
        {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("sha1stream\\config.toml")
        }

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config/sha1stream/config.toml")
        }
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new();

        figment = figment.merge(Serialized::defaults(AppConfig::default()));

        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        // SHA1STREAM_HASHING__BUFFER_SIZE -> hashing.buffer_size
        figment = figment.merge(Env::prefixed("SHA1STREAM_").split("__"));

        let config: AppConfig = figment.extract().context("Failed to load configuration")?;
        log::debug!(
            "Loaded configuration from {} (file present: {})",
            self.config_path.display(),
            self.config_path.exists()
        );
        Ok(config)
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.load()?;
        let value = toml::Value::Table(toml::from_str(&toml::to_string(&config)?)?);

        let mut current = &value;
        for part in key.split('.') {
            match current {
                toml::Value::Table(table) => {
                    current = table
                        .get(part)
                        .ok_or_else(|| anyhow::anyhow!("Key '{}' not found", key))?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        scalar_to_string(current)
            .ok_or_else(|| anyhow::anyhow!("Value at '{}' is not a simple type", key))
    }

    /// Set a configuration value by key (dot notation)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.validate_config_value(key, value)?;

        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            toml::Value::Table(
                toml::from_str(&content)
                    .with_context(|| format!("Invalid TOML in {}", self.config_path.display()))?,
            )
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        let parts: Vec<&str> = key.split('.').collect();
        let Some((last, sections)) = parts.split_last() else {
            anyhow::bail!("Empty key");
        };

        let mut current = &mut config;
        for part in sections {
            let toml::Value::Table(table) = current else {
                anyhow::bail!("Invalid key path: expected table at '{}'", part);
            };
            current = table
                .entry(part.to_string())
                .or_insert(toml::Value::Table(toml::map::Map::new()));
        }

        let toml::Value::Table(table) = current else {
            anyhow::bail!("Cannot set value on non-table");
        };
        table.insert(last.to_string(), self.parse_config_value(key, value)?);

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(&self.config_path, toml_string)?;
        log::debug!("Wrote {key} = {value} to {}", self.config_path.display());

        Ok(())
    }

    /// List all configuration values
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let config = self.load()?;
        let value = toml::Value::Table(toml::from_str(&toml::to_string(&config)?)?);

        let mut items = Vec::new();
        Self::collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    /// Recursively collect all key-value pairs from TOML
    fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
        if let toml::Value::Table(table) = value {
            for (key, val) in table {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                Self::collect_values(val, new_prefix, items);
            }
        } else if let Some(text) = scalar_to_string(value) {
            items.push((prefix, text));
        }
    }

    /// Validate a configuration value
    fn validate_config_value(&self, key: &str, value: &str) -> Result<()> {
        match key {
            "hashing.buffer_size" => {
                let size: usize = value
                    .parse()
                    .context("buffer_size must be a positive integer")?;
                if size < MIN_BUFFER_SIZE {
                    anyhow::bail!("buffer_size must be at least {MIN_BUFFER_SIZE} bytes");
                }
            }
            "hashing.max_memory_usage" => {
                let limit: usize = value
                    .parse()
                    .context("max_memory_usage must be a positive integer")?;
                if limit == 0 {
                    anyhow::bail!("max_memory_usage must be greater than 0");
                }
            }
            "output.default_format" => {
                OutputFormat::from_string(value)?;
            }
            "output.group_digest"
            | "output.show_timing"
            | "output.color_enabled"
            | "output.progress_enabled" => {
                let _: bool = value.parse().context("Value must be 'true' or 'false'")?;
            }
            _ => anyhow::bail!(
                "Unknown configuration key '{}' (known keys: {})",
                key,
                KNOWN_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Parse a value to the appropriate TOML type
    fn parse_config_value(&self, key: &str, value: &str) -> Result<toml::Value> {
        match key {
            "hashing.buffer_size" | "hashing.max_memory_usage" => {
                let num: i64 = value.parse().context("Expected integer value")?;
                Ok(toml::Value::Integer(num))
            }
            "output.default_format" => Ok(toml::Value::String(value.to_lowercase())),
            _ => {
                let bool_val: bool = value
                    .parse()
                    .context("Expected boolean value (true/false)")?;
                Ok(toml::Value::Boolean(bool_val))
            }
        }
    }
}

fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Load the configuration from the default location
pub fn get_config() -> Result<AppConfig> {
    ConfigManager::new().load()
}
