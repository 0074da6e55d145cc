//! Engine configuration types.
//!
//! `EngineConfig` represents `formwright.toml`, which controls copy stamps,
//! repeater seeding, and logging. All fields have sensible defaults.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the form engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// chrono format string for the timestamp appended to copied pages and
    /// prefixed to copied patterns.
    #[serde(default = "default_copy_timestamp_format")]
    pub copy_timestamp_format: String,

    /// Rows created by the first add-row action on an empty repeater.
    #[serde(default = "default_repeater_initial_rows")]
    pub repeater_initial_rows: usize,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_copy_timestamp_format() -> String {
    "%-m/%-d/%Y, %-I:%M:%S %p".to_string()
}

fn default_repeater_initial_rows() -> usize {
    2
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            copy_timestamp_format: default_copy_timestamp_format(),
            repeater_initial_rows: default_repeater_initial_rows(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Tracing subscriber settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,

    /// Bridge spans to OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub otel: bool,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
            otel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_default_values() {
        let config = EngineConfig::default();
        assert_eq!(config.repeater_initial_rows, 2);
        assert_eq!(config.copy_timestamp_format, "%-m/%-d/%Y, %-I:%M:%S %p");
        assert_eq!(config.logging.filter, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_engine_config_deserialize_with_defaults() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_engine_config_deserialize_with_values() {
        let toml_str = r#"
copy_timestamp_format = "%Y-%m-%d %H:%M"
repeater_initial_rows = 1

[logging]
filter = "formwright_core=debug"
json = true
"#;
        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.copy_timestamp_format, "%Y-%m-%d %H:%M");
        assert_eq!(config.repeater_initial_rows, 1);
        assert_eq!(config.logging.filter, "formwright_core=debug");
        assert!(config.logging.json);
        assert!(!config.logging.otel);
    }
}
