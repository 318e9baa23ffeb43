//! src/settings.rs
//!
//! Application settings: the chart tables plus `[source]` and `[log]`.
//!
//! ```toml
//! [source]
//! kind = "serial"            # or "simulated"
//! serial_port = "/dev/ttyACM0"
//! baud_rate = 115200
//!
//! [log]
//! level = "debug"
//! file = "moving_bar_monitor.log"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::graph::BarGraphConfig;

/// Built-in configuration sized for a terminal.
pub const DEMO_CONFIG: &str = include_str!("../demos/terminal.toml");

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Simulated,
    Serial,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub serial_port: String,
    pub baud_rate: u32,
    /// Bursts per second produced by the simulated source.
    pub simulated_rate_hz: f64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Simulated,
            serial_port: "/dev/ttyACM0".to_string(),
            baud_rate: 115_200,
            simulated_rate_hz: 20.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`; `RUST_LOG` wins.
    pub level: String,
    /// The terminal belongs to the UI, so logs go to a file by default.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some(PathBuf::from("moving_bar_monitor.log")),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    #[serde(flatten)]
    pub graph: BarGraphConfig,
    pub source: SourceConfig,
    pub log: LogConfig,
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn demo() -> Result<Self, SettingsError> {
        Self::from_toml_str(DEMO_CONFIG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_config_is_complete() {
        let cfg = AppConfig::demo().unwrap();
        assert!(cfg.graph.validate().is_ok());
        assert!(crate::render::FrameStyle::resolve(&cfg.graph).is_ok());
        assert_eq!(cfg.source.kind, SourceKind::Simulated);
    }

    #[test]
    fn source_and_log_tables() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [source]
            kind = "serial"
            serial_port = "/dev/ttyUSB1"

            [log]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.source.kind, SourceKind::Serial);
        assert_eq!(cfg.source.serial_port, "/dev/ttyUSB1");
        assert_eq!(cfg.source.baud_rate, 115_200);
        assert_eq!(cfg.log.level, "debug");
        assert_eq!(cfg.graph, BarGraphConfig::default());
    }

    #[test]
    fn unknown_source_kind_is_a_parse_error() {
        let err = AppConfig::from_toml_str("[source]\nkind = \"udp\"").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
