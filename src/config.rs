//! qrmark runtime configuration handling

use crate::error::{Error, Result};
use qrcode::EcLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrmarkConfig {
    /// QR symbol parameters used by the encoder
    pub encoder: EncoderOptions,
    /// Output naming and placement defaults
    pub output: OutputOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrmarkConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrmark.toml / qrmark.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrmark.toml", "qrmark.yaml", "qrmark.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrmark");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.encoder.apply_env_overrides();
        self.output.apply_env_overrides();
        self.logging.apply_env_overrides();
    }
}

/// QR symbol parameters, fixed per installation rather than per invocation.
///
/// The defaults reproduce the classic 470x470 px rendering: version 5,
/// level H, 10 px modules, 5-module quiet zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    /// QR symbol version (size class), 1 through 40
    pub version: i16,
    /// Error correction level
    pub ec_level: EcLevelOption,
    /// Rendered size of a single module in pixels
    pub module_size: u32,
    /// Quiet zone width in modules
    pub quiet_zone: u32,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            version: 5,
            ec_level: EcLevelOption::High,
            module_size: 10,
            quiet_zone: 5,
        }
    }
}

impl EncoderOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(version) = env::var("QRMARK_QR_VERSION") {
            if let Ok(parsed) = version.parse::<i16>() {
                self.version = parsed;
            }
        }
        if let Ok(level) = env::var("QRMARK_QR_EC_LEVEL") {
            if let Some(parsed) = EcLevelOption::from_str(&level) {
                self.ec_level = parsed;
            }
        }
        if let Ok(size) = env::var("QRMARK_QR_MODULE_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                self.module_size = parsed;
            }
        }
        if let Ok(border) = env::var("QRMARK_QR_QUIET_ZONE") {
            if let Ok(parsed) = border.parse::<u32>() {
                self.quiet_zone = parsed;
            }
        }
    }

    /// Check the options against the ranges the encoder accepts.
    pub fn validated(&self) -> Result<Self> {
        if !(1..=40).contains(&self.version) {
            return Err(Error::Config(format!(
                "QR version {} out of range, expected 1-40",
                self.version
            )));
        }
        if self.module_size == 0 {
            return Err(Error::Config(
                "module_size must be at least 1 pixel".to_string(),
            ));
        }
        Ok(self.clone())
    }
}

/// Supported error correction levels, mirroring the QR specification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EcLevelOption {
    /// ~7% of the symbol recoverable
    Low,
    /// ~15% of the symbol recoverable
    Medium,
    /// ~25% of the symbol recoverable
    Quartile,
    /// ~30% of the symbol recoverable; required for center logos
    High,
}

impl EcLevelOption {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "l" | "low" => Some(Self::Low),
            "m" | "medium" => Some(Self::Medium),
            "q" | "quartile" => Some(Self::Quartile),
            "h" | "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl From<EcLevelOption> for EcLevel {
    fn from(value: EcLevelOption) -> Self {
        match value {
            EcLevelOption::Low => EcLevel::L,
            EcLevelOption::Medium => EcLevel::M,
            EcLevelOption::Quartile => EcLevel::Q,
            EcLevelOption::High => EcLevel::H,
        }
    }
}

/// Output naming and placement defaults applied to blank request fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Base name used when the caller leaves the name blank
    pub default_name: String,
    /// Directory used when the caller leaves the directory blank.
    /// `None` selects a `qrcode/` folder beside the executable.
    pub default_dir: Option<PathBuf>,
    /// Replace an existing file at the target path in place
    pub overwrite: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            default_name: "qrcode".to_string(),
            default_dir: None,
            overwrite: true,
        }
    }
}

impl OutputOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(name) = env::var("QRMARK_OUTPUT_NAME") {
            if !name.trim().is_empty() {
                self.default_name = name;
            }
        }
        if let Ok(dir) = env::var("QRMARK_OUTPUT_DIR") {
            if dir.trim().is_empty() {
                self.default_dir = None;
            } else {
                self.default_dir = Some(PathBuf::from(dir));
            }
        }
        if let Ok(overwrite) = env::var("QRMARK_OUTPUT_OVERWRITE") {
            match overwrite.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.overwrite = false,
                "1" | "true" | "on" => self.overwrite = true,
                _ => {}
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRMARK_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stdout logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRMARK_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRMARK_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRMARK_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("QRMARK_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_parameters() {
        let config = QrmarkConfig::default();
        assert_eq!(config.encoder.version, 5);
        assert_eq!(config.encoder.ec_level, EcLevelOption::High);
        assert_eq!(config.encoder.module_size, 10);
        assert_eq!(config.encoder.quiet_zone, 5);
        assert_eq!(config.output.default_name, "qrcode");
        assert!(config.output.overwrite);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: QrmarkConfig = toml::from_str(
            r#"
            [encoder]
            version = 7
            ec_level = "medium"

            [output]
            default_name = "badge"
            overwrite = false
            "#,
        )
        .unwrap();

        assert_eq!(config.encoder.version, 7);
        assert_eq!(config.encoder.ec_level, EcLevelOption::Medium);
        // Untouched fields keep their defaults
        assert_eq!(config.encoder.module_size, 10);
        assert_eq!(config.output.default_name, "badge");
        assert!(!config.output.overwrite);
    }

    #[test]
    fn test_validation_rejects_out_of_range_version() {
        let options = EncoderOptions {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(options.validated(), Err(Error::Config(_))));

        let options = EncoderOptions {
            version: 41,
            ..Default::default()
        };
        assert!(matches!(options.validated(), Err(Error::Config(_))));
    }

    #[test]
    fn test_ec_level_parsing() {
        assert_eq!(EcLevelOption::from_str("H"), Some(EcLevelOption::High));
        assert_eq!(EcLevelOption::from_str("quartile"), Some(EcLevelOption::Quartile));
        assert_eq!(EcLevelOption::from_str("x"), None);
    }
}
