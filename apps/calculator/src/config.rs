//! # Application Configuration
//!
//! Configuration for storage, calculator behaviour and logging.
//!
//! ## Configuration Sources (later wins)
//! 1. Defaults (this file)
//! 2. Config file (`kuyum.toml` in the platform config directory)
//! 3. Environment variables (`KUYUM_*`)
//!
//! ## Example kuyum.toml
//! ```toml
//! [storage]
//! backend = "file"
//! data_dir = "/var/lib/kuyum"
//!
//! [calculator]
//! debounce_ms = 300
//! default_material_id = "14k-gold"
//!
//! [logging]
//! filter = "info,kuyum=debug"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use kuyum_core::{MaterialCatalog, DEFAULT_MATERIAL_ID};
use kuyum_store::StoreConfig;

/// Default debounce window for weight recomputation.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,kuyum=debug";

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML or has wrong types.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration parsed but is not usable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Storage Settings
// =============================================================================

/// Which settings backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// JSON files in the data directory.
    #[default]
    File,

    /// In-process only, lost on exit.
    Memory,

    /// No persistence. Defaults are always used.
    Disabled,
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::File => write!(f, "file"),
            StorageKind::Memory => write!(f, "memory"),
            StorageKind::Disabled => write!(f, "disabled"),
        }
    }
}

impl std::str::FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(StorageKind::File),
            "memory" => Ok(StorageKind::Memory),
            "disabled" | "none" | "off" => Ok(StorageKind::Disabled),
            other => Err(ConfigError::Invalid(format!(
                "Unknown storage backend: '{}'. Valid options: file, memory, disabled",
                other
            ))),
        }
    }
}

/// Settings persistence configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageKind,

    /// Directory for settings files.
    /// Default: the platform data directory
    pub data_dir: Option<PathBuf>,
}

// =============================================================================
// Calculator Settings
// =============================================================================

/// Calculator behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorSettings {
    /// Quiet period before the weight result is recomputed.
    pub debounce_ms: u64,

    /// Material selected when the weight form opens.
    pub default_material_id: String,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        CalculatorSettings {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_material_id: DEFAULT_MATERIAL_ID.to_string(),
        }
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageSettings,
    pub calculator: CalculatorSettings,
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`kuyum.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Missing sections and fields take defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.calculator.debounce_ms == 0 {
            return Err(ConfigError::Invalid(
                "debounce_ms must be greater than 0".into(),
            ));
        }

        let material_id = &self.calculator.default_material_id;
        if MaterialCatalog::default().get(material_id).is_none() {
            return Err(ConfigError::Invalid(format!(
                "Unknown default material: '{}'",
                material_id
            )));
        }

        Ok(())
    }

    /// Applies `KUYUM_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable source.
    ///
    /// Unparsable values are logged and skipped.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(backend) = lookup("KUYUM_STORAGE") {
            match backend.parse() {
                Ok(kind) => {
                    debug!(backend = %backend, "Overriding storage backend from environment");
                    self.storage.backend = kind;
                }
                Err(e) => warn!("Ignoring KUYUM_STORAGE: {}", e),
            }
        }

        if let Some(dir) = lookup("KUYUM_DATA_DIR") {
            debug!(dir = %dir, "Overriding data directory from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(ms) = lookup("KUYUM_DEBOUNCE_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.calculator.debounce_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring unparsable KUYUM_DEBOUNCE_MS"),
            }
        }

        if let Some(id) = lookup("KUYUM_DEFAULT_MATERIAL") {
            self.calculator.default_material_id = id;
        }

        if let Some(filter) = lookup("KUYUM_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("kuyum.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the debounce window.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.calculator.debounce_ms)
    }

    /// Builds the settings store configuration.
    ///
    /// With the file backend and no data directory available on this
    /// platform, persistence is disabled.
    pub fn store_config(&self) -> StoreConfig {
        match self.storage.backend {
            StorageKind::Memory => StoreConfig::in_memory(),
            StorageKind::Disabled => StoreConfig::disabled(),
            StorageKind::File => {
                let dir = self
                    .storage
                    .data_dir
                    .clone()
                    .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()));

                match dir {
                    Some(dir) => StoreConfig::file(dir),
                    None => {
                        warn!("Could not determine data directory, settings will not persist");
                        StoreConfig::disabled()
                    }
                }
            }
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "kuyum", "calculator")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.storage.backend, StorageKind::File);
        assert_eq!(config.calculator.debounce_ms, 300);
        assert_eq!(config.calculator.default_material_id, "14k-gold");
        assert_eq!(config.logging.filter, "info,kuyum=debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_storage_kind_parsing() {
        assert_eq!("file".parse::<StorageKind>().unwrap(), StorageKind::File);
        assert_eq!("MEMORY".parse::<StorageKind>().unwrap(), StorageKind::Memory);
        assert_eq!("off".parse::<StorageKind>().unwrap(), StorageKind::Disabled);
        assert!("cloud".parse::<StorageKind>().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml("[calculator]\ndebounce_ms = 150\n").unwrap();
        assert_eq!(config.calculator.debounce_ms, 150);
        assert_eq!(config.calculator.default_material_id, "14k-gold");
        assert_eq!(config.storage, StorageSettings::default());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let err = AppConfig::from_toml("[calculator]\ndebounce_ms = \"fast\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides_beat_file_values() {
        let mut config = AppConfig::from_toml(
            "[storage]\nbackend = \"file\"\n\n[calculator]\ndebounce_ms = 500\n",
        )
        .unwrap();

        config.apply_overrides(vars(&[
            ("KUYUM_STORAGE", "memory"),
            ("KUYUM_DEBOUNCE_MS", "120"),
            ("KUYUM_DEFAULT_MATERIAL", "22k-gold"),
            ("KUYUM_DATA_DIR", "/tmp/kuyum"),
            ("KUYUM_LOG", "warn"),
        ]));

        assert_eq!(config.storage.backend, StorageKind::Memory);
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/kuyum")));
        assert_eq!(config.calculator.debounce_ms, 120);
        assert_eq!(config.calculator.default_material_id, "22k-gold");
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_unparsable_env_values_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(vars(&[
            ("KUYUM_STORAGE", "tape"),
            ("KUYUM_DEBOUNCE_MS", "soon"),
        ]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.calculator.debounce_ms = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.calculator.default_material_id = "platinum".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kuyum.toml");
        std::fs::write(&path, "[storage]\nbackend = \"disabled\"\n").unwrap();

        let config = AppConfig::load(Some(path)).unwrap();
        assert!(matches!(
            config.store_config().backend,
            kuyum_store::StoreBackend::Disabled
        ));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kuyum.toml");
        std::fs::write(&path, "[calculator]\ndebounce_ms = 0\n").unwrap();

        assert!(matches!(
            AppConfig::load(Some(path.clone())),
            Err(ConfigError::Invalid(_))
        ));
        assert_eq!(AppConfig::load_or_default(Some(path)).calculator.debounce_ms, 300);
    }

    #[test]
    fn test_store_config_uses_explicit_data_dir() {
        let mut config = AppConfig::default();
        config.storage.data_dir = Some(PathBuf::from("/srv/kuyum"));
        assert_eq!(config.store_config(), StoreConfig::file("/srv/kuyum"));

        config.storage.backend = StorageKind::Memory;
        assert_eq!(config.store_config(), StoreConfig::in_memory());
    }
}
