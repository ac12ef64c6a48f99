//! # Kuyum Calculator Library
//!
//! Application shell for the jewelry weight and price calculator. A UI host
//! embeds this crate, starts an [`App`], and routes user input to the
//! [`commands`].
//!
//! ## Module Organization
//! ```text
//! kuyum_calculator/
//! ├── lib.rs          ◄─── You are here (startup & App)
//! ├── config.rs       ◄─── AppConfig: defaults, kuyum.toml, KUYUM_* env
//! ├── debounce.rs     ◄─── Trailing-edge debouncer on tokio
//! ├── state/
//! │   ├── mod.rs          ◄─── State type exports
//! │   ├── settings.rs     ◄─── Cached settings, write-through commits
//! │   ├── weight_form.rs  ◄─── Weight form, evaluation, debounced session
//! │   └── ring_form.rs    ◄─── Ring form
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── weight.rs   ◄─── Weight form commands
//! │   ├── ring.rs     ◄─── Ring table commands
//! │   └── settings.rs ◄─── Settings dialog commands
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Usage
//! ```rust
//! use kuyum_calculator::config::{AppConfig, StorageKind};
//! use kuyum_calculator::{commands, App};
//!
//! let mut config = AppConfig::default();
//! config.storage.backend = StorageKind::Memory;
//!
//! let app = App::bootstrap(config).unwrap();
//! let snapshot = commands::settings::get_settings(&app.settings);
//! assert_eq!(snapshot.loss_settings.production_loss, 0.0);
//! ```

pub mod commands;
pub mod config;
pub mod debounce;
pub mod error;
pub mod state;

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use error::ApiError;
use kuyum_store::SettingsStore;
use state::{RingFormState, SettingsState, WeightSession};

/// Everything a UI host needs to serve the calculator.
#[derive(Debug)]
pub struct App {
    pub config: AppConfig,
    pub settings: SettingsState,
    pub weight: WeightSession,
    pub ring: RingFormState,
}

impl App {
    /// Builds the application state from a loaded configuration.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. Validate config ────────────────────────────────────────────────►   │
    /// │  2. Open settings store (file / memory / disabled) ─────────────────►   │
    /// │  3. Load settings snapshot, merging stored densities ───────────────►   │
    /// │  4. Create weight session with the default material selected ──────►   │
    /// │  5. Create empty ring form ─────────────────────────────────────────►   │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn bootstrap(config: AppConfig) -> Result<Self, ApiError> {
        config.validate()?;

        let store = SettingsStore::new(config.store_config().open());
        let settings = SettingsState::new(store);
        info!("Settings loaded");

        let weight = WeightSession::new(
            settings.clone(),
            &config.calculator.default_material_id,
            config.debounce(),
        )?;

        Ok(App {
            config,
            settings,
            weight,
            ring: RingFormState::new(),
        })
    }
}

/// Loads configuration, installs logging, and bootstraps the app.
///
/// `config_path` overrides the platform config file location.
pub fn start(config_path: Option<PathBuf>) -> Result<App, ApiError> {
    let config = AppConfig::load(config_path)?;
    init_tracing(&config.logging.filter);
    info!(
        storage = %config.storage.backend,
        debounce_ms = config.calculator.debounce_ms,
        "Starting Kuyum Calculator"
    );
    App::bootstrap(config)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set, e.g. `RUST_LOG=kuyum=trace`
/// - otherwise `default_filter` (config `logging.filter`, `info,kuyum=debug`)
///
/// Installing twice is a no-op.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
