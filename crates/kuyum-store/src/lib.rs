//! # kuyum-store: Settings Store for the Kuyum Calculator
//!
//! This crate persists the user-overridable settings: material densities,
//! loss percentages and ring group price adjustments.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Kuyum Settings Data Flow                            │
//! │                                                                         │
//! │  SettingsState (apps/calculator)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    kuyum-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ SettingsStore │    │    decode     │    │   backend    │  │   │
//! │  │   │ (settings.rs) │───►│ schema checks │    │  Memory      │  │   │
//! │  │   │ get/save/reset│    │ per key       │    │  File        │  │   │
//! │  │   │               │───────────────────────►│  Disabled    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/kuyum-calculator/<key>.json   (FileStore)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! Persistence must never block a calculation. [`SettingsStore`] absorbs
//! every [`StoreError`]: reads fall back to defaults, writes become logged
//! no-ops. Backends themselves still report errors so they can be tested.
//!
//! ## Module Organization
//!
//! - [`backend`] - `KeyValueStore` trait, backends, `StoreConfig`
//! - [`decode`] - Schema-checked decoding of stored JSON
//! - [`settings`] - `SettingsStore` with get/save/reset per settings type
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use kuyum_core::LossSettings;
//! use kuyum_store::{SettingsStore, StoreConfig};
//!
//! let store = SettingsStore::new(StoreConfig::in_memory().open());
//!
//! store.save_loss_settings(&LossSettings { mold_finishing_loss: 5.0, production_loss: 2.0 });
//! assert_eq!(store.loss_settings().production_loss, 2.0);
//!
//! assert_eq!(store.reset_loss_settings(), LossSettings::default());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod decode;
pub mod error;
pub mod settings;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{DisabledStore, FileStore, KeyValueStore, MemoryStore, StoreBackend, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use settings::{SettingsSnapshot, SettingsStore};

// =============================================================================
// Storage Keys
// =============================================================================

/// Key of the persisted material density list.
pub const MATERIALS_KEY: &str = "material-densities";

/// Key of the persisted loss settings.
pub const LOSS_SETTINGS_KEY: &str = "loss-settings";

/// Key of the persisted ring group price settings.
pub const RING_GROUP_PRICE_SETTINGS_KEY: &str = "ring-group-price-settings";
