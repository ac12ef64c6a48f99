//! # Settings Store
//!
//! Typed get/save/reset over a [`KeyValueStore`].
//!
//! ## Operations Per Settings Type
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  get()    backend.get(key) ──► decode ──► value                         │
//! │                │                  │                                     │
//! │                └── missing / error / bad shape ──► default (warn!)     │
//! │                                                                         │
//! │  save(v)  serialize ──► backend.set(key)    failure ──► warn!, no-op    │
//! │                                                                         │
//! │  reset()  backend.delete(key) ──► default   failure ──► warn!, default  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No method here returns an error. Persistence is best-effort.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use kuyum_core::{LossSettings, MaterialCatalog, RingGroupPriceSettings};

use crate::backend::KeyValueStore;
use crate::decode::{
    decode_loss_settings, decode_material_overrides, decode_ring_group_price_settings,
};
use crate::error::StoreResult;
use crate::{LOSS_SETTINGS_KEY, MATERIALS_KEY, RING_GROUP_PRICE_SETTINGS_KEY};

/// All persisted settings, read in one go.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    pub materials: MaterialCatalog,
    pub loss_settings: LossSettings,
    pub ring_group_price_settings: RingGroupPriceSettings,
}

/// Settings persistence facade.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct SettingsStore {
    backend: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore").finish_non_exhaustive()
    }
}

impl SettingsStore {
    /// Creates a settings store over the given backend.
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        SettingsStore { backend }
    }

    // =========================================================================
    // Materials
    // =========================================================================

    /// Returns the material catalog with stored densities merged in.
    pub fn materials(&self) -> MaterialCatalog {
        let defaults = MaterialCatalog::default();
        self.read(MATERIALS_KEY, decode_material_overrides)
            .map(|overrides| defaults.merge_overrides(&overrides))
            .unwrap_or(defaults)
    }

    /// Persists the full material list.
    pub fn save_materials(&self, catalog: &MaterialCatalog) {
        self.write(MATERIALS_KEY, catalog);
    }

    /// Forgets stored densities and returns the built-in catalog.
    pub fn reset_materials(&self) -> MaterialCatalog {
        self.remove(MATERIALS_KEY);
        MaterialCatalog::default()
    }

    // =========================================================================
    // Loss Settings
    // =========================================================================

    /// Returns the stored loss settings, or the defaults.
    pub fn loss_settings(&self) -> LossSettings {
        self.read(LOSS_SETTINGS_KEY, decode_loss_settings)
            .unwrap_or_default()
    }

    /// Persists the loss settings, clamped to [0, 100].
    pub fn save_loss_settings(&self, settings: &LossSettings) {
        self.write(LOSS_SETTINGS_KEY, &settings.clamped());
    }

    pub fn reset_loss_settings(&self) -> LossSettings {
        self.remove(LOSS_SETTINGS_KEY);
        LossSettings::default()
    }

    // =========================================================================
    // Ring Group Price Settings
    // =========================================================================

    /// Returns the stored ring group price settings, or the defaults.
    pub fn ring_group_price_settings(&self) -> RingGroupPriceSettings {
        self.read(RING_GROUP_PRICE_SETTINGS_KEY, decode_ring_group_price_settings)
            .unwrap_or_default()
    }

    /// Persists the group price adjustments, clamped to [0, 100].
    pub fn save_ring_group_price_settings(&self, settings: &RingGroupPriceSettings) {
        self.write(RING_GROUP_PRICE_SETTINGS_KEY, &settings.clamped());
    }

    pub fn reset_ring_group_price_settings(&self) -> RingGroupPriceSettings {
        self.remove(RING_GROUP_PRICE_SETTINGS_KEY);
        RingGroupPriceSettings::default()
    }

    // =========================================================================
    // All Settings
    // =========================================================================

    /// Reads every settings type.
    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            materials: self.materials(),
            loss_settings: self.loss_settings(),
            ring_group_price_settings: self.ring_group_price_settings(),
        }
    }

    /// Resets every settings type and returns the defaults.
    pub fn reset_all(&self) -> SettingsSnapshot {
        info!("Resetting all settings to defaults");
        SettingsSnapshot {
            materials: self.reset_materials(),
            loss_settings: self.reset_loss_settings(),
            ring_group_price_settings: self.reset_ring_group_price_settings(),
        }
    }

    // =========================================================================
    // Backend Access
    // =========================================================================

    /// Reads and decodes a key. `None` means "use the default".
    fn read<T>(&self, key: &str, decode: fn(&str, &str) -> StoreResult<T>) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %key, "No stored value, using defaults");
                return None;
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read settings, using defaults");
                return None;
            }
        };

        match decode(key, &raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding stored settings");
                None
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to serialize settings");
                return;
            }
        };

        match self.backend.set(key, &json) {
            Ok(()) => info!(key = %key, "Saved settings"),
            Err(e) => warn!(key = %key, error = %e, "Failed to save settings"),
        }
    }

    fn remove(&self, key: &str) {
        match self.backend.delete(key) {
            Ok(()) => info!(key = %key, "Reset settings"),
            Err(e) => warn!(key = %key, error = %e, "Failed to reset settings"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MemoryStore, StoreConfig};
    use tempfile::tempdir;

    fn memory_store() -> (Arc<MemoryStore>, SettingsStore) {
        let backend = Arc::new(MemoryStore::new());
        let store = SettingsStore::new(backend.clone());
        (backend, store)
    }

    #[test]
    fn test_defaults_when_empty() {
        let (_, store) = memory_store();
        assert_eq!(store.snapshot(), SettingsSnapshot::default());
    }

    #[test]
    fn test_loss_settings_round_trip() {
        let (_, store) = memory_store();
        let settings = LossSettings {
            mold_finishing_loss: 10.0,
            production_loss: 5.0,
        };

        store.save_loss_settings(&settings);
        assert_eq!(store.loss_settings(), settings);

        assert_eq!(store.reset_loss_settings(), LossSettings::default());
        assert_eq!(store.loss_settings(), LossSettings::default());
    }

    #[test]
    fn test_ring_settings_round_trip() {
        let (backend, store) = memory_store();
        let settings = RingGroupPriceSettings {
            small_group_discount: 12.5,
            large_group_surcharge: 0.0,
        };

        store.save_ring_group_price_settings(&settings);
        assert_eq!(store.ring_group_price_settings(), settings);
        assert_eq!(
            backend.get(RING_GROUP_PRICE_SETTINGS_KEY).unwrap().as_deref(),
            Some(r#"{"smallGroupDiscount":12.5,"largeGroupSurcharge":0.0}"#)
        );
    }

    #[test]
    fn test_save_clamps_loss_settings() {
        let (backend, store) = memory_store();
        store.save_loss_settings(&LossSettings {
            mold_finishing_loss: 150.0,
            production_loss: f64::NAN,
        });

        assert_eq!(
            backend.get(LOSS_SETTINGS_KEY).unwrap().as_deref(),
            Some(r#"{"moldFinishingLoss":100.0,"productionLoss":0.0}"#)
        );
        assert_eq!(
            store.loss_settings(),
            LossSettings {
                mold_finishing_loss: 100.0,
                production_loss: 0.0,
            }
        );
    }

    #[test]
    fn test_save_clamps_ring_group_price_settings() {
        let (_, store) = memory_store();
        store.save_ring_group_price_settings(&RingGroupPriceSettings {
            small_group_discount: -1.0,
            large_group_surcharge: 150.0,
        });

        assert_eq!(
            store.ring_group_price_settings(),
            RingGroupPriceSettings {
                small_group_discount: 0.0,
                large_group_surcharge: 100.0,
            }
        );
    }

    #[test]
    fn test_materials_round_trip_as_full_list() {
        let (backend, store) = memory_store();
        let catalog = MaterialCatalog::default()
            .with_density("18k-gold", 15.9)
            .unwrap();

        store.save_materials(&catalog);
        assert_eq!(store.materials(), catalog);

        let raw = backend.get(MATERIALS_KEY).unwrap().unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains(r#""name":"18K Gold""#));
    }

    #[test]
    fn test_materials_merge_partial_stored_list() {
        let (backend, store) = memory_store();
        backend
            .set(
                MATERIALS_KEY,
                r#"[{"id":"22k-gold","density":18.0},{"id":"platinum","density":21.45}]"#,
            )
            .unwrap();

        let catalog = store.materials();
        assert_eq!(catalog.materials().len(), 4);
        assert_eq!(catalog.density_of("22k-gold").unwrap(), 18.0);
        assert_eq!(catalog.density_of("14k-gold").unwrap(), 13.07);
        assert!(catalog.get("platinum").is_none());
    }

    #[test]
    fn test_corrupt_values_fall_back_to_defaults() {
        let (backend, store) = memory_store();
        backend.set(MATERIALS_KEY, "{broken").unwrap();
        backend.set(LOSS_SETTINGS_KEY, r#"{"productionLoss":"x"}"#).unwrap();
        backend.set(RING_GROUP_PRICE_SETTINGS_KEY, "null").unwrap();

        assert_eq!(store.snapshot(), SettingsSnapshot::default());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (_, store) = memory_store();
        assert_eq!(store.reset_materials(), MaterialCatalog::default());
        assert_eq!(store.reset_materials(), MaterialCatalog::default());
    }

    #[test]
    fn test_reset_all() {
        let (_, store) = memory_store();
        store.save_loss_settings(&LossSettings {
            mold_finishing_loss: 3.0,
            production_loss: 4.0,
        });
        store.save_materials(&MaterialCatalog::default().with_density("925-silver", 10.6).unwrap());

        assert_eq!(store.reset_all(), SettingsSnapshot::default());
        assert_eq!(store.snapshot(), SettingsSnapshot::default());
    }

    #[test]
    fn test_disabled_backend_is_silent() {
        let store = SettingsStore::new(StoreConfig::disabled().open());

        store.save_loss_settings(&LossSettings {
            mold_finishing_loss: 50.0,
            production_loss: 50.0,
        });
        assert_eq!(store.loss_settings(), LossSettings::default());
        assert_eq!(store.reset_all(), SettingsSnapshot::default());
    }

    #[test]
    fn test_file_backend_survives_restart() {
        let dir = tempdir().unwrap();
        let settings = RingGroupPriceSettings {
            small_group_discount: 5.0,
            large_group_surcharge: 25.0,
        };

        SettingsStore::new(StoreConfig::file(dir.path()).open())
            .save_ring_group_price_settings(&settings);

        let reopened = SettingsStore::new(StoreConfig::file(dir.path()).open());
        assert_eq!(reopened.ring_group_price_settings(), settings);
    }
}
