//! # Settings State
//!
//! The current settings, cached in memory and written through to the
//! settings store on every commit.
//!
//! ## Commit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Settings dialog field blur                                             │
//! │       │  raw text, e.g. "-" or "250"                                   │
//! │       ▼                                                                 │
//! │  commit_percentage / coerce_number  (kuyum-core::input)                │
//! │       │  clamped number                                                 │
//! │       ▼                                                                 │
//! │  RwLock<SettingsSnapshot> ◄── readers (weight session, ring table)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SettingsStore::save_*      (best effort, failures logged)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Reads vastly outnumber writes (every recomputation reads the loss
//! settings), so the cache sits behind an `RwLock`.

use std::sync::{Arc, RwLock};

use tracing::info;

use kuyum_core::input::{coerce_number, commit_percentage};
use kuyum_core::{CoreResult, LossSettings, MaterialCatalog, RingGroupPriceSettings};
use kuyum_store::{SettingsSnapshot, SettingsStore};

/// Shared settings state.
#[derive(Debug, Clone)]
pub struct SettingsState {
    store: SettingsStore,
    current: Arc<RwLock<SettingsSnapshot>>,
}

impl SettingsState {
    /// Loads the persisted settings.
    pub fn new(store: SettingsStore) -> Self {
        let current = store.snapshot();
        SettingsState {
            store,
            current: Arc::new(RwLock::new(current)),
        }
    }

    /// Executes a function with read access to the settings.
    pub fn with_settings<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SettingsSnapshot) -> R,
    {
        let current = self.current.read().expect("Settings lock poisoned");
        f(&current)
    }

    fn with_settings_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SettingsSnapshot) -> R,
    {
        let mut current = self.current.write().expect("Settings lock poisoned");
        f(&mut current)
    }

    pub fn snapshot(&self) -> SettingsSnapshot {
        self.with_settings(Clone::clone)
    }

    pub fn materials(&self) -> MaterialCatalog {
        self.with_settings(|s| s.materials.clone())
    }

    pub fn loss_settings(&self) -> LossSettings {
        self.with_settings(|s| s.loss_settings)
    }

    pub fn ring_group_price_settings(&self) -> RingGroupPriceSettings {
        self.with_settings(|s| s.ring_group_price_settings)
    }

    // =========================================================================
    // Commits
    // =========================================================================

    /// Commits a density typed for one material.
    ///
    /// Unreadable text counts as 0; negative values are floored at 0.
    pub fn update_density(&self, material_id: &str, raw: &str) -> CoreResult<MaterialCatalog> {
        let density = coerce_number(raw);
        let catalog = self.with_settings_mut(|s| -> CoreResult<MaterialCatalog> {
            s.materials = s.materials.with_density(material_id, density)?;
            Ok(s.materials.clone())
        })?;

        info!(material_id = %material_id, density = %density.max(0.0), "Material density updated");
        self.store.save_materials(&catalog);
        Ok(catalog)
    }

    /// Commits both loss percentages.
    pub fn commit_loss_settings(&self, mold_finishing_raw: &str, production_raw: &str) -> LossSettings {
        let settings = LossSettings {
            mold_finishing_loss: commit_percentage(mold_finishing_raw),
            production_loss: commit_percentage(production_raw),
        };
        self.with_settings_mut(|s| s.loss_settings = settings);
        self.store.save_loss_settings(&settings);
        settings
    }

    /// Commits both ring group price adjustments.
    pub fn commit_ring_group_price_settings(
        &self,
        small_discount_raw: &str,
        large_surcharge_raw: &str,
    ) -> RingGroupPriceSettings {
        let settings = RingGroupPriceSettings {
            small_group_discount: commit_percentage(small_discount_raw),
            large_group_surcharge: commit_percentage(large_surcharge_raw),
        };
        self.with_settings_mut(|s| s.ring_group_price_settings = settings);
        self.store.save_ring_group_price_settings(&settings);
        settings
    }

    // =========================================================================
    // Resets
    // =========================================================================

    pub fn reset_materials(&self) -> MaterialCatalog {
        let catalog = self.store.reset_materials();
        self.with_settings_mut(|s| s.materials = catalog.clone());
        catalog
    }

    pub fn reset_loss_settings(&self) -> LossSettings {
        let settings = self.store.reset_loss_settings();
        self.with_settings_mut(|s| s.loss_settings = settings);
        settings
    }

    pub fn reset_ring_group_price_settings(&self) -> RingGroupPriceSettings {
        let settings = self.store.reset_ring_group_price_settings();
        self.with_settings_mut(|s| s.ring_group_price_settings = settings);
        settings
    }

    pub fn reset_all(&self) -> SettingsSnapshot {
        let snapshot = self.store.reset_all();
        self.with_settings_mut(|s| *s = snapshot.clone());
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuyum_core::CoreError;
    use kuyum_store::StoreConfig;

    fn state() -> (SettingsStore, SettingsState) {
        let store = SettingsStore::new(StoreConfig::in_memory().open());
        (store.clone(), SettingsState::new(store))
    }

    #[test]
    fn test_loads_persisted_values() {
        let store = SettingsStore::new(StoreConfig::in_memory().open());
        store.save_loss_settings(&LossSettings {
            mold_finishing_loss: 8.0,
            production_loss: 2.0,
        });

        let state = SettingsState::new(store);
        assert_eq!(state.loss_settings().mold_finishing_loss, 8.0);
    }

    #[test]
    fn test_commit_loss_settings_clamps_and_persists() {
        let (store, state) = state();

        let committed = state.commit_loss_settings("-", "250");
        assert_eq!(committed.mold_finishing_loss, 0.0);
        assert_eq!(committed.production_loss, 100.0);

        assert_eq!(state.loss_settings(), committed);
        assert_eq!(store.loss_settings(), committed);
    }

    #[test]
    fn test_commit_ring_settings() {
        let (store, state) = state();

        let committed = state.commit_ring_group_price_settings("12.5", "");
        assert_eq!(committed.small_group_discount, 12.5);
        assert_eq!(committed.large_group_surcharge, 0.0);
        assert_eq!(store.ring_group_price_settings(), committed);
    }

    #[test]
    fn test_update_density() {
        let (store, state) = state();

        let catalog = state.update_density("18k-gold", "15.9").unwrap();
        assert_eq!(catalog.density_of("18k-gold").unwrap(), 15.9);
        assert_eq!(store.materials().density_of("18k-gold").unwrap(), 15.9);

        let catalog = state.update_density("18k-gold", "-4").unwrap();
        assert_eq!(catalog.density_of("18k-gold").unwrap(), 0.0);
    }

    #[test]
    fn test_update_density_unknown_material() {
        let (store, state) = state();

        let err = state.update_density("platinum", "21.45").unwrap_err();
        assert!(matches!(err, CoreError::MaterialNotFound(_)));
        assert_eq!(state.materials(), MaterialCatalog::default());
        assert_eq!(store.materials(), MaterialCatalog::default());
    }

    #[test]
    fn test_reset_all_restores_defaults() {
        let (store, state) = state();
        state.commit_loss_settings("5", "5");
        state.update_density("925-silver", "10.6").unwrap();

        assert_eq!(state.reset_all(), SettingsSnapshot::default());
        assert_eq!(state.snapshot(), SettingsSnapshot::default());
        assert_eq!(store.snapshot(), SettingsSnapshot::default());
    }

    #[test]
    fn test_individual_resets() {
        let (_, state) = state();
        state.commit_ring_group_price_settings("1", "2");
        state.commit_loss_settings("3", "4");

        assert_eq!(state.reset_ring_group_price_settings(), RingGroupPriceSettings::default());
        assert_eq!(state.loss_settings().production_loss, 4.0);
        assert_eq!(state.reset_loss_settings(), LossSettings::default());
        assert_eq!(state.reset_materials(), MaterialCatalog::default());
    }
}
