//! # Settings Commands
//!
//! Commands behind the settings dialog.
//!
//! ## Commit Semantics
//! Inputs are committed on blur, not per keystroke. Every commit writes
//! through to the settings store; a failed write is logged and the new
//! value still applies for this session.
//!
//! Changes that affect the weight result refresh the weight session.

use tracing::debug;

use kuyum_core::{LossSettings, MaterialCatalog, RingGroupPriceSettings};
use kuyum_store::SettingsSnapshot;

use crate::error::ApiError;
use crate::state::{SettingsState, WeightSession};

/// Returns all settings.
pub fn get_settings(settings: &SettingsState) -> SettingsSnapshot {
    debug!("get_settings command");
    settings.snapshot()
}

/// Commits a material density.
///
/// ## Errors
/// `NOT_FOUND` for an unknown material id.
pub fn update_material_density(
    settings: &SettingsState,
    session: &WeightSession,
    material_id: String,
    density: String,
) -> Result<MaterialCatalog, ApiError> {
    debug!(material_id = %material_id, density = %density, "update_material_density command");
    let catalog = settings.update_density(&material_id, &density)?;
    session.sync_material_density();
    Ok(catalog)
}

/// Commits the loss percentages.
pub fn commit_loss_settings(
    settings: &SettingsState,
    session: &WeightSession,
    mold_finishing_loss: String,
    production_loss: String,
) -> LossSettings {
    debug!("commit_loss_settings command");
    let committed = settings.commit_loss_settings(&mold_finishing_loss, &production_loss);
    session.refresh();
    committed
}

/// Commits the ring group price adjustments.
pub fn commit_ring_group_price_settings(
    settings: &SettingsState,
    small_group_discount: String,
    large_group_surcharge: String,
) -> RingGroupPriceSettings {
    debug!("commit_ring_group_price_settings command");
    settings.commit_ring_group_price_settings(&small_group_discount, &large_group_surcharge)
}

pub fn reset_materials(settings: &SettingsState, session: &WeightSession) -> MaterialCatalog {
    debug!("reset_materials command");
    let catalog = settings.reset_materials();
    session.sync_material_density();
    catalog
}

pub fn reset_loss_settings(settings: &SettingsState, session: &WeightSession) -> LossSettings {
    debug!("reset_loss_settings command");
    let defaults = settings.reset_loss_settings();
    session.refresh();
    defaults
}

pub fn reset_ring_group_price_settings(settings: &SettingsState) -> RingGroupPriceSettings {
    debug!("reset_ring_group_price_settings command");
    settings.reset_ring_group_price_settings()
}

/// Resets every setting to its default.
pub fn reset_all_settings(settings: &SettingsState, session: &WeightSession) -> SettingsSnapshot {
    debug!("reset_all_settings command");
    let defaults = settings.reset_all();
    session.sync_material_density();
    session.refresh();
    defaults
}
