//! # Schema-Checked Decoding
//!
//! Stored JSON may have been written by an older build or edited by hand.
//! Nothing is deserialized blindly: every value is parsed into a
//! [`serde_json::Value`] and its shape checked field by field.
//!
//! ## Rules
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────────────────┐
//! │ key                          │ accepted shape                           │
//! ├──────────────────────────────┼──────────────────────────────────────────┤
//! │ material-densities           │ array of { id: string, density: number } │
//! │                              │ bad elements skipped, extra fields ok    │
//! │ loss-settings                │ object; present fields finite numbers    │
//! │ ring-group-price-settings    │ missing fields default, values clamped   │
//! └──────────────────────────────┴──────────────────────────────────────────┘
//! ```

use serde_json::{Map, Value};
use tracing::warn;

use kuyum_core::types::clamp_percentage;
use kuyum_core::{DensityOverride, LossSettings, RingGroupPriceSettings};

use crate::error::{StoreError, StoreResult};

fn parse(key: &str, raw: &str) -> StoreResult<Value> {
    serde_json::from_str(raw).map_err(|e| StoreError::serialization(key, e))
}

fn as_object<'a>(key: &str, value: &'a Value) -> StoreResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| StoreError::decode(key, "expected a JSON object"))
}

/// Reads an optional percentage field.
///
/// Missing → `default`; present but not a finite number → error.
fn percentage_field(
    key: &str,
    object: &Map<String, Value>,
    field: &str,
    default: f64,
) -> StoreResult<f64> {
    match object.get(field) {
        None => Ok(default),
        Some(value) => match value.as_f64() {
            Some(n) if n.is_finite() => Ok(clamp_percentage(n)),
            _ => Err(StoreError::decode(
                key,
                format!("field '{field}' must be a finite number"),
            )),
        },
    }
}

// =============================================================================
// Materials
// =============================================================================

/// Decodes the stored material list into density overrides.
///
/// Only `id` and `density` are read. Malformed elements are skipped.
pub fn decode_material_overrides(key: &str, raw: &str) -> StoreResult<Vec<DensityOverride>> {
    let value = parse(key, raw)?;
    let elements = value
        .as_array()
        .ok_or_else(|| StoreError::decode(key, "expected a JSON array"))?;

    let overrides = elements
        .iter()
        .enumerate()
        .filter_map(|(index, element)| match material_override(element) {
            Some(o) => Some(o),
            None => {
                warn!(key = %key, index, "Skipping malformed stored material");
                None
            }
        })
        .collect();

    Ok(overrides)
}

fn material_override(element: &Value) -> Option<DensityOverride> {
    let object = element.as_object()?;
    let id = object.get("id")?.as_str()?;
    let density = object.get("density")?.as_f64()?;

    if !density.is_finite() || density < 0.0 {
        return None;
    }

    Some(DensityOverride {
        id: id.to_string(),
        density,
    })
}

// =============================================================================
// Percent Settings
// =============================================================================

/// Decodes stored loss settings.
pub fn decode_loss_settings(key: &str, raw: &str) -> StoreResult<LossSettings> {
    let value = parse(key, raw)?;
    let object = as_object(key, &value)?;
    let defaults = LossSettings::default();

    Ok(LossSettings {
        mold_finishing_loss: percentage_field(
            key,
            object,
            "moldFinishingLoss",
            defaults.mold_finishing_loss,
        )?,
        production_loss: percentage_field(key, object, "productionLoss", defaults.production_loss)?,
    })
}

/// Decodes stored ring group price settings.
pub fn decode_ring_group_price_settings(
    key: &str,
    raw: &str,
) -> StoreResult<RingGroupPriceSettings> {
    let value = parse(key, raw)?;
    let object = as_object(key, &value)?;
    let defaults = RingGroupPriceSettings::default();

    Ok(RingGroupPriceSettings {
        small_group_discount: percentage_field(
            key,
            object,
            "smallGroupDiscount",
            defaults.small_group_discount,
        )?,
        large_group_surcharge: percentage_field(
            key,
            object,
            "largeGroupSurcharge",
            defaults.large_group_surcharge,
        )?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
