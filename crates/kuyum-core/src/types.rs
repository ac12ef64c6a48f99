//! # Domain Types
//!
//! Configuration types that parameterize the calculations.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────────┐  │
//! │  │    Material     │   │  LossSettings   │   │ RingGroupPrice       │  │
//! │  │  ─────────────  │   │  ─────────────  │   │ Settings             │  │
//! │  │  id (stable)    │   │  moldFinishing  │   │  ──────────────────  │  │
//! │  │  name           │   │  production     │   │  smallGroupDiscount  │  │
//! │  │  density g/cm³  │   │  (0-100 %)      │   │  largeGroupSurcharge │  │
//! │  └─────────────────┘   └─────────────────┘   └──────────────────────┘  │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  ┌─────────────────┐                                                    │
//! │  │ MaterialCatalog │  default four entries, densities overridable       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commit Discipline
//! Percentages are clamped to [0, 100] when a value is committed, never while
//! the user is still typing. See [`clamp_percentage`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Percentages
// =============================================================================

/// Clamps a percentage into [0, 100]. NaN commits as 0.
///
/// ## Example
/// ```rust
/// use kuyum_core::types::clamp_percentage;
///
/// assert_eq!(clamp_percentage(150.0), 100.0);
/// assert_eq!(clamp_percentage(-5.0), 0.0);
/// assert_eq!(clamp_percentage(f64::NAN), 0.0);
/// ```
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

// =============================================================================
// Material
// =============================================================================

/// Id of the material selected when the form first opens.
pub const DEFAULT_MATERIAL_ID: &str = "14k-gold";

/// A casting alloy.
///
/// `id` is a stable identifier; `density` is the only field a user may
/// change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Material {
    /// Stable identifier, also the persistence key.
    pub id: String,

    /// Display label.
    pub name: String,

    /// Density in g/cm³.
    pub density: f64,
}

impl Material {
    fn new(id: &str, name: &str, density: f64) -> Self {
        Material {
            id: id.to_string(),
            name: name.to_string(),
            density,
        }
    }
}

/// A persisted density override for one material.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityOverride {
    pub id: String,
    pub density: f64,
}

/// The ordered set of materials offered to the user.
///
/// ## Lifecycle
/// ```text
/// MaterialCatalog::default()  ── built-in four alloys
///        │
///        ▼
/// merge_overrides(stored)     ── densities from the Settings Store
///        │                       (unknown ids dropped, missing ids kept)
///        ▼
/// with_density(id, d)         ── user edit, floored at 0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MaterialCatalog(Vec<Material>);

impl Default for MaterialCatalog {
    fn default() -> Self {
        MaterialCatalog(vec![
            Material::new("925-silver", "925 Silver", 10.4),
            Material::new("14k-gold", "14K Gold", 13.07),
            Material::new("18k-gold", "18K Gold", 15.58),
            Material::new("22k-gold", "22K Gold", 17.5),
        ])
    }
}

impl MaterialCatalog {
    /// Returns all materials in display order.
    pub fn materials(&self) -> &[Material] {
        &self.0
    }

    /// Looks up a material by id.
    pub fn get(&self, id: &str) -> Option<&Material> {
        self.0.iter().find(|m| m.id == id)
    }

    /// Returns the density of a material.
    pub fn density_of(&self, id: &str) -> CoreResult<f64> {
        self.get(id)
            .map(|m| m.density)
            .ok_or_else(|| CoreError::MaterialNotFound(id.to_string()))
    }

    /// Returns a copy of the catalog with one density replaced.
    ///
    /// Negative densities are floored at 0.
    pub fn with_density(&self, id: &str, density: f64) -> CoreResult<Self> {
        if self.get(id).is_none() {
            return Err(CoreError::MaterialNotFound(id.to_string()));
        }

        let density = density.max(0.0);
        Ok(MaterialCatalog(
            self.0
                .iter()
                .map(|m| {
                    if m.id == id {
                        Material { density, ..m.clone() }
                    } else {
                        m.clone()
                    }
                })
                .collect(),
        ))
    }

    /// Merges persisted densities onto this catalog by id.
    ///
    /// Entries without an override keep their density; overrides for ids
    /// that are not in the catalog are discarded. Names and order always
    /// come from the catalog.
    pub fn merge_overrides(&self, overrides: &[DensityOverride]) -> Self {
        MaterialCatalog(
            self.0
                .iter()
                .map(|m| match overrides.iter().find(|o| o.id == m.id) {
                    Some(o) => Material {
                        density: o.density,
                        ..m.clone()
                    },
                    None => m.clone(),
                })
                .collect(),
        )
    }
}

// =============================================================================
// Loss Settings
// =============================================================================

/// Sequential material loss percentages applied to the cast weight.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LossSettings {
    /// Lost during post-cast cleanup (0-100 %).
    pub mold_finishing_loss: f64,

    /// Lost during later manufacturing steps (0-100 %).
    pub production_loss: f64,
}

impl LossSettings {
    /// Returns a copy with both percentages clamped to [0, 100].
    pub fn clamped(self) -> Self {
        LossSettings {
            mold_finishing_loss: clamp_percentage(self.mold_finishing_loss),
            production_loss: clamp_percentage(self.production_loss),
        }
    }
}

// =============================================================================
// Ring Group Price Settings
// =============================================================================

/// Price adjustments applied per ring size group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RingGroupPriceSettings {
    /// Discount for sizes 10-13 (0-100 %).
    pub small_group_discount: f64,

    /// Surcharge for sizes 18-20 (0-100 %).
    pub large_group_surcharge: f64,
}

impl Default for RingGroupPriceSettings {
    fn default() -> Self {
        RingGroupPriceSettings {
            small_group_discount: 10.0,
            large_group_surcharge: 15.0,
        }
    }
}

impl RingGroupPriceSettings {
    /// Returns a copy with both percentages clamped to [0, 100].
    pub fn clamped(self) -> Self {
        RingGroupPriceSettings {
            small_group_discount: clamp_percentage(self.small_group_discount),
            large_group_surcharge: clamp_percentage(self.large_group_surcharge),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = MaterialCatalog::default();
        let ids: Vec<&str> = catalog.materials().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["925-silver", "14k-gold", "18k-gold", "22k-gold"]);
        assert_eq!(catalog.density_of(DEFAULT_MATERIAL_ID).unwrap(), 13.07);
    }

    #[test]
    fn test_density_of_unknown_material() {
        let catalog = MaterialCatalog::default();
        let err = catalog.density_of("platinum").unwrap_err();
        assert!(matches!(err, CoreError::MaterialNotFound(id) if id == "platinum"));
    }

    #[test]
    fn test_with_density_replaces_only_target() {
        let catalog = MaterialCatalog::default().with_density("18k-gold", 16.0).unwrap();
        assert_eq!(catalog.density_of("18k-gold").unwrap(), 16.0);
        assert_eq!(catalog.density_of("925-silver").unwrap(), 10.4);
        assert_eq!(catalog.get("18k-gold").unwrap().name, "18K Gold");
    }

    #[test]
    fn test_with_density_floors_negative() {
        let catalog = MaterialCatalog::default().with_density("22k-gold", -3.0).unwrap();
        assert_eq!(catalog.density_of("22k-gold").unwrap(), 0.0);
    }

    #[test]
    fn test_merge_overrides_keeps_missing_and_drops_unknown() {
        let overrides = vec![
            DensityOverride {
                id: "14k-gold".to_string(),
                density: 13.5,
            },
            DensityOverride {
                id: "platinum".to_string(),
                density: 21.45,
            },
        ];

        let merged = MaterialCatalog::default().merge_overrides(&overrides);

        assert_eq!(merged.materials().len(), 4);
        assert_eq!(merged.density_of("14k-gold").unwrap(), 13.5);
        assert_eq!(merged.density_of("22k-gold").unwrap(), 17.5);
        assert!(merged.get("platinum").is_none());
    }

    #[test]
    fn test_clamped_settings() {
        let loss = LossSettings {
            mold_finishing_loss: 120.0,
            production_loss: -1.0,
        }
        .clamped();
        assert_eq!(loss.mold_finishing_loss, 100.0);
        assert_eq!(loss.production_loss, 0.0);

        let ring = RingGroupPriceSettings {
            small_group_discount: f64::NAN,
            large_group_surcharge: 15.0,
        }
        .clamped();
        assert_eq!(ring.small_group_discount, 0.0);
        assert_eq!(ring.large_group_surcharge, 15.0);
    }

    #[test]
    fn test_settings_defaults() {
        assert_eq!(
            LossSettings::default(),
            LossSettings {
                mold_finishing_loss: 0.0,
                production_loss: 0.0
            }
        );
        let ring = RingGroupPriceSettings::default();
        assert_eq!(ring.small_group_discount, 10.0);
        assert_eq!(ring.large_group_surcharge, 15.0);
    }

    #[test]
    fn test_settings_wire_shape_is_camel_case() {
        let json = serde_json::to_value(RingGroupPriceSettings::default()).unwrap();
        assert_eq!(json["smallGroupDiscount"], 10.0);
        assert_eq!(json["largeGroupSurcharge"], 15.0);

        let json = serde_json::to_value(LossSettings::default()).unwrap();
        assert!(json.get("moldFinishingLoss").is_some());
        assert!(json.get("productionLoss").is_some());
    }
}
