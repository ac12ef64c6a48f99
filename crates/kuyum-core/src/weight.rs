//! # Weight Calculation
//!
//! Converts a printed model's volume into the weight of the finished piece.
//!
//! ## Calculation Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Volume → Finished Weight                            │
//! │                                                                         │
//! │  volume (mm³) ──÷1000──► cm³                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  baseWeight          = cm³ × density × infill%                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  afterMoldFinishing  = baseWeight × (1 - moldFinishingLoss%)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  afterProductionLoss = afterMoldFinishing × (1 - productionLoss%)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  finalWeight         = afterProductionLoss + stones + add-ons          │
//! │                                           (never subject to loss)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each stage compounds on the previous one in full precision. The four
//! reported values are rounded independently with [`round2`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::rounding::round2;
use crate::types::LossSettings;
use crate::{DEFAULT_INFILL_PERCENT, EARRING_BACK_WEIGHT_G, NECKLACE_TIP_WEIGHT_G};

// =============================================================================
// Parameters
// =============================================================================

/// Input of a single weight calculation.
///
/// The function performs no validation: guarding positivity and ranges is
/// the caller's job (see [`crate::validation`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculationParams {
    /// Model volume in mm³.
    pub volume: f64,

    /// Material density in g/cm³.
    pub material_density: f64,

    /// Fill percentage, 0-100.
    pub infill: f64,

    /// Mold finishing loss percentage, 0-100.
    pub mold_finishing_loss: f64,

    /// Production loss percentage, 0-100.
    pub production_loss: f64,

    /// Total stone weight in grams.
    pub stone_weight: f64,

    /// Adds a necklace bail.
    pub necklace_tip: bool,

    /// Adds an earring post and back.
    pub earring_back: bool,
}

impl CalculationParams {
    /// Assembles parameters the way the calculator form does.
    ///
    /// ## Rules
    /// - Infill is always 100 %
    /// - Mold finishing loss only applies when `include_mold_finishing` is on
    /// - Production loss always applies
    pub fn from_form(
        volume: f64,
        material_density: f64,
        stone_weight: f64,
        loss: &LossSettings,
        include_mold_finishing: bool,
        necklace_tip: bool,
        earring_back: bool,
    ) -> Self {
        CalculationParams {
            volume,
            material_density,
            infill: DEFAULT_INFILL_PERCENT,
            mold_finishing_loss: if include_mold_finishing {
                loss.mold_finishing_loss
            } else {
                0.0
            },
            production_loss: loss.production_loss,
            stone_weight,
            necklace_tip,
            earring_back,
        }
    }
}

// =============================================================================
// Result
// =============================================================================

/// Weight breakdown in grams, each value rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub base_weight: f64,
    pub after_mold_finishing: f64,
    pub after_production_loss: f64,
    pub final_weight: f64,
}

// =============================================================================
// Calculation
// =============================================================================

/// Calculates the finished weight of a piece.
///
/// ## Example
/// ```rust
/// use kuyum_core::weight::{calculate_weight, CalculationParams};
///
/// let params = CalculationParams {
///     volume: 50_000.0,
///     material_density: 13.07,
///     infill: 100.0,
///     mold_finishing_loss: 0.0,
///     production_loss: 0.0,
///     stone_weight: 0.0,
///     necklace_tip: false,
///     earring_back: false,
/// };
///
/// let result = calculate_weight(&params);
/// assert_eq!(result.base_weight, 653.5);
/// assert_eq!(result.final_weight, 653.5);
/// ```
pub fn calculate_weight(params: &CalculationParams) -> CalculationResult {
    let volume_cm3 = params.volume / 1000.0;

    let base_weight = volume_cm3 * params.material_density * (params.infill / 100.0);
    let after_mold_finishing = base_weight * (1.0 - params.mold_finishing_loss / 100.0);
    let after_production_loss = after_mold_finishing * (1.0 - params.production_loss / 100.0);

    let mut extra_weight = 0.0;
    if params.necklace_tip {
        extra_weight += NECKLACE_TIP_WEIGHT_G;
    }
    if params.earring_back {
        extra_weight += EARRING_BACK_WEIGHT_G;
    }

    let final_weight = after_production_loss + params.stone_weight + extra_weight;

    CalculationResult {
        base_weight: round2(base_weight),
        after_mold_finishing: round2(after_mold_finishing),
        after_production_loss: round2(after_production_loss),
        final_weight: round2(final_weight),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn params(volume: f64, mold: f64, production: f64) -> CalculationParams {
        CalculationParams {
            volume,
            material_density: 13.07,
            infill: 100.0,
            mold_finishing_loss: mold,
            production_loss: production,
            stone_weight: 0.0,
            necklace_tip: false,
            earring_back: false,
        }
    }

    #[test]
    fn test_no_losses_all_stages_equal() {
        let result = calculate_weight(&params(50_000.0, 0.0, 0.0));

        assert_eq!(result.base_weight, 653.5);
        assert_eq!(result.after_mold_finishing, 653.5);
        assert_eq!(result.after_production_loss, 653.5);
        assert_eq!(result.final_weight, 653.5);
    }

    #[test]
    fn test_losses_compound_sequentially() {
        let result = calculate_weight(&params(50_000.0, 10.0, 5.0));

        assert_eq!(result.base_weight, 653.5);
        assert_eq!(result.after_mold_finishing, 588.15);
        assert_eq!(result.after_production_loss, 558.74);
        assert_eq!(result.final_weight, 558.74);
    }

    #[test]
    fn test_stones_and_addons_skip_losses() {
        let mut p = params(1_000.0, 50.0, 50.0);
        p.material_density = 10.0;
        p.stone_weight = 1.25;
        p.necklace_tip = true;
        p.earring_back = true;

        let result = calculate_weight(&p);

        // 1 cm³ × 10 = 10 g → 5 g → 2.5 g, then + 1.25 + 0.15 + 0.40
        assert_eq!(result.base_weight, 10.0);
        assert_eq!(result.after_mold_finishing, 5.0);
        assert_eq!(result.after_production_loss, 2.5);
        assert_eq!(result.final_weight, 4.3);
    }

    #[test]
    fn test_infill_scales_base_weight() {
        let mut p = params(10_000.0, 0.0, 0.0);
        p.material_density = 10.0;
        p.infill = 25.0;

        assert_eq!(calculate_weight(&p).base_weight, 25.0);
    }

    #[test]
    fn test_full_mold_loss_zeroes_later_stages() {
        for production in [0.0, 37.5, 100.0] {
            let result = calculate_weight(&params(50_000.0, 100.0, production));
            assert_eq!(result.after_mold_finishing, 0.0);
            assert_eq!(result.after_production_loss, 0.0);
        }
    }

    #[test]
    fn test_deterministic() {
        let p = params(12_345.678, 3.3, 7.7);
        let a = calculate_weight(&p);
        let b = calculate_weight(&p);
        assert_eq!(a.final_weight.to_bits(), b.final_weight.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_monotonic_in_volume() {
        let mut previous = 0.0;
        for step in 1..200 {
            let result = calculate_weight(&params(step as f64 * 137.0, 12.0, 4.0));
            assert!(result.final_weight >= previous);
            previous = result.final_weight;
        }
    }

    fn assert_later_stages_never_grow(results: impl Iterator<Item = CalculationResult>) {
        let mut previous: Option<CalculationResult> = None;
        for result in results {
            if let Some(prev) = previous {
                assert!(result.after_mold_finishing <= prev.after_mold_finishing);
                assert!(result.after_production_loss <= prev.after_production_loss);
                assert!(result.final_weight <= prev.final_weight);
            }
            previous = Some(result);
        }
    }

    #[test]
    fn test_monotonic_in_mold_finishing_loss() {
        for production in [0.0, 7.5, 100.0] {
            assert_later_stages_never_grow((0..=100).map(|mold| {
                calculate_weight(&params(20_000.0, mold as f64, production))
            }));
        }
    }

    #[test]
    fn test_monotonic_in_production_loss() {
        for mold in [0.0, 12.0, 100.0] {
            assert_later_stages_never_grow((0..=100).map(|production| {
                calculate_weight(&params(20_000.0, mold, production as f64))
            }));
        }
    }

    #[test]
    fn test_rounding_only_at_reporting_boundary() {
        // base 2.004 g reports as 2.00, but the final weight is built from
        // the unrounded base: 2.004 + 0.004 = 2.008 → 2.01
        let mut p = params(2_004.0, 0.0, 0.0);
        p.material_density = 1.0;
        p.stone_weight = 0.004;

        let result = calculate_weight(&p);
        assert_eq!(result.base_weight, 2.0);
        assert_eq!(result.final_weight, 2.01);
    }

    #[test]
    fn test_from_form_mold_finishing_toggle() {
        let loss = LossSettings {
            mold_finishing_loss: 8.0,
            production_loss: 3.0,
        };

        let off = CalculationParams::from_form(1000.0, 10.4, 0.0, &loss, false, false, true);
        assert_eq!(off.mold_finishing_loss, 0.0);
        assert_eq!(off.production_loss, 3.0);
        assert_eq!(off.infill, 100.0);
        assert!(off.earring_back);

        let on = CalculationParams::from_form(1000.0, 10.4, 0.0, &loss, true, false, false);
        assert_eq!(on.mold_finishing_loss, 8.0);
    }
}
