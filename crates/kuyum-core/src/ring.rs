//! # Ring Size Table
//!
//! Derives weight and price for every ring size from one reference ring.
//!
//! ## Size Groups
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  size:   10  11  12  13 │ 14  15  16  17 │ 18  19  20                   │
//! │          ───────────────┼────────────────┼────────────                  │
//! │          Small Group    │ Medium Group   │ Large Group                  │
//! │          × (1 - disc%)  │ × 1            │ × (1 + surcharge%)           │
//! │                         │      ▲         │                              │
//! │                         │  reference 16  │                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Weight and base price both scale linearly with size: `size / 16 × ref`.
//! The group adjustment only touches price.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::rounding::round2;
use crate::types::RingGroupPriceSettings;
use crate::{MAX_RING_SIZE, MIN_RING_SIZE, REFERENCE_RING_SIZE};

// =============================================================================
// Ring Group
// =============================================================================

/// One of the three fixed size bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RingGroup {
    /// Sizes 10-13, discounted.
    Small,
    /// Sizes 14-17, unadjusted.
    Medium,
    /// Sizes 18-20, surcharged.
    Large,
}

impl RingGroup {
    /// All groups in display order.
    pub const ALL: [RingGroup; 3] = [RingGroup::Small, RingGroup::Medium, RingGroup::Large];

    /// Returns the group a size belongs to, or `None` outside 10..=20.
    pub fn for_size(size: u32) -> Option<RingGroup> {
        match size {
            10..=13 => Some(RingGroup::Small),
            14..=17 => Some(RingGroup::Medium),
            18..=20 => Some(RingGroup::Large),
            _ => None,
        }
    }

    /// Returns the sizes in this group, ascending.
    pub fn sizes(&self) -> Vec<u32> {
        let range = match self {
            RingGroup::Small => 10..=13,
            RingGroup::Medium => 14..=17,
            RingGroup::Large => 18..=20,
        };
        range.collect()
    }

    /// Returns the group label.
    pub fn label(&self) -> &'static str {
        match self {
            RingGroup::Small => "Small Group",
            RingGroup::Medium => "Medium Group",
            RingGroup::Large => "Large Group",
        }
    }

    /// Returns the multiplier applied to the linear price.
    pub fn price_multiplier(&self, settings: &RingGroupPriceSettings) -> f64 {
        match self {
            RingGroup::Small => 1.0 - settings.small_group_discount / 100.0,
            RingGroup::Medium => 1.0,
            RingGroup::Large => 1.0 + settings.large_group_surcharge / 100.0,
        }
    }
}

/// Every ring size in the table, ascending.
pub fn ring_sizes() -> impl Iterator<Item = u32> {
    MIN_RING_SIZE..=MAX_RING_SIZE
}

// =============================================================================
// Results
// =============================================================================

/// Weight (g) and price for a single ring size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RingSizeResult {
    pub size: u32,
    pub weight: f64,
    pub price: f64,
}

/// One size group of the ring table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RingGroupResult {
    pub group: RingGroup,
    pub group_name: String,
    pub sizes: Vec<u32>,
    pub results: Vec<RingSizeResult>,
}

// =============================================================================
// Calculation
// =============================================================================

/// Calculates the ring size table.
///
/// ## Arguments
/// * `reference_weight` - grams at size 16; `<= 0` yields an all-zero table
/// * `reference_price` - price at size 16; `0` means price not requested
/// * `settings` - group adjustments, defaults (10 % / 15 %) when `None`
///
/// ## Example
/// ```rust
/// use kuyum_core::ring::calculate_ring_weights;
///
/// let groups = calculate_ring_weights(5.0, 1000.0, None);
/// let size_10 = groups[0].results[0];
///
/// assert_eq!(size_10.size, 10);
/// assert_eq!(size_10.weight, 3.13);
/// assert_eq!(size_10.price, 562.5);
/// ```
pub fn calculate_ring_weights(
    reference_weight: f64,
    reference_price: f64,
    settings: Option<&RingGroupPriceSettings>,
) -> Vec<RingGroupResult> {
    let settings = settings.copied().unwrap_or_default();

    RingGroup::ALL
        .iter()
        .map(|group| {
            let sizes = group.sizes();
            let results = sizes
                .iter()
                .map(|&size| size_result(size, *group, reference_weight, reference_price, &settings))
                .collect();

            RingGroupResult {
                group: *group,
                group_name: group.label().to_string(),
                sizes,
                results,
            }
        })
        .collect()
}

fn size_result(
    size: u32,
    group: RingGroup,
    reference_weight: f64,
    reference_price: f64,
    settings: &RingGroupPriceSettings,
) -> RingSizeResult {
    if reference_weight <= 0.0 {
        return RingSizeResult {
            size,
            weight: 0.0,
            price: 0.0,
        };
    }

    let ratio = size as f64 / REFERENCE_RING_SIZE as f64;
    let weight = ratio * reference_weight;
    let price = if reference_price > 0.0 {
        ratio * reference_price * group.price_multiplier(settings)
    } else {
        0.0
    };

    RingSizeResult {
        size,
        weight: round2(weight),
        price: round2(price),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn find(groups: &[RingGroupResult], size: u32) -> RingSizeResult {
        groups
            .iter()
            .flat_map(|g| g.results.iter())
            .find(|r| r.size == size)
            .copied()
            .unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_reference_example() {
        let settings = RingGroupPriceSettings {
            small_group_discount: 10.0,
            large_group_surcharge: 15.0,
        };
        let groups = calculate_ring_weights(5.0, 1000.0, Some(&settings));

        let size_10 = find(&groups, 10);
        assert_close(size_10.weight, 3.13);
        assert_close(size_10.price, 562.5);

        let size_16 = find(&groups, 16);
        assert_close(size_16.weight, 5.0);
        assert_close(size_16.price, 1000.0);

        let size_20 = find(&groups, 20);
        assert_close(size_20.weight, 6.25);
        assert_close(size_20.price, 1437.5);
    }

    #[test]
    fn test_zero_reference_yields_zero_table() {
        let groups = calculate_ring_weights(0.0, 0.0, None);

        assert_eq!(groups.len(), 3);
        let all: Vec<_> = groups.iter().flat_map(|g| g.results.iter()).collect();
        assert_eq!(all.len(), 11);
        assert!(all.iter().all(|r| r.weight == 0.0 && r.price == 0.0));
    }

    #[test]
    fn test_negative_reference_weight_ignores_price() {
        let groups = calculate_ring_weights(-2.0, 500.0, None);
        assert!(groups
            .iter()
            .flat_map(|g| g.results.iter())
            .all(|r| r.weight == 0.0 && r.price == 0.0));
    }

    #[test]
    fn test_price_not_requested() {
        let groups = calculate_ring_weights(4.0, 0.0, None);
        let size_18 = find(&groups, 18);
        assert_close(size_18.weight, 4.5);
        assert_eq!(size_18.price, 0.0);
    }

    #[test]
    fn test_default_settings_when_none() {
        let explicit = calculate_ring_weights(3.2, 800.0, Some(&RingGroupPriceSettings::default()));
        let implicit = calculate_ring_weights(3.2, 800.0, None);
        assert_eq!(explicit, implicit);
    }

    #[test]
    fn test_group_partition_is_complete() {
        for reference in [0.0, 1.0, 7.77] {
            let groups = calculate_ring_weights(reference, 100.0, None);

            let names: Vec<&str> = groups.iter().map(|g| g.group_name.as_str()).collect();
            assert_eq!(names, vec!["Small Group", "Medium Group", "Large Group"]);

            let mut sizes: Vec<u32> = groups.iter().flat_map(|g| g.sizes.clone()).collect();
            sizes.sort_unstable();
            assert_eq!(sizes, ring_sizes().collect::<Vec<_>>());

            for group in &groups {
                let result_sizes: Vec<u32> = group.results.iter().map(|r| r.size).collect();
                assert_eq!(result_sizes, group.sizes);
            }
        }
    }

    #[test]
    fn test_weight_is_linear_in_size() {
        let reference = 7.3;
        let groups = calculate_ring_weights(reference, 0.0, None);
        let at_16 = find(&groups, 16).weight;

        for size in ring_sizes() {
            let weight = find(&groups, size).weight;
            let expected_ratio = size as f64 / 16.0;
            assert!((weight / at_16 - expected_ratio).abs() < 0.01);
        }
    }

    #[test]
    fn test_for_size() {
        assert_eq!(RingGroup::for_size(10), Some(RingGroup::Small));
        assert_eq!(RingGroup::for_size(13), Some(RingGroup::Small));
        assert_eq!(RingGroup::for_size(14), Some(RingGroup::Medium));
        assert_eq!(RingGroup::for_size(17), Some(RingGroup::Medium));
        assert_eq!(RingGroup::for_size(18), Some(RingGroup::Large));
        assert_eq!(RingGroup::for_size(20), Some(RingGroup::Large));
        assert_eq!(RingGroup::for_size(9), None);
        assert_eq!(RingGroup::for_size(21), None);
    }

    #[test]
    fn test_zero_adjustments_make_price_linear() {
        let settings = RingGroupPriceSettings {
            small_group_discount: 0.0,
            large_group_surcharge: 0.0,
        };
        let groups = calculate_ring_weights(5.0, 1600.0, Some(&settings));
        for size in ring_sizes() {
            assert_close(find(&groups, size).price, size as f64 * 100.0);
        }
    }
}
