//! # Ring Commands
//!
//! Commands behind the ring size calculator.

use tracing::debug;

use kuyum_core::RingGroupResult;

use crate::state::{RingForm, RingFormState, SettingsState};

/// Stores the ring form and returns the table for it.
///
/// ## Returns
/// Three groups (Small, Medium, Large) with `{size, weight, price}` rows,
/// priced with the current group adjustments.
pub fn calculate_ring_table(
    settings: &SettingsState,
    ring: &RingFormState,
    form: RingForm,
) -> Vec<RingGroupResult> {
    debug!(
        reference_weight = %form.reference_weight,
        reference_price = %form.reference_price,
        "calculate_ring_table command"
    );
    let table = form.table(&settings.ring_group_price_settings());
    ring.set(form);
    table
}

/// Recomputes the table for the stored form, e.g. after a settings change.
pub fn get_ring_table(settings: &SettingsState, ring: &RingFormState) -> Vec<RingGroupResult> {
    debug!("get_ring_table command");
    let adjustments = settings.ring_group_price_settings();
    ring.with_form(|form| form.table(&adjustments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuyum_store::{SettingsStore, StoreConfig};

    fn settings() -> SettingsState {
        SettingsState::new(SettingsStore::new(StoreConfig::in_memory().open()))
    }

    #[test]
    fn test_table_follows_settings_commits() {
        let settings = settings();
        let ring = RingFormState::new();

        let table = calculate_ring_table(
            &settings,
            &ring,
            RingForm {
                reference_weight: "5".to_string(),
                reference_price: "1000".to_string(),
            },
        );
        assert_eq!(table[2].results[2].price, 1437.5);

        settings.commit_ring_group_price_settings("0", "0");
        let table = get_ring_table(&settings, &ring);
        assert_eq!(table[0].results[0].price, 625.0);
        assert_eq!(table[2].results[2].price, 1250.0);
    }
}
