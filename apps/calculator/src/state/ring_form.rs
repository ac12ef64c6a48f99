//! # Ring Form State
//!
//! Reference weight and price typed on the ring size calculator.
//!
//! The ring table is cheap and has no validation schema, so it is
//! recomputed synchronously on every edit.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use kuyum_core::input::coerce_number;
use kuyum_core::{calculate_ring_weights, RingGroupPriceSettings, RingGroupResult};

/// Raw ring form input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RingForm {
    /// Weight at size 16 in grams.
    pub reference_weight: String,

    /// Price at size 16. Empty means no price column.
    pub reference_price: String,
}

impl RingForm {
    /// Builds the ring table. Unreadable numbers count as 0.
    pub fn table(&self, settings: &RingGroupPriceSettings) -> Vec<RingGroupResult> {
        calculate_ring_weights(
            coerce_number(&self.reference_weight),
            coerce_number(&self.reference_price),
            Some(settings),
        )
    }
}

/// Shared ring form state.
#[derive(Debug, Clone, Default)]
pub struct RingFormState {
    form: Arc<Mutex<RingForm>>,
}

impl RingFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the form.
    pub fn with_form<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&RingForm) -> R,
    {
        let form = self.form.lock().expect("Ring form mutex poisoned");
        f(&form)
    }

    /// Replaces the form contents.
    pub fn set(&self, form: RingForm) {
        *self.form.lock().expect("Ring form mutex poisoned") = form;
    }

    pub fn form(&self) -> RingForm {
        self.with_form(Clone::clone)
    }
}
