//! # Weight Commands
//!
//! Commands behind the weight calculator form.
//!
//! ## Form Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  get_weight_form ──► render inputs                                     │
//! │                                                                         │
//! │  keystroke ──► update_weight_form ──► field errors pushed at once       │
//! │                                   └──► (300 ms quiet) ──► result pushed │
//! │  dropdown  ──► select_material    ──►        "       ──►      "        │
//! │                                                                         │
//! │  get_weight_result ──► last published evaluation                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands that edit the form schedule work on the tokio runtime and must
//! be called from within it.

use tracing::debug;

use crate::error::ApiError;
use crate::state::{evaluate, SettingsState, WeightEvaluation, WeightForm, WeightFormUpdate, WeightSession};

/// Returns the current form contents.
pub fn get_weight_form(session: &WeightSession) -> WeightForm {
    debug!("get_weight_form command");
    session.form()
}

/// Applies a partial edit, publishes its field errors and schedules
/// recomputation.
pub fn update_weight_form(session: &WeightSession, update: WeightFormUpdate) -> WeightForm {
    debug!(?update, "update_weight_form command");
    session.update(update)
}

/// Selects a material, copying its density into the form.
///
/// ## Errors
/// `NOT_FOUND` for an unknown material id.
pub fn select_material(session: &WeightSession, material_id: String) -> Result<WeightForm, ApiError> {
    debug!(material_id = %material_id, "select_material command");
    Ok(session.select_material(&material_id)?)
}

/// Returns the most recently published evaluation.
pub fn get_weight_result(session: &WeightSession) -> WeightEvaluation {
    debug!("get_weight_result command");
    session.latest()
}

/// Evaluates a form immediately, without touching the session.
pub fn evaluate_weight_form(settings: &SettingsState, form: WeightForm) -> WeightEvaluation {
    debug!("evaluate_weight_form command");
    evaluate(&form, &settings.loss_settings())
}
