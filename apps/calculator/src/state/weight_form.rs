//! # Weight Form State
//!
//! The weight calculator form and its debounced result.
//!
//! ## Recompute Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Weight Session                                       │
//! │                                                                         │
//! │  UI edit ──► update() ──► form (Arc<Mutex>) ──► Debouncer (300 ms)     │
//! │                  │                                  │                   │
//! │                  └─► field_errors → errors (at once)│                   │
//! │  loss settings commit ──► refresh() ───────────────►│                   │
//! │                                                     ▼                   │
//! │                                    evaluate(form, loss settings)        │
//! │                                     ├─ validate_weight_form → errors    │
//! │                                     └─ gate: volume > 0 && density > 0  │
//! │                                          → calculate_weight             │
//! │                                                     │                   │
//! │                                                     ▼                   │
//! │  UI ◄── watch::Receiver<WeightEvaluation> ◄── watch::Sender            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation and the numeric gate are independent: a field can show an
//! error while a result is still produced from the coerced numbers.
//!
//! Field errors are published on every edit. Only the result waits for the
//! quiet period; until then the previous result stays in place.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use kuyum_core::input::coerce_number;
use kuyum_core::validation::{validate_weight_form, WeightFormInput};
use kuyum_core::{
    calculate_weight, CalculationParams, CalculationResult, CoreResult, LossSettings,
    MaterialCatalog, ValidationError,
};

use crate::debounce::Debouncer;
use crate::state::SettingsState;

// =============================================================================
// Form
// =============================================================================

/// Everything the user has entered on the weight form.
///
/// Numbers are kept as typed; they are parsed on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightForm {
    pub volume: String,
    pub material_id: String,
    pub material_density: String,
    pub stone_weight: String,
    pub include_mold_finishing: bool,
    pub necklace_tip: bool,
    pub earring_back: bool,
}

impl WeightForm {
    /// Creates an empty form with `material_id` selected.
    pub fn new(catalog: &MaterialCatalog, material_id: &str) -> CoreResult<Self> {
        let density = catalog.density_of(material_id)?;
        Ok(WeightForm {
            volume: String::new(),
            material_id: material_id.to_string(),
            material_density: density.to_string(),
            stone_weight: String::new(),
            include_mold_finishing: false,
            necklace_tip: false,
            earring_back: false,
        })
    }

    /// Selects a material and copies its density into the form.
    pub fn select_material(&mut self, catalog: &MaterialCatalog, material_id: &str) -> CoreResult<()> {
        let density = catalog.density_of(material_id)?;
        self.material_id = material_id.to_string();
        self.material_density = density.to_string();
        Ok(())
    }

    /// Applies a partial update. Absent fields are left untouched.
    pub fn apply(&mut self, update: WeightFormUpdate) {
        if let Some(volume) = update.volume {
            self.volume = volume;
        }
        if let Some(density) = update.material_density {
            self.material_density = density;
        }
        if let Some(stone_weight) = update.stone_weight {
            self.stone_weight = stone_weight;
        }
        if let Some(include) = update.include_mold_finishing {
            self.include_mold_finishing = include;
        }
        if let Some(tip) = update.necklace_tip {
            self.necklace_tip = tip;
        }
        if let Some(back) = update.earring_back {
            self.earring_back = back;
        }
    }

    fn input(&self) -> WeightFormInput {
        WeightFormInput {
            volume: self.volume.clone(),
            material_density: self.material_density.clone(),
            stone_weight: self.stone_weight.clone(),
        }
    }
}

/// A partial form edit sent by the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeightFormUpdate {
    pub volume: Option<String>,
    pub material_density: Option<String>,
    pub stone_weight: Option<String>,
    pub include_mold_finishing: Option<bool>,
    pub necklace_tip: Option<bool>,
    pub earring_back: Option<bool>,
}

// =============================================================================
// Evaluation
// =============================================================================

/// A field error as shown next to the form input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<&ValidationError> for FieldError {
    fn from(err: &ValidationError) -> Self {
        FieldError {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

/// Field errors plus the result, if the inputs allow one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightEvaluation {
    pub errors: Vec<FieldError>,
    pub result: Option<CalculationResult>,
}

/// Validates the form and, when the numeric gate passes, calculates.
///
/// The gate only requires the coerced volume and density to be positive.
///
/// ## Example
/// ```rust
/// use kuyum_calculator::state::{evaluate, WeightForm};
/// use kuyum_core::{LossSettings, MaterialCatalog};
///
/// let mut form = WeightForm::new(&MaterialCatalog::default(), "14k-gold").unwrap();
/// form.volume = "50000".to_string();
///
/// let evaluation = evaluate(&form, &LossSettings::default());
/// assert!(evaluation.errors.is_empty());
/// assert_eq!(evaluation.result.unwrap().final_weight, 653.5);
/// ```
pub fn evaluate(form: &WeightForm, loss: &LossSettings) -> WeightEvaluation {
    let errors = field_errors(form);

    let volume = coerce_number(&form.volume);
    let density = coerce_number(&form.material_density);

    let result = if volume > 0.0 && density > 0.0 {
        let params = CalculationParams::from_form(
            volume,
            density,
            coerce_number(&form.stone_weight),
            loss,
            form.include_mold_finishing,
            form.necklace_tip,
            form.earring_back,
        );
        Some(calculate_weight(&params))
    } else {
        None
    };

    WeightEvaluation { errors, result }
}

/// Runs the form schema and returns one error per failing field.
pub fn field_errors(form: &WeightForm) -> Vec<FieldError> {
    match validate_weight_form(&form.input()) {
        Ok(_) => Vec::new(),
        Err(report) => report.errors().iter().map(FieldError::from).collect(),
    }
}

// =============================================================================
// Session
// =============================================================================

/// The live weight form with debounced recomputation.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct WeightSession {
    form: Arc<Mutex<WeightForm>>,
    settings: SettingsState,
    results: Arc<watch::Sender<WeightEvaluation>>,
    debouncer: Debouncer,
}

impl WeightSession {
    /// Creates a session with `material_id` selected and no result yet.
    pub fn new(settings: SettingsState, material_id: &str, debounce: Duration) -> CoreResult<Self> {
        let form = WeightForm::new(&settings.materials(), material_id)?;
        let (results, _) = watch::channel(WeightEvaluation::default());

        Ok(WeightSession {
            form: Arc::new(Mutex::new(form)),
            settings,
            results: Arc::new(results),
            debouncer: Debouncer::new(debounce),
        })
    }

    /// Executes a function with read access to the form.
    pub fn with_form<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&WeightForm) -> R,
    {
        let form = self.form.lock().expect("Weight form mutex poisoned");
        f(&form)
    }

    fn with_form_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut WeightForm) -> R,
    {
        let mut form = self.form.lock().expect("Weight form mutex poisoned");
        f(&mut form)
    }

    pub fn form(&self) -> WeightForm {
        self.with_form(Clone::clone)
    }

    /// Subscribes to evaluation results.
    pub fn subscribe(&self) -> watch::Receiver<WeightEvaluation> {
        self.results.subscribe()
    }

    /// Returns the most recently published evaluation.
    pub fn latest(&self) -> WeightEvaluation {
        self.results.borrow().clone()
    }

    /// Applies an edit, publishes its field errors and schedules
    /// recomputation.
    pub fn update(&self, update: WeightFormUpdate) -> WeightForm {
        let form = self.with_form_mut(|form| {
            form.apply(update);
            form.clone()
        });
        self.publish_errors(&form);
        self.refresh();
        form
    }

    /// Selects a material and schedules recomputation.
    pub fn select_material(&self, material_id: &str) -> CoreResult<WeightForm> {
        let catalog = self.settings.materials();
        let form = self.with_form_mut(|form| -> CoreResult<WeightForm> {
            form.select_material(&catalog, material_id)?;
            Ok(form.clone())
        })?;
        self.publish_errors(&form);
        self.refresh();
        Ok(form)
    }

    /// Replaces the published field errors, notifying only on change.
    fn publish_errors(&self, form: &WeightForm) {
        let errors = field_errors(form);
        self.results.send_if_modified(|evaluation| {
            if evaluation.errors == errors {
                return false;
            }
            evaluation.errors = errors;
            true
        });
    }

    /// Re-reads the selected material's density after a catalog change.
    pub fn sync_material_density(&self) {
        let catalog = self.settings.materials();
        let changed = self.with_form_mut(|form| match catalog.density_of(&form.material_id) {
            Ok(density) if form.material_density != density.to_string() => {
                form.material_density = density.to_string();
                Some(form.clone())
            }
            _ => None,
        });
        if let Some(form) = changed {
            self.publish_errors(&form);
            self.refresh();
        }
    }

    /// Schedules recomputation with the current form and settings.
    ///
    /// The form and loss settings are read when the timer fires, so the
    /// last edit of a burst wins.
    pub fn refresh(&self) {
        let form = Arc::clone(&self.form);
        let settings = self.settings.clone();
        let results = Arc::clone(&self.results);

        self.debouncer.schedule(move || {
            let form = form.lock().expect("Weight form mutex poisoned").clone();
            let evaluation = evaluate(&form, &settings.loss_settings());
            debug!(
                errors = evaluation.errors.len(),
                final_weight = ?evaluation.result.map(|r| r.final_weight),
                "Weight recomputed"
            );
            results.send_replace(evaluation);
        });
    }

    /// Returns true while a recomputation is waiting for its window.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
