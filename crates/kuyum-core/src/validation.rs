//! # Validation Module
//!
//! Field rules for the weight calculator form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Weight Form Pipeline                               │
//! │                                                                         │
//! │  raw text ──► input::parse_number_field ──► Option<f64> / NotANumber   │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  THIS MODULE: range rules per field ──► ValidationReport               │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  numeric gate: volume > 0 && density > 0 ──► calculate_weight          │
//! │  (independent of the report: errors are shown, not thrown)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! | field             | rule                       | when absent   |
//! |-------------------|----------------------------|---------------|
//! | `volume`          | > 0, ≤ 100,000,000 mm³     | allowed       |
//! | `materialDensity` | > 0, ≤ 30 g/cm³            | `Required`    |
//! | `stoneWeight`     | ≥ 0, ≤ 1000 g              | defaults to 0 |

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::input::parse_number_field;
use crate::{MAX_DENSITY_G_CM3, MAX_STONE_WEIGHT_G, MAX_VOLUME_MM3};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Field name of the model volume.
pub const FIELD_VOLUME: &str = "volume";
/// Field name of the material density.
pub const FIELD_MATERIAL_DENSITY: &str = "materialDensity";
/// Field name of the stone weight.
pub const FIELD_STONE_WEIGHT: &str = "stoneWeight";

// =============================================================================
// Field Validators
// =============================================================================

fn require_finite(field: &str, value: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotANumber {
            field: field.to_string(),
        });
    }
    Ok(value)
}

/// Validates the model volume.
///
/// Absence is not an error: it means "no result yet".
///
/// ## Example
/// ```rust
/// use kuyum_core::validation::validate_volume;
///
/// assert_eq!(validate_volume(None), Ok(None));
/// assert!(validate_volume(Some(50_000.0)).is_ok());
/// assert!(validate_volume(Some(0.0)).is_err());
/// ```
pub fn validate_volume(volume: Option<f64>) -> ValidationResult<Option<f64>> {
    let Some(volume) = volume else {
        return Ok(None);
    };
    let volume = require_finite(FIELD_VOLUME, volume)?;

    if volume <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: FIELD_VOLUME.to_string(),
        });
    }

    if volume > MAX_VOLUME_MM3 {
        return Err(ValidationError::TooLarge {
            field: FIELD_VOLUME.to_string(),
            max: MAX_VOLUME_MM3,
        });
    }

    Ok(Some(volume))
}

/// Validates the material density. The field is required.
pub fn validate_material_density(density: Option<f64>) -> ValidationResult<f64> {
    let density = density.ok_or_else(|| ValidationError::Required {
        field: FIELD_MATERIAL_DENSITY.to_string(),
    })?;
    let density = require_finite(FIELD_MATERIAL_DENSITY, density)?;

    if density <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: FIELD_MATERIAL_DENSITY.to_string(),
        });
    }

    if density > MAX_DENSITY_G_CM3 {
        return Err(ValidationError::TooLarge {
            field: FIELD_MATERIAL_DENSITY.to_string(),
            max: MAX_DENSITY_G_CM3,
        });
    }

    Ok(density)
}

/// Validates the stone weight. Absent means 0 g.
pub fn validate_stone_weight(stone_weight: Option<f64>) -> ValidationResult<f64> {
    let stone_weight = require_finite(FIELD_STONE_WEIGHT, stone_weight.unwrap_or(0.0))?;

    if stone_weight < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: FIELD_STONE_WEIGHT.to_string(),
        });
    }

    if stone_weight > MAX_STONE_WEIGHT_G {
        return Err(ValidationError::TooLarge {
            field: FIELD_STONE_WEIGHT.to_string(),
            max: MAX_STONE_WEIGHT_G,
        });
    }

    Ok(stone_weight)
}

// =============================================================================
// Form Validation
// =============================================================================

/// Raw text of the numeric weight form fields, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightFormInput {
    pub volume: String,
    pub material_density: String,
    pub stone_weight: String,
}

/// Weight form values that passed every rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightFormData {
    pub volume: Option<f64>,
    pub material_density: f64,
    pub stone_weight: f64,
}

/// All field errors of one validation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Returns true when no field failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns every error in field order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns the error of one field, if any.
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    fn push<T>(&mut self, result: ValidationResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.errors.push(err);
                None
            }
        }
    }
}

/// Validates every field of the weight form.
///
/// All fields are checked, so the report lists every problem at once.
///
/// ## Example
/// ```rust
/// use kuyum_core::validation::{validate_weight_form, WeightFormInput, FIELD_STONE_WEIGHT};
///
/// let input = WeightFormInput {
///     volume: "50000".to_string(),
///     material_density: "13.07".to_string(),
///     stone_weight: "-1".to_string(),
/// };
///
/// let report = validate_weight_form(&input).unwrap_err();
/// assert!(report.for_field(FIELD_STONE_WEIGHT).is_some());
/// ```
pub fn validate_weight_form(input: &WeightFormInput) -> Result<WeightFormData, ValidationReport> {
    let mut report = ValidationReport::default();

    let volume = report.push(
        parse_number_field(FIELD_VOLUME, &input.volume).and_then(validate_volume),
    );
    let material_density = report.push(
        parse_number_field(FIELD_MATERIAL_DENSITY, &input.material_density)
            .and_then(validate_material_density),
    );
    let stone_weight = report.push(
        parse_number_field(FIELD_STONE_WEIGHT, &input.stone_weight)
            .and_then(validate_stone_weight),
    );

    match (volume, material_density, stone_weight) {
        (Some(volume), Some(material_density), Some(stone_weight)) => {
            Ok(WeightFormData {
                volume,
                material_density,
                stone_weight,
            })
        }
        _ => Err(report),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
