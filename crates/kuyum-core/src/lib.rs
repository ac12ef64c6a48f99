//! # kuyum-core: Pure Calculation Logic for the Kuyum Calculator
//!
//! This crate is the **heart** of the calculator. It turns physical
//! parameters of a 3D-printed jewelry model into finished-piece weights and
//! derives a ring size price/weight table. Everything here is a pure function.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Kuyum Calculator Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Host UI (forms, dialogs)                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ raw input / numeric results            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              kuyum-calculator (state + commands)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kuyum-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  weight   │  │   ring    │  │ validation│  │   │
//! │  │   │ Material  │  │ calculate │  │ calculate │  │  schema   │  │   │
//! │  │   │ Settings  │  │  _weight  │  │  _ring..  │  │  + input  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO TIMERS • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 kuyum-store (Settings Store)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Materials, loss settings, ring group price settings
//! - [`weight`] - Volume → finished weight
//! - [`ring`] - Reference ring → per-size weight/price table
//! - [`validation`] - Field rules for raw weight form input
//! - [`input`] - Coercion of raw text into numbers and committed percentages
//! - [`rounding`] - Two-decimal reporting
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use kuyum_core::weight::{calculate_weight, CalculationParams};
//!
//! let result = calculate_weight(&CalculationParams {
//!     volume: 50_000.0,
//!     material_density: 13.07,
//!     infill: 100.0,
//!     mold_finishing_loss: 10.0,
//!     production_loss: 5.0,
//!     stone_weight: 0.0,
//!     necklace_tip: false,
//!     earring_back: false,
//! });
//!
//! assert_eq!(result.after_mold_finishing, 588.15);
//! assert_eq!(result.final_weight, 558.74);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod input;
pub mod ring;
pub mod rounding;
pub mod types;
pub mod validation;
pub mod weight;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use ring::{calculate_ring_weights, RingGroup, RingGroupResult, RingSizeResult};
pub use types::*;
pub use weight::{calculate_weight, CalculationParams, CalculationResult};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Ring size whose weight and price the user enters.
pub const REFERENCE_RING_SIZE: u32 = 16;

/// Smallest ring size in the table.
pub const MIN_RING_SIZE: u32 = 10;

/// Largest ring size in the table.
pub const MAX_RING_SIZE: u32 = 20;

/// Weight added by a necklace bail (top loop), in grams.
pub const NECKLACE_TIP_WEIGHT_G: f64 = 0.15;

/// Weight added by an earring post and butterfly back, in grams.
pub const EARRING_BACK_WEIGHT_G: f64 = 0.40;

/// Infill used by the product surface. Printed masters are always solid.
pub const DEFAULT_INFILL_PERCENT: f64 = 100.0;

/// Upper bound accepted for a model volume (mm³).
pub const MAX_VOLUME_MM3: f64 = 100_000_000.0;

/// Upper bound accepted for a material density (g/cm³).
///
/// Osmium, the densest element, sits at ~22.6 g/cm³.
pub const MAX_DENSITY_G_CM3: f64 = 30.0;

/// Upper bound accepted for total stone weight (g).
pub const MAX_STONE_WEIGHT_G: f64 = 1000.0;
