//! # Commands Module
//!
//! All commands exposed to the UI host.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── weight.rs    ◄─── Weight form edits, material selection, results
//! ├── ring.rs      ◄─── Ring size table
//! └── settings.rs  ◄─── Densities, loss and group price settings, resets
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  UI host                                                                │
//! │  ───────                                                                │
//! │  raw text from inputs, booleans from toggles, material ids             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Rust Backend                                                           │
//! │  ────────────                                                           │
//! │  fn update_weight_form(                                                 │
//! │      session: &WeightSession,   ◄── Only the state it needs            │
//! │      update: WeightFormUpdate,  ◄── From the UI                        │
//! │  ) -> WeightForm                                                        │
//! │         │                                                               │
//! │         │ (numbers only: results, tables, settings)                     │
//! │         ▼                                                               │
//! │  UI host renders                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod ring;
pub mod settings;
pub mod weight;
