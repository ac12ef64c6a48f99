//! # State Module
//!
//! Application state for the calculator.
//!
//! Like the commands that use them, each state type covers one screen or
//! concern, so a command declares exactly what it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────┬──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────┐              │
//! │  │SettingsState │  │  WeightSession   │  │RingFormState │              │
//! │  │              │  │                  │  │              │              │
//! │  │ RwLock<      │◄─│ Arc<Mutex<form>> │  │ Arc<Mutex<   │              │
//! │  │  Snapshot>   │  │ Debouncer        │  │   RingForm>> │              │
//! │  │ SettingsStore│  │ watch::Sender    │  │              │              │
//! │  └──────────────┘  └──────────────────┘  └──────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SettingsState: RwLock, many readers, rare commits                   │
//! │  • WeightSession: form behind Mutex, results over a watch channel     │
//! │  • RingFormState: Arc<Mutex<T>> for exclusive access                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod ring_form;
mod settings;
mod weight_form;

pub use ring_form::{RingForm, RingFormState};
pub use settings::SettingsState;
pub use weight_form::{
    evaluate, field_errors, FieldError, WeightEvaluation, WeightForm, WeightFormUpdate, WeightSession,
};
