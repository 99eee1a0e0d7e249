//! # Converter Core
//!
//! Conversion state machine and debounce timer.
//!
//! ## Architecture
//!
//! - `debounce/` - Single-slot debounce timer
//! - `controller/` - Cached rate, observable state, and formatting
//!
//! The controller is generic over `P: RateProvider`, allowing the HTTP
//! fetcher to be swapped for an in-memory provider.

pub mod controller;
pub mod debounce;


pub use controller::{ControllerConfig, ConversionController, PLACEHOLDER};
pub use debounce::DebounceGate;
