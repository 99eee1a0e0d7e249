//! # Converter Types
//!
//! Domain types and port traits for the currency converter.
//! This crate has ZERO IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Conversion pair and observable controller state
//! - `ports/` - Trait definitions that rate adapters must implement
//! - `dto/` - Wire payloads exchanged with the rate endpoint
//! - `error/` - Domain and fetch error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use currency_format::{AmountFormatter, Currency, UnknownCurrency};
pub use domain::{ConversionPair, ConversionState};
pub use dto::{ConversionRequest, ConversionResponse};
pub use error::{ConverterError, DomainError};
pub use ports::RateProvider;
