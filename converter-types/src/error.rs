//! Error types for the currency converter.

use crate::Currency;

/// Domain-level errors (validation of pairs and requests).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Cannot convert {0} into itself")]
    SameCurrency(Currency),

    #[error("Amount must be positive and finite, got {0}")]
    InvalidAmount(f64),
}

/// Failures of a rate fetch.
///
/// Every failure maps to exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConverterError {
    /// The configured endpoint is not a valid URL. A misconfiguration, never
    /// a runtime condition.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Conversion failed: {0}")]
    Unclassified(String),
}
