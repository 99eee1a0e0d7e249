//! Exchange rate provider port.
//!
//! This trait defines the interface for rate sources.
//! Implementations can be HTTP clients, mock providers, etc.

use crate::{ConversionPair, ConversionResponse, ConverterError};

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the unit rate for `pair`.
    ///
    /// Performs a single attempt; callers decide whether to try again.
    async fn fetch(&self, pair: ConversionPair) -> Result<ConversionResponse, ConverterError>;
}
