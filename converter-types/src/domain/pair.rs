//! The immutable currency pair a controller is bound to.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::Currency;

/// Source and target currency of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversionPair {
    from: Currency,
    to: Currency,
}

impl ConversionPair {
    /// Creates a pair, rejecting a currency converted into itself.
    pub fn new(from: Currency, to: Currency) -> Result<Self, DomainError> {
        if from == to {
            return Err(DomainError::SameCurrency(from));
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> Currency {
        self.from
    }

    pub fn to(&self) -> Currency {
        self.to
    }
}

impl fmt::Display for ConversionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_creation() {
        let pair = ConversionPair::new(Currency::USD, Currency::EUR).unwrap();
        assert_eq!(pair.from(), Currency::USD);
        assert_eq!(pair.to(), Currency::EUR);
    }

    #[test]
    fn test_same_currency_rejected() {
        let result = ConversionPair::new(Currency::EUR, Currency::EUR);
        assert!(matches!(
            result,
            Err(DomainError::SameCurrency(Currency::EUR))
        ));
    }

    #[test]
    fn test_pair_display() {
        let pair = ConversionPair::new(Currency::USD, Currency::EUR).unwrap();
        assert_eq!(pair.to_string(), "USD->EUR");
    }
}
