//! Data Transfer Objects exchanged with the rate endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::ConversionPair;
use crate::error::DomainError;
use crate::Currency;

// ─────────────────────────────────────────────────────────────────────────────
// Request
// ─────────────────────────────────────────────────────────────────────────────

/// Rate query sent to the endpoint.
///
/// Serialized as `{"amount": 1.0, "from_currency": "USD", "to_currency": "EUR"}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ConversionRequest {
    pub amount: f64,
    pub from_currency: Currency,
    pub to_currency: Currency,
}

impl ConversionRequest {
    /// Creates a request for a positive, finite amount.
    pub fn new(amount: f64, pair: ConversionPair) -> Result<Self, DomainError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(DomainError::InvalidAmount(amount));
        }
        Ok(Self {
            amount,
            from_currency: pair.from(),
            to_currency: pair.to(),
        })
    }

    /// Unit-rate query: how many `to` units one `from` unit buys.
    pub fn unit(pair: ConversionPair) -> Self {
        Self {
            amount: 1.0,
            from_currency: pair.from(),
            to_currency: pair.to(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response
// ─────────────────────────────────────────────────────────────────────────────

/// Endpoint reply. `rate` is the multiplier with `target = source * rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ConversionResponse {
    pub amount: f64,
    pub rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd_eur() -> ConversionPair {
        ConversionPair::new(Currency::USD, Currency::EUR).unwrap()
    }

    #[test]
    fn test_unit_request_wire_shape() {
        let json = serde_json::to_value(ConversionRequest::unit(usd_eur())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "amount": 1.0,
                "from_currency": "USD",
                "to_currency": "EUR"
            })
        );
    }

    #[test]
    fn test_request_rejects_non_positive_amount() {
        assert!(matches!(
            ConversionRequest::new(0.0, usd_eur()),
            Err(DomainError::InvalidAmount(_))
        ));
        assert!(matches!(
            ConversionRequest::new(-1.0, usd_eur()),
            Err(DomainError::InvalidAmount(_))
        ));
        assert!(ConversionRequest::new(f64::NAN, usd_eur()).is_err());
    }

    #[test]
    fn test_request_accepts_positive_amount() {
        let req = ConversionRequest::new(25.0, usd_eur()).unwrap();
        assert_eq!(req.amount, 25.0);
        assert_eq!(req.from_currency, Currency::USD);
        assert_eq!(req.to_currency, Currency::EUR);
    }

    #[test]
    fn test_response_decodes() {
        let resp: ConversionResponse =
            serde_json::from_str(r#"{"amount": 0.92, "rate": 0.92}"#).unwrap();
        assert_eq!(resp.rate, 0.92);
        assert_eq!(resp.amount, 0.92);
    }

    #[test]
    fn test_response_missing_rate_fails() {
        let result = serde_json::from_str::<ConversionResponse>(r#"{"amount": 1.0}"#);
        assert!(result.is_err());
    }
}
