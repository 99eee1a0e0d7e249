//! Configuration assembled from command-line flags and environment.

use std::time::Duration;

use converter_client::FetcherConfig;
use converter_core::ControllerConfig;
use converter_types::{ConversionPair, Currency};

/// Application configuration.
pub struct Config {
    pub pair: ConversionPair,
    pub fetcher: FetcherConfig,
    pub controller: ControllerConfig,
}

impl Config {
    /// Validates raw flag values into typed configuration.
    pub fn new(
        from: &str,
        to: &str,
        endpoint: String,
        timeout_secs: u64,
        debounce_ms: u64,
    ) -> anyhow::Result<Self> {
        let from: Currency = from.parse()?;
        let to: Currency = to.parse()?;
        let pair = ConversionPair::new(from, to)?;

        if timeout_secs == 0 {
            anyhow::bail!("Timeout must be at least one second");
        }

        Ok(Self {
            pair,
            fetcher: FetcherConfig::default()
                .with_endpoint(endpoint)
                .with_timeout(Duration::from_secs(timeout_secs)),
            controller: ControllerConfig {
                debounce: Duration::from_millis(debounce_ms),
            },
        })
    }

    /// Longest the dashboard waits for a refresh to settle.
    pub fn settle_deadline(&self) -> Duration {
        self.controller.debounce + self.fetcher.timeout + Duration::from_secs(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use converter_client::DEFAULT_ENDPOINT;

    #[test]
    fn test_config_from_flags() {
        let config = Config::new("usd", "EUR", DEFAULT_ENDPOINT.into(), 10, 250).unwrap();
        assert_eq!(config.pair.from(), Currency::USD);
        assert_eq!(config.pair.to(), Currency::EUR);
        assert_eq!(config.fetcher.timeout, Duration::from_secs(10));
        assert_eq!(config.controller.debounce, Duration::from_millis(250));
        assert_eq!(config.settle_deadline(), Duration::from_millis(11_250));
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let result = Config::new("USD", "GBP", DEFAULT_ENDPOINT.into(), 10, 250);
        assert!(result.is_err());
    }

    #[test]
    fn test_same_currency_rejected() {
        let result = Config::new("EUR", "EUR", DEFAULT_ENDPOINT.into(), 10, 250);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = Config::new("USD", "EUR", DEFAULT_ENDPOINT.into(), 0, 250);
        assert!(result.is_err());
    }
}
