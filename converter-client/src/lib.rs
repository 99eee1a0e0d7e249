//! # Converter Client
//!
//! HTTP adapter that fetches exchange rates from the conversion endpoint.

use std::time::Duration;

use async_trait::async_trait;
use converter_types::{
    ConversionPair, ConversionRequest, ConversionResponse, ConverterError, RateProvider,
};
use reqwest::{Client, Url};
use tracing::{info, instrument, warn};

/// Conversion endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str =
    "https://elementsofdesign.api.stdlib.com/aavia-currency-converter@dev/";

/// Upper bound on a whole request, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Rate fetcher configuration.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl FetcherConfig {
    /// Overrides the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Fetches unit rates with a single JSON POST per call.
pub struct RateFetcher {
    endpoint: Url,
    http: Client,
}

impl RateFetcher {
    /// Creates a fetcher.
    ///
    /// Fails with [`ConverterError::InvalidEndpoint`] when the endpoint does
    /// not parse; callers should treat that as fatal at startup.
    pub fn new(config: FetcherConfig) -> Result<Self, ConverterError> {
        let endpoint = Url::parse(config.endpoint.trim()).map_err(|e| {
            ConverterError::InvalidEndpoint(format!("{}: {}", config.endpoint, e))
        })?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConverterError::Unclassified(e.to_string()))?;

        Ok(Self { endpoint, http })
    }

    /// Returns the endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches the unit rate for `pair`.
    #[instrument(skip(self), fields(pair = %pair))]
    pub async fn fetch_rate(
        &self,
        pair: ConversionPair,
    ) -> Result<ConversionResponse, ConverterError> {
        let request = ConversionRequest::unit(pair);

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(classify)?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(classify)?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            warn!("Rate endpoint returned HTTP {}", status.as_u16());
            return Err(ConverterError::Unclassified(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text.trim()
            )));
        }

        let response = decode(&body)?;
        info!(rate = response.rate, "Fetched conversion rate");
        Ok(response)
    }
}

#[async_trait]
impl RateProvider for RateFetcher {
    async fn fetch(&self, pair: ConversionPair) -> Result<ConversionResponse, ConverterError> {
        self.fetch_rate(pair).await
    }
}

/// Decodes the full response body; partial bodies fail.
fn decode(body: &[u8]) -> Result<ConversionResponse, ConverterError> {
    let response: ConversionResponse =
        serde_json::from_slice(body).map_err(|e| ConverterError::Decode(e.to_string()))?;

    if !response.rate.is_finite() || response.rate <= 0.0 {
        return Err(ConverterError::Decode(format!(
            "rate must be positive, got {}",
            response.rate
        )));
    }

    Ok(response)
}

/// Maps a transport-layer error to exactly one taxonomy variant.
fn classify(err: reqwest::Error) -> ConverterError {
    if err.is_decode() {
        ConverterError::Decode(err.to_string())
    } else if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
        ConverterError::Transport(err.to_string())
    } else {
        ConverterError::Unclassified(err.to_string())
    }
}
