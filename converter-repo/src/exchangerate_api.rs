//! Live rate source backed by the exchangerate-api.com v6 HTTP API.
//!
//! The API key is a path segment, so request URLs are never logged and are
//! stripped from transport errors before they leave this module.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use converter_types::ports::NETWORK_ERROR_CODE;
use converter_types::{CurrencyCode, ExchangeRate, RateSource, RateSourceError};

pub const DEFAULT_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Provider bodies larger than this are rejected before decoding.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Connection settings for the live provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    time_last_update_unix: i64,
    conversion_rates: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct SupportedCodesResponse {
    /// `[code, display name]` pairs
    supported_codes: Vec<(String, String)>,
}

pub struct ExchangeRateApiSource {
    base_url: String,
    api_key: String,
    http: Client,
}

impl ExchangeRateApiSource {
    pub fn new(config: ProviderConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("currency-converter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            http,
        })
    }

    /// GETs `{base_url}/{api_key}/{endpoint}` and decodes a `"result": "success"` body.
    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, RateSourceError> {
        let url = format!("{}/{}/{}", self.base_url, self.api_key, endpoint);
        debug!(endpoint, "Requesting exchange rate provider");

        let response = self.http.get(&url).send().await.map_err(transport_error)?;
        let status = response.status();
        let body = read_body(response).await?;
        let json: Option<Value> = serde_json::from_slice(&body).ok();

        if !status.is_success() {
            return Err(provider_error(status, json.as_ref()));
        }

        let json = json.ok_or_else(|| invalid_response("response body is not JSON"))?;
        let result = json.get("result").and_then(Value::as_str);
        if result != Some("success") {
            return Err(RateSourceError::Upstream {
                code: error_type(&json).unwrap_or("API_ERROR").to_string(),
                message: format!("API returned error: {}", result.unwrap_or("unknown")),
                status: None,
            });
        }

        serde_json::from_value(json).map_err(|e| invalid_response(e.to_string()))
    }
}

#[async_trait]
impl RateSource for ExchangeRateApiSource {
    #[instrument(name = "ProviderRateFetch", skip(self, from, to), fields(from = %from, to = %to))]
    async fn get_exchange_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<ExchangeRate, RateSourceError> {
        if from == to {
            return Ok(ExchangeRate::identity(from.clone()));
        }

        let latest: LatestRatesResponse = self.fetch(&format!("latest/{from}")).await?;

        let rate = latest
            .conversion_rates
            .get(to.as_str())
            .copied()
            .filter(|rate| *rate > 0.0)
            .ok_or_else(|| RateSourceError::RateUnavailable {
                from: from.clone(),
                to: to.clone(),
            })?;

        Ok(ExchangeRate {
            from: from.clone(),
            to: to.clone(),
            rate,
            timestamp: latest
                .time_last_update_unix
                .checked_mul(1000)
                .ok_or_else(|| invalid_response("timestamp out of range"))?,
        })
    }

    #[instrument(name = "ProviderCodesFetch", skip(self))]
    async fn get_supported_currencies(&self) -> Result<Vec<CurrencyCode>, RateSourceError> {
        let codes: SupportedCodesResponse = self.fetch("codes").await?;

        Ok(codes
            .supported_codes
            .into_iter()
            .filter_map(|(code, name)| match CurrencyCode::parse(&code) {
                Ok(code) => Some(code),
                Err(e) => {
                    warn!(%code, %name, "Skipping malformed currency code from provider: {}", e);
                    None
                }
            })
            .collect())
    }
}

/// Buffers the body, giving up once it passes `MAX_RESPONSE_BYTES`.
async fn read_body(mut response: reqwest::Response) -> Result<Vec<u8>, RateSourceError> {
    let too_large = || invalid_response(format!("body exceeds {MAX_RESPONSE_BYTES} bytes"));

    if response
        .content_length()
        .is_some_and(|len| len > MAX_RESPONSE_BYTES as u64)
    {
        return Err(too_large());
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(transport_error)? {
        if body.len() + chunk.len() > MAX_RESPONSE_BYTES {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

// ─────────────────────────────────────────────────────────────────────────────
// Error Mapping
// ─────────────────────────────────────────────────────────────────────────────

fn transport_error(err: reqwest::Error) -> RateSourceError {
    let err = err.without_url();
    if err.is_timeout() {
        RateSourceError::network("Request to exchange rate provider timed out")
    } else {
        RateSourceError::network(format!("Request to exchange rate provider failed: {err}"))
    }
}

fn provider_error(status: StatusCode, body: Option<&Value>) -> RateSourceError {
    let code = body
        .and_then(error_type)
        .unwrap_or(NETWORK_ERROR_CODE)
        .to_string();
    let message = body
        .and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Exchange rate provider responded with status {status}"));

    RateSourceError::Upstream {
        code,
        message,
        status: Some(status.as_u16()),
    }
}

fn error_type(body: &Value) -> Option<&str> {
    body.get("error-type")
        .or_else(|| body.get("code"))
        .and_then(Value::as_str)
}

fn invalid_response(reason: impl std::fmt::Display) -> RateSourceError {
    RateSourceError::Upstream {
        code: "INVALID_RESPONSE".to_string(),
        message: format!("Unexpected response from exchange rate provider: {reason}"),
        status: None,
    }
}
