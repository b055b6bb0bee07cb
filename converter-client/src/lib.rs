//! # Converter Client SDK
//!
//! A typed Rust client for the Currency Converter API.

use converter_types::{ApiResponse, ConversionResponse, CurrenciesData, CurrencyCode, ErrorBody, HealthResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {error}: {message}")]
    Api {
        status: u16,
        error: String,
        message: String,
        details: Vec<String>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Currency Converter API client.
pub struct ConverterClient {
    base_url: String,
    http: Client,
}

impl ConverterClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, Client::new())
    }

    /// Creates a client over a preconfigured `reqwest::Client` (timeouts, proxies).
    pub fn with_http_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Fetches the health report.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get("/api/health", &[]).await
    }

    /// Lists the currencies the server can convert between.
    pub async fn supported_currencies(&self) -> Result<Vec<CurrencyCode>, ClientError> {
        let resp: ApiResponse<CurrenciesData> = self.get("/api/currencies", &[]).await?;
        Ok(resp.data.currencies)
    }

    /// Converts `amount` from one currency to another.
    pub async fn convert(
        &self,
        from: &str,
        to: &str,
        amount: f64,
    ) -> Result<ConversionResponse, ClientError> {
        let amount = amount.to_string();
        let resp: ApiResponse<ConversionResponse> = self
            .get(
                "/api/convert",
                &[("from", from), ("to", to), ("amount", amount.as_str())],
            )
            .await?;
        Ok(resp.data)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        let err = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => ClientError::Api {
                status: status.as_u16(),
                error: parsed.error,
                message: parsed.message,
                details: parsed.details.unwrap_or_default(),
            },
            Err(_) => ClientError::Api {
                status: status.as_u16(),
                error: status.canonical_reason().unwrap_or("Unknown").to_string(),
                message: body,
                details: Vec::new(),
            },
        };
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ConverterClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = ConverterClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
