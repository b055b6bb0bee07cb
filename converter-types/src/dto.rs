//! Data Transfer Objects (DTOs) for the HTTP API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::CurrencyCode;

// ─────────────────────────────────────────────────────────────────────────────
// Success Envelopes
// ─────────────────────────────────────────────────────────────────────────────

/// Wrapper for every successful data-bearing response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Payload of `GET /api/currencies`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrenciesData {
    pub currencies: Vec<CurrencyCode>,
    #[schema(example = 5)]
    pub count: usize,
}

impl CurrenciesData {
    pub fn new(currencies: Vec<CurrencyCode>) -> Self {
        Self {
            count: currencies.len(),
            currencies,
        }
    }
}

/// Payload of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub success: bool,
    #[schema(example = "Currency Converter API is running")]
    pub message: String,
    /// RFC 3339 time the check was answered
    #[schema(example = "2024-01-01T00:00:00Z")]
    pub timestamp: String,
    #[schema(example = "1.0.0")]
    pub version: String,
}

/// Payload of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiInfo {
    #[schema(example = "Currency Converter API")]
    pub message: String,
    pub version: String,
    pub endpoints: ApiEndpoints,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiEndpoints {
    #[schema(example = "/api/health")]
    pub health: String,
    #[schema(example = "/api/currencies")]
    pub currencies: String,
    #[schema(example = "/api/convert?from=USD&to=BRL&amount=100")]
    pub convert: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Error Body
// ─────────────────────────────────────────────────────────────────────────────

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Error category, or the provider's error code for upstream failures
    #[schema(example = "Validation failed")]
    pub error: String,
    #[schema(example = "Invalid request parameters")]
    pub message: String,
    /// Every validation problem, in field order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    /// Diagnostic detail, only outside production
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            detail: None,
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
