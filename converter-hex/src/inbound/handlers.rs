//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{OriginalUri, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;
use utoipa::{IntoParams, OpenApi};

use converter_types::validation::{
    parse_amount, sanitize_currency_code, validate_conversion_params,
};
use converter_types::{
    ApiEndpoints, ApiInfo, ApiResponse, ConversionError, ConversionRequest, CurrenciesData,
    ErrorBody, HealthResponse, RateSource,
};

use crate::CurrencyConversionService;
use crate::openapi::ApiDoc;

pub const API_NAME: &str = "Currency Converter API";
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application state shared across handlers.
pub struct AppState<S: RateSource> {
    pub service: CurrencyConversionService<S>,
    /// Include diagnostic detail in 500 responses (never in production).
    pub expose_error_details: bool,
}

impl<S: RateSource> AppState<S> {
    fn reject(&self, error: impl Into<ConversionError>) -> ApiError {
        ApiError {
            error: error.into(),
            expose_details: self.expose_error_details,
        }
    }
}

/// Wrapper to implement IntoResponse for ConversionError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError {
    pub error: ConversionError,
    pub expose_details: bool,
}

impl From<ConversionError> for ApiError {
    fn from(error: ConversionError) -> Self {
        ApiError {
            error,
            expose_details: false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.error {
            ConversionError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("Validation failed", "Invalid request parameters")
                    .with_details(details),
            ),
            ConversionError::UnsupportedCurrency(code) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(
                    "Invalid currency",
                    format!("Unsupported currency code: {code}"),
                ),
            ),
            err @ (ConversionError::InvalidRequest(_) | ConversionError::RateUnavailable { .. }) => {
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody::new("Bad Request", err.to_string()),
                )
            }
            ConversionError::Upstream {
                code,
                message,
                status,
            } => {
                tracing::warn!(%code, ?status, "Rate provider failure: {}", message);
                let status = status
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, ErrorBody::new(code, message))
            }
            ConversionError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                let body = internal_error_body();
                let body = if self.expose_details {
                    body.with_detail(detail)
                } else {
                    body
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };

        (status, Json(body)).into_response()
    }
}

pub(crate) fn internal_error_body() -> ErrorBody {
    ErrorBody::new("Internal Server Error", "An unexpected error occurred")
}

/// Raw query parameters of `GET /api/convert`. Presence and shape are checked by the handler.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConvertQuery {
    /// Source currency code, case-insensitive
    #[param(example = "USD")]
    pub from: Option<String>,
    /// Target currency code, case-insensitive
    #[param(example = "BRL")]
    pub to: Option<String>,
    /// Positive amount in the source currency
    #[param(example = "100")]
    pub amount: Option<String>,
}

/// API description.
pub async fn root() -> impl IntoResponse {
    Json(ApiInfo {
        message: API_NAME.to_string(),
        version: API_VERSION.to_string(),
        endpoints: ApiEndpoints {
            health: "/api/health".to_string(),
            currencies: "/api/currencies".to_string(),
            convert: "/api/convert?from=USD&to=BRL&amount=100".to_string(),
        },
    })
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        success: true,
        message: format!("{API_NAME} is running"),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        version: API_VERSION.to_string(),
    })
}

/// List the currencies the rate source can quote.
#[tracing::instrument(skip(state))]
pub async fn currencies<S: RateSource>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let currencies = state
        .service
        .get_supported_currencies()
        .await
        .map_err(|e| state.reject(e))?;

    Ok(Json(ApiResponse::ok(CurrenciesData::new(currencies))))
}

/// Convert an amount between two currencies.
///
/// Shape errors are reported all at once, before any rate source call. Both
/// codes are then checked against the supported list concurrently.
#[tracing::instrument(skip(state, query))]
pub async fn convert<S: RateSource>(
    State(state): State<Arc<AppState<S>>>,
    query: Result<Query<ConvertQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) =
        query.map_err(|e| state.reject(ConversionError::InvalidRequest(e.body_text())))?;

    let from = Value::from(query.from);
    let to = Value::from(query.to);
    let amount = Value::from(query.amount);

    let validation = validate_conversion_params(&from, &to, &amount);
    if !validation.is_valid {
        tracing::debug!(errors = ?validation.errors, "Rejected conversion parameters");
        return Err(state.reject(ConversionError::Validation(validation.errors)));
    }

    let from = sanitize_currency_code(&from).map_err(|e| state.reject(e))?;
    let to = sanitize_currency_code(&to).map_err(|e| state.reject(e))?;
    let amount = parse_amount(&amount).map_err(|e| state.reject(e))?;

    let (from_supported, to_supported) = tokio::join!(
        state.service.validate_currency_code(&from),
        state.service.validate_currency_code(&to),
    );

    if !from_supported {
        return Err(state.reject(ConversionError::UnsupportedCurrency(from)));
    }

    if !to_supported {
        return Err(state.reject(ConversionError::UnsupportedCurrency(to)));
    }

    let response = state
        .service
        .convert_currency(ConversionRequest { from, to, amount })
        .await
        .map_err(|e| state.reject(e))?;

    Ok(Json(ApiResponse::ok(response)))
}

/// Generated OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Fallback for unmatched routes.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    let route = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new("Not Found", format!("Route {route} not found"))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use converter_types::CurrencyCode;
    use http_body_util::BodyExt;

    async fn render(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_body() {
        let (status, body) = render(
            ConversionError::Validation(vec!["Amount is required".into()]).into(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["message"], "Invalid request parameters");
        assert_eq!(body["details"], serde_json::json!(["Amount is required"]));
    }

    #[tokio::test]
    async fn test_rate_unavailable_is_bad_request() {
        let (status, body) = render(
            ConversionError::RateUnavailable {
                from: CurrencyCode::parse("GBP").unwrap(),
                to: CurrencyCode::parse("USD").unwrap(),
            }
            .into(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request");
        assert_eq!(body["message"], "Exchange rate not found for GBP to USD");
    }

    #[tokio::test]
    async fn test_upstream_status_passes_through() {
        let (status, body) = render(
            ConversionError::Upstream {
                code: "quota-reached".into(),
                message: "Quota reached".into(),
                status: Some(429),
            }
            .into(),
        )
        .await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "quota-reached");
        assert_eq!(body["message"], "Quota reached");
    }

    #[tokio::test]
    async fn test_upstream_without_status_is_500() {
        let (status, body) = render(
            ConversionError::Upstream {
                code: "NETWORK_ERROR".into(),
                message: "timed out".into(),
                status: None,
            }
            .into(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "NETWORK_ERROR");
    }

    #[tokio::test]
    async fn test_internal_detail_only_when_exposed() {
        let hidden = ApiError {
            error: ConversionError::Internal("db exploded".into()),
            expose_details: false,
        };
        let (status, body) = render(hidden).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An unexpected error occurred");
        assert!(body.get("detail").is_none());

        let exposed = ApiError {
            error: ConversionError::Internal("db exploded".into()),
            expose_details: true,
        };
        let (_, body) = render(exposed).await;
        assert_eq!(body["detail"], "db exploded");
    }
}
