//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use converter_types::dto::{ApiEndpoints, ApiInfo, ApiResponse, CurrenciesData, ErrorBody, HealthResponse};
use converter_types::{ConversionResponse, CurrencyCode};
use utoipa::OpenApi;

use crate::inbound::handlers::ConvertQuery;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// API description
#[utoipa::path(
    get,
    path = "/",
    tag = "meta",
    responses(
        (status = 200, description = "Service name, version and entry points", body = ApiInfo)
    )
)]
async fn root() {}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "meta",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
async fn health() {}

/// List supported currencies
#[utoipa::path(
    get,
    path = "/api/currencies",
    tag = "currencies",
    responses(
        (status = 200, description = "Codes the rate source can quote", body = ApiResponse<CurrenciesData>),
        (status = 500, description = "Rate provider unreachable", body = ErrorBody)
    )
)]
async fn currencies() {}

/// Convert an amount between two currencies
#[utoipa::path(
    get,
    path = "/api/convert",
    tag = "currencies",
    params(ConvertQuery),
    responses(
        (status = 200, description = "Conversion result", body = ApiResponse<ConversionResponse>),
        (status = 400, description = "Invalid parameters, unsupported currency or no rate for the pair", body = ErrorBody,
            example = json!({
                "error": "Validation failed",
                "message": "Invalid request parameters",
                "details": ["From currency must be a valid 3-letter currency code"]
            })),
        (status = 500, description = "Rate provider failure", body = ErrorBody)
    )
)]
async fn convert() {}

/// OpenAPI documentation for the Currency Converter API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Converter API",
        version = "1.0.0",
        description = "Converts amounts between currencies using live or static exchange rates.\n\n## Errors\n\nEvery error response carries `error` and `message`. Validation failures also list every problem in `details`, in `from`, `to`, `amount` order.",
        license(name = "MIT"),
    ),
    paths(root, health, currencies, convert),
    components(
        schemas(
            ConversionResponse,
            CurrencyCode,
            CurrenciesData,
            HealthResponse,
            ApiInfo,
            ApiEndpoints,
            ErrorBody,
        )
    ),
    tags(
        (name = "meta", description = "Service description and health"),
        (name = "currencies", description = "Currency listing and conversion"),
    )
)]
pub struct ApiDoc;
