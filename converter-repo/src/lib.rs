//! # Converter Repository
//!
//! Concrete rate source implementations (adapters) for the converter service.
//! This crate provides the adapters that implement the `RateSource` port:
//! the live exchangerate-api.com client and the static development table.

use async_trait::async_trait;
use converter_types::{CurrencyCode, ExchangeRate, RateSource, RateSourceError};

pub mod exchangerate_api;
pub mod static_table;

pub use exchangerate_api::{ExchangeRateApiSource, ProviderConfig};
pub use static_table::StaticRateSource;

/// Which adapter to run, decided once at startup.
#[derive(Debug, Clone)]
pub enum RateSourceConfig {
    Live(ProviderConfig),
    Static,
}

/// Unified rate source wrapper over the live and static adapters.
pub enum RateSourceAdapter {
    Live(ExchangeRateApiSource),
    Static(StaticRateSource),
}

/// Build a rate source from configuration.
///
/// # Examples
///
/// ```ignore
/// // Offline, fixed rates
/// let source = build_rate_source(RateSourceConfig::Static)?;
///
/// // exchangerate-api.com
/// let source = build_rate_source(RateSourceConfig::Live(ProviderConfig {
///     api_key: "your-key".into(),
///     ..Default::default()
/// }))?;
/// ```
pub fn build_rate_source(config: RateSourceConfig) -> anyhow::Result<RateSourceAdapter> {
    match config {
        RateSourceConfig::Live(provider) => {
            tracing::info!(base_url = %provider.base_url, "Using live exchange rate provider");
            Ok(RateSourceAdapter::Live(ExchangeRateApiSource::new(provider)?))
        }
        RateSourceConfig::Static => {
            tracing::info!("Using static exchange rate table");
            Ok(RateSourceAdapter::Static(StaticRateSource::new()))
        }
    }
}

impl RateSourceAdapter {
    pub fn kind(&self) -> &'static str {
        match self {
            RateSourceAdapter::Live(_) => "live",
            RateSourceAdapter::Static(_) => "static",
        }
    }
}

#[async_trait]
impl RateSource for RateSourceAdapter {
    async fn get_exchange_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<ExchangeRate, RateSourceError> {
        match self {
            RateSourceAdapter::Live(source) => source.get_exchange_rate(from, to).await,
            RateSourceAdapter::Static(source) => source.get_exchange_rate(from, to).await,
        }
    }

    async fn get_supported_currencies(&self) -> Result<Vec<CurrencyCode>, RateSourceError> {
        match self {
            RateSourceAdapter::Live(source) => source.get_supported_currencies().await,
            RateSourceAdapter::Static(source) => source.get_supported_currencies().await,
        }
    }
}
