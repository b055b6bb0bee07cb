//! Offline rate source over the static `exchange-rates` table.

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use converter_types::{CurrencyCode, ExchangeRate, RateSource, RateSourceError};

/// Serves the fixed development table. Every quote is stamped with the lookup time.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRateSource;

impl StaticRateSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    async fn get_exchange_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<ExchangeRate, RateSourceError> {
        if from == to {
            return Ok(ExchangeRate::identity(from.clone()));
        }

        let rate = exchange_rates::lookup_rate(from.as_str(), to.as_str()).map_err(|e| {
            debug!(%from, %to, "Static table miss: {}", e);
            RateSourceError::RateUnavailable {
                from: from.clone(),
                to: to.clone(),
            }
        })?;

        Ok(ExchangeRate {
            from: from.clone(),
            to: to.clone(),
            rate,
            timestamp: Utc::now().timestamp_millis(),
        })
    }

    async fn get_supported_currencies(&self) -> Result<Vec<CurrencyCode>, RateSourceError> {
        Ok(exchange_rates::supported_currencies()
            .iter()
            .filter_map(|code| CurrencyCode::parse(code).ok())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> CurrencyCode {
        CurrencyCode::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_known_pair() {
        let rate = StaticRateSource
            .get_exchange_rate(&code("usd"), &code("brl"))
            .await
            .unwrap();
        assert_eq!(rate.from, "USD");
        assert_eq!(rate.to, "BRL");
        assert_eq!(rate.rate, 5.25);
        assert!(rate.timestamp > 0);
    }

    #[tokio::test]
    async fn test_same_currency_even_if_unlisted() {
        let rate = StaticRateSource
            .get_exchange_rate(&code("XYZ"), &code("XYZ"))
            .await
            .unwrap();
        assert_eq!(rate.rate, 1.0);
    }

    #[tokio::test]
    async fn test_unknown_base_and_target() {
        for (from, to) in [("GBP", "USD"), ("USD", "CHF"), ("XYZ", "BRL")] {
            let err = StaticRateSource
                .get_exchange_rate(&code(from), &code(to))
                .await
                .unwrap_err();
            assert_eq!(
                err,
                RateSourceError::RateUnavailable {
                    from: code(from),
                    to: code(to)
                }
            );
        }
    }

    #[tokio::test]
    async fn test_supported_currencies() {
        let codes = StaticRateSource.get_supported_currencies().await.unwrap();
        assert_eq!(
            codes,
            ["USD", "BRL", "EUR", "GBP", "JPY"].map(code).to_vec()
        );
    }
}
