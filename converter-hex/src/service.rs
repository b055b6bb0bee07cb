//! Currency Conversion Application Service
//!
//! Orchestrates validation, rate lookup and arithmetic through the rate source port.
//! Contains NO infrastructure logic - pure business orchestration.

use converter_types::domain::is_three_letter_code;
use converter_types::{
    Amount, ConversionError, ConversionRequest, ConversionResponse, CurrencyCode, RateSource,
};

/// Converted amounts are rounded to this many decimal places.
pub const CURRENCY_DECIMALS: u32 = 2;

/// Application service for currency conversion.
///
/// Generic over `S: RateSource` - the adapter is injected at compile time.
/// This enables:
/// - Swapping the live provider for the static table without code changes
/// - Testing with a scripted rate source
/// - Compile-time checks for port implementation
pub struct CurrencyConversionService<S: RateSource> {
    source: S,
}

impl<S: RateSource> CurrencyConversionService<S> {
    /// Creates a new conversion service over the given rate source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns a reference to the underlying rate source.
    pub fn rate_source(&self) -> &S {
        &self.source
    }

    /// Converts `request.amount` from one currency to another.
    ///
    /// The request is checked again here, so the service is safe to call
    /// without going through the HTTP validation first. Rate source failures
    /// propagate unchanged.
    #[tracing::instrument(skip(self, request), fields(from = %request.from, to = %request.to, amount = request.amount))]
    pub async fn convert_currency(
        &self,
        request: ConversionRequest,
    ) -> Result<ConversionResponse, ConversionError> {
        let (from, to, amount) = check_request(&request)?;

        let rate = self.source.get_exchange_rate(&from, &to).await?;
        let converted_amount = amount.convert(rate.rate, CURRENCY_DECIMALS);
        if !converted_amount.is_finite() {
            return Err(ConversionError::InvalidRequest(
                "Converted amount is out of range".to_string(),
            ));
        }

        tracing::debug!(rate = rate.rate, converted_amount, "Conversion computed");

        Ok(ConversionResponse {
            from: rate.from,
            to: rate.to,
            amount: amount.value(),
            converted_amount,
            rate: rate.rate,
            timestamp: rate.timestamp,
        })
    }

    /// Checks `code` against the supported list.
    ///
    /// A failing rate source counts as "not supported"; this never errors.
    #[tracing::instrument(skip(self))]
    pub async fn validate_currency_code(&self, code: &str) -> bool {
        match self.source.get_supported_currencies().await {
            Ok(supported) => {
                let wanted = code.trim().to_uppercase();
                supported.iter().any(|c| c.as_str() == wanted)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Supported currency lookup failed, treating code as unsupported");
                false
            }
        }
    }

    /// Lists the codes the rate source can quote.
    pub async fn get_supported_currencies(&self) -> Result<Vec<CurrencyCode>, ConversionError> {
        self.source
            .get_supported_currencies()
            .await
            .map_err(Into::into)
    }
}

/// Local request checks, in a fixed order so the first violated rule is reported.
fn check_request(
    request: &ConversionRequest,
) -> Result<(CurrencyCode, CurrencyCode, Amount), ConversionError> {
    let invalid = |msg: &str| ConversionError::InvalidRequest(msg.to_string());

    if request.from.trim().is_empty() {
        return Err(invalid(
            "From currency is required and must be a valid string",
        ));
    }

    if request.to.trim().is_empty() {
        return Err(invalid("To currency is required and must be a valid string"));
    }

    let amount =
        Amount::new(request.amount).map_err(|_| invalid("Amount must be a positive number"))?;

    if request.from.chars().count() != 3 || request.to.chars().count() != 3 {
        return Err(invalid("Currency codes must be exactly 3 characters long"));
    }

    if !is_three_letter_code(&request.from) || !is_three_letter_code(&request.to) {
        return Err(invalid("Currency codes must contain only letters"));
    }

    Ok((
        CurrencyCode::parse(&request.from)?,
        CurrencyCode::parse(&request.to)?,
        amount,
    ))
}
