//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use anyhow::{Context, bail};

use converter_repo::exchangerate_api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use converter_repo::{ProviderConfig, RateSourceConfig};

/// Deployment environment. Controls how much error detail reaches clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    /// Unknown names (`staging`, `qa`, ...) run as development.
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Self::Development,
            "production" | "prod" => Self::Production,
            "test" => Self::Test,
            other => {
                tracing::warn!(environment = other, "Unknown environment, running as development");
                Self::Development
            }
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub environment: Environment,
    pub cors_origin: String,
    pub rate_source: RateSourceConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{raw}'"))?,
            None => 3000,
        };

        let environment = match var("APP_ENV").or_else(|| var("NODE_ENV")) {
            Some(raw) => Environment::parse(&raw),
            None => Environment::Development,
        };

        let cors_origin = var("CORS_ORIGIN").unwrap_or_else(|| "*".to_string());

        let api_key = var("EXCHANGE_RATE_API_KEY").unwrap_or_default();

        let timeout = match var("EXCHANGE_RATE_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse().with_context(|| {
                format!("EXCHANGE_RATE_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'")
            })?),
            None => DEFAULT_TIMEOUT,
        };

        let provider = ProviderConfig {
            base_url: var("EXCHANGE_RATE_API_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
            timeout,
        };

        let rate_source = match var("RATE_SOURCE").map(|s| s.trim().to_ascii_lowercase()) {
            Some(kind) if kind == "live" => {
                if provider.api_key.is_empty() {
                    bail!("RATE_SOURCE=live requires EXCHANGE_RATE_API_KEY");
                }
                RateSourceConfig::Live(provider)
            }
            Some(kind) if kind == "static" => RateSourceConfig::Static,
            Some(other) => bail!("unknown RATE_SOURCE '{other}' (expected live or static)"),
            None if provider.api_key.is_empty() => RateSourceConfig::Static,
            None => RateSourceConfig::Live(provider),
        };

        Ok(Self {
            port,
            environment,
            cors_origin,
            rate_source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.cors_origin, "*");
        assert!(matches!(config.rate_source, RateSourceConfig::Static));
    }

    #[test]
    fn test_api_key_selects_live_provider() {
        let config = config(&[
            ("EXCHANGE_RATE_API_KEY", "secret"),
            ("EXCHANGE_RATE_API_URL", "http://localhost:9999/v6/"),
            ("EXCHANGE_RATE_TIMEOUT_SECS", "3"),
        ])
        .unwrap();

        match config.rate_source {
            RateSourceConfig::Live(provider) => {
                assert_eq!(provider.api_key, "secret");
                assert_eq!(provider.base_url, "http://localhost:9999/v6");
                assert_eq!(provider.timeout, Duration::from_secs(3));
            }
            RateSourceConfig::Static => panic!("expected live provider"),
        }
    }

    #[test]
    fn test_explicit_static_overrides_key() {
        let config = config(&[("EXCHANGE_RATE_API_KEY", "secret"), ("RATE_SOURCE", "Static")]).unwrap();

        assert!(matches!(config.rate_source, RateSourceConfig::Static));
    }

    #[test]
    fn test_live_without_key_is_an_error() {
        let err = config(&[("RATE_SOURCE", "live")]).err().unwrap();

        assert!(err.to_string().contains("EXCHANGE_RATE_API_KEY"));
    }

    #[test]
    fn test_node_env_fallback() {
        let fallback = config(&[("NODE_ENV", "production")]).unwrap();
        assert!(fallback.environment.is_production());

        let preferred = config(&[("APP_ENV", "test"), ("NODE_ENV", "production")]).unwrap();
        assert_eq!(preferred.environment, Environment::Test);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(config(&[("PORT", "eighty")]).is_err());
        assert!(config(&[("RATE_SOURCE", "cache")]).is_err());
        assert!(config(&[("EXCHANGE_RATE_TIMEOUT_SECS", "-1")]).is_err());
    }

    #[test]
    fn test_unknown_environment_runs_as_development() {
        let staging = config(&[("NODE_ENV", "staging")]).unwrap();

        assert_eq!(staging.environment, Environment::Development);
        assert!(!staging.environment.is_production());
    }

    #[test]
    fn test_custom_port_and_cors() {
        let config = config(&[("PORT", "8080"), ("CORS_ORIGIN", "https://app.test")]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origin, "https://app.test");
    }
}
