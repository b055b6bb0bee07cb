//! # Converter Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the rate source adapter
//! - Create the conversion service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use converter_hex::CurrencyConversionService;
use converter_hex::inbound::{HttpServer, ServerOptions};
use converter_repo::build_rate_source;

const DEFAULT_LOG_FILTER: &str = "info,converter_app=debug,converter_hex=debug,converter_repo=debug";

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Endpoint and headers come from the standard OTEL_EXPORTER_OTLP_* variables
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("currency-converter"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Span export is opt-in
    let otel = if std::env::var_os("OTEL_EXPORTER_OTLP_ENDPOINT").is_some() {
        Some(init_tracer()?)
    } else {
        None
    };
    let (telemetry, otel_provider) = match otel {
        Some((tracer, provider)) => (
            Some(tracing_opentelemetry::layer().with_tracer(tracer)),
            Some(provider),
        ),
        None => (None, None),
    };

    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(json_logs.then(|| fmt::layer().json()))
        .with((!json_logs).then(|| fmt::layer()))
        .with(telemetry)
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!(
        environment = ?config.environment,
        "Starting currency converter on port {}",
        config.port
    );

    let source = build_rate_source(config.rate_source)?;
    tracing::info!(rate_source = source.kind(), "Rate source ready");

    let service = CurrencyConversionService::new(source);

    let server = HttpServer::with_options(
        service,
        ServerOptions {
            cors_origin: config.cors_origin,
            expose_error_details: !config.environment.is_production(),
        },
    );
    let addr = format!("0.0.0.0:{}", config.port);

    let result = server.run(&addr).await;

    // Ensure traces are flushed before exit
    if let Some(provider) = otel_provider {
        if let Err(e) = provider.shutdown() {
            eprintln!("Failed to flush traces: {e}");
        }
    }

    result
}
