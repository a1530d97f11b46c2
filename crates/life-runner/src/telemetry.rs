//! OpenTelemetry instrumentation for the runner.

use anyhow::Result;
use opentelemetry::{global, trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    trace::{RandomIdGenerator, Sampler, TracerProvider},
    Resource,
};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry(otel_endpoint: Option<&str>) -> Result<()> {
    // Standard OTEL environment variable wins over the configured endpoint
    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .ok()
        .or_else(|| otel_endpoint.map(|s| s.to_string()));

    let tracer_provider = if let Some(endpoint) = &endpoint {
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()?;

        TracerProvider::builder()
            .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
            .with_sampler(Sampler::AlwaysOn)
            .with_id_generator(RandomIdGenerator::default())
            .with_resource(Resource::new(vec![
                KeyValue::new(SERVICE_NAME, service_name()),
                KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
            ]))
            .build()
    } else {
        TracerProvider::builder()
            .with_sampler(Sampler::AlwaysOff)
            .build()
    };

    global::set_tracer_provider(tracer_provider.clone());
    let tracer = tracer_provider.tracer("life-runner");

    let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    // Frames go to stdout, so logs stay on stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,life_runner=debug,life_world=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(telemetry_layer)
        .init();

    match endpoint {
        Some(endpoint) => info!("OpenTelemetry exporting to OTLP endpoint: {}", endpoint),
        None => info!("OpenTelemetry disabled (no endpoint configured)"),
    }
    Ok(())
}

fn service_name() -> String {
    std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "life-runner".to_string())
}

pub fn shutdown_telemetry() {
    info!("Shutting down telemetry");
    global::shutdown_tracer_provider();
}
