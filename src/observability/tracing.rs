use anyhow::{Context, Error, Result};
use once_cell::sync::OnceCell;
use opentelemetry::{KeyValue, global, trace::TracerProvider};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracer, SdkTracerProvider},
};
use tracing::{Subscriber, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

use super::structured_log::StructuredLogLayer;

const SERVICE_NAME: &str = "popularity-worker";

static TRACING_INIT: OnceCell<()> = OnceCell::new();

/// Tracing サブスクライバを一度だけ初期化する。
///
/// `otel_endpoint` が指定されていれば OTLP エクスポーターでトレースを送信する。
/// エクスポーターの構築に失敗した場合や未指定の場合は JSON fmt レイヤーと
/// [`StructuredLogLayer`] だけで動作する。
///
/// # Errors
/// サブスクライバの初期化に失敗した場合はエラーを返す。
pub fn init(otel_endpoint: Option<&str>, sampling_ratio: f64) -> Result<()> {
    TRACING_INIT.get_or_try_init(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let tracer = match otel_endpoint {
            Some(endpoint) => match init_tracer(endpoint, sampling_ratio) {
                Ok(tracer) => Some((endpoint, tracer)),
                Err(error) => {
                    // エクスポーターが作れなければ通常のログだけで起動する
                    init_plain(env_filter)?;
                    info!(
                        otel_enabled = false,
                        error = %error,
                        "tracing initialized without OpenTelemetry (init failed)"
                    );
                    return Ok::<(), Error>(());
                }
            },
            None => None,
        };

        if let Some((endpoint, tracer)) = tracer {
            let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(json_layer())
                .with(otel_layer)
                .try_init()
                .map_err(|e| Error::msg(e.to_string()))?;
            info!(
                otel_enabled = true,
                endpoint = %endpoint,
                sampling_ratio,
                "tracing initialized with OpenTelemetry"
            );
        } else {
            init_plain(env_filter)?;
            info!(otel_enabled = false, "standard tracing initialized");
        }

        Ok::<(), Error>(())
    })?;
    Ok(())
}

fn json_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer().with_target(false).json()
}

fn init_plain(env_filter: EnvFilter) -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer())
        .with(StructuredLogLayer)
        .try_init()
        .map_err(|e| Error::msg(e.to_string()))
}

/// OTLPエクスポーター経由でOpenTelemetryトレーサーを初期化する。
fn init_tracer(endpoint: &str, sampling_ratio: f64) -> Result<SdkTracer> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .context("failed to build OTLP span exporter")?;

    let resource = Resource::builder()
        .with_attributes([
            KeyValue::new("service.name", SERVICE_NAME),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ])
        .build();

    let tracer_provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_sampler(Sampler::TraceIdRatioBased(sampling_ratio))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource)
        .build();

    let tracer = tracer_provider.tracer(SERVICE_NAME);
    global::set_tracer_provider(tracer_provider);

    Ok(tracer)
}
