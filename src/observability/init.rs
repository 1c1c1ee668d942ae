//! Subscriber setup: `tracing` macros → OpenTelemetry → rotating OTLP file.

use super::tracer;
use crate::infrastructure::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name reported as `service.name` and used for the tracer.
pub const SERVICE_NAME: &str = "dexterm";

/// Trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "dexterm-otlp.json";

/// Installs the global subscriber.
///
/// The filter comes from `config.trace_level` (default `"info"`) and accepts
/// any `EnvFilter` directive, e.g. `"dexterm::fetch=debug"`. Spans are written
/// to `~/.local/share/zellij/dexterm/dexterm-otlp.json`.
///
/// Tracing is best effort: if the data directory cannot be created nothing is
/// installed, and calls after the first are no-ops.
///
/// ```
/// use dexterm::observability::init_tracing;
/// use dexterm::Config;
///
/// init_tracing(&Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// });
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)));

    let _ = subscriber.try_init();
}
