//! Tracer provider backed by a file span exporter.
//!
//! The plugin sandbox has no collector to talk to, so spans go to a rotating
//! OTLP JSON file that can be replayed into one later.

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes each exported batch as one OTLP JSON line.
struct FileSpanExporter {
    /// Rotating trace file.
    writer: FileWriter,
    /// Turns a batch into one `resourceSpans` document.
    formatter: SpanFormatter,
    /// Set by `shutdown`; later exports fail.
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    /// Creates an exporter writing to `file_path` with the default rotation
    /// limits.
    ///
    /// # Parameters
    ///
    /// * `file_path` - Live trace file
    /// * `resource` - Resource attributes stamped on every batch
    const fn new(file_path: PathBuf, resource: Resource) -> Self {
        Self {
            writer: FileWriter::new(file_path),
            formatter: SpanFormatter::new(resource),
            is_shutdown: AtomicBool::new(false),
        }
    }

    /// Writes `batch` as a single line.
    ///
    /// # Returns
    ///
    /// - `Ok(())` once the line is flushed
    /// - `Err(TraceError)` after shutdown or when the write fails
    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Err(TraceError::from("file exporter is shut down"));
        }

        let line = self.formatter.format_batch(batch).to_string();
        self.writer
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }

    /// Stops further exports. Lines already written stay in the file.
    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    /// The resource is fixed at construction.
    fn set_resource(&mut self, _resource: &Resource) {}
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("is_shutdown", &self.is_shutdown)
            .finish_non_exhaustive()
    }
}

/// Builds a provider that exports every finished span to `file_path`.
///
/// Uses the simple (unbatched) processor: the wasm sandbox has no background
/// threads for a batch processor to run on.
///
/// # Parameters
///
/// * `file_path` - Live trace file; rotated at 10 MiB
/// * `resource` - Resource attributes, usually just `service.name`
///
/// # Returns
///
/// A provider ready to back a `tracing-opentelemetry` layer.
///
/// # Example
///
/// ```no_run
/// use dexterm::observability::create_tracer_provider;
/// use opentelemetry::trace::{Tracer, TracerProvider as _};
/// use opentelemetry::KeyValue;
/// use opentelemetry_sdk::resource::Resource;
/// use std::path::PathBuf;
///
/// let resource = Resource::new(vec![KeyValue::new("service.name", "dexterm")]);
/// let provider = create_tracer_provider(PathBuf::from("/tmp/dexterm-otlp.json"), resource);
/// provider.tracer("dexterm").in_span("listing_load", |_cx| {});
/// ```
#[must_use]
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_land_in_the_trace_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dexterm-otlp.json");
        let provider = create_tracer_provider(
            path.clone(),
            Resource::new(vec![KeyValue::new("service.name", "dexterm")]),
        );

        provider.tracer("test").in_span("listing_load", |_cx| {});

        let contents = std::fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(
            doc["resourceSpans"][0]["scopeSpans"][0]["spans"][0]["name"],
            "listing_load"
        );
    }
}
