//! Tracing with file-based OTLP export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! The trace file lives at `~/.local/share/zellij/dexterm/dexterm-otlp.json`
//! and rotates at 10 MiB, keeping three backups. The level comes from the
//! `trace_level` plugin option and defaults to `"info"`.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`tracer`]: tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON serialization
//! - [`file_writer`]: size-rotated file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
pub use tracer::create_tracer_provider;
