//! Tracing for the plugin and its worker, exported as OTLP JSON to a file.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK TracerProvider → FileSpanExporter → bookshelf-otlp.json
//! ```
//!
//! Zellij plugins cannot open network sockets, so spans are written one OTLP
//! batch per line to `bookshelf-otlp.json` in the plugin data directory. The
//! file rotates at 10 MB and keeps three backups.
//!
//! The filter comes from the `trace_level` plugin option (an `EnvFilter`
//! directive such as `"debug"` or `"bookshelf::gateway=trace"`) and defaults
//! to `"info"`.
//!
//! ```rust,no_run
//! use bookshelf::observability::init_tracing;
//! use bookshelf::Config;
//!
//! init_tracing(&Config::default());
//! tracing::info!("plugin loaded");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;

/// Value of the `service.name` resource attribute and the instrumentation scope.
pub const SERVICE_NAME: &str = "Bookshelf";

/// File name of the trace export inside the data directory.
pub const TRACE_FILE_NAME: &str = "bookshelf-otlp.json";
