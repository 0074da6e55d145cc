//! Observability setup for Formwright: structured logging and optional
//! OpenTelemetry trace export.

pub mod tracing_setup;
