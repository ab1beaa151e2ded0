use crate::domain::ports::DiagnosticSink;
use crate::utils::error::{DotFitError, Result};
use std::fmt;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Installs a global `tracing` subscriber. `RUST_LOG` takes precedence over
/// the verbosity flag. Fails if a subscriber is already installed.
pub fn init_logger(verbose: bool, format: LogFormat) -> Result<()> {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("dotfit_orders=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dotfit_orders=info"))
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
        LogFormat::Json => registry.with(layer.json()).try_init(),
    };

    installed.map_err(|e| DotFitError::config(format!("failed to install logger: {}", e)))
}

/// Default sink: forwards to `tracing`, picking the level from the tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, tags: &[&str], message: &str) {
        if tags.contains(&"error") {
            tracing::error!(?tags, "{}", message);
        } else if tags.contains(&"warn") {
            tracing::warn!(?tags, "{}", message);
        } else {
            tracing::info!(?tags, "{}", message);
        }
    }
}

/// Tag + message output gated by the debug flag.
#[derive(Clone)]
pub struct DiagnosticLogger {
    enabled: bool,
    sink: Arc<dyn DiagnosticSink>,
}

impl DiagnosticLogger {
    pub fn new(enabled: bool) -> Self {
        Self::with_sink(enabled, Arc::new(TracingSink))
    }

    pub fn with_sink(enabled: bool, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { enabled, sink }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn log(&self, tags: &[&str], message: impl fmt::Display) {
        if self.enabled {
            self.sink.emit(tags, &message.to_string());
        }
    }
}

impl fmt::Debug for DiagnosticLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticLogger")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
