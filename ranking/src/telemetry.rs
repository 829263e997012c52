//! Log subscriber setup.
//!
//! # Example
//!
//! ```rust,ignore
//! use ranking::telemetry::{init_tracing, TracingConfig};
//!
//! init_tracing(TracingConfig::new("leaderboard-api").with_level("ranking=trace"));
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Tracing configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// Reported on every startup line.
    pub service_name: String,
    /// Log level filter (e.g., "info", "debug", "ranking=trace,ranking_driver=info").
    /// `RUST_LOG` takes precedence when set.
    pub log_level: String,
    /// Output logs as JSON (useful for log aggregation).
    pub json_output: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service_name: "ranking".into(),
            log_level: "info".into(),
            json_output: false,
        }
    }
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set log level filter.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON output.
    pub fn with_json(mut self) -> Self {
        self.json_output = true;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }
}

/// Install the global subscriber. Call once at startup.
///
/// Panics if a global subscriber is already installed.
pub fn init_tracing(config: TracingConfig) {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    if config.json_output {
        let fmt_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true);
        registry.with(fmt_layer).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .compact();
        registry.with(fmt_layer).init();
    }

    tracing::info!(service = %config.service_name, json = config.json_output, "tracing initialized");
}
