//! # Bridge Telemetry
//!
//! Logging and metrics for the Sentinel bridge.
//!
//! ## Components
//!
//! - **Logs**: `tracing-subscriber` with an `EnvFilter`, pretty output for
//!   development and JSON lines for log shippers
//! - **Metrics**: Prometheus counters and gauges in a process-wide registry,
//!   rendered in the text exposition format by [`encode_metrics`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bridge_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//!     // bridge operations log and count from here on
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SB_SERVICE_NAME` | `sentinel-bridge` | Service name in log lines |
//! | `SB_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `SB_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |
//! | `SB_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `SB_NETWORK` | `devnet` | Deployment name attached to logs |

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, ACTIVE_OPERATORS, BRIDGE_ERRORS,
    DISPATCHES, DISPATCH_DURATION, INBOX_MESSAGES, SIGNATURE_VERIFICATIONS, SLASHINGS,
    TOTAL_STAKED,
};
pub use tracing_setup::{init_tracing, TracingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and register every metric.
///
/// Returns a guard that should be held for the lifetime of the process.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = register_metrics()?;
    let tracing = init_tracing(&config)?;

    Ok(TelemetryGuard {
        _tracing: tracing,
        _metrics: metrics,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _tracing: TracingGuard,
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Span carrying the component tag.
///
/// ```rust,ignore
/// let _span = bridge_span!("verify_and_dispatch", component = "sb-04", nonce = 7);
/// ```
#[macro_export]
macro_rules! bridge_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}

/// Convenience macro for recording a metric with a value.
#[macro_export]
macro_rules! metric_observe {
    ($metric:expr, $value:expr) => {
        $metric.observe($value)
    };
    ($metric:expr, $labels:expr, $value:expr) => {
        $metric.with_label_values($labels).observe($value)
    };
}
