//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router operations produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and gauges via the metrics facade)
//!
//! Consumers:
//!     → stderr (compact or JSON lines)
//!     → whatever metrics recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - Library code only emits; subscribers and recorders are installed by binaries
//! - Metric updates without a recorder are no-ops

pub mod logging;
pub mod metrics;
