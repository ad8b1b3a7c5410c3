//! Batch job support: configuration, metrics, checkpoint state, and the
//! extraction runner used by the command-line tool.

pub mod config;
pub mod metrics;
pub mod runner;
pub mod state;

pub use config::{JobConfig, MetricsConfig, DEFAULT_CONFIG_PATH};
pub use metrics::JobMetrics;
pub use runner::{BatchPolicy, ExtractJob, JobSummary, OutputMode};
pub use state::{MemoryStateStore, StateStore};
