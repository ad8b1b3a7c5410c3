//! Job-level metrics
//!
//! Three gauges are tracked for a run: its duration, its error count, and
//! its completion time. The completion timestamp is only set once the run
//! succeeds, so a failed run never replaces the timestamp of an earlier
//! success in whatever scrapes the published file.

use crate::error::Result;
use crate::job::config::MetricsConfig;
use crate::job::runner::JobSummary;
use log::{info, warn};
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tempfile::NamedTempFile;

/// Metrics collected over one job run
#[derive(Debug, Clone)]
pub struct JobMetrics {
    job_name: String,
    started: Option<Instant>,
    duration_seconds: Option<f64>,
    errors: u64,
    completion_timestamp: Option<f64>,
}

impl JobMetrics {
    /// Create an empty set of metrics for a job
    pub fn new(job_name: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            started: None,
            duration_seconds: None,
            errors: 0,
            completion_timestamp: None,
        }
    }

    /// Start the duration timer
    pub fn start_timer(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Record the time elapsed since [`start_timer`](Self::start_timer)
    pub fn observe_duration(&mut self) {
        if let Some(started) = self.started {
            self.duration_seconds = Some(started.elapsed().as_secs_f64());
        }
    }

    /// Increase the error gauge
    pub fn add_errors(&mut self, count: u64) {
        self.errors += count;
    }

    /// Set the completion timestamp to now
    pub fn mark_completed(&mut self) {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();
        self.completion_timestamp = Some(now);
    }

    /// Fold the outcome of a finished run into the metrics
    ///
    /// The duration is always observed. A successful run adds the errors it
    /// collected and sets the completion timestamp; a failed run counts as a
    /// single error and leaves the timestamp untouched.
    pub fn record_outcome(&mut self, outcome: &Result<JobSummary>) {
        self.observe_duration();
        match outcome {
            Ok(summary) => {
                self.add_errors(summary.errors.len() as u64);
                self.mark_completed();
            }
            Err(_) => self.add_errors(1),
        }
    }

    pub fn errors(&self) -> u64 {
        self.errors
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.duration_seconds
    }

    pub fn completion_timestamp(&self) -> Option<f64> {
        self.completion_timestamp
    }

    /// Render the metrics in the Prometheus text exposition format
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_gauge(
            &mut out,
            "job_duration_seconds",
            "Job duration in seconds",
            self.duration_seconds,
        );
        self.render_gauge(
            &mut out,
            "job_errors",
            "Total job errors",
            Some(self.errors as f64),
        );
        self.render_gauge(
            &mut out,
            "job_completion_timestamp",
            "Job completion time stamp",
            self.completion_timestamp,
        );
        out
    }

    fn render_gauge(&self, out: &mut String, name: &str, help: &str, value: Option<f64>) {
        let Some(value) = value else {
            return;
        };
        let _ = writeln!(out, "# HELP {} {}", name, help);
        let _ = writeln!(out, "# TYPE {} gauge", name);
        let _ = writeln!(
            out,
            "{}{{job=\"{}\"}} {}",
            name,
            escape_label(&self.job_name),
            value
        );
    }

    /// Write the rendered metrics to the configured output file
    ///
    /// Returns `Ok(false)` when no output is configured. The file is replaced
    /// atomically so a scraper never sees a partial write.
    pub fn publish(&self, config: &MetricsConfig) -> Result<bool> {
        let Some(output) = config.output.as_deref() else {
            warn!("No metrics output configured. Cannot publish the metrics.");
            return Ok(false);
        };

        info!("Publishing metrics to {}", output.display());
        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(self.render().as_bytes())?;
        file.flush()?;
        file.persist(output).map_err(|e| e.error)?;
        Ok(true)
    }
}

fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StructPathError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_skips_unset_gauges() {
        let mut metrics = JobMetrics::new("export");
        metrics.add_errors(2);

        let rendered = metrics.render();
        assert!(rendered.contains("# TYPE job_errors gauge"));
        assert!(rendered.contains("job_errors{job=\"export\"} 2"));
        assert!(!rendered.contains("job_duration_seconds"));
        assert!(!rendered.contains("job_completion_timestamp"));
    }

    #[test]
    fn test_completed_run() {
        let mut metrics = JobMetrics::new("export");
        metrics.start_timer();
        metrics.observe_duration();
        metrics.mark_completed();

        assert!(metrics.duration_seconds().unwrap() >= 0.0);
        assert!(metrics.completion_timestamp().unwrap() > 0.0);
        let rendered = metrics.render();
        assert!(rendered.contains("job_duration_seconds{job=\"export\"}"));
        assert!(rendered.contains("job_completion_timestamp{job=\"export\"}"));
    }

    #[test]
    fn test_record_successful_outcome() {
        let mut metrics = JobMetrics::new("export");
        metrics.start_timer();

        let summary = JobSummary {
            errors: vec![
                StructPathError::validation("first"),
                StructPathError::validation("second"),
            ],
            ..Default::default()
        };
        metrics.record_outcome(&Ok(summary));

        assert_eq!(metrics.errors(), 2);
        assert!(metrics.duration_seconds().is_some());
        assert!(metrics.completion_timestamp().is_some());
        assert!(metrics.render().contains("job_errors{job=\"export\"} 2"));
    }

    #[test]
    fn test_record_failed_outcome() {
        let mut metrics = JobMetrics::new("export");
        metrics.start_timer();
        metrics.record_outcome(&Err(StructPathError::file_not_found("missing.json")));

        assert_eq!(metrics.errors(), 1);
        assert!(metrics.duration_seconds().is_some());
        assert_eq!(metrics.completion_timestamp(), None);

        let rendered = metrics.render();
        assert!(rendered.contains("job_errors{job=\"export\"} 1"));
        assert!(rendered.contains("job_duration_seconds{job=\"export\"}"));
        assert!(!rendered.contains("job_completion_timestamp"));
    }

    #[test]
    fn test_failed_run_publishes_without_timestamp() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("metrics.prom");
        let config = MetricsConfig {
            enable: true,
            output: Some(output.clone()),
            ..Default::default()
        };

        let mut metrics = JobMetrics::new("export");
        metrics.start_timer();
        metrics.record_outcome(&Err(StructPathError::precondition("Path cannot be null or empty")));
        assert!(metrics.publish(&config).unwrap());

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("job_errors{job=\"export\"} 1"));
        assert!(!written.contains("job_completion_timestamp"));
    }

    #[test]
    fn test_label_escaping() {
        let metrics = JobMetrics::new("a\"b");
        assert!(metrics.render().contains("job=\"a\\\"b\""));
    }

    #[test]
    fn test_publish_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("metrics.prom");
        let config = MetricsConfig {
            enable: true,
            output: Some(output.clone()),
            ..Default::default()
        };

        let mut metrics = JobMetrics::new("export");
        metrics.add_errors(1);
        assert!(metrics.publish(&config).unwrap());

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written, metrics.render());
    }

    #[test]
    fn test_publish_without_output() {
        let metrics = JobMetrics::new("export");
        assert!(!metrics.publish(&MetricsConfig::default()).unwrap());
    }
}
