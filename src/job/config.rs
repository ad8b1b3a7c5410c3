//! Job configuration
//!
//! Values are read, in order of precedence, from:
//! 1. environment variables
//! 2. a YAML configuration file (`--config`, else [`DEFAULT_CONFIG_PATH`] if present)
//! 3. built-in defaults
//!
//! A key `metrics.job_name` maps to the environment variable
//! `METRICS_JOB_NAME`: dots become underscores and the name is upper-cased.

use crate::error::{Result, StructPathError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the optional mounted configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/config/config.yaml";

/// Top-level job configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub metrics: MetricsConfig,
}

/// Metrics reporting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Whether job metrics are published at the end of a run
    pub enable: bool,
    /// The `job` label attached to every metric
    pub job_name: String,
    /// File the Prometheus text exposition is written to
    pub output: Option<PathBuf>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enable: false,
            job_name: "structpath".to_string(),
            output: None,
        }
    }
}

impl JobConfig {
    /// Load configuration from the given file (or the default location) and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a YAML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(StructPathError::file_not_found(path));
        }
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text; an empty document yields the defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Override values from a key lookup such as the process environment
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(&env_key("metrics.enable")) {
            self.metrics.enable = parse_bool("metrics.enable", &raw)?;
        }
        if let Some(raw) = lookup(&env_key("metrics.job_name")) {
            if raw.trim().is_empty() {
                return Err(StructPathError::config(
                    "metrics.job_name",
                    "job name cannot be empty",
                ));
            }
            self.metrics.job_name = raw;
        }
        if let Some(raw) = lookup(&env_key("metrics.output")) {
            self.metrics.output = if raw.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(raw))
            };
        }
        Ok(())
    }
}

/// Environment variable name for a configuration key
pub fn env_key(key: &str) -> String {
    key.replace('.', "_").to_uppercase()
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(StructPathError::config(
            key,
            format!("expected a boolean, got '{}'", raw),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = JobConfig::default();
        assert!(!config.metrics.enable);
        assert_eq!(config.metrics.job_name, "structpath");
        assert_eq!(config.metrics.output, None);
    }

    #[test]
    fn test_env_key() {
        assert_eq!(env_key("metrics.job_name"), "METRICS_JOB_NAME");
        assert_eq!(env_key("metrics.enable"), "METRICS_ENABLE");
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = JobConfig::from_yaml_str("metrics:\n  enable: true\n").unwrap();
        assert!(config.metrics.enable);
        assert_eq!(config.metrics.job_name, "structpath");

        assert_eq!(JobConfig::from_yaml_str("").unwrap(), JobConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"metrics:\n  job_name: nightly-export\n  output: /tmp/metrics.prom\n")
            .unwrap();
        file.flush().unwrap();

        let config = JobConfig::from_file(file.path()).unwrap();
        assert_eq!(config.metrics.job_name, "nightly-export");
        assert_eq!(
            config.metrics.output,
            Some(PathBuf::from("/tmp/metrics.prom"))
        );

        assert!(matches!(
            JobConfig::load(Some(Path::new("/nonexistent/config.yaml"))),
            Err(StructPathError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_env_overrides_take_precedence() {
        let mut config = JobConfig::from_yaml_str("metrics:\n  enable: false\n  job_name: from-file\n")
            .unwrap();
        let env: HashMap<&str, &str> = [
            ("METRICS_ENABLE", "TRUE"),
            ("METRICS_JOB_NAME", "from-env"),
            ("METRICS_OUTPUT", "out.prom"),
        ]
        .into_iter()
        .collect();

        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert!(config.metrics.enable);
        assert_eq!(config.metrics.job_name, "from-env");
        assert_eq!(config.metrics.output, Some(PathBuf::from("out.prom")));
    }

    #[test]
    fn test_invalid_env_value() {
        let mut config = JobConfig::default();
        let err = config
            .apply_overrides(|key| (key == "METRICS_ENABLE").then(|| "maybe".to_string()))
            .unwrap_err();
        assert!(matches!(err, StructPathError::Config { .. }));
    }
}
