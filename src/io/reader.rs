//! Document reading and decoding
//!
//! This module turns JSON, YAML and JSON Lines files into [`Value`] trees.
//! A JSON Lines file yields one document per non-blank line; the other
//! formats yield exactly one document per file.

use crate::core::Value;
use crate::error::{Result, StructPathError};
use log::debug;
use std::fs;
use std::path::Path;

/// Supported document encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    JsonLines,
}

impl DocumentFormat {
    /// Detect the format from a file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "jsonl" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }

    /// Detect the format, falling back to JSON for unknown extensions
    pub fn detect(path: &Path) -> Self {
        Self::from_extension(path).unwrap_or(Self::Json)
    }
}

/// Configuration for the document reader
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Maximum file size to read (in bytes)
    pub max_file_size: Option<usize>,
    /// Force a format instead of detecting it from the extension
    pub format: Option<DocumentFormat>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_file_size: Some(64 * 1024 * 1024), // 64MB default limit
            format: None,
        }
    }
}

/// Document reader
#[derive(Debug, Default)]
pub struct DocumentReader {
    config: ReaderConfig,
}

impl DocumentReader {
    /// Create a new reader with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new reader with custom configuration
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read every document contained in a file
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Value>> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(StructPathError::file_not_found(path));
        }
        if !path.is_file() {
            return Err(StructPathError::invalid_document(path, "not a regular file"));
        }

        if let Some(max_size) = self.config.max_file_size {
            let metadata = fs::metadata(path)?;
            if metadata.len() as usize > max_size {
                return Err(StructPathError::validation(format!(
                    "File too large: {} bytes (limit: {} bytes)",
                    metadata.len(),
                    max_size
                )));
            }
        }

        let content = fs::read_to_string(path)?;
        let format = self
            .config
            .format
            .unwrap_or_else(|| DocumentFormat::detect(path));
        debug!("Reading {} as {:?}", path.display(), format);

        self.parse_str(&content, format)
            .map_err(|e| StructPathError::invalid_document(path, e.to_string()))
    }

    /// Decode documents from string content
    pub fn parse_str(&self, content: &str, format: DocumentFormat) -> Result<Vec<Value>> {
        match format {
            DocumentFormat::Json => {
                let json: serde_json::Value = serde_json::from_str(content)?;
                Ok(vec![Value::from(json)])
            }
            DocumentFormat::Yaml => {
                let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
                Ok(vec![Value::from(yaml)])
            }
            DocumentFormat::JsonLines => content
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(index, line)| {
                    serde_json::from_str::<serde_json::Value>(line)
                        .map(Value::from)
                        .map_err(|e| {
                            StructPathError::validation(format!("line {}: {}", index + 1, e))
                        })
                })
                .collect(),
        }
    }

    /// Get the reader configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
}
