//! File resolution for batch extraction
//!
//! Expands the files and directories given on the command line into the
//! list of document files to read. Files named explicitly are always kept;
//! directories contribute only files with a supported document extension.

use crate::error::{Result, StructPathError};
use crate::io::reader::DocumentFormat;
use log::debug;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for file resolution
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    /// Follow symbolic links
    pub follow_links: bool,
    /// Maximum recursion depth for directory traversal
    pub max_depth: Option<usize>,
    /// Include hidden files (starting with .)
    pub include_hidden: bool,
}

/// File resolver for handling multiple files and directories
#[derive(Debug, Default)]
pub struct FileResolver {
    config: ResolverConfig,
}

impl FileResolver {
    /// Create a new resolver with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new resolver with custom configuration
    pub fn with_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Resolve multiple paths to a sorted, deduplicated list of files
    pub fn resolve_paths<P>(&self, paths: &[P]) -> Result<Vec<PathBuf>>
    where
        P: AsRef<Path>,
    {
        let mut resolved = Vec::new();
        let mut seen = HashSet::new();

        for path in paths {
            for file in self.resolve_single_path(path.as_ref())? {
                if seen.insert(file.clone()) {
                    resolved.push(file);
                }
            }
        }

        resolved.sort();
        debug!("Resolved {} document files", resolved.len());
        Ok(resolved)
    }

    fn resolve_single_path(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if path.is_file() {
            Ok(vec![path.to_path_buf()])
        } else if path.is_dir() {
            self.traverse_directory(path)
        } else {
            Err(StructPathError::file_not_found(path))
        }
    }

    fn traverse_directory(&self, dir_path: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(dir_path)
            .follow_links(self.config.follow_links)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX));

        for entry in walker {
            let entry = entry.map_err(|e| {
                StructPathError::validation(format!("Error traversing directory: {}", e))
            })?;
            let path = entry.path();

            if !entry.file_type().is_file() {
                continue;
            }
            if !self.config.include_hidden && is_hidden_file(path) {
                continue;
            }
            if DocumentFormat::from_extension(path).is_none() {
                continue;
            }

            files.push(path.to_path_buf());
        }

        Ok(files)
    }

    /// Get the resolver configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

fn is_hidden_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
