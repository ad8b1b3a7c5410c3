//! Batch extraction over document files
//!
//! An [`ExtractJob`] reads every document of every source, resolves one field
//! path against it, and writes the coerced results to a sink, one value (or
//! one joined line) per output line. Per-source progress is recorded in a
//! [`StateStore`].

use crate::core::{coerce, FieldPath, TargetType, Value};
use crate::error::{Result, StructPathError};
use crate::io::DocumentReader;
use crate::job::state::StateStore;
use log::{debug, info, warn};
use std::io::Write;
use std::path::Path;

/// What to do when a value cannot be coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Abort the run on the first coercion error
    #[default]
    FailFast,
    /// Skip recoverable failures (bad values, undecodable sources), report
    /// them in the summary, and keep going
    Collect,
}

/// How resolved values are written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// One coerced value per line
    Values { target: TargetType, policy: BatchPolicy },
    /// One line per document with the string forms joined by a delimiter
    Joined { delimiter: String },
}

impl OutputMode {
    /// A joined output mode; the delimiter must not be blank
    pub fn joined(delimiter: impl Into<String>) -> Result<Self> {
        let delimiter = delimiter.into();
        if delimiter.trim().is_empty() {
            return Err(StructPathError::precondition(
                "Delimiter cannot be null or empty",
            ));
        }
        Ok(Self::Joined { delimiter })
    }
}

/// Counters and non-fatal errors from one run
#[derive(Debug, Default)]
pub struct JobSummary {
    pub sources: usize,
    pub documents: usize,
    pub values: usize,
    pub errors: Vec<StructPathError>,
}

/// Extracts one field path from batches of documents
pub struct ExtractJob<S: StateStore> {
    path: FieldPath,
    mode: OutputMode,
    reader: DocumentReader,
    state: S,
}

impl<S: StateStore> ExtractJob<S> {
    pub fn new(path: FieldPath, mode: OutputMode, reader: DocumentReader, state: S) -> Self {
        Self {
            path,
            mode,
            reader,
            state,
        }
    }

    /// Process every source file in order
    pub fn run<P, W>(&mut self, sources: &[P], out: &mut W) -> Result<JobSummary>
    where
        P: AsRef<Path>,
        W: Write,
    {
        match &self.mode {
            OutputMode::Values { target, .. } => {
                info!("Starting extraction of '{}' as {}", self.path, target)
            }
            OutputMode::Joined { delimiter } => {
                info!("Starting extraction of '{}' joined by '{}'", self.path, delimiter)
            }
        }
        self.state.load()?;

        let mut summary = JobSummary::default();
        for source in sources {
            let source = source.as_ref();
            debug!("Processing file: {}", source.display());
            let documents = match self.reader.read_file(source) {
                Ok(documents) => documents,
                Err(e) if self.collects(&e) => {
                    warn!("{}: skipping source: {}", source.display(), e);
                    summary.errors.push(e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            self.process(&source.to_string_lossy(), &documents, out, &mut summary)?;
        }

        self.state.commit()?;
        info!(
            "Finished extraction: {} documents from {} sources, {} values, {} errors",
            summary.documents,
            summary.sources,
            summary.values,
            summary.errors.len()
        );
        Ok(summary)
    }

    /// Process already decoded documents under a source name
    pub fn run_documents<W: Write>(
        &mut self,
        source: &str,
        documents: &[Value],
        out: &mut W,
    ) -> Result<JobSummary> {
        self.state.load()?;
        let mut summary = JobSummary::default();
        self.process(source, documents, out, &mut summary)?;
        self.state.commit()?;
        Ok(summary)
    }

    fn process<W: Write>(
        &mut self,
        source: &str,
        documents: &[Value],
        out: &mut W,
        summary: &mut JobSummary,
    ) -> Result<()> {
        for document in documents {
            let matches = self.path.resolve(document);

            match &self.mode {
                OutputMode::Joined { delimiter } => {
                    let joined = matches
                        .into_iter()
                        .map(coerce::to_string)
                        .collect::<Vec<_>>()
                        .join(delimiter);
                    writeln!(out, "{}", joined)?;
                    summary.values += 1;
                }
                OutputMode::Values { target, policy } => {
                    for value in matches {
                        match target.coerce(value) {
                            Ok(coerced) => {
                                writeln!(out, "{}", coerced)?;
                                summary.values += 1;
                            }
                            Err(e) if *policy == BatchPolicy::Collect && e.is_recoverable() => {
                                warn!("{}: skipping value: {}", source, e);
                                summary.errors.push(e);
                            }
                            Err(e) => return Err(e),
                        }
                    }
                }
            }
        }

        summary.sources += 1;
        summary.documents += documents.len();
        self.state.expand_high(source, documents.len() as i64);
        Ok(())
    }

    // Joined output has no per-value failures, so only `Values` can collect.
    fn collects(&self, error: &StructPathError) -> bool {
        matches!(
            self.mode,
            OutputMode::Values {
                policy: BatchPolicy::Collect,
                ..
            }
        ) && error.is_recoverable()
    }

    /// The state store holding per-source progress
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::state::MemoryStateStore;
    use serde_json::json;

    fn job(path: &str, mode: OutputMode) -> ExtractJob<MemoryStateStore> {
        ExtractJob::new(
            FieldPath::parse(path).unwrap(),
            mode,
            DocumentReader::new(),
            MemoryStateStore::new(),
        )
    }

    fn docs() -> Vec<Value> {
        vec![
            Value::from(json!({"items": [{"qty": "2"}, {"qty": 3.6}]})),
            Value::from(json!({"items": [{"qty": "many"}]})),
        ]
    }

    #[test]
    fn test_values_fail_fast() {
        let mut job = job(
            "items.qty",
            OutputMode::Values {
                target: TargetType::Long,
                policy: BatchPolicy::FailFast,
            },
        );
        let mut out = Vec::new();
        let err = job.run_documents("stdin", &docs(), &mut out).unwrap_err();
        assert!(matches!(err, StructPathError::NumberFormat { .. }));
        assert_eq!(String::from_utf8(out).unwrap(), "2\n4\n");
    }

    #[test]
    fn test_values_collect() {
        let mut job = job(
            "items.qty",
            OutputMode::Values {
                target: TargetType::Long,
                policy: BatchPolicy::Collect,
            },
        );
        let mut out = Vec::new();
        let summary = job.run_documents("stdin", &docs(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "2\n4\n");
        assert_eq!(summary.documents, 2);
        assert_eq!(summary.values, 2);
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(job.state().get_high("stdin"), Some(2));
    }

    #[test]
    fn test_joined() {
        let mut job = job("items.qty", OutputMode::joined("|").unwrap());
        let mut out = Vec::new();
        job.run_documents("stdin", &docs(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2|3.6\nmany\n");
    }

    #[test]
    fn test_blank_delimiter_rejected() {
        assert!(matches!(
            OutputMode::joined(" "),
            Err(StructPathError::Precondition { .. })
        ));
    }
}
