//! CLI command handlers that bridge CLI arguments to library operations
//!
//! Every command returns a [`JobSummary`] so the caller can fold the run's
//! non-fatal errors into the job metrics.

use crate::cli_bin::args::*;
use log::{debug, info, warn};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use structpath::core::FieldPath;
use structpath::error::{Result, StructPathError};
use structpath::io::{DocumentFormat, DocumentReader, FileResolver, ReaderConfig, ResolverConfig};
use structpath::job::{ExtractJob, JobSummary, MemoryStateStore, OutputMode};

const STDIN_SOURCE: &str = "<stdin>";

/// Execute the get command
pub fn get_command(args: GetArgs) -> Result<JobSummary> {
    debug!("Executing get command with args: {:?}", args);

    let path = FieldPath::parse_with_separator(&args.path, &args.separator)?;
    let mode = OutputMode::Values {
        target: args.target.into(),
        policy: args.on_error.into(),
    };
    let summary = run_extraction(path, mode, &args.files)?;

    if summary.values == 0 {
        info!("No matching values found");
    }
    Ok(summary)
}

/// Execute the join command
pub fn join_command(args: JoinArgs) -> Result<JobSummary> {
    debug!("Executing join command with args: {:?}", args);

    let path = FieldPath::parse_with_separator(&args.path, &args.separator)?;
    let mode = OutputMode::joined(args.delimiter)?;
    run_extraction(path, mode, &args.files)
}

/// Execute the validate command
pub fn validate_command(args: ValidateArgs) -> Result<JobSummary> {
    debug!("Executing validate command");

    let files = resolve_files(&args.files)?;
    if files.is_empty() {
        warn!("No files found to process");
        return Ok(JobSummary::default());
    }

    let reader = create_reader(&args.files);
    let mut summary = JobSummary::default();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for file in files {
        debug!("Validating file: {}", file.display());
        summary.sources += 1;

        match reader.read_file(&file) {
            Ok(documents) => {
                summary.documents += documents.len();
                writeln!(out, "{}: OK", file.display())?;
            }
            Err(error) => {
                if args.fail_fast {
                    return Err(StructPathError::validation(format!(
                        "Failed to read {}: {}",
                        file.display(),
                        error
                    )));
                }
                writeln!(out, "{}: Invalid ({})", file.display(), error)?;
                summary.errors.push(error);
            }
        }
    }

    if !summary.errors.is_empty() {
        return Err(StructPathError::multiple(summary.errors));
    }

    info!("All {} files passed validation", summary.sources);
    Ok(summary)
}

// Helper functions

fn run_extraction(
    path: FieldPath,
    mode: OutputMode,
    file_options: &CommonFileOptions,
) -> Result<JobSummary> {
    let reader = create_reader(file_options);
    let stdin_format = file_options
        .input_format
        .map(DocumentFormat::from)
        .unwrap_or(DocumentFormat::Json);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if file_options.files.is_empty() {
        debug!("Reading documents from stdin");
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        let documents = reader.parse_str(&content, stdin_format)?;

        let mut job = ExtractJob::new(path, mode, reader, MemoryStateStore::new());
        return job.run_documents(STDIN_SOURCE, &documents, &mut out);
    }

    let files = resolve_files(file_options)?;
    if files.is_empty() {
        warn!("No files found to process");
        return Ok(JobSummary::default());
    }

    let mut job = ExtractJob::new(path, mode, reader, MemoryStateStore::new());
    let summary = job.run(&files, &mut out)?;
    out.flush()?;
    Ok(summary)
}

fn resolve_files(file_options: &CommonFileOptions) -> Result<Vec<PathBuf>> {
    let config = ResolverConfig {
        follow_links: file_options.follow_links,
        max_depth: file_options.max_depth,
        include_hidden: file_options.include_hidden,
    };

    FileResolver::with_config(config).resolve_paths(&file_options.files)
}

fn create_reader(file_options: &CommonFileOptions) -> DocumentReader {
    DocumentReader::with_config(ReaderConfig {
        format: file_options.input_format.map(DocumentFormat::from),
        ..Default::default()
    })
}
