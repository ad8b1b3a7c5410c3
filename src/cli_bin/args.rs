//! Command-line argument definitions and parsing
//!
//! This module provides the CLI argument structure using clap, kept apart
//! from the library so the library carries no CLI dependencies.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use structpath::core::TargetType;
use structpath::io::DocumentFormat;
use structpath::job::BatchPolicy;

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "structpath",
    version,
    about = "Extract values from JSON and YAML documents by dot-separated field path",
    long_about = "structpath resolves a field path such as `asset.sensors.name` against \
                  JSON, YAML or JSON Lines documents. Lists met along the path are \
                  flattened automatically, and every match can be coerced to a string, \
                  double, long or boolean."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Job configuration file (YAML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print every value matching a path, one per line
    Get(GetArgs),
    /// Print the values matching a path joined into one line per document
    Join(JoinArgs),
    /// Check that documents can be decoded
    Validate(ValidateArgs),
}

/// Common options for reading documents
#[derive(Args, Debug, Clone)]
pub struct CommonFileOptions {
    /// Files or directories to process (reads JSON from stdin when empty)
    pub files: Vec<PathBuf>,

    /// Follow symbolic links when processing directories
    #[arg(long)]
    pub follow_links: bool,

    /// Maximum depth for directory recursion
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Include hidden files (starting with .)
    #[arg(long)]
    pub include_hidden: bool,

    /// Decode every input with this format instead of detecting it
    #[arg(long, value_enum)]
    pub input_format: Option<InputFormat>,
}

/// Arguments for the get command
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Field path, e.g. `asset.sensors.name`
    pub path: String,

    #[command(flatten)]
    pub files: CommonFileOptions,

    /// Separator between path segments
    #[arg(long, default_value = ".")]
    pub separator: String,

    /// Type every value is coerced to
    #[arg(long = "as", value_enum, default_value = "string")]
    pub target: TargetArg,

    /// What to do when a value cannot be coerced
    #[arg(long, value_enum, default_value = "fail")]
    pub on_error: ErrorPolicyArg,
}

/// Arguments for the join command
#[derive(Args, Debug)]
pub struct JoinArgs {
    /// Field path, e.g. `asset.sensors.name`
    pub path: String,

    #[command(flatten)]
    pub files: CommonFileOptions,

    /// Delimiter placed between joined values
    #[arg(short, long)]
    pub delimiter: String,

    /// Separator between path segments
    #[arg(long, default_value = ".")]
    pub separator: String,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub files: CommonFileOptions,

    /// Stop at the first invalid document
    #[arg(long)]
    pub fail_fast: bool,
}

/// Input formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
    Jsonl,
}

/// Coercion targets
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetArg {
    String,
    Double,
    Long,
    Boolean,
}

/// Coercion error handling
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicyArg {
    /// Abort on the first value that cannot be coerced
    Fail,
    /// Report and skip values that cannot be coerced
    Collect,
}

impl From<InputFormat> for DocumentFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Json => Self::Json,
            InputFormat::Yaml => Self::Yaml,
            InputFormat::Jsonl => Self::JsonLines,
        }
    }
}

impl From<TargetArg> for TargetType {
    fn from(target: TargetArg) -> Self {
        match target {
            TargetArg::String => Self::String,
            TargetArg::Double => Self::Double,
            TargetArg::Long => Self::Long,
            TargetArg::Boolean => Self::Boolean,
        }
    }
}

impl From<ErrorPolicyArg> for BatchPolicy {
    fn from(policy: ErrorPolicyArg) -> Self {
        match policy {
            ErrorPolicyArg::Fail => Self::FailFast,
            ErrorPolicyArg::Collect => Self::Collect,
        }
    }
}
