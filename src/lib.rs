//! structpath: path-based value extraction for semi-structured documents
//!
//! This library resolves dot-separated field paths against JSON-like document
//! trees and coerces the matching leaves into strings, doubles, longs or
//! booleans. Lists met anywhere along a path are flattened automatically, so
//! `sensors.name` finds every sensor name whether `sensors` holds one object
//! or a list of them.
//!
//! # Quick Start
//!
//! ## Resolving Paths
//!
//! ```rust
//! use structpath::{resolve_joined, resolve_to_strings, Result, Value};
//!
//! fn main() -> Result<()> {
//!     let document: Value = serde_json::from_str(
//!         r#"{"a": [{"b": "x"}, {"b": "y"}, {"b": null}]}"#,
//!     )?;
//!
//!     assert_eq!(resolve_to_strings(&document, "a.b", ".")?, vec!["x", "y"]);
//!     assert_eq!(resolve_joined(&document, "a.b", "|")?, "x|y");
//!     assert_eq!(resolve_joined(&document, "a.missing", "|")?, "");
//!     Ok(())
//! }
//! ```
//!
//! ## Coercing Values
//!
//! ```rust
//! use structpath::{coerce_all, to_boolean, to_double, to_long, FieldPath, Result, Value};
//!
//! fn main() -> Result<()> {
//!     assert_eq!(to_double(&Value::string("3.14"))?, 3.14);
//!     assert_eq!(to_long(&Value::number(2.6))?, 3);
//!     assert!(to_boolean(&Value::string("TRUE"))?);
//!     assert!(to_double(&Value::bool(true)).is_err());
//!
//!     let document: Value = serde_json::from_str(r#"{"readings": [{"v": "1"}, {"v": 2.5}]}"#)?;
//!     let path = FieldPath::parse("readings.v")?;
//!     let values: Vec<f64> = coerce_all(path.resolve(&document))?;
//!     assert_eq!(values, vec![1.0, 2.5]);
//!     Ok(())
//! }
//! ```
//!
//! ## Reading Files
//!
//! ```rust,no_run
//! use structpath::{DocumentReader, FieldPath, Result};
//!
//! fn main() -> Result<()> {
//!     let reader = DocumentReader::new();
//!     let path = FieldPath::parse("asset.name")?;
//!
//!     for document in reader.read_file("assets.jsonl")? {
//!         for value in path.resolve(&document) {
//!             println!("{}", value);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: the value model, path parsing, resolution and coercion
//! - [`io`]: decoding JSON, YAML and JSON Lines files and expanding directories
//! - [`job`]: batch extraction with configuration, metrics and checkpoint state
//! - [`error`]: the error type shared by all of the above
//!
//! Resolution never fails: missing keys, empty lists and paths running past a
//! leaf all produce fewer results. Only coercion and precondition checks
//! return errors.

// Public API exports
pub use crate::error::{Result, StructPathError};

// Core types
pub use crate::core::{
    coerce_all, coerce_each, resolve, resolve_joined, resolve_to_strings, to_boolean, to_double,
    to_long, to_string, Coerced, FieldPath, FromValue, TargetType, Value, ValueKind,
};

// IO types
pub use crate::io::{DocumentFormat, DocumentReader, FileResolver, ReaderConfig, ResolverConfig};

pub mod core;
pub mod error;
pub mod io;
pub mod job;

/// Convenience functions for common operations
pub mod convenience {
    //! Convenience functions that provide simple APIs for common use cases
    //!
    //! These functions use default reader settings and are handy for scripts
    //! that only need the string forms of a few fields.

    use crate::{DocumentReader, Result};
    use std::path::Path;

    /// Read every document in a file and resolve `path` against each, as strings
    pub fn get_strings<P: AsRef<Path>>(file: P, path: &str) -> Result<Vec<String>> {
        let documents = DocumentReader::new().read_file(file)?;
        let mut strings = Vec::new();
        for document in &documents {
            strings.extend(crate::resolve_to_strings(
                document,
                path,
                crate::core::DEFAULT_SEPARATOR,
            )?);
        }
        Ok(strings)
    }

    /// Read every document in a file and join the matches of `path` per document
    pub fn get_joined<P: AsRef<Path>>(file: P, path: &str, delimiter: &str) -> Result<Vec<String>> {
        DocumentReader::new()
            .read_file(file)?
            .iter()
            .map(|document| crate::resolve_joined(document, path, delimiter))
            .collect()
    }
}
