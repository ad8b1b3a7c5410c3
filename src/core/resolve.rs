//! Path resolution with implicit list flattening
//!
//! Resolving a path walks the document depth-first. Object nodes consume one
//! path segment; list nodes are stepped through without consuming anything,
//! so every element is tried against the same remaining path. Missing keys,
//! empty lists and paths that run past a leaf produce no results rather than
//! errors. Null leaves are dropped.

use crate::core::coerce;
use crate::core::path::FieldPath;
use crate::core::value::Value;
use crate::error::{Result, StructPathError};

/// Resolve `path` against `root`, returning every matching leaf in document order
pub fn resolve<'a, S: AsRef<str>>(root: &'a Value, path: &[S]) -> Vec<&'a Value> {
    let mut results = Vec::new();
    collect(root, path, &mut results);
    results
}

fn collect<'a, S: AsRef<str>>(node: &'a Value, path: &[S], out: &mut Vec<&'a Value>) {
    match (node, path.split_first()) {
        (Value::List(elements), _) => {
            for element in elements {
                collect(element, path, out);
            }
        }
        (Value::Null, None) => {}
        (_, None) => out.push(node),
        (Value::Object(map), Some((head, rest))) => {
            if let Some(child) = map.get(head.as_ref()) {
                collect(child, rest, out);
            }
        }
        // Path continues past a leaf.
        (_, Some(_)) => {}
    }
}

/// Resolve a `separator`-delimited path and convert every match to its string form
pub fn resolve_to_strings(root: &Value, path: &str, separator: &str) -> Result<Vec<String>> {
    let path = FieldPath::parse_with_separator(path, separator)?;
    Ok(path.resolve(root).into_iter().map(coerce::to_string).collect())
}

/// Resolve a dot-delimited path and join the string forms of all matches
///
/// Both `path` and `delimiter` must contain non-whitespace characters. No
/// match yields an empty string.
pub fn resolve_joined(root: &Value, path: &str, delimiter: &str) -> Result<String> {
    if path.trim().is_empty() {
        return Err(StructPathError::precondition(
            "Path cannot be null or empty",
        ));
    }
    if delimiter.trim().is_empty() {
        return Err(StructPathError::precondition(
            "Delimiter cannot be null or empty",
        ));
    }

    let strings = resolve_to_strings(root, path, crate::core::path::DEFAULT_SEPARATOR)?;
    Ok(strings.join(delimiter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Value {
        Value::from(value)
    }

    fn strings(values: Vec<&Value>) -> Vec<String> {
        values.into_iter().map(coerce::to_string).collect()
    }

    #[test]
    fn test_simple_object_path() {
        let d = doc(json!({"asset": {"name": "pump-1", "id": 7}}));
        assert_eq!(strings(resolve(&d, &["asset", "name"])), vec!["pump-1"]);
        assert_eq!(resolve(&d, &["asset", "id"]), vec![&Value::Number(7.0)]);
    }

    #[test]
    fn test_flattens_list_of_objects_and_drops_nulls() {
        let d = doc(json!({"a": [{"b": "x"}, {"b": "y"}, {"b": null}]}));
        assert_eq!(strings(resolve(&d, &["a", "b"])), vec!["x", "y"]);
    }

    #[test]
    fn test_nested_lists_are_transparent() {
        let d = doc(json!({"a": [[{"b": "x"}], [{"b": "y"}]]}));
        assert_eq!(strings(resolve(&d, &["a", "b"])), vec!["x", "y"]);
    }

    #[test]
    fn test_list_at_target_flattens() {
        let d = doc(json!({"tags": ["a", null, ["b", "c"], 1]}));
        assert_eq!(strings(resolve(&d, &["tags"])), vec!["a", "b", "c", "1.0"]);
    }

    #[test]
    fn test_object_at_target_is_single_result() {
        let d = doc(json!({"a": {"b": 1}}));
        let results = resolve(&d, &["a"]);
        assert_eq!(results.len(), 1);
        assert!(results[0].is_object());
    }

    #[test]
    fn test_missing_and_mismatched_paths_yield_nothing() {
        let d = doc(json!({"a": {"b": "x"}, "n": null, "s": "leaf", "e": []}));
        assert!(resolve(&d, &["missing"]).is_empty());
        assert!(resolve(&d, &["a", "missing"]).is_empty());
        assert!(resolve(&d, &["s", "deeper"]).is_empty());
        assert!(resolve(&d, &["n", "deeper"]).is_empty());
        assert!(resolve(&d, &["n"]).is_empty());
        assert!(resolve(&d, &["e", "x"]).is_empty());
        assert!(resolve(&d, &["e"]).is_empty());
    }

    #[test]
    fn test_root_list() {
        let d = doc(json!([{"id": 1}, {"id": 2}, {"other": 3}]));
        assert_eq!(strings(resolve(&d, &["id"])), vec!["1.0", "2.0"]);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let d = doc(json!({"a": [{"b": [1, 2]}, {"b": 3}]}));
        let first = resolve(&d, &["a", "b"]);
        let second = resolve(&d, &["a", "b"]);
        assert_eq!(first, second);
        assert_eq!(strings(first), vec!["1.0", "2.0", "3.0"]);
    }

    #[test]
    fn test_resolve_to_strings() {
        let d = doc(json!({"a": {"b.c": [" x ", true]}}));
        assert_eq!(
            resolve_to_strings(&d, "a/b.c", "/").unwrap(),
            vec!["x", "true"]
        );
        assert!(resolve_to_strings(&d, "", ".").is_err());
    }

    #[test]
    fn test_resolve_joined() {
        let d = doc(json!({"a": [{"b": "x"}, {"b": "y"}, {"b": null}]}));
        assert_eq!(resolve_joined(&d, "a.b", "|").unwrap(), "x|y");
        assert_eq!(resolve_joined(&d, "a.missing", "|").unwrap(), "");
        assert_eq!(resolve_joined(&d, "a.b", ", ").unwrap(), "x, y");
    }

    #[test]
    fn test_separator_only_path_is_empty_not_an_error() {
        let d = doc(json!({"a": "x", "": {"": "hidden"}}));
        assert_eq!(resolve_joined(&d, "...", "|").unwrap(), "");
        assert_eq!(resolve_to_strings(&d, "...", ".").unwrap(), Vec::<String>::new());
        assert_eq!(resolve_to_strings(&d, "//", "/").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_resolve_joined_preconditions() {
        let d = doc(json!({"a": "x"}));
        assert!(matches!(
            resolve_joined(&d, "", "|"),
            Err(StructPathError::Precondition { .. })
        ));
        assert!(matches!(
            resolve_joined(&d, "a", ""),
            Err(StructPathError::Precondition { .. })
        ));
        assert!(resolve_joined(&d, "a", "  ").is_err());
        assert!(resolve_joined(&d, " ", "|").is_err());
    }
}
