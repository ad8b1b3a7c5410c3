//! Document value model
//!
//! A [`Value`] is one node of a semi-structured document tree: an object, a
//! list, or a scalar leaf. Documents decoded from JSON or YAML are converted
//! into this model before any path resolution happens.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A node in a semi-structured document
///
/// Exactly one variant is active per instance. Object keys are kept sorted so
/// that every textual rendering of a value is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Object(BTreeMap<String, Value>),
    List(Vec<Value>),
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

/// The variant tag of a [`Value`], used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Object,
    List,
    String,
    Number,
    Bool,
    Null,
}

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Create a number value
    pub fn number(n: f64) -> Self {
        Self::Number(n)
    }

    /// Create a boolean value
    pub fn bool(b: bool) -> Self {
        Self::Bool(b)
    }

    /// Create a list value
    pub fn list(values: Vec<Value>) -> Self {
        Self::List(values)
    }

    /// Create an object value from key/value pairs
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// The variant tag of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Object(_) => ValueKind::Object,
            Self::List(_) => ValueKind::List,
            Self::String(_) => ValueKind::String,
            Self::Number(_) => ValueKind::Number,
            Self::Bool(_) => ValueKind::Bool,
            Self::Null => ValueKind::Null,
        }
    }

    /// Check if this value is an object
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Check if this value is a list
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Check if this value is a string
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Check if this value is a number
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Check if this value is a boolean
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this value is a leaf (no children)
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Object(_) | Self::List(_))
    }

    /// Get as object if this value is an object
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Get as a slice if this value is a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// Get as string slice if this value is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as f64 if this value is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as bool if this value is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Look up a direct child of an object value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Same kind names as the structured-value wire format.
        match self {
            Self::Object => write!(f, "STRUCT_VALUE"),
            Self::List => write!(f, "LIST_VALUE"),
            Self::String => write!(f, "STRING_VALUE"),
            Self::Number => write!(f, "NUMBER_VALUE"),
            Self::Bool => write!(f, "BOOL_VALUE"),
            Self::Null => write!(f, "NULL_VALUE"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::core::coerce::to_string(self))
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(values) => {
                Self::List(values.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Self::Null,
            serde_yaml::Value::Bool(b) => Self::Bool(b),
            serde_yaml::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_yaml::Value::String(s) => Self::String(s),
            serde_yaml::Value::Sequence(seq) => {
                Self::List(seq.into_iter().map(Self::from).collect())
            }
            serde_yaml::Value::Mapping(map) => Self::Object(
                map.into_iter()
                    .filter_map(|(k, v)| yaml_key(k).map(|key| (key, Self::from(v))))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

/// Mapping keys must be scalars to become object keys
fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Null => Some("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => None,
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::List(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_creation() {
        let str_val = Value::string("hello");
        assert!(str_val.is_string());
        assert!(str_val.is_scalar());
        assert_eq!(str_val.as_str(), Some("hello"));
        assert_eq!(str_val.as_f64(), None);

        let num_val = Value::number(42.0);
        assert_eq!(num_val.kind(), ValueKind::Number);
        assert_eq!(num_val.as_f64(), Some(42.0));

        let obj = Value::object([("a", Value::bool(true))]);
        assert!(obj.is_object());
        assert!(!obj.is_scalar());
        assert_eq!(obj.get("a"), Some(&Value::Bool(true)));
        assert_eq!(obj.get("b"), None);
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({
            "name": "pump-1",
            "readings": [1, 2.5, null],
            "active": false
        }));

        assert_eq!(value.get("name"), Some(&Value::string("pump-1")));
        assert_eq!(value.get("active"), Some(&Value::Bool(false)));
        assert_eq!(
            value.get("readings"),
            Some(&Value::list(vec![
                Value::Number(1.0),
                Value::Number(2.5),
                Value::Null
            ]))
        );
    }

    #[test]
    fn test_from_yaml() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("title: Test\n1: one\ntagged: !custom 5\n").unwrap();
        let value = Value::from(yaml);

        assert_eq!(value.get("title"), Some(&Value::string("Test")));
        assert_eq!(value.get("1"), Some(&Value::string("one")));
        assert_eq!(value.get("tagged"), Some(&Value::Number(5.0)));
    }

    #[test]
    fn test_serde_round_trip_through_json_text() {
        let value: Value = serde_json::from_str(r#"{"a": [1, "x", true, null]}"#).unwrap();
        assert_eq!(
            value,
            Value::object([(
                "a",
                Value::list(vec![
                    Value::Number(1.0),
                    Value::string("x"),
                    Value::Bool(true),
                    Value::Null,
                ])
            )])
        );
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"a":[1.0,"x",true,null]}"#
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ValueKind::Object.to_string(), "STRUCT_VALUE");
        assert_eq!(ValueKind::List.to_string(), "LIST_VALUE");
        assert_eq!(ValueKind::Null.to_string(), "NULL_VALUE");
    }
}
