//! Leaf value coercion
//!
//! Pure conversions from a single [`Value`] into a string, double, long
//! integer, or boolean. The numeric conversions fail with
//! [`StructPathError::NumberFormat`]; the boolean conversion only fails for
//! structurally incompatible variants, with [`StructPathError::Parse`].
//!
//! Coercing a whole result sequence is an explicit caller choice between
//! [`coerce_all`] (fail on the first error) and [`coerce_each`] (one result
//! per element).

use crate::core::value::Value;
use crate::error::{Result, StructPathError};
use std::fmt;

/// Convert a value to its string form. Never fails.
///
/// - strings are trimmed
/// - numbers use the shortest round-trip decimal form, always with a
///   fractional part or exponent (`42.0`, `3.14`, `1e100`)
/// - booleans become `true` / `false`
/// - lists and objects become compact JSON text with sorted keys
/// - null becomes the literal `null`
pub fn to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => format!("{n:?}"),
        Value::Bool(b) => b.to_string(),
        Value::List(_) | Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
        Value::Null => "null".to_string(),
    }
}

/// Convert a value to a double
///
/// Numbers are returned as-is and strings are parsed as decimal text. The
/// only non-numeric spellings accepted are `NaN` and `Infinity`, optionally
/// signed and in exactly that case.
pub fn to_double(value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::String(s) => parse_decimal(s)
            .ok_or_else(|| StructPathError::number_format("double", value.kind(), s.as_str())),
        _ => Err(StructPathError::number_format(
            "double",
            value.kind(),
            literal(value),
        )),
    }
}

/// Convert a value to a long integer
///
/// Numbers are rounded half up (`2.5` → `3`, `-2.5` → `-2`); NaN becomes 0
/// and out-of-range values saturate. Strings must be plain integer text.
pub fn to_long(value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => Ok(round_half_up(*n)),
        Value::String(s) => s
            .parse::<i64>()
            .map_err(|_| StructPathError::number_format("long", value.kind(), s.as_str())),
        _ => Err(StructPathError::number_format(
            "long",
            value.kind(),
            literal(value),
        )),
    }
}

/// Convert a value to a boolean
///
/// A number is `true` only when it is exactly `1.0`; there is no truthiness
/// threshold. A string is `true` when it equals `"true"` ignoring ASCII case,
/// and `false` otherwise.
pub fn to_boolean(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(*n == 1.0),
        Value::String(s) => Ok(s.eq_ignore_ascii_case("true")),
        Value::List(_) | Value::Object(_) | Value::Null => Err(StructPathError::parse(
            "boolean",
            value.kind(),
            literal(value),
        )),
    }
}

fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    let n = text.parse::<f64>().ok()?;
    if n.is_finite() {
        return Some(n);
    }
    // `f64::from_str` also takes `inf`, `nan` and any casing of them.
    let unsigned = text.trim_start_matches(|c: char| c == '+' || c == '-');
    match unsigned {
        "Infinity" | "NaN" => Some(n),
        _ if unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') => Some(n),
        _ => None,
    }
}

// `f64::round` rounds ties away from zero; this rounds them towards +inf.
fn round_half_up(n: f64) -> i64 {
    if n.is_nan() {
        return 0;
    }
    let floor = n.floor();
    let rounded = if n - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => to_string(other),
    }
}

/// Types a leaf value can be coerced into
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(to_string(value))
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        to_double(value)
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self> {
        to_long(value)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        to_boolean(value)
    }
}

/// Coerce every value, failing the whole batch on the first error
pub fn coerce_all<'a, T, I>(values: I) -> Result<Vec<T>>
where
    T: FromValue,
    I: IntoIterator<Item = &'a Value>,
{
    values.into_iter().map(T::from_value).collect()
}

/// Coerce every value independently, keeping one result per element in order
pub fn coerce_each<'a, T, I>(values: I) -> Vec<Result<T>>
where
    T: FromValue,
    I: IntoIterator<Item = &'a Value>,
{
    values.into_iter().map(T::from_value).collect()
}

/// A coercion target selected at run time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetType {
    #[default]
    String,
    Double,
    Long,
    Boolean,
}

/// The result of a run-time selected coercion
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Text(String),
    Double(f64),
    Long(i64),
    Boolean(bool),
}

impl TargetType {
    /// Apply the matching conversion to a value
    pub fn coerce(self, value: &Value) -> Result<Coerced> {
        Ok(match self {
            Self::String => Coerced::Text(to_string(value)),
            Self::Double => Coerced::Double(to_double(value)?),
            Self::Long => Coerced::Long(to_long(value)?),
            Self::Boolean => Coerced::Boolean(to_boolean(value)?),
        })
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Double => write!(f, "double"),
            Self::Long => write!(f, "long"),
            Self::Boolean => write!(f, "boolean"),
        }
    }
}

impl fmt::Display for Coerced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Double(n) => write!(f, "{n:?}"),
            Self::Long(i) => write!(f, "{i}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}
