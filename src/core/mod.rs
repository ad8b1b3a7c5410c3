pub mod coerce;
pub mod path;
pub mod resolve;
pub mod value;

pub use coerce::{
    coerce_all, coerce_each, to_boolean, to_double, to_long, to_string, Coerced, FromValue,
    TargetType,
};
pub use path::{FieldPath, DEFAULT_SEPARATOR};
pub use resolve::{resolve, resolve_joined, resolve_to_strings};
pub use value::{Value, ValueKind};
