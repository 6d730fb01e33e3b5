//! Scalar literal parsing.
//!
//! [`parse_literal`] infers a type from the raw text on the right-hand side of
//! an assignment. [`parse_typed`] is the strict variant used by models: the
//! field's declared [`FieldType`] decides, and text that does not fit is an
//! error instead of a silent fallback to a string.
//!
//! ## Inference order
//!
//! | Text | Result |
//! |------|--------|
//! | `true` / `false` | `Bool` |
//! | `"..."` | `String`, quotes stripped, no escapes |
//! | `[...]` | `List`, split on every comma |
//! | contains `.` and parses as a float | `Float` |
//! | parses as an integer | `Integer` |
//! | anything else | `String`, verbatim |
//!
//! List splitting does not look at quotes or brackets, so `["a, b", c]`
//! yields three elements. The stringifier never produces such input.

use crate::{Error, Result, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

// ASCII digits only; `\d` is Unicode-aware in `regex`.
static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is valid"));

static DATETIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}")
        .expect("datetime pattern is valid")
});

/// Declared type of a model field.
///
/// # Examples
///
/// ```rust
/// use flowdoc::FieldType;
///
/// assert_eq!("datetime".parse::<FieldType>(), Ok(FieldType::DateTime));
/// assert_eq!(FieldType::Int.to_string(), "int");
/// assert!("uuid".parse::<FieldType>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FieldType {
    #[default]
    String,
    Bool,
    Int,
    Float,
    Date,
    DateTime,
}

impl FieldType {
    /// Returns the name used for this type in `$models` declarations.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "string" => Ok(FieldType::String),
            "bool" => Ok(FieldType::Bool),
            "int" => Ok(FieldType::Int),
            "float" => Ok(FieldType::Float),
            "date" => Ok(FieldType::Date),
            "datetime" => Ok(FieldType::DateTime),
            other => Err(format!("unknown field type '{}'", other)),
        }
    }
}

/// Infers a [`Value`] from a raw scalar token.
///
/// # Examples
///
/// ```rust
/// use flowdoc::{parse_literal, Value};
///
/// assert_eq!(parse_literal("true"), Value::Bool(true));
/// assert_eq!(parse_literal("42"), Value::Integer(42));
/// assert_eq!(parse_literal("4.5"), Value::Float(4.5));
/// assert_eq!(parse_literal("1.2.3"), Value::from("1.2.3"));
/// assert_eq!(parse_literal("\"hello world\""), Value::from("hello world"));
/// assert_eq!(
///     parse_literal("[a, 2]"),
///     Value::List(vec![Value::from("a"), Value::Integer(2)])
/// );
/// ```
#[must_use]
pub fn parse_literal(raw: &str) -> Value {
    let v = raw.trim();
    match v {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Some(inner) = strip_wrapping(v, '"', '"') {
        return Value::String(inner.to_string());
    }

    if let Some(inner) = strip_wrapping(v, '[', ']') {
        let inner = inner.trim();
        if inner.is_empty() {
            return Value::List(Vec::new());
        }
        return Value::List(inner.split(',').map(parse_literal).collect());
    }

    let number = if v.contains('.') {
        v.parse::<f64>().ok().map(Value::Float)
    } else {
        v.parse::<i64>().ok().map(Value::Integer)
    };
    number.unwrap_or_else(|| Value::String(v.to_string()))
}

/// Parses raw text strictly as the declared field type.
///
/// Dates and datetimes are only checked for shape and stay strings.
///
/// # Errors
///
/// Returns [`Error::TypedValue`] when the text does not fit the type.
///
/// # Examples
///
/// ```rust
/// use flowdoc::{parse_typed, FieldType, Value};
///
/// assert_eq!(parse_typed("7", FieldType::Int).unwrap(), Value::Integer(7));
/// assert_eq!(parse_typed("\"Ann\"", FieldType::String).unwrap(), Value::from("Ann"));
/// assert_eq!(
///     parse_typed("2024-02-30", FieldType::Date).unwrap(),
///     Value::from("2024-02-30")
/// );
/// assert!(parse_typed("seven", FieldType::Int).is_err());
/// ```
pub fn parse_typed(raw: &str, field_type: FieldType) -> Result<Value> {
    let v = raw.trim();

    match field_type {
        FieldType::Bool => match v {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(Error::typed_value(field_type, v)),
        },
        FieldType::Int => v
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| Error::typed_value(field_type, v)),
        FieldType::Float => v
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| Error::typed_value(field_type, v)),
        FieldType::Date => {
            if DATE_PATTERN.is_match(v) {
                Ok(Value::String(v.to_string()))
            } else {
                Err(Error::typed_value(field_type, v))
            }
        }
        FieldType::DateTime => {
            if DATETIME_PATTERN.is_match(v) {
                Ok(Value::String(v.to_string()))
            } else {
                Err(Error::typed_value(field_type, v))
            }
        }
        FieldType::String => Ok(Value::String(
            strip_wrapping(v, '"', '"').unwrap_or(v).to_string(),
        )),
    }
}

/// Returns the interior of `s` when it starts with `open` and ends with `close`.
fn strip_wrapping(s: &str, open: char, close: char) -> Option<&str> {
    if s.len() >= 2 && s.starts_with(open) && s.ends_with(close) {
        Some(&s[open.len_utf8()..s.len() - close.len_utf8()])
    } else {
        None
    }
}
