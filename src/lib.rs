//! # flowdoc
//!
//! A reader and writer for FlowDoc, an indentation-structured configuration
//! format, with an optional schema layer that renames short aliases to
//! canonical field names and coerces values to declared types.
//!
//! ## What is FlowDoc?
//!
//! ```text
//! app:
//!   name = "Demo App"
//!   port = 8080
//!   tags = [web, api]
//! ```
//!
//! Sections are `key:` lines followed by lines indented two spaces deeper;
//! values are `key = literal` lines. See [`format`] for the full grammar.
//!
//! ## Key Features
//!
//! - **Ordered trees**: documents parse into a [`Map`] that keeps key order
//! - **Lossless round trip**: [`stringify`] output parses back to the same tree
//! - **Models**: `$models` / `use_model` directives, or a caller-supplied [`ModelRegistry`]
//! - **Serde compatible**: typed [`from_str`] / [`to_string`] for any `Deserialize` / `Serialize` type
//! - **Forgiving by default**: irregular input is tolerated and reported as [`Diagnostics`]
//!
//! ## Quick Start
//!
//! ```rust
//! use flowdoc::{parse, stringify, Value};
//!
//! let doc = parse("app:\n  name = demo\n  port = 8080\n").unwrap();
//! assert_eq!(doc.get("app").and_then(|a| a.pointer("port")), Some(&Value::Integer(8080)));
//!
//! assert_eq!(stringify(&doc), "app:\n  name = demo\n  port = 8080\n");
//! ```
//!
//! ### Typed structs
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use flowdoc::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     ratio: f64,
//! }
//!
//! let server = Server { host: "localhost".to_string(), port: 80, ratio: 1.0 };
//! let text = to_string(&server).unwrap();
//! assert_eq!(text, "host = localhost\nport = 80\nratio = 1.0\n");
//!
//! let back: Server = from_str(&text).unwrap();
//! assert_eq!(server, back);
//! ```
//!
//! ### Models
//!
//! ```rust
//! use flowdoc::{parse_with_model, Value};
//!
//! let text = "\
//! $models:
//!   Person:
//!     fields:
//!       age:
//!         alias = a
//!         type = int
//! use_model = Person
//! owner:
//!   a = \"41\"
//! ";
//! let doc = parse_with_model(text, None).unwrap();
//! assert_eq!(doc.get("owner").and_then(|o| o.pointer("age")), Some(&Value::Integer(41)));
//! assert!(doc.get("$models").is_none());
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: tolerated irregularities at
//! `debug`, parser progress at `trace`. It never installs a logger.

pub mod apply;
pub mod convert;
pub mod de;
pub mod diagnostics;
pub mod error;
pub mod format;
pub mod lines;
pub mod literal;
pub mod macros;
pub mod map;
pub mod model;
pub mod options;
pub mod ser;
pub mod value;

pub use apply::{apply_model, apply_model_with_diagnostics};
pub use convert::{flow_to_json, from_binary, json_to_flow, to_binary};
pub use de::{Parser, ValueDeserializer};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{Error, Result};
pub use literal::{parse_literal, parse_typed, FieldType};
pub use map::Map;
pub use model::{FieldDefinition, ModelDefinition, ModelRegistry};
pub use options::ParseOptions;
pub use ser::{stringify, ValueSerializer};
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// Parses FlowDoc text into its root mapping.
///
/// Irregular lines are tolerated; use [`Parser`] to inspect them.
///
/// # Examples
///
/// ```rust
/// use flowdoc::{parse, Value};
///
/// let doc = parse("list = [a, b, c]\n").unwrap();
/// assert_eq!(doc.get("list").and_then(Value::as_list).map(Vec::len), Some(3));
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] if sections nest deeper than
/// [`options::DEFAULT_MAX_DEPTH`]; irregular indentation never fails here.
pub fn parse(text: &str) -> Result<Map> {
    parse_with_options(text, &ParseOptions::default())
}

/// Parses FlowDoc text with explicit [`ParseOptions`].
///
/// # Errors
///
/// Returns [`Error::Syntax`] if strict indentation is requested and violated,
/// or if sections nest deeper than [`ParseOptions::max_depth`].
pub fn parse_with_options(text: &str, options: &ParseOptions) -> Result<Map> {
    Parser::from_str(text).with_options(options.clone()).parse()
}

/// Parses FlowDoc text and applies the model named by its `use_model` key.
///
/// With `registry` set to `None`, models come from the document's own
/// `$models` block. Both reserved keys are removed from the result. A document
/// without `use_model` is returned as parsed.
///
/// # Errors
///
/// Returns [`Error::ModelNotFound`] if the named model is not registered
/// (including when there is no registry at all), and
/// [`Error::InvalidDirective`] if `use_model` is not a string.
pub fn parse_with_model(text: &str, registry: Option<&ModelRegistry>) -> Result<Map> {
    Parser::from_str(text).parse_with_model(registry)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use flowdoc::{to_value, Value};
///
/// let value = to_value(&vec![1, 2]).unwrap();
/// assert_eq!(value, Value::List(vec![Value::Integer(1), Value::Integer(2)]));
/// ```
///
/// # Errors
///
/// Returns an error if the value is null-like outside a struct field, or has
/// non-string map keys.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    ValueSerializer::to_value(value)
}

/// Deserialize an instance of type `T` from a [`Value`].
///
/// # Errors
///
/// Returns an error if the value does not have the shape `T` expects.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Serialize any `T: Serialize` to FlowDoc text.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] unless `T` serializes to a mapping
/// (a struct or a map).
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    match to_value(value)? {
        Value::Mapping(map) => Ok(stringify(&map)),
        other => Err(Error::unsupported_type(&format!(
            "top level must be a mapping, found {}",
            other.type_name()
        ))),
    }
}

/// Serialize any `T: Serialize` to a writer as FlowDoc text.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Deserialize an instance of type `T` from FlowDoc text.
///
/// # Errors
///
/// Returns an error if the parsed tree does not have the shape `T` expects.
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(Value::Mapping(parse(s)?))
}

/// Deserialize an instance of type `T` from an I/O stream of FlowDoc text.
///
/// # Examples
///
/// ```rust
/// use flowdoc::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x = 1\ny = 2\n")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not UTF-8, or the tree
/// does not have the shape `T` expects.
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader.read_to_string(&mut string)?;
    from_str(&string)
}

/// Reads and parses a FlowDoc file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Map> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Reads a FlowDoc file and applies its `use_model` directive.
///
/// # Errors
///
/// See [`load`] and [`parse_with_model`].
pub fn load_with_model<P: AsRef<Path>>(path: P, registry: Option<&ModelRegistry>) -> Result<Map> {
    let text = fs::read_to_string(path)?;
    parse_with_model(&text, registry)
}

/// Writes a tree to a file as FlowDoc text.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
pub fn save<P: AsRef<Path>>(path: P, map: &Map) -> Result<()> {
    fs::write(path, stringify(map))?;
    Ok(())
}

/// Reads a MessagePack file written by [`save_binary`].
///
/// # Errors
///
/// Returns [`Error::Io`] or [`Error::Binary`].
pub fn load_binary<P: AsRef<Path>>(path: P) -> Result<Map> {
    let bytes = fs::read(path)?;
    from_binary(&bytes)
}

/// Writes a tree to a file as MessagePack.
///
/// # Errors
///
/// Returns [`Error::Io`] or [`Error::Binary`].
pub fn save_binary<P: AsRef<Path>>(path: P, map: &Map) -> Result<()> {
    fs::write(path, to_binary(map)?)?;
    Ok(())
}
