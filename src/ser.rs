//! FlowDoc stringification and serialization.
//!
//! This module renders a [`Map`] back to FlowDoc text and converts any
//! `Serialize` type into a [`Value`] tree.
//!
//! ## Overview
//!
//! The stringifier walks a mapping in insertion order:
//!
//! - **Mapping values** emit `key:` and recurse two columns deeper
//! - **Everything else** emits `key = <literal>`
//!
//! Literals are rendered so that [`parse_literal`](crate::parse_literal)
//! reads them back as the same variant: floats always carry a `.`, and
//! strings that are empty or contain whitespace are quoted.
//!
//! ## Usage
//!
//! ```rust
//! use flowdoc::{flow, stringify, Value};
//!
//! let doc = flow!({ "app": { "name": "demo app", "port": 8080 } });
//! let Value::Mapping(map) = doc else { unreachable!() };
//!
//! assert_eq!(stringify(&map), "app:\n  name = \"demo app\"\n  port = 8080\n");
//! ```
//!
//! ## Serializing Rust types
//!
//! ```rust
//! use flowdoc::{to_value, Value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Limits { burst: u32, ratio: Option<f64> }
//!
//! let value = to_value(&Limits { burst: 5, ratio: None }).unwrap();
//! assert_eq!(value.pointer("burst"), Some(&Value::Integer(5)));
//! assert!(value.pointer("ratio").is_none());
//! ```

use crate::{Error, Map, Result, Value};
use serde::ser::{self, Serialize};
use std::fmt::Write;

const INDENT: &str = "  ";

/// Renders a mapping tree as FlowDoc text.
///
/// The output always ends with exactly one newline; an empty mapping renders
/// as `"\n"`.
///
/// Rendering recurses once per nesting level. Trees produced by
/// [`parse`](crate::parse) are bounded by
/// [`ParseOptions::max_depth`](crate::ParseOptions::max_depth); trees built
/// by hand should stay within a similar depth.
#[must_use]
pub fn stringify(map: &Map) -> String {
    let mut output = String::new();
    write_map(&mut output, map, 0);
    if output.is_empty() {
        output.push('\n');
    }
    output
}

fn write_map(output: &mut String, map: &Map, depth: usize) {
    for (key, value) in map {
        for _ in 0..depth {
            output.push_str(INDENT);
        }
        match value {
            Value::Mapping(nested) => {
                output.push_str(key);
                output.push_str(":\n");
                write_map(output, nested, depth + 1);
            }
            other => {
                let _ = writeln!(output, "{} = {}", key, render_literal(other));
            }
        }
    }
}

/// Renders a single value the way it appears on the right of `=`.
///
/// A mapping has no inline form and renders as empty text.
pub(crate) fn render_literal(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => format_float(*f),
        Value::String(s) => {
            if s.is_empty() || s.chars().any(char::is_whitespace) {
                format!("\"{}\"", s)
            } else {
                s.clone()
            }
        }
        Value::List(items) => {
            let parts: Vec<String> = items.iter().map(render_literal).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Mapping(_) => String::new(),
    }
}

/// Shortest round-trip decimal, always containing a `.` when finite.
pub(crate) fn format_float(f: f64) -> String {
    let mut text = f.to_string();
    if f.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Converts `Serialize` types into [`Value`] trees.
///
/// `None` and unit values have no FlowDoc representation. Inside a struct or
/// map the entry is omitted; anywhere else they are
/// [`Error::UnsupportedType`]. Non-unit enum variants become single-key
/// mappings named after the variant.
pub struct ValueSerializer;

/// Serializer output: `None` means "omit this entry".
type Slot = Option<Value>;

impl ValueSerializer {
    /// Serializes `value`, rejecting a top-level `None` or unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the value contains non-string map keys, or is
    /// null-like at the top level or inside a sequence.
    pub fn to_value<T: ?Sized + Serialize>(value: &T) -> Result<Value> {
        value
            .serialize(ValueSerializer)?
            .ok_or_else(|| Error::unsupported_type("null has no FlowDoc representation"))
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = Slot;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Slot> {
        Ok(Some(Value::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Slot> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Slot> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Slot> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Slot> {
        Ok(Some(Value::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Slot> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Slot> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Slot> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Slot> {
        match i64::try_from(v) {
            Ok(i) => Ok(Some(Value::Integer(i))),
            Err(_) => Ok(Some(Value::Float(v as f64))),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Slot> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Slot> {
        Ok(Some(Value::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Slot> {
        Ok(Some(Value::String(v.to_string())))
    }

    fn serialize_str(self, v: &str) -> Result<Slot> {
        Ok(Some(Value::String(v.to_string())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Slot> {
        let list = v.iter().map(|&b| Value::Integer(i64::from(b))).collect();
        Ok(Some(Value::List(list)))
    }

    fn serialize_none(self) -> Result<Slot> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Slot>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Slot> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Slot> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Slot> {
        Ok(Some(Value::String(variant.to_string())))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Slot>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Slot>
    where
        T: ?Sized + Serialize,
    {
        let mut map = Map::new();
        map.insert(variant.to_string(), ValueSerializer::to_value(value)?);
        Ok(Some(Value::Mapping(map)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(None, len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(None, len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(None, len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(Some(variant), len))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(Some(variant)))
    }
}

pub struct SerializeVec {
    variant: Option<&'static str>,
    vec: Vec<Value>,
}

impl SerializeVec {
    fn new(variant: Option<&'static str>, capacity: usize) -> Self {
        SerializeVec {
            variant,
            vec: Vec::with_capacity(capacity),
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(ValueSerializer::to_value(value)?);
        Ok(())
    }

    fn finish(self) -> Result<Slot> {
        Ok(Some(wrap_variant(self.variant, Value::List(self.vec))))
    }
}

pub struct SerializeMap {
    variant: Option<&'static str>,
    map: Map,
    current_key: Option<String>,
}

impl SerializeMap {
    fn new(variant: Option<&'static str>) -> Self {
        SerializeMap {
            variant,
            map: Map::new(),
            current_key: None,
        }
    }

    fn insert<T: ?Sized + Serialize>(&mut self, key: String, value: &T) -> Result<()> {
        if let Some(value) = value.serialize(ValueSerializer)? {
            self.map.insert(key, value);
        }
        Ok(())
    }

    fn finish(self) -> Result<Slot> {
        Ok(Some(wrap_variant(self.variant, Value::Mapping(self.map))))
    }
}

fn wrap_variant(variant: Option<&'static str>, value: Value) -> Value {
    match variant {
        Some(name) => {
            let mut map = Map::new();
            map.insert(name.to_string(), value);
            Value::Mapping(map)
        }
        None => value,
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Slot;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Slot> {
        self.finish()
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Slot;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Slot> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Slot;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Slot> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Slot;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Slot> {
        self.finish()
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Slot;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match ValueSerializer::to_value(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::custom("Map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Slot> {
        self.finish()
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Slot;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Slot> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Slot;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Slot> {
        self.finish()
    }
}
