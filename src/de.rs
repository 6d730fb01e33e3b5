//! FlowDoc parsing and deserialization.
//!
//! This module provides the [`Parser`], which turns FlowDoc text into a
//! [`Map`], and the [`ValueDeserializer`], which drives any
//! `Deserialize` type from a parsed [`Value`].
//!
//! ## Overview
//!
//! Parsing is a single pass over the significant lines produced by
//! [`Lines`](crate::lines::Lines):
//!
//! - **Section header** (`key:`): opens a nested mapping one level deeper
//! - **Assignment** (`key = value`): stores a literal in the innermost open section
//! - **Anything else**: ignored and recorded as a diagnostic
//!
//! Open sections live on an explicit frame stack. A frame owns its mapping
//! until a shallower line closes it, at which point the mapping is moved into
//! the parent under its key. The root frame is never closed.
//!
//! ## Usage
//!
//! ```rust
//! use flowdoc::{parse, Value};
//!
//! let doc = parse("a:\n  b:\n    c = 1\n  d = 2\n").unwrap();
//! let a = doc.get("a").and_then(Value::as_mapping).unwrap();
//! assert_eq!(a.get("d"), Some(&Value::Integer(2)));
//! ```
//!
//! ## Typed Deserialization
//!
//! ```rust
//! use flowdoc::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server { host: String, port: u16 }
//!
//! let server: Server = from_str("host = localhost\nport = 8080\n").unwrap();
//! assert_eq!(server, Server { host: "localhost".to_string(), port: 8080 });
//! ```

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lines::{Line, Lines};
use crate::literal::parse_literal;
use crate::model::ModelRegistry;
use crate::{Error, Map, ParseOptions, Result, Value};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};

/// An open section during parsing.
struct Frame {
    /// Indentation level of the lines that belong directly to this section.
    level: usize,
    /// Key under which the mapping is stored in the parent frame.
    key: String,
    map: Map,
}

/// The FlowDoc text parser.
///
/// Created via [`Parser::from_str`]. Keeps the [`Diagnostics`] of its most
/// recent parse.
///
/// # Examples
///
/// ```rust
/// use flowdoc::{DiagnosticKind, ParseOptions, Parser};
///
/// let mut parser = Parser::from_str("a:\n   b = 1\n").with_options(ParseOptions::new());
/// let doc = parser.parse().unwrap();
///
/// assert!(doc.get("a").is_some());
/// assert_eq!(parser.diagnostics().count(DiagnosticKind::OddIndentation), 1);
/// ```
pub struct Parser<'a> {
    lines: Lines<'a>,
    options: ParseOptions,
    diagnostics: Diagnostics,
}

impl<'a> Parser<'a> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'a str) -> Self {
        Parser {
            lines: Lines::new(input),
            options: ParseOptions::default(),
            diagnostics: Diagnostics::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Diagnostics recorded by the last call to [`parse`](Self::parse) or
    /// [`parse_with_model`](Self::parse_with_model).
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// Parses the whole input into its root mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] when strict indentation is enabled and the
    /// input violates it, or when sections nest deeper than
    /// [`ParseOptions::max_depth`].
    pub fn parse(&mut self) -> Result<Map> {
        self.diagnostics = Diagnostics::new();
        log::trace!(
            "parsing FlowDoc document (strict indentation: {})",
            self.options.strict_indentation
        );

        let mut stack = vec![Frame {
            level: 0,
            key: String::new(),
            map: Map::new(),
        }];

        for line in self.lines.clone() {
            let level = line.indent_level();
            let trimmed = line.trimmed();

            if let Some(header) = trimmed.strip_suffix(':') {
                self.check_odd_indentation(&line)?;
                close_frames(&mut stack, level);
                // The root frame does not count towards the depth.
                if stack.len() > self.options.max_depth {
                    let msg = format!(
                        "sections nest deeper than the maximum depth of {}",
                        self.options.max_depth
                    );
                    return Err(Error::syntax(line.number, &msg, &line.text));
                }
                let parent = self.innermost(&mut stack, &line, level)?;
                let key = header.trim().to_string();
                parent.insert(key.clone(), Value::Mapping(Map::new()));
                stack.push(Frame {
                    level: level + 1,
                    key,
                    map: Map::new(),
                });
            } else if let Some((key, raw)) = trimmed.split_once('=') {
                self.check_odd_indentation(&line)?;
                close_frames(&mut stack, level);
                let parent = self.innermost(&mut stack, &line, level)?;
                parent.insert(key.trim().to_string(), parse_literal(raw));
            } else {
                self.diagnostics.at_line(
                    DiagnosticKind::IgnoredLine,
                    line.number,
                    format!("no trailing ':' and no '=' in '{}'", trimmed),
                );
            }
        }

        close_frames(&mut stack, 0);
        let root = stack.pop().map(|frame| frame.map).unwrap_or_default();
        log::trace!("parsed {} top-level entries", root.len());
        Ok(root)
    }

    /// Parses the input and resolves its `use_model` directive.
    ///
    /// When `registry` is `None` the models declared in the document's own
    /// `$models` block are used. See [`crate::parse_with_model`].
    ///
    /// # Errors
    ///
    /// Propagates strict-mode syntax errors, [`Error::ModelNotFound`] and
    /// [`Error::InvalidDirective`].
    pub fn parse_with_model(&mut self, registry: Option<&ModelRegistry>) -> Result<Map> {
        let raw = self.parse()?;
        crate::apply::resolve_document(raw, registry, &mut self.diagnostics)
    }

    fn check_odd_indentation(&mut self, line: &Line<'_>) -> Result<()> {
        let spaces = line.leading_spaces();
        if spaces % 2 == 0 {
            return Ok(());
        }
        let msg = format!("{} leading spaces is not a multiple of two", spaces);
        if self.options.strict_indentation {
            return Err(Error::syntax(line.number, &msg, &line.text));
        }
        self.diagnostics
            .at_line(DiagnosticKind::OddIndentation, line.number, msg);
        Ok(())
    }

    /// Returns the mapping a line at `level` writes into, after `close_frames`.
    fn innermost<'s>(
        &mut self,
        stack: &'s mut [Frame],
        line: &Line<'_>,
        level: usize,
    ) -> Result<&'s mut Map> {
        let Some(top) = stack.last_mut() else {
            return Err(Error::syntax(line.number, "no open section", &line.text));
        };
        if top.level < level {
            let msg = format!(
                "indented to level {} inside a section at level {}",
                level, top.level
            );
            if self.options.strict_indentation {
                return Err(Error::syntax(line.number, &msg, &line.text));
            }
            self.diagnostics
                .at_line(DiagnosticKind::IndentJump, line.number, msg);
        }
        Ok(&mut top.map)
    }
}

/// Closes every frame deeper than `level`, moving each mapping into its parent.
fn close_frames(stack: &mut Vec<Frame>, level: usize) {
    while stack.len() > 1 && stack.last().map_or(false, |frame| frame.level > level) {
        let Some(frame) = stack.pop() else { break };
        if let Some(parent) = stack.last_mut() {
            parent.map.insert(frame.key, Value::Mapping(frame.map));
        }
    }
}

/// Drives a `Deserialize` implementation from an owned [`Value`].
///
/// Scalars are lenient towards string targets: a `String` field accepts an
/// integer, float or bool and receives its literal text, since FlowDoc infers
/// `zip = 01234` as an integer.
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Integer(i) => visitor.visit_i64(i),
            Value::Float(f) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::List(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            Value::Mapping(map) => visitor.visit_map(MapDeserializer::new(map)),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Bool(_) | Value::Integer(_) | Value::Float(_) => {
                visitor.visit_string(self.value.to_string())
            }
            other => ValueDeserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Mapping(map) => {
                let mut entries = map.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((variant, value)), None) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    _ => Err(Error::custom(
                        "expected a mapping with exactly one key for an enum variant",
                    )),
                }
            }
            other => Err(Error::custom(format!(
                "expected enum, found {}",
                other.type_name()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: Map) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Mapping(map) if map.is_empty() => Ok(()),
            _ => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::List(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            _ => Err(Error::custom("Expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Mapping(map) => visitor.visit_map(MapDeserializer::new(map)),
            _ => Err(Error::custom("Expected struct variant")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow;
    use serde::Deserialize;

    fn parse(text: &str) -> Map {
        Parser::from_str(text).parse().unwrap()
    }

    fn section<'m>(map: &'m Map, key: &str) -> &'m Map {
        map.get(key).and_then(Value::as_mapping).unwrap()
    }

    #[test]
    fn test_nested_sections() {
        let doc = parse("a:\n  b:\n    c = 1\n  d = 2\n");
        let expected = flow!({ "a": { "b": { "c": 1 }, "d": 2 } });
        assert_eq!(Value::Mapping(doc), expected);
    }

    #[test]
    fn test_sibling_sections() {
        let doc = parse("a:\n  x = 1\nb:\n  y = 2\nz = 3\n");
        let keys: Vec<_> = doc.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "z"]);
        assert_eq!(section(&doc, "a").get("x"), Some(&Value::Integer(1)));
        assert_eq!(section(&doc, "b").get("y"), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_deep_close_returns_to_root() {
        let doc = parse("a:\n  b:\n    c:\n      d = 1\ne = 2\n");
        assert_eq!(doc.get("e"), Some(&Value::Integer(2)));
        let c = section(section(section(&doc, "a"), "b"), "c");
        assert_eq!(c.get("d"), Some(&Value::Integer(1)));
    }

    #[test]
    fn test_empty_section() {
        let doc = parse("empty:\nnext = 1\n");
        assert_eq!(doc.get("empty"), Some(&Value::Mapping(Map::new())));
        assert_eq!(doc.get("next"), Some(&Value::Integer(1)));
    }

    #[test]
    fn test_later_assignment_overwrites() {
        let doc = parse("a = 1\nb = 2\na = 3\n");
        let keys: Vec<_> = doc.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(doc.get("a"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_repeated_section_replaces_earlier_one() {
        let doc = parse("s:\n  x = 1\ns:\n  y = 2\n");
        let s = section(&doc, "s");
        assert!(s.get("x").is_none());
        assert_eq!(s.get("y"), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_split_on_first_equals() {
        let doc = parse("query = a=b\n");
        assert_eq!(doc.get("query"), Some(&Value::from("a=b")));
    }

    #[test]
    fn test_trailing_colon_wins_over_equals() {
        let doc = parse("url = http:\n");
        assert_eq!(doc.get("url = http"), Some(&Value::Mapping(Map::new())));
    }

    #[test]
    fn test_ignored_lines_are_reported() {
        let mut parser = Parser::from_str("a = 1\njust words\nb = 2\n");
        let doc = parser.parse().unwrap();
        assert_eq!(doc.len(), 2);
        let diagnostic = parser.diagnostics().iter().next().unwrap();
        assert_eq!(diagnostic.kind, DiagnosticKind::IgnoredLine);
        assert_eq!(diagnostic.line, Some(2));
    }

    #[test]
    fn test_odd_indentation_rounds_down() {
        let mut parser = Parser::from_str("a:\n   b = 1\n");
        let doc = parser.parse().unwrap();
        assert_eq!(section(&doc, "a").get("b"), Some(&Value::Integer(1)));
        assert_eq!(parser.diagnostics().count(DiagnosticKind::OddIndentation), 1);
    }

    #[test]
    fn test_indent_jump_is_tolerated() {
        let mut parser = Parser::from_str("a:\n      b = 1\nc = 2\n");
        let doc = parser.parse().unwrap();
        assert_eq!(section(&doc, "a").get("b"), Some(&Value::Integer(1)));
        assert_eq!(doc.get("c"), Some(&Value::Integer(2)));
        assert_eq!(parser.diagnostics().count(DiagnosticKind::IndentJump), 1);
    }

    #[test]
    fn test_strict_mode_rejects_odd_indentation() {
        let err = Parser::from_str("a:\n   b = 1\n")
            .with_options(ParseOptions::strict())
            .parse()
            .unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 2, .. }));
    }

    #[test]
    fn test_strict_mode_rejects_indent_jump() {
        let err = Parser::from_str("x = 1\n  y = 2\n")
            .with_options(ParseOptions::strict())
            .parse()
            .unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 2, .. }));
    }

    #[test]
    fn test_strict_mode_accepts_well_formed_input() {
        let doc = Parser::from_str("a:\n  b:\n    c = 1\n  d = 2\n")
            .with_options(ParseOptions::strict())
            .parse()
            .unwrap();
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_parse_resets_diagnostics() {
        let mut parser = Parser::from_str("junk\n");
        parser.parse().unwrap();
        parser.parse().unwrap();
        assert_eq!(parser.diagnostics().len(), 1);
    }

    #[test]
    fn test_into_diagnostics() {
        let mut parser = Parser::from_str("junk\na:\n   b = 1\n");
        parser.parse().unwrap();
        let kinds: Vec<_> = parser.into_diagnostics().into_iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::IgnoredLine, DiagnosticKind::OddIndentation]
        );
    }

    /// `depth` nested `k:` sections with one assignment in the innermost.
    fn chain(depth: usize) -> String {
        let mut text: String = (0..depth)
            .map(|i| format!("{}k:\n", "  ".repeat(i)))
            .collect();
        text.push_str(&format!("{}v = 1\n", "  ".repeat(depth)));
        text
    }

    #[test]
    fn test_nesting_up_to_max_depth() {
        let doc = parse(&chain(crate::options::DEFAULT_MAX_DEPTH));
        let mut current = &doc;
        for _ in 0..crate::options::DEFAULT_MAX_DEPTH {
            current = section(current, "k");
        }
        assert_eq!(current.get("v"), Some(&Value::Integer(1)));
    }

    #[test]
    fn test_nesting_beyond_max_depth_is_rejected() {
        let depth = crate::options::DEFAULT_MAX_DEPTH + 1;
        let err = Parser::from_str(&chain(depth)).parse().unwrap_err();
        assert!(matches!(err, Error::Syntax { line, .. } if line == depth));

        let options = ParseOptions::new().with_max_depth(2);
        assert!(Parser::from_str(&chain(2)).with_options(options.clone()).parse().is_ok());
        let err = Parser::from_str(&chain(3))
            .with_options(options)
            .parse()
            .unwrap_err();
        assert!(err.to_string().contains("maximum depth of 2"));
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Mode {
        Fast,
        Limited { rate: u32 },
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Settings {
        name: String,
        zip: String,
        retries: Option<u8>,
        timeout: Option<f64>,
        mode: Mode,
        fallback: Mode,
        tags: Vec<String>,
    }

    #[test]
    fn test_value_deserializer_drives_structs() {
        let doc = parse(
            "name = demo\nzip = 01234\nretries = 3\nmode = Fast\nfallback:\n  Limited:\n    rate = 10\ntags = [a, b]\n",
        );
        let settings = Settings::deserialize(ValueDeserializer::new(Value::Mapping(doc))).unwrap();
        assert_eq!(
            settings,
            Settings {
                name: "demo".to_string(),
                zip: "1234".to_string(),
                retries: Some(3),
                timeout: None,
                mode: Mode::Fast,
                fallback: Mode::Limited { rate: 10 },
                tags: vec!["a".to_string(), "b".to_string()],
            }
        );
    }
}
