//! Conversions between FlowDoc and other encodings of the same tree.
//!
//! JSON conversion goes through `serde_json`; the binary form is MessagePack
//! via `rmp-serde`. Neither direction does any semantic work beyond moving a
//! [`Map`] between encodings.
//!
//! JSON `null` has no FlowDoc counterpart: an object member holding `null`
//! is dropped and a `null` anywhere else is an error.

use crate::{parse, stringify, Map, Result};

/// Parses FlowDoc text and renders it as pretty-printed JSON.
///
/// # Examples
///
/// ```rust
/// use flowdoc::flow_to_json;
///
/// let json = flow_to_json("app:\n  port = 80\n").unwrap();
/// assert_eq!(json, "{\n  \"app\": {\n    \"port\": 80\n  }\n}");
/// ```
///
/// # Errors
///
/// Returns an error if the tree cannot be encoded as JSON.
pub fn flow_to_json(text: &str) -> Result<String> {
    let map = parse(text)?;
    Ok(serde_json::to_string_pretty(&map)?)
}

/// Parses a JSON object and renders it as FlowDoc text.
///
/// # Examples
///
/// ```rust
/// use flowdoc::json_to_flow;
///
/// let text = json_to_flow(r#"{"app": {"name": "demo app", "ratio": 1}}"#).unwrap();
/// assert_eq!(text, "app:\n  name = \"demo app\"\n  ratio = 1\n");
///
/// assert!(json_to_flow("[1, 2]").is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::Json`](crate::Error::Json) if the input is not valid
/// JSON, its top level is not an object, or it holds a `null` outside an
/// object member.
pub fn json_to_flow(json: &str) -> Result<String> {
    let map: Map = serde_json::from_str(json)?;
    Ok(stringify(&map))
}

/// Encodes a tree as MessagePack.
///
/// # Errors
///
/// Returns [`Error::Binary`](crate::Error::Binary) if encoding fails.
pub fn to_binary(map: &Map) -> Result<Vec<u8>> {
    Ok(rmp_serde::to_vec(map)?)
}

/// Decodes a tree from MessagePack produced by [`to_binary`].
///
/// # Errors
///
/// Returns [`Error::Binary`](crate::Error::Binary) if the bytes are not a
/// MessagePack map of FlowDoc values.
pub fn from_binary(bytes: &[u8]) -> Result<Map> {
    Ok(rmp_serde::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{flow, Error, Value};

    fn sample() -> Map {
        match flow!({
            "name": "demo",
            "ratio": 0.5,
            "enabled": true,
            "tags": ["a", 1],
            "nested": { "deep": { "x": (-3) } }
        }) {
            Value::Mapping(map) => map,
            other => panic!("expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let text = stringify(&sample());
        let json = flow_to_json(&text).unwrap();
        assert!(json.find("\"name\"").unwrap() < json.find("\"nested\"").unwrap());
        assert_eq!(json_to_flow(&json).unwrap(), text);
    }

    #[test]
    fn test_json_nulls() {
        assert_eq!(json_to_flow(r#"{"a": null, "b": 1}"#).unwrap(), "b = 1\n");
        let err = json_to_flow(r#"{"a": [null]}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_json_whole_floats_stay_floats() {
        assert_eq!(json_to_flow(r#"{"f": 2.0}"#).unwrap(), "f = 2.0\n");
    }

    #[test]
    fn test_binary_round_trip() {
        let map = sample();
        let bytes = to_binary(&map).unwrap();
        assert_eq!(from_binary(&bytes).unwrap(), map);
    }

    #[test]
    fn test_binary_rejects_garbage() {
        let err = from_binary(&[0xc1, 0x00]).unwrap_err();
        assert!(matches!(err, Error::Binary(_)));
    }
}
