//! Ordered mapping type for FlowDoc sections and documents.
//!
//! [`Map`] wraps [`IndexMap`] so that keys come back out in the order the
//! document declared them. The stringifier relies on this: rendering a parsed
//! document reproduces its key order exactly.
//!
//! Inserting an existing key replaces the value but keeps the key's original
//! position, which is how a repeated assignment at the same nesting level
//! overwrites the earlier one.
//!
//! ## Examples
//!
//! ```rust
//! use flowdoc::{Map, Value};
//!
//! let mut map = Map::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::Value;
use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// An insertion-ordered map of string keys to FlowDoc values.
///
/// # Examples
///
/// ```rust
/// use flowdoc::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
/// map.insert("first".to_string(), Value::from(3));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// assert_eq!(map.get("first").and_then(|v| v.as_i64()), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Map(IndexMap<String, Value>);

impl Map {
    /// Creates an empty `Map`.
    #[must_use]
    pub fn new() -> Self {
        Map(IndexMap::new())
    }

    /// Creates an empty `Map` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Map(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its position.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flowdoc::{Map, Value};
    ///
    /// let mut map: Map = vec![
    ///     ("a".to_string(), Value::from(1)),
    ///     ("b".to_string(), Value::from(2)),
    ///     ("c".to_string(), Value::from(3)),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// assert_eq!(map.remove("b"), Some(Value::from(2)));
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert_eq!(keys, vec!["a", "c"]);
    /// ```
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Map(IndexMap::from_iter(iter))
    }
}

impl Serialize for Map {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Map {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = Map;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a FlowDoc mapping")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Map, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut values = Map::with_capacity(access.size_hint().unwrap_or(0));
                // FlowDoc has no null; a null entry is dropped rather than rejected.
                while let Some((key, value)) = access.next_entry::<String, Option<Value>>()? {
                    if let Some(value) = value {
                        values.insert(key, value);
                    }
                }
                Ok(values)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Map {
        vec![
            ("a".to_string(), Value::from(1)),
            ("b".to_string(), Value::Mapping(Map::new())),
            ("c".to_string(), Value::from(3)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_get_mut_edits_in_place() {
        let mut map = sample();
        if let Some(value) = map.get_mut("a") {
            *value = Value::from("changed");
        }
        assert_eq!(map.get("a"), Some(&Value::from("changed")));
        assert!(map.get_mut("missing").is_none());
    }

    #[test]
    fn test_nested_section_is_mutable() {
        let mut map = sample();
        let section = map
            .get_mut("b")
            .and_then(Value::as_mapping_mut)
            .expect("b is a section");
        section.insert("x".to_string(), Value::from(true));

        assert_eq!(map.get("b").and_then(|b| b.pointer("x")), Some(&Value::Bool(true)));
        assert!(map.get_mut("a").and_then(Value::as_mapping_mut).is_none());
    }

    #[test]
    fn test_remove_and_reinsert_moves_key_to_end() {
        let mut map = sample();
        map.remove("a");
        map.insert("a".to_string(), Value::from(1));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "c", "a"]);
        assert!(map.contains_key("a"));
    }
}
