//! Addresses into a form's value tree.
//!
//! A path is a list of segments; object keys and array indices are kept
//! apart so `items.0.quantity` addresses the `quantity` field of the first
//! row of `items`, never an object key named `"0"`.

use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

/// Dot-delimited address of a field, e.g. `return_items.items.0.quantity`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormPath(Vec<Segment>);

impl FormPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Parses dot-joined text. Purely numeric parts become indices.
    pub fn parse(text: &str) -> Self {
        let segments = text
            .split('.')
            .filter(|part| !part.is_empty())
            .map(|part| match part.parse::<usize>() {
                Ok(index) => Segment::Index(index),
                Err(_) => Segment::Key(part.to_string()),
            })
            .collect();
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        self.child(Segment::Index(index))
    }

    pub fn join(&self, other: &FormPath) -> Self {
        let mut segments = self.0.clone();
        segments.extend(other.0.iter().cloned());
        Self(segments)
    }

    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    pub fn starts_with(&self, prefix: &FormPath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn strip_prefix(&self, prefix: &FormPath) -> Option<Self> {
        self.0
            .strip_prefix(prefix.0.as_slice())
            .map(|rest| Self(rest.to_vec()))
    }
}

impl fmt::Display for FormPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<&str> for FormPath {
    fn from(text: &str) -> Self {
        FormPath::parse(text)
    }
}

impl From<String> for FormPath {
    fn from(text: String) -> Self {
        FormPath::parse(&text)
    }
}

impl From<&String> for FormPath {
    fn from(text: &String) -> Self {
        FormPath::parse(text)
    }
}

impl From<usize> for FormPath {
    fn from(index: usize) -> Self {
        FormPath(vec![Segment::Index(index)])
    }
}

impl From<&FormPath> for FormPath {
    fn from(path: &FormPath) -> Self {
        path.clone()
    }
}

pub(crate) fn value_at<'a>(root: &'a Value, path: &FormPath) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.segments() {
        current = match (segment, current) {
            (Segment::Key(key), Value::Object(map)) => map.get(key)?,
            (Segment::Index(index), Value::Array(items)) => items.get(*index)?,
            _ => return None,
        };
    }
    Some(current)
}

pub(crate) fn value_at_mut<'a>(root: &'a mut Value, path: &FormPath) -> Option<&'a mut Value> {
    let mut current = root;
    for segment in path.segments() {
        current = match (segment, current) {
            (Segment::Key(key), Value::Object(map)) => map.get_mut(key)?,
            (Segment::Index(index), Value::Array(items)) => items.get_mut(*index)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Writes `value` at `path`, creating objects for keys and arrays for
/// indices along the way. Arrays are padded with nulls.
pub(crate) fn insert_at(root: &mut Value, segments: &[Segment], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *root = value;
        return;
    };

    match head {
        Segment::Key(key) => {
            if !root.is_object() {
                *root = Value::Object(Map::new());
            }
            if let Value::Object(map) = root {
                let entry = map.entry(key.clone()).or_insert(Value::Null);
                insert_at(entry, rest, value);
            }
        }
        Segment::Index(index) => {
            if !root.is_array() {
                *root = Value::Array(Vec::new());
            }
            if let Value::Array(items) = root {
                if items.len() <= *index {
                    items.resize(*index + 1, Value::Null);
                }
                insert_at(&mut items[*index], rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_and_display() {
        let path = FormPath::parse("return_items.items.0.quantity");
        assert_eq!(path.len(), 4);
        assert_eq!(path.segments()[2], Segment::Index(0));
        assert_eq!(path.to_string(), "return_items.items.0.quantity");
        assert!(FormPath::parse("").is_root());
    }

    #[test]
    fn test_join_and_strip_prefix() {
        let prefix = FormPath::parse("return_items");
        let full = prefix.join(&FormPath::parse("items.1.note"));
        assert_eq!(full.to_string(), "return_items.items.1.note");
        assert!(full.starts_with(&prefix));
        assert_eq!(full.strip_prefix(&prefix).unwrap().to_string(), "items.1.note");
        assert!(full.strip_prefix(&FormPath::parse("notification")).is_none());
    }

    #[test]
    fn test_insert_creates_containers() {
        let mut root = Value::Null;
        insert_at(&mut root, FormPath::parse("items.2.quantity").segments(), json!(3));
        assert_eq!(root, json!({ "items": [null, null, { "quantity": 3 }] }));
        assert_eq!(value_at(&root, &FormPath::parse("items.2.quantity")), Some(&json!(3)));
        assert_eq!(value_at(&root, &FormPath::parse("items.5")), None);
    }
}
