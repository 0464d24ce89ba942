//! Query keys.
//!
//! A key is an ordered tuple of JSON values, usually a resource name
//! followed by a params object: `["students", {"page": 1, "limit": 10}]`.
//! Objects are canonicalised on construction (members sorted, `null`
//! members dropped) so two keys built from the same params in a different
//! order are the same key.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Clone, PartialEq, Eq)]
pub struct QueryKey(Vec<Value>);

impl QueryKey {
    /// Key with a single root segment.
    pub fn new(root: impl Into<String>) -> Self {
        Self(vec![Value::String(root.into())])
    }

    /// Appends a segment.
    pub fn with(mut self, part: impl Into<Value>) -> Self {
        self.0.push(canonicalize(part.into()));
        self
    }

    pub fn parts(&self) -> &[Value] {
        &self.0
    }

    /// The first segment when it is a string.
    pub fn root(&self) -> &str {
        self.0.first().and_then(Value::as_str).unwrap_or_default()
    }

    /// Prefix match used by invalidation: `["students"]` matches every
    /// students key regardless of params.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0.iter().zip(&prefix.0).all(|(a, b)| a == b)
    }

    /// Decodes the last object segment (the params) into `T`.
    ///
    /// Missing params decode from an empty object so all-optional param
    /// structs still work.
    pub fn params<T: DeserializeOwned>(&self) -> Option<T> {
        let params = self
            .0
            .iter()
            .rev()
            .find(|p| p.is_object())
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        serde_json::from_value(params).ok()
    }

    /// The segment at `index` as a string, for id segments.
    pub fn segment_str(&self, index: usize) -> Option<String> {
        match self.0.get(index)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut members: Vec<(String, Value)> = map
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, canonicalize(v)))
                .collect();
            members.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(members.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

impl Hash for QueryKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Members are sorted at construction, so the serialized form is stable.
        for part in &self.0 {
            part.to_string().hash(state);
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Array(self.0.clone()))
    }
}

impl fmt::Debug for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueryKey({self})")
    }
}

impl From<&str> for QueryKey {
    fn from(root: &str) -> Self {
        Self::new(root)
    }
}
