//! The nested value that all editing operates on.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::sync::Arc;

/// Elements of a sequence.
pub type Sequence = Vec<Document>;

/// Entries of a mapping, in insertion order.
pub type Mapping = IndexMap<String, Document>;

/// A JSON-compatible nested value with shared container storage.
///
/// Containers sit behind an [`Arc`], so cloning a document is cheap and two
/// documents may share any number of subtrees. Editing operations never
/// write into shared storage; they copy the containers they change and keep
/// pointers to the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Document {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Arc<Sequence>),
    Object(Arc<Mapping>),
}

/// The variant of a [`Document`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Document {
    /// An empty mapping.
    pub fn empty_object() -> Self {
        Document::Object(Arc::default())
    }

    /// An empty sequence.
    pub fn empty_array() -> Self {
        Document::Array(Arc::default())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Document::Null => Kind::Null,
            Document::Bool(_) => Kind::Bool,
            Document::Number(_) => Kind::Number,
            Document::String(_) => Kind::String,
            Document::Array(_) => Kind::Array,
            Document::Object(_) => Kind::Object,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Document::Array(_))
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Document::Object(_))
    }

    pub fn as_array(&self) -> Option<&[Document]> {
        match self {
            Document::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Mapping> {
        match self {
            Document::Object(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Document::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Document::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Returns true when both documents are containers backed by the same
    /// allocation. Scalars never share storage.
    pub fn ptr_eq(&self, other: &Document) -> bool {
        match (self, other) {
            (Document::Array(a), Document::Array(b)) => Arc::ptr_eq(a, b),
            (Document::Object(a), Document::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::from(self.clone()))
    }
}

// ── Conversions ───────────────────────────────────────────────────────────

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Document::Null,
            Value::Bool(b) => Document::Bool(b),
            Value::Number(n) => Document::Number(n),
            Value::String(s) => Document::String(s),
            Value::Array(items) => {
                Document::Array(Arc::new(items.into_iter().map(Document::from).collect()))
            }
            Value::Object(map) => Document::Object(Arc::new(
                map.into_iter().map(|(k, v)| (k, Document::from(v))).collect(),
            )),
        }
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        match doc {
            Document::Null => Value::Null,
            Document::Bool(b) => Value::Bool(b),
            Document::Number(n) => Value::Number(n),
            Document::String(s) => Value::String(s),
            Document::Array(items) => {
                let items = Arc::try_unwrap(items).unwrap_or_else(|shared| (*shared).clone());
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            Document::Object(entries) => {
                let entries = Arc::try_unwrap(entries).unwrap_or_else(|shared| (*shared).clone());
                Value::Object(entries.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Document {
    fn from(b: bool) -> Self {
        Document::Bool(b)
    }
}

impl From<i32> for Document {
    fn from(n: i32) -> Self {
        Document::Number(n.into())
    }
}

impl From<i64> for Document {
    fn from(n: i64) -> Self {
        Document::Number(n.into())
    }
}

impl From<u64> for Document {
    fn from(n: u64) -> Self {
        Document::Number(n.into())
    }
}

/// Non-finite floats have no JSON form and become `Null`.
impl From<f64> for Document {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Document::Null, Document::Number)
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Document::String(s.to_owned())
    }
}

impl From<String> for Document {
    fn from(s: String) -> Self {
        Document::String(s)
    }
}

impl From<Sequence> for Document {
    fn from(items: Sequence) -> Self {
        Document::Array(Arc::new(items))
    }
}

impl From<Mapping> for Document {
    fn from(entries: Mapping) -> Self {
        Document::Object(Arc::new(entries))
    }
}

impl FromIterator<Document> for Document {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Document::Array(Arc::new(iter.into_iter().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_roundtrip_keeps_key_order() {
        let value = json!({"zeta": 1, "alpha": [true, null, "x"], "mid": {"b": 2, "a": 1}});
        let doc = Document::from(value.clone());
        assert_eq!(Value::from(doc.clone()), value);
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"zeta":1,"alpha":[true,null,"x"],"mid":{"b":2,"a":1}}"#
        );
    }

    #[test]
    fn test_deserialize() {
        let doc: Document = serde_json::from_str(r#"{"a": [1, 2]}"#).unwrap();
        let items = doc.as_object().unwrap()["a"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].as_i64(), Some(2));
    }

    #[test]
    fn test_kind() {
        assert_eq!(Document::Null.kind(), Kind::Null);
        assert_eq!(Document::from(true).kind(), Kind::Bool);
        assert_eq!(Document::from(1).kind(), Kind::Number);
        assert_eq!(Document::from("s").kind(), Kind::String);
        assert_eq!(Document::empty_array().kind(), Kind::Array);
        assert_eq!(Document::empty_object().kind(), Kind::Object);
        assert_eq!(Kind::Object.to_string(), "object");
    }

    #[test]
    fn test_clone_shares_containers() {
        let doc = Document::from(json!({"a": {"b": 1}}));
        let copy = doc.clone();
        assert!(doc.ptr_eq(&copy));
        assert!(!Document::from(1).ptr_eq(&Document::from(1)));
        assert!(!doc.ptr_eq(&Document::from(json!({"a": {"b": 1}}))));
    }

    #[test]
    fn test_into_value_does_not_disturb_shared_copy() {
        let doc = Document::from(json!({"a": [1, 2]}));
        let keep = doc.clone();
        let value = Value::from(doc);
        assert_eq!(value, json!({"a": [1, 2]}));
        assert_eq!(Value::from(keep), json!({"a": [1, 2]}));
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert!(Document::from(f64::NAN).is_null());
        assert_eq!(Document::from(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_collect_into_array() {
        let doc: Document = ["a", "b"].into_iter().map(Document::from).collect();
        assert_eq!(doc.to_string(), r#"["a","b"]"#);
    }
}
