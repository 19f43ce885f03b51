//! Permissive value type for emitted payloads
//!
//! Anything handed to an emit call becomes a [`Value`]. Strings go through
//! the logger verbatim; everything else is rendered by the active
//! transformer. [`SharedValue`] nodes can alias each other and may form
//! cycles, which the text path renders as `[Circular]` and the JSON path
//! rejects.

use super::error::{LoggerError, Result};
use parking_lot::{RwLock, RwLockReadGuard};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    /// Key/value record, insertion ordered.
    Map(Vec<(String, Value)>),
    Error {
        message: String,
        stack: Option<String>,
    },
    /// A callable, by name when it has one.
    Function(Option<String>),
    /// Anything else, known only by its type name.
    Opaque(String),
    Shared(SharedValue),
}

/// Reference-counted value node that can be linked into graphs.
#[derive(Clone)]
pub struct SharedValue(Arc<RwLock<Value>>);

impl SharedValue {
    pub fn new(value: impl Into<Value>) -> Self {
        SharedValue(Arc::new(RwLock::new(value.into())))
    }

    /// Replace the node's contents; used to close cycles.
    pub fn set(&self, value: impl Into<Value>) {
        *self.0.write() = value.into();
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Value> {
        self.0.read()
    }

    /// Identity of the node, stable for its lifetime.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    /// String held by this node or by the nodes it points to.
    fn text(&self, seen: &mut Vec<usize>) -> Option<String> {
        if seen.contains(&self.id()) {
            return None;
        }
        seen.push(self.id());
        match &*self.read() {
            Value::String(s) => Some(s.clone()),
            Value::Shared(next) => next.text(seen),
            _ => None,
        }
    }
}

impl PartialEq for SharedValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shared({:#x})", self.id())
    }
}

impl Value {
    pub fn map<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn array<V: Into<Value>, I: IntoIterator<Item = V>>(items: I) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn error(message: impl Into<String>, stack: Option<String>) -> Self {
        Value::Error {
            message: message.into(),
            stack,
        }
    }

    /// Error value from a Rust error: the display text becomes the message
    /// and the `source()` chain becomes the stack.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(format!("Caused by: {}", cause));
            source = cause.source();
        }
        Value::Error {
            message: err.to_string(),
            stack: (!causes.is_empty()).then(|| causes.join("\n")),
        }
    }

    pub fn function(name: Option<&str>) -> Self {
        Value::Function(name.map(str::to_string))
    }

    pub fn opaque(type_name: impl Into<String>) -> Self {
        Value::Opaque(type_name.into())
    }

    pub fn shared(value: impl Into<Value>) -> Self {
        Value::Shared(SharedValue::new(value))
    }

    /// True for strings, including strings behind shared nodes.
    pub fn is_string(&self) -> bool {
        self.as_str().is_some()
    }

    /// String content, looking through shared nodes.
    pub fn as_str(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Shared(node) => node.text(&mut Vec::new()).map(Cow::Owned),
            _ => None,
        }
    }

    /// Owned string content, or the value itself when it is not a string.
    pub fn into_text(self) -> std::result::Result<String, Value> {
        match self {
            Value::String(s) => Ok(s),
            other => {
                let text = other.as_str().map(Cow::into_owned);
                text.ok_or(other)
            }
        }
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// `(message, stack)` when the value looks like an error.
    pub fn as_error_parts(&self) -> Option<(String, Option<String>)> {
        match self {
            Value::Error { message, stack } => Some((message.clone(), stack.clone())),
            Value::Shared(node) => node.read().as_error_parts(),
            _ => None,
        }
    }

    /// Lowercase type label.
    pub fn type_name(&self) -> String {
        match self {
            Value::Undefined => "undefined".into(),
            Value::Null => "null".into(),
            Value::Bool(_) => "boolean".into(),
            Value::Int(_) | Value::Float(_) => "number".into(),
            Value::String(_) => "string".into(),
            Value::Array(_) => "array".into(),
            Value::Map(_) => "object".into(),
            Value::Error { .. } => "error".into(),
            Value::Function(_) => "function".into(),
            Value::Opaque(name) => name.to_lowercase(),
            Value::Shared(_) => "object".into(),
        }
    }

    /// Convert to JSON, failing on cycles.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let mut ancestors = Vec::new();
        self.to_json_at(&mut ancestors, "$")
    }

    fn to_json_at(&self, ancestors: &mut Vec<usize>, path: &str) -> Result<serde_json::Value> {
        use serde_json::Value as Json;

        let json = match self {
            Value::Undefined | Value::Null | Value::Function(_) => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f).map_or(Json::Null, Json::Number),
            Value::String(s) => Json::String(s.clone()),
            Value::Opaque(name) => Json::String(name.clone()),
            Value::Array(items) => Json::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| item.to_json_at(ancestors, &format!("{}[{}]", path, i)))
                    .collect::<Result<_>>()?,
            ),
            Value::Map(pairs) => {
                let mut object = serde_json::Map::new();
                for (key, value) in pairs {
                    let child = value.to_json_at(ancestors, &format!("{}.{}", path, key))?;
                    object.insert(key.clone(), child);
                }
                Json::Object(object)
            }
            Value::Error { message, stack } => {
                let mut object = serde_json::Map::new();
                object.insert("message".into(), Json::String(message.clone()));
                if let Some(stack) = stack {
                    object.insert("stack".into(), Json::String(stack.clone()));
                }
                Json::Object(object)
            }
            Value::Shared(node) => {
                let id = node.id();
                if ancestors.contains(&id) {
                    return Err(LoggerError::circular(path));
                }
                ancestors.push(id);
                let result = node.read().to_json_at(ancestors, path);
                ancestors.pop();
                result?
            }
        };
        Ok(json)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(object) => {
                Value::Map(object.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(i: $ty) -> Self {
                    Value::Int(i64::from(i))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        i64::try_from(u).map_or(Value::Float(u as f64), Value::Int)
    }
}

impl From<usize> for Value {
    fn from(u: usize) -> Self {
        Value::from(u as u64)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::array(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<SharedValue> for Value {
    fn from(node: SharedValue) -> Self {
        Value::Shared(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Refused;

    #[derive(Debug, thiserror::Error)]
    #[error("request failed")]
    struct RequestFailed {
        #[source]
        cause: Refused,
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from("a"), Value::String("a".into()));
        assert_eq!(Value::from(42u8), Value::Int(42));
        assert_eq!(Value::from(u64::MAX), Value::Float(u64::MAX as f64));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::Array(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn test_from_json_keeps_structure() {
        let json = serde_json::json!({"a": [1, 2.5, null], "b": {"c": true}});
        let value = Value::from(json.clone());
        assert!(matches!(value, Value::Map(_)));
        assert_eq!(value.to_json().unwrap(), json);
    }

    #[test]
    fn test_from_error_collects_sources() {
        let err = RequestFailed { cause: Refused };
        let value = Value::from_error(&err);
        assert_eq!(
            value,
            Value::error("request failed", Some("Caused by: connection refused".into()))
        );

        let value = Value::from_error(&Refused);
        assert_eq!(value, Value::error("connection refused", None));
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Undefined.type_name(), "undefined");
        assert_eq!(Value::from(1.5).type_name(), "number");
        assert_eq!(Value::opaque("Symbol").type_name(), "symbol");
        assert_eq!(Value::map([("a", 1)]).type_name(), "object");
    }

    #[test]
    fn test_to_json_detects_cycle() {
        let node = SharedValue::new(Value::Null);
        node.set(Value::map([("self", Value::Shared(node.clone()))]));

        let err = Value::Shared(node.clone()).to_json().unwrap_err();
        assert!(matches!(err, LoggerError::CircularStructure { .. }));
        assert_eq!(err.to_string(), "Converting circular structure to JSON at '$.self'");

        // break the cycle so the Arc can be freed
        node.set(Value::Null);
    }

    #[test]
    fn test_to_json_allows_shared_siblings() {
        let leaf = SharedValue::new("leaf");
        let value = Value::map([
            ("left", Value::Shared(leaf.clone())),
            ("right", Value::Shared(leaf)),
        ]);
        let json = value.to_json().unwrap();
        assert_eq!(json["left"], "leaf");
        assert_eq!(json["right"], "leaf");
    }

    #[test]
    fn test_serialize_error_value() {
        let value = Value::error("boom", Some("at main".into()));
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"message":"boom","stack":"at main"}"#);
    }

    #[test]
    fn test_shared_eq_is_identity() {
        let a = SharedValue::new(1);
        let b = SharedValue::new(1);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_strings_behind_shared_nodes() {
        let inner = Value::shared("hi");
        assert!(inner.is_string());
        assert_eq!(inner.as_str().as_deref(), Some("hi"));
        assert_eq!(Value::Shared(SharedValue::new(inner.clone())).into_text(), Ok("hi".into()));

        assert_eq!(Value::shared(1).as_str(), None);
        assert_eq!(Value::Int(1).into_text(), Err(Value::Int(1)));

        let node = SharedValue::new(Value::Null);
        node.set(Value::Shared(node.clone()));
        assert!(!Value::Shared(node.clone()).is_string());
        node.set(Value::Null);
    }
}
