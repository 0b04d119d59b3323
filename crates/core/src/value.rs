//! Runtime value representation for working-memory facts.
//!
//! `Value` is a closed tagged union over every datum a fact can hold:
//! scalars, ordered sequences, string-keyed maps, unique sets, opaque
//! external references, and test closures. Consumers pattern-match
//! exhaustively over the known variants instead of downcasting through
//! an erased pointer type.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Errors from the checked extraction API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The value's variant does not match the requested type.
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {}, got {}", expected, got)
            }
        }
    }
}

impl std::error::Error for ValueError {}

// ──────────────────────────────────────────────
// Predicate closures
// ──────────────────────────────────────────────

/// A test closure over a value, stored inside the `Value` union.
///
/// Predicates are opaque: they are excluded from equality (two
/// `Value::Predicate`s never compare equal, not even to themselves)
/// and serialize as a placeholder string.
#[derive(Clone)]
pub struct PredicateFn(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl PredicateFn {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        PredicateFn(Arc::new(f))
    }

    /// Apply the closure to a candidate value.
    pub fn test(&self, candidate: &Value) -> bool {
        (self.0)(candidate)
    }
}

impl fmt::Debug for PredicateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PredicateFn(<closure>)")
    }
}

// ──────────────────────────────────────────────
// External references
// ──────────────────────────────────────────────

/// An opaque handle to an object owned outside the engine, tagged with
/// a caller-chosen type name.
///
/// External references have no addressable sub-structure; they compare
/// by handle identity only, never by content.
#[derive(Clone)]
pub struct ExternalRef {
    handle: Arc<dyn Any + Send + Sync>,
    type_tag: String,
}

impl ExternalRef {
    pub fn new<T: Any + Send + Sync>(object: T, type_tag: impl Into<String>) -> Self {
        ExternalRef {
            handle: Arc::new(object),
            type_tag: type_tag.into(),
        }
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Attempt to view the referenced object as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.handle.downcast_ref::<T>()
    }

    /// Identity comparison: true only when both refs point at the same
    /// underlying object.
    pub fn same_object(&self, other: &ExternalRef) -> bool {
        Arc::ptr_eq(&self.handle, &other.handle)
    }
}

impl PartialEq for ExternalRef {
    fn eq(&self, other: &Self) -> bool {
        self.same_object(other)
    }
}

impl fmt::Debug for ExternalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExternalRef(<{}>)", self.type_tag)
    }
}

// ──────────────────────────────────────────────
// Values
// ──────────────────────────────────────────────

/// The closed union of fact payload shapes.
///
/// Equality is structural for the data variants, identity for `Ref`,
/// and always false for `Predicate`. There is no implicit coercion
/// between variants: `Int(2)` never equals `Float(2.0)`.
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    /// Ordered list of values.
    Sequence(Vec<Value>),
    /// String-keyed mapping; key order is irrelevant to equality.
    Map(BTreeMap<String, Value>),
    /// Unique collection in insertion order. Build via [`Value::set`]
    /// to get deduplication; iteration order is deterministic per
    /// construction but carries no semantic meaning.
    Set(Vec<Value>),
    Ref(ExternalRef),
    Predicate(PredicateFn),
}

impl Value {
    /// Build a `Set`, dropping structural duplicates while keeping
    /// first-occurrence order.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Value {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Value::Set(unique)
    }

    /// Returns a human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Bool(_) => "Bool",
            Value::Text(_) => "Text",
            Value::Sequence(_) => "Sequence",
            Value::Map(_) => "Map",
            Value::Set(_) => "Set",
            Value::Ref(_) => "Ref",
            Value::Predicate(_) => "Predicate",
        }
    }

    pub fn as_int(&self) -> Result<i64, ValueError> {
        match self {
            Value::Int(i) => Ok(*i),
            other => Err(ValueError::TypeMismatch {
                expected: "Int",
                got: other.type_name(),
            }),
        }
    }

    pub fn as_float(&self) -> Result<f64, ValueError> {
        match self {
            Value::Float(x) => Ok(*x),
            other => Err(ValueError::TypeMismatch {
                expected: "Float",
                got: other.type_name(),
            }),
        }
    }

    pub fn as_bool(&self) -> Result<bool, ValueError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(ValueError::TypeMismatch {
                expected: "Bool",
                got: other.type_name(),
            }),
        }
    }

    pub fn as_text(&self) -> Result<&str, ValueError> {
        match self {
            Value::Text(s) => Ok(s),
            other => Err(ValueError::TypeMismatch {
                expected: "Text",
                got: other.type_name(),
            }),
        }
    }

    pub fn as_sequence(&self) -> Result<&[Value], ValueError> {
        match self {
            Value::Sequence(items) => Ok(items),
            other => Err(ValueError::TypeMismatch {
                expected: "Sequence",
                got: other.type_name(),
            }),
        }
    }

    pub fn as_map(&self) -> Result<&BTreeMap<String, Value>, ValueError> {
        match self {
            Value::Map(entries) => Ok(entries),
            other => Err(ValueError::TypeMismatch {
                expected: "Map",
                got: other.type_name(),
            }),
        }
    }

    /// Convert a JSON value into a `Value` for rule-compilation
    /// tooling. Integral numbers become `Int`, other numbers `Float`,
    /// arrays `Sequence`, objects `Map`. Returns `None` for `null`
    /// anywhere in the input: the model has no null.
    pub fn from_json(json: &serde_json::Value) -> Option<Value> {
        match json {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Value::Int(i))
                } else {
                    n.as_f64().map(Value::Float)
                }
            }
            serde_json::Value::String(s) => Some(Value::Text(s.clone())),
            serde_json::Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(Value::from_json(item)?);
                }
                Some(Value::Sequence(out))
            }
            serde_json::Value::Object(entries) => {
                let mut out = BTreeMap::new();
                for (key, item) in entries {
                    out.insert(key.clone(), Value::from_json(item)?);
                }
                Some(Value::Map(out))
            }
        }
    }
}

/// Order-insensitive set comparison. Both sides are expected to be
/// deduplicated (see [`Value::set`]).
fn set_eq(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len()
        && a.iter().all(|x| b.contains(x))
        && b.iter().all(|x| a.contains(x))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => set_eq(a, b),
            (Value::Ref(a), Value::Ref(b)) => a == b,
            // Predicates are never equal, and no cross-variant pair is.
            _ => false,
        }
    }
}

// ──────────────────────────────────────────────
// Serialization (report output only)
// ──────────────────────────────────────────────

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};
        match self {
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Sequence(items) | Value::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, item) in entries {
                    map.serialize_entry(key, item)?;
                }
                map.end()
            }
            Value::Ref(r) => serializer.serialize_str(&format!("<ref:{}>", r.type_tag())),
            Value::Predicate(_) => serializer.serialize_str("<predicate>"),
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
