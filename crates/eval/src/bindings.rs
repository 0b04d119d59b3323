//! Binding environments for pattern variables.
//!
//! A `Bindings` maps variable names to the values they matched.
//! Branch-scoped semantics are built on `Clone`: OR alternatives and
//! NOT subtrees each evaluate against an independent copy seeded from
//! the parent environment, and only a copy the parent commits to is
//! merged back via `absorb`.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use formic_core::Value;

/// Mapping from variable name to bound value.
///
/// Once a variable is bound within a branch it stays bound to that
/// value for the remainder of the branch: `bind` never overwrites.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Bindings(BTreeMap<String, Value>);

impl Bindings {
    pub fn new() -> Self {
        Bindings(BTreeMap::new())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Bind `name` to `value` unless it is already bound. Returns the
    /// value now associated with `name`.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) -> &Value {
        match self.0.entry(name.into()) {
            Entry::Vacant(slot) => slot.insert(value),
            Entry::Occupied(slot) => slot.into_mut(),
        }
    }

    /// Commit a child scope into this environment. Bindings already
    /// present here win; the child only contributes new variables.
    pub fn absorb(&mut self, child: Bindings) {
        for (name, value) in child.0 {
            self.0.entry(name).or_insert(value);
        }
    }

    /// JSON view of the bindings, for the rule-firing engine's
    /// reporting. Opaque values render as placeholder strings.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
