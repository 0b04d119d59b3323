//! Named working-memory facts.
//!
//! A `Fact` pairs a name with one `Value` payload. Facts are created
//! by the working-memory collaborator, handed to the engine by
//! reference for the span of one evaluation pass, and never mutated
//! or retained by the engine.

use crate::value::Value;

/// A named unit of working-memory data.
#[derive(Debug, Clone)]
pub struct Fact {
    name: String,
    payload: Value,
}

impl Fact {
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Fact {
            name: name.into(),
            payload,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Name-only comparison, for contexts where the payload shape is
    /// not known to the caller. Intentionally looser than `==`: two
    /// facts with the same name and different payloads are
    /// `same_name` but not equal.
    pub fn same_name(&self, other: &Fact) -> bool {
        self.name == other.name
    }
}

/// Full structural comparison: name and payload.
impl PartialEq for Fact {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.payload == other.payload
    }
}
