//! Pattern matching against single facts.
//!
//! A `Pattern` selects facts by name and applies a conjunction of
//! constraints to the payload. Matching never errors: any
//! unmatchable case (missing map key, unsupported attribute access,
//! variant mismatch) resolves to "constraint not satisfied" and the
//! pattern as a whole to false.

use formic_core::{Fact, Value};

use crate::bindings::Bindings;
use crate::constraint::Constraint;

/// A fact-name selector plus an ordered list of constraints,
/// evaluated as a logical AND.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub fact_name: String,
    pub constraints: Vec<Constraint>,
}

impl Pattern {
    /// An existence pattern: matches any fact with this name.
    pub fn new(fact_name: impl Into<String>) -> Self {
        Pattern {
            fact_name: fact_name.into(),
            constraints: Vec::new(),
        }
    }

    pub fn with_constraints(
        fact_name: impl Into<String>,
        constraints: Vec<Constraint>,
    ) -> Self {
        Pattern {
            fact_name: fact_name.into(),
            constraints,
        }
    }

    /// Match this pattern against one fact, extending `env` with the
    /// constraints' bindings on success.
    ///
    /// Bindings are staged in a scratch scope and committed only if
    /// every constraint succeeds, so a failed match leaves `env`
    /// untouched.
    pub fn matches(&self, fact: &Fact, env: &mut Bindings) -> bool {
        if fact.name() != self.fact_name {
            return false;
        }
        if self.constraints.is_empty() {
            return true;
        }

        let mut scratch = env.clone();
        for constraint in &self.constraints {
            if !check_constraint(constraint, fact.payload(), &mut scratch) {
                return false;
            }
        }
        *env = scratch;
        true
    }
}

/// Apply one constraint to a payload, binding into `env` on success.
///
/// Dispatch follows the payload shape:
/// - Sequence/Set: existential scan over elements; the constraint
///   succeeds if any element passes, binding the first that does.
///   Elements stay candidates for later constraints (independent
///   existential checks, not a one-to-one assignment). Attribute
///   constraints have no meaning here and fail closed.
/// - Map: the attribute is looked up as a key; an absent key fails the
///   constraint regardless of negation. Attribute-less constraints
///   test the map value as a whole.
/// - Ref and scalars: whole-payload test only; attribute constraints
///   fail closed (a ref has no addressable sub-structure).
fn check_constraint(constraint: &Constraint, payload: &Value, env: &mut Bindings) -> bool {
    match payload {
        Value::Sequence(items) | Value::Set(items) => {
            if constraint.attribute.is_some() {
                return false;
            }
            for item in items {
                if constraint.satisfied_by(item) {
                    if let Some(var) = &constraint.bind_as {
                        env.bind(var.clone(), item.clone());
                    }
                    return true;
                }
            }
            false
        }
        Value::Map(entries) => match &constraint.attribute {
            Some(key) => match entries.get(key) {
                Some(slot) if constraint.satisfied_by(slot) => {
                    if let Some(var) = &constraint.bind_as {
                        env.bind(var.clone(), slot.clone());
                    }
                    true
                }
                _ => false,
            },
            None => check_whole_payload(constraint, payload, env),
        },
        _ => {
            if constraint.attribute.is_some() {
                return false;
            }
            check_whole_payload(constraint, payload, env)
        }
    }
}

fn check_whole_payload(constraint: &Constraint, payload: &Value, env: &mut Bindings) -> bool {
    if constraint.satisfied_by(payload) {
        if let Some(var) = &constraint.bind_as {
            env.bind(var.clone(), payload.clone());
        }
        true
    } else {
        false
    }
}
