//! Condition-tree compilation from JSON.
//!
//! Rule-compilation tooling describes a left-hand side as a JSON tree
//! of node objects with a `kind` discriminator. Compilation is the
//! distinct construction-error path: malformed trees (unknown kind,
//! NOT arity, constraint without a test) are rejected here at build
//! time and can never surface during evaluation.
//!
//! Only equality tests are expressible in JSON. Predicate tests hold
//! closures and attach programmatically via the typed constructors.
//!
//! Node format:
//!
//! ```json
//! { "kind": "and", "children": [ ... ] }
//! { "kind": "or",  "children": [ ... ] }
//! { "kind": "not", "children": [ <exactly one> ] }
//! { "kind": "pattern", "fact": "nums",
//!   "constraints": [
//!     { "equals": 2, "attribute": "a", "bind": "x", "negate": true }
//!   ] }
//! ```

use formic_core::Value;

use crate::condition::ConditionNode;
use crate::constraint::{Constraint, ConstraintTest};
use crate::pattern::Pattern;

/// Errors from compiling a condition tree out of JSON.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// The node object's `kind` is not one of and/or/not/pattern.
    #[error("unknown node kind: '{kind}'")]
    UnknownNodeKind { kind: String },

    /// A NOT node must have exactly one child.
    #[error("not node must have exactly one child, got {actual}")]
    NotArity { actual: usize },

    /// A required field is absent.
    #[error("missing field '{field}'")]
    MissingField { field: &'static str },

    /// A field is present with the wrong JSON type.
    #[error("field '{field}' must be {expected}")]
    WrongFieldType {
        field: &'static str,
        expected: &'static str,
    },

    /// A constraint object carries no test.
    #[error("constraint has no test: expected an 'equals' field")]
    MissingTest,

    /// JSON null appeared in a literal position; the value model has
    /// no null.
    #[error("null is not a value")]
    NullLiteral,
}

fn get_str(obj: &serde_json::Value, field: &'static str) -> Result<String, BuildError> {
    let v = obj
        .get(field)
        .ok_or(BuildError::MissingField { field })?;
    v.as_str()
        .map(str::to_owned)
        .ok_or(BuildError::WrongFieldType {
            field,
            expected: "a string",
        })
}

fn get_children(obj: &serde_json::Value) -> Result<&Vec<serde_json::Value>, BuildError> {
    let v = obj
        .get("children")
        .ok_or(BuildError::MissingField { field: "children" })?;
    v.as_array().ok_or(BuildError::WrongFieldType {
        field: "children",
        expected: "an array",
    })
}

/// Compile a condition-tree node from JSON.
pub fn compile_condition(node: &serde_json::Value) -> Result<ConditionNode, BuildError> {
    let kind = get_str(node, "kind")?;
    match kind.as_str() {
        "and" => {
            let children = get_children(node)?;
            let compiled = children
                .iter()
                .map(compile_condition)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ConditionNode::And(compiled))
        }
        "or" => {
            let children = get_children(node)?;
            let compiled = children
                .iter()
                .map(compile_condition)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ConditionNode::Or(compiled))
        }
        "not" => {
            let children = get_children(node)?;
            if children.len() != 1 {
                return Err(BuildError::NotArity {
                    actual: children.len(),
                });
            }
            let child = compile_condition(&children[0])?;
            Ok(ConditionNode::Not(Box::new(child)))
        }
        "pattern" => Ok(ConditionNode::Pattern(compile_pattern(node)?)),
        other => Err(BuildError::UnknownNodeKind {
            kind: other.to_string(),
        }),
    }
}

/// Compile a pattern object: a `fact` name plus an optional
/// `constraints` array.
pub fn compile_pattern(node: &serde_json::Value) -> Result<Pattern, BuildError> {
    let fact_name = get_str(node, "fact")?;
    let constraints = match node.get("constraints") {
        None => Vec::new(),
        Some(list) => {
            let items = list.as_array().ok_or(BuildError::WrongFieldType {
                field: "constraints",
                expected: "an array",
            })?;
            items
                .iter()
                .map(compile_constraint)
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok(Pattern::with_constraints(fact_name, constraints))
}

/// Compile one constraint object.
pub fn compile_constraint(node: &serde_json::Value) -> Result<Constraint, BuildError> {
    let literal = node.get("equals").ok_or(BuildError::MissingTest)?;
    let value = Value::from_json(literal).ok_or(BuildError::NullLiteral)?;

    let attribute = match node.get("attribute") {
        None => None,
        Some(v) => Some(v.as_str().map(str::to_owned).ok_or(
            BuildError::WrongFieldType {
                field: "attribute",
                expected: "a string",
            },
        )?),
    };
    let bind_as = match node.get("bind") {
        None => None,
        Some(v) => Some(v.as_str().map(str::to_owned).ok_or(
            BuildError::WrongFieldType {
                field: "bind",
                expected: "a string",
            },
        )?),
    };
    let negate = match node.get("negate") {
        None => false,
        Some(v) => v.as_bool().ok_or(BuildError::WrongFieldType {
            field: "negate",
            expected: "a boolean",
        })?,
    };

    Ok(Constraint {
        attribute,
        test: ConstraintTest::Equals(value),
        bind_as,
        negate,
    })
}
