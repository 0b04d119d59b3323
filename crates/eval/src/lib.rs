//! Formic condition evaluator -- matches condition trees against a
//! working set of facts, producing a boolean outcome plus the
//! variable bindings the match established.
//!
//! The evaluator is the condition-evaluation core of a
//! forward-inference rule engine: the rule-firing engine picks which
//! rule's tree to evaluate (agenda, conflict resolution) and runs
//! right-hand-side actions with the returned bindings; working memory
//! owns the fact set and hands it in as a read-only slice. This crate
//! does neither -- it only answers "does this left-hand side hold,
//! and what matched".
//!
//! Evaluation is synchronous, pure over its inputs, and never panics
//! or errors: matching-time misses (type mismatches, absent map keys,
//! unmatched patterns) are ordinary `false` outcomes. Malformed trees
//! are rejected at build time by the `compile` module instead.

pub mod bindings;
pub mod compile;
pub mod condition;
pub mod constraint;
pub mod pattern;
pub mod provenance;

pub use bindings::Bindings;
pub use compile::{compile_condition, compile_constraint, compile_pattern, BuildError};
pub use condition::ConditionNode;
pub use constraint::{Constraint, ConstraintTest};
pub use pattern::Pattern;
pub use provenance::MatchTrace;

use formic_core::Fact;

/// Result of evaluating a condition tree against a fact set.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Evaluation {
    /// Whether the tree's root held.
    pub matched: bool,
    /// Bindings committed by the match. Empty when `matched` is
    /// false.
    pub bindings: Bindings,
    /// Names of the facts committed pattern leaves matched.
    pub trace: MatchTrace,
}

impl Evaluation {
    /// JSON view for the rule-firing engine's reporting.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Evaluate a condition tree against a read-only fact slice.
///
/// This is the sole entry point for the rule-firing engine. The
/// evaluation seeds an empty binding environment, walks the tree
/// depth-first with the per-node scoping rules documented in the
/// `condition` module, and returns the outcome together with the
/// committed bindings and match trace.
pub fn evaluate(root: &ConditionNode, facts: &[Fact]) -> Evaluation {
    let mut env = Bindings::new();
    let mut trace = MatchTrace::new();
    let matched = condition::eval_node(root, facts, &mut env, &mut trace);
    Evaluation {
        matched,
        bindings: env,
        trace,
    }
}

// ──────────────────────────────────────────────
// Integration tests
// ──────────────────────────────────────────────
