//! Condition trees: a rule's left-hand side.
//!
//! A `ConditionNode` tree combines pattern leaves under AND/OR/NOT.
//! Trees are built once when a rule is compiled, owned top-down, and
//! never mutated afterwards. Evaluation is a pure depth-first walk
//! over the tree against a read-only fact slice; the only state it
//! threads is the binding environment and the match trace.

use formic_core::Fact;

use crate::bindings::Bindings;
use crate::pattern::Pattern;
use crate::provenance::MatchTrace;

/// One node of a rule's condition tree.
///
/// `Not` holds exactly one child by construction; malformed arities
/// are only expressible through the JSON compile path, which rejects
/// them at build time.
#[derive(Debug, Clone)]
pub enum ConditionNode {
    And(Vec<ConditionNode>),
    Or(Vec<ConditionNode>),
    Not(Box<ConditionNode>),
    Pattern(Pattern),
}

impl ConditionNode {
    pub fn and(children: Vec<ConditionNode>) -> Self {
        ConditionNode::And(children)
    }

    pub fn or(children: Vec<ConditionNode>) -> Self {
        ConditionNode::Or(children)
    }

    pub fn not(child: ConditionNode) -> Self {
        ConditionNode::Not(Box::new(child))
    }

    pub fn pattern(pattern: Pattern) -> Self {
        ConditionNode::Pattern(pattern)
    }
}

/// Evaluate a condition node against a fact slice.
///
/// Environment scoping per node type:
/// - Pattern: tries each fact in order against a copy of `env`; the
///   first match commits the copy and records the fact in the trace.
///   Existence semantics only -- later candidate facts are not
///   explored once one matches.
/// - And: children evaluate left to right against one threading
///   scratch environment, so earlier children's bindings are visible
///   to later children. Short-circuits on the first failure and
///   discards everything the earlier children bound.
/// - Or: each child gets an independent copy of the pre-node
///   environment; the first success commits, the rest are skipped.
///   Total failure leaves `env` exactly as it was.
/// - Not: the child runs against a throwaway copy; the result is
///   negated and nothing bound inside ever escapes.
pub(crate) fn eval_node(
    node: &ConditionNode,
    facts: &[Fact],
    env: &mut Bindings,
    trace: &mut MatchTrace,
) -> bool {
    match node {
        ConditionNode::Pattern(pattern) => {
            for fact in facts {
                let mut local = env.clone();
                if pattern.matches(fact, &mut local) {
                    *env = local;
                    trace.record(fact.name());
                    return true;
                }
            }
            false
        }

        ConditionNode::And(children) => {
            let mut scratch_env = env.clone();
            let mut scratch_trace = trace.clone();
            for child in children {
                if !eval_node(child, facts, &mut scratch_env, &mut scratch_trace) {
                    return false;
                }
            }
            *env = scratch_env;
            *trace = scratch_trace;
            true
        }

        ConditionNode::Or(children) => {
            for child in children {
                let mut branch_env = env.clone();
                let mut branch_trace = trace.clone();
                if eval_node(child, facts, &mut branch_env, &mut branch_trace) {
                    *env = branch_env;
                    *trace = branch_trace;
                    return true;
                }
            }
            false
        }

        ConditionNode::Not(child) => {
            let mut throwaway_env = env.clone();
            let mut throwaway_trace = MatchTrace::new();
            !eval_node(child, facts, &mut throwaway_env, &mut throwaway_trace)
        }
    }
}
