//! End-to-end scenarios through the public `evaluate` entry point.

use formic_core::{Fact, Value};
use formic_eval::{evaluate, Bindings, ConditionNode, Constraint, MatchTrace, Pattern};

fn temp_fact(reading: f64) -> Fact {
    Fact::new("temp", Value::Sequence(vec![Value::Float(reading)]))
}

fn over_90_pattern() -> ConditionNode {
    ConditionNode::pattern(Pattern::with_constraints(
        "temp",
        vec![Constraint::satisfies(|v| matches!(v, Value::Float(x) if *x > 90.0)).bind("t")],
    ))
}

#[test]
fn hot_reading_matches_and_binds() {
    let result = evaluate(&over_90_pattern(), &[temp_fact(95.0)]);
    assert!(result.matched);
    assert_eq!(result.bindings.get("t"), Some(&Value::Float(95.0)));
}

#[test]
fn cool_reading_fails_with_empty_bindings() {
    let result = evaluate(&over_90_pattern(), &[temp_fact(50.0)]);
    assert!(!result.matched);
    assert!(result.bindings.is_empty());
    assert!(result.trace.facts_matched.is_empty());
}

#[test]
fn evaluation_is_idempotent() {
    let tree = ConditionNode::and(vec![
        over_90_pattern(),
        ConditionNode::not(ConditionNode::pattern(Pattern::new("alarm"))),
    ]);
    let facts = vec![temp_fact(95.0), Fact::new("pressure", Value::Int(3))];

    let first = evaluate(&tree, &facts);
    let second = evaluate(&tree, &facts);
    assert_eq!(first.matched, second.matched);
    assert_eq!(first.bindings, second.bindings);
    assert_eq!(first.trace, second.trace);
}

#[test]
fn and_identity() {
    let result = evaluate(&ConditionNode::and(vec![]), &[]);
    assert!(result.matched);
    assert_eq!(result.bindings, Bindings::new());
}

#[test]
fn or_identity() {
    let result = evaluate(&ConditionNode::or(vec![]), &[temp_fact(95.0)]);
    assert!(!result.matched);
    assert_eq!(result.bindings, Bindings::new());
}

#[test]
fn not_involution_on_pattern_result() {
    let facts = vec![temp_fact(95.0)];
    let plain = evaluate(&over_90_pattern(), &facts);
    let doubled = evaluate(
        &ConditionNode::not(ConditionNode::not(over_90_pattern())),
        &facts,
    );
    assert_eq!(plain.matched, doubled.matched);
    // NOT never exports bindings either way.
    assert!(doubled.bindings.is_empty());

    let cool = vec![temp_fact(50.0)];
    let plain = evaluate(&over_90_pattern(), &cool);
    let doubled = evaluate(
        &ConditionNode::not(ConditionNode::not(over_90_pattern())),
        &cool,
    );
    assert_eq!(plain.matched, doubled.matched);
}

#[test]
fn negated_constraint_binds_exactly_when_raw_test_fails() {
    let tree = ConditionNode::pattern(Pattern::with_constraints(
        "nums",
        vec![Constraint::equals(Value::Int(7)).negated().bind("x")],
    ));

    // All elements equal 7: raw test passes everywhere, negated
    // constraint finds nothing, variable stays unbound.
    let all_sevens = vec![Fact::new(
        "nums",
        Value::Sequence(vec![Value::Int(7), Value::Int(7)]),
    )];
    let result = evaluate(&tree, &all_sevens);
    assert!(!result.matched);
    assert_eq!(result.bindings.get("x"), None);

    // One element fails the raw test: that element is bound.
    let mixed = vec![Fact::new(
        "nums",
        Value::Sequence(vec![Value::Int(7), Value::Int(3)]),
    )];
    let result = evaluate(&tree, &mixed);
    assert!(result.matched);
    assert_eq!(result.bindings.get("x"), Some(&Value::Int(3)));
}

#[test]
fn sequence_element_match_binds_element() {
    let tree = ConditionNode::pattern(Pattern::with_constraints(
        "nums",
        vec![Constraint::equals(Value::Int(2)).bind("x")],
    ));
    let facts = vec![Fact::new(
        "nums",
        Value::Sequence(vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
    )];
    let result = evaluate(&tree, &facts);
    assert!(result.matched);
    assert_eq!(result.bindings.get("x"), Some(&Value::Int(2)));
}

#[test]
fn map_attribute_miss_fails() {
    let mut entries = std::collections::BTreeMap::new();
    entries.insert("a".to_string(), Value::Int(1));
    let facts = vec![Fact::new("cfg", Value::Map(entries))];

    let tree = ConditionNode::pattern(Pattern::with_constraints(
        "cfg",
        vec![Constraint::equals(Value::Int(1)).on("b")],
    ));
    assert!(!evaluate(&tree, &facts).matched);

    // Negation does not rescue an absent key.
    let negated = ConditionNode::pattern(Pattern::with_constraints(
        "cfg",
        vec![Constraint::equals(Value::Int(1)).on("b").negated()],
    ));
    assert!(!evaluate(&negated, &facts).matched);
}

#[test]
fn or_total_failure_leaves_no_partial_bindings() {
    let facts = vec![temp_fact(50.0)];
    let tree = ConditionNode::or(vec![
        over_90_pattern(),
        ConditionNode::pattern(Pattern::with_constraints(
            "temp",
            vec![Constraint::equals(Value::Float(60.0)).bind("u")],
        )),
    ]);
    let result = evaluate(&tree, &facts);
    assert!(!result.matched);
    assert_eq!(result.bindings, Bindings::new());
}

#[test]
fn or_commits_only_the_winning_branch() {
    let facts = vec![temp_fact(95.0)];
    let tree = ConditionNode::or(vec![
        ConditionNode::pattern(Pattern::with_constraints(
            "temp",
            vec![Constraint::equals(Value::Float(60.0)).bind("losing")],
        )),
        over_90_pattern(),
    ]);
    let result = evaluate(&tree, &facts);
    assert!(result.matched);
    assert_eq!(result.bindings.get("losing"), None);
    assert_eq!(result.bindings.get("t"), Some(&Value::Float(95.0)));
}

#[test]
fn and_joins_across_facts() {
    // Two patterns over two different facts, both binding variables
    // into the same threading environment.
    let facts = vec![
        temp_fact(95.0),
        Fact::new("unit", Value::Text("boiler-3".to_string())),
    ];
    let tree = ConditionNode::and(vec![
        over_90_pattern(),
        ConditionNode::pattern(Pattern::with_constraints(
            "unit",
            vec![
                Constraint::satisfies(|v| matches!(v, Value::Text(_))).bind("which"),
            ],
        )),
    ]);
    let result = evaluate(&tree, &facts);
    assert!(result.matched);
    assert_eq!(result.bindings.get("t"), Some(&Value::Float(95.0)));
    assert_eq!(
        result.bindings.get("which"),
        Some(&Value::Text("boiler-3".to_string()))
    );
    assert_eq!(result.trace.facts_matched, vec!["temp", "unit"]);
}

#[test]
fn trace_records_committed_leaves_in_order() {
    let facts = vec![
        Fact::new("a", Value::Bool(true)),
        Fact::new("b", Value::Bool(true)),
    ];
    let tree = ConditionNode::and(vec![
        ConditionNode::pattern(Pattern::new("b")),
        ConditionNode::pattern(Pattern::new("a")),
        // NOT subtree matches nothing and must not be traced.
        ConditionNode::not(ConditionNode::pattern(Pattern::new("missing"))),
    ]);
    let result = evaluate(&tree, &facts);
    assert!(result.matched);
    let mut expected = MatchTrace::new();
    expected.record("b");
    expected.record("a");
    assert_eq!(result.trace, expected);
}

#[test]
fn compiled_and_typed_trees_agree() {
    let json = serde_json::json!({
        "kind": "or",
        "children": [
            { "kind": "pattern", "fact": "cfg",
              "constraints": [ { "equals": "on", "attribute": "mode", "bind": "m" } ] },
            { "kind": "pattern", "fact": "override" }
        ]
    });
    let compiled = formic_eval::compile_condition(&json).unwrap();

    let typed = ConditionNode::or(vec![
        ConditionNode::pattern(Pattern::with_constraints(
            "cfg",
            vec![Constraint::equals(Value::Text("on".to_string()))
                .on("mode")
                .bind("m")],
        )),
        ConditionNode::pattern(Pattern::new("override")),
    ]);

    let mut entries = std::collections::BTreeMap::new();
    entries.insert("mode".to_string(), Value::Text("on".to_string()));
    let facts = vec![Fact::new("cfg", Value::Map(entries))];

    let a = evaluate(&compiled, &facts);
    let b = evaluate(&typed, &facts);
    assert_eq!(a.matched, b.matched);
    assert_eq!(a.bindings, b.bindings);
    assert_eq!(
        a.bindings.get("m"),
        Some(&Value::Text("on".to_string()))
    );
}
