//! Match provenance: which facts a successful evaluation touched.
//!
//! Each committed pattern leaf records the name of the fact it
//! matched. Only committed branches contribute: an OR's losing
//! children and NOT subtrees leave no trace, matching the binding
//! commit discipline.

/// Record of fact names matched by committed pattern leaves,
/// deduplicated in first-match order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct MatchTrace {
    pub facts_matched: Vec<String>,
}

impl MatchTrace {
    pub fn new() -> Self {
        MatchTrace {
            facts_matched: Vec::new(),
        }
    }

    /// Record a matched fact name.
    pub fn record(&mut self, fact_name: &str) {
        if !self.facts_matched.iter().any(|n| n == fact_name) {
            self.facts_matched.push(fact_name.to_string());
        }
    }

    /// Commit a child scope's trace into this one, preserving order.
    pub fn absorb(&mut self, child: MatchTrace) {
        for name in child.facts_matched {
            if !self.facts_matched.contains(&name) {
                self.facts_matched.push(name);
            }
        }
    }
}
