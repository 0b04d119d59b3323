//! Single attribute/element-level tests within a pattern.
//!
//! A `Constraint` applies one test to a fact payload (or to one of its
//! elements or attributes), optionally negated, optionally binding the
//! tested value to a pattern variable.

use formic_core::{PredicateFn, Value};

/// The test a constraint applies. Exactly one of equality-to-value or
/// predicate-over-value, by construction.
#[derive(Debug, Clone)]
pub enum ConstraintTest {
    /// Structural equality against a stored value. A candidate of a
    /// different variant never matches; there is no coercion.
    Equals(Value),
    /// An arbitrary test closure over the candidate.
    Satisfies(PredicateFn),
}

impl ConstraintTest {
    /// Apply the un-negated test to a candidate.
    pub fn accepts(&self, candidate: &Value) -> bool {
        match self {
            ConstraintTest::Equals(expected) => candidate == expected,
            ConstraintTest::Satisfies(pred) => pred.test(candidate),
        }
    }
}

/// One test within a pattern.
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Map key this constraint targets. `None` means the test applies
    /// at element level (sequence/set members, or the whole payload
    /// for scalar and ref facts).
    pub attribute: Option<String>,
    pub test: ConstraintTest,
    /// Variable to bind the matched value to.
    pub bind_as: Option<String>,
    pub negate: bool,
}

impl Constraint {
    /// Equality constraint at element level.
    pub fn equals(value: Value) -> Self {
        Constraint {
            attribute: None,
            test: ConstraintTest::Equals(value),
            bind_as: None,
            negate: false,
        }
    }

    /// Predicate constraint at element level.
    pub fn satisfies<F>(pred: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Constraint {
            attribute: None,
            test: ConstraintTest::Satisfies(PredicateFn::new(pred)),
            bind_as: None,
            negate: false,
        }
    }

    /// Target a map attribute instead of element level.
    pub fn on(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Bind the matched value to a pattern variable.
    pub fn bind(mut self, variable: impl Into<String>) -> Self {
        self.bind_as = Some(variable.into());
        self
    }

    /// Invert the test. The bind decision follows the inverted result:
    /// a negated constraint binds its variable exactly when the raw
    /// test on the candidate was false.
    pub fn negated(mut self) -> Self {
        self.negate = true;
        self
    }

    /// The effective (possibly negated) test result for a candidate.
    pub fn satisfied_by(&self, candidate: &Value) -> bool {
        self.test.accepts(candidate) != self.negate
    }
}
