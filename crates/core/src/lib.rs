//! Formic working-memory data model.
//!
//! This crate holds the leaf types of the Formic rule engine: the
//! `Value` tagged union every fact payload is built from, and the
//! `Fact` container the matcher runs against. The condition evaluator
//! lives in `formic-eval`; this crate has no matching logic of its
//! own.

pub mod fact;
pub mod value;

pub use fact::Fact;
pub use value::{ExternalRef, PredicateFn, Value, ValueError};
