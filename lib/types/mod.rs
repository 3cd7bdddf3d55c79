//! Capability protocols for runtime values.
//!
//! Every binary operator maps to exactly one trait. The evaluator asks the
//! left operand (or the only operand) for the capability through the lookup
//! methods on [`Object`]; a value that does not expose it cannot take part
//! in the operation. Coercion of the right operand is up to each
//! implementation.

mod boolean;
mod date;
mod float;
mod integer;
mod null;
mod string;

use std::cmp::Ordering;

pub use null::Null;

use crate::{error::EvalError, object::Object};

pub type OpResult = Result<Object, EvalError>;

/// `+`
pub trait Adder {
    fn add(&self, other: &Object) -> OpResult;
}

/// `-`
pub trait Subtractor {
    fn sub(&self, other: &Object) -> OpResult;
}

/// `*`
pub trait Multiplexor {
    fn mul(&self, other: &Object) -> OpResult;
}

/// `/`
pub trait Divider {
    fn div(&self, other: &Object) -> OpResult;
}

/// `%`
pub trait Moduler {
    fn modulo(&self, other: &Object) -> OpResult;
}

/// `**`
pub trait Power {
    fn power(&self, other: &Object) -> OpResult;
}

/// Unary `-`
pub trait Negator {
    fn negate(&self) -> OpResult;
}

/// `<`, `<=`, `>` and `>=` are all derived from one comparison.
pub trait Comparer {
    fn compare(&self, other: &Object) -> Result<Ordering, EvalError>;
}

/// `==`; `!=` is its negation.
pub trait EqualityComparer {
    fn equals(&self, other: &Object) -> Result<bool, EvalError>;
}

/// `&&`, `||` and `!`.
pub trait BooleanConverter {
    fn to_boolean(&self) -> bool;
}

fn unsupported(op: &str, left: &str, right: &Object) -> EvalError {
    EvalError::not_supported(op, left, right.kind())
}

/// IEEE ordering, so `-0.0` and `0` compare equal as they do under `==`.
fn ordered(left: f64, right: f64) -> Result<Ordering, EvalError> {
    left.partial_cmp(&right).ok_or_else(|| EvalError::Unordered {
        left: left.to_string(),
        right: right.to_string(),
    })
}
