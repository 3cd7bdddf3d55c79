use std::{
    cmp::Ordering,
    time::{Duration, SystemTime},
};

use super::{unsupported, Adder, Comparer, EqualityComparer, OpResult, Subtractor};
use crate::{error::EvalError, object::Object};

const KIND: &str = "Date";

/// Shifts a date by a signed number of nanoseconds.
fn shift(date: &SystemTime, nanos: i64, op: &str) -> OpResult {
    let offset = Duration::from_nanos(nanos.unsigned_abs());
    let shifted = if nanos >= 0 {
        date.checked_add(offset)
    } else {
        date.checked_sub(offset)
    };
    shifted
        .map(Object::Date)
        .ok_or_else(|| EvalError::overflow(op))
}

fn nanos_between(from: &SystemTime, to: &SystemTime) -> OpResult {
    let (elapsed, sign) = match to.duration_since(*from) {
        Ok(elapsed) => (elapsed, 1),
        Err(err) => (err.duration(), -1),
    };
    i64::try_from(elapsed.as_nanos())
        .map(|nanos| Object::Integer(sign * nanos))
        .map_err(|_| EvalError::overflow("-"))
}

impl Adder for SystemTime {
    fn add(&self, other: &Object) -> OpResult {
        match other {
            Object::Integer(nanos) => shift(self, *nanos, "+"),
            _ => Err(unsupported("+", KIND, other)),
        }
    }
}

impl Subtractor for SystemTime {
    fn sub(&self, other: &Object) -> OpResult {
        match other {
            Object::Integer(nanos) => match nanos.checked_neg() {
                Some(nanos) => shift(self, nanos, "-"),
                None => Err(EvalError::overflow("-")),
            },
            Object::Date(date) => nanos_between(date, self),
            _ => Err(unsupported("-", KIND, other)),
        }
    }
}

impl Comparer for SystemTime {
    fn compare(&self, other: &Object) -> Result<Ordering, EvalError> {
        match other {
            Object::Date(date) => Ok(self.cmp(date)),
            _ => Err(unsupported("cmp", KIND, other)),
        }
    }
}

impl EqualityComparer for SystemTime {
    fn equals(&self, other: &Object) -> Result<bool, EvalError> {
        Ok(matches!(other, Object::Date(date) if date == self))
    }
}
