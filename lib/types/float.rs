use std::cmp::Ordering;

use super::{
    ordered, unsupported, Adder, Comparer, Divider, EqualityComparer, Moduler, Multiplexor,
    Negator, OpResult, Power, Subtractor,
};
use crate::{error::EvalError, object::Object};

const KIND: &str = "Float";

/// Integers on the right are promoted; anything else is rejected.
fn operand(op: &str, other: &Object) -> Result<f64, EvalError> {
    match other {
        Object::Integer(value) => Ok(*value as f64),
        Object::Float(value) => Ok(*value),
        _ => Err(unsupported(op, KIND, other)),
    }
}

impl Adder for f64 {
    fn add(&self, other: &Object) -> OpResult {
        Ok(Object::Float(self + operand("+", other)?))
    }
}

impl Subtractor for f64 {
    fn sub(&self, other: &Object) -> OpResult {
        Ok(Object::Float(self - operand("-", other)?))
    }
}

impl Multiplexor for f64 {
    fn mul(&self, other: &Object) -> OpResult {
        Ok(Object::Float(self * operand("*", other)?))
    }
}

impl Divider for f64 {
    fn div(&self, other: &Object) -> OpResult {
        Ok(Object::Float(self / operand("/", other)?))
    }
}

impl Moduler for f64 {
    fn modulo(&self, other: &Object) -> OpResult {
        Ok(Object::Float(self % operand("%", other)?))
    }
}

impl Power for f64 {
    fn power(&self, other: &Object) -> OpResult {
        match other {
            Object::Integer(exponent) => match i32::try_from(*exponent) {
                Ok(exponent) => Ok(Object::Float(self.powi(exponent))),
                Err(_) => Ok(Object::Float(self.powf(*exponent as f64))),
            },
            Object::Float(exponent) => Ok(Object::Float(self.powf(*exponent))),
            _ => Err(unsupported("**", KIND, other)),
        }
    }
}

impl Negator for f64 {
    fn negate(&self) -> OpResult {
        Ok(Object::Float(-self))
    }
}

impl Comparer for f64 {
    fn compare(&self, other: &Object) -> Result<Ordering, EvalError> {
        ordered(*self, operand("cmp", other)?)
    }
}

impl EqualityComparer for f64 {
    fn equals(&self, other: &Object) -> Result<bool, EvalError> {
        Ok(match other {
            Object::Integer(value) => *self == *value as f64,
            Object::Float(value) => self == value,
            _ => false,
        })
    }
}
