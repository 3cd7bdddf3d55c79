use std::cmp::Ordering;

use super::{
    ordered, unsupported, Adder, Comparer, Divider, EqualityComparer, Moduler, Multiplexor,
    Negator, OpResult, Power, Subtractor,
};
use crate::{error::EvalError, object::Object};

const KIND: &str = "Integer";

fn checked(result: Option<i64>, op: &str) -> OpResult {
    result.map(Object::Integer).ok_or_else(|| EvalError::overflow(op))
}

impl Adder for i64 {
    fn add(&self, other: &Object) -> OpResult {
        match other {
            Object::Integer(value) => checked(self.checked_add(*value), "+"),
            Object::Float(value) => Ok(Object::Float(*self as f64 + value)),
            Object::String(value) => Ok(Object::String(format!("{}{}", self, value))),
            _ => Err(unsupported("+", KIND, other)),
        }
    }
}

impl Subtractor for i64 {
    fn sub(&self, other: &Object) -> OpResult {
        match other {
            Object::Integer(value) => checked(self.checked_sub(*value), "-"),
            Object::Float(value) => Ok(Object::Float(*self as f64 - value)),
            _ => Err(unsupported("-", KIND, other)),
        }
    }
}

impl Multiplexor for i64 {
    fn mul(&self, other: &Object) -> OpResult {
        match other {
            Object::Integer(value) => checked(self.checked_mul(*value), "*"),
            Object::Float(value) => Ok(Object::Float(*self as f64 * value)),
            _ => Err(unsupported("*", KIND, other)),
        }
    }
}

impl Divider for i64 {
    fn div(&self, other: &Object) -> OpResult {
        match other {
            Object::Integer(0) => Err(EvalError::DivisionByZero),
            Object::Integer(value) => checked(self.checked_div(*value), "/"),
            Object::Float(value) => Ok(Object::Float(*self as f64 / value)),
            _ => Err(unsupported("/", KIND, other)),
        }
    }
}

impl Moduler for i64 {
    fn modulo(&self, other: &Object) -> OpResult {
        match other {
            Object::Integer(0) => Err(EvalError::DivisionByZero),
            Object::Integer(value) => checked(self.checked_rem(*value), "%"),
            Object::Float(value) => Ok(Object::Float(*self as f64 % value)),
            _ => Err(unsupported("%", KIND, other)),
        }
    }
}

impl Power for i64 {
    fn power(&self, other: &Object) -> OpResult {
        match other {
            Object::Integer(exponent) if *exponent < 0 => {
                Ok(Object::Float((*self as f64).powf(*exponent as f64)))
            }
            Object::Integer(exponent) => {
                let exponent = u32::try_from(*exponent).map_err(|_| EvalError::overflow("**"))?;
                checked(self.checked_pow(exponent), "**")
            }
            Object::Float(exponent) => Ok(Object::Float((*self as f64).powf(*exponent))),
            _ => Err(unsupported("**", KIND, other)),
        }
    }
}

impl Negator for i64 {
    fn negate(&self) -> OpResult {
        checked(self.checked_neg(), "-")
    }
}

impl Comparer for i64 {
    fn compare(&self, other: &Object) -> Result<Ordering, EvalError> {
        match other {
            Object::Integer(value) => Ok(self.cmp(value)),
            Object::Float(value) => ordered(*self as f64, *value),
            _ => Err(unsupported("cmp", KIND, other)),
        }
    }
}

impl EqualityComparer for i64 {
    fn equals(&self, other: &Object) -> Result<bool, EvalError> {
        Ok(match other {
            Object::Integer(value) => self == value,
            Object::Float(value) => *self as f64 == *value,
            _ => false,
        })
    }
}
