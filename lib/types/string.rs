use std::cmp::Ordering;

use super::{unsupported, Adder, Comparer, EqualityComparer, OpResult};
use crate::{error::EvalError, object::Object};

const KIND: &str = "String";

impl Adder for String {
    fn add(&self, other: &Object) -> OpResult {
        match other {
            Object::Integer(_) | Object::Float(_) | Object::String(_) | Object::Boolean(_) => {
                Ok(Object::String(format!("{}{}", self, other)))
            }
            Object::Null => Ok(Object::String(self.clone())),
            _ => Err(unsupported("+", KIND, other)),
        }
    }
}

impl Comparer for String {
    fn compare(&self, other: &Object) -> Result<Ordering, EvalError> {
        match other {
            Object::String(value) => Ok(self.as_str().cmp(value.as_str())),
            _ => Err(unsupported("cmp", KIND, other)),
        }
    }
}

impl EqualityComparer for String {
    fn equals(&self, other: &Object) -> Result<bool, EvalError> {
        Ok(matches!(other, Object::String(value) if value == self))
    }
}
