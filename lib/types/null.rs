use super::{BooleanConverter, EqualityComparer};
use crate::{error::EvalError, object::Object};

/// Capability carrier for `Object::Null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Null;

impl BooleanConverter for Null {
    fn to_boolean(&self) -> bool {
        false
    }
}

impl EqualityComparer for Null {
    fn equals(&self, other: &Object) -> Result<bool, EvalError> {
        Ok(matches!(other, Object::Null))
    }
}
