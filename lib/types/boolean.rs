use super::{BooleanConverter, EqualityComparer};
use crate::{error::EvalError, object::Object};

impl BooleanConverter for bool {
    fn to_boolean(&self) -> bool {
        *self
    }
}

impl EqualityComparer for bool {
    fn equals(&self, other: &Object) -> Result<bool, EvalError> {
        Ok(matches!(other, Object::Boolean(value) if value == self))
    }
}
