use core::fmt;
use std::{rc::Rc, time::SystemTime};

use anyhow::{anyhow, Result};

use crate::{
    environment::{Context, Scope},
    types::{
        Adder, BooleanConverter, Comparer, Divider, EqualityComparer, Moduler, Multiplexor,
        Negator, Null, Power, Subtractor,
    },
};

/// A runtime value.
///
/// Operators never look at the variant directly; they go through the
/// capability lookups below, so `Custom` values take part in arithmetic and
/// comparisons on the same footing as the built-in kinds.
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
    Date(SystemTime),
    /// A nested scope, the owner in `a.b` member access.
    Context(Scope),
    Custom(Rc<dyn CustomValue>),
}

/// Host-defined value kind. Every capability defaults to unsupported.
pub trait CustomValue: fmt::Debug + fmt::Display {
    fn type_name(&self) -> &str;

    fn adder(&self) -> Option<&dyn Adder> {
        None
    }
    fn subtractor(&self) -> Option<&dyn Subtractor> {
        None
    }
    fn multiplexor(&self) -> Option<&dyn Multiplexor> {
        None
    }
    fn divider(&self) -> Option<&dyn Divider> {
        None
    }
    fn moduler(&self) -> Option<&dyn Moduler> {
        None
    }
    fn power(&self) -> Option<&dyn Power> {
        None
    }
    fn negator(&self) -> Option<&dyn Negator> {
        None
    }
    fn comparer(&self) -> Option<&dyn Comparer> {
        None
    }
    fn equality_comparer(&self) -> Option<&dyn EqualityComparer> {
        None
    }
    fn boolean_converter(&self) -> Option<&dyn BooleanConverter> {
        None
    }
    /// Lets the value act as an owner for member access and method calls.
    fn context(&self) -> Option<&dyn Context> {
        None
    }
}

impl Object {
    pub fn kind(&self) -> &str {
        match self {
            Object::Integer(_) => "Integer",
            Object::Float(_) => "Float",
            Object::String(_) => "String",
            Object::Boolean(_) => "Boolean",
            Object::Null => "Null",
            Object::Date(_) => "Date",
            Object::Context(_) => "Context",
            Object::Custom(value) => value.type_name(),
        }
    }

    pub fn adder(&self) -> Option<&dyn Adder> {
        match self {
            Object::Integer(value) => Some(value),
            Object::Float(value) => Some(value),
            Object::String(value) => Some(value),
            Object::Date(value) => Some(value),
            Object::Custom(value) => value.adder(),
            _ => None,
        }
    }

    pub fn subtractor(&self) -> Option<&dyn Subtractor> {
        match self {
            Object::Integer(value) => Some(value),
            Object::Float(value) => Some(value),
            Object::Date(value) => Some(value),
            Object::Custom(value) => value.subtractor(),
            _ => None,
        }
    }

    pub fn multiplexor(&self) -> Option<&dyn Multiplexor> {
        match self {
            Object::Integer(value) => Some(value),
            Object::Float(value) => Some(value),
            Object::Custom(value) => value.multiplexor(),
            _ => None,
        }
    }

    pub fn divider(&self) -> Option<&dyn Divider> {
        match self {
            Object::Integer(value) => Some(value),
            Object::Float(value) => Some(value),
            Object::Custom(value) => value.divider(),
            _ => None,
        }
    }

    pub fn moduler(&self) -> Option<&dyn Moduler> {
        match self {
            Object::Integer(value) => Some(value),
            Object::Float(value) => Some(value),
            Object::Custom(value) => value.moduler(),
            _ => None,
        }
    }

    pub fn power(&self) -> Option<&dyn Power> {
        match self {
            Object::Integer(value) => Some(value),
            Object::Float(value) => Some(value),
            Object::Custom(value) => value.power(),
            _ => None,
        }
    }

    pub fn negator(&self) -> Option<&dyn Negator> {
        match self {
            Object::Integer(value) => Some(value),
            Object::Float(value) => Some(value),
            Object::Custom(value) => value.negator(),
            _ => None,
        }
    }

    pub fn comparer(&self) -> Option<&dyn Comparer> {
        match self {
            Object::Integer(value) => Some(value),
            Object::Float(value) => Some(value),
            Object::String(value) => Some(value),
            Object::Date(value) => Some(value),
            Object::Custom(value) => value.comparer(),
            _ => None,
        }
    }

    pub fn equality_comparer(&self) -> Option<&dyn EqualityComparer> {
        match self {
            Object::Integer(value) => Some(value),
            Object::Float(value) => Some(value),
            Object::String(value) => Some(value),
            Object::Boolean(value) => Some(value),
            Object::Null => Some(&Null),
            Object::Date(value) => Some(value),
            Object::Context(_) => None,
            Object::Custom(value) => value.equality_comparer(),
        }
    }

    pub fn boolean_converter(&self) -> Option<&dyn BooleanConverter> {
        match self {
            Object::Boolean(value) => Some(value),
            Object::Null => Some(&Null),
            Object::Custom(value) => value.boolean_converter(),
            _ => None,
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(left), Object::Integer(right)) => left == right,
            (Object::Float(left), Object::Float(right)) => left == right,
            (Object::String(left), Object::String(right)) => left == right,
            (Object::Boolean(left), Object::Boolean(right)) => left == right,
            (Object::Null, Object::Null) => true,
            (Object::Date(left), Object::Date(right)) => left == right,
            (Object::Context(left), Object::Context(right)) => Rc::ptr_eq(left, right),
            (Object::Custom(left), Object::Custom(right)) => {
                std::ptr::addr_eq(Rc::as_ptr(left), Rc::as_ptr(right))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Float(value) => write!(f, "{}", value),
            Object::String(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Null => write!(f, "nil"),
            Object::Date(value) => match value.duration_since(SystemTime::UNIX_EPOCH) {
                Ok(since) => write!(f, "Date({}ms)", since.as_millis()),
                Err(err) => write!(f, "Date(-{}ms)", err.duration().as_millis()),
            },
            Object::Context(_) => write!(f, "<context>"),
            Object::Custom(value) => write!(f, "{}", value),
        }
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Object::Integer(value)
    }
}

impl From<i32> for Object {
    fn from(value: i32) -> Self {
        Object::Integer(value.into())
    }
}

impl From<f64> for Object {
    fn from(value: f64) -> Self {
        Object::Float(value)
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Object::Boolean(value)
    }
}

impl From<&str> for Object {
    fn from(value: &str) -> Self {
        Object::String(value.to_string())
    }
}

impl From<String> for Object {
    fn from(value: String) -> Self {
        Object::String(value)
    }
}

impl From<SystemTime> for Object {
    fn from(value: SystemTime) -> Self {
        Object::Date(value)
    }
}

impl From<Scope> for Object {
    fn from(value: Scope) -> Self {
        Object::Context(value)
    }
}

impl TryFrom<Object> for i64 {
    type Error = anyhow::Error;

    fn try_from(value: Object) -> Result<Self> {
        match value {
            Object::Integer(value) => Ok(value),
            other => Err(anyhow!("expected Integer, got {}", other.kind())),
        }
    }
}

impl TryFrom<Object> for f64 {
    type Error = anyhow::Error;

    fn try_from(value: Object) -> Result<Self> {
        match value {
            Object::Integer(value) => Ok(value as f64),
            Object::Float(value) => Ok(value),
            other => Err(anyhow!("expected Float, got {}", other.kind())),
        }
    }
}

impl TryFrom<Object> for String {
    type Error = anyhow::Error;

    fn try_from(value: Object) -> Result<Self> {
        match value {
            Object::String(value) => Ok(value),
            other => Err(anyhow!("expected String, got {}", other.kind())),
        }
    }
}

impl TryFrom<Object> for bool {
    type Error = anyhow::Error;

    fn try_from(value: Object) -> Result<Self> {
        match value {
            Object::Boolean(value) => Ok(value),
            other => Err(anyhow!("expected Boolean, got {}", other.kind())),
        }
    }
}
