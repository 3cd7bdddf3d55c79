use std::fmt;

use crate::{printer::Printer, token::Token};

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    StringLiteral(String),
    IntegerLiteral(i64),
    FloatLiteral(f64),
    BooleanLiteral(bool),
    NilLiteral,
    Grouping(Box<Expression>),
    Unary {
        operator: Token,
        right: Box<Expression>,
    },
    Binary {
        left: Box<Expression>,
        operator: Token,
        right: Box<Expression>,
    },
    /// `owner` is set for member access: `a.b` is `b` owned by `a`.
    Identifier {
        name: String,
        owner: Option<Box<Expression>>,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier {
            name: name.into(),
            owner: None,
        }
    }

    pub fn member(owner: Expression, name: impl Into<String>) -> Self {
        Expression::Identifier {
            name: name.into(),
            owner: Some(Box::new(owner)),
        }
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expression::StringLiteral(value) => visitor.visit_string_literal(value),
            Expression::IntegerLiteral(value) => visitor.visit_integer_literal(*value),
            Expression::FloatLiteral(value) => visitor.visit_float_literal(*value),
            Expression::BooleanLiteral(value) => visitor.visit_boolean_literal(*value),
            Expression::NilLiteral => visitor.visit_nil_literal(),
            Expression::Grouping(inner) => visitor.visit_grouping(inner),
            Expression::Unary { operator, right } => visitor.visit_unary(operator, right),
            Expression::Binary {
                left,
                operator,
                right,
            } => visitor.visit_binary(left, operator, right),
            Expression::Identifier { name, owner } => {
                visitor.visit_identifier(name, owner.as_deref())
            }
            Expression::Call { callee, arguments } => visitor.visit_call(callee, arguments),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.accept(&mut Printer))
    }
}

/// One method per node variant. `Expression::accept` picks the method,
/// the implementor decides what a visit produces.
pub trait Visitor {
    type Output;

    fn visit_string_literal(&mut self, value: &str) -> Self::Output;
    fn visit_integer_literal(&mut self, value: i64) -> Self::Output;
    fn visit_float_literal(&mut self, value: f64) -> Self::Output;
    fn visit_boolean_literal(&mut self, value: bool) -> Self::Output;
    fn visit_nil_literal(&mut self) -> Self::Output;
    fn visit_grouping(&mut self, inner: &Expression) -> Self::Output;
    fn visit_unary(&mut self, operator: &Token, right: &Expression) -> Self::Output;
    fn visit_binary(
        &mut self,
        left: &Expression,
        operator: &Token,
        right: &Expression,
    ) -> Self::Output;
    fn visit_identifier(&mut self, name: &str, owner: Option<&Expression>) -> Self::Output;
    fn visit_call(&mut self, callee: &Expression, arguments: &[Expression]) -> Self::Output;
}
