use crate::{
    ast::{Expression, Visitor},
    token::Token,
};

/// Renders an expression in canonical form: single spaces around binary
/// operators, `True`/`False`/`Nil` for keywords, floats with six decimals.
pub struct Printer;

pub fn print(expression: &Expression) -> String {
    expression.accept(&mut Printer)
}

impl Visitor for Printer {
    type Output = String;

    fn visit_string_literal(&mut self, value: &str) -> String {
        format!("\"{}\"", value)
    }

    fn visit_integer_literal(&mut self, value: i64) -> String {
        value.to_string()
    }

    fn visit_float_literal(&mut self, value: f64) -> String {
        format!("{:.6}", value)
    }

    fn visit_boolean_literal(&mut self, value: bool) -> String {
        let rendered = if value { "True" } else { "False" };
        rendered.to_string()
    }

    fn visit_nil_literal(&mut self) -> String {
        "Nil".to_string()
    }

    fn visit_grouping(&mut self, inner: &Expression) -> String {
        format!("({})", inner.accept(self))
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expression) -> String {
        format!("{}{}", operator.kind, right.accept(self))
    }

    fn visit_binary(&mut self, left: &Expression, operator: &Token, right: &Expression) -> String {
        format!(
            "{} {} {}",
            left.accept(self),
            operator.kind,
            right.accept(self)
        )
    }

    fn visit_identifier(&mut self, name: &str, owner: Option<&Expression>) -> String {
        match owner {
            Some(owner) => format!("{}.{}", owner.accept(self), name),
            None => name.to_string(),
        }
    }

    fn visit_call(&mut self, callee: &Expression, arguments: &[Expression]) -> String {
        let arguments: Vec<String> = arguments.iter().map(|arg| arg.accept(self)).collect();
        format!("{}({})", callee.accept(self), arguments.join(", "))
    }
}
