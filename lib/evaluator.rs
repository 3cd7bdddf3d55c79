use std::cmp::Ordering;

use crate::{
    ast::{Expression, Visitor},
    environment::{Context, Scope},
    error::EvalError,
    object::Object,
    token::{Token, TokenKind},
};

type Result<T> = std::result::Result<T, EvalError>;

pub struct Evaluator {
    env: Scope,
}

impl Evaluator {
    pub fn new(env: Scope) -> Self {
        Self { env }
    }

    pub fn eval(&mut self, expression: &Expression) -> Result<Object> {
        expression.accept(self)
    }

    /// Runs `lookup` against the scope a name lives in: the owner's context
    /// for `owner.name`, the evaluator's scope chain otherwise.
    fn resolve<T>(
        &mut self,
        name: &str,
        owner: Option<&Expression>,
        lookup: impl Fn(&dyn Context) -> Option<T>,
    ) -> Result<Option<T>> {
        let Some(owner) = owner else {
            let env = self.env.borrow();
            return Ok(lookup(&*env as &dyn Context));
        };

        let owner = self.eval(owner)?;
        let found = match &owner {
            Object::Context(scope) => lookup(&*scope.borrow() as &dyn Context),
            Object::Custom(custom) => match custom.context() {
                Some(context) => lookup(context),
                None => return Err(not_a_context(name, &owner)),
            },
            _ => return Err(not_a_context(name, &owner)),
        };
        Ok(found)
    }

    fn eval_prefix_expression(&self, operator: &Token, right: Object) -> Result<Object> {
        let unsupported = || EvalError::UnaryNotSupported {
            op: operator.kind.to_string(),
            operand: right.kind().to_string(),
        };
        match operator.kind {
            TokenKind::Minus => right.negator().ok_or_else(unsupported)?.negate(),
            TokenKind::Bang => {
                let value = right.boolean_converter().ok_or_else(unsupported)?;
                Ok(Object::Boolean(!value.to_boolean()))
            }
            _ => Err(unsupported()),
        }
    }

    fn eval_infix_expression(&self, left: Object, operator: &Token, right: Object) -> Result<Object> {
        let unsupported =
            || EvalError::not_supported(operator.kind.to_string(), left.kind(), right.kind());
        match operator.kind {
            TokenKind::Plus => left.adder().ok_or_else(unsupported)?.add(&right),
            TokenKind::Minus => left.subtractor().ok_or_else(unsupported)?.sub(&right),
            TokenKind::Asterisk => left.multiplexor().ok_or_else(unsupported)?.mul(&right),
            TokenKind::Slash => left.divider().ok_or_else(unsupported)?.div(&right),
            TokenKind::Percent => left.moduler().ok_or_else(unsupported)?.modulo(&right),
            TokenKind::Power => left.power().ok_or_else(unsupported)?.power(&right),
            TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq => {
                // relational operators share one comparison, reported as "cmp"
                let comparer = left
                    .comparer()
                    .ok_or_else(|| EvalError::not_supported("cmp", left.kind(), right.kind()))?;
                let ordering = comparer.compare(&right)?;
                Ok(Object::Boolean(match operator.kind {
                    TokenKind::Lt => ordering == Ordering::Less,
                    TokenKind::LtEq => ordering != Ordering::Greater,
                    TokenKind::Gt => ordering == Ordering::Greater,
                    _ => ordering != Ordering::Less,
                }))
            }
            TokenKind::Eq | TokenKind::NotEq => {
                let equal = left
                    .equality_comparer()
                    .ok_or_else(unsupported)?
                    .equals(&right)?;
                Ok(Object::Boolean(equal == operator.is(TokenKind::Eq)))
            }
            TokenKind::And | TokenKind::Or => {
                let left = left.boolean_converter().ok_or_else(unsupported)?;
                let right = right.boolean_converter().ok_or_else(unsupported)?;
                let (left, right) = (left.to_boolean(), right.to_boolean());
                Ok(Object::Boolean(if operator.is(TokenKind::And) {
                    left && right
                } else {
                    left || right
                }))
            }
            _ => Err(unsupported()),
        }
    }
}

fn not_a_context(name: &str, owner: &Object) -> EvalError {
    EvalError::NotAContext {
        name: name.to_string(),
        kind: owner.kind().to_string(),
    }
}

impl Visitor for Evaluator {
    type Output = Result<Object>;

    fn visit_string_literal(&mut self, value: &str) -> Result<Object> {
        Ok(Object::String(value.to_string()))
    }

    fn visit_integer_literal(&mut self, value: i64) -> Result<Object> {
        Ok(Object::Integer(value))
    }

    fn visit_float_literal(&mut self, value: f64) -> Result<Object> {
        Ok(Object::Float(value))
    }

    fn visit_boolean_literal(&mut self, value: bool) -> Result<Object> {
        Ok(Object::Boolean(value))
    }

    fn visit_nil_literal(&mut self) -> Result<Object> {
        Ok(Object::Null)
    }

    fn visit_grouping(&mut self, inner: &Expression) -> Result<Object> {
        self.eval(inner)
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expression) -> Result<Object> {
        let right = self.eval(right)?;
        self.eval_prefix_expression(operator, right)
    }

    fn visit_binary(
        &mut self,
        left: &Expression,
        operator: &Token,
        right: &Expression,
    ) -> Result<Object> {
        let left = self.eval(left)?;
        let right = self.eval(right)?;
        self.eval_infix_expression(left, operator, right)
    }

    fn visit_identifier(&mut self, name: &str, owner: Option<&Expression>) -> Result<Object> {
        let var = self
            .resolve(name, owner, |context| context.resolve_name(name))?
            .ok_or_else(|| EvalError::UndefinedName {
                name: name.to_string(),
            })?;
        var.value().map_err(|reason| EvalError::Variable {
            name: name.to_string(),
            reason,
        })
    }

    fn visit_call(&mut self, callee: &Expression, arguments: &[Expression]) -> Result<Object> {
        let Expression::Identifier { name, owner } = callee else {
            return Err(EvalError::InvalidCallee {
                found: callee.to_string(),
            });
        };

        let method = self
            .resolve(name, owner.as_deref(), |context| context.resolve_method(name))?
            .ok_or_else(|| EvalError::UndefinedMethod { name: name.clone() })?;

        let args = arguments
            .iter()
            .map(|arg| self.eval(arg))
            .collect::<Result<Vec<Object>>>()?;

        tracing::debug!(method = %name, args = args.len(), "invoking method");
        method.invoke(args).map_err(|reason| EvalError::Invocation {
            name: name.clone(),
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use anyhow::bail;

    use super::*;
    use crate::{environment::Environment, parse};

    fn max(args: Vec<Object>) -> anyhow::Result<Object> {
        let mut result = i64::MIN;
        for arg in args {
            result = result.max(i64::try_from(arg)?);
        }
        Ok(Object::Integer(result))
    }

    fn test_scope() -> Scope {
        let scope = Environment::new();
        {
            let mut env = scope.borrow_mut();
            env.define("x", 1).unwrap();
            env.define("y", 2).unwrap();
            env.define("name", "expr").unwrap();
            env.define("ctx", Environment::new()).unwrap();
            env.define_method("max", max).unwrap();
            env.define_method("fail", |_: Vec<Object>| -> anyhow::Result<Object> {
                bail!("boom")
            })
            .unwrap();
        }
        scope
    }

    fn test_eval(input: &str) -> Result<Object> {
        test_eval_in(input, &test_scope())
    }

    fn test_eval_in(input: &str, scope: &Scope) -> Result<Object> {
        let expression = parse(input).unwrap();
        Evaluator::new(scope.clone()).eval(&expression)
    }

    #[test]
    fn test_eval_integer_expression() {
        let tests = vec![
            ("5", 5),
            ("-5", -5),
            ("--5", 5),
            ("1 + 2", 3),
            ("5 - 2 - 1", 2),
            ("5 + 5 + 5 + 5 - 10", 10),
            ("2 * 2 * 2 * 2 * 2", 32),
            ("-50 + 100 + -50", 0),
            ("5 + 2 * 10", 25),
            ("50 / 2 * 2 + 10", 60),
            ("2 * (5 + 10)", 30),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
            ("17 % 5", 2),
            ("2 ** 3", 8),
            ("2 ** 3 ** 2", 64),
            ("-2 ** 2", 4),
            ("x + y * 10", 21),
            ("max(x + y, 5, 3 * x * y)", 6),
        ];

        for (input, expected) in tests {
            let evaluated = test_eval(input).unwrap();
            assert_eq!(evaluated, Object::Integer(expected), "input: {input}");
        }
    }

    #[test]
    fn test_eval_float_expression() {
        let tests = vec![
            ("2.5 ** 3", 15.625),
            ("1 + 0.5", 1.5),
            ("0.5 + 1", 1.5),
            ("7 / 2.0", 3.5),
            ("-1.25", -1.25),
            ("2 ** -1", 0.5),
        ];

        for (input, expected) in tests {
            let evaluated = test_eval(input).unwrap();
            assert_eq!(evaluated, Object::Float(expected), "input: {input}");
        }
    }

    #[test]
    fn test_eval_string_expression() {
        let tests = vec![
            ("'foo' + \"bar\"", "foobar"),
            ("name + 1", "expr1"),
            ("1 + name", "1expr"),
            ("'x' + true", "xtrue"),
            ("'x' + nil", "x"),
        ];

        for (input, expected) in tests {
            let evaluated = test_eval(input).unwrap();
            assert_eq!(evaluated, Object::from(expected), "input: {input}");
        }
    }

    #[test]
    fn test_eval_boolean_expression() {
        let tests = vec![
            ("true", true),
            ("FALSE", false),
            ("1 < 2", true),
            ("1 > 2", false),
            ("1 <= 1", true),
            ("1 >= 2", false),
            ("2 > 1.5", true),
            ("'abc' < 'abd'", true),
            ("1 == 1", true),
            ("1 != 1", false),
            ("1 == 1.0", true),
            ("1 == '1'", false),
            ("nil == nil", true),
            ("true == true", true),
            ("true != false", true),
            ("(1 < 2) == true", true),
            ("true && false", false),
            ("true || false", true),
            ("true and not false", true),
            ("!true", false),
            ("!!true", true),
            ("!nil", true),
            ("nil || true", true),
            ("!x == 1", false),
            ("(x < y) && (y < 3) || false", true),
            ("0 == -0.0", true),
            ("0 <= -0.0", true),
            ("-0.0 >= 0", true),
            ("-0.0 < 0", false),
            ("0.0 / 0.0 == 0.0 / 0.0", false),
        ];

        for (input, expected) in tests {
            let evaluated = test_eval(input).unwrap();
            assert_eq!(evaluated, Object::Boolean(expected), "input: {input}");
        }
    }

    #[test]
    fn test_eval_literals() {
        assert_eq!(test_eval("nil").unwrap(), Object::Null);
        assert_eq!(test_eval("'s'").unwrap(), Object::from("s"));
        assert_eq!(test_eval("(((3)))").unwrap(), Object::Integer(3));
    }

    #[test]
    fn test_dispatch_asks_left_operand() {
        assert_eq!(test_eval("'x' + true").unwrap(), Object::from("xtrue"));
        match test_eval("true + 'x'") {
            Err(EvalError::NotSupported { op, left, right }) => {
                assert_eq!(op, "+");
                assert_eq!(left, "Boolean");
                assert_eq!(right, "String");
            }
            other => panic!("expected not supported error, found {other:?}"),
        }
    }

    #[test]
    fn test_error_handling() {
        let tests = vec![
            (
                "1 < 'foo'",
                "operation \"cmp\" not supported for types Integer and String",
            ),
            (
                "true + false",
                "operation \"+\" not supported for types Boolean and Boolean",
            ),
            (
                "nil < 1",
                "operation \"cmp\" not supported for types Null and Integer",
            ),
            (
                "true >= false",
                "operation \"cmp\" not supported for types Boolean and Boolean",
            ),
            ("0.0 / 0.0 < 1", "cannot order NaN and 1"),
            ("1 >= 0.0 / 0.0", "cannot order 1 and NaN"),
            (
                "ctx == 1",
                "operation \"==\" not supported for types Context and Integer",
            ),
            (
                "ctx != ctx",
                "operation \"!=\" not supported for types Context and Context",
            ),
            ("-true", "operation \"-\" not supported for type Boolean"),
            ("!1", "operation \"!\" not supported for type Integer"),
            (
                "1 && true",
                "operation \"&&\" not supported for types Integer and Boolean",
            ),
            (
                "true || 1",
                "operation \"||\" not supported for types Boolean and Integer",
            ),
            ("1 / 0", "division by zero"),
            ("missing", "identifier not found: missing"),
            ("missing()", "method not found: missing"),
            ("x()", "method not found: x"),
            ("max", "identifier not found: max"),
            ("x.y", "cannot resolve y: Integer is not a context"),
            ("x.f()", "cannot resolve f: Integer is not a context"),
            ("(max)(1)", "expected identifier as call target, found (max)"),
            ("max(1)(2)", "expected identifier as call target, found max(1)"),
            ("fail()", "method fail failed: boom"),
            (
                "max('a')",
                "method max failed: expected Integer, got String",
            ),
        ];

        for (input, expected) in tests {
            let err = test_eval(input).unwrap_err();
            assert_eq!(err.to_string(), expected, "input: {input}");
        }
    }

    #[test]
    fn test_arguments_evaluate_left_to_right_before_invocation() {
        let scope = test_scope();
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let log = seen.clone();
        scope
            .borrow_mut()
            .define_method("record", move |args: Vec<Object>| -> anyhow::Result<Object> {
                log.borrow_mut().push(args.len());
                Ok(args.into_iter().last().unwrap_or(Object::Null))
            })
            .unwrap();

        let result = test_eval_in("record(record(1), record(2, 3), 4)", &scope).unwrap();
        assert_eq!(result, Object::Integer(4));
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);

        // a failing argument stops the call before the method runs
        assert!(test_eval_in("record(1, missing)", &scope).is_err());
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_member_access_resolves_in_nested_context() {
        let scope = test_scope();
        let inner = Environment::new();
        inner.borrow_mut().define("c", 42).unwrap();
        inner
            .borrow_mut()
            .define_method("double", |args: Vec<Object>| -> anyhow::Result<Object> {
                let value = i64::try_from(args.into_iter().next().unwrap_or(Object::Null))?;
                Ok(Object::Integer(value * 2))
            })
            .unwrap();
        let middle = Environment::new();
        middle.borrow_mut().define("b", inner).unwrap();
        scope.borrow_mut().define("a", middle).unwrap();

        assert_eq!(test_eval_in("a.b.c", &scope).unwrap(), Object::Integer(42));
        assert_eq!(
            test_eval_in("a.b.double(a.b.c + x)", &scope).unwrap(),
            Object::Integer(86)
        );
        // member lookup does not fall back to the evaluator's scope
        assert_eq!(
            test_eval_in("a.b.x", &scope).unwrap_err().to_string(),
            "identifier not found: x"
        );
        assert_eq!(
            test_eval_in("a.b.max(1)", &scope).unwrap_err().to_string(),
            "method not found: max"
        );
    }

    #[test]
    fn test_enclosed_scope_shadows_parent() {
        let parent = test_scope();
        let child = Environment::new_enclosed_environment(parent.clone());
        child.borrow_mut().define("x", 100).unwrap();

        assert_eq!(test_eval_in("x + y", &child).unwrap(), Object::Integer(102));
        assert_eq!(test_eval_in("x + y", &parent).unwrap(), Object::Integer(3));
        assert_eq!(
            test_eval_in("max(x, y)", &child).unwrap(),
            Object::Integer(100)
        );
    }

    #[test]
    fn test_lazy_variable_failure() {
        let scope = test_scope();
        scope
            .borrow_mut()
            .define_lazy("sensor", || bail!("offline"))
            .unwrap();
        assert_eq!(
            test_eval_in("sensor + 1", &scope).unwrap_err().to_string(),
            "variable sensor could not be resolved: offline"
        );
    }
}
