use anyhow::{anyhow, bail, Result};

use crate::{environment::Environment, error::DefinitionError, object::Object};

type Builtin = fn(Vec<Object>) -> Result<Object>;

/// Optional standard methods a host can install into a scope.
pub struct Builtins;

impl Builtins {
    pub fn get() -> Vec<(&'static str, Builtin)> {
        vec![
            ("max", Self::max_fn as Builtin),
            ("min", Self::min_fn as Builtin),
            ("abs", Self::abs_fn as Builtin),
            ("len", Self::len_fn as Builtin),
            ("upper", Self::upper_fn as Builtin),
            ("lower", Self::lower_fn as Builtin),
        ]
    }

    pub fn register(env: &mut Environment) -> Result<(), DefinitionError> {
        for (name, function) in Self::get() {
            env.define_method(name, function)?;
        }
        Ok(())
    }

    fn max_fn(args: Vec<Object>) -> Result<Object> {
        Self::extreme("max", args, |ordering| ordering.is_gt())
    }

    fn min_fn(args: Vec<Object>) -> Result<Object> {
        Self::extreme("min", args, |ordering| ordering.is_lt())
    }

    /// Picks the argument that wins every comparison against the current
    /// best, using the arguments' own `Comparer` capability.
    fn extreme(
        name: &str,
        args: Vec<Object>,
        wins: fn(std::cmp::Ordering) -> bool,
    ) -> Result<Object> {
        let mut args = args.into_iter();
        let Some(mut best) = args.next() else {
            bail!("wrong number of arguments for {name}: want at least 1, got 0");
        };
        for arg in args {
            let comparer = arg
                .comparer()
                .ok_or_else(|| anyhow!("argument to `{name}` not supported, got {}", arg.kind()))?;
            if wins(comparer.compare(&best)?) {
                best = arg;
            }
        }
        Ok(best)
    }

    fn abs_fn(args: Vec<Object>) -> Result<Object> {
        if args.len() != 1 {
            bail!(
                "wrong number of arguments for abs: want=1, got={}",
                args.len()
            );
        }

        match args.first() {
            Some(Object::Integer(value)) => value
                .checked_abs()
                .map(Object::Integer)
                .ok_or_else(|| anyhow!("integer overflow in `abs`")),
            Some(Object::Float(value)) => Ok(Object::Float(value.abs())),
            Some(other) => Err(anyhow!("argument to `abs` not supported, got {}", other.kind())),
            None => Err(anyhow!("argument to `abs` not provided")),
        }
    }

    fn len_fn(args: Vec<Object>) -> Result<Object> {
        if args.len() != 1 {
            bail!(
                "wrong number of arguments for len: want=1, got={}",
                args.len()
            );
        }

        match args.first() {
            Some(Object::String(value)) => Ok(Object::Integer(value.chars().count() as i64)),
            Some(other) => Err(anyhow!("argument to `len` not supported, got {}", other.kind())),
            None => Err(anyhow!("argument to `len` not provided")),
        }
    }

    fn upper_fn(args: Vec<Object>) -> Result<Object> {
        Self::map_string("upper", args, |value| value.to_uppercase())
    }

    fn lower_fn(args: Vec<Object>) -> Result<Object> {
        Self::map_string("lower", args, |value| value.to_lowercase())
    }

    fn map_string(name: &str, args: Vec<Object>, f: fn(&str) -> String) -> Result<Object> {
        if args.len() != 1 {
            bail!(
                "wrong number of arguments for {name}: want=1, got={}",
                args.len()
            );
        }

        match args.first() {
            Some(Object::String(value)) => Ok(Object::String(f(value))),
            Some(other) => Err(anyhow!(
                "argument to `{name}` not supported, got {}",
                other.kind()
            )),
            None => Err(anyhow!("argument to `{name}` not provided")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_str;

    fn eval(input: &str) -> Result<Object> {
        let scope = Environment::new();
        Builtins::register(&mut scope.borrow_mut())?;
        Ok(evaluate_str(input, &scope)?)
    }

    #[test]
    fn test_builtins() {
        let tests = vec![
            ("max(1, 5, 3)", Object::Integer(5)),
            ("max(1, 5.5, 3)", Object::Float(5.5)),
            ("max('a', 'c', 'b')", Object::from("c")),
            ("max(7)", Object::Integer(7)),
            ("min(4, -2, 3)", Object::Integer(-2)),
            ("abs(-3)", Object::Integer(3)),
            ("abs(-3.5)", Object::Float(3.5)),
            ("len('héllo')", Object::Integer(5)),
            ("upper('abc')", Object::from("ABC")),
            ("lower('ABC')", Object::from("abc")),
        ];

        for (input, expected) in tests {
            assert_eq!(eval(input).unwrap(), expected, "input: {input}");
        }
    }

    #[test]
    fn test_builtin_errors() {
        let tests = vec![
            (
                "max()",
                "method max failed: wrong number of arguments for max: want at least 1, got 0",
            ),
            (
                "max(1, 'a')",
                "method max failed: operation \"cmp\" not supported for types String and Integer",
            ),
            (
                "max(1, true)",
                "method max failed: argument to `max` not supported, got Boolean",
            ),
            (
                "len(1)",
                "method len failed: argument to `len` not supported, got Integer",
            ),
            (
                "abs(1, 2)",
                "method abs failed: wrong number of arguments for abs: want=1, got=2",
            ),
        ];

        for (input, expected) in tests {
            let err = eval(input).unwrap_err();
            assert_eq!(err.to_string(), expected, "input: {input}");
        }
    }

    #[test]
    fn test_register_twice_fails() {
        let scope = Environment::new();
        Builtins::register(&mut scope.borrow_mut()).unwrap();
        assert_eq!(
            Builtins::register(&mut scope.borrow_mut()),
            Err(DefinitionError::MethodExists {
                name: "max".to_string()
            })
        );
    }
}
