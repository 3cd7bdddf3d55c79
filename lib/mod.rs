pub mod ast;
pub mod builtins;
pub mod engine;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod printer;
pub mod token;
pub mod types;

pub use ast::{Expression, Visitor};
pub use builtins::Builtins;
pub use engine::{new_engine, Engine};
pub use environment::{Context, Environment, Method, Scope, Variable};
pub use error::{DefinitionError, Error, EvalError, ParseError, ScanError};
pub use evaluator::Evaluator;
pub use lexer::Lexer;
pub use object::{CustomValue, Object};
pub use parser::Parser;
pub use printer::print;
pub use token::{Literal, Token, TokenKind};

pub fn scan(source: &str) -> Result<Vec<Token>, ScanError> {
    Lexer::new(source).scan()
}

/// Scans and parses `source` into a single expression.
pub fn parse(source: &str) -> Result<Expression, Error> {
    let tokens = scan(source)?;
    Ok(Parser::new(tokens).parse()?)
}

pub fn evaluate(expression: &Expression, scope: &Scope) -> Result<Object, EvalError> {
    Evaluator::new(scope.clone()).eval(expression)
}

pub fn evaluate_str(source: &str, scope: &Scope) -> Result<Object, Error> {
    let expression = parse(source)?;
    Ok(evaluate(&expression, scope)?)
}
