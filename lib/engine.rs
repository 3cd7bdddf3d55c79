use anyhow::Result;

use crate::{environment::Scope, evaluator::Evaluator, lexer::Lexer, parser::Parser};

/// Evaluates one line of source against a long-lived scope and renders the
/// result as text.
pub trait Engine {
    fn run(&mut self, input: &str) -> Result<String>;
}

pub fn new_engine(scope: Scope) -> Box<dyn Engine> {
    Box::new(EngineImpl {
        evaluator: Evaluator::new(scope),
    })
}

struct EngineImpl {
    evaluator: Evaluator,
}

impl Engine for EngineImpl {
    fn run(&mut self, input: &str) -> Result<String> {
        let tokens = Lexer::new(input).scan()?;
        let mut parser = Parser::new(tokens);

        let expression = parser.parse()?;

        let result = self.evaluator.eval(&expression)?;

        Ok(result.to_string())
    }
}
