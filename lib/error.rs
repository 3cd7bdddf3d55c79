use thiserror::Error;

use crate::token::Token;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("scan error at {position}: unexpected character '{character}'")]
    UnexpectedCharacter { character: char, position: usize },

    #[error("scan error at {position}: unterminated string")]
    UnterminatedString { position: usize },

    #[error("scan error at {position}: invalid number {lexeme}")]
    InvalidNumber { lexeme: String, position: usize },
}

impl ScanError {
    pub fn position(&self) -> usize {
        match self {
            ScanError::UnexpectedCharacter { position, .. }
            | ScanError::UnterminatedString { position }
            | ScanError::InvalidNumber { position, .. } => *position,
        }
    }
}

/// The parser stops at the first offending token.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("parse error at {}: {message} (found {token})", .token.position)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl ParseError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        Self {
            token,
            message: message.into(),
        }
    }

    pub fn position(&self) -> usize {
        self.token.position
    }
}

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("identifier not found: {name}")]
    UndefinedName { name: String },

    #[error("method not found: {name}")]
    UndefinedMethod { name: String },

    #[error("cannot resolve {name}: {kind} is not a context")]
    NotAContext { name: String, kind: String },

    #[error("expected identifier as call target, found {found}")]
    InvalidCallee { found: String },

    #[error("operation \"{op}\" not supported for types {left} and {right}")]
    NotSupported {
        op: String,
        left: String,
        right: String,
    },

    #[error("operation \"{op}\" not supported for type {operand}")]
    UnaryNotSupported { op: String, operand: String },

    #[error("division by zero")]
    DivisionByZero,

    /// A comparison involving NaN.
    #[error("cannot order {left} and {right}")]
    Unordered { left: String, right: String },

    #[error("integer overflow in \"{op}\"")]
    Overflow { op: String },

    #[error("method {name} failed: {reason}")]
    Invocation { name: String, reason: anyhow::Error },

    #[error("variable {name} could not be resolved: {reason}")]
    Variable { name: String, reason: anyhow::Error },
}

impl EvalError {
    pub fn not_supported(op: impl Into<String>, left: &str, right: &str) -> Self {
        EvalError::NotSupported {
            op: op.into(),
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    pub fn overflow(op: impl Into<String>) -> Self {
        EvalError::Overflow { op: op.into() }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefinitionError {
    #[error("var {name} already exists")]
    NameExists { name: String },

    #[error("method {name} already exists")]
    MethodExists { name: String },
}

/// Any failure of the combined parse-and-evaluate entry points.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}
