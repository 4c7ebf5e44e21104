//! Error taxonomy for expression evaluation
//!
//! Every layer (tokenizer, converter, evaluator, orchestrator) reports the
//! first error it hits as an [`EvalError`]. All of these are local to the
//! statement that raised them: the session's bindings stay valid and usable
//! afterwards, and nothing here is fatal to the process or the store.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    #[error("malformed number '{0}'")]
    MalformedNumber(String),
    #[error("invalid assignment: {0}")]
    InvalidAssignment(String),
    #[error("mismatched parentheses")]
    MismatchedParentheses,
    #[error("operator '{0}' requires two operands")]
    InsufficientOperands(char),
    #[error("division by zero")]
    DivisionByZero,
    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),
    #[error("malformed expression")]
    MalformedExpression,
}

impl EvalError {
    /// Stable kind name, used by the service layer when reporting an error
    /// as a `(kind, message)` pair over the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            EvalError::InvalidCharacter(_) => "InvalidCharacter",
            EvalError::MalformedNumber(_) => "MalformedNumber",
            EvalError::InvalidAssignment(_) => "InvalidAssignment",
            EvalError::MismatchedParentheses => "MismatchedParentheses",
            EvalError::InsufficientOperands(_) => "InsufficientOperands",
            EvalError::DivisionByZero => "DivisionByZero",
            EvalError::UndefinedVariable(_) => "UndefinedVariable",
            EvalError::MalformedExpression => "MalformedExpression",
        }
    }
}
