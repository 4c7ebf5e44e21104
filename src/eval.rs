//! Stack-based evaluation of postfix token sequences
//!
//! Numbers push their value, variables push their bound value (looked up at
//! evaluation time, never substituted into the source text), operators pop
//! two operands and push the result. A well-formed sequence leaves exactly
//! one value on the stack.

use crate::error::EvalError;
use crate::lexer::Token;
use crate::session::Bindings;

/// Evaluate a postfix token sequence against the given bindings.
pub fn eval_postfix(postfix: &[Token], bindings: &Bindings) -> Result<f64, EvalError> {
    let mut values: Vec<f64> = Vec::new();

    for token in postfix {
        match token {
            Token::Number(n) => values.push(*n),
            Token::Variable(name) => {
                let value = bindings
                    .get(name)
                    .copied()
                    .ok_or_else(|| EvalError::UndefinedVariable(name.clone()))?;
                values.push(value);
            }
            Token::Operator(op) => {
                // b was pushed last; a op b.
                let b = values
                    .pop()
                    .ok_or(EvalError::InsufficientOperands(op.symbol()))?;
                let a = values
                    .pop()
                    .ok_or(EvalError::InsufficientOperands(op.symbol()))?;
                values.push(op.apply(a, b)?);
            }
            // The converter never emits parens in postfix order.
            Token::LeftParen | Token::RightParen => {
                return Err(EvalError::MalformedExpression)
            }
        }
    }

    if values.len() != 1 {
        return Err(EvalError::MalformedExpression);
    }
    Ok(values[0])
}
