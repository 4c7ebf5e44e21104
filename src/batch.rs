//! Line orchestration: assignment vs. expression dispatch
//!
//! A batch is one or more `;`-separated statements evaluated strictly in
//! order against one session's bindings. A statement is either an
//! assignment (`name = expr`, split on the first raw `=`) or a plain
//! expression. Later statements observe earlier mutations; the first
//! failure aborts the rest of the batch without rolling anything back.

use thiserror::Error;

use crate::error::EvalError;
use crate::eval::eval_postfix;
use crate::lexer::{is_valid_name, tokenize};
use crate::postfix::to_postfix;
use crate::session::Bindings;

/// The per-statement result of a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A plain expression's computed value.
    Value(f64),
    /// A completed assignment and the value that was stored.
    Assigned { name: String, value: f64 },
}

/// A statement failure, tagged with the statement text for diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("in '{statement}': {source}")]
pub struct StatementError {
    pub statement: String,
    pub source: EvalError,
}

/// Tokenize, convert and evaluate one pure expression.
fn eval_expression(expr: &str, bindings: &Bindings) -> Result<f64, EvalError> {
    let tokens = tokenize(expr)?;
    let postfix = to_postfix(tokens)?;
    eval_postfix(&postfix, bindings)
}

/// Evaluate a single statement against the given bindings.
///
/// Returns `Ok(None)` for a blank line (a no-op, not an error). An
/// assignment references the current bindings while evaluating its
/// right-hand side, so `x = x * 2` reads the old value of `x`; the binding
/// is only written on success.
pub fn evaluate_line(line: &str, bindings: &mut Bindings) -> Result<Option<Outcome>, EvalError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if let Some(eq) = line.find('=') {
        let name = line[..eq].trim();
        if !is_valid_name(name) {
            return Err(EvalError::InvalidAssignment(format!(
                "'{name}' is not a valid variable name"
            )));
        }
        let value = eval_expression(line[eq + 1..].trim(), bindings)?;
        bindings.insert(name.to_string(), value);
        return Ok(Some(Outcome::Assigned {
            name: name.to_string(),
            value,
        }));
    }

    let value = eval_expression(line, bindings)?;
    Ok(Some(Outcome::Value(value)))
}

/// Evaluate a `;`-separated batch, collecting one outcome per non-empty
/// statement in order of appearance.
pub fn evaluate_batch(input: &str, bindings: &mut Bindings) -> Result<Vec<Outcome>, StatementError> {
    let mut outcomes = Vec::new();

    for raw in input.split(';') {
        let statement = raw.trim();
        if statement.is_empty() {
            continue;
        }
        match evaluate_line(statement, bindings) {
            Ok(Some(outcome)) => outcomes.push(outcome),
            Ok(None) => {}
            Err(source) => {
                return Err(StatementError {
                    statement: statement.to_string(),
                    source,
                })
            }
        }
    }

    Ok(outcomes)
}
