//! Infix-to-postfix conversion (shunting-yard)
//!
//! Reorders a token sequence into Reverse Polish order so the evaluator can
//! consume it with a single operand stack. All four operators are
//! left-associative: an incoming operator first pops every pending operator
//! of equal or greater precedence.

use crate::error::EvalError;
use crate::lexer::{Op, Token};

/// Entries on the internal operator stack. A left parenthesis acts as a
/// barrier that only a matching right parenthesis removes.
enum StackEntry {
    Op(Op),
    Paren,
}

/// Convert an infix token sequence to postfix order.
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, EvalError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut ops: Vec<StackEntry> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) | Token::Variable(_) => output.push(token),
            Token::Operator(op) => {
                while let Some(StackEntry::Op(top)) = ops.last() {
                    if top.precedence() >= op.precedence() {
                        output.push(Token::Operator(*top));
                        ops.pop();
                    } else {
                        break;
                    }
                }
                ops.push(StackEntry::Op(op));
            }
            Token::LeftParen => ops.push(StackEntry::Paren),
            Token::RightParen => loop {
                match ops.pop() {
                    Some(StackEntry::Op(op)) => output.push(Token::Operator(op)),
                    Some(StackEntry::Paren) => break,
                    None => return Err(EvalError::MismatchedParentheses),
                }
            },
        }
    }

    while let Some(entry) = ops.pop() {
        match entry {
            StackEntry::Op(op) => output.push(Token::Operator(op)),
            StackEntry::Paren => return Err(EvalError::MismatchedParentheses),
        }
    }

    Ok(output)
}
