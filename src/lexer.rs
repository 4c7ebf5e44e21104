//! Tokenization for shunt expressions
//!
//! Tokens are the shared vocabulary between the tokenizer, the
//! infix-to-postfix converter and the evaluator. The scanner walks the line
//! left to right with two mutually exclusive accumulation buffers (numeral
//! and identifier), flushed whenever a non-matching character, whitespace or
//! end of input is reached.

use crate::error::EvalError;

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub fn from_char(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Add),
            '-' => Some(Op::Sub),
            '*' => Some(Op::Mul),
            '/' => Some(Op::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }

    /// Binding strength: `*` and `/` bind tighter than `+` and `-`.
    pub fn precedence(&self) -> u8 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
        }
    }

    /// Apply the operator to `a op b`. Division by exactly `0.0` is an
    /// error rather than a silent infinity.
    pub fn apply(&self, a: f64, b: f64) -> Result<f64, EvalError> {
        match self {
            Op::Add => Ok(a + b),
            Op::Sub => Ok(a - b),
            Op::Mul => Ok(a * b),
            Op::Div => {
                if b == 0.0 {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(a / b)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A numeric literal. Always finite: the tokenizer rejects malformed
    /// numerals instead of admitting NaN or infinity.
    Number(f64),
    /// One of the four binary operators.
    Operator(Op),
    /// Opening parenthesis.
    LeftParen,
    /// Closing parenthesis.
    RightParen,
    /// A variable reference, resolved against the session bindings at
    /// evaluation time.
    Variable(String),
}

/// True if `name` is a lexically valid variable name: non-empty, ASCII
/// letters/digits/underscore, not starting with a digit.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Tokenize a single expression.
///
/// A `-` counts as numeric negation only at the start of the line or
/// immediately after `(`; there it flags the next numeral as negative
/// instead of emitting an operator token. A `=` never belongs inside a pure
/// expression (the orchestrator consumes the assignment separator before
/// tokenizing) and is rejected outright.
pub fn tokenize(expr: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut num_buf = String::new();
    let mut ident_buf = String::new();
    let mut negative = false;

    let chars: Vec<char> = expr.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c == '-' && (i == 0 || chars[i - 1] == '(') {
            negative = true;
            continue;
        }

        if c.is_ascii_digit() {
            if ident_buf.is_empty() {
                num_buf.push(c);
            } else {
                // Digits continue an identifier: x1, tmp2, ...
                ident_buf.push(c);
            }
            continue;
        }

        if c == '.' {
            flush_ident(&mut ident_buf, &mut tokens);
            num_buf.push(c);
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            flush_number(&mut num_buf, &mut negative, &mut tokens)?;
            ident_buf.push(c);
            continue;
        }

        // Anything else is a flush boundary for both buffers.
        flush_number(&mut num_buf, &mut negative, &mut tokens)?;
        flush_ident(&mut ident_buf, &mut tokens);

        if c.is_whitespace() {
            continue;
        }

        if let Some(op) = Op::from_char(c) {
            tokens.push(Token::Operator(op));
        } else if c == '(' {
            tokens.push(Token::LeftParen);
        } else if c == ')' {
            tokens.push(Token::RightParen);
        } else if c == '=' {
            return Err(EvalError::InvalidAssignment(
                "unexpected '=' inside expression".into(),
            ));
        } else {
            return Err(EvalError::InvalidCharacter(c));
        }
    }

    flush_number(&mut num_buf, &mut negative, &mut tokens)?;
    flush_ident(&mut ident_buf, &mut tokens);

    Ok(tokens)
}

fn flush_number(
    num_buf: &mut String,
    negative: &mut bool,
    tokens: &mut Vec<Token>,
) -> Result<(), EvalError> {
    if num_buf.is_empty() {
        return Ok(());
    }
    let parsed: f64 = num_buf
        .parse()
        .map_err(|_| EvalError::MalformedNumber(num_buf.clone()))?;
    // An overlong digit string parses to infinity; reject it the same way.
    if !parsed.is_finite() {
        return Err(EvalError::MalformedNumber(num_buf.clone()));
    }
    let value = if *negative { -parsed } else { parsed };
    *negative = false;
    num_buf.clear();
    tokens.push(Token::Number(value));
    Ok(())
}

fn flush_ident(ident_buf: &mut String, tokens: &mut Vec<Token>) {
    if !ident_buf.is_empty() {
        tokens.push(Token::Variable(std::mem::take(ident_buf)));
    }
}
