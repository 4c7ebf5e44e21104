//! shunt - session-aware arithmetic expression engine
//!
//! # Overview
//!
//! shunt evaluates textual arithmetic expressions with the four binary
//! operators, parentheses and named variables, with conventional
//! precedence. Assignments (`name = expr`) persist across calls within a
//! named session, and a `;`-separated batch evaluates strictly left to
//! right against that session.
//!
//! The pipeline is the classic three-stage arrangement:
//!
//! ```text
//! tokenize  ->  to_postfix (shunting-yard)  ->  eval_postfix
//! ```
//!
//! with a [`SessionStore`] supplying the per-session bindings and a thin
//! service layer ([`service`]) framing requests and responses as JSON for
//! the server binary.
//!
//! # Example
//!
//! ```rust
//! use shunt::{evaluate_batch, Bindings, Outcome};
//!
//! let mut bindings = Bindings::new();
//! let outcomes = evaluate_batch("x = 2; x * 3 + 1", &mut bindings).unwrap();
//! assert_eq!(outcomes[1], Outcome::Value(7.0));
//! ```

pub mod batch;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod postfix;
pub mod service;
pub mod session;

// Re-export commonly used items
pub use batch::{evaluate_batch, evaluate_line, Outcome, StatementError};
pub use error::EvalError;
pub use eval::eval_postfix;
pub use lexer::{tokenize, Op, Token};
pub use postfix::to_postfix;
pub use service::{handle_request, CalcRequest, CalcResponse};
pub use session::{Bindings, SessionStore};

/// Convenience function to evaluate a single expression with no variables
pub fn eval(input: &str) -> Result<f64, EvalError> {
    let tokens = lexer::tokenize(input)?;
    let postfix = postfix::to_postfix(tokens)?;
    eval::eval_postfix(&postfix, &Bindings::new())
}
