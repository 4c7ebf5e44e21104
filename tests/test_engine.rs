//! Integration tests for the full evaluation pipeline

use shunt::{
    eval, evaluate_batch, evaluate_line, handle_request, Bindings, CalcRequest, EvalError,
    Outcome, SessionStore,
};

#[test]
fn test_precedence() {
    assert_eq!(eval("2 + 3 * 4").unwrap(), 14.0);
}

#[test]
fn test_left_associativity() {
    assert_eq!(eval("8 - 3 - 2").unwrap(), 3.0);
}

#[test]
fn test_parentheses() {
    assert_eq!(eval("(2 + 3) * 4").unwrap(), 20.0);
}

#[test]
fn test_leading_negative() {
    assert_eq!(eval("-5 + 3").unwrap(), -2.0);
    assert_eq!(eval("(-5 + 3)").unwrap(), -2.0);
}

#[test]
fn test_nested_parens() {
    assert_eq!(eval("((1 + 2) * (3 + 4))").unwrap(), 21.0);
}

#[test]
fn test_division_by_zero() {
    assert_eq!(eval("10 / 0"), Err(EvalError::DivisionByZero));
}

#[test]
fn test_mismatched_parens_both_ways() {
    assert_eq!(eval("(1 + 2"), Err(EvalError::MismatchedParentheses));
    assert_eq!(eval("1 + 2)"), Err(EvalError::MismatchedParentheses));
}

#[test]
fn test_undefined_then_defined_variable() {
    let mut bindings = Bindings::new();
    let err = evaluate_line("x + 1", &mut bindings).unwrap_err();
    assert_eq!(err, EvalError::UndefinedVariable("x".to_string()));

    evaluate_line("x = 5", &mut bindings).unwrap();
    let outcome = evaluate_line("x + 1", &mut bindings).unwrap();
    assert_eq!(outcome, Some(Outcome::Value(6.0)));
}

#[test]
fn test_batch_outcomes_in_order() {
    let mut bindings = Bindings::new();
    let outcomes = evaluate_batch("x = 1; y = x + 1; y * 2", &mut bindings).unwrap();
    assert_eq!(
        outcomes,
        vec![
            Outcome::Assigned {
                name: "x".to_string(),
                value: 1.0
            },
            Outcome::Assigned {
                name: "y".to_string(),
                value: 2.0
            },
            Outcome::Value(4.0),
        ]
    );
}

#[test]
fn test_partial_failure_keeps_prior_assignments() {
    let store = SessionStore::new();
    let session = store.get_or_create("alice");

    {
        let mut bindings = session.lock().unwrap();
        let err = evaluate_batch("x = 1; 1/0; x + 100", &mut bindings).unwrap_err();
        assert_eq!(err.source, EvalError::DivisionByZero);
    }

    // A fresh batch against the same session still sees x == 1.
    let mut bindings = session.lock().unwrap();
    let outcomes = evaluate_batch("x + 1", &mut bindings).unwrap();
    assert_eq!(outcomes, vec![Outcome::Value(2.0)]);
}

#[test]
fn test_clear_then_undefined() {
    let store = SessionStore::new();
    {
        let session = store.get_or_create("alice");
        let mut bindings = session.lock().unwrap();
        evaluate_batch("x = 5", &mut bindings).unwrap();
    }

    store.clear("alice");

    let session = store.get_or_create("alice");
    let mut bindings = session.lock().unwrap();
    let err = evaluate_batch("x + 1", &mut bindings).unwrap_err();
    assert_eq!(err.source, EvalError::UndefinedVariable("x".to_string()));
}

#[test]
fn test_service_round_trip() {
    let store = SessionStore::new();

    let request = CalcRequest {
        user: Some("alice".to_string()),
        exp: Some("x = 2; x * x + 1".to_string()),
        cmd: None,
    };
    let response = handle_request(&store, &request);
    assert_eq!(response.status, 200);
    assert_eq!(
        response.body,
        serde_json::json!({ "res": [{ "x": 2.0 }, 5.0] })
    );
}

#[test]
fn test_error_leaves_session_usable() {
    let store = SessionStore::new();
    let session = store.get_or_create("alice");
    let mut bindings = session.lock().unwrap();

    assert!(evaluate_batch("x = 1; 2 % 3", &mut bindings).is_err());
    // Errors are recoverable: the bindings stay valid afterwards.
    let outcomes = evaluate_batch("x * 10", &mut bindings).unwrap();
    assert_eq!(outcomes, vec![Outcome::Value(10.0)]);
}
