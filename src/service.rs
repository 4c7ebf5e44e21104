//! Request/response framing for the calculation service
//!
//! Transport-agnostic: the TCP server and the CLI client both speak in
//! [`CalcRequest`] / [`CalcResponse`] values, serialized as JSON. A request
//! names a session (`user`) and carries either a `;`-separated expression
//! batch (`exp`) or a command (`cmd`, currently only `"clean"`).
//!
//! Response bodies:
//! `{"res": [...]}` with one entry per outcome (a bare number for a value,
//! a single-key object for an assignment), `{"res": "OK"}` for a clean, and
//! `{"error": ..., "kind": ...}` with a 400 status for any failure.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::batch::{evaluate_batch, Outcome};
use crate::session::SessionStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalcRequest {
    /// Session key. Required; its absence is rejected at this boundary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// A `;`-separated batch of statements to evaluate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<String>,
    /// A command; `"clean"` resets the session's bindings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
}

/// A response body plus the transport status it should map to.
#[derive(Debug, Clone, PartialEq)]
pub struct CalcResponse {
    pub status: u16,
    pub body: Value,
}

impl CalcResponse {
    fn ok(body: Value) -> Self {
        CalcResponse { status: 200, body }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        CalcResponse {
            status: 400,
            body: json!({ "error": message.into() }),
        }
    }
}

fn outcome_to_json(outcome: &Outcome) -> Value {
    match outcome {
        Outcome::Value(v) => json!(v),
        Outcome::Assigned { name, value } => {
            let mut object = serde_json::Map::new();
            object.insert(name.clone(), json!(value));
            Value::Object(object)
        }
    }
}

/// Handle one request against the store.
///
/// The session lock is held for the whole batch, so concurrent requests for
/// the same user never interleave mid-batch while other users' requests
/// proceed untouched.
pub fn handle_request(store: &SessionStore, request: &CalcRequest) -> CalcResponse {
    let user = match request.user.as_deref() {
        Some(user) if !user.is_empty() => user,
        _ => return CalcResponse::bad_request("user is required"),
    };

    // A command wins over an expression when both are present.
    if let Some(cmd) = request.cmd.as_deref() {
        return match cmd {
            "clean" => {
                store.clear(user);
                CalcResponse::ok(json!({ "res": "OK" }))
            }
            other => CalcResponse::bad_request(format!("unknown command '{other}'")),
        };
    }

    let Some(exp) = request.exp.as_deref() else {
        return CalcResponse::bad_request("request must contain 'exp' or 'cmd'");
    };

    let session = store.get_or_create(user);
    let mut bindings = session.lock().unwrap();
    match evaluate_batch(exp, &mut bindings) {
        Ok(outcomes) => {
            if outcomes.is_empty() {
                return CalcResponse::bad_request("no expressions provided");
            }
            let entries: Vec<Value> = outcomes.iter().map(outcome_to_json).collect();
            CalcResponse::ok(json!({ "res": entries }))
        }
        Err(err) => CalcResponse {
            status: 400,
            body: json!({ "error": err.to_string(), "kind": err.source.kind() }),
        },
    }
}
