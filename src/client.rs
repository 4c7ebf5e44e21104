//! Client mode: send one request to a running calculation server
//!
//! Speaks the server's line protocol: one JSON request object per line, one
//! JSON response object back. Prints `res` on success and `error` (with the
//! kind, when present) on failure.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;

use serde_json::Value;
use shunt::CalcRequest;

/// Send `request` to the server at `addr`. Returns false if the request
/// failed or the server reported an error.
pub(crate) fn send_request(addr: &str, request: &CalcRequest) -> bool {
    let mut stream = match TcpStream::connect(addr) {
        Ok(stream) => stream,
        Err(err) => {
            eprintln!("Failed to connect to {}: {}", addr, err);
            return false;
        }
    };

    let payload = match serde_json::to_string(request) {
        Ok(payload) => payload,
        Err(err) => {
            eprintln!("Failed to encode request: {}", err);
            return false;
        }
    };
    if let Err(err) = writeln!(stream, "{}", payload) {
        eprintln!("Failed to send request: {}", err);
        return false;
    }

    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => {
            eprintln!("Server closed the connection without replying");
            false
        }
        Ok(_) => print_response(line.trim()),
        Err(err) => {
            eprintln!("Failed to read response: {}", err);
            false
        }
    }
}

fn print_response(body: &str) -> bool {
    let parsed: Value = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) => {
            eprintln!("Invalid response: {}", body);
            return false;
        }
    };

    if let Some(res) = parsed.get("res") {
        match res {
            Value::Array(entries) => {
                for entry in entries {
                    println!("{}", render_entry(entry));
                }
            }
            other => println!("{}", render_entry(other)),
        }
        true
    } else if let Some(error) = parsed.get("error") {
        match parsed.get("kind").and_then(Value::as_str) {
            Some(kind) => eprintln!("Error ({}): {}", kind, flatten(error)),
            None => eprintln!("Error: {}", flatten(error)),
        }
        false
    } else {
        eprintln!("Invalid response: {}", body);
        false
    }
}

/// Render one result entry the way the REPL would: bare numbers as-is,
/// assignment objects as `name = value`.
fn render_entry(entry: &Value) -> String {
    match entry {
        Value::Number(n) => n.to_string(),
        Value::Object(object) => {
            if let Some((name, value)) = object.iter().next() {
                format!("{} = {}", name, flatten(value))
            } else {
                entry.to_string()
            }
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn flatten(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
