//! shunt - session-aware arithmetic calculator
//!
//! Usage:
//!   shunt                  Start interactive REPL
//!   shunt -e "x = 1; x+1"  Evaluate a batch and exit
//!   shunt serve            Run the calculation server
//!   shunt --connect ADDR   Talk to a running server

use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use shunt::{evaluate_batch, CalcRequest, Outcome, SessionStore};

mod cli;
mod client;
mod repl;
mod server;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let cli = cli::parse_args(&args);

    if cli.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if cli.version {
        println!("shunt {}", VERSION);
        return ExitCode::SUCCESS;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if cli.serve {
        return match server::serve(&cli.addr) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("Server error: {}", err);
                ExitCode::FAILURE
            }
        };
    }

    if let Some(addr) = cli.connect.as_deref() {
        let request = CalcRequest {
            user: Some(cli.user.clone()),
            exp: cli.expression.clone(),
            cmd: cli.command.clone(),
        };
        if request.exp.is_none() && request.cmd.is_none() {
            eprintln!("Nothing to send: use -e <expression> or -c <command>");
            return ExitCode::FAILURE;
        }
        return if client::send_request(addr, &request) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    if let Some(expression) = cli.expression.as_deref() {
        return run_once(expression);
    }

    let store = SessionStore::new();
    match repl::run_repl(&store, &cli.user) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Evaluate one batch against a fresh session and print the outcomes.
fn run_once(expression: &str) -> ExitCode {
    let store = SessionStore::new();
    let session = store.get_or_create("local");
    let mut bindings = session.lock().unwrap();

    match evaluate_batch(expression, &mut bindings) {
        Ok(outcomes) => {
            for outcome in outcomes {
                match outcome {
                    Outcome::Value(value) => println!("{}", value),
                    Outcome::Assigned { name, value } => println!("{} = {}", name, value),
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
