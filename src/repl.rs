//! Interactive calculator REPL

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use shunt::{evaluate_batch, Outcome, SessionStore};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the interactive loop against one session of the given store.
pub(crate) fn run_repl(store: &SessionStore, user: &str) -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    println!("shunt {} (enter 'exit' to quit, 'clear' to reset variables)", VERSION);

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                match input {
                    "exit" | "quit" => break,
                    "clear" => {
                        store.clear(user);
                        println!("cleared");
                        continue;
                    }
                    _ => {}
                }

                let session = store.get_or_create(user);
                let mut bindings = session.lock().unwrap();
                match evaluate_batch(input, &mut bindings) {
                    Ok(outcomes) => {
                        for outcome in outcomes {
                            match outcome {
                                Outcome::Value(value) => println!("= {}", value),
                                Outcome::Assigned { name, value } => {
                                    println!("{} = {}", name, value)
                                }
                            }
                        }
                    }
                    Err(err) => eprintln!("Error: {}", err),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C clears the current line, not the session
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    Ok(())
}
