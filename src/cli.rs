//! Command-line argument handling for the shunt binary

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed command-line arguments
pub(crate) struct CliArgs {
    /// Run as a server (`serve` subcommand)
    pub(crate) serve: bool,
    /// Address to bind (serve) or connect to (client)
    pub(crate) addr: String,
    /// Send requests to a running server instead of evaluating locally
    pub(crate) connect: Option<String>,
    /// One-shot expression batch (-e)
    pub(crate) expression: Option<String>,
    /// Command to send, e.g. "clean" (-c)
    pub(crate) command: Option<String>,
    /// Session key (-u)
    pub(crate) user: String,
    pub(crate) help: bool,
    pub(crate) version: bool,
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs {
        serve: false,
        addr: "127.0.0.1:8080".to_string(),
        connect: None,
        expression: None,
        command: None,
        user: "default".to_string(),
        help: false,
        version: false,
    };

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "serve" => {
                cli.serve = true;
            }
            "--addr" => {
                if i + 1 < args.len() {
                    cli.addr = args[i + 1].clone();
                    i += 1;
                }
            }
            "--connect" => {
                if i + 1 < args.len() {
                    cli.connect = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "-u" | "--user" => {
                if i + 1 < args.len() {
                    cli.user = args[i + 1].clone();
                    i += 1;
                }
            }
            "-c" => {
                if i + 1 < args.len() {
                    cli.command = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "-e" => {
                // Everything after -e is the expression batch
                if i + 1 < args.len() {
                    cli.expression = Some(args[i + 1..].join(" "));
                    break;
                }
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            _ => {}
        }
        i += 1;
    }

    cli
}

pub(crate) fn print_help() {
    println!(
        r#"shunt {} - session-aware arithmetic calculator

USAGE:
    shunt                         Start interactive REPL
    shunt -e <expression>         Evaluate a batch and exit
    shunt serve [--addr A]        Run the calculation server
    shunt --connect A -e <expr>   Send a batch to a running server
    shunt --connect A -c clean    Reset a session on a running server
    shunt --help                  Show this help message
    shunt --version               Show version

OPTIONS:
    -u, --user <name>       Session key (default: "default")
    --addr <host:port>      Bind address for serve (default: 127.0.0.1:8080)
    --connect <host:port>   Server address for client mode

EXPRESSIONS:
    2 + 3 * 4               Conventional precedence (= 14)
    (2 + 3) * 4             Parentheses override (= 20)
    x = 5; x * 2            Assignments persist within the session
    8 - 3 - 2               Left-associative (= 3)

Statements are separated by ';' and evaluated strictly in order. The
first failing statement aborts the rest of its batch; assignments
already applied stay applied.
"#,
        VERSION
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        let args: Vec<String> = std::iter::once("shunt")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        parse_args(&args)
    }

    #[test]
    fn no_args_means_repl() {
        let cli = parse(&[]);
        assert!(!cli.serve);
        assert!(cli.expression.is_none());
        assert_eq!(cli.user, "default");
    }

    #[test]
    fn expression_joins_remaining_args() {
        let cli = parse(&["-e", "2", "+", "3"]);
        assert_eq!(cli.expression.as_deref(), Some("2 + 3"));
    }

    #[test]
    fn serve_with_addr() {
        let cli = parse(&["serve", "--addr", "0.0.0.0:9000"]);
        assert!(cli.serve);
        assert_eq!(cli.addr, "0.0.0.0:9000");
    }

    #[test]
    fn client_flags() {
        let cli = parse(&["--connect", "localhost:8080", "-u", "alice", "-c", "clean"]);
        assert_eq!(cli.connect.as_deref(), Some("localhost:8080"));
        assert_eq!(cli.user, "alice");
        assert_eq!(cli.command.as_deref(), Some("clean"));
    }

    #[test]
    fn user_before_expression() {
        let cli = parse(&["-u", "bob", "-e", "x = 1"]);
        assert_eq!(cli.user, "bob");
        assert_eq!(cli.expression.as_deref(), Some("x = 1"));
    }
}
