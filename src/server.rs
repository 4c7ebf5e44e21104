//! Line-delimited JSON calculation server over TCP
//!
//! One request object per line, one response object per line. Connections
//! are handled on their own threads against a shared [`SessionStore`], so
//! batches for the same session key serialize on that session's lock while
//! other sessions proceed independently.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use serde_json::json;
use tracing::{debug, info, warn};

use shunt::{handle_request, CalcRequest, CalcResponse, SessionStore};

/// Bind `addr` and serve until the process is terminated.
pub(crate) fn serve(addr: &str) -> io::Result<()> {
    let store = Arc::new(SessionStore::new());
    let listener = TcpListener::bind(addr)?;
    info!(%addr, "calculation server listening");

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    if let Err(err) = handle_connection(stream, &store) {
                        warn!("connection error: {}", err);
                    }
                });
            }
            Err(err) => warn!("accept failed: {}", err),
        }
    }

    Ok(())
}

fn handle_connection(stream: TcpStream, store: &SessionStore) -> io::Result<()> {
    let peer = stream.peer_addr()?;
    info!(%peer, "client connected");

    let reader = BufReader::new(stream.try_clone()?);
    let mut writer = stream;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<CalcRequest>(line) {
            Ok(request) => {
                debug!(%peer, user = request.user.as_deref().unwrap_or(""), "request");
                handle_request(store, &request)
            }
            Err(err) => CalcResponse {
                status: 400,
                body: json!({ "error": format!("invalid request: {err}") }),
            },
        };
        if response.status != 200 {
            warn!(%peer, status = response.status, body = %response.body, "request failed");
        }

        serde_json::to_writer(&mut writer, &response.body)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    info!(%peer, "client disconnected");
    Ok(())
}
