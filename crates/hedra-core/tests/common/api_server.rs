//! Minimal HTTP/1.1 server that replays a script of responses, for
//! integration tests against the upstream client.
//!
//! Each incoming POST consumes the next scripted `(status, body)` pair; once
//! the script is exhausted the last pair repeats. Requests are counted so
//! tests can assert attempt totals.

use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// Starts a server in a background thread. Returns the base URL
/// (e.g. "http://127.0.0.1:12345") and the request counter. The server
/// runs until the process exits.
pub fn start(script: Vec<(u32, String)>) -> (String, Arc<AtomicU32>) {
    assert!(!script.is_empty(), "script must have at least one response");
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicU32::new(0));
    let hits_srv = Arc::clone(&hits);
    let queue = Arc::new(Mutex::new(script.into_iter().collect::<VecDeque<_>>()));
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let queue = Arc::clone(&queue);
            let hits = Arc::clone(&hits_srv);
            thread::spawn(move || {
                hits.fetch_add(1, Ordering::SeqCst);
                let response = {
                    let mut q = queue.lock().unwrap();
                    if q.len() > 1 {
                        q.pop_front().unwrap()
                    } else {
                        q.front().cloned().unwrap()
                    }
                };
                handle(stream, response);
            });
        }
    });
    (format!("http://127.0.0.1:{}", port), hits)
}

fn handle(mut stream: std::net::TcpStream, (status, body): (u32, String)) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    // Drain headers plus Content-Length bytes of body before responding.
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    let (mut header_end, mut content_length) = (None, 0usize);
    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(_) => break,
        }
        if header_end.is_none() {
            if let Some(pos) = find_header_end(&buf) {
                header_end = Some(pos);
                content_length = parse_content_length(&buf[..pos]);
            }
        }
        if let Some(pos) = header_end {
            if buf.len() >= pos + content_length {
                break;
            }
        }
    }

    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        413 => "Payload Too Large",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Error",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|p| p + 4)
}

fn parse_content_length(headers: &[u8]) -> usize {
    let text = String::from_utf8_lossy(headers);
    text.lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

/// JSON body of a successful generateContent response with one text part.
pub fn candidates_body(text: &str) -> String {
    format!(
        r#"{{"candidates":[{{"content":{{"parts":[{{"text":"{}"}}]}}}}]}}"#,
        text
    )
}
