//! Minimal HTTP/1.1 server standing in for the SAS archive in integration tests.
//!
//! Serves a fixed map of path -> body. Unknown paths get 404. HEAD answers
//! with the Content-Length only. When credentials are configured, every
//! request without the matching Basic header gets 401.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct ArchiveOptions {
    /// Expected `Authorization` header value, e.g. "Basic dXNlcjpwYXNz".
    pub basic_auth: Option<String>,
}

/// Handle to a running server. The server lives until the process exits.
#[derive(Clone)]
pub struct Archive {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    hits: Arc<AtomicUsize>,
}

impl Archive {
    /// Total requests served (any method, any status).
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Request lines seen so far, e.g. "GET /dr17/x.fits".
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        let line = format!("{} {}", method, path);
        self.requests().iter().filter(|r| **r == line).count()
    }
}

/// Starts a server for `files` (keys are absolute paths such as "/dr17/a.fits").
pub fn start(files: HashMap<String, Vec<u8>>) -> Archive {
    start_with_options(files, ArchiveOptions::default())
}

pub fn start_with_options(files: HashMap<String, Vec<u8>>, opts: ArchiveOptions) -> Archive {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let files = Arc::new(files);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let hits = Arc::new(AtomicUsize::new(0));
    let archive = Archive {
        base_url: format!("http://127.0.0.1:{}/", port),
        requests: Arc::clone(&requests),
        hits: Arc::clone(&hits),
    };
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let files = Arc::clone(&files);
            let requests = Arc::clone(&requests);
            let hits = Arc::clone(&hits);
            let opts = opts.clone();
            thread::spawn(move || handle(stream, &files, &opts, &requests, &hits));
        }
    });
    archive
}

fn handle(
    mut stream: TcpStream,
    files: &HashMap<String, Vec<u8>>,
    opts: &ArchiveOptions,
    requests: &Mutex<Vec<String>>,
    hits: &AtomicUsize,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path, authorization) = parse_request(request);
    // Recorded before responding so the client never observes a reply first.
    requests.lock().unwrap().push(format!("{} {}", method, path));
    hits.fetch_add(1, Ordering::SeqCst);

    if let Some(expected) = &opts.basic_auth {
        if authorization.as_deref() != Some(expected.as_str()) {
            let _ = stream.write_all(
                b"HTTP/1.1 401 Unauthorized\r\nWWW-Authenticate: Basic realm=\"SDSS\"\r\nContent-Length: 0\r\n\r\n",
            );
            return;
        }
    }

    let body = match files.get(&path) {
        Some(b) => b.as_slice(),
        None => {
            let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\n\r\nnot found");
            return;
        }
    };
    let header = format!("HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n", body.len());
    let _ = stream.write_all(header.as_bytes());
    if method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(body);
    }
}

/// Returns (method, path, Authorization header value).
fn parse_request(request: &str) -> (String, String, Option<String>) {
    let mut lines = request.lines();
    let mut first = lines.next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("").to_string();
    let path = first.next().unwrap_or("/").to_string();
    let mut authorization = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("authorization") {
                authorization = Some(value.trim().to_string());
            }
        }
    }
    (method, path, authorization)
}
