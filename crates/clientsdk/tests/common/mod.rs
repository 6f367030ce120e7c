//! Local HTTP capture server for dispatcher tests.
//!
//! Records every request it receives and answers with `<query>\n<body>`.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clientsdk::{Dispatcher, DispatcherConfig};

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_str(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// Echo `<query>\n<body>` with the given status
    Echo(u16, &'static str),
    /// Promise more bytes than are sent, then hang up
    Truncated(&'static str),
}

pub struct CaptureServer {
    addr: SocketAddr,
    requests: Receiver<CapturedRequest>,
    connections: Arc<AtomicUsize>,
}

impl CaptureServer {
    pub fn start() -> Self {
        Self::start_with(Reply::Echo(200, "OK"))
    }

    pub fn start_with(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        let connections = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&connections);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                counter.fetch_add(1, Ordering::SeqCst);
                let tx = tx.clone();
                thread::spawn(move || {
                    let _ = handle(stream, reply, tx);
                });
            }
        });

        Self {
            addr,
            requests: rx,
            connections,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn next_request(&self) -> CapturedRequest {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("no request reached the capture server")
    }

    /// Number of TCP connections accepted so far, after a short settle delay
    pub fn connection_count(&self) -> usize {
        thread::sleep(Duration::from_millis(100));
        self.connections.load(Ordering::SeqCst)
    }
}

/// Dispatcher that stays quiet on stdout and ignores proxy env vars
pub fn dispatcher() -> Dispatcher {
    Dispatcher::with_config(
        DispatcherConfig::default()
            .echo_response(false)
            .use_system_proxy(false)
            .timeout_secs(10),
    )
    .unwrap()
}

fn handle(stream: TcpStream, reply: Reply, tx: Sender<CapturedRequest>) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() < 2 {
        return Ok(());
    }
    let method = parts[0].to_string();
    let (path, query) = match parts[1].split_once('?') {
        Some((p, q)) => (p.to_string(), q.to_string()),
        None => (parts[1].to_string(), String::new()),
    };

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((k, v)) = line.split_once(':') {
            headers.push((k.trim().to_string(), v.trim().to_string()));
        }
    }

    let find = |name: &str| {
        headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    };

    let body = if let Some(len) = find("content-length") {
        let len: usize = len.parse().unwrap_or(0);
        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf)?;
        buf
    } else {
        Vec::new()
    };

    let mut response_body = query.clone().into_bytes();
    response_body.push(b'\n');
    response_body.extend_from_slice(&body);

    let _ = tx.send(CapturedRequest {
        method,
        path,
        query,
        headers,
        body,
    });

    let mut stream = stream;
    match reply {
        Reply::Echo(code, reason) => {
            write!(
                stream,
                "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                code,
                reason,
                response_body.len()
            )?;
            stream.write_all(&response_body)?;
        }
        Reply::Truncated(partial) => {
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                partial.len() + 100
            )?;
            stream.write_all(partial.as_bytes())?;
        }
    }
    stream.flush()?;
    Ok(())
}
