//! Minimal HTTP/1.1 stub for exercising [`crate::GithubClient`] end to end.
//!
//! Each route holds a queue of canned responses; the last response is repeated
//! once the queue drains. Every connection serves exactly one request.

#![cfg(test)]
#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl StubResponse {
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: r#"{"message":"stub"}"#.to_string(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }
}

#[derive(Default)]
struct State {
    routes: HashMap<String, VecDeque<StubResponse>>,
    requests: Vec<(String, Vec<String>)>,
}

pub struct StubServer {
    addr: SocketAddr,
    state: Arc<Mutex<State>>,
}

impl StubServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(Mutex::new(State::default()));

        let accept_state = state.clone();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let state = accept_state.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 4096];
                    loop {
                        let n = stream.read(&mut chunk).await.unwrap_or(0);
                        if n == 0 {
                            return;
                        }
                        buf.extend_from_slice(&chunk[..n]);
                        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    let head = String::from_utf8_lossy(&buf).to_string();
                    let mut lines = head.split("\r\n");
                    let target = lines
                        .next()
                        .and_then(|line| line.split(' ').nth(1))
                        .unwrap_or("/")
                        .to_string();
                    let headers: Vec<String> = lines
                        .take_while(|l| !l.is_empty())
                        .map(|l| l.to_ascii_lowercase())
                        .collect();

                    let response = {
                        let mut state = state.lock().unwrap();
                        state.requests.push((target.clone(), headers));
                        match state.routes.get_mut(&target) {
                            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
                            Some(queue) => queue.front().cloned().unwrap(),
                            None => StubResponse::status(404),
                        }
                    };

                    let mut raw = format!(
                        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
                        response.status,
                        response.body.len()
                    );
                    for (name, value) in &response.headers {
                        raw.push_str(&format!("{name}: {value}\r\n"));
                    }
                    raw.push_str("\r\n");
                    raw.push_str(&response.body);
                    let _ = stream.write_all(raw.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self { addr, state }
    }

    /// Base URL to use as the client's API root.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Queues responses for an exact request target (path plus query).
    pub fn route(&self, target: &str, responses: Vec<StubResponse>) {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert(target.to_string(), responses.into());
    }

    /// Request targets in arrival order.
    pub fn requested(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .map(|(target, _)| target.clone())
            .collect()
    }

    /// Lower-cased header lines of the first request.
    pub fn first_request_headers(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .requests
            .first()
            .map(|(_, headers)| headers.clone())
            .unwrap_or_default()
    }
}
