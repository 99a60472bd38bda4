//! In-process mock of the build service and presigned storage.
//!
//! Runs an axum server on a random port in a background thread with its own
//! runtime, so it serves both `#[tokio::test]` tests and blocking
//! `assert_cmd` runs. Every request is recorded; responses are scripted per
//! `(method, path)` and the last scripted response for a route repeats.

#![allow(dead_code)]

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::IntoResponse,
};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One request as the mock saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
struct Scripted {
    status: u16,
    body: String,
    delay: Duration,
}

#[derive(Default)]
struct Inner {
    routes: HashMap<(String, String), VecDeque<Scripted>>,
    requests: Vec<Recorded>,
}

type Shared = Arc<Mutex<Inner>>;

/// Handle to a running mock service
pub struct MockService {
    pub addr: SocketAddr,
    state: Shared,
}

impl MockService {
    pub fn start() -> Self {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        let state: Shared = Arc::new(Mutex::new(Inner::default()));
        let app = Router::new().fallback(handle).with_state(state.clone());

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                axum::serve(listener, app).await
            })
            .unwrap();
        });

        Self { addr, state }
    }

    /// `http://127.0.0.1:<port><path>`
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Script a response; repeated calls for the same route queue up
    pub fn respond(&self, method: &str, path: &str, status: u16, body: impl Into<String>) -> &Self {
        self.respond_after(method, path, status, body, Duration::ZERO)
    }

    pub fn respond_json(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.respond(method, path, status, body.to_string())
    }

    pub fn respond_after(
        &self,
        method: &str,
        path: &str,
        status: u16,
        body: impl Into<String>,
        delay: Duration,
    ) -> &Self {
        self.state
            .lock()
            .unwrap()
            .routes
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back(Scripted {
                status,
                body: body.into(),
                delay,
            });
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

async fn handle(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let recorded = Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers: headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect(),
        body: body.to_vec(),
    };

    let scripted = {
        let mut inner = state.lock().unwrap();
        let key = (recorded.method.clone(), recorded.path.clone());
        inner.requests.push(recorded);
        match inner.routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        }
    };

    let scripted = scripted.unwrap_or(Scripted {
        status: 404,
        body: "no route".to_string(),
        delay: Duration::ZERO,
    });
    if !scripted.delay.is_zero() {
        tokio::time::sleep(scripted.delay).await;
    }

    (
        StatusCode::from_u16(scripted.status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        scripted.body,
    )
}
