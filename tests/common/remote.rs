//! HTTP stand-in for the backend project API.
//!
//! An axum router serves canned replies keyed by method and path (query
//! string ignored) and records every request target it saw.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use tokio::runtime::Runtime;

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn details(details: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: serde_json::json!({ "details": details }).to_string(),
        }
    }

    pub fn error(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Clone, Default)]
struct RemoteState {
    routes: Arc<Mutex<HashMap<(Method, String), Reply>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

pub struct FakeRemote {
    url: String,
    state: RemoteState,
    // Keeps the server task alive for the lifetime of the test.
    _runtime: Runtime,
}

impl FakeRemote {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("build fake remote runtime");

        let state = RemoteState::default();
        let app = Router::new().fallback(respond).with_state(state.clone());

        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .expect("bind fake remote");
        let url = format!("http://{}", listener.local_addr().unwrap());

        runtime.spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            url,
            state,
            _runtime: runtime,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn route(&self, method: &str, path: &str, reply: Reply) {
        let method = Method::from_bytes(method.as_bytes()).expect("valid method");
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), reply);
    }

    /// Every request seen so far, as `METHOD /path?query`
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        let prefix = format!("{method} {path}");
        self.requests()
            .iter()
            .filter(|r| **r == prefix || r.starts_with(&format!("{prefix}?")))
            .count()
    }
}

async fn respond(State(state): State<RemoteState>, method: Method, uri: Uri) -> impl IntoResponse {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);
    state
        .requests
        .lock()
        .unwrap()
        .push(format!("{method} {target}"));

    let reply = state
        .routes
        .lock()
        .unwrap()
        .get(&(method, uri.path().to_string()))
        .cloned()
        .unwrap_or_else(|| Reply::error(404, "no such route"));

    (
        StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
}
