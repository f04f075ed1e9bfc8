//! In-process stand-in for the laundry API, served by axum on a private runtime.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::process::{Command, Output};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::{RwLock, oneshot};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeenBooking {
    pub name: String,
    pub wing: String,
    pub duration: String,
}

#[derive(Debug)]
pub struct StubState {
    /// `/status` bodies served in order; the last one repeats.
    statuses: VecDeque<Value>,
    status_code: StatusCode,
    healthy: bool,
    logs: String,
    bookings: Vec<SeenBooking>,
    status_calls: usize,
}

impl Default for StubState {
    fn default() -> Self {
        Self {
            statuses: VecDeque::from([json!({ "machines": [], "queue": [] })]),
            status_code: StatusCode::OK,
            healthy: true,
            logs: String::new(),
            bookings: Vec::new(),
            status_calls: 0,
        }
    }
}

type Shared = Arc<RwLock<StubState>>;

pub struct StubServer {
    pub base_url: String,
    state: Shared,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl StubServer {
    pub fn set_status(&self, body: Value) {
        let mut s = self.state.blocking_write();
        s.statuses = VecDeque::from([body]);
        s.status_code = StatusCode::OK;
    }

    pub fn script_statuses(&self, bodies: impl IntoIterator<Item = Value>) {
        let mut s = self.state.blocking_write();
        s.statuses = bodies.into_iter().collect();
        s.status_code = StatusCode::OK;
    }

    pub fn fail_status(&self, code: StatusCode) {
        self.state.blocking_write().status_code = code;
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.state.blocking_write().healthy = healthy;
    }

    pub fn set_logs(&self, logs: &str) {
        self.state.blocking_write().logs = logs.to_string();
    }

    pub fn bookings(&self) -> Vec<SeenBooking> {
        self.state.blocking_read().bookings.clone()
    }

    pub fn status_calls(&self) -> usize {
        self.state.blocking_read().status_calls
    }
}

pub fn spawn_stub() -> Result<StubServer> {
    let state: Shared = Arc::new(RwLock::new(StubState::default()));
    let (addr_tx, addr_rx) = std::sync::mpsc::channel::<Result<SocketAddr, String>>();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = router(state.clone());
    let thread = thread::Builder::new()
        .name("stub-api".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(err) => {
                    let _ = addr_tx.send(Err(format!("build runtime: {}", err)));
                    return;
                }
            };
            rt.block_on(async move {
                let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
                    Ok(l) => l,
                    Err(err) => {
                        let _ = addr_tx.send(Err(format!("bind: {}", err)));
                        return;
                    }
                };
                let addr = listener.local_addr().map_err(|e| e.to_string());
                let _ = addr_tx.send(addr);
                let _ = axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await;
            });
        })
        .context("spawn stub server thread")?;

    let addr = addr_rx
        .recv_timeout(Duration::from_secs(5))
        .context("stub server did not report its address")?
        .map_err(anyhow::Error::msg)?;

    Ok(StubServer {
        base_url: format!("http://{}", addr),
        state,
        shutdown: Some(shutdown_tx),
        thread: Some(thread),
    })
}

/// A base URL nothing listens on.
pub fn dead_base_url() -> Result<String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").context("bind probe port")?;
    let addr = listener.local_addr().context("probe port addr")?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/book", post(book))
        .route("/logs", get(logs))
        .with_state(state)
}

async fn health(State(state): State<Shared>) -> StatusCode {
    if state.read().await.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn status(State(state): State<Shared>) -> Response {
    let mut s = state.write().await;
    s.status_calls += 1;
    if s.status_code != StatusCode::OK {
        return (s.status_code, "internal error").into_response();
    }
    let body = if s.statuses.len() > 1 {
        s.statuses.pop_front()
    } else {
        s.statuses.front().cloned()
    };
    Json(body.unwrap_or(Value::Null)).into_response()
}

async fn book(State(state): State<Shared>, Query(q): Query<HashMap<String, String>>) -> Response {
    let field = |k: &str| q.get(k).cloned().unwrap_or_default();
    let seen = SeenBooking {
        name: field("name"),
        wing: field("wing"),
        duration: field("duration"),
    };

    let missing: Vec<&str> = [
        ("name", &seen.name),
        ("wing", &seen.wing),
        ("duration", &seen.duration),
    ]
    .into_iter()
    .filter(|(_, v)| v.is_empty())
    .map(|(k, _)| k)
    .collect();
    let full = seen.wing == "full";

    state.write().await.bookings.push(seen);

    if !missing.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            format!("Missing params: {}", missing.join(",")),
        )
            .into_response();
    }
    if full {
        return (StatusCode::CONFLICT, "Wing is full").into_response();
    }
    Json(json!({ "ok": true })).into_response()
}

async fn logs(State(state): State<Shared>, Query(q): Query<HashMap<String, String>>) -> String {
    let n = q
        .get("n")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(50);
    let s = state.read().await;
    let lines: Vec<&str> = s.logs.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..]
        .iter()
        .map(|l| format!("{}\n", l))
        .collect()
}

pub fn run_washq(args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_washq"))
        .args(args)
        .env_remove("WASHQ_API_BASE")
        .env_remove("RUST_LOG")
        .output()
        .with_context(|| format!("run washq {:?}", args))
}

pub fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

pub fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

pub fn machine(id: u64, busy: bool, user: &str, wing: &str, remaining: i64) -> Value {
    json!({ "id": id, "busy": busy, "user": user, "wing": wing, "remaining": remaining })
}

pub fn queued(name: &str, wing: &str, duration: u64, seq: u64) -> Value {
    json!({ "name": name, "wing": wing, "duration": duration, "seq": seq })
}
