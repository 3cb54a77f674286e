//! Test harness: in-process fake vaults and a control server on an ephemeral port

#![allow(dead_code)]

use axum::{body::Bytes, extract::State, http::StatusCode, routing::get, Router};
use quorumvault::common::ControlConfig;
use quorumvault::coordinator::ControlPlane;
use quorumvault::Coordinator;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// How a fake vault answers
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Serve and store the value normally
    Healthy,
    /// Answer every request with this status
    Failing(StatusCode),
    /// Answer reads with 200 and this literal body, accept writes
    Raw(&'static str),
    /// Wait this long, then behave normally
    Slow(Duration),
}

#[derive(Debug)]
struct VaultInner {
    value: Mutex<u64>,
    behavior: Mutex<Behavior>,
    hits: AtomicUsize,
}

#[derive(Debug, Clone)]
pub struct FakeVault {
    pub addr: SocketAddr,
    inner: Arc<VaultInner>,
}

impl FakeVault {
    pub async fn start(value: u64, behavior: Behavior) -> Self {
        let inner = Arc::new(VaultInner {
            value: Mutex::new(value),
            behavior: Mutex::new(behavior),
            hits: AtomicUsize::new(0),
        });
        let app = Router::new()
            .route("/", get(vault_get).post(vault_post))
            .with_state(inner.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, inner }
    }

    pub async fn healthy(value: u64) -> Self {
        Self::start(value, Behavior::Healthy).await
    }

    pub fn value(&self) -> u64 {
        *self.inner.value.lock().unwrap()
    }

    pub fn hits(&self) -> usize {
        self.inner.hits.load(Ordering::SeqCst)
    }

    pub fn set_behavior(&self, behavior: Behavior) {
        *self.inner.behavior.lock().unwrap() = behavior;
    }
}

async fn vault_get(State(inner): State<Arc<VaultInner>>) -> (StatusCode, String) {
    inner.hits.fetch_add(1, Ordering::SeqCst);
    let behavior = inner.behavior.lock().unwrap().clone();
    match behavior {
        Behavior::Healthy => (StatusCode::OK, inner.value.lock().unwrap().to_string()),
        Behavior::Failing(status) => (status, String::new()),
        Behavior::Raw(body) => (StatusCode::OK, body.to_string()),
        Behavior::Slow(delay) => {
            tokio::time::sleep(delay).await;
            (StatusCode::OK, inner.value.lock().unwrap().to_string())
        }
    }
}

async fn vault_post(State(inner): State<Arc<VaultInner>>, body: Bytes) -> StatusCode {
    inner.hits.fetch_add(1, Ordering::SeqCst);
    let behavior = inner.behavior.lock().unwrap().clone();
    if let Behavior::Slow(delay) = behavior {
        tokio::time::sleep(delay).await;
    }
    match behavior {
        Behavior::Failing(status) => status,
        _ => match std::str::from_utf8(&body).ok().and_then(|s| s.parse().ok()) {
            Some(value) => {
                *inner.value.lock().unwrap() = value;
                StatusCode::OK
            }
            None => StatusCode::BAD_REQUEST,
        },
    }
}

/// An address nothing is listening on
pub fn dead_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr.to_string()
}

pub fn addresses(vaults: &[FakeVault]) -> Vec<String> {
    vaults.iter().map(|v| v.addr.to_string()).collect()
}

pub fn total_hits(vaults: &[FakeVault]) -> usize {
    vaults.iter().map(FakeVault::hits).sum()
}

/// A running control server
pub struct Control {
    pub url: String,
    pub plane: Arc<ControlPlane>,
    pub http: reqwest::Client,
}

impl Control {
    pub async fn start(vaults: Vec<String>) -> Self {
        Self::start_with_timeout(vaults, Duration::from_secs(1)).await
    }

    pub async fn start_with_timeout(vaults: Vec<String>, timeout: Duration) -> Self {
        let config = ControlConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            vaults,
            vault_timeout_ms: timeout.as_millis() as u64,
        };
        let coord = Coordinator::new(config).unwrap();
        let plane = coord.control();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        tokio::spawn(async move {
            coord
                .serve_with_listener(listener, std::future::pending())
                .await
                .unwrap();
        });

        Self {
            url,
            plane,
            http: reqwest::Client::new(),
        }
    }

    pub async fn get(&self) -> (StatusCode, String) {
        let resp = self.http.get(&self.url).send().await.unwrap();
        let status = StatusCode::from_u16(resp.status().as_u16()).unwrap();
        (status, resp.text().await.unwrap())
    }

    pub async fn post(&self, body: &str) -> (StatusCode, String) {
        let resp = self
            .http
            .post(&self.url)
            .body(body.to_string())
            .send()
            .await
            .unwrap();
        let status = StatusCode::from_u16(resp.status().as_u16()).unwrap();
        (status, resp.text().await.unwrap())
    }
}
