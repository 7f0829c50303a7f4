#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use gateway_app::{MemorySessionStore, SessionEvent, SessionEvents, SharedStore};
use gateway_client::GatewayClient;
use serde_json::{Value, json};
use tokio::sync::mpsc::{self, UnboundedReceiver};

pub const TEST_USER: &str = "ada";
pub const TEST_PASSWORD: &str = "secret";
pub const ISSUED_TOKEN: &str = "jwt-issued";
pub const FREE_EMAIL: &str = "ada@example.com";
pub const REGISTERED_MSG: &str = "User registered successfully";

pub struct MockBackend {
    pub base_url: String,
    usage_hits: Arc<AtomicUsize>,
}

impl MockBackend {
    pub fn usage_hits(&self) -> usize {
        self.usage_hits.load(Ordering::SeqCst)
    }

    pub fn client(&self) -> GatewayClient {
        GatewayClient::new(self.base_url.as_str()).expect("client")
    }
}

/// Backend whose `/usage/summary` always answers with `status` and `body`.
pub async fn spawn_backend(status: StatusCode, body: Value) -> MockBackend {
    let usage_hits = Arc::new(AtomicUsize::new(0));
    let hits = usage_hits.clone();
    let router = Router::new()
        .route(
            "/usage/summary",
            get(move || {
                let hits = hits.clone();
                let body = body.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (status, Json(body))
                }
            }),
        )
        .route("/token", post(token))
        .route("/register", post(register));

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock backend");
    });

    MockBackend {
        base_url: format!("http://{addr}"),
        usage_hits,
    }
}

async fn token(Form(form): Form<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    let valid = form.get("username").map(String::as_str) == Some(TEST_USER)
        && form.get("password").map(String::as_str) == Some(TEST_PASSWORD);
    if valid {
        (
            StatusCode::OK,
            Json(json!({"access_token": ISSUED_TOKEN, "token_type": "bearer"})),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Incorrect username or password"})),
        )
    }
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body.get("email").and_then(Value::as_str) == Some(FREE_EMAIL) {
        (StatusCode::OK, Json(json!({"msg": REGISTERED_MSG})))
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Username or Email already exists"})),
        )
    }
}

/// A client pointed at a loopback port nothing listens on.
pub async fn refused_client() -> GatewayClient {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    GatewayClient::new(format!("http://{addr}")).expect("client")
}

pub fn summary_body() -> Value {
    json!({
        "total_requests": 1234,
        "total_input_tokens": 5000,
        "total_output_tokens": 7000,
        "estimated_total_cost_usd": 0.06,
        "model_usage": {
            "gpt": {"input_tokens": 3000, "output_tokens": 4000, "requests": 800},
            "claude": {"input_tokens": 1500, "output_tokens": 2500, "requests": 400},
            "llama": {"input_tokens": 500, "output_tokens": 500, "requests": 34}
        }
    })
}

pub fn store_with_token(token: &str) -> Arc<MemorySessionStore> {
    Arc::new(MemorySessionStore::with_token(token))
}

pub fn empty_store() -> Arc<MemorySessionStore> {
    Arc::new(MemorySessionStore::default())
}

pub fn shared(store: &Arc<MemorySessionStore>) -> SharedStore {
    store.clone()
}

pub fn events() -> (SessionEvents, UnboundedReceiver<SessionEvent>) {
    mpsc::unbounded_channel()
}

pub fn drain(rx: &mut UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut seen = Vec::new();
    while let Ok(event) = rx.try_recv() {
        seen.push(event);
    }
    seen
}
