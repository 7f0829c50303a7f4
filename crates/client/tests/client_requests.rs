mod support;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use gateway_client::{ClientError, GatewayClient};
use gateway_core::RegisterRequest;
use serde_json::{Value, json};

fn summary_body() -> Value {
    json!({
        "total_requests": 42,
        "total_input_tokens": 1000,
        "total_output_tokens": 2000,
        "estimated_total_cost_usd": 0.015,
        "model_usage": {
            "gpt": {"input_tokens": 600, "output_tokens": 1500, "requests": 30},
            "llama": {"input_tokens": 400, "output_tokens": 500, "requests": 12}
        }
    })
}

#[tokio::test]
async fn usage_summary_sends_bearer_token() {
    let seen_auth = Arc::new(Mutex::new(None::<String>));
    let captured = seen_auth.clone();
    let router = Router::new().route(
        "/usage/summary",
        get(move |headers: HeaderMap| {
            let captured = captured.clone();
            async move {
                let auth = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string);
                *captured.lock().expect("lock") = auth;
                (StatusCode::OK, Json(summary_body()))
            }
        }),
    );
    let base_url = support::spawn_backend(router).await;
    let client = GatewayClient::new(base_url).expect("client");

    let summary = client
        .usage_summary("tok-123")
        .await
        .expect("summary")
        .expect("summary present");

    assert_eq!(summary.total_requests, 42);
    assert_eq!(summary.model_usage["llama"].requests, 12);
    assert_eq!(
        seen_auth.lock().expect("lock").as_deref(),
        Some("Bearer tok-123")
    );
}

#[tokio::test]
async fn usage_summary_null_body_is_none() {
    let router = Router::new().route(
        "/usage/summary",
        get(|| async { (StatusCode::OK, Json(Value::Null)) }),
    );
    let base_url = support::spawn_backend(router).await;
    let client = GatewayClient::new(base_url).expect("client");

    let summary = client.usage_summary("tok").await.expect("summary");
    assert!(summary.is_none());
}

#[tokio::test]
async fn error_status_carries_parsed_detail() {
    let router = Router::new().route(
        "/usage/summary",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": "boom"})),
            )
        }),
    );
    let base_url = support::spawn_backend(router).await;
    let client = GatewayClient::new(base_url).expect("client");

    let err = client.usage_summary("tok").await.expect_err("error");
    match &err {
        ClientError::Status { status, detail } => {
            assert_eq!(*status, 500);
            assert_eq!(detail, &json!({"detail": "boom"}));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!err.forces_logout());
    assert!(err.failure_class().expect("class").retryable);
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let router = Router::new().route(
        "/usage/summary",
        get(|| async { (StatusCode::OK, Json(json!({"total_requests": "many"}))) }),
    );
    let base_url = support::spawn_backend(router).await;
    let client = GatewayClient::new(base_url).expect("client");

    let err = client.usage_summary("tok").await.expect_err("error");
    assert!(matches!(err, ClientError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let base_url = support::refused_base_url().await;
    let client = GatewayClient::new(base_url).expect("client");

    let err = client.usage_summary("tok").await.expect_err("error");
    assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
    assert!(err.status().is_none());
}

#[tokio::test]
async fn login_posts_form_credentials() {
    let router = Router::new().route(
        "/token",
        post(|Form(form): Form<HashMap<String, String>>| async move {
            let valid = form.get("username").map(String::as_str) == Some("ada")
                && form.get("password").map(String::as_str) == Some("secret");
            if valid {
                (
                    StatusCode::OK,
                    Json(json!({"access_token": "jwt-abc", "token_type": "bearer"})),
                )
            } else {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"detail": "Incorrect username or password"})),
                )
            }
        }),
    );
    let base_url = support::spawn_backend(router).await;
    let client = GatewayClient::new(base_url).expect("client");

    let token = client.login("ada", "secret").await.expect("token");
    assert_eq!(token.access_token, "jwt-abc");
    assert_eq!(token.token_type, "bearer");

    let err = client.login("ada", "wrong").await.expect_err("rejected");
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn register_posts_json_body() {
    let router = Router::new().route(
        "/register",
        post(|Json(body): Json<Value>| async move {
            if body["email"] == "ada@example.com" {
                (
                    StatusCode::OK,
                    Json(json!({"msg": "User registered successfully"})),
                )
            } else {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"detail": "Username or Email already exists"})),
                )
            }
        }),
    );
    let base_url = support::spawn_backend(router).await;
    let client = GatewayClient::new(format!("{base_url}/")).expect("client");

    let response = client
        .register(&RegisterRequest {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .expect("register");
    assert_eq!(response.msg, "User registered successfully");
}
