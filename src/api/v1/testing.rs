//! Router-level test harness backed by in-memory stores.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::Duration;
use tower::ServiceExt;

use crate::repos::memory::{MemoryAccountStore, MemoryUsers};
use crate::services::token::{TokenMaker, sealed::SealedMaker};
use crate::state::AppState;

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryAccountStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let tokens: Arc<dyn TokenMaker> =
            Arc::new(SealedMaker::new(b"0123456789abcdef0123456789abcdef").unwrap());
        let store = Arc::new(MemoryAccountStore::new());
        let users = MemoryUsers::default()
            .with_user("alice", "secret1")
            .with_user("bob", "secret2");

        let state = AppState::new(
            tokens,
            store.clone(),
            Arc::new(users),
            Duration::minutes(1),
        );

        Self { state, store }
    }

    pub fn router(&self) -> Router {
        crate::app::build_router(self.state.clone())
    }

    pub fn token_for(&self, username: &str) -> String {
        self.state
            .tokens
            .create_token(username, Duration::minutes(1))
            .unwrap()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = match body {
            Some(json) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => req.body(Body::empty()),
        }
        .unwrap();

        let res = self.router().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();
    let (status, body) = app.request(Method::GET, "/api/v1/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
