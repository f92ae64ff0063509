//! Common test utilities for API tests
//!
//! Builds the full router over a fresh in-memory store, so tests need no
//! database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use serde_json::Value;
use tower::Service as _;
use vms_api::app::{build_router, AppState};
use vms_api::config::{ApiConfig, Config, JwtConfig, StoreBackend, StoreConfig};
use vms_shared::auth::jwt::{create_token, Claims, TokenType};
use vms_shared::store::{memory::MemoryStore, EntityStore};

pub const JWT_SECRET: &str = "api-test-secret-key-at-least-32-bytes";

pub struct TestContext {
    pub store: Arc<dyn EntityStore>,
    pub app: axum::Router,
    pub config: Config,

    /// Caller identity baked into `jwt_token`
    pub user_id: i64,
    pub jwt_token: String,
}

impl TestContext {
    pub fn new() -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                database_url: None,
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: JWT_SECRET.to_string(),
            },
        };

        let store: Arc<dyn EntityStore> = Arc::new(MemoryStore::new());
        let app = build_router(AppState::new(Arc::clone(&store), config.clone()));

        let user_id = 1;
        let jwt_token = token_for(user_id);

        TestContext {
            store,
            app,
            config,
            user_id,
            jwt_token,
        }
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Sends an authenticated request with an optional JSON body
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send_as(Some(&self.auth_header()), method, uri, body).await
    }

    pub async fn send_as(
        &self,
        authorization: Option<&str>,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header("authorization", value);
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        read_json(response).await
    }

    /// Creates event → job → shift and returns the IDs (job, shift)
    pub async fn seed_shift(&self, job_name: &str, date: &str, max_volunteers: i32) -> (i64, i64) {
        let (status, event) = self
            .send(
                "POST",
                "/v1/events",
                Some(serde_json::json!({
                    "name": "Open Source Event",
                    "start_date": "2012-10-22",
                    "end_date": "2012-10-23"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", event);

        let (status, job) = self
            .send(
                "POST",
                "/v1/jobs",
                Some(serde_json::json!({
                    "name": job_name,
                    "start_date": "2012-10-22",
                    "end_date": "2012-10-23",
                    "description": "",
                    "event_id": event["id"]
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", job);

        let shift_id = self.add_shift(job["id"].as_i64().unwrap(), date, max_volunteers).await;
        (job["id"].as_i64().unwrap(), shift_id)
    }

    pub async fn add_shift(&self, job_id: i64, date: &str, max_volunteers: i32) -> i64 {
        let (status, shift) = self
            .send(
                "POST",
                "/v1/shifts",
                Some(serde_json::json!({
                    "date": date,
                    "start_time": "09:00:00",
                    "end_time": "15:00:00",
                    "max_volunteers": max_volunteers,
                    "job_id": job_id
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", shift);
        shift["id"].as_i64().unwrap()
    }

    /// Creates a volunteer profile for `user_id` and returns its ID
    pub async fn add_volunteer(&self, user_id: i64, first_name: &str) -> i64 {
        let (status, volunteer) = self
            .send_as(
                Some(&format!("Bearer {}", token_for(user_id))),
                "POST",
                "/v1/volunteers",
                Some(serde_json::json!({
                    "first_name": first_name,
                    "last_name": "Tester",
                    "email": format!("{}@example.com", first_name.to_lowercase())
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", volunteer);
        volunteer["id"].as_i64().unwrap()
    }
}

pub fn token_for(user_id: i64) -> String {
    create_token(&Claims::new(user_id, TokenType::Access), JWT_SECRET).unwrap()
}

/// Reads the body as JSON; empty bodies become `Value::Null`
pub async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}
