//! Shared test helpers for integration tests.
//!
//! Every test gets its own router over a fresh in-memory store and a no-op
//! image storage, so tests run in parallel without a database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use inspecthub_api::{AppState, build_app};
use inspecthub_core::config::AppConfig;
use inspecthub_core::traits::clock::SystemClock;
use inspecthub_database::{MemoryStore, Stores};
use inspecthub_storage::NoopImageStorage;

/// Signing secret of the test configuration.
pub const JWT_SECRET: &str = "integration-tests-secret-0123456789abcdef";

/// Password used by the `customer`/`pilot` shortcuts.
pub const PASSWORD: &str = "pw1";

const MULTIPART_BOUNDARY: &str = "inspecthub-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The storage double, to inspect accepted uploads
    pub storage: Arc<NoopImageStorage>,
    /// Application config
    pub config: AppConfig,
}

/// Response captured from the router.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The machine-readable code of an error body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

/// An image part for [`TestApp::upload`].
pub struct TestFile<'a> {
    pub name: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let config: AppConfig = serde_json::from_value(json!({
            "database": { "url": "memory:" },
            "auth": { "jwt_secret": JWT_SECRET, "token_ttl_minutes": 60 },
            "storage": { "provider": "noop" },
            "analytics": { "cost_saved_per_inspection": 500 },
        }))
        .expect("Failed to build test config");
        config.validate().expect("Test config is invalid");

        let storage = Arc::new(NoopImageStorage::new());
        let state = AppState::new(
            config.clone(),
            Stores::memory(MemoryStore::new()),
            storage.clone(),
            Arc::new(SystemClock),
        );

        Self {
            router: build_app(state),
            storage,
            config,
        }
    }

    /// Send a request with an optional JSON body and bearer token.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = match body {
            Some(body) => req
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&body).expect("Failed to serialize body"),
                )),
            None => req.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a multipart upload with every file under the `files` field.
    pub async fn upload(&self, path: &str, files: &[TestFile<'_>], token: &str) -> TestResponse {
        let mut body = Vec::new();
        for file in files {
            body.extend_from_slice(
                format!(
                    "--{MULTIPART_BOUNDARY}\r\n\
                     Content-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\n\
                     Content-Type: {}\r\n\r\n",
                    file.name, file.content_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(file.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header("Authorization", format!("Bearer {token}"))
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Register an account and return the response.
    pub async fn register(&self, email: &str, password: &str, role: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "name": "Test User",
                "email": email,
                "password": password,
                "role": role,
            })),
            None,
        )
        .await
    }

    /// Log in and return the response.
    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": email, "password": password })),
            None,
        )
        .await
    }

    /// Register + login, returning the session token.
    pub async fn token_for(&self, email: &str, role: &str) -> String {
        let registered = self.register(email, PASSWORD, role).await;
        assert_eq!(registered.status, StatusCode::CREATED, "{:?}", registered.body);

        let login = self.login(email, PASSWORD).await;
        assert_eq!(login.status, StatusCode::OK, "{:?}", login.body);
        login.data()["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }

    pub async fn customer(&self, email: &str) -> String {
        self.token_for(email, "customer").await
    }

    pub async fn pilot(&self, email: &str) -> String {
        self.token_for(email, "pilot").await
    }

    /// Create a Basic inspection at "Site 1" and return its JSON.
    pub async fn create_inspection(&self, customer_token: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/inspections",
                Some(json!({
                    "location": "Site 1",
                    "scheduled_date": "2026-11-01T09:00:00Z",
                    "package": "Basic",
                })),
                Some(customer_token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.data().clone()
    }

    /// Create an inspection and have `pilot_token` claim it. Returns its id.
    pub async fn scheduled_inspection(&self, customer_token: &str, pilot_token: &str) -> String {
        let id = id_of(&self.create_inspection(customer_token).await);
        let response = self
            .request(
                "PATCH",
                &format!("/api/inspections/{id}/assign"),
                None,
                Some(pilot_token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        id
    }

    /// File a report for `inspection_id`.
    pub async fn create_report(&self, inspection_id: &str, title: &str, token: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/reports",
            Some(json!({
                "inspection_id": inspection_id,
                "title": title,
                "summary": "Minor cracking near the chimney",
                "defect_classification": "crack",
                "confidence": 87,
            })),
            Some(token),
        )
        .await
    }
}

/// The `id` field of an entity body.
pub fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("id missing").to_string()
}
