#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, Request, StatusCode},
    routing::post,
    Json, Router,
};
use design_service::config::Settings;
use design_service::services::TextProvider;
use design_service::startup::{build_router, AppState, Application};
use http_body_util::BodyExt;
use secrecy::Secret;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower::util::ServiceExt;

pub const JWT_SECRET: &str = "test-signing-secret";

/// Settings for a test instance on a random local port with a signing secret.
pub fn settings() -> Settings {
    Settings {
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: Some(Secret::new(JWT_SECRET.to_string())),
        ..Settings::default()
    }
}

pub fn router(settings: Settings, provider: Option<Arc<dyn TextProvider>>) -> Router {
    build_router(AppState::new(settings, provider))
}

pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authorized_json_request(uri: &str, authorization: &str, body: &Value) -> Request<Body> {
    let mut request = json_request(uri, body);
    request
        .headers_mut()
        .insert(header::AUTHORIZATION, authorization.parse().unwrap());
    request
}

/// Drive one request through the router and decode the JSON reply.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// What the fake Gemini endpoint saw.
#[derive(Debug, Clone)]
pub struct UpstreamCall {
    pub model_action: String,
    pub key: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct FakeGemini {
    status: StatusCode,
    reply: Value,
    calls: Arc<Mutex<Vec<UpstreamCall>>>,
}

async fn generate_content(
    State(fake): State<FakeGemini>,
    Path(model_action): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fake.calls.lock().unwrap().push(UpstreamCall {
        model_action,
        key: query.get("key").cloned(),
        body,
    });
    (fake.status, Json(fake.reply.clone()))
}

/// A local stand-in for the Gemini REST API.
pub struct FakeUpstream {
    pub base_url: String,
    calls: Arc<Mutex<Vec<UpstreamCall>>>,
}

impl FakeUpstream {
    pub async fn spawn(status: StatusCode, reply: Value) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let fake = FakeGemini {
            status,
            reply,
            calls: calls.clone(),
        };

        let app = Router::new()
            .route("/v1beta/models/:model_action", post(generate_content))
            .with_state(fake);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        FakeUpstream {
            base_url: format!("http://127.0.0.1:{}/v1beta", port),
            calls,
        }
    }

    /// Reply the way Gemini does for a successful single-candidate answer.
    pub async fn answering(text: &str) -> Self {
        Self::spawn(
            StatusCode::OK,
            json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": text }] },
                    "finishReason": "STOP"
                }],
                "usageMetadata": { "promptTokenCount": 90, "candidatesTokenCount": 300 }
            }),
        )
        .await
    }

    pub fn calls(&self) -> Vec<UpstreamCall> {
        self.calls.lock().unwrap().clone()
    }
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Run the full service on a random port.
    pub async fn spawn(settings: Settings) -> Self {
        let app = Application::build(settings)
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(format!("{}/health", address)).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }

        TestApp { address, client }
    }

    pub async fn post_suggestions(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/ai-suggestions", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to send request")
    }
}
