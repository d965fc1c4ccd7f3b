#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    routing::{any, get},
    Json, Router,
};
use serde_json::{json, Value};
use smartsuite_relay::{relay_app, AppState, CredentialConfig, RelayConfig, Transport, TransportError, TransportResponse};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower::ServiceExt;

pub const TOKEN: &str = "test-token";
pub const ACCOUNT: &str = "acct-1";

/// Serve `router` on an ephemeral local port.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn fake_upstream() -> Router {
    Router::new()
        .route(
            "/applications/",
            get(|| async { Json(json!([{"id": "t1", "name": "Tasks"}])) }),
        )
        .route(
            "/throttled/",
            any(|| async { (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests") }),
        )
        .route(
            "/busy/",
            any(|| async { (StatusCode::SERVICE_UNAVAILABLE, "upstream says: too MANY requests, retry later") }),
        )
        .route("/gateway/", any(|| async { (StatusCode::BAD_GATEWAY, "Bad gateway") }))
        .route(
            "/missing/",
            any(|| async { (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))) }),
        )
        .route("/", any(echo))
        .route("/echo/*rest", any(echo))
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "authorization": header("authorization"),
        "account_id": header("account-id"),
        "content_type": header("content-type"),
        "body": body
    }))
}

pub fn relay_for(upstream: SocketAddr) -> Router {
    let creds = CredentialConfig::new(TOKEN, ACCOUNT, format!("http://{}", upstream));
    relay_app(AppState::new(RelayConfig::new(creds)))
}

/// Drive the relay router in-process and decode the JSON reply.
pub async fn call(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub method: Method,
    pub endpoint: String,
    pub body: Option<Value>,
}

/// Transport replaying queued replies in order and recording every call.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<TransportResponse, String>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, status: u16, body: Value) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse::json(status, &body)));
    }

    pub fn reply_raw(&self, status: u16, body: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse::new(status, body.as_bytes().to_vec())));
    }

    pub fn fail(&self, message: &str) {
        self.replies.lock().unwrap().push_back(Err(message.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, method: Method, endpoint: &str, body: Option<Value>) -> Result<TransportResponse, TransportError> {
        self.calls.lock().unwrap().push(Call {
            method,
            endpoint: endpoint.to_string(),
            body,
        });
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(TransportError(message)),
            None => Err(TransportError("no scripted reply".into())),
        }
    }
}

/// First call waits for `release`; every call answers with the next queued item list.
pub struct GatedTransport {
    pub started: Notify,
    pub release: Notify,
    calls: AtomicUsize,
    answers: Mutex<VecDeque<Value>>,
}

impl GatedTransport {
    pub fn new(answers: Vec<Value>) -> Arc<Self> {
        Arc::new(GatedTransport {
            started: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
            answers: Mutex::new(answers.into()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn send(&self, _method: Method, _endpoint: &str, _body: Option<Value>) -> Result<TransportResponse, TransportError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let answer = self.answers.lock().unwrap().pop_front().unwrap_or(Value::Null);
        if n == 0 {
            self.started.notify_one();
            self.release.notified().await;
        }
        Ok(TransportResponse::json(200, &json!({ "items": answer })))
    }
}

/// In-memory upstream for one table `t1` whose `title` field is required.
#[derive(Default)]
pub struct MemoryTable {
    records: Mutex<Vec<Value>>,
    next_id: AtomicUsize,
    pub list_calls: AtomicUsize,
}

impl MemoryTable {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl Transport for MemoryTable {
    async fn send(&self, method: Method, endpoint: &str, body: Option<Value>) -> Result<TransportResponse, TransportError> {
        let mut records = self.records.lock().unwrap();
        let reply = if method == Method::POST && endpoint == "/applications/t1/records/list/" {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            json!({ "items": *records, "total_items": records.len() })
        } else if method == Method::POST && endpoint == "/applications/t1/records/" {
            let mut fields = match body {
                Some(Value::Object(m)) => m,
                _ => Default::default(),
            };
            let has_title = fields.get("title").and_then(Value::as_str).map_or(false, |t| !t.is_empty());
            if !has_title {
                return Ok(TransportResponse::json(
                    422,
                    &json!({"message": "invalid", "title": ["This field is required."]}),
                ));
            }
            let id = format!("r{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
            fields.insert("id".into(), Value::String(id));
            let record = Value::Object(fields);
            records.push(record.clone());
            record
        } else if method == Method::DELETE {
            let before = records.len();
            records.retain(|r| format!("/applications/t1/records/{}/", r["id"].as_str().unwrap_or("")) != endpoint);
            let status = if records.len() == before { 404 } else { 204 };
            return Ok(TransportResponse::new(status, Vec::new()));
        } else {
            return Ok(TransportResponse::json(404, &json!({"message": "no route"})));
        };
        Ok(TransportResponse::json(200, &reply))
    }
}
