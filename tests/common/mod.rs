use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;

use bitget_relay::bitget::{BitgetClient, Credentials};

pub const TEST_SECRET: &str = "test-secret";

/// One request as seen by the fake exchange.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl CapturedRequest {
    #[allow(dead_code)]
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[allow(dead_code)]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("body is JSON")
    }
}

/// How the fake exchange answers.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Reply {
    Json(StatusCode, Value),
    Text(StatusCode, &'static str, String),
    Delayed(Duration),
}

impl Reply {
    #[allow(dead_code)]
    pub fn accepted() -> Self {
        Reply::Json(
            StatusCode::OK,
            json!({
                "code": "00000",
                "msg": "success",
                "data": { "orderId": "1001", "clientOid": "abc" }
            }),
        )
    }
}

#[derive(Clone)]
struct Shared {
    reply: Reply,
    hits: Arc<AtomicUsize>,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

pub struct FakeExchange {
    pub url: String,
    hits: Arc<AtomicUsize>,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

#[allow(dead_code)]
impl FakeExchange {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

async fn answer(
    State(shared): State<Shared>,
    method: axum::http::Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    shared.hits.fetch_add(1, Ordering::SeqCst);
    shared.captured.lock().unwrap().push(CapturedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers,
        body,
    });

    match shared.reply {
        Reply::Json(status, body) => (status, axum::Json(body)).into_response(),
        Reply::Text(status, content_type, text) => {
            (status, [(CONTENT_TYPE, content_type)], text).into_response()
        }
        Reply::Delayed(delay) => {
            tokio::time::sleep(delay).await;
            axum::Json(json!({ "code": "00000", "msg": "late" })).into_response()
        }
    }
}

/// Start a local stand-in for the Bitget REST API.
pub async fn spawn_exchange(reply: Reply) -> FakeExchange {
    let hits = Arc::new(AtomicUsize::new(0));
    let captured = Arc::new(Mutex::new(Vec::new()));
    let shared = Shared {
        reply,
        hits: hits.clone(),
        captured: captured.clone(),
    };

    let app = Router::new().fallback(answer).with_state(shared);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeExchange {
        url: format!("http://{addr}"),
        hits,
        captured,
    }
}

#[allow(dead_code)]
pub fn test_credentials() -> Credentials {
    Credentials {
        api_key: Some("test-key".into()),
        api_secret: Some(TEST_SECRET.into()),
        passphrase: Some("test-pass".into()),
        sub_account_id: None,
    }
}

#[allow(dead_code)]
pub fn client_for(exchange: &FakeExchange, credentials: Credentials) -> BitgetClient {
    BitgetClient::new(reqwest::Client::new(), credentials)
        .with_base_url(exchange.url.clone())
        .with_timeout(Duration::from_secs(5))
}

/// Recompute a Bitget signature without going through the crate.
#[allow(dead_code)]
pub fn expected_signature(timestamp: &str, path: &str, body: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(TEST_SECRET.as_bytes()).unwrap();
    mac.update(format!("{timestamp}POST{path}{body}").as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}
