#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, Bytes, to_bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Method, Request, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

use crop_gateway::build_router;
use crop_gateway::config::GatewayConfig;
use crop_gateway::state::AppState;

pub const FRONTEND_ORIGIN: &str = "http://localhost:3000";

/// Żądanie, które dotarło do udawanego backendu.
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub raw_body: Bytes,
}

impl Hit {
    pub fn json_body(&self) -> Value {
        serde_json::from_slice(&self.raw_body).expect("backend otrzymał niepoprawny JSON")
    }
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    content_type: &'static str,
    body: String,
}

#[derive(Clone)]
struct BackendState {
    reply: Reply,
    hits: Arc<Mutex<Vec<Hit>>>,
}

/// Backend uruchomiony w procesie testu na losowym porcie, odpowiada zawsze tak samo.
pub struct FakeBackend {
    pub url: Url,
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl FakeBackend {
    pub async fn json(status: StatusCode, body: Value) -> Self {
        Self::spawn(Reply {
            status,
            content_type: "application/json",
            body: body.to_string(),
        })
        .await
    }

    pub async fn text(status: StatusCode, body: &str) -> Self {
        Self::spawn(Reply {
            status,
            content_type: "text/plain",
            body: body.to_string(),
        })
        .await
    }

    async fn spawn(reply: Reply) -> Self {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let state = BackendState {
            reply,
            hits: hits.clone(),
        };

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().fallback(record).with_state(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FakeBackend {
            url: Url::parse(&format!("http://{}", addr)).unwrap(),
            hits,
        }
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    pub fn single_hit(&self) -> Hit {
        let hits = self.hits();
        assert_eq!(hits.len(), 1, "oczekiwano dokładnie jednego żądania: {:?}", hits);
        hits.into_iter().next().unwrap()
    }
}

async fn record(
    State(state): State<BackendState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.hits.lock().unwrap().push(Hit {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        raw_body: body,
    });

    let reply = state.reply;
    (
        reply.status,
        [(header::CONTENT_TYPE, reply.content_type)],
        reply.body,
    )
        .into_response()
}

/// Adres, pod którym nic nie nasłuchuje.
pub async fn unreachable_backend_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}", addr)).unwrap()
}

pub fn test_config(backend_url: &Url) -> GatewayConfig {
    GatewayConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        backend_url: backend_url.clone(),
        cors_origins: vec![FRONTEND_ORIGIN.to_string()],
    }
}

pub fn build_test_app(backend_url: &Url) -> Router {
    build_router(Arc::new(AppState::new(test_config(backend_url))))
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Bytes {
    to_bytes(response.into_body(), usize::MAX).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
