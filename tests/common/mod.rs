#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode, Uri},
    response::{AppendHeaders, IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde_json::{json, Value};
use testtribe::{
    api::{self, ServiceState},
    proxy::BackendConfig,
};
use tokio::net::TcpListener;

/// A stand-in auth backend: echoes what it receives and hands out cookies
/// scoped to its own domain.
pub fn fake_backend() -> Router {
    Router::new()
        .route("/landed", get(landed))
        .route("/api/auth/get-session", get(get_session))
        .route("/api/auth/*path", any(echo))
}

async fn echo(headers: HeaderMap, uri: Uri, method: axum::http::Method, body: String) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string)
    };

    let payload = json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "cookie": header("cookie"),
        "contentType": header("content-type"),
        "requestId": header("x-request-id"),
        "body": body,
    });

    match uri.path() {
        "/api/auth/sign-in/email" => (
            StatusCode::OK,
            AppendHeaders([
                (
                    header::SET_COOKIE,
                    "better-auth.session_token=tok; Domain=api.backend.test; Path=/; HttpOnly; Secure",
                ),
                (
                    header::SET_COOKIE,
                    "better-auth.session_data=data; Path=/; domain=.backend.test; SameSite=Lax",
                ),
            ]),
            Json(payload),
        )
            .into_response(),
        "/api/auth/verify-email" => (
            StatusCode::FOUND,
            AppendHeaders([
                (
                    header::SET_COOKIE,
                    "better-auth.session_token=verified; Domain=api.backend.test; Path=/; HttpOnly",
                ),
                (header::LOCATION, "/landed"),
            ]),
        )
            .into_response(),
        "/api/auth/sign-out-expired" => (
            StatusCode::UNAUTHORIZED,
            AppendHeaders([(
                header::SET_COOKIE,
                "better-auth.session_token=; Max-Age=0; Domain=api.backend.test; Path=/; Secure",
            )]),
            Json(json!({ "message": "session expired" })),
        )
            .into_response(),
        // Hands back a cookie derived from the inbound one.
        "/api/auth/list-sessions" => {
            let echo = session_value(&headers).unwrap_or_default();
            (
                AppendHeaders([(
                    header::SET_COOKIE,
                    format!("echo={echo}; Domain=api.backend.test; Path=/"),
                )]),
                Json(payload),
            )
                .into_response()
        }
        "/api/auth/plain" => Response::builder()
            .status(StatusCode::ACCEPTED)
            .body(Body::from("queued"))
            .unwrap_or_default(),
        "/api/auth/missing" => (StatusCode::NOT_FOUND, "nope").into_response(),
        _ => Json(payload).into_response(),
    }
}

/// Where the backend's own redirects point; reaching it means a redirect was
/// followed.
async fn landed() -> &'static str {
    "landed page"
}

fn session_value(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookie| {
            cookie
                .split(';')
                .find_map(|pair| pair.trim().strip_prefix("session="))
        })
        .map(ToString::to_string)
}

/// Sessions keyed by the `role` cookie: `session=<role>`.
async fn get_session(headers: HeaderMap) -> Response {
    match session_value(&headers) {
        None => StatusCode::UNAUTHORIZED.into_response(),
        Some(role) if role == "broken" => StatusCode::BAD_GATEWAY.into_response(),
        Some(role) => Json(json!({
            "session": { "id": "s-1", "userId": format!("u-{role}") },
            "user": {
                "id": format!("u-{role}"),
                "email": format!("{role}@testtribe.dev"),
                "name": role,
                "role": role,
            }
        }))
        .into_response(),
    }
}

/// Serve `router` on an ephemeral loopback port and return its base URL.
pub async fn spawn(router: Router) -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router).await {
            eprintln!("fake backend stopped: {err}");
        }
    });
    Ok(format!("http://{addr}"))
}

/// The full edge router wired to a fake backend.
pub async fn edge() -> anyhow::Result<Router> {
    let base_url = spawn(fake_backend()).await?;
    let state = ServiceState::new(BackendConfig::new(Some(base_url)))?;
    Ok(api::app(state))
}

pub async fn json_body(response: Response) -> anyhow::Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn request(method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder().method(method).uri(uri)
}

pub fn empty(builder: axum::http::request::Builder) -> anyhow::Result<Request<Body>> {
    Ok(builder.body(Body::empty())?)
}
