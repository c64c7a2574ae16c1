//! `/api/auth/*` reverse-proxy endpoint.

use crate::proxy::{
    self, carries_body, cookie::is_secure_request, BackendConfig, ErrorBody, ProxyRequest,
    AUTH_PREFIX,
};
use axum::{
    body::{to_bytes, Body},
    extract::{Extension, Request},
    response::{IntoResponse, Response},
};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Largest body relayed to the backend; bigger bodies are dropped like
/// unreadable ones.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[utoipa::path(
    method(get, post, put, delete),
    path = "/api/auth/{path}",
    params(
        ("path" = String, Path, description = "Backend auth route, e.g. sign-in/email or get-session")
    ),
    responses(
        (status = 200, description = "Backend response relayed with rewritten Set-Cookie headers"),
        (status = 302, description = "Backend redirect relayed with its Location, not followed"),
        (status = 500, description = "Backend URL not configured or backend unreachable", body = ErrorBody, content_type = "application/json")
    ),
    tag = "auth"
)]
// axum handler for the auth proxy
#[instrument(skip_all, fields(http.method = %request.method(), http.path = %request.uri().path()))]
pub async fn proxy(
    Extension(client): Extension<Client>,
    Extension(backend): Extension<Arc<BackendConfig>>,
    request: Request,
) -> Response {
    let (parts, body) = request.into_parts();

    let path = parts
        .uri
        .path()
        .strip_prefix(AUTH_PREFIX)
        .unwrap_or_default()
        .trim_start_matches('/')
        .to_string();
    let secure = is_secure_request(&parts.uri, &parts.headers);

    let body = if carries_body(&parts.method) {
        read_body(body).await
    } else {
        None
    };

    let proxy_request = ProxyRequest::from_headers(parts.method, path, &parts.headers)
        .with_query(parts.uri.query())
        .with_body(body)
        .with_secure(secure);

    match proxy::forward(&client, &backend, proxy_request).await {
        Ok(response) => response.into_response(),
        Err(err) => {
            error!("Failed to proxy auth request: {}", err);
            err.into_response()
        }
    }
}

/// Best effort: an unreadable or non UTF-8 body is forwarded as no body.
async fn read_body(body: Body) -> Option<String> {
    match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => match String::from_utf8(bytes.to_vec()) {
            Ok(text) => Some(text),
            Err(err) => {
                debug!("Request body is not UTF-8, forwarding without body: {}", err);
                None
            }
        },
        Err(err) => {
            debug!("Failed to read request body, forwarding without body: {}", err);
            None
        }
    }
}
