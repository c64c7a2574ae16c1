//! Forwarding of `/api/auth/*` calls to the external auth backend.
//!
//! Each call is independent: the request is rebuilt against the backend base
//! URL, sent once, and the backend answer is relayed with its status, content
//! type, and body. Only `Set-Cookie` headers are edited (see [`cookie`]).
//! Nothing is cached or shared between calls apart from the HTTP client pool.

pub mod cookie;

use axum::{
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Json, Response},
};
use reqwest::{redirect::Policy, Client};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error};
use url::Url;
use utoipa::ToSchema;

/// Local and remote path prefix of the auth API.
pub const AUTH_PREFIX: &str = "/api/auth";

pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

const X_REQUEST_ID: &str = "x-request-id";

/// Where the auth backend lives. The URL is optional at start-up: a missing
/// value is reported per request rather than refusing to boot.
#[derive(Clone, Debug, Default)]
pub struct BackendConfig {
    base_url: Option<String>,
}

impl BackendConfig {
    #[must_use]
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        Self { base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Build a backend URL for `path` (relative, no leading slash needed).
    ///
    /// # Errors
    /// [`ProxyError::NotConfigured`] without a base URL, [`ProxyError::Upstream`]
    /// when the result is not a valid URL.
    pub fn url(&self, path: &str, query: Option<&str>) -> Result<Url, ProxyError> {
        let base = self.base_url().ok_or(ProxyError::NotConfigured)?;
        let mut target = format!("{base}/{}", path.trim_start_matches('/'));
        if let Some(query) = query.filter(|query| !query.is_empty()) {
            target.push('?');
            target.push_str(query);
        }

        Url::parse(&target).map_err(|err| ProxyError::Upstream(format!("invalid URL {target}: {err}")))
    }

    /// Build the backend URL mirroring `/api/auth/{path}`.
    ///
    /// # Errors
    /// See [`BackendConfig::url`].
    pub fn auth_url(&self, path: &str, query: Option<&str>) -> Result<Url, ProxyError> {
        self.url(
            &format!("{}/{}", AUTH_PREFIX.trim_start_matches('/'), path.trim_start_matches('/')),
            query,
        )
    }
}

/// Failures that end a proxied call. Both become a `500`; only the
/// configuration error is described to the caller.
#[derive(Debug)]
pub enum ProxyError {
    NotConfigured,
    Upstream(String),
}

impl ProxyError {
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::NotConfigured => "Backend URL not configured",
            Self::Upstream(_) => "Failed to proxy request to backend",
        }
    }
}

impl fmt::Display for ProxyError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(formatter, "backend URL not configured"),
            Self::Upstream(message) => write!(formatter, "upstream error: {message}"),
        }
    }
}

impl std::error::Error for ProxyError {}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.public_message().to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// An inbound auth call, already detached from the HTTP framework.
#[derive(Debug)]
pub struct ProxyRequest {
    pub method: Method,
    /// Joined catch-all path segments below `/api/auth/`.
    pub path: String,
    pub query: Option<String>,
    /// Raw inbound `Cookie` header; empty when the browser sent none.
    pub cookie: SecretString,
    pub content_type: String,
    pub request_id: Option<String>,
    pub body: Option<String>,
    /// Inbound transport was HTTPS.
    pub secure: bool,
}

impl ProxyRequest {
    /// Capture what the backend needs from the inbound headers.
    #[must_use]
    pub fn from_headers(method: Method, path: String, headers: &HeaderMap) -> Self {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let request_id = headers
            .get(X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        Self {
            method,
            path,
            query: None,
            cookie: cookie_header(headers),
            content_type,
            request_id,
            body: None,
            secure: false,
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: Option<&str>) -> Self {
        self.query = query.map(ToString::to_string);
        self
    }

    /// Attach the body; ignored for `GET` and `HEAD`.
    #[must_use]
    pub fn with_body(mut self, body: Option<String>) -> Self {
        self.body = if carries_body(&self.method) { body } else { None };
        self
    }

    #[must_use]
    pub const fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }
}

/// The inbound `Cookie` header, empty when absent or not valid ASCII.
#[must_use]
pub fn cookie_header(headers: &HeaderMap) -> SecretString {
    let cookie = headers
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    SecretString::from(cookie.to_string())
}

/// Methods whose body is forwarded.
#[must_use]
pub fn carries_body(method: &Method) -> bool {
    method != Method::GET && method != Method::HEAD
}

/// The backend answer, ready to hand back to the browser.
#[derive(Debug)]
pub struct ProxyResponse {
    pub status: StatusCode,
    /// Backend content type, [`DEFAULT_CONTENT_TYPE`] when it sent none.
    pub content_type: HeaderValue,
    /// Redirect target of a 3xx answer, relayed as is.
    pub location: Option<HeaderValue>,
    /// Rewritten `Set-Cookie` values in backend order.
    pub set_cookies: Vec<HeaderValue>,
    pub body: String,
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, self.content_type);

        if let Some(location) = self.location {
            headers.insert(LOCATION, location);
        }

        for cookie in self.set_cookies {
            headers.append(SET_COOKIE, cookie);
        }

        (self.status, headers, self.body).into_response()
    }
}

/// HTTP client for backend calls. Redirects are never followed: a 3xx from
/// the backend, and the cookies it sets, belong to the browser.
///
/// # Errors
/// Returns an error if the TLS backend cannot be initialized.
pub fn http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .redirect(Policy::none())
        .build()
}

/// Send `request` to the backend once and relay the answer.
///
/// # Errors
/// [`ProxyError::NotConfigured`] before any network activity when no backend
/// URL is set; [`ProxyError::Upstream`] for transport or body read failures.
pub async fn forward(
    client: &Client,
    backend: &BackendConfig,
    request: ProxyRequest,
) -> Result<ProxyResponse, ProxyError> {
    let url = backend.auth_url(&request.path, request.query.as_deref())?;

    debug!("Proxying {} {}", request.method, url.path());

    let mut builder = client
        .request(request.method.clone(), url)
        .header(COOKIE, request.cookie.expose_secret())
        .header(CONTENT_TYPE, request.content_type.as_str());

    if let Some(request_id) = &request.request_id {
        builder = builder.header(X_REQUEST_ID, request_id.as_str());
    }

    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let response = builder
        .send()
        .await
        .map_err(|err| ProxyError::Upstream(format!("request failed: {err}")))?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    let location = response.headers().get(LOCATION).cloned();
    let set_cookies = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| {
            let rewritten = cookie::rewrite_set_cookie(value.as_bytes(), request.secure);
            match HeaderValue::from_bytes(&rewritten) {
                Ok(cookie) => Some(cookie),
                Err(err) => {
                    error!("Rewritten Set-Cookie is not a valid header value: {}", err);
                    None
                }
            }
        })
        .collect();

    let body = response
        .text()
        .await
        .map_err(|err| ProxyError::Upstream(format!("failed to read backend body: {err}")))?;

    Ok(ProxyResponse {
        status,
        content_type,
        location,
        set_cookies,
        body,
    })
}
