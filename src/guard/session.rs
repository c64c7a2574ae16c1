//! Session lookup for the route guard.
//!
//! Sessions belong to the auth backend. The guard only needs to know whether
//! one exists and which role it carries, so lookups go through the
//! [`SessionProvider`] seam: the backend client in production, fakes in tests.

use super::role::{normalize_role, Role};
use crate::proxy::BackendConfig;
use anyhow::{anyhow, Result};
use reqwest::{header::COOKIE, Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use std::{future::Future, pin::Pin};
use tracing::{debug, warn};
use utoipa::ToSchema;

/// Authenticated principal as reported by the backend.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, ToSchema)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub role: Option<Role>,
}

impl Session {
    #[must_use]
    pub fn new(user_id: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            user_id: user_id.into(),
            email: String::new(),
            name: String::new(),
            role,
        }
    }
}

/// Session lookup progress for one navigation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionState {
    Pending,
    Resolved(Option<Session>),
}

pub type SessionFuture<'a> = Pin<Box<dyn Future<Output = Result<Option<Session>>> + Send + 'a>>;

/// Fetches the session tied to a browser cookie.
pub trait SessionProvider: Send + Sync {
    /// `Ok(None)` means "no session"; errors are treated the same way by the
    /// guard but logged.
    fn fetch<'a>(&'a self, cookie: &'a SecretString) -> SessionFuture<'a>;
}

/// Resolve the session state for a navigation, failing closed.
pub async fn resolve_session(provider: &dyn SessionProvider, cookie: &SecretString) -> SessionState {
    match provider.fetch(cookie).await {
        Ok(session) => SessionState::Resolved(session),
        Err(err) => {
            warn!("Session lookup failed, treating as signed out: {}", err);
            SessionState::Resolved(None)
        }
    }
}

/// Read a `get-session` payload: `null` or `{ "session": {...}, "user": {...} }`.
///
/// A payload without a user id is not a session.
#[must_use]
pub fn parse_session(payload: &Value) -> Option<Session> {
    let user = payload.get("user")?;
    let user_id = user.get("id").and_then(Value::as_str).filter(|id| !id.is_empty())?;
    let text = |field: &str| {
        user.get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let role = user
        .get("role")
        .filter(|role| !role.is_null())
        .or_else(|| payload.get("role"))
        .and_then(normalize_role);

    Some(Session {
        user_id: user_id.to_string(),
        email: text("email"),
        name: text("name"),
        role,
    })
}

/// Looks sessions up through the backend `get-session` endpoint, forwarding the
/// browser cookie the same way the auth proxy does.
#[derive(Clone, Debug)]
pub struct BackendSessionProvider {
    client: Client,
    backend: BackendConfig,
}

impl BackendSessionProvider {
    #[must_use]
    pub const fn new(client: Client, backend: BackendConfig) -> Self {
        Self { client, backend }
    }

    async fn lookup(&self, cookie: &SecretString) -> Result<Option<Session>> {
        if cookie.expose_secret().is_empty() {
            return Ok(None);
        }

        let url = self.backend.auth_url("get-session", None)?;

        let response = self
            .client
            .get(url)
            .header(COOKIE, cookie.expose_secret())
            .send()
            .await?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::NO_CONTENT | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            debug!("No session: backend answered {}", status);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(anyhow!("get-session answered {status}"));
        }

        let payload: Value = response.json().await?;

        Ok(parse_session(&payload))
    }
}

impl SessionProvider for BackendSessionProvider {
    fn fetch<'a>(&'a self, cookie: &'a SecretString) -> SessionFuture<'a> {
        Box::pin(self.lookup(cookie))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FailingProvider;

    impl SessionProvider for FailingProvider {
        fn fetch<'a>(&'a self, _cookie: &'a SecretString) -> SessionFuture<'a> {
            Box::pin(async { Err(anyhow!("backend unreachable")) })
        }
    }

    #[test]
    fn parse_session_reads_user_and_role() {
        let payload = json!({
            "session": { "id": "s1", "userId": "u1", "expiresAt": "2026-10-26T00:00:00Z" },
            "user": { "id": "u1", "email": "ada@testtribe.dev", "name": "Ada", "role": { "name": "Moderator" } }
        });

        let session = parse_session(&payload);
        assert_eq!(
            session,
            Some(Session {
                user_id: "u1".to_string(),
                email: "ada@testtribe.dev".to_string(),
                name: "Ada".to_string(),
                role: Some(Role::Moderator),
            })
        );
    }

    #[test]
    fn parse_session_falls_back_to_top_level_role() {
        let payload = json!({ "user": { "id": "u2" }, "role": "tester" });
        let session = parse_session(&payload);
        assert_eq!(session.and_then(|s| s.role), Some(Role::Tester));
    }

    #[test]
    fn parse_session_null_user_role_uses_top_level_role() {
        let payload = json!({ "user": { "id": "u4", "role": null }, "role": "admin" });
        let session = parse_session(&payload);
        assert_eq!(session.and_then(|s| s.role), Some(Role::Admin));
    }

    #[test]
    fn parse_session_without_user_is_none() {
        assert_eq!(parse_session(&Value::Null), None);
        assert_eq!(parse_session(&json!({ "session": { "id": "s1" } })), None);
        assert_eq!(parse_session(&json!({ "user": { "id": "" } })), None);
        assert_eq!(parse_session(&json!({ "user": { "email": "x@y.z" } })), None);
    }

    #[test]
    fn parse_session_keeps_unknown_role_as_none() {
        let payload = json!({ "user": { "id": "u3", "role": "owner" } });
        let session = parse_session(&payload);
        assert!(session.is_some());
        assert_eq!(session.and_then(|s| s.role), None);
    }

    #[tokio::test]
    async fn resolve_session_fails_closed() {
        let cookie = SecretString::from("session_token=abc".to_string());
        let state = resolve_session(&FailingProvider, &cookie).await;
        assert_eq!(state, SessionState::Resolved(None));
    }

    #[tokio::test]
    async fn backend_provider_without_cookie_skips_lookup() -> Result<()> {
        // No backend configured: a lookup would error, so Ok(None) proves no call was made.
        let provider = BackendSessionProvider::new(Client::new(), BackendConfig::default());
        let session = provider.fetch(&SecretString::from(String::new())).await?;
        assert_eq!(session, None);
        Ok(())
    }

    #[tokio::test]
    async fn backend_provider_without_backend_errors() {
        let provider = BackendSessionProvider::new(Client::new(), BackendConfig::default());
        let result = provider.fetch(&SecretString::from("session_token=abc".to_string())).await;
        assert!(result.is_err());
    }
}
