//! Route access guard for the role-specific dashboard surfaces.
//!
//! One [`RouteGuard`] is instantiated per surface from a [`GuardConfig`]. For
//! each navigation it turns the session state and the current path into
//! exactly one [`GuardState`], and from there into what to do: wait, redirect,
//! or render with or without the authenticated chrome.
//!
//! A session whose role is not on the surface allow-list is handled exactly
//! like a missing session. This is UX gating; the backend still authorizes
//! every API call on its own.

pub mod role;
pub mod route;
pub mod session;

pub use role::{normalize_role, Role};
pub use route::{GuardConfig, RouteClass, RouteTable};
pub use session::{
    resolve_session, BackendSessionProvider, Session, SessionProvider, SessionState,
};

use secrecy::SecretString;
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GuardState {
    /// Session lookup in flight; nothing may render yet.
    Checking,
    UnauthenticatedOnProtected,
    AuthenticatedOnAuthPage,
    /// Auth page (or a page outside the surface) rendered without chrome.
    StablePublic,
    StableProtected,
}

/// Layout wrapping the rendered page.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Chrome {
    Bare,
    /// Sidebar, navbar and footer of the signed-in area.
    Authenticated,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GuardOutcome {
    Wait,
    Redirect(&'static str),
    Render(Chrome),
}

#[derive(Clone, Debug)]
pub struct RouteGuard {
    config: GuardConfig,
}

impl RouteGuard {
    #[must_use]
    pub const fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    /// Whether `session` may enter this surface.
    #[must_use]
    pub fn authorizes(&self, session: Option<&Session>) -> bool {
        session.is_some_and(|session| self.config.allows(session.role))
    }

    #[must_use]
    pub fn evaluate(&self, state: &SessionState, path: &str) -> GuardState {
        let SessionState::Resolved(session) = state else {
            return GuardState::Checking;
        };

        let authorized = self.authorizes(session.as_ref());
        match (self.config.classify(path), authorized) {
            (RouteClass::AuthPage, true) => GuardState::AuthenticatedOnAuthPage,
            (RouteClass::AuthPage | RouteClass::PublicMarketing, _) => GuardState::StablePublic,
            (RouteClass::Protected, true) => GuardState::StableProtected,
            (RouteClass::Protected, false) => GuardState::UnauthenticatedOnProtected,
        }
    }

    #[must_use]
    pub fn outcome(&self, state: GuardState) -> GuardOutcome {
        match state {
            GuardState::Checking => GuardOutcome::Wait,
            GuardState::UnauthenticatedOnProtected => GuardOutcome::Redirect(self.config.login_path),
            GuardState::AuthenticatedOnAuthPage => GuardOutcome::Redirect(self.config.home_path),
            GuardState::StablePublic => GuardOutcome::Render(Chrome::Bare),
            GuardState::StableProtected => GuardOutcome::Render(Chrome::Authenticated),
        }
    }

    /// Look the session up and decide the navigation in one go.
    ///
    /// Returns the resolved session alongside the outcome so callers can
    /// render the signed-in user without a second lookup.
    pub async fn check(
        &self,
        provider: &dyn SessionProvider,
        cookie: &SecretString,
        path: &str,
    ) -> (GuardOutcome, Option<Session>) {
        let state = resolve_session(provider, cookie).await;
        let guard_state = self.evaluate(&state, path);

        debug!(surface = self.config.name, path, ?guard_state, "route guard decision");

        let session = match state {
            SessionState::Resolved(session) => session,
            SessionState::Pending => None,
        };

        (self.outcome(guard_state), session)
    }
}
