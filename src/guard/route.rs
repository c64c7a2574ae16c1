//! Route table for the dashboard surfaces.
//!
//! Paths are classified with segment-aware prefix matches: `/admin` covers
//! `/admin` and `/admin/...` but not `/administrators`. A trailing slash is
//! ignored.

use super::role::Role;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RouteClass {
    PublicMarketing,
    AuthPage,
    Protected,
}

/// Parameters of one guarded surface.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GuardConfig {
    pub name: &'static str,
    /// Everything under this prefix requires a session.
    pub prefix: &'static str,
    /// Login, register and friends live under this prefix and never require one.
    pub auth_prefix: &'static str,
    pub login_path: &'static str,
    pub home_path: &'static str,
    /// `None` means any session is enough.
    pub allowed_roles: Option<&'static [Role]>,
}

impl GuardConfig {
    #[must_use]
    pub const fn admin() -> Self {
        Self {
            name: "admin",
            prefix: "/admin",
            auth_prefix: "/admin/auth",
            login_path: "/admin/auth/login",
            home_path: "/admin/dashboard",
            allowed_roles: Some(&[Role::Admin, Role::SuperAdmin, Role::Moderator]),
        }
    }

    #[must_use]
    pub const fn tester() -> Self {
        Self {
            name: "tester",
            prefix: "/tester",
            auth_prefix: "/tester/auth",
            login_path: "/tester/auth/login",
            home_path: "/tester/dashboard",
            allowed_roles: Some(&[Role::Tester, Role::SuperAdmin]),
        }
    }

    #[must_use]
    pub const fn professional() -> Self {
        Self {
            name: "professional",
            prefix: "/professional",
            auth_prefix: "/professional/auth",
            login_path: "/professional/auth/login",
            home_path: "/professional/dashboard",
            allowed_roles: None,
        }
    }

    #[must_use]
    pub const fn community() -> Self {
        Self {
            name: "community",
            prefix: "/community",
            auth_prefix: "/community/auth",
            login_path: "/community/auth/login",
            home_path: "/community/dashboard",
            allowed_roles: None,
        }
    }

    #[must_use]
    pub const fn developer() -> Self {
        Self {
            name: "developer",
            prefix: "/dashboard",
            auth_prefix: "/auth",
            login_path: "/auth/login",
            home_path: "/dashboard",
            allowed_roles: None,
        }
    }

    /// Classify `path` from this surface's point of view.
    #[must_use]
    pub fn classify(&self, path: &str) -> RouteClass {
        let path = normalize_path(path);
        if under(path, self.auth_prefix) {
            RouteClass::AuthPage
        } else if under(path, self.prefix) {
            RouteClass::Protected
        } else {
            RouteClass::PublicMarketing
        }
    }

    /// Whether the surface accepts a session with this role.
    #[must_use]
    pub fn allows(&self, role: Option<Role>) -> bool {
        match self.allowed_roles {
            None => true,
            Some(allowed) => role.is_some_and(|role| allowed.contains(&role)),
        }
    }
}

/// All guarded surfaces of the application.
#[derive(Clone, Debug)]
pub struct RouteTable {
    surfaces: Vec<GuardConfig>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(vec![
            GuardConfig::admin(),
            GuardConfig::tester(),
            GuardConfig::professional(),
            GuardConfig::community(),
            GuardConfig::developer(),
        ])
    }
}

impl RouteTable {
    #[must_use]
    pub fn new(surfaces: Vec<GuardConfig>) -> Self {
        Self { surfaces }
    }

    #[must_use]
    pub fn surfaces(&self) -> &[GuardConfig] {
        &self.surfaces
    }

    /// Find the surface owning `path` and how it classifies it. Auth pages win
    /// over protected prefixes; paths no surface claims are public marketing.
    #[must_use]
    pub fn classify(&self, path: &str) -> (RouteClass, Option<&GuardConfig>) {
        let owner = self
            .surfaces
            .iter()
            .find(|surface| surface.classify(path) == RouteClass::AuthPage)
            .or_else(|| {
                self.surfaces
                    .iter()
                    .find(|surface| surface.classify(path) == RouteClass::Protected)
            });

        match owner {
            Some(surface) => (surface.classify(path), Some(surface)),
            None => (RouteClass::PublicMarketing, None),
        }
    }
}

/// Drop a trailing slash, keeping the root as `/`.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

fn under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
