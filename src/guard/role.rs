//! Role normalization at the session ingestion boundary.
//!
//! The backend has sent the role both as a plain string and as an object with a
//! `name` field. Both shapes are folded into [`Role`] once, so the guard only
//! ever compares enum values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Tester,
    Admin,
    SuperAdmin,
    Moderator,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Tester => "tester",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
            Self::Moderator => "moderator",
        }
    }

    /// Parse a role name: trimmed, case-insensitive, `-` and spaces read as `_`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "user" => Some(Self::User),
            "tester" => Some(Self::Tester),
            "admin" => Some(Self::Admin),
            "super_admin" => Some(Self::SuperAdmin),
            "moderator" => Some(Self::Moderator),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Fold whatever the backend sent as `role` into a [`Role`].
///
/// Accepts `"admin"` and `{ "name": "admin" }`; anything else (missing,
/// unknown names, numbers, arrays) yields `None`.
#[must_use]
pub fn normalize_role(raw: &Value) -> Option<Role> {
    match raw {
        Value::String(name) => Role::parse(name),
        Value::Object(object) => object.get("name").and_then(Value::as_str).and_then(Role::parse),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_plain_string() {
        assert_eq!(normalize_role(&json!("admin")), Some(Role::Admin));
        assert_eq!(normalize_role(&json!(" Moderator ")), Some(Role::Moderator));
        assert_eq!(normalize_role(&json!("SUPER_ADMIN")), Some(Role::SuperAdmin));
        assert_eq!(normalize_role(&json!("super-admin")), Some(Role::SuperAdmin));
    }

    #[test]
    fn normalize_nested_name() {
        assert_eq!(normalize_role(&json!({ "name": "Tester" })), Some(Role::Tester));
        assert_eq!(normalize_role(&json!({ "id": 3, "name": "user" })), Some(Role::User));
    }

    #[test]
    fn normalize_rejects_other_shapes() {
        assert_eq!(normalize_role(&Value::Null), None);
        assert_eq!(normalize_role(&json!("root")), None);
        assert_eq!(normalize_role(&json!("")), None);
        assert_eq!(normalize_role(&json!(1)), None);
        assert_eq!(normalize_role(&json!(["admin"])), None);
        assert_eq!(normalize_role(&json!({ "name": 1 })), None);
        assert_eq!(normalize_role(&json!({ "role": "admin" })), None);
    }

    #[test]
    fn role_round_trips_through_its_name() {
        for role in [
            Role::User,
            Role::Tester,
            Role::Admin,
            Role::SuperAdmin,
            Role::Moderator,
        ] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
            assert_eq!(role.to_string(), role.as_str());
        }
    }
}
