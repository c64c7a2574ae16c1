//! # TestTribe edge service
//!
//! `testtribe` sits between the TestTribe front-end and the external
//! authentication backend. It owns three small pieces:
//!
//! - **Auth reverse-proxy** (`/api/auth/*`): forwards auth calls to the backend
//!   and rewrites `Set-Cookie` so session cookies land on this origin. `Domain`
//!   is always stripped and `Secure` follows the inbound transport.
//! - **Route access guard**: one parameterised guard per dashboard surface
//!   (admin, tester, professional, community, developer). It decides between
//!   waiting, redirecting to login/home, or rendering with or without the
//!   authenticated chrome. A failed session lookup fails closed.
//! - **Dashboard demo API** (`/api/dashboard/*`): counts and filters over a
//!   static fixture. Nothing is persisted.
//!
//! The backend owns sessions; this service never stores or inspects them
//! beyond reading the role returned by `get-session`.

pub mod api;
pub mod cli;
pub mod dashboard;
pub mod guard;
pub mod proxy;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
