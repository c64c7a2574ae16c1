//! HTTP handlers.
//!
//! Handlers stay thin: request parsing and response shaping live here, the
//! behaviour lives in `proxy`, `guard` and `dashboard`.

pub mod auth_proxy;
pub mod dashboard;
pub mod health;
pub mod pages;
pub mod root;
