//! `Set-Cookie` rewriting for cookies relayed from the auth backend.
//!
//! The backend scopes its cookies to its own host. Relayed through this
//! service they must default-scope to the host the browser is visiting, so the
//! `Domain` attribute is dropped. `Secure` is reconciled with the transport of
//! the inbound request: present over HTTPS, absent over plain HTTP so local
//! development keeps working.
//!
//! Attributes are edited in place; everything else (spacing, ordering, unknown
//! attributes) is left untouched, which makes the rewrite idempotent.

use axum::http::{HeaderMap, Uri};

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Rewrite a single `Set-Cookie` value.
///
/// Works on raw header bytes so values carrying obs-text survive unchanged.
#[must_use]
pub fn rewrite_set_cookie(cookie: &[u8], secure: bool) -> Vec<u8> {
    let mut attributes = cookie.split(|&byte| byte == b';');
    // `split` always yields the name=value pair first, even for an empty input.
    let mut rewritten = attributes.next().unwrap_or_default().to_vec();
    let mut has_secure = false;

    for attribute in attributes {
        let name = attribute_name(attribute);
        if name.eq_ignore_ascii_case(b"domain") {
            continue;
        }
        if name.eq_ignore_ascii_case(b"secure") {
            if !secure || has_secure {
                continue;
            }
            has_secure = true;
        }
        rewritten.push(b';');
        rewritten.extend_from_slice(attribute);
    }

    if secure && !has_secure {
        rewritten.extend_from_slice(b"; Secure");
    }

    rewritten
}

/// Whether the inbound request reached us over HTTPS, either directly or
/// through a TLS-terminating proxy that sets `x-forwarded-proto`.
#[must_use]
pub fn is_secure_request(uri: &Uri, headers: &HeaderMap) -> bool {
    if uri
        .scheme_str()
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https"))
    {
        return true;
    }

    headers
        .get(X_FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("https"))
}

fn attribute_name(attribute: &[u8]) -> &[u8] {
    attribute
        .split(|&byte| byte == b'=')
        .next()
        .unwrap_or_default()
        .trim_ascii()
}
