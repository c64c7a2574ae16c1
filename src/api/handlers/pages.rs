//! Guarded dashboard pages.
//!
//! Every surface of the route table is mounted here. The handler resolves the
//! session through the injected provider, runs the surface guard and answers
//! with a redirect or a page descriptor telling the front-end which layout to
//! render.

use crate::{
    guard::{
        route::normalize_path, Chrome, GuardOutcome, RouteClass, RouteGuard, RouteTable, Session,
        SessionProvider,
    },
    proxy::cookie_header,
};
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Debug)]
pub struct PageDescriptor {
    surface: &'static str,
    path: String,
    route: RouteClass,
    layout: Chrome,
    /// Signed-in user; only sent with the authenticated layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<Session>,
}

#[utoipa::path(
    get,
    path = "/{surface}/{page}",
    description = "Mounted once per guarded surface: /admin, /tester, /professional, /community, /dashboard and the developer auth area /auth, each with and without a trailing page path.",
    params(
        ("surface" = String, Path, description = "Surface prefix: admin, tester, professional, community, dashboard or auth"),
        ("page" = String, Path, description = "Page path below the surface prefix, possibly several segments")
    ),
    responses(
        (status = 200, description = "Page may render", body = PageDescriptor),
        (status = 307, description = "Redirect to the surface login or home page"),
        (status = 404, description = "Path belongs to no guarded surface")
    ),
    tag = "pages"
)]
// axum handler for guarded pages
pub async fn page(
    Extension(routes): Extension<Arc<RouteTable>>,
    Extension(sessions): Extension<Arc<dyn SessionProvider>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let path = uri.path();
    let (route, Some(surface)) = routes.classify(path) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let guard = RouteGuard::new(surface.clone());
    let cookie = cookie_header(&headers);
    let (outcome, session) = guard.check(sessions.as_ref(), &cookie, path).await;

    match outcome {
        GuardOutcome::Redirect(location) => Redirect::temporary(location).into_response(),
        GuardOutcome::Render(layout) => Json(PageDescriptor {
            surface: surface.name,
            path: normalize_path(path).to_string(),
            route,
            layout,
            user: session.filter(|_| layout == Chrome::Authenticated),
        })
        .into_response(),
        // Nothing may render before the session is known.
        GuardOutcome::Wait => StatusCode::NO_CONTENT.into_response(),
    }
}
