use crate::{
    api::handlers::{auth_proxy, dashboard, health, pages, root},
    guard::{BackendSessionProvider, RouteTable, SessionProvider},
    proxy::{http_client, BackendConfig, AUTH_PREFIX},
    APP_USER_AGENT,
};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
    Router,
};
use reqwest::Client;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, warn, Span};
use ulid::Ulid;
use utoipa_swagger_ui::SwaggerUi;

pub(crate) mod handlers;
mod openapi;

pub use openapi::openapi;

const X_REQUEST_ID: &str = "x-request-id";

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct ServiceState {
    backend: Arc<BackendConfig>,
    client: Client,
    routes: Arc<RouteTable>,
    sessions: Arc<dyn SessionProvider>,
}

impl ServiceState {
    /// Build the production state: one pooled HTTP client shared by the proxy
    /// and the backend session lookups.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(backend: BackendConfig) -> Result<Self> {
        let client = http_client(APP_USER_AGENT).context("Failed to build HTTP client")?;

        let sessions = Arc::new(BackendSessionProvider::new(client.clone(), backend.clone()));

        Ok(Self {
            backend: Arc::new(backend),
            client,
            routes: Arc::new(RouteTable::default()),
            sessions,
        })
    }

    /// Replace the session lookup, e.g. with a fake in tests.
    #[must_use]
    pub fn with_sessions(mut self, sessions: Arc<dyn SessionProvider>) -> Self {
        self.sessions = sessions;
        self
    }

    #[must_use]
    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }
}

/// Build the full application router, layers included.
pub fn app(state: ServiceState) -> Router {
    let mut router = Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health).options(health::health))
        .route(
            &format!("{AUTH_PREFIX}/*path"),
            get(auth_proxy::proxy)
                .post(auth_proxy::proxy)
                .put(auth_proxy::proxy)
                .delete(auth_proxy::proxy),
        )
        .route(
            "/api/dashboard/add-dashboard-app-draft",
            post(dashboard::add_dashboard_app_draft),
        )
        .route(
            "/api/dashboard/add-dashboard-app-submit",
            post(dashboard::add_dashboard_app_submit),
        )
        .route("/api/dashboard/get-apps-count", get(dashboard::get_apps_count))
        .route(
            "/api/dashboard/get-dashboard-apps/:type",
            get(dashboard::get_dashboard_apps),
        )
        .route(
            "/api/dashboard/get-dashboard-stats",
            get(dashboard::get_dashboard_stats),
        );

    // Every guarded surface, plus its auth area when it lives outside the prefix.
    for surface in state.routes.surfaces() {
        let mut prefixes = vec![surface.prefix];
        if !surface.auth_prefix.starts_with(&format!("{}/", surface.prefix)) {
            prefixes.push(surface.auth_prefix);
        }
        for prefix in prefixes {
            router = router
                .route(prefix, get(pages::page))
                .route(&format!("{prefix}/*rest"), get(pages::page));
        }
    }

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static(X_REQUEST_ID),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    X_REQUEST_ID,
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(state.backend.clone()))
                .layer(Extension(state.client.clone()))
                .layer(Extension(state.routes.clone()))
                .layer(Extension(state.sessions.clone())),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, state: ServiceState) -> Result<()> {
    if !state.backend().is_configured() {
        warn!("No backend URL configured; auth calls will answer 500 until one is set");
    }

    let app = app(state);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", err);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
