//! Demo dashboard endpoints backed by the static fixture.

use crate::dashboard::{
    count_apps, dashboard_stats, filter_apps, AppFilter, AppsCount, DashboardApp, DashboardStats,
    APPS,
};
use axum::{body::Bytes, extract::Path, response::Json};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Debug)]
pub struct Acknowledgement {
    success: bool,
    message: &'static str,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct AppsCountResponse {
    data: AppsCount,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct AppsResponse {
    data: Vec<DashboardApp>,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct StatsResponse {
    data: DashboardStats,
}

#[utoipa::path(
    post,
    path = "/api/dashboard/add-dashboard-app-draft",
    request_body(content = String, description = "Any JSON payload; not validated or stored", content_type = "application/json"),
    responses(
        (status = 200, description = "Draft acknowledged", body = Acknowledgement)
    ),
    tag = "dashboard"
)]
pub async fn add_dashboard_app_draft(body: Bytes) -> Json<Acknowledgement> {
    debug!("Draft received ({} bytes), not stored", body.len());

    Json(Acknowledgement {
        success: true,
        message: "App draft saved successfully",
    })
}

#[utoipa::path(
    post,
    path = "/api/dashboard/add-dashboard-app-submit",
    request_body(content = String, description = "Any JSON payload; not validated or stored", content_type = "application/json"),
    responses(
        (status = 200, description = "Submission acknowledged", body = Acknowledgement)
    ),
    tag = "dashboard"
)]
pub async fn add_dashboard_app_submit(body: Bytes) -> Json<Acknowledgement> {
    debug!("Submission received ({} bytes), not stored", body.len());

    Json(Acknowledgement {
        success: true,
        message: "App submitted successfully",
    })
}

#[utoipa::path(
    get,
    path = "/api/dashboard/get-apps-count",
    responses(
        (status = 200, description = "Number of apps per status", body = AppsCountResponse)
    ),
    tag = "dashboard"
)]
pub async fn get_apps_count() -> Json<AppsCountResponse> {
    Json(AppsCountResponse {
        data: count_apps(&APPS),
    })
}

#[utoipa::path(
    get,
    path = "/api/dashboard/get-dashboard-apps/{type}",
    params(
        ("type" = String, Path, description = "Status label or slug (draft, in-review, rejected, in-testing, completed) or all")
    ),
    responses(
        (status = 200, description = "Apps with that status; empty for unknown types", body = AppsResponse)
    ),
    tag = "dashboard"
)]
pub async fn get_dashboard_apps(Path(kind): Path<String>) -> Json<AppsResponse> {
    let filter = AppFilter::parse(&kind);
    if filter == AppFilter::Unknown {
        debug!("Unknown dashboard app type: {}", kind);
    }

    Json(AppsResponse {
        data: filter_apps(&APPS, filter),
    })
}

#[utoipa::path(
    get,
    path = "/api/dashboard/get-dashboard-stats",
    responses(
        (status = 200, description = "Dashboard summary", body = StatsResponse)
    ),
    tag = "dashboard"
)]
pub async fn get_dashboard_stats() -> Json<StatsResponse> {
    Json(StatsResponse {
        data: dashboard_stats(&APPS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::AppStatus;

    #[tokio::test]
    async fn unknown_type_returns_empty_data() {
        let Json(response) = get_dashboard_apps(Path("UNKNOWN_TYPE".to_string())).await;
        assert!(response.data.is_empty());
    }

    #[tokio::test]
    async fn known_type_filters_by_status() {
        let Json(response) = get_dashboard_apps(Path("in-testing".to_string())).await;
        assert!(!response.data.is_empty());
        assert!(response
            .data
            .iter()
            .all(|app| app.status == AppStatus::InTesting));
    }

    #[tokio::test]
    async fn drafts_and_submissions_are_always_acknowledged() {
        let Json(draft) = add_dashboard_app_draft(Bytes::from_static(b"not even json")).await;
        assert!(draft.success);
        assert_eq!(draft.message, "App draft saved successfully");

        let Json(submit) = add_dashboard_app_submit(Bytes::new()).await;
        assert!(submit.success);
        assert_eq!(submit.message, "App submitted successfully");
    }

    #[tokio::test]
    async fn stats_and_counts_agree() {
        let Json(count) = get_apps_count().await;
        let Json(stats) = get_dashboard_stats().await;
        assert_eq!(count.data.total, stats.data.total_apps);
        assert_eq!(count.data.in_review, stats.data.pending_review);
    }
}
