#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use anyhow::Result;
use axum::{body::Body, http::StatusCode};
use common::{edge, empty, json_body, request};
use tower::ServiceExt;

#[tokio::test]
async fn counts_cover_every_status() -> Result<()> {
    let app = edge().await?;
    let response = app
        .oneshot(empty(request("GET", "/api/dashboard/get-apps-count"))?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &json_body(response).await?["data"];
    assert_eq!(data["Draft"], 2);
    assert_eq!(data["In Review"], 2);
    assert_eq!(data["Rejected"], 2);
    assert_eq!(data["In Testing"], 3);
    assert_eq!(data["Completed"], 3);
    assert_eq!(data["total"], 12);
    Ok(())
}

#[tokio::test]
async fn apps_filter_by_type() -> Result<()> {
    let app = edge().await?;

    let all = json_body(
        app.clone()
            .oneshot(empty(request("GET", "/api/dashboard/get-dashboard-apps/all"))?)
            .await?,
    )
    .await?;
    assert_eq!(all["data"].as_array().map(Vec::len), Some(12));

    let testing = json_body(
        app.clone()
            .oneshot(empty(request(
                "GET",
                "/api/dashboard/get-dashboard-apps/in-testing",
            ))?)
            .await?,
    )
    .await?;
    let testing = testing["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(testing.len(), 3);
    assert!(testing.iter().all(|app| app["status"] == "In Testing"));

    let unknown = json_body(
        app.oneshot(empty(request(
            "GET",
            "/api/dashboard/get-dashboard-apps/UNKNOWN_TYPE",
        ))?)
        .await?,
    )
    .await?;
    assert_eq!(unknown["data"], serde_json::json!([]));
    Ok(())
}

#[tokio::test]
async fn stats_agree_with_counts() -> Result<()> {
    let app = edge().await?;
    let stats = json_body(
        app.oneshot(empty(request("GET", "/api/dashboard/get-dashboard-stats"))?)
            .await?,
    )
    .await?;

    let data = &stats["data"];
    assert_eq!(data["totalApps"], 12);
    assert_eq!(data["activeTests"], 3);
    assert_eq!(data["completedTests"], 3);
    assert_eq!(data["pendingReview"], 2);
    Ok(())
}

#[tokio::test]
async fn drafts_and_submissions_are_acknowledged() -> Result<()> {
    let app = edge().await?;

    for (path, message) in [
        ("/api/dashboard/add-dashboard-app-draft", "App draft saved successfully"),
        ("/api/dashboard/add-dashboard-app-submit", "App submitted successfully"),
    ] {
        let response = app
            .clone()
            .oneshot(
                request("POST", path)
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"FitTrack Pro"}"#))?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        let ack = json_body(response).await?;
        assert_eq!(ack["success"], true);
        assert_eq!(ack["message"], message);
    }
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> Result<()> {
    let app = edge().await?;
    let response = app
        .oneshot(empty(request("GET", "/api-docs/openapi.json"))?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = json_body(response).await?;
    assert!(doc["paths"]
        .get("/api/dashboard/get-dashboard-stats")
        .is_some());
    Ok(())
}
