use super::handlers::{auth_proxy, dashboard, health, pages};
use crate::{
    dashboard::{AppStatus, AppsCount, DashboardApp, DashboardStats},
    guard::{Chrome, Role, RouteClass, Session},
    proxy::ErrorBody,
};
use utoipa::{
    openapi::{Contact, Info, InfoBuilder, License},
    OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth_proxy::proxy,
        dashboard::add_dashboard_app_draft,
        dashboard::add_dashboard_app_submit,
        dashboard::get_apps_count,
        dashboard::get_dashboard_apps,
        dashboard::get_dashboard_stats,
        pages::page,
    ),
    components(schemas(
        health::Health,
        ErrorBody,
        dashboard::Acknowledgement,
        dashboard::AppsCountResponse,
        dashboard::AppsResponse,
        dashboard::StatsResponse,
        AppStatus,
        AppsCount,
        DashboardApp,
        DashboardStats,
        pages::PageDescriptor,
        Session,
        Role,
        RouteClass,
        Chrome,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Reverse proxy to the auth backend"),
        (name = "dashboard", description = "Demo dashboard data"),
        (name = "pages", description = "Guarded dashboard pages")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    // Use Cargo.toml metadata instead of the utoipa crate info defaults.
    openapi.info = cargo_info();
    openapi
}

fn cargo_info() -> Info {
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(optional_str(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.contact = cargo_contact();
    info.license = cargo_license();
    info
}

fn cargo_contact() -> Option<Contact> {
    // Cargo authors are `;` separated and may include "Name <email>".
    let authors = env!("CARGO_PKG_AUTHORS");
    let primary = authors.split(';').next().map(str::trim)?;
    if primary.is_empty() {
        return None;
    }

    let (name, email) = parse_author(primary);
    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn cargo_license() -> Option<License> {
    let identifier = optional_str(env!("CARGO_PKG_LICENSE"))?;
    let mut license = License::new(identifier);
    license.identifier = Some(identifier.to_string());
    Some(license)
}

fn optional_str(value: &'static str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_author(author: &str) -> (Option<&str>, Option<&str>) {
    if let Some(start) = author.find('<') {
        let name = author[..start].trim();
        let email = author[start + 1..].trim_end_matches('>').trim();
        let name = if name.is_empty() { None } else { Some(name) };
        let email = if email.is_empty() { None } else { Some(email) };
        (name, email)
    } else {
        let name = author.trim();
        (if name.is_empty() { None } else { Some(name) }, None)
    }
}
