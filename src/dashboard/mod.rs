//! Demo dashboard data: a fixed list of apps submitted for testing, plus the
//! counts and filters the dashboard pages ask for. Nothing here is persisted;
//! draft and submit calls are acknowledged without being stored.

mod fixtures;

pub use fixtures::APPS;

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, ToSchema)]
pub enum AppStatus {
    Draft,
    #[serde(rename = "In Review")]
    InReview,
    Rejected,
    #[serde(rename = "In Testing")]
    InTesting,
    Completed,
}

impl AppStatus {
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::InReview,
        Self::Rejected,
        Self::InTesting,
        Self::Completed,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::InReview => "In Review",
            Self::Rejected => "Rejected",
            Self::InTesting => "In Testing",
            Self::Completed => "Completed",
        }
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InReview => "in-review",
            Self::Rejected => "rejected",
            Self::InTesting => "in-testing",
            Self::Completed => "completed",
        }
    }

    /// Match a `{type}` path value: label or slug, case-insensitive, with `_`
    /// or spaces standing in for `-`.
    #[must_use]
    pub fn from_type(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        Self::ALL
            .into_iter()
            .find(|status| status.slug() == normalized)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardApp {
    pub id: u32,
    pub name: &'static str,
    pub package_name: &'static str,
    pub category: &'static str,
    pub platform: &'static str,
    pub status: AppStatus,
    pub testers_enrolled: u32,
    pub testers_required: u32,
    pub bugs_reported: u32,
    /// ISO-8601 date.
    pub submitted_on: &'static str,
}

/// Which apps a `get-dashboard-apps/{type}` call selects.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AppFilter {
    All,
    Status(AppStatus),
    /// Unrecognized type; selects nothing.
    Unknown,
}

impl AppFilter {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("all") {
            return Self::All;
        }
        AppStatus::from_type(value).map_or(Self::Unknown, Self::Status)
    }

    #[must_use]
    pub fn matches(self, app: &DashboardApp) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => app.status == status,
            Self::Unknown => false,
        }
    }
}

#[must_use]
pub fn filter_apps(apps: &[DashboardApp], filter: AppFilter) -> Vec<DashboardApp> {
    apps.iter().filter(|app| filter.matches(app)).cloned().collect()
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, ToSchema)]
pub struct AppsCount {
    #[serde(rename = "Draft")]
    pub draft: usize,
    #[serde(rename = "In Review")]
    pub in_review: usize,
    #[serde(rename = "Rejected")]
    pub rejected: usize,
    #[serde(rename = "In Testing")]
    pub in_testing: usize,
    #[serde(rename = "Completed")]
    pub completed: usize,
    pub total: usize,
}

impl AppsCount {
    #[must_use]
    pub fn of(&self, status: AppStatus) -> usize {
        match status {
            AppStatus::Draft => self.draft,
            AppStatus::InReview => self.in_review,
            AppStatus::Rejected => self.rejected,
            AppStatus::InTesting => self.in_testing,
            AppStatus::Completed => self.completed,
        }
    }
}

#[must_use]
pub fn count_apps(apps: &[DashboardApp]) -> AppsCount {
    apps.iter().fold(AppsCount::default(), |mut count, app| {
        match app.status {
            AppStatus::Draft => count.draft += 1,
            AppStatus::InReview => count.in_review += 1,
            AppStatus::Rejected => count.rejected += 1,
            AppStatus::InTesting => count.in_testing += 1,
            AppStatus::Completed => count.completed += 1,
        }
        count.total += 1;
        count
    })
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_apps: usize,
    pub active_tests: usize,
    pub completed_tests: usize,
    pub pending_review: usize,
    pub drafts: usize,
    pub rejected: usize,
    pub total_testers_enrolled: u32,
    pub total_bugs_reported: u32,
}

#[must_use]
pub fn dashboard_stats(apps: &[DashboardApp]) -> DashboardStats {
    let count = count_apps(apps);
    DashboardStats {
        total_apps: count.total,
        active_tests: count.in_testing,
        completed_tests: count.completed,
        pending_review: count.in_review,
        drafts: count.draft,
        rejected: count.rejected,
        total_testers_enrolled: apps.iter().map(|app| app.testers_enrolled).sum(),
        total_bugs_reported: apps.iter().map(|app| app.bugs_reported).sum(),
    }
}
