use super::{AppStatus, DashboardApp};

#[allow(clippy::too_many_arguments)]
const fn app(
    id: u32,
    name: &'static str,
    package_name: &'static str,
    category: &'static str,
    status: AppStatus,
    testers: (u32, u32),
    bugs_reported: u32,
    submitted_on: &'static str,
) -> DashboardApp {
    DashboardApp {
        id,
        name,
        package_name,
        category,
        platform: "Android",
        status,
        testers_enrolled: testers.0,
        testers_required: testers.1,
        bugs_reported,
        submitted_on,
    }
}

pub static APPS: [DashboardApp; 12] = [
    app(1, "FitTrack Pro", "com.fittrack.pro", "Health & Fitness", AppStatus::InTesting, (14, 20), 9, "2025-05-02"),
    app(2, "BudgetBee", "io.budgetbee.app", "Finance", AppStatus::InReview, (0, 20), 0, "2025-05-10"),
    app(3, "Recipe Roulette", "com.reciperoulette", "Food & Drink", AppStatus::Completed, (20, 20), 31, "2025-03-18"),
    app(4, "StudyBuddy", "app.studybuddy", "Education", AppStatus::Draft, (0, 20), 0, "2025-05-21"),
    app(5, "ParkPal", "com.parkpal.android", "Maps & Navigation", AppStatus::Rejected, (0, 20), 0, "2025-04-07"),
    app(6, "PixelNotes", "dev.pixelnotes", "Productivity", AppStatus::InTesting, (8, 12), 4, "2025-05-14"),
    app(7, "PetPulse", "com.petpulse.care", "Lifestyle", AppStatus::Completed, (12, 12), 17, "2025-02-27"),
    app(8, "Tunewave", "io.tunewave.player", "Music & Audio", AppStatus::InReview, (0, 15), 0, "2025-05-19"),
    app(9, "GreenThumb", "com.greenthumb.garden", "House & Home", AppStatus::Draft, (0, 12), 0, "2025-05-23"),
    app(10, "QuickQuiz", "app.quickquiz", "Trivia", AppStatus::InTesting, (19, 20), 12, "2025-04-30"),
    app(11, "CarpoolKit", "com.carpoolkit", "Travel & Local", AppStatus::Rejected, (0, 20), 0, "2025-03-29"),
    app(12, "SleepSound", "io.sleepsound.relax", "Health & Fitness", AppStatus::Completed, (20, 20), 22, "2025-01-15"),
];
