//! Sample service requests spread across the four default wards.

use chrono::{DateTime, Duration, TimeZone, Utc};

use civic_index::issue::{Category, Issue, IssueStatus};

/// Reference instant every fixture timestamp is offset from.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 3, 8, 0, 0).unwrap()
}

pub fn minutes_after_base(minutes: i64) -> DateTime<Utc> {
    base_time() + Duration::minutes(minutes)
}

/// An issue updated `minutes` after [`base_time`].
pub fn issue(ticket: &str, category: Category, area: &str, minutes: i64) -> Issue {
    Issue::new(ticket, category, area, minutes_after_base(minutes))
}

/// Ten requests, one resolved, across Ward A to Ward D.
pub fn ward_issues() -> Vec<Issue> {
    vec![
        issue("MS-7F3A1C20", Category::Roads, "Ward B", 12)
            .with_location("Main Rd & 5th Ave")
            .with_description("Pothole in the left lane"),
        issue("MS-0B9D44E1", Category::Water, "Ward C", -35)
            .with_location("Clinic, Oak Street")
            .with_description("Burst pipe flooding the pavement"),
        issue("MS-C1E2F3A4", Category::SolidWaste, "Ward A", 47)
            .with_location("Market square")
            .with_description("Bins not collected for two weeks")
            .with_channel("LowData"),
        issue("MS-5D6E7F80", Category::Electricity, "Ward D", -5)
            .with_location("Substation 4")
            .with_description("Street lights out on the whole block"),
        issue("MS-A0B1C2D3", Category::Sanitation, "Ward A", 30)
            .with_location("Taxi rank")
            .with_description("Blocked drain near the ablution block")
            .with_attachment("attachments/drain.jpg"),
        issue("MS-3C4D5E6F", Category::Other, "Ward B", -58)
            .with_location("Library")
            .with_description("Broken bench"),
        issue("MS-E4F5A6B7", Category::Water, "Ward A", 3)
            .with_location("Primary school")
            .with_description("No water pressure")
            .with_status(IssueStatus::Resolved),
        issue("MS-9A8B7C6D", Category::Roads, "Ward D", 21)
            .with_location("Bridge on River Rd")
            .with_description("Cracked road surface")
            .with_status(IssueStatus::InProgress),
        issue("MS-1F2E3D4C", Category::Sanitation, "Ward C", -14)
            .with_location("Community hall")
            .with_description("Sewage overflow")
            .with_channel("Offline-Queued"),
        issue("MS-8E7D6C5B", Category::Electricity, "Ward B", 55)
            .with_location("Clinic, Elm Street")
            .with_description("Exposed cable at the clinic gate"),
    ]
}
