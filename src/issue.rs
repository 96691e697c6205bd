//! Issue snapshot model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ParseCategoryError, ParseStatusError};
use crate::traits::{Prioritized, Ticketed, Timestamped};

/// Priority an issue carries until the coordinator assigns one.
pub const DEFAULT_PRIORITY: u8 = 3;

/// Area an issue is filed under when none is given.
pub const DEFAULT_AREA: &str = "Ward A";

/// Channel an issue is reported through when none is given.
pub const DEFAULT_CHANNEL: &str = "DesktopApp";

/// Type of service problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Water,
    Sanitation,
    Electricity,
    Roads,
    SolidWaste,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Water,
        Category::Sanitation,
        Category::Electricity,
        Category::Roads,
        Category::SolidWaste,
        Category::Other,
    ];

    /// Urgency derived from the category (1 = most urgent).
    pub fn priority(self) -> u8 {
        match self {
            Category::Water => 1,
            Category::Electricity => 2,
            Category::Sanitation | Category::Roads => 3,
            Category::SolidWaste => 4,
            Category::Other => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Water => "Water",
            Category::Sanitation => "Sanitation",
            Category::Electricity => "Electricity",
            Category::Roads => "Roads",
            Category::SolidWaste => "SolidWaste",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "water" => Ok(Category::Water),
            "sanitation" => Ok(Category::Sanitation),
            "electricity" => Ok(Category::Electricity),
            "roads" => Ok(Category::Roads),
            "solidwaste" => Ok(Category::SolidWaste),
            "other" => Ok(Category::Other),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

/// Workflow status of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IssueStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
}

impl IssueStatus {
    /// Pending and in-progress issues still need a visit.
    pub fn is_open(self) -> bool {
        !matches!(self, IssueStatus::Resolved)
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IssueStatus::Pending => "Pending",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Resolved => "Resolved",
        })
    }
}

impl FromStr for IssueStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "pending" => Ok(IssueStatus::Pending),
            "inprogress" => Ok(IssueStatus::InProgress),
            "resolved" => Ok(IssueStatus::Resolved),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// A single municipal service request, read as a value snapshot.
///
/// Only `ticket`, `category`, `area`, `last_updated` and `priority` are
/// inspected by the indices; the rest is carried for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub ticket: String,
    pub location: String,
    pub category: Category,
    pub description: String,
    #[serde(default)]
    pub attachment_paths: Vec<String>,
    pub channel: String,
    #[serde(default)]
    pub status: IssueStatus,
    pub area: String,
    pub created_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub priority: u8,
}

impl Issue {
    /// Creates an issue with the given key fields and defaults elsewhere.
    ///
    /// Creation and submission times default to `last_updated`.
    pub fn new(
        ticket: impl Into<String>,
        category: Category,
        area: impl Into<String>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            ticket: ticket.into(),
            location: String::new(),
            category,
            description: String::new(),
            attachment_paths: Vec::new(),
            channel: DEFAULT_CHANNEL.to_string(),
            status: IssueStatus::Pending,
            area: area.into(),
            created_at: last_updated,
            submitted_at: last_updated,
            last_updated,
            priority: DEFAULT_PRIORITY,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    pub fn with_status(mut self, status: IssueStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_attachment(mut self, path: impl Into<String>) -> Self {
        self.attachment_paths.push(path.into());
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Sets `priority` from the category rule table.
    pub fn assign_priority(&mut self) {
        self.priority = self.category.priority();
    }
}

impl Prioritized for Issue {
    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Ticketed for Issue {
    fn ticket(&self) -> &str {
        &self.ticket
    }
}

impl Timestamped for Issue {
    fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_rule_table() {
        assert_eq!(Category::Water.priority(), 1);
        assert_eq!(Category::Electricity.priority(), 2);
        assert_eq!(Category::Sanitation.priority(), 3);
        assert_eq!(Category::Roads.priority(), 3);
        assert_eq!(Category::SolidWaste.priority(), 4);
        assert_eq!(Category::Other.priority(), 5);
    }

    #[test]
    fn test_category_parse_is_lenient() {
        assert_eq!("water".parse::<Category>(), Ok(Category::Water));
        assert_eq!(" Solid Waste ".parse::<Category>(), Ok(Category::SolidWaste));
        assert_eq!("solid_waste".parse::<Category>(), Ok(Category::SolidWaste));
        assert_eq!("ROADS".parse::<Category>(), Ok(Category::Roads));
    }

    #[test]
    fn test_category_parse_unknown() {
        let err = "Parks".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown issue category: Parks");
    }

    #[test]
    fn test_category_display_round_trips() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_status_parse_and_open() {
        assert_eq!("In Progress".parse::<IssueStatus>(), Ok(IssueStatus::InProgress));
        assert!(IssueStatus::Pending.is_open());
        assert!(IssueStatus::InProgress.is_open());
        assert!(!IssueStatus::Resolved.is_open());
        assert!("Closed".parse::<IssueStatus>().is_err());
    }

    #[test]
    fn test_new_issue_defaults() {
        let now = Utc::now();
        let issue = Issue::new("MS-0000ABCD", Category::Roads, DEFAULT_AREA, now);
        assert_eq!(issue.priority, DEFAULT_PRIORITY);
        assert_eq!(issue.channel, DEFAULT_CHANNEL);
        assert_eq!(issue.status, IssueStatus::Pending);
        assert_eq!(issue.created_at, now);
        assert!(issue.attachment_paths.is_empty());
    }

    #[test]
    fn test_assign_priority_uses_category() {
        let mut issue = Issue::new("MS-1", Category::Water, "Ward B", Utc::now()).with_priority(5);
        issue.assign_priority();
        assert_eq!(issue.priority, 1);
    }
}
