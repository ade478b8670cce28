//! Status Badge Mapping
//!
//! One canonical status enum for every resource. The remote API and older
//! screens disagree on casing (`"scheduled"`, `"SCHEDULED"`, `"in-progress"`,
//! `"IN_PROGRESS"`), so every raw value goes through [`Status::parse`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical record status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum Status {
    // Jobs
    Scheduled,
    InProgress,
    OnHold,
    Completed,
    Cancelled,
    // Purchase orders
    Draft,
    Pending,
    Ordered,
    PartiallyReceived,
    Received,
    // Suppliers, users
    Active,
    Inactive,
    // Parts (derived from stock level)
    InStock,
    LowStock,
    OutOfStock,
}

/// Presentational category of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeCategory {
    Neutral,
    Info,
    Primary,
    Success,
    Warning,
    Danger,
}

impl BadgeCategory {
    /// CSS modifier class for the badge element
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeCategory::Neutral => "badge badge-neutral",
            BadgeCategory::Info => "badge badge-info",
            BadgeCategory::Primary => "badge badge-primary",
            BadgeCategory::Success => "badge badge-success",
            BadgeCategory::Warning => "badge badge-warning",
            BadgeCategory::Danger => "badge badge-danger",
        }
    }
}

/// Mapping table: canonical key, display label, badge category
const TABLE: &[(Status, &str, &str, BadgeCategory)] = &[
    (Status::Scheduled, "scheduled", "Scheduled", BadgeCategory::Info),
    (Status::InProgress, "in_progress", "In Progress", BadgeCategory::Primary),
    (Status::OnHold, "on_hold", "On Hold", BadgeCategory::Warning),
    (Status::Completed, "completed", "Completed", BadgeCategory::Success),
    (Status::Cancelled, "cancelled", "Cancelled", BadgeCategory::Danger),
    (Status::Draft, "draft", "Draft", BadgeCategory::Neutral),
    (Status::Pending, "pending", "Pending", BadgeCategory::Warning),
    (Status::Ordered, "ordered", "Ordered", BadgeCategory::Info),
    (Status::PartiallyReceived, "partially_received", "Partially Received", BadgeCategory::Warning),
    (Status::Received, "received", "Received", BadgeCategory::Success),
    (Status::Active, "active", "Active", BadgeCategory::Success),
    (Status::Inactive, "inactive", "Inactive", BadgeCategory::Neutral),
    (Status::InStock, "in_stock", "In Stock", BadgeCategory::Success),
    (Status::LowStock, "low_stock", "Low Stock", BadgeCategory::Warning),
    (Status::OutOfStock, "out_of_stock", "Out of Stock", BadgeCategory::Danger),
];

/// Spellings seen in external data that do not normalize to a canonical key
const ALIASES: &[(&str, Status)] = &[
    ("canceled", Status::Cancelled),
    ("inprogress", Status::InProgress),
    ("submitted", Status::Ordered),
    ("partial", Status::PartiallyReceived),
];

/// Normalize a raw status string to its canonical key form:
/// trimmed, lowercase, with `-` and spaces turned into `_`.
pub fn normalize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

impl Status {
    pub const JOB: &'static [Status] = &[
        Status::Scheduled,
        Status::InProgress,
        Status::OnHold,
        Status::Completed,
        Status::Cancelled,
    ];

    pub const PURCHASE_ORDER: &'static [Status] = &[
        Status::Draft,
        Status::Pending,
        Status::Ordered,
        Status::PartiallyReceived,
        Status::Received,
        Status::Completed,
        Status::Cancelled,
    ];

    pub const STOCK: &'static [Status] = &[Status::InStock, Status::LowStock, Status::OutOfStock];

    pub const ACTIVITY: &'static [Status] = &[Status::Active, Status::Inactive];

    /// Parse any external spelling of a status
    pub fn parse(raw: &str) -> Option<Status> {
        let key = normalize_key(raw);
        TABLE
            .iter()
            .find(|(_, k, _, _)| *k == key)
            .map(|(s, _, _, _)| *s)
            .or_else(|| ALIASES.iter().find(|(a, _)| *a == key).map(|(_, s)| *s))
    }

    fn row(&self) -> &'static (Status, &'static str, &'static str, BadgeCategory) {
        // Every variant has exactly one row in TABLE
        TABLE
            .iter()
            .find(|(s, _, _, _)| s == self)
            .unwrap_or(&TABLE[0])
    }

    /// Canonical lowercase key (`"in_progress"`)
    pub fn key(&self) -> &'static str {
        self.row().1
    }

    /// Human label (`"In Progress"`)
    pub fn label(&self) -> &'static str {
        self.row().2
    }

    pub fn badge(&self) -> BadgeCategory {
        self.row().3
    }

    /// Whether a raw filter value selects this status
    pub fn matches_filter(&self, filter: &str) -> bool {
        match Status::parse(filter) {
            Some(status) => status == *self,
            None => normalize_key(filter) == self.key(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw value that matches no known status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::parse(s).ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl TryFrom<String> for Status {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Whether a filter value means "no status filter"
pub fn is_unfiltered(filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(f) => {
            let f = f.trim();
            f.is_empty() || f.eq_ignore_ascii_case("all")
        }
    }
}
