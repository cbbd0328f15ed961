//! Cases, legal queries and disputes raised by citizens

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_status_conversions;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
    /// Value this client does not know yet
    #[serde(other)]
    Unknown,
}

impl_status_conversions!(CaseStatus {
    Open => "open",
    InProgress => "in_progress",
    Resolved => "resolved",
    Closed => "closed",
    Unknown => "unknown",
});

/// New case filed by a citizen, optionally addressed to a connected lawyer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseSubmission {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lawyer_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegalCase {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: CaseStatus,
    pub citizen_id: String,
    pub lawyer_id: Option<String>,
    pub documents: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    #[default]
    Open,
    Answered,
    Closed,
    #[serde(other)]
    Unknown,
}

impl_status_conversions!(QueryStatus {
    Open => "open",
    Answered => "answered",
    Closed => "closed",
    Unknown => "unknown",
});

/// Short legal question posted to lawyers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySubmission {
    pub subject: String,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lawyer_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegalQuery {
    #[serde(alias = "_id")]
    pub id: String,
    pub subject: String,
    pub question: String,
    pub category: Option<String>,
    pub answer: Option<String>,
    pub answered_by: Option<String>,
    pub status: QueryStatus,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryAnswer {
    pub answer: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeStatus {
    #[default]
    Open,
    UnderReview,
    Resolved,
    Dismissed,
    #[serde(other)]
    Unknown,
}

impl_status_conversions!(DisputeStatus {
    Open => "open",
    UnderReview => "under_review",
    Resolved => "resolved",
    Dismissed => "dismissed",
    Unknown => "unknown",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeSubmission {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub against_user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dispute {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub case_id: Option<String>,
    pub raised_by: String,
    pub status: DisputeStatus,
    pub resolution: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Admin verdict on a dispute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeResolution {
    pub status: DisputeStatus,
    pub resolution: String,
}
