//! Admin panel payloads

use serde::{Deserialize, Serialize};

use super::lawyer::VerificationStatus;
use super::user::UserRole;
use super::QueryParams;

/// Headline counters for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformStats {
    pub total_users: u64,
    pub total_citizens: u64,
    pub total_lawyers: u64,
    pub pending_verifications: u64,
    pub open_cases: u64,
    pub open_disputes: u64,
}

/// Approve or reject a lawyer's verification documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDecision {
    pub status: VerificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl VerificationDecision {
    pub fn approve() -> Self {
        Self { status: VerificationStatus::Approved, reason: None }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self { status: VerificationStatus::Rejected, reason: Some(reason.into()) }
    }
}

/// Filters for the admin user list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListQuery {
    pub role: Option<UserRole>,
    pub active: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl QueryParams for UserListQuery {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(role) = self.role {
            pairs.push(("role", role.to_string()));
        }
        if let Some(active) = self.active {
            pairs.push(("active", active.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}
