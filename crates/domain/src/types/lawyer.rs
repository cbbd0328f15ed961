//! Lawyer discovery, verification and connection requests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::QueryParams;
use crate::impl_status_conversions;

/// Where a lawyer is in the admin verification workflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    Unverified,
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl_status_conversions!(VerificationStatus {
    Unverified => "unverified",
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
    Unknown => "unknown",
});

/// Public lawyer profile shown in search results and profile pages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LawyerProfile {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub specializations: Vec<String>,
    pub experience_years: Option<u32>,
    pub city: Option<String>,
    pub bar_council_id: Option<String>,
    pub bio: Option<String>,
    pub rating: Option<f32>,
    pub hourly_rate: Option<f64>,
    pub is_available: bool,
    pub verification_status: VerificationStatus,
}

/// Filters for the lawyer directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LawyerSearchQuery {
    pub text: Option<String>,
    pub specialization: Option<String>,
    pub city: Option<String>,
    pub min_experience: Option<u32>,
    pub available_only: bool,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl QueryParams for LawyerSearchQuery {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(text) = &self.text {
            pairs.push(("q", text.clone()));
        }
        if let Some(specialization) = &self.specialization {
            pairs.push(("specialization", specialization.clone()));
        }
        if let Some(city) = &self.city {
            pairs.push(("city", city.clone()));
        }
        if let Some(years) = self.min_experience {
            pairs.push(("minExperience", years.to_string()));
        }
        if self.available_only {
            pairs.push(("available", "true".to_string()));
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

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl_status_conversions!(ConnectionStatus {
    Pending => "pending",
    Accepted => "accepted",
    Rejected => "rejected",
    Cancelled => "cancelled",
    Unknown => "unknown",
});

/// A citizen's request to engage a lawyer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionRequest {
    #[serde(alias = "_id")]
    pub id: String,
    pub citizen_id: String,
    pub lawyer_id: String,
    pub message: Option<String>,
    pub status: ConnectionStatus,
    pub created_at: Option<DateTime<Utc>>,
}

/// Rating left by a citizen after working with a lawyer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// 1 to 5 stars
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
