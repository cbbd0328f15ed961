//! Admin panel operations: platform stats, lawyer verification, user and
//! dispute moderation

use std::sync::Arc;

use chainverdict_domain::{
    ApiResult, Dispute, DisputeResolution, DisputeStatus, LawyerProfile, Page, PlatformStats,
    UserListQuery, UserProfile, VerificationDecision,
};
use serde_json::{json, Value};
use tracing::instrument;

use super::client::RequestClient;
use super::outcome::{fold, segment, with_query};

pub struct AdminApi {
    client: Arc<RequestClient>,
}

impl AdminApi {
    pub fn new(client: Arc<RequestClient>) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> ApiResult<PlatformStats> {
        fold(self.client.get("/admin/stats").await)
    }

    /// Lawyers waiting for a verification decision
    #[instrument(skip(self))]
    pub async fn pending_verifications(&self) -> ApiResult<Vec<LawyerProfile>> {
        fold(self.client.get("/admin/verifications/pending").await)
    }

    #[instrument(skip(self))]
    pub async fn lawyer_details(&self, lawyer_id: &str) -> ApiResult<LawyerProfile> {
        let path = format!("/admin/lawyers/{}", segment(lawyer_id));
        fold(self.client.get(&path).await)
    }

    #[instrument(skip(self))]
    pub async fn approve_lawyer(&self, lawyer_id: &str) -> ApiResult<LawyerProfile> {
        self.decide(lawyer_id, &VerificationDecision::approve()).await
    }

    #[instrument(skip(self, reason))]
    pub async fn reject_lawyer(&self, lawyer_id: &str, reason: &str) -> ApiResult<LawyerProfile> {
        self.decide(lawyer_id, &VerificationDecision::reject(reason)).await
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self, query: &UserListQuery) -> ApiResult<Page<UserProfile>> {
        let path = with_query("/admin/users", query);
        fold(self.client.get(&path).await)
    }

    /// Suspend or reactivate an account
    #[instrument(skip(self))]
    pub async fn set_user_active(&self, user_id: &str, active: bool) -> ApiResult<UserProfile> {
        let path = format!("/admin/users/{}/status", segment(user_id));
        fold(self.client.patch(&path, &json!({ "isActive": active })).await)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: &str) -> ApiResult<Value> {
        let path = format!("/admin/users/{}", segment(user_id));
        fold(self.client.delete(&path).await)
    }

    /// All disputes, optionally narrowed to one status
    #[instrument(skip(self))]
    pub async fn list_disputes(&self, status: Option<DisputeStatus>) -> ApiResult<Vec<Dispute>> {
        let path = match status {
            Some(status) => format!("/admin/disputes?status={status}"),
            None => "/admin/disputes".to_string(),
        };
        fold(self.client.get(&path).await)
    }

    #[instrument(skip(self, resolution))]
    pub async fn resolve_dispute(
        &self,
        dispute_id: &str,
        resolution: &DisputeResolution,
    ) -> ApiResult<Dispute> {
        let path = format!("/admin/disputes/{}/resolve", segment(dispute_id));
        fold(self.client.put(&path, resolution).await)
    }

    async fn decide(
        &self,
        lawyer_id: &str,
        decision: &VerificationDecision,
    ) -> ApiResult<LawyerProfile> {
        let path = format!("/admin/lawyers/{}/verify", segment(lawyer_id));
        fold(self.client.put(&path, decision).await)
    }
}

#[cfg(test)]
mod tests {
    use chainverdict_domain::{ApiConfig, UserRole, VerificationStatus};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::session::MemorySessionStore;

    fn admin_for(server: &MockServer) -> AdminApi {
        let client = RequestClient::builder()
            .config(ApiConfig { base_url: server.uri(), ..Default::default() })
            .store(Arc::new(MemorySessionStore::new()))
            .build()
            .unwrap();
        AdminApi::new(Arc::new(client))
    }

    #[tokio::test]
    async fn stats_are_typed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"totalUsers": 12, "pendingVerifications": 3}
            })))
            .mount(&server)
            .await;

        let stats = admin_for(&server).dashboard_stats().await.into_data().unwrap();
        assert_eq!(stats.total_users, 12);
        assert_eq!(stats.pending_verifications, 3);
        assert_eq!(stats.open_cases, 0);
    }

    #[tokio::test]
    async fn rejection_sends_reason() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/admin/lawyers/l-7/verify"))
            .and(body_json(json!({"status": "rejected", "reason": "expired licence"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Lawyer rejected",
                "data": {"id": "l-7", "verificationStatus": "rejected"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = admin_for(&server).reject_lawyer("l-7", "expired licence").await;
        assert_eq!(result.message(), Some("Lawyer rejected"));
        assert_eq!(
            result.data().map(|l| l.verification_status),
            Some(VerificationStatus::Rejected)
        );
    }

    #[tokio::test]
    async fn list_users_passes_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/users"))
            .and(query_param("role", "lawyer"))
            .and(query_param("active", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"items": [{"id": "u-1", "role": "lawyer"}], "total": 1, "page": 1, "limit": 20}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = UserListQuery { role: Some(UserRole::Lawyer), active: Some(false), ..Default::default() };
        let page = admin_for(&server).list_users(&query).await.into_data().unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, "u-1");
    }

    #[tokio::test]
    async fn delete_failure_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/admin/users/u-404"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "User not found"})))
            .mount(&server)
            .await;

        let result = admin_for(&server).delete_user("u-404").await;
        assert!(!result.is_success());
        assert_eq!(result.error(), Some("User not found"));
    }

    #[tokio::test]
    async fn disputes_filter_by_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/disputes"))
            .and(query_param("status", "under_review"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = admin_for(&server).list_disputes(Some(DisputeStatus::UnderReview)).await;
        assert_eq!(result.into_data(), Some(vec![]));
    }
}
