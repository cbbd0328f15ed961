//! Citizen portal operations
//!
//! Lawyer discovery and connection requests, plus the cases, legal queries,
//! disputes and reviews a citizen files.

use std::sync::Arc;

use chainverdict_domain::{
    ApiResult, CaseSubmission, ConnectionRequest, Dispute, DisputeSubmission, LawyerProfile,
    LawyerSearchQuery, LegalCase, LegalQuery, Page, ProfileUpdate, QuerySubmission, Review,
    UserProfile,
};
use reqwest::multipart::Form;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::instrument;

use super::client::{RequestClient, RequestOptions};
use super::outcome::{fold, segment, with_query, FileUpload};

pub struct CitizenApi {
    client: Arc<RequestClient>,
}

impl CitizenApi {
    pub fn new(client: Arc<RequestClient>) -> Self {
        Self { client }
    }

    /// Dashboard summary; its shape varies with backend version
    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> ApiResult<Value> {
        fold(self.client.get("/citizen/dashboard").await)
    }

    #[instrument(skip(self))]
    pub async fn profile(&self) -> ApiResult<UserProfile> {
        fold(self.client.get("/citizen/profile").await)
    }

    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<UserProfile> {
        fold(self.client.put("/citizen/profile", update).await)
    }

    #[instrument(skip(self))]
    pub async fn search_lawyers(&self, query: &LawyerSearchQuery) -> ApiResult<Page<LawyerProfile>> {
        let path = with_query("/citizen/lawyers", query);
        fold(self.client.get(&path).await)
    }

    #[instrument(skip(self))]
    pub async fn lawyer(&self, lawyer_id: &str) -> ApiResult<LawyerProfile> {
        let path = format!("/citizen/lawyers/{}", segment(lawyer_id));
        fold(self.client.get(&path).await)
    }

    #[instrument(skip(self, message))]
    pub async fn send_connection_request(
        &self,
        lawyer_id: &str,
        message: Option<&str>,
    ) -> ApiResult<ConnectionRequest> {
        let body = json!({ "lawyerId": lawyer_id, "message": message });
        fold(self.client.post("/citizen/connections", &body).await)
    }

    #[instrument(skip(self))]
    pub async fn connections(&self) -> ApiResult<Vec<ConnectionRequest>> {
        fold(self.client.get("/citizen/connections").await)
    }

    #[instrument(skip(self))]
    pub async fn cancel_connection_request(&self, request_id: &str) -> ApiResult<Value> {
        let path = format!("/citizen/connections/{}", segment(request_id));
        fold(self.client.delete(&path).await)
    }

    #[instrument(skip(self, submission), fields(category = %submission.category))]
    pub async fn submit_case(&self, submission: &CaseSubmission) -> ApiResult<LegalCase> {
        fold(self.client.post("/citizen/cases", submission).await)
    }

    #[instrument(skip(self))]
    pub async fn cases(&self) -> ApiResult<Vec<LegalCase>> {
        fold(self.client.get("/citizen/cases").await)
    }

    #[instrument(skip(self))]
    pub async fn case_details(&self, case_id: &str) -> ApiResult<LegalCase> {
        let path = format!("/citizen/cases/{}", segment(case_id));
        fold(self.client.get(&path).await)
    }

    /// Attach a document to an existing case
    #[instrument(skip(self, upload), fields(file = %upload.file_name))]
    pub async fn upload_case_document(
        &self,
        case_id: &str,
        upload: FileUpload,
    ) -> ApiResult<LegalCase> {
        let part = match upload.into_part() {
            Ok(part) => part,
            Err(err) => return ApiResult::failure(err.to_string()),
        };

        let path = format!("/citizen/cases/{}/documents", segment(case_id));
        let form = Form::new().part("document", part);
        fold(self.client.upload_file(&path, form, RequestOptions::new(Method::POST)).await)
    }

    #[instrument(skip(self, submission))]
    pub async fn submit_query(&self, submission: &QuerySubmission) -> ApiResult<LegalQuery> {
        fold(self.client.post("/citizen/queries", submission).await)
    }

    #[instrument(skip(self))]
    pub async fn queries(&self) -> ApiResult<Vec<LegalQuery>> {
        fold(self.client.get("/citizen/queries").await)
    }

    #[instrument(skip(self, submission))]
    pub async fn file_dispute(&self, submission: &DisputeSubmission) -> ApiResult<Dispute> {
        fold(self.client.post("/citizen/disputes", submission).await)
    }

    #[instrument(skip(self))]
    pub async fn disputes(&self) -> ApiResult<Vec<Dispute>> {
        fold(self.client.get("/citizen/disputes").await)
    }

    /// Rate a lawyer the citizen has worked with
    #[instrument(skip(self, review), fields(rating = review.rating))]
    pub async fn review_lawyer(&self, lawyer_id: &str, review: &Review) -> ApiResult<Value> {
        let path = format!("/citizen/lawyers/{}/reviews", segment(lawyer_id));
        fold(self.client.post(&path, review).await)
    }
}

#[cfg(test)]
mod tests {
    use chainverdict_domain::{ApiConfig, CaseStatus, ConnectionStatus};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::session::MemorySessionStore;

    fn citizen_for(server: &MockServer) -> CitizenApi {
        let client = RequestClient::builder()
            .config(ApiConfig { base_url: server.uri(), ..Default::default() })
            .store(Arc::new(MemorySessionStore::new()))
            .build()
            .unwrap();
        CitizenApi::new(Arc::new(client))
    }

    #[tokio::test]
    async fn search_sends_filters_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/citizen/lawyers"))
            .and(query_param("specialization", "property"))
            .and(query_param("available", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"items": [{"_id": "l-1", "name": "Meera", "specializations": ["property"]}], "total": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = LawyerSearchQuery {
            specialization: Some("property".into()),
            available_only: true,
            ..Default::default()
        };
        let page = citizen_for(&server).search_lawyers(&query).await.into_data().unwrap();
        assert_eq!(page.items[0].id, "l-1");
        assert_eq!(page.items[0].specializations, vec!["property".to_string()]);
    }

    #[tokio::test]
    async fn connection_request_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/citizen/connections"))
            .and(body_json(json!({"lawyerId": "l-1", "message": "Need help with a lease"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Request sent",
                "data": {"id": "r-1", "lawyerId": "l-1", "status": "pending"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = citizen_for(&server)
            .send_connection_request("l-1", Some("Need help with a lease"))
            .await;
        assert_eq!(result.message(), Some("Request sent"));
        assert_eq!(result.data().map(|r| r.status), Some(ConnectionStatus::Pending));
    }

    #[tokio::test]
    async fn submit_case_returns_created_case() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/citizen/cases"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {"_id": "c-1", "title": "Deposit withheld", "status": "open"}
            })))
            .mount(&server)
            .await;

        let submission = CaseSubmission {
            title: "Deposit withheld".into(),
            description: "Landlord kept the deposit".into(),
            category: "tenancy".into(),
            lawyer_id: None,
        };
        let case = citizen_for(&server).submit_case(&submission).await.into_data().unwrap();
        assert_eq!(case.id, "c-1");
        assert_eq!(case.status, CaseStatus::Open);
    }

    #[tokio::test]
    async fn case_document_upload_targets_case() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/citizen/cases/c%201/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Uploaded"})))
            .expect(1)
            .mount(&server)
            .await;

        let upload = FileUpload::new("lease.pdf", b"%PDF-1.4".to_vec()).with_mime("application/pdf");
        let result = citizen_for(&server).upload_case_document("c 1", upload).await;
        assert_eq!(result.message(), Some("Uploaded"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_failure_result() {
        let citizen = {
            let client = RequestClient::builder()
                .config(ApiConfig { base_url: "http://127.0.0.1:9".into(), ..Default::default() })
                .store(Arc::new(MemorySessionStore::new()))
                .build()
                .unwrap();
            CitizenApi::new(Arc::new(client))
        };

        let result = citizen.cases().await;
        assert!(!result.is_success());
        assert!(result.error().unwrap().starts_with("Network error"));
    }
}
