//! Lawyer portal operations

use std::sync::Arc;

use chainverdict_domain::{
    ApiResult, CaseStatus, ConnectionRequest, ConnectionStatus, LawyerProfile, LegalCase,
    LegalQuery, ProfileUpdate, QueryAnswer, UserProfile, VerificationStatus,
};
use reqwest::multipart::Form;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::instrument;

use super::client::{RequestClient, RequestOptions};
use super::outcome::{fold, segment, FileUpload};

pub struct LawyerApi {
    client: Arc<RequestClient>,
}

impl LawyerApi {
    pub fn new(client: Arc<RequestClient>) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> ApiResult<Value> {
        fold(self.client.get("/lawyer/dashboard").await)
    }

    #[instrument(skip(self))]
    pub async fn profile(&self) -> ApiResult<LawyerProfile> {
        fold(self.client.get("/lawyer/profile").await)
    }

    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<LawyerProfile> {
        fold(self.client.put("/lawyer/profile", update).await)
    }

    /// Submit enrolment proof for admin review
    ///
    /// Sent as multipart with a `barCouncilId` text field and a `document`
    /// file part.
    #[instrument(skip(self, upload), fields(file = %upload.file_name))]
    pub async fn submit_verification(
        &self,
        bar_council_id: &str,
        upload: FileUpload,
    ) -> ApiResult<LawyerProfile> {
        let part = match upload.into_part() {
            Ok(part) => part,
            Err(err) => return ApiResult::failure(err.to_string()),
        };

        let form = Form::new().text("barCouncilId", bar_council_id.to_string()).part("document", part);
        fold(
            self.client
                .upload_file("/lawyer/verification", form, RequestOptions::new(Method::POST))
                .await,
        )
    }

    #[instrument(skip(self))]
    pub async fn verification_status(&self) -> ApiResult<VerificationStatus> {
        fold(self.client.get("/lawyer/verification").await)
    }

    /// Incoming connection requests from citizens
    #[instrument(skip(self))]
    pub async fn connection_requests(&self) -> ApiResult<Vec<ConnectionRequest>> {
        fold(self.client.get("/lawyer/connections").await)
    }

    #[instrument(skip(self))]
    pub async fn respond_to_connection(
        &self,
        request_id: &str,
        accept: bool,
    ) -> ApiResult<ConnectionRequest> {
        let status = if accept { ConnectionStatus::Accepted } else { ConnectionStatus::Rejected };
        let path = format!("/lawyer/connections/{}", segment(request_id));
        fold(self.client.put(&path, &json!({ "status": status })).await)
    }

    #[instrument(skip(self))]
    pub async fn clients(&self) -> ApiResult<Vec<UserProfile>> {
        fold(self.client.get("/lawyer/clients").await)
    }

    #[instrument(skip(self))]
    pub async fn cases(&self) -> ApiResult<Vec<LegalCase>> {
        fold(self.client.get("/lawyer/cases").await)
    }

    #[instrument(skip(self))]
    pub async fn update_case_status(&self, case_id: &str, status: CaseStatus) -> ApiResult<LegalCase> {
        let path = format!("/lawyer/cases/{}/status", segment(case_id));
        fold(self.client.patch(&path, &json!({ "status": status })).await)
    }

    #[instrument(skip(self))]
    pub async fn queries(&self) -> ApiResult<Vec<LegalQuery>> {
        fold(self.client.get("/lawyer/queries").await)
    }

    #[instrument(skip(self, answer))]
    pub async fn answer_query(&self, query_id: &str, answer: &str) -> ApiResult<LegalQuery> {
        let path = format!("/lawyer/queries/{}/answer", segment(query_id));
        let body = QueryAnswer { answer: answer.to_string() };
        fold(self.client.post(&path, &body).await)
    }

    /// Toggle whether the lawyer shows up as accepting new clients
    #[instrument(skip(self))]
    pub async fn set_availability(&self, available: bool) -> ApiResult<LawyerProfile> {
        fold(self.client.patch("/lawyer/availability", &json!({ "isAvailable": available })).await)
    }
}
