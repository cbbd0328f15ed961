//! Authentication and account operations
//!
//! The only wrapper that touches the session: login starts it, logout ends
//! it, and profile reads refresh the cached user.

use std::sync::Arc;

use chainverdict_domain::{
    ApiResult, AuthPayload, LoginRequest, PasswordChange, PasswordReset, ProfileUpdate,
    RegisterRequest, UserProfile,
};
use reqwest::multipart::Form;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use super::client::{RequestClient, RequestOptions};
use super::outcome::{fold, segment, FileUpload};

/// Account lifecycle against `/auth`
pub struct AuthApi {
    client: Arc<RequestClient>,
}

impl AuthApi {
    pub fn new(client: Arc<RequestClient>) -> Self {
        Self { client }
    }

    /// Create an account; does not log the new user in
    #[instrument(skip(self, request), fields(role = %request.role))]
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<UserProfile> {
        fold(self.client.post("/auth/register", request).await)
    }

    /// Log in and persist the issued token and profile
    ///
    /// A 2xx reply without a token, or a token that cannot be stored, is
    /// reported as a failure so the caller never believes it is logged in
    /// while the next request goes out anonymous.
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthPayload> {
        let result = fold(self.client.post("/auth/login", request).await);
        if !result.is_success() {
            return result;
        }

        let Some(payload) = result.data() else {
            warn!("Login succeeded without a token in the response");
            return ApiResult::failure("Login response did not include a token");
        };

        if let Err(err) = self.client.session().begin(&payload.token, payload.user.as_ref()) {
            warn!(error = %err, "Failed to persist session after login");
            return ApiResult::failure(format!("Failed to store session: {err}"));
        }

        info!(user_id = payload.user.as_ref().map_or("", |u| u.id.as_str()), "Logged in");
        result
    }

    /// Tell the server, then drop the local session whatever it answered
    #[instrument(skip(self))]
    pub async fn logout(&self) -> ApiResult<Value> {
        let server: ApiResult<Value> = fold(self.client.post("/auth/logout", &()).await);
        if let Some(error) = server.error() {
            warn!(error = %error, "Server logout failed, clearing local session anyway");
        }

        match self.client.session().end() {
            Ok(()) if server.is_success() => server,
            Ok(()) => ApiResult::success(None, Some("Logged out".to_string())),
            Err(err) => ApiResult::failure(format!("Failed to clear session: {err}")),
        }
    }

    /// Fetch the logged-in user and refresh the cached copy
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> ApiResult<UserProfile> {
        let result = fold(self.client.get("/auth/me").await);
        self.remember(&result);
        result
    }

    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<UserProfile> {
        let result = fold(self.client.put("/auth/profile", update).await);
        self.remember(&result);
        result
    }

    #[instrument(skip(self, upload), fields(file = %upload.file_name))]
    pub async fn upload_avatar(&self, upload: FileUpload) -> ApiResult<UserProfile> {
        let part = match upload.into_part() {
            Ok(part) => part,
            Err(err) => return ApiResult::failure(err.to_string()),
        };

        let form = Form::new().part("avatar", part);
        let result = fold(
            self.client.upload_file("/auth/avatar", form, RequestOptions::new(Method::POST)).await,
        );
        self.remember(&result);
        result
    }

    #[instrument(skip(self, change))]
    pub async fn change_password(&self, change: &PasswordChange) -> ApiResult<Value> {
        fold(self.client.put("/auth/change-password", change).await)
    }

    #[instrument(skip(self, email))]
    pub async fn forgot_password(&self, email: &str) -> ApiResult<Value> {
        fold(self.client.post("/auth/forgot-password", &json!({ "email": email })).await)
    }

    #[instrument(skip(self, reset))]
    pub async fn reset_password(&self, reset: &PasswordReset) -> ApiResult<Value> {
        fold(self.client.post("/auth/reset-password", reset).await)
    }

    #[instrument(skip(self, token))]
    pub async fn verify_email(&self, token: &str) -> ApiResult<Value> {
        let path = format!("/auth/verify-email/{}", segment(token));
        fold(self.client.get(&path).await)
    }

    /// Whether a token is currently stored
    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }

    /// Profile cached at the last login or profile refresh
    pub fn cached_user(&self) -> Option<UserProfile> {
        self.client.session().cached_user().unwrap_or_else(|err| {
            warn!(error = %err, "Ignoring unreadable cached profile");
            None
        })
    }

    fn remember(&self, result: &ApiResult<UserProfile>) {
        if let Some(user) = result.data() {
            if let Err(err) = self.client.session().cache_user(user) {
                warn!(error = %err, "Failed to cache user profile");
            }
        }
    }
}
