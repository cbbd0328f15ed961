//! Request client: one HTTP call with credentials, envelope unwrapping and
//! session-expiry handling
//!
//! Every domain wrapper funnels through [`RequestClient::request`], so the
//! bearer token, error normalisation and the forced re-login live in exactly
//! one place.

use std::sync::Arc;
use std::time::Duration;

use chainverdict_core::{Navigator, SessionManager, SessionStore};
use chainverdict_domain::constants::SESSION_EXPIRY_MARKER;
use chainverdict_domain::ApiConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use super::errors::ApiError;
use crate::http::HttpClient;
use crate::session::TracingNavigator;

/// Body attached to a request
#[derive(Debug)]
enum RequestBody {
    Empty,
    Json(String),
    Multipart(Form),
}

/// Per-call options for [`RequestClient::request`]
///
/// Defaults to a `GET` with no extra headers and no body.
#[derive(Debug)]
pub struct RequestOptions {
    method: Method,
    headers: HeaderMap,
    body: RequestBody,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self { method, headers: HeaderMap::new(), body: RequestBody::Empty }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Add or override a header; caller headers win over the defaults
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Serialize `body` as the JSON payload
    ///
    /// A body that serializes to `null` (e.g. `None`) sends no payload.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the body cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to serialize body: {e}")))?;
        self.body = if value.is_null() {
            RequestBody::Empty
        } else {
            RequestBody::Json(value.to_string())
        };
        Ok(self)
    }

    /// Attach a multipart form; the default JSON content type is dropped
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }
}

/// Authenticated JSON client for the ChainVerdict backend
pub struct RequestClient {
    http: HttpClient,
    base_url: String,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
    session: Arc<SessionManager>,
}

impl RequestClient {
    /// Create a new request client
    ///
    /// # Errors
    ///
    /// Returns `Config` if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig, session: Arc<SessionManager>) -> Result<Self, ApiError> {
        // Timeouts are enforced around the whole exchange, not by reqwest.
        let mut http = HttpClient::builder().timeout(None);
        if let Some(agent) = &config.user_agent {
            http = http.user_agent(agent.clone());
        }
        let http = http
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {}", e)))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_headers,
            timeout: config.timeout(),
            session,
        })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> RequestClientBuilder {
        RequestClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session owning the bearer token used by this client
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Execute a GET request
    ///
    /// # Errors
    ///
    /// See [`RequestClient::request`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(path, RequestOptions::new(Method::GET)).await
    }

    /// Execute a POST request with a JSON body
    ///
    /// # Errors
    ///
    /// See [`RequestClient::request`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(path, RequestOptions::new(Method::POST).json(body)?).await
    }

    /// Execute a PUT request with a JSON body
    ///
    /// # Errors
    ///
    /// See [`RequestClient::request`].
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(path, RequestOptions::new(Method::PUT).json(body)?).await
    }

    /// Execute a PATCH request with a JSON body
    ///
    /// # Errors
    ///
    /// See [`RequestClient::request`].
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(path, RequestOptions::new(Method::PATCH).json(body)?).await
    }

    /// Execute a DELETE request
    ///
    /// # Errors
    ///
    /// See [`RequestClient::request`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(path, RequestOptions::new(Method::DELETE)).await
    }

    /// Upload a multipart form
    ///
    /// The JSON `Content-Type` default is not sent, so reqwest can set the
    /// multipart boundary itself. The verb comes from `options`.
    ///
    /// # Errors
    ///
    /// See [`RequestClient::request`].
    pub async fn upload_file<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(path, options.multipart(form)).await
    }

    /// Issue one request and decode the JSON body into `T`
    ///
    /// # Errors
    ///
    /// - `SessionExpired` for a 401 whose message mentions the token; the
    ///   stored session is cleared and the app is sent to the login page
    /// - `Http` for any other non-2xx status
    /// - `Network` / `Timeout` when no usable response arrived or the body is
    ///   not JSON
    /// - `Decode` when a 2xx JSON body does not fit `T`; ask for
    ///   [`serde_json::Value`] to receive any body unchanged
    /// - `InvalidRequest` if headers or body could not be built
    #[instrument(skip(self, options), fields(method = %options.method, path = %path))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let body = self.execute(path, options).await?;

        serde_json::from_value(body).map_err(|e| {
            warn!(error = %e, "Response did not match the expected shape");
            ApiError::Decode(e.to_string())
        })
    }

    async fn execute(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let RequestOptions { method, headers, body } = options;

        let is_upload = matches!(body, RequestBody::Multipart(_));
        let (headers, sent_token) = self.build_headers(headers, !is_upload);

        let builder = self.http.request(method, &url).headers(headers);
        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(text) => builder.body(text),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let exchange = async {
            let response = self.http.send(builder).await?;
            let status = response.status();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;
            Ok::<_, ApiError>((status, bytes))
        };

        let outcome = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .unwrap_or_else(|_| Err(ApiError::Timeout(limit))),
            None => exchange.await,
        };

        let (status, bytes) = outcome.inspect_err(|err| {
            error!(url = %url, error = %err, "Request failed before a response arrived");
        })?;

        debug!(status = status.as_u16(), bytes = bytes.len(), "Response received");

        if status.is_success() {
            return parse_body(&bytes).map_err(|e| {
                error!(error = %e, "Response body is not valid JSON");
                ApiError::Network(format!("Failed to parse response: {}", e))
            });
        }

        // Error bodies that are not JSON still yield a status-based error.
        let body = parse_body(&bytes).unwrap_or(Value::Null);
        Err(self.map_failure(status, &body, sent_token.as_deref()))
    }

    /// Merge default, caller and auth headers
    ///
    /// Also returns the token read for this request, so a later 401 can be
    /// tied to the session that actually sent it.
    fn build_headers(
        &self,
        caller: HeaderMap,
        with_content_type: bool,
    ) -> (HeaderMap, Option<String>) {
        let mut headers = self.default_headers.clone();
        if !with_content_type {
            headers.remove(CONTENT_TYPE);
        }

        for (name, value) in &caller {
            headers.insert(name.clone(), value.clone());
        }

        let token = self.session.token();
        if let Some(token) = &token {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Stored token is not a valid header value, sending without it"),
            }
        }

        (headers, token)
    }

    fn map_failure(&self, status: StatusCode, body: &Value, sent_token: Option<&str>) -> ApiError {
        let message = body.get("message").and_then(Value::as_str).map(str::to_owned);

        let token_rejected = status == StatusCode::UNAUTHORIZED
            && message.as_deref().is_some_and(|m| m.contains(SESSION_EXPIRY_MARKER));
        if token_rejected {
            self.session.expire(sent_token);
            return ApiError::SessionExpired;
        }

        warn!(
            status = status.as_u16(),
            message = message.as_deref().unwrap_or(""),
            "Request rejected by server"
        );
        ApiError::from_status(status.as_u16(), message)
    }
}

/// Parse a response body; an empty body (204, bodiless errors) is `null`
fn parse_body(bytes: &[u8]) -> Result<Value, serde_json::Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes)
}

/// Builder for [`RequestClient`]
#[derive(Default)]
pub struct RequestClientBuilder {
    config: Option<ApiConfig>,
    store: Option<Arc<dyn SessionStore>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl RequestClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set where the session token is persisted
    pub fn store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set what happens on forced re-login (defaults to logging only)
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Build the request client
    ///
    /// # Errors
    ///
    /// Returns error if the session store is missing or client creation fails
    pub fn build(self) -> Result<RequestClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let store =
            self.store.ok_or_else(|| ApiError::Config("Session store not set".to_string()))?;
        let navigator = self.navigator.unwrap_or_else(|| Arc::new(TracingNavigator));

        RequestClient::new(&config, Arc::new(SessionManager::new(store, navigator)))
    }
}

#[cfg(test)]
mod tests {
    use chainverdict_domain::constants::{TOKEN_STORAGE_KEY, USER_STORAGE_KEY};
    use chainverdict_domain::ApiResponse;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::session::{MemorySessionStore, RecordingNavigator};

    fn client_for(server: &MockServer) -> (RequestClient, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        let config = ApiConfig { base_url: server.uri(), ..Default::default() };
        let client = RequestClient::builder().config(config).store(store.clone()).build().unwrap();
        (client, store)
    }

    #[tokio::test]
    async fn test_builder_missing_store() {
        let result = RequestClient::builder().build();
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[tokio::test]
    async fn test_builder_trims_trailing_slash() {
        let config = ApiConfig { base_url: "http://localhost:5000/api/".into(), ..Default::default() };
        let client = RequestClient::builder()
            .config(config)
            .store(Arc::new(MemorySessionStore::new()))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }

    #[tokio::test]
    async fn test_get_returns_body_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lawyers"))
            .and(header("content-type", "application/json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": [1, 2], "message": "ok"})),
            )
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);
        let body: Value = client.get("/lawyers").await.unwrap();
        assert_eq!(body, json!({"data": [1, 2], "message": "ok"}));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cases"))
            .and(body_json(json!({"title": "Tenancy"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {"id": "c-1"}})))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);
        let response: ApiResponse = client.post("/cases", &json!({"title": "Tenancy"})).await.unwrap();
        assert_eq!(response.data, Some(json!({"id": "c-1"})));
    }

    #[tokio::test]
    async fn test_null_body_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/chat/c-1/read"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "read"})))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);
        let _: Value = client.patch("/chat/c-1/read", &Option::<Value>::None).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_caller_headers_override_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("content-type", "text/plain"))
            .and(header("x-request-source", "dashboard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);
        let options = RequestOptions::new(Method::GET)
            .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .header(
                HeaderName::from_static("x-request-source"),
                HeaderValue::from_static("dashboard"),
            );
        let _: Value = client.request("/anything", options).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);
        let body: Value = client.delete("/connections/1").await.unwrap();
        assert_eq!(body, Value::Null);

        // Option-shaped envelopes accept the empty body too
        let (client, _) = client_for(&server);
        let body: Option<ApiResponse> = client.delete("/connections/1").await.unwrap();
        assert!(body.is_none());
    }

    #[tokio::test]
    async fn test_401_without_token_message_is_plain_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let (client, store) = client_for(&server);
        store.set(TOKEN_STORAGE_KEY, "jwt").unwrap();

        let result: Result<Value, ApiError> = client.post("/auth/login", &json!({})).await;
        match result {
            Err(ApiError::Http { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("expected http error, got {:?}", other),
        }
        assert_eq!(store.get(TOKEN_STORAGE_KEY).unwrap().as_deref(), Some("jwt"));
    }

    #[tokio::test]
    async fn test_token_marker_is_case_sensitive() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Bad TOKEN"})))
            .mount(&server)
            .await;

        let (client, store) = client_for(&server);
        store.set(TOKEN_STORAGE_KEY, "jwt").unwrap();

        let result: Result<Value, ApiError> = client.get("/auth/me").await;
        assert!(matches!(result, Err(ApiError::Http { status: 401, .. })));
        assert!(!client.session().is_expired());
    }

    #[tokio::test]
    async fn test_session_expiry_clears_store_and_navigates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "jwt token expired"})),
            )
            .mount(&server)
            .await;

        let store = Arc::new(MemorySessionStore::new());
        store.set(TOKEN_STORAGE_KEY, "jwt").unwrap();
        store.set(USER_STORAGE_KEY, "{}").unwrap();
        let navigator = Arc::new(RecordingNavigator::default());
        let client = RequestClient::builder()
            .config(ApiConfig { base_url: server.uri(), ..Default::default() })
            .store(store.clone())
            .navigator(navigator.clone())
            .build()
            .unwrap();

        let result: Result<Value, ApiError> = client.get("/citizen/dashboard").await;

        assert!(matches!(result, Err(ApiError::SessionExpired)));
        assert_eq!(store.get(TOKEN_STORAGE_KEY).unwrap(), None);
        assert_eq!(store.get(USER_STORAGE_KEY).unwrap(), None);
        assert_eq!(navigator.visits(), vec!["/login".to_string()]);
    }

    #[tokio::test]
    async fn test_non_json_error_body_uses_status_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);
        let result: Result<Value, ApiError> = client.get("/admin/stats").await;
        match result {
            Err(err @ ApiError::Http { .. }) => {
                assert_eq!(err.to_string(), "HTTP error! status: 502");
            }
            other => panic!("expected http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);
        let result: Result<Value, ApiError> = client.get("/chat").await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let store = Arc::new(MemorySessionStore::new());
        let config = ApiConfig { base_url: server.uri(), timeout_secs: 1, ..Default::default() };
        let client = RequestClient::builder().config(config).store(store).build().unwrap();

        let result: Result<Value, ApiError> = client.get("/slow").await;
        assert!(matches!(result, Err(ApiError::Timeout(d)) if d == Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "text"})))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);
        let result: Result<ApiResponse<Vec<u32>>, ApiError> = client.get("/numbers").await;
        assert!(matches!(result, Err(ApiError::Decode(_))));

        let body: Value = client.get("/numbers").await.unwrap();
        assert_eq!(body, json!({"data": "text"}));
    }

    #[tokio::test]
    async fn test_late_401_for_replaced_token_keeps_new_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cases"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"message": "jwt token expired"}))
                    .set_delay(Duration::from_millis(400)),
            )
            .mount(&server)
            .await;

        let store = Arc::new(MemorySessionStore::new());
        let navigator = Arc::new(RecordingNavigator::default());
        let client = Arc::new(
            RequestClient::builder()
                .config(ApiConfig { base_url: server.uri(), ..Default::default() })
                .store(store.clone())
                .navigator(navigator.clone())
                .build()
                .unwrap(),
        );
        client.session().begin("jwt-1", None).unwrap();

        let in_flight = {
            let client = client.clone();
            tokio::spawn(async move { client.get::<Value>("/cases").await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        client.session().begin("jwt-2", None).unwrap();

        let result = in_flight.await.unwrap();
        assert!(matches!(result, Err(ApiError::SessionExpired)));
        assert_eq!(store.get(TOKEN_STORAGE_KEY).unwrap().as_deref(), Some("jwt-2"));
        assert!(navigator.visits().is_empty());
    }
}
